//! Resolution of file-backed service properties.
//!
//! Property values tagged with `resource::`, `resource-with-destination::` or
//! `secret::` reference files that must be shipped to the cluster. Resolving
//! them yields a [`PropertyPlan`]: the rewritten property values, the
//! ConfigMaps and Secrets to materialize, and the volumes to mount so that the
//! rewritten paths exist inside the containers.

mod error;
mod locator;
mod value;
mod volume;

use std::{collections::BTreeMap, path::PathBuf};

pub use self::{
    error::Error,
    locator::ResourceLocator,
    value::{PropertyValue, file_name, mount_path, normalize_object_name},
    volume::{VolumeDescriptor, VolumeKind, Volumes},
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PropertyPlan {
    /// Property values with tagged entries rewritten to their mounted path.
    pub properties: BTreeMap<String, String>,

    pub volumes: Volumes,

    /// ConfigMap name to file name to file content.
    pub config_maps: BTreeMap<String, BTreeMap<String, String>>,

    /// Secret name to the local file it is created from.
    pub secrets: BTreeMap<String, PathBuf>,
}

#[derive(Clone, Debug)]
pub struct PropertyResolver {
    locator: ResourceLocator,
}

impl PropertyResolver {
    pub const fn new(locator: ResourceLocator) -> Self { Self { locator } }

    pub const fn locator(&self) -> &ResourceLocator { &self.locator }

    /// Classifies every property and plans the objects and volumes it needs.
    ///
    /// # Errors
    ///
    /// Returns an error when a destination value is malformed or a referenced
    /// resource cannot be read.
    pub fn resolve(&self, properties: &BTreeMap<String, String>) -> Result<PropertyPlan, Error> {
        let mut plan = PropertyPlan::default();

        for (key, raw) in properties {
            let resolved = match raw.parse::<PropertyValue>()? {
                PropertyValue::Literal(value) => value,
                PropertyValue::Resource { path } => {
                    let mount_path = mount_path(&path);
                    let file_name = file_name(&path);
                    let config_map = normalize_object_name(&mount_path);

                    plan.add_config_map_entry(&config_map, file_name, self.locator.read(&path)?);
                    let _recorded = plan
                        .volumes
                        .insert_if_absent(mount_path.clone(), VolumeDescriptor::config_map(config_map));

                    format!("{mount_path}/{file_name}")
                }
                PropertyValue::ResourceWithDestination { mount_path, file } => {
                    let mount_path = mount_path.trim_end_matches('/');
                    let file_name = file_name(&file);
                    let config_map = normalize_object_name(mount_path);

                    plan.add_config_map_entry(&config_map, file_name, self.locator.read(&file)?);
                    let destination = format!("{mount_path}/{file_name}");
                    let _recorded = plan.volumes.insert_if_absent(
                        destination.clone(),
                        VolumeDescriptor::config_map(config_map).with_sub_path_expr(file_name),
                    );

                    destination
                }
                PropertyValue::Secret { path } => {
                    let mount_path = mount_path(&path);
                    let secret = normalize_object_name(&path);

                    let file = self
                        .locator
                        .resolve_path(&path)
                        .unwrap_or_else(|| self.locator.locate(&path));
                    let _previous = plan.secrets.insert(secret.clone(), file);
                    let _recorded = plan
                        .volumes
                        .insert_if_absent(mount_path.clone(), VolumeDescriptor::secret(secret));

                    format!("{mount_path}/{}", file_name(&path))
                }
            };

            let _previous = plan.properties.insert(key.clone(), resolved);
        }

        Ok(plan)
    }
}

impl PropertyPlan {
    fn add_config_map_entry(&mut self, config_map: &str, file_name: &str, content: String) {
        let _previous = self
            .config_maps
            .entry(config_map.to_string())
            .or_default()
            .insert(file_name.to_string(), content);
    }
}
