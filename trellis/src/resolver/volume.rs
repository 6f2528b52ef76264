use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, PodSpec, SecretVolumeSource, Volume, VolumeMount,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VolumeKind {
    ConfigMap,
    Secret,
}

/// Backing object of a volume mounted at one path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeDescriptor {
    pub name: String,
    pub sub_path_expr: Option<String>,
    pub kind: VolumeKind,
}

impl VolumeDescriptor {
    pub fn config_map(name: impl Into<String>) -> Self {
        Self { name: name.into(), sub_path_expr: None, kind: VolumeKind::ConfigMap }
    }

    pub fn secret(name: impl Into<String>) -> Self {
        Self { name: name.into(), sub_path_expr: None, kind: VolumeKind::Secret }
    }

    #[must_use]
    pub fn with_sub_path_expr(mut self, sub_path_expr: impl Into<String>) -> Self {
        self.sub_path_expr = Some(sub_path_expr.into()).filter(|expr: &String| !expr.is_empty());
        self
    }

    pub fn to_volume(&self) -> Volume {
        let name = self.name.clone();
        match self.kind {
            VolumeKind::ConfigMap => Volume {
                name: name.clone(),
                config_map: Some(ConfigMapVolumeSource { name, ..ConfigMapVolumeSource::default() }),
                ..Volume::default()
            },
            VolumeKind::Secret => Volume {
                name: name.clone(),
                secret: Some(SecretVolumeSource {
                    secret_name: Some(name),
                    ..SecretVolumeSource::default()
                }),
                ..Volume::default()
            },
        }
    }

    pub fn to_volume_mount(&self, mount_path: &str) -> VolumeMount {
        VolumeMount {
            name: self.name.clone(),
            mount_path: mount_path.to_string(),
            read_only: Some(true),
            sub_path_expr: self.sub_path_expr.clone(),
            ..VolumeMount::default()
        }
    }
}

/// Volume descriptors keyed by mount path; the first descriptor recorded for
/// a path wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Volumes(BTreeMap<String, VolumeDescriptor>);

impl Volumes {
    /// Records `descriptor` at `mount_path` unless the path is already taken.
    /// Returns whether it was recorded.
    pub fn insert_if_absent(
        &mut self,
        mount_path: impl Into<String>,
        descriptor: VolumeDescriptor,
    ) -> bool {
        let mount_path = mount_path.into();
        if self.0.contains_key(&mount_path) {
            return false;
        }
        let _unused = self.0.insert(mount_path, descriptor);
        true
    }

    pub fn get(&self, mount_path: &str) -> Option<&VolumeDescriptor> { self.0.get(mount_path) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VolumeDescriptor)> {
        self.0.iter().map(|(mount_path, descriptor)| (mount_path.as_str(), descriptor))
    }

    /// Adds each backing volume once to the pod spec and a read-only mount
    /// per mount path to every container.
    pub fn apply_to(&self, pod_spec: &mut PodSpec) {
        if self.is_empty() {
            return;
        }

        let volumes = pod_spec.volumes.get_or_insert_with(Vec::new);
        for (_, descriptor) in self.iter() {
            if !volumes.iter().any(|volume| volume.name == descriptor.name) {
                volumes.push(descriptor.to_volume());
            }
        }

        for container in &mut pod_spec.containers {
            let mounts = container.volume_mounts.get_or_insert_with(Vec::new);
            for (mount_path, descriptor) in self.iter() {
                mounts.retain(|mount| mount.mount_path != mount_path);
                mounts.push(descriptor.to_volume_mount(mount_path));
            }
        }
    }
}
