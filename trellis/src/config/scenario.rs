use std::path::{Path, PathBuf};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::config::{Error, Service, error};

/// Services deployed, in order, by `trellis run`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub services: Vec<ScenarioService>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioService {
    #[serde(flatten)]
    pub service: Service,

    /// Template applied for the service, relative to the scenario file.
    pub template: PathBuf,

    /// Build config whose logs are followed after the template is applied.
    #[serde(default)]
    pub build_config: Option<String>,

    #[serde(default = "ScenarioService::default_replicas")]
    pub replicas: i32,

    /// Port exposed through a route; nothing is exposed when unset.
    #[serde(default)]
    pub port: Option<u16>,
}

impl ScenarioService {
    #[inline]
    #[must_use]
    pub const fn default_replicas() -> i32 { 1 }
}

impl Scenario {
    /// Loads a scenario, making template paths relative to its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path
            .as_ref()
            .try_resolve()
            .map(|path| path.to_path_buf())
            .with_context(|_| error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() })?;
        let data = std::fs::read(&path).context(error::OpenScenarioSnafu { filename: path.clone() })?;
        let mut scenario: Self =
            serde_yaml::from_slice(&data).context(error::ParseScenarioSnafu { filename: path.clone() })?;

        if let Some(base) = path.parent() {
            for entry in &mut scenario.services {
                if entry.template.is_relative() {
                    entry.template = base.join(&entry.template);
                }
            }
        }
        Ok(scenario)
    }
}
