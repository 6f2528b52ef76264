mod error;
mod log;
mod scenario;
mod service;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use snafu::ResultExt;
use trellis_base::consts;

pub use self::{
    error::Error,
    log::LogConfig,
    scenario::{Scenario, ScenarioService},
    service::Service,
};
use crate::{orchestrator::Settings, readiness::PollSettings};

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Create a throwaway namespace per scenario instead of reusing the
    /// current one.
    #[serde(default = "Config::default_ephemeral_namespaces")]
    pub ephemeral_namespaces: bool,

    #[serde(default = "Config::default_cli_program")]
    pub cli_program: String,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Config::default_timeout")]
    pub default_timeout: Duration,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Config::default_poll_interval")]
    pub poll_interval: Duration,

    /// Searched first when a property references a resource file.
    #[serde(default = "Config::default_build_output_directory")]
    pub build_output_directory: PathBuf,

    /// Roots searched, in order, when the build output has no match.
    #[serde(default = "Config::default_classpath")]
    pub classpath: Vec<PathBuf>,

    #[serde(default)]
    pub services: Vec<Service>,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ephemeral_namespaces: Self::default_ephemeral_namespaces(),
            cli_program: Self::default_cli_program(),
            default_timeout: Self::default_timeout(),
            poll_interval: Self::default_poll_interval(),
            build_output_directory: Self::default_build_output_directory(),
            classpath: Self::default_classpath(),
            services: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn search_config_file_path() -> PathBuf {
        let paths = std::iter::once(Self::default_path()).chain(
            trellis_base::fallback_project_config_directories().into_iter().map(|mut path| {
                path.push(trellis_base::CLI_CONFIG_NAME);
                path
            }),
        );
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    pub fn default_path() -> PathBuf {
        [trellis_base::PROJECT_CONFIG_DIR.to_path_buf(), PathBuf::from(trellis_base::CLI_CONFIG_NAME)]
            .into_iter()
            .collect()
    }

    /// Reads the configuration at `path`, resolving `~` in the paths it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a path in it
    /// cannot be resolved.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path = resolve(path.as_ref())?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = config.log.file_path.as_deref().map(resolve).transpose()?;
        config.build_output_directory = resolve(&config.build_output_directory)?;
        config.classpath =
            config.classpath.iter().map(PathBuf::as_path).map(resolve).collect::<Result<_, _>>()?;

        Ok(config)
    }

    /// The default configuration with one example service, as YAML.
    pub fn template_basic() -> Vec<u8> {
        let example = Service::new("greeter")
            .with_property("greeting.message", "hola")
            .with_property("app.config", "resource::config/app.yml")
            .with_timeout(consts::timeouts::IMAGE_STREAM_INSTALL, consts::DEFAULT_TIMEOUT);
        let config = Self { services: vec![example], ..Self::default() };
        serde_yaml::to_string(&config).unwrap_or_default().into_bytes()
    }

    pub fn find_service_by_name(&self, name: &str) -> Option<Service> {
        self.services.iter().find(|service| service.name == name).cloned()
    }

    /// The named service, or one without properties if it is not configured.
    pub fn service_or_default(&self, name: &str) -> Service {
        self.find_service_by_name(name).unwrap_or_else(|| Service::new(name))
    }

    pub fn settings(&self) -> Settings {
        Settings {
            ephemeral_namespaces: self.ephemeral_namespaces,
            poll: PollSettings { timeout: self.default_timeout, interval: self.poll_interval },
            build_output_directory: self.build_output_directory.clone(),
            classpath: self.classpath.clone(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn default_ephemeral_namespaces() -> bool { true }

    #[inline]
    #[must_use]
    pub fn default_cli_program() -> String { consts::DEFAULT_CLI_PROGRAM.to_string() }

    #[inline]
    #[must_use]
    pub const fn default_timeout() -> Duration { consts::DEFAULT_TIMEOUT }

    #[inline]
    #[must_use]
    pub const fn default_poll_interval() -> Duration { consts::DEFAULT_POLL_INTERVAL }

    #[inline]
    #[must_use]
    pub fn default_build_output_directory() -> PathBuf {
        PathBuf::from(consts::DEFAULT_BUILD_OUTPUT_DIRECTORY)
    }

    #[inline]
    #[must_use]
    pub fn default_classpath() -> Vec<PathBuf> {
        vec![PathBuf::from("src/main/resources"), PathBuf::from("src/test/resources")]
    }
}

fn resolve(path: &Path) -> Result<PathBuf, Error> {
    path.try_resolve()
        .map(|resolved| resolved.to_path_buf())
        .with_context(|_| error::ResolveFilePathSnafu { file_path: path.to_path_buf() })
}
