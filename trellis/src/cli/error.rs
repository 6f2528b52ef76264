use snafu::Snafu;

use crate::{config, orchestrator};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: config::Error },

    #[snafu(display("{source}"))]
    Orchestrator {
        #[snafu(source(from(orchestrator::Error, Box::new)))]
        source: Box<orchestrator::Error>,
    },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to initialize Kubernetes client configuration, error: {source}"))]
    KubeConfig {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<config::Error> for Error {
    fn from(source: config::Error) -> Self { Self::Configuration { source } }
}

impl From<orchestrator::Error> for Error {
    fn from(source: orchestrator::Error) -> Self { Self::Orchestrator { source: Box::new(source) } }
}
