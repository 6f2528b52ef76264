use std::path::PathBuf;

use snafu::Snafu;

use crate::{cluster, command, manifest, namespace, readiness, resolver};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to {action}, error: {source}"))]
    Command { action: String, source: command::Error },

    #[snafu(display("{source}"))]
    Cluster { source: cluster::Error },

    #[snafu(display("{source}"))]
    Namespace { source: namespace::Error },

    #[snafu(display("{source}"))]
    Readiness { source: readiness::Error },

    #[snafu(display("Failed to resolve properties of service {service}, error: {source}"))]
    ResolveProperties { service: String, source: resolver::Error },

    #[snafu(display("Invalid template {}, error: {source}", file.display()))]
    Template { file: PathBuf, source: manifest::Error },

    #[snafu(display("Failed to read template {}, error: {source}", file.display()))]
    ReadTemplate { file: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to write template {}, error: {source}", file.display()))]
    WriteTemplate { file: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to resolve absolute path of {}, error: {source}", file.display()))]
    AbsolutePath { file: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to convert {kind} {name}, error: {source}"))]
    ConvertObject { kind: String, name: String, source: serde_json::Error },

    #[snafu(display("Deployment config {name} not found in namespace {namespace}"))]
    DeploymentConfigNotFound { name: String, namespace: String },

    #[snafu(display("Route for service {name} not found in namespace {namespace}"))]
    RouteNotFound { name: String, namespace: String },

    #[snafu(display("Serverless route {name} in namespace {namespace} has no URL yet"))]
    ServerlessUrlMissing { name: String, namespace: String },

    #[snafu(display("Invalid URL {value} for service {name}, error: {source}"))]
    InvalidUrl { name: String, value: String, source: url::ParseError },

    #[snafu(display("Build of build config {name} failed"))]
    BuildFailed { name: String },

    #[snafu(display(
        "Cannot install operator {name}: operators require ephemeral namespaces to be enabled"
    ))]
    OperatorsRequireEphemeralNamespaces { name: String },
}

impl From<cluster::Error> for Error {
    fn from(source: cluster::Error) -> Self { Self::Cluster { source } }
}

impl From<namespace::Error> for Error {
    fn from(source: namespace::Error) -> Self { Self::Namespace { source } }
}

impl From<readiness::Error> for Error {
    fn from(source: readiness::Error) -> Self { Self::Readiness { source } }
}
