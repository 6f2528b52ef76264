use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to parse YAML template, error: {source}"))]
    ParseTemplate { source: serde_yaml::Error },

    #[snafu(display("Resource #{index} in template has no kind"))]
    MissingKind { index: usize },

    #[snafu(display("Failed to decode {kind} resource, error: {source}"))]
    DecodeResource { kind: String, source: serde_yaml::Error },

    #[snafu(display("Failed to encode {kind} resource, error: {source}"))]
    EncodeResource { kind: String, source: serde_json::Error },

    #[snafu(display("Failed to render enriched template, error: {source}"))]
    RenderTemplate { source: serde_yaml::Error },
}
