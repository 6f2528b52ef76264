use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "Unexpected {prefix} format. Expected destinationPath|fileName but found {value}"
    ))]
    MalformedDestination { prefix: &'static str, value: String },

    #[snafu(display("Resource {fragment} was found neither in {} nor on the classpath", build_output.display()))]
    ResourceNotFound { fragment: String, build_output: PathBuf },

    #[snafu(display("Failed to read resource {}, error: {source}", file_path.display()))]
    ReadResource { file_path: PathBuf, source: std::io::Error },
}
