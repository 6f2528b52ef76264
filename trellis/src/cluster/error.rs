use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to {verb} {kind} {name} in namespace {namespace}, error: {source}"))]
    Request {
        verb: &'static str,
        kind: String,
        namespace: String,
        name: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to list {kind} in namespace {namespace}, error: {source}"))]
    List {
        kind: String,
        namespace: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Cannot {verb} a {kind} without metadata.name"))]
    MissingName { verb: &'static str, kind: String },
}
