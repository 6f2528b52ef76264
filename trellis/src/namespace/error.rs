use snafu::Snafu;

use crate::command;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "Failed to create an ephemeral namespace after {attempts} attempts, last error: {source}"
    ))]
    CreationExhausted { attempts: usize, source: command::Error },

    #[snafu(display("Failed to delete namespace {namespace}, error: {source}"))]
    Delete { namespace: String, source: command::Error },

    #[snafu(display(
        "Failed to delete resources of scenario {scenario_id} in namespace {namespace}, error: {source}"
    ))]
    DeleteLabelled { namespace: String, scenario_id: String, source: command::Error },
}
