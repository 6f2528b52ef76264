use std::time::Duration;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display(
        "Timed out after {}s waiting for {what}{}",
        timeout.as_secs(),
        last_error.as_ref().map_or_else(String::new, |err| format!(", last error: {err}"))
    ))]
    Timeout { what: String, timeout: Duration, last_error: Option<String> },
}
