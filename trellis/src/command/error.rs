use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to launch `{command}`, error: {source}"))]
    Spawn { command: String, source: std::io::Error },

    #[snafu(display(
        "`{command}` exited with {}: {message}",
        code.map_or_else(|| "a signal".to_string(), |code| format!("status {code}"))
    ))]
    ExitStatus { command: String, code: Option<i32>, message: String },
}
