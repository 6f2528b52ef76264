//! The `trellis` command line.
//!
//! Every façade operation is available as a subcommand working against an
//! existing namespace, plus `run`, which drives a whole scenario file from
//! namespace creation to teardown.
//!
//! # Examples
//!
//! ```bash
//! # Deploy every service of a scenario, print their URLs and clean up
//! trellis run scenario.yaml
//!
//! # Keep the namespace around for inspection
//! trellis run scenario.yaml --keep
//!
//! # Work in an existing namespace
//! trellis -n ts-abcdefghij logs --service greeter
//! ```

pub mod error;
mod inspect;
mod namespace;
mod operator;
mod run;
mod workload;

use std::{io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use snafu::ResultExt;
use tokio::{io::AsyncWriteExt, runtime::Runtime};
use trellis_base::CLI_PROGRAM_NAME;

pub use self::error::Error;
use self::{
    inspect::{
        AwaitImageStreamsCommand, BuildLogsCommand, ExecCommand, LogsCommand, PodsCommand,
        ReadyCommand,
    },
    namespace::NamespaceCommands,
    operator::InstallOperatorCommand,
    run::RunCommand,
    workload::{
        ApplyCommand, ApplyPropertiesCommand, ApplyTemplateCommand, DeleteCommand, ExposeCommand,
        RolloutCommand, ScaleCommand, UrlCommand,
    },
};
use crate::{
    cluster::{ClusterApi, KubeCluster},
    command::ProcessRunner,
    config::Config,
    namespace::{self as ns, Namespace},
    orchestrator::Orchestrator,
    shadow,
};

type ClusterOrchestrator = Orchestrator<KubeCluster, ProcessRunner>;

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about = "Trellis: provision throwaway OpenShift namespaces and drive test scenarios in them.",
    color = clap::ColorChoice::Always
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "TRELLIS_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/trellis/config.yaml or \
                TRELLIS_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "TRELLIS_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,

    #[clap(
        long = "ephemeral-namespaces",
        env = "TRELLIS_EPHEMERAL_NAMESPACES",
        help = "Override whether scenarios run in throwaway namespaces."
    )]
    ephemeral_namespaces: Option<bool>,

    #[clap(
        long = "namespace",
        short = 'n',
        env = "TRELLIS_NAMESPACE",
        global = true,
        help = "Namespace to work in. Defaults to the current Kubernetes context's namespace."
    )]
    namespace: Option<String>,

    #[clap(
        long = "scenario-id",
        env = "TRELLIS_SCENARIO_ID",
        global = true,
        help = "Scenario id labelling the resources created in a shared namespace."
    )]
    scenario_id: Option<String>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display client and server version information")]
    Version {
        #[clap(long = "client", help = "If true, shows client version only (no server required).")]
        client: bool,
    },

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(about = "Create or delete scenario namespaces")]
    Namespace {
        #[command(subcommand)]
        commands: NamespaceCommands,
    },

    #[command(about = "Deploy the services of a scenario file and tear them down afterwards")]
    Run(RunCommand),

    #[command(about = "Apply a manifest file")]
    Apply(ApplyCommand),

    #[command(about = "Delete the objects of a manifest file")]
    Delete(DeleteCommand),

    #[command(about = "Enrich a template for a service and apply it")]
    ApplyTemplate(ApplyTemplateCommand),

    #[command(about = "Push service properties into an existing deployment config")]
    ApplyProperties(ApplyPropertiesCommand),

    #[command(about = "Start a new rollout of a service")]
    Rollout(RolloutCommand),

    #[command(about = "Create a route to a service unless it already has one")]
    Expose(ExposeCommand),

    #[command(about = "Scale a service")]
    Scale(ScaleCommand),

    #[command(about = "Print the public URL of a service")]
    Url(UrlCommand),

    #[command(about = "Print container logs of the namespace or of one service")]
    Logs(LogsCommand),

    #[command(about = "List the pods of a service")]
    Pods(PodsCommand),

    #[command(alias = "exec", about = "Execute a command in a container")]
    Execute(ExecCommand),

    #[command(about = "Follow the build of a build config and fail if it failed")]
    BuildLogs(BuildLogsCommand),

    #[command(about = "Subscribe to an operator and wait until it is installed")]
    InstallOperator(InstallOperatorCommand),

    #[command(about = "Check or wait for the Ready condition of a custom resource")]
    Ready(ReadyCommand),

    #[command(about = "Wait for the image streams of a template to be imported")]
    AwaitImageStreams(AwaitImageStreamsCommand),

    #[command(about = "Print the events of the namespace")]
    Events,

    #[command(about = "Print the status summary of the namespace")]
    Status,
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config_file {
            Some(path) => Config::load(path)?,
            None => {
                let path = Config::search_config_file_path();
                if path.exists() { Config::load(path)? } else { Config::default() }
            }
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }
        if let Some(ephemeral_namespaces) = self.ephemeral_namespaces {
            config.ephemeral_namespaces = ephemeral_namespaces;
        }

        Ok(config)
    }

    /// Runs the selected subcommand to completion and returns the exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration, the Kubernetes client or the
    /// subcommand fails.
    pub fn run(self) -> Result<i32, Error> {
        let client_version = Self::command().get_version().unwrap_or_default().to_string();
        match self.commands {
            Some(Commands::Version { client }) if client => {
                std::io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                std::io::stdout()
                    .write_all(Config::template_basic().as_slice())
                    .context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        let fut = async move {
            let kube_client = kube::Client::try_default().await.context(error::KubeConfigSnafu)?;
            let cluster = KubeCluster::new(kube_client.clone());
            let runner = ProcessRunner::new(&config.cli_program);

            match self.commands {
                Some(Commands::Version { .. }) => {
                    let server_version = kube_client.apiserver_version().await.map_or_else(
                        |_| "unknown".to_string(),
                        |info| format!("{}.{}", info.major, info.minor),
                    );
                    let info = format!(
                        "{}Client Version: {client_version}\nServer Version: {server_version}",
                        Self::command().render_long_version()
                    );
                    write_stdout(&info).await?;
                }
                Some(Commands::Namespace { commands }) => {
                    commands.run(cluster, runner, &config, self.scenario_id).await?;
                }
                Some(Commands::Run(cmd)) => cmd.run(cluster, runner, &config).await?,
                Some(commands) => {
                    let orchestrator =
                        attach(cluster, runner, &config, self.namespace, self.scenario_id);
                    commands.run(&orchestrator, &config).await?;
                }
                None => {
                    let help = Self::command().render_long_help().ansi().to_string();
                    std::io::stderr()
                        .write_all(help.as_bytes())
                        .context(error::WriteStdoutSnafu)?;
                    return Ok(-1);
                }
            }

            Ok(0)
        };

        Runtime::new().context(error::InitializeTokioRuntimeSnafu)?.block_on(fut)
    }
}

impl Commands {
    async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        match self {
            Self::Apply(cmd) => cmd.run(orchestrator).await,
            Self::Delete(cmd) => cmd.run(orchestrator).await,
            Self::ApplyTemplate(cmd) => cmd.run(orchestrator, config).await,
            Self::ApplyProperties(cmd) => cmd.run(orchestrator, config).await,
            Self::Rollout(cmd) => cmd.run(orchestrator, config).await,
            Self::Expose(cmd) => cmd.run(orchestrator, config).await,
            Self::Scale(cmd) => cmd.run(orchestrator, config).await,
            Self::Url(cmd) => cmd.run(orchestrator, config).await,
            Self::Logs(cmd) => cmd.run(orchestrator, config).await,
            Self::Pods(cmd) => cmd.run(orchestrator, config).await,
            Self::Execute(cmd) => cmd.run(orchestrator).await,
            Self::BuildLogs(cmd) => cmd.run(orchestrator).await,
            Self::InstallOperator(cmd) => cmd.run(orchestrator, config).await,
            Self::Ready(cmd) => cmd.run(orchestrator).await,
            Self::AwaitImageStreams(cmd) => cmd.run(orchestrator, config).await,
            Self::Events => write_stdout(&orchestrator.get_events().await).await,
            Self::Status => write_stdout(&orchestrator.get_status().await).await,
            Self::Version { .. }
            | Self::Completions { .. }
            | Self::DefaultConfig
            | Self::Namespace { .. }
            | Self::Run(_) => Ok(()),
        }
    }
}

/// Works in the given namespace, or the context's one. Generated namespace
/// names are treated as ephemeral when ephemeral namespaces are enabled.
fn attach(
    cluster: KubeCluster,
    runner: ProcessRunner,
    config: &Config,
    namespace: Option<String>,
    scenario_id: Option<String>,
) -> ClusterOrchestrator {
    let name = namespace.unwrap_or_else(|| cluster.default_namespace().to_string());
    let namespace = if config.ephemeral_namespaces && ns::is_generated_name(&name) {
        Namespace::ephemeral(name)
    } else {
        Namespace::shared(name)
    };
    let scenario_id = scenario_id.unwrap_or_else(|| {
        ns::random_suffix(&mut rand::rng(), trellis_base::consts::SCENARIO_ID_LENGTH)
    });
    Orchestrator::attach(cluster, runner, namespace, scenario_id, config.settings())
}

async fn write_stdout(text: &str) -> Result<(), Error> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(text.as_bytes()).await.context(error::WriteStdoutSnafu)?;
    if !text.ends_with('\n') {
        stdout.write_u8(b'\n').await.context(error::WriteStdoutSnafu)?;
    }
    stdout.flush().await.context(error::WriteStdoutSnafu)
}
