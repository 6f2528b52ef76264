use clap::Subcommand;

use crate::{
    cli::{Error, attach, write_stdout},
    cluster::KubeCluster,
    command::ProcessRunner,
    config::Config,
    orchestrator::Orchestrator,
};

#[derive(Clone, Subcommand)]
pub enum NamespaceCommands {
    #[command(about = "Create a scenario namespace and print its name and scenario id")]
    Create,

    #[command(about = "Tear down a scenario namespace")]
    Delete {
        #[arg(help = "Namespace to tear down")]
        name: String,
    },
}

impl NamespaceCommands {
    pub async fn run(
        self,
        cluster: KubeCluster,
        runner: ProcessRunner,
        config: &Config,
        scenario_id: Option<String>,
    ) -> Result<(), Error> {
        match self {
            Self::Create => {
                let orchestrator = Orchestrator::create(cluster, runner, config.settings()).await?;
                write_stdout(&format!(
                    "namespace: {}\nscenarioId: {}",
                    orchestrator.project(),
                    orchestrator.scenario_id()
                ))
                .await
            }
            Self::Delete { name } => {
                let has_scenario_id = scenario_id.is_some();
                let orchestrator = attach(cluster, runner, config, Some(name), scenario_id);
                if !orchestrator.namespace().is_ephemeral() && !has_scenario_id {
                    tracing::warn!(
                        "Namespace {} is shared, pass --scenario-id to select what to delete",
                        orchestrator.project()
                    );
                    return Ok(());
                }
                orchestrator.delete_project().await?;
                Ok(())
            }
        }
    }
}
