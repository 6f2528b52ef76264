use clap::Args;

use crate::{
    cli::{ClusterOrchestrator, Error},
    config::Config,
    orchestrator::OperatorSubscription,
};

#[derive(Args, Clone)]
pub struct InstallOperatorCommand {
    #[arg(help = "Service the operator is installed for; names the operator group")]
    pub service: String,

    #[arg(help = "Operator package name")]
    pub name: String,

    #[arg(long, help = "Subscription channel")]
    pub channel: String,

    #[arg(long, help = "Catalog source providing the operator")]
    pub source: String,

    #[arg(
        long,
        default_value = "openshift-marketplace",
        help = "Namespace of the catalog source"
    )]
    pub source_namespace: String,
}

impl InstallOperatorCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let Self { service, name, channel, source, source_namespace } = self;
        let service = config.service_or_default(&service);
        let operator = OperatorSubscription { name, channel, source, source_namespace };
        orchestrator.install_operator(&service, &operator).await?;
        Ok(())
    }
}
