use std::{fmt::Write as _, path::PathBuf};

use clap::Args;

use crate::{
    cli::{ClusterOrchestrator, Error, write_stdout},
    cluster::kinds,
    config::Config,
    ui::table::PodTableExt,
};

#[derive(Args, Clone)]
pub struct LogsCommand {
    #[arg(long, help = "Only print the logs of the running pods of this service")]
    pub service: Option<String>,
}

impl LogsCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let logs = match self.service {
            Some(service) => orchestrator.service_logs(&config.service_or_default(&service)).await?,
            None => orchestrator.logs().await?,
        };

        let mut output = String::new();
        for (source, log) in logs {
            let _unused = writeln!(output, "==> {source} <==\n{log}");
        }
        write_stdout(&output).await
    }
}

#[derive(Args, Clone)]
pub struct PodsCommand {
    pub service: String,
}

impl PodsCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let pods = orchestrator.pods_in_service(&config.service_or_default(&self.service)).await?;
        write_stdout(&pods.render_table()).await
    }
}

#[derive(Args, Clone)]
pub struct ExecCommand {
    pub pod: String,

    #[arg(short, long, help = "Container to run the command in")]
    pub container: String,

    #[arg(last = true, required = true, help = "Command and its arguments")]
    pub command: Vec<String>,
}

impl ExecCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator) -> Result<(), Error> {
        let Self { pod, container, command } = self;
        let output = orchestrator.exec_on_pod(&pod, &container, &command).await?;
        write_stdout(&output).await
    }
}

#[derive(Args, Clone)]
pub struct BuildLogsCommand {
    pub build_config: String,
}

impl BuildLogsCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator) -> Result<(), Error> {
        let logs = orchestrator.follow_build_config_logs(&self.build_config).await?;
        write_stdout(&logs).await
    }
}

#[derive(Args, Clone)]
pub struct ReadyCommand {
    #[arg(long, help = "API group of the custom resource, e.g. broker.amq.io")]
    pub group: String,

    #[arg(long = "api-version", help = "API version of the custom resource, e.g. v1beta1")]
    pub version: String,

    #[arg(long, help = "Kind of the custom resource, e.g. ActiveMQArtemis")]
    pub kind: String,

    #[arg(long, help = "Plural resource name, e.g. activemqartemises")]
    pub plural: String,

    pub name: String,

    #[arg(long, help = "Wait until the resource is ready instead of checking once")]
    pub wait: bool,
}

impl ReadyCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator) -> Result<(), Error> {
        let Self { group, version, kind, plural, name, wait } = self;
        let resource = kinds::custom(&group, &version, &kind, &plural);
        let ready = if wait {
            orchestrator.await_custom_resource_ready(&resource, &name).await?;
            true
        } else {
            orchestrator.is_custom_resource_ready(&resource, &name).await?
        };
        write_stdout(if ready { "ready" } else { "not ready" }).await
    }
}

#[derive(Args, Clone)]
pub struct AwaitImageStreamsCommand {
    pub service: String,

    #[arg(help = "Template declaring the image streams")]
    pub template: PathBuf,
}

impl AwaitImageStreamsCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let service = config.service_or_default(&self.service);
        orchestrator.await_for(&service, &self.template).await?;
        Ok(())
    }
}
