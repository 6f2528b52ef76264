use std::{collections::BTreeMap, path::PathBuf};

use clap::Args;

use crate::{
    cli::{ClusterOrchestrator, Error, write_stdout},
    cluster::KubeCluster,
    command::ProcessRunner,
    config::{Config, Scenario, ScenarioService},
    orchestrator::{self, Orchestrator},
};

#[derive(Args, Clone)]
pub struct RunCommand {
    #[arg(help = "Scenario file listing the services to deploy")]
    pub scenario: PathBuf,

    #[arg(long, help = "Keep the namespace and its resources after the run")]
    pub keep: bool,
}

impl RunCommand {
    pub async fn run(
        self,
        cluster: KubeCluster,
        runner: ProcessRunner,
        config: &Config,
    ) -> Result<(), Error> {
        let Self { scenario, keep } = self;
        let scenario = Scenario::load(&scenario)?;
        let orchestrator = Orchestrator::create(cluster, runner, config.settings()).await?;

        let mut result = Ok(());
        for service in &scenario.services {
            result = deploy(&orchestrator, config, service).await;
            if result.is_err() {
                tracing::warn!(
                    "Deployment of service {} failed, namespace status:\n{}",
                    service.service.name,
                    orchestrator.get_status().await
                );
                break;
            }
        }

        if keep {
            tracing::info!(
                "Keeping namespace {} (scenarioId={})",
                orchestrator.project(),
                orchestrator.scenario_id()
            );
        } else if let Err(err) = orchestrator.delete_project().await {
            tracing::warn!("Failed to tear down namespace {}: {err}", orchestrator.project());
        }

        Ok(result?)
    }
}

async fn deploy(
    orchestrator: &ClusterOrchestrator,
    config: &Config,
    scenario_service: &ScenarioService,
) -> Result<(), orchestrator::Error> {
    let ScenarioService { service, template, build_config, replicas, port } = scenario_service;
    let service = config.find_service_by_name(&service.name).map_or_else(
        || service.clone(),
        |mut configured| {
            configured.properties.extend(service.properties.clone());
            configured.timeouts.extend(service.timeouts.clone());
            configured
        },
    );

    let target = config
        .build_output_directory
        .join(orchestrator.project())
        .join(format!("{}.yaml", service.name));
    orchestrator
        .apply_template(&service, template, |text| text, &BTreeMap::new(), &target)
        .await?;
    orchestrator.await_for(&service, template).await?;

    if let Some(build_config) = build_config {
        let logs = orchestrator.follow_build_config_logs(build_config).await?;
        tracing::debug!("Build {build_config} finished:\n{logs}");
        orchestrator.rollout(&service).await?;
    }

    orchestrator.scale_to_when_ready(&service, *replicas).await?;

    if let Some(port) = port {
        orchestrator.expose(&service, *port).await?;
        let url = orchestrator.url(&service).await?;
        if let Err(err) = write_stdout(&format!("{}: {url}", service.name)).await {
            tracing::warn!("{err}");
        }
    }

    Ok(())
}
