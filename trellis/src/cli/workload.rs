use std::{collections::BTreeMap, path::PathBuf};

use clap::Args;

use crate::{
    cli::{ClusterOrchestrator, Error, write_stdout},
    config::Config,
};

#[derive(Args, Clone)]
pub struct ApplyCommand {
    #[arg(help = "Manifest file to apply")]
    pub file: PathBuf,

    #[arg(long, help = "Apply in this namespace instead of the active one")]
    pub project: Option<String>,
}

impl ApplyCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator) -> Result<(), Error> {
        let Self { file, project } = self;
        match project {
            Some(project) => orchestrator.apply_in_project(&file, &project).await?,
            None => orchestrator.apply(&file).await?,
        }
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct DeleteCommand {
    #[arg(help = "Manifest file whose objects are deleted")]
    pub file: PathBuf,

    #[arg(long, help = "Delete in this namespace instead of the active one")]
    pub project: Option<String>,
}

impl DeleteCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator) -> Result<(), Error> {
        let Self { file, project } = self;
        match project {
            Some(project) => orchestrator.delete_in_project(&file, &project).await?,
            None => orchestrator.delete(&file).await?,
        }
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct ApplyTemplateCommand {
    #[arg(help = "Service the template deploys")]
    pub service: String,

    #[arg(help = "Template file")]
    pub template: PathBuf,

    #[arg(
        long,
        help = "Where the enriched template is written. Defaults to \
                <buildOutputDirectory>/<namespace>/<service>.yaml."
    )]
    pub target: Option<PathBuf>,

    #[arg(
        long = "property",
        short = 'p',
        value_parser = parse_property,
        help = "Extra KEY=VALUE environment variable added to the deployment config; repeatable"
    )]
    pub properties: Vec<(String, String)>,
}

impl ApplyTemplateCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let Self { service, template, target, properties } = self;
        let service = config.service_or_default(&service);
        let target = target.unwrap_or_else(|| {
            config
                .build_output_directory
                .join(orchestrator.project())
                .join(format!("{}.yaml", service.name))
        });
        let extra = properties.into_iter().collect::<BTreeMap<_, _>>();

        orchestrator.apply_template(&service, &template, |text| text, &extra, &target).await?;
        Ok(())
    }
}

fn parse_property(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{value}`"))
}

#[derive(Args, Clone)]
pub struct ApplyPropertiesCommand {
    #[arg(help = "Service whose configured properties are pushed into its deployment config")]
    pub service: String,
}

impl ApplyPropertiesCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let service = config.service_or_default(&self.service);
        orchestrator.apply_service_properties_using_deployment_config(&service).await?;
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct RolloutCommand {
    pub service: String,
}

impl RolloutCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        orchestrator.rollout(&config.service_or_default(&self.service)).await?;
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct ExposeCommand {
    pub service: String,

    #[arg(long, default_value_t = 8080, help = "Service port the route targets")]
    pub port: u16,
}

impl ExposeCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        orchestrator.expose(&config.service_or_default(&self.service), self.port).await?;
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct ScaleCommand {
    pub service: String,

    pub replicas: i32,

    #[arg(long, help = "Wait for the deployment config to exist before scaling")]
    pub wait: bool,
}

impl ScaleCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let Self { service, replicas, wait } = self;
        let service = config.service_or_default(&service);
        if wait {
            orchestrator.scale_to_when_ready(&service, replicas).await?;
        } else {
            orchestrator.scale_to(&service, replicas).await?;
        }
        Ok(())
    }
}

#[derive(Args, Clone)]
pub struct UrlCommand {
    pub service: String,
}

impl UrlCommand {
    pub async fn run(self, orchestrator: &ClusterOrchestrator, config: &Config) -> Result<(), Error> {
        let url = orchestrator.url(&config.service_or_default(&self.service)).await?;
        write_stdout(url.as_str()).await
    }
}
