use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Container, EnvVar, PodTemplateSpec};
use trellis_base::consts::k8s::labels;

use crate::{
    manifest::{DeploymentConfig, Resource},
    resolver::Volumes,
};

/// Binds template resources to one scenario's namespace and service.
#[derive(Clone, Debug)]
pub struct TemplateEnricher {
    namespace: String,
    scenario_id: String,
}

impl TemplateEnricher {
    pub fn new(namespace: impl Into<String>, scenario_id: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), scenario_id: scenario_id.into() }
    }

    /// Sets the namespace and scenario label on every resource, and prepares
    /// deployment configs to run `service_name` with `env` and `volumes`.
    /// Other kinds are left otherwise untouched.
    pub fn enrich(
        &self,
        service_name: &str,
        resources: &mut [Resource],
        env: &BTreeMap<String, String>,
        volumes: &Volumes,
    ) {
        for resource in resources.iter_mut() {
            let metadata = resource.metadata_mut();
            metadata.namespace = Some(self.namespace.clone());
            let _previous = metadata
                .labels
                .get_or_insert_with(BTreeMap::new)
                .insert(labels::SCENARIO_ID.to_string(), self.scenario_id.clone());

            if let Resource::DeploymentConfig(dc) = resource {
                self.enrich_deployment_config(service_name, dc, env, volumes);
            }
        }
    }

    pub fn enrich_deployment_config(
        &self,
        service_name: &str,
        dc: &mut DeploymentConfig,
        env: &BTreeMap<String, String>,
        volumes: &Volumes,
    ) {
        dc.metadata.name = Some(service_name.to_string());

        let template = dc.spec.template.get_or_insert_with(PodTemplateSpec::default);
        let template_metadata = template.metadata.get_or_insert_with(Default::default);
        template_metadata.namespace = Some(self.namespace.clone());
        let template_labels = template_metadata.labels.get_or_insert_with(BTreeMap::new);
        let _previous =
            template_labels.insert(labels::LOG_WATCH.to_string(), service_name.to_string());
        let _previous =
            template_labels.insert(labels::SCENARIO_ID.to_string(), self.scenario_id.clone());

        if let Some(pod_spec) = template.spec.as_mut() {
            volumes.apply_to(pod_spec);
            for container in &mut pod_spec.containers {
                for (name, value) in env {
                    upsert_env(container, name, value);
                }
            }
        }
    }
}

/// Sets `name=value` on the container, replacing an existing variable of the
/// same name instead of adding a duplicate.
pub fn upsert_env(container: &mut Container, name: &str, value: &str) {
    let env = container.env.get_or_insert_with(Vec::new);
    if let Some(existing) = env.iter_mut().find(|var| var.name == name) {
        existing.value = Some(value.to_string());
        existing.value_from = None;
    } else {
        env.push(EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..EnvVar::default()
        });
    }
}
