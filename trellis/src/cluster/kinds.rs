//! API resources the orchestrator talks to.
//!
//! OpenShift, OLM and Knative types are not part of `k8s-openapi`, so they are
//! addressed dynamically by group, version, kind and plural.

use k8s_openapi::api::core::v1::{ConfigMap, Pod, Secret};
use kube::{core::GroupVersionKind, discovery::ApiResource};

pub fn config_map() -> ApiResource { ApiResource::erase::<ConfigMap>(&()) }

pub fn secret() -> ApiResource { ApiResource::erase::<Secret>(&()) }

pub fn pod() -> ApiResource { ApiResource::erase::<Pod>(&()) }

pub fn route() -> ApiResource { custom("route.openshift.io", "v1", "Route", "routes") }

pub fn deployment_config() -> ApiResource {
    custom("apps.openshift.io", "v1", "DeploymentConfig", "deploymentconfigs")
}

pub fn image_stream() -> ApiResource {
    custom("image.openshift.io", "v1", "ImageStream", "imagestreams")
}

pub fn build_config() -> ApiResource {
    custom("build.openshift.io", "v1", "BuildConfig", "buildconfigs")
}

pub fn build() -> ApiResource { custom("build.openshift.io", "v1", "Build", "builds") }

pub fn subscription() -> ApiResource {
    custom("operators.coreos.com", "v1alpha1", "Subscription", "subscriptions")
}

pub fn cluster_service_version() -> ApiResource {
    custom("operators.coreos.com", "v1alpha1", "ClusterServiceVersion", "clusterserviceversions")
}

pub fn operator_group() -> ApiResource {
    custom("operators.coreos.com", "v1", "OperatorGroup", "operatorgroups")
}

pub fn knative_service() -> ApiResource {
    custom("serving.knative.dev", "v1", "Service", "services")
}

pub fn knative_route() -> ApiResource { custom("serving.knative.dev", "v1", "Route", "routes") }

/// Any namespaced resource, e.g. a custom resource whose readiness is awaited.
pub fn custom(group: &str, version: &str, kind: &str, plural: &str) -> ApiResource {
    ApiResource::from_gvk_with_plural(&GroupVersionKind::gvk(group, version, kind), plural)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openshift_kinds_carry_group_and_plural() {
        let route = route();
        assert_eq!(route.api_version, "route.openshift.io/v1");
        assert_eq!(route.plural, "routes");

        let csv = cluster_service_version();
        assert_eq!(csv.group, "operators.coreos.com");
        assert_eq!(csv.version, "v1alpha1");
        assert_eq!(csv.kind, "ClusterServiceVersion");
    }

    #[test]
    fn test_core_kinds_use_empty_group() {
        let config_map = config_map();
        assert_eq!(config_map.group, "");
        assert_eq!(config_map.api_version, "v1");
        assert_eq!(config_map.plural, "configmaps");
    }
}
