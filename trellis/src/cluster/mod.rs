//! Access to the cluster API.
//!
//! [`ClusterApi`] is the narrow surface the orchestrator needs from the
//! Kubernetes client: everything is addressed as a [`DynamicObject`] of a known
//! [`ApiResource`], so OpenShift-specific kinds need no generated bindings.
//! [`KubeCluster`] is the implementation backed by `kube::Client`.

mod error;
pub mod kinds;

use k8s_openapi::api::core::v1::Pod;
use kube::{
    Api,
    api::{DynamicObject, ListParams, LogParams, PostParams},
    discovery::ApiResource,
};
use snafu::{OptionExt, ResultExt};

pub use self::error::Error;

pub trait ClusterApi {
    /// Namespace of the active kubeconfig context.
    fn default_namespace(&self) -> &str;

    /// Fetches an object, returning `None` when it does not exist.
    async fn get(
        &self,
        kind: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, Error>;

    async fn list(
        &self,
        kind: &ApiResource,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>, Error>;

    async fn create(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, Error>;

    async fn replace(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, Error>;

    async fn container_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
    ) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct KubeCluster {
    client: kube::Client,
}

impl KubeCluster {
    pub const fn new(client: kube::Client) -> Self { Self { client } }

    fn api(&self, kind: &ApiResource, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, kind)
    }
}

impl ClusterApi for KubeCluster {
    fn default_namespace(&self) -> &str { self.client.default_namespace() }

    async fn get(
        &self,
        kind: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, Error> {
        self.api(kind, namespace).get_opt(name).await.with_context(|_| error::RequestSnafu {
            verb: "get",
            kind: kind.kind.clone(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    async fn list(
        &self,
        kind: &ApiResource,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>, Error> {
        let list_params = ListParams {
            label_selector: label_selector.map(ToString::to_string),
            ..ListParams::default()
        };
        let list = self.api(kind, namespace).list(&list_params).await.with_context(|_| {
            error::ListSnafu { kind: kind.kind.clone(), namespace: namespace.to_string() }
        })?;
        Ok(list.items)
    }

    async fn create(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, Error> {
        let name = object.metadata.name.clone().unwrap_or_default();
        self.api(kind, namespace).create(&PostParams::default(), object).await.with_context(|_| {
            error::RequestSnafu {
                verb: "create",
                kind: kind.kind.clone(),
                namespace: namespace.to_string(),
                name,
            }
        })
    }

    async fn replace(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, Error> {
        let name = object
            .metadata
            .name
            .clone()
            .context(error::MissingNameSnafu { verb: "replace", kind: kind.kind.clone() })?;
        self.api(kind, namespace)
            .replace(&name, &PostParams::default(), object)
            .await
            .with_context(|_| error::RequestSnafu {
                verb: "replace",
                kind: kind.kind.clone(),
                namespace: namespace.to_string(),
                name: name.clone(),
            })
    }

    async fn container_logs(
        &self,
        namespace: &str,
        pod_name: &str,
        container: &str,
    ) -> Result<String, Error> {
        let log_params =
            LogParams { container: Some(container.to_string()), ..LogParams::default() };
        Api::<Pod>::namespaced(self.client.clone(), namespace)
            .logs(pod_name, &log_params)
            .await
            .with_context(|_| error::RequestSnafu {
                verb: "read logs of",
                kind: "Pod".to_string(),
                namespace: namespace.to_string(),
                name: format!("{pod_name}/{container}"),
            })
    }
}
