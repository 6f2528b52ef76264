use k8s_openapi::{
    api::core::v1::PodTemplateSpec, apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{api::DynamicObject, core::TypeMeta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use snafu::ResultExt;

use crate::manifest::{Error, error};

pub const DEPLOYMENT_CONFIG: &str = "DeploymentConfig";
pub const IMAGE_STREAM: &str = "ImageStream";

/// OpenShift `DeploymentConfig`, typed as far as enrichment needs it.
/// Fields outside the pod template are carried through untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeploymentConfig {
    #[serde(flatten)]
    pub types: TypeMeta,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: DeploymentConfigSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// One object of a template, discriminated by kind.
#[derive(Clone, Debug)]
pub enum Resource {
    DeploymentConfig(Box<DeploymentConfig>),
    ImageStream(DynamicObject),
    Other(DynamicObject),
}

impl Resource {
    pub(crate) fn from_yaml(index: usize, value: serde_yaml::Value) -> Result<Self, Error> {
        let kind = value
            .get("kind")
            .and_then(serde_yaml::Value::as_str)
            .map(ToString::to_string)
            .ok_or(Error::MissingKind { index })?;

        let decoded = match kind.as_str() {
            DEPLOYMENT_CONFIG => serde_yaml::from_value::<DeploymentConfig>(value)
                .map(|dc| Self::DeploymentConfig(Box::new(dc))),
            IMAGE_STREAM => serde_yaml::from_value(value).map(Self::ImageStream),
            _ => serde_yaml::from_value(value).map(Self::Other),
        };
        decoded.context(error::DecodeResourceSnafu { kind })
    }

    pub fn to_json(&self) -> Result<Value, Error> {
        match self {
            Self::DeploymentConfig(dc) => serde_json::to_value(dc),
            Self::ImageStream(object) | Self::Other(object) => serde_json::to_value(object),
        }
        .context(error::EncodeResourceSnafu { kind: self.kind() })
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::DeploymentConfig(dc) => &dc.types.kind,
            Self::ImageStream(object) | Self::Other(object) => {
                object.types.as_ref().map_or("", |types| types.kind.as_str())
            }
        }
    }

    pub fn name(&self) -> Option<&str> { self.metadata().name.as_deref() }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Self::DeploymentConfig(dc) => &dc.metadata,
            Self::ImageStream(object) | Self::Other(object) => &object.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Self::DeploymentConfig(dc) => &mut dc.metadata,
            Self::ImageStream(object) | Self::Other(object) => &mut object.metadata,
        }
    }
}
