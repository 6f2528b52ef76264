//! Kubernetes templates: parsing, enrichment and rendering.
//!
//! A template is either a stream of YAML documents or a single `List`. It is
//! parsed into [`Resource`]s, enriched for the active scenario, and rendered
//! back as a `v1/List`.

mod enricher;
mod error;
mod resource;

use serde::Deserialize;
use serde_json::json;
use snafu::ResultExt;

pub use self::{
    enricher::{TemplateEnricher, upsert_env},
    error::Error,
    resource::{DEPLOYMENT_CONFIG, DeploymentConfig, DeploymentConfigSpec, IMAGE_STREAM, Resource},
};

const LIST_KIND: &str = "List";

/// Parses every resource in `template`, flattening `List` documents.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or an item cannot be decoded.
pub fn parse(template: &str) -> Result<Vec<Resource>, Error> {
    let mut items = Vec::new();
    for document in serde_yaml::Deserializer::from_str(template) {
        let value = serde_yaml::Value::deserialize(document).context(error::ParseTemplateSnafu)?;
        if value.is_null() {
            continue;
        }
        if value.get("kind").and_then(serde_yaml::Value::as_str) == Some(LIST_KIND) {
            let list_items = value.get("items").and_then(serde_yaml::Value::as_sequence);
            items.extend(list_items.into_iter().flatten().cloned());
        } else {
            items.push(value);
        }
    }

    items.into_iter().enumerate().map(|(index, item)| Resource::from_yaml(index, item)).collect()
}

/// Renders resources as a single `v1/List` YAML document.
///
/// # Errors
///
/// Returns an error if a resource cannot be serialized.
pub fn render(resources: &[Resource]) -> Result<String, Error> {
    let items = resources.iter().map(Resource::to_json).collect::<Result<Vec<_>, _>>()?;
    let list = json!({ "apiVersion": "v1", "kind": LIST_KIND, "items": items });
    serde_yaml::to_string(&list).context(error::RenderTemplateSnafu)
}
