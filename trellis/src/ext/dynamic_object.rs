use kube::api::DynamicObject;
use serde_json::Value;
use trellis_base::consts::k8s::{conditions, phases};

pub trait DynamicObjectExt {
    /// Walks nested object fields, e.g. `["status", "phase"]`.
    fn field(&self, path: &[&str]) -> Option<&Value>;

    fn str_field(&self, path: &[&str]) -> Option<&str> { self.field(path).and_then(Value::as_str) }

    fn name_or_default(&self) -> String;

    fn phase(&self) -> Option<&str> { self.str_field(&["status", "phase"]) }

    fn is_pod_running(&self) -> bool { self.phase() == Some(phases::POD_RUNNING) }

    fn container_names(&self) -> Vec<String> {
        self.field(&["spec", "containers"])
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|container| container.get("name").and_then(Value::as_str))
            .map(ToString::to_string)
            .collect()
    }

    fn has_ready_condition(&self) -> bool {
        self.field(&["status", "conditions"]).and_then(Value::as_array).is_some_and(|entries| {
            entries.iter().any(|condition| {
                condition.get("type").and_then(Value::as_str) == Some(conditions::READY_TYPE)
                    && condition.get("status").and_then(Value::as_str)
                        == Some(conditions::READY_STATUS)
            })
        })
    }
}

impl DynamicObjectExt for DynamicObject {
    fn field(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.data, |value, key| value.get(*key))
    }

    fn name_or_default(&self) -> String { self.metadata.name.clone().unwrap_or_default() }
}
