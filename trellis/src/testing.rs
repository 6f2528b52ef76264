//! In-memory stand-ins for the cluster and the CLI.

use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use kube::{api::DynamicObject, discovery::ApiResource};

use crate::{
    cluster::{self, ClusterApi},
    command::{self, CommandOutput, CommandRunner},
};

type ObjectKey = (String, String, String);

fn object_key(kind: &ApiResource, namespace: &str, name: &str) -> ObjectKey {
    (format!("{}/{}", kind.api_version, kind.kind), namespace.to_string(), name.to_string())
}

fn matches_selector(object: &DynamicObject, selector: Option<&str>) -> bool {
    let Some(selector) = selector else {
        return true;
    };
    selector.split(',').all(|requirement| {
        let Some((key, value)) = requirement.split_once('=') else {
            return false;
        };
        object.metadata.labels.as_ref().and_then(|labels| labels.get(key)).map(String::as_str)
            == Some(value)
    })
}

#[derive(Debug)]
pub struct FakeCluster {
    default_namespace: String,
    objects: Mutex<BTreeMap<ObjectKey, DynamicObject>>,
    failing_kinds: Vec<String>,
}

impl Default for FakeCluster {
    fn default() -> Self { Self::new("default") }
}

impl FakeCluster {
    pub fn new(default_namespace: &str) -> Self {
        Self {
            default_namespace: default_namespace.to_string(),
            objects: Mutex::default(),
            failing_kinds: Vec::new(),
        }
    }

    /// Every request for `kind` fails.
    pub fn failing(mut self, kind: &ApiResource) -> Self {
        self.failing_kinds.push(kind.api_version.clone() + "/" + &kind.kind);
        self
    }

    /// Seeds an object; `metadata.name` and `metadata.labels` are taken from
    /// `data`, everything else becomes the object's payload.
    pub fn with(self, kind: &ApiResource, namespace: &str, mut data: serde_json::Value) -> Self {
        let metadata = data
            .as_object_mut()
            .and_then(|fields| fields.remove("metadata"))
            .unwrap_or_default();
        let name = metadata["name"].as_str().unwrap_or_default().to_string();
        let mut object = DynamicObject::new(&name, kind).within(namespace).data(data);
        if let Some(labels) = metadata["labels"].as_object() {
            object.metadata.labels = Some(
                labels
                    .iter()
                    .map(|(key, value)| (key.clone(), value.as_str().unwrap_or_default().to_string()))
                    .collect(),
            );
        }
        self.insert(kind, namespace, object);
        self
    }

    pub fn insert(&self, kind: &ApiResource, namespace: &str, object: DynamicObject) {
        let name = object.metadata.name.clone().unwrap_or_default();
        let _previous = self.lock().insert(object_key(kind, namespace, &name), object);
    }

    pub fn object(&self, kind: &ApiResource, namespace: &str, name: &str) -> Option<DynamicObject> {
        self.lock().get(&object_key(kind, namespace, name)).cloned()
    }

    pub fn count(&self, kind: &ApiResource, namespace: &str) -> usize {
        let prefix = object_key(kind, namespace, "");
        self.lock().keys().filter(|key| key.0 == prefix.0 && key.1 == prefix.1).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<ObjectKey, DynamicObject>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, verb: &'static str, kind: &ApiResource) -> Result<(), cluster::Error> {
        let key = format!("{}/{}", kind.api_version, kind.kind);
        if self.failing_kinds.contains(&key) {
            return Err(cluster::Error::MissingName { verb, kind: kind.kind.clone() });
        }
        Ok(())
    }
}

impl ClusterApi for FakeCluster {
    fn default_namespace(&self) -> &str { &self.default_namespace }

    async fn get(
        &self,
        kind: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<Option<DynamicObject>, cluster::Error> {
        self.check("get", kind)?;
        Ok(self.object(kind, namespace, name))
    }

    async fn list(
        &self,
        kind: &ApiResource,
        namespace: &str,
        label_selector: Option<&str>,
    ) -> Result<Vec<DynamicObject>, cluster::Error> {
        self.check("list", kind)?;
        let kind_key = object_key(kind, namespace, "");
        Ok(self
            .lock()
            .iter()
            .filter(|(key, _)| key.0 == kind_key.0 && key.1 == kind_key.1)
            .map(|(_, object)| object)
            .filter(|object| matches_selector(object, label_selector))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, cluster::Error> {
        self.check("create", kind)?;
        self.insert(kind, namespace, object.clone());
        Ok(object.clone())
    }

    async fn replace(
        &self,
        kind: &ApiResource,
        namespace: &str,
        object: &DynamicObject,
    ) -> Result<DynamicObject, cluster::Error> {
        self.check("replace", kind)?;
        let mut object = object.clone();
        // Status is owned by the cluster and survives a replace.
        let name = object.metadata.name.clone().unwrap_or_default();
        let status = self.object(kind, namespace, &name).map(|existing| existing.data["status"].clone());
        if let Some(status) = status
            && !status.is_null()
            && let Some(fields) = object.data.as_object_mut()
        {
            let _previous = fields.insert("status".to_string(), status);
        }
        self.insert(kind, namespace, object.clone());
        Ok(object)
    }

    async fn container_logs(
        &self,
        _namespace: &str,
        pod_name: &str,
        container: &str,
    ) -> Result<String, cluster::Error> {
        Ok(format!("log of {pod_name}/{container}"))
    }
}

#[derive(Debug)]
struct Rule {
    command: String,
    remaining: Option<usize>,
    reply: Result<String, String>,
}

/// Records every invocation; replies are scripted by command-line prefix.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    rules: Mutex<Vec<Rule>>,
}

impl RecordingRunner {
    pub fn new() -> Self { Self::default() }

    pub fn reply(self, command: &str, stdout: &str) -> Self {
        self.rule(command, None, Ok(stdout.to_string()))
    }

    pub fn fail(self, command: &str) -> Self {
        self.rule(command, None, Err(format!("{command} failed")))
    }

    pub fn fail_times(self, command: &str, times: usize) -> Self {
        self.rule(command, Some(times), Err(format!("{command} failed")))
    }

    fn rule(self, command: &str, remaining: Option<usize>, reply: Result<String, String>) -> Self {
        self.rules.lock().unwrap_or_else(PoisonError::into_inner).push(Rule {
            command: command.to_string(),
            remaining,
            reply,
        });
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Invocations rendered as space-joined command lines.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|args| args.join(" ")).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run<I, S>(&self, args: I) -> Result<CommandOutput, command::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<String>>();
        let line = args.join(" ");
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).push(args);

        let mut rules = self.rules.lock().unwrap_or_else(PoisonError::into_inner);
        let rule = rules
            .iter_mut()
            .find(|rule| line.starts_with(&rule.command) && rule.remaining != Some(0));
        let Some(rule) = rule else {
            return Ok(CommandOutput::default());
        };
        if let Some(remaining) = rule.remaining.as_mut() {
            *remaining -= 1;
        }
        match &rule.reply {
            Ok(stdout) => Ok(CommandOutput { stdout: stdout.clone(), stderr: String::new() }),
            Err(message) => Err(command::Error::ExitStatus {
                command: format!("oc {line}"),
                code: Some(1),
                message: message.clone(),
            }),
        }
    }
}
