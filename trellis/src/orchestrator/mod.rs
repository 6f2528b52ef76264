//! The façade a test scenario drives.
//!
//! An [`Orchestrator`] owns one namespace and one scenario id for its whole
//! lifetime. It combines the cluster client, the CLI runner, the property
//! resolver and the template enricher into the operations a scenario needs:
//! applying templates, rolling out and exposing services, waiting for images
//! and operators, reading logs, and tearing everything down afterwards.

mod error;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use kube::{api::DynamicObject, discovery::ApiResource};
use serde_json::{Value, json};
use snafu::{OptionExt, ResultExt};
use trellis_base::consts::{self, k8s::labels, timeouts};
use url::Url;

pub use self::error::Error;
use crate::{
    cluster::{self, ClusterApi, kinds},
    command::CommandRunner,
    config::Service,
    ext::DynamicObjectExt,
    manifest::{self, DeploymentConfig, Resource, TemplateEnricher},
    namespace::{self, Namespace},
    readiness::{self, PollSettings, ReadinessState},
    resolver::{PropertyPlan, PropertyResolver, ResourceLocator},
};

/// Scenario-independent knobs of an [`Orchestrator`].
#[derive(Clone, Debug)]
pub struct Settings {
    pub ephemeral_namespaces: bool,

    /// Timeout and interval of every wait unless a service overrides it.
    pub poll: PollSettings,

    pub build_output_directory: PathBuf,

    pub classpath: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ephemeral_namespaces: true,
            poll: PollSettings::default(),
            build_output_directory: PathBuf::from(consts::DEFAULT_BUILD_OUTPUT_DIRECTORY),
            classpath: Vec::new(),
        }
    }
}

/// Operator to subscribe to from a catalog source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorSubscription {
    pub name: String,
    pub channel: String,
    pub source: String,
    pub source_namespace: String,
}

pub struct Orchestrator<C, R> {
    cluster: C,
    runner: R,
    namespace: Namespace,
    scenario_id: String,
    settings: Settings,
    resolver: PropertyResolver,
}

impl<C, R> Orchestrator<C, R>
where
    C: ClusterApi,
    R: CommandRunner,
{
    /// Starts a scenario: creates an ephemeral namespace when enabled,
    /// otherwise works in the client's current namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if no ephemeral namespace could be created.
    pub async fn create(cluster: C, runner: R, settings: Settings) -> Result<Self, Error> {
        let namespace = if settings.ephemeral_namespaces {
            Namespace::create_ephemeral(&runner).await?
        } else {
            Namespace::shared(cluster.default_namespace())
        };
        let scenario_id = namespace::random_suffix(&mut rand::rng(), consts::SCENARIO_ID_LENGTH);
        tracing::info!("Scenario {scenario_id} runs in namespace {}", namespace.name());
        Ok(Self::attach(cluster, runner, namespace, scenario_id, settings))
    }

    /// Resumes work in a namespace created earlier.
    pub fn attach(
        cluster: C,
        runner: R,
        namespace: Namespace,
        scenario_id: impl Into<String>,
        settings: Settings,
    ) -> Self {
        let locator = ResourceLocator::new(
            settings.build_output_directory.clone(),
            settings.classpath.iter().cloned(),
        );
        Self {
            cluster,
            runner,
            namespace,
            scenario_id: scenario_id.into(),
            settings,
            resolver: PropertyResolver::new(locator),
        }
    }

    /// Name of the active namespace.
    pub fn project(&self) -> &str { self.namespace.name() }

    pub fn scenario_id(&self) -> &str { &self.scenario_id }

    pub const fn namespace(&self) -> &Namespace { &self.namespace }

    pub const fn settings(&self) -> &Settings { &self.settings }

    fn scenario_selector(&self) -> String {
        format!("{}={}", labels::SCENARIO_ID, self.scenario_id)
    }

    async fn run_cli(&self, action: String, args: Vec<String>) -> Result<String, Error> {
        let output = self.runner.run(args).await.context(error::CommandSnafu { action })?;
        Ok(output.joined_lines())
    }

    /// Applies a manifest file in the active namespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI rejects the manifest.
    pub async fn apply(&self, file: &Path) -> Result<(), Error> {
        self.apply_in_project(file, self.project()).await
    }

    /// Applies a manifest file with the CLI.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI rejects the manifest.
    pub async fn apply_in_project(&self, file: &Path, project: &str) -> Result<(), Error> {
        self.file_command("apply", file, project).await
    }

    /// # Errors
    ///
    /// Returns an error if the CLI fails.
    pub async fn delete(&self, file: &Path) -> Result<(), Error> {
        self.delete_in_project(file, self.project()).await
    }

    /// Deletes the objects of a manifest file with the CLI.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI fails.
    pub async fn delete_in_project(&self, file: &Path, project: &str) -> Result<(), Error> {
        self.file_command("delete", file, project).await
    }

    async fn file_command(&self, verb: &str, file: &Path, project: &str) -> Result<(), Error> {
        let absolute = std::path::absolute(file)
            .with_context(|_| error::AbsolutePathSnafu { file: file.to_path_buf() })?;
        let absolute = absolute.display().to_string();
        let _output = self
            .run_cli(
                format!("{verb} resource {absolute} in namespace {project}"),
                vec![verb.into(), "-f".into(), absolute, "-n".into(), project.into()],
            )
            .await?;
        Ok(())
    }

    /// Binds a template to this scenario and `service`.
    ///
    /// The service properties are resolved first, which creates the ConfigMaps
    /// and Secrets they reference; `extra_properties` are added verbatim and
    /// win over resolved values of the same name. Properties are only resolved
    /// when the template has a deployment config to receive them.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid, a property cannot be
    /// resolved, or a referenced object cannot be created.
    pub async fn enrich_template(
        &self,
        service: &Service,
        template: &str,
        extra_properties: &BTreeMap<String, String>,
        file: &Path,
    ) -> Result<String, Error> {
        let mut resources =
            manifest::parse(template).with_context(|_| error::TemplateSnafu { file })?;

        let has_deployment_config =
            resources.iter().any(|resource| matches!(resource, Resource::DeploymentConfig(_)));
        let plan = if has_deployment_config {
            self.prepare_properties(service).await?
        } else {
            PropertyPlan::default()
        };
        let mut env = plan.properties;
        env.extend(extra_properties.iter().map(|(key, value)| (key.clone(), value.clone())));

        TemplateEnricher::new(self.project(), &self.scenario_id).enrich(
            &service.name,
            &mut resources,
            &env,
            &plan.volumes,
        );
        manifest::render(&resources).with_context(|_| error::TemplateSnafu { file })
    }

    /// Loads `file`, passes its text through `update`, enriches it for
    /// `service`, writes the result to `target` and applies it.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the steps fails.
    pub async fn apply_template<F>(
        &self,
        service: &Service,
        file: &Path,
        update: F,
        extra_properties: &BTreeMap<String, String>,
        target: &Path,
    ) -> Result<(), Error>
    where
        F: FnOnce(String) -> String,
    {
        let template = tokio::fs::read_to_string(file)
            .await
            .with_context(|_| error::ReadTemplateSnafu { file: file.to_path_buf() })?;
        let enriched =
            self.enrich_template(service, &update(template), extra_properties, file).await?;

        if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|_| error::WriteTemplateSnafu { file: target.to_path_buf() })?;
        }
        tokio::fs::write(target, enriched)
            .await
            .with_context(|_| error::WriteTemplateSnafu { file: target.to_path_buf() })?;

        tracing::info!("Applying template {} for service {}", target.display(), service.name);
        self.apply(target).await
    }

    /// Pushes the service properties into an already deployed deployment
    /// config as environment variables and mounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment config does not exist or cannot be
    /// updated.
    pub async fn apply_service_properties_using_deployment_config(
        &self,
        service: &Service,
    ) -> Result<(), Error> {
        let kind = kinds::deployment_config();
        let object = self.cluster.get(&kind, self.project(), &service.name).await?.context(
            error::DeploymentConfigNotFoundSnafu {
                name: service.name.clone(),
                namespace: self.project(),
            },
        )?;
        let mut dc: DeploymentConfig = convert(&object, &kind.kind, &service.name)?;

        let plan = self.prepare_properties(service).await?;
        if let Some(pod_spec) = dc.spec.template.as_mut().and_then(|template| template.spec.as_mut())
        {
            plan.volumes.apply_to(pod_spec);
            for container in &mut pod_spec.containers {
                for (name, value) in &plan.properties {
                    manifest::upsert_env(container, name, value);
                }
            }
        }

        let updated: DynamicObject = convert(&dc, &kind.kind, &service.name)?;
        let _replaced = self.create_or_replace(&kind, updated).await?;
        Ok(())
    }

    /// Resolves the service properties and creates the ConfigMaps and Secrets
    /// they reference.
    async fn prepare_properties(&self, service: &Service) -> Result<PropertyPlan, Error> {
        let plan = self
            .resolver
            .resolve(&service.properties)
            .with_context(|_| error::ResolvePropertiesSnafu { service: service.name.clone() })?;

        for (name, entries) in &plan.config_maps {
            self.create_or_update_config_map(name, entries).await?;
        }
        for (name, file) in &plan.secrets {
            self.create_secret_if_absent(name, file).await?;
        }
        Ok(plan)
    }

    /// Puts `entries` into the ConfigMap, creating it when missing. Keys not
    /// in `entries` are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster request fails.
    pub async fn create_or_update_config_map(
        &self,
        name: &str,
        entries: &BTreeMap<String, String>,
    ) -> Result<(), Error> {
        let kind = kinds::config_map();
        if let Some(mut existing) = self.cluster.get(&kind, self.project(), name).await? {
            let data = existing.data.as_object_mut().map(|fields| {
                fields.entry("data").or_insert_with(|| Value::Object(serde_json::Map::new()))
            });
            if let Some(Value::Object(data)) = data {
                for (key, value) in entries {
                    let _previous = data.insert(key.clone(), Value::String(value.clone()));
                }
            } else {
                existing.data = json!({ "data": entries });
            }
            tracing::debug!("Updating config map {name}");
            let _replaced = self.cluster.replace(&kind, self.project(), &existing).await?;
        } else {
            let mut object = DynamicObject::new(name, &kind)
                .within(self.project())
                .data(json!({ "data": entries }));
            object.metadata.labels = Some(BTreeMap::from([(
                labels::SCENARIO_ID.to_string(),
                self.scenario_id.clone(),
            )]));
            tracing::debug!("Creating config map {name}");
            let _created = self.cluster.create(&kind, self.project(), &object).await?;
        }
        Ok(())
    }

    /// Creates a generic secret from `file` unless one named `name` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the CLI fails.
    pub async fn create_secret_if_absent(&self, name: &str, file: &Path) -> Result<(), Error> {
        if self.cluster.get(&kinds::secret(), self.project(), name).await?.is_some() {
            tracing::debug!("Secret {name} already exists");
            return Ok(());
        }
        let _output = self
            .run_cli(
                format!("create secret {name} in namespace {}", self.project()),
                vec![
                    "create".into(),
                    "secret".into(),
                    "generic".into(),
                    name.into(),
                    format!("--from-file={}", file.display()),
                    "-n".into(),
                    self.project().into(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn create_or_replace(
        &self,
        kind: &ApiResource,
        mut object: DynamicObject,
    ) -> Result<DynamicObject, Error> {
        let name = object.name_or_default();
        object.metadata.namespace = Some(self.project().to_string());
        let created = match self.cluster.get(kind, self.project(), &name).await? {
            Some(existing) => {
                object.metadata.resource_version = existing.metadata.resource_version;
                self.cluster.replace(kind, self.project(), &object).await?
            }
            None => self.cluster.create(kind, self.project(), &object).await?,
        };
        Ok(created)
    }

    /// Starts a new rollout of the service's deployment config.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI fails.
    pub async fn rollout(&self, service: &Service) -> Result<(), Error> {
        let _output = self
            .run_cli(
                format!("rollout service {}", service.name),
                vec![
                    "rollout".into(),
                    "latest".into(),
                    format!("dc/{}", service.name),
                    "-n".into(),
                    self.project().into(),
                ],
            )
            .await?;
        Ok(())
    }

    /// Creates a route to the service unless one already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the route lookup or the CLI fails.
    pub async fn expose(&self, service: &Service, port: u16) -> Result<(), Error> {
        if self.cluster.get(&kinds::route(), self.project(), &service.name).await?.is_some() {
            tracing::debug!("Service {} is already exposed", service.name);
            return Ok(());
        }
        tracing::info!("Exposing service {} on port {port}", service.name);
        let _output = self
            .run_cli(
                format!("expose service {}", service.name),
                vec![
                    "expose".into(),
                    format!("svc/{}", service.name),
                    format!("--port={port}"),
                    "-n".into(),
                    self.project().into(),
                    "-l".into(),
                    self.scenario_selector(),
                ],
            )
            .await?;
        Ok(())
    }

    /// Scales the deployment config. Serverless services scale themselves and
    /// are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI fails.
    pub async fn scale_to(&self, service: &Service, replicas: i32) -> Result<(), Error> {
        if self.is_serverless(&service.name).await {
            tracing::debug!("Not scaling serverless service {}", service.name);
            return Ok(());
        }
        self.scale_deployment_config(service, replicas).await
    }

    /// Like [`Self::scale_to`], after waiting for the deployment config to
    /// exist. Serverless services have no deployment config and are left
    /// alone without waiting.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout or if the CLI fails.
    pub async fn scale_to_when_ready(&self, service: &Service, replicas: i32) -> Result<(), Error> {
        if self.is_serverless(&service.name).await {
            tracing::debug!("Not scaling serverless service {}", service.name);
            return Ok(());
        }
        self.wait_for_object(&kinds::deployment_config(), &service.name, self.settings.poll)
            .await?;
        self.scale_deployment_config(service, replicas).await
    }

    async fn scale_deployment_config(&self, service: &Service, replicas: i32) -> Result<(), Error> {
        let _output = self
            .run_cli(
                format!("scale service {} to {replicas} replicas", service.name),
                vec![
                    "scale".into(),
                    format!("dc/{}", service.name),
                    format!("--replicas={replicas}"),
                    "-n".into(),
                    self.project().into(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn wait_for_object(
        &self,
        kind: &ApiResource,
        name: &str,
        settings: PollSettings,
    ) -> Result<(), Error> {
        let cluster = &self.cluster;
        let project = self.project();
        readiness::poll_until(format!("{} {name} to exist", kind.kind), settings, move || async move {
            cluster.get(kind, project, name).await.map(|object| object.is_some())
        })
        .await?;
        Ok(())
    }

    /// Streams the logs of the build config's build until it finishes and
    /// returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if the build config never appears, the CLI fails, or
    /// a build of the build config failed.
    pub async fn follow_build_config_logs(&self, build_config: &str) -> Result<String, Error> {
        self.wait_for_object(&kinds::build_config(), build_config, self.settings.poll).await?;

        let logs = self
            .run_cli(
                format!("follow logs of build config {build_config}"),
                vec![
                    "logs".into(),
                    format!("bc/{build_config}"),
                    "--follow".into(),
                    "-n".into(),
                    self.project().into(),
                ],
            )
            .await?;

        snafu::ensure!(
            !self.is_build_failed(build_config).await?,
            error::BuildFailedSnafu { name: build_config }
        );
        Ok(logs)
    }

    /// Whether any build spawned from the build config has failed.
    ///
    /// # Errors
    ///
    /// Returns an error if builds cannot be listed.
    pub async fn is_build_failed(&self, build_config: &str) -> Result<bool, Error> {
        let selector = format!("{}={build_config}", labels::BUILD_CONFIG);
        let builds = self.cluster.list(&kinds::build(), self.project(), Some(&selector)).await?;
        Ok(builds.iter().any(readiness::is_build_failed))
    }

    /// Ready replicas reported by the deployment config; zero when it does
    /// not exist or reports no status.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster request fails.
    pub async fn ready_replicas(&self, service: &Service) -> Result<i64, Error> {
        let dc = self.cluster.get(&kinds::deployment_config(), self.project(), &service.name).await?;
        Ok(dc
            .as_ref()
            .and_then(|dc| dc.field(&["status", "readyReplicas"]))
            .and_then(Value::as_i64)
            .unwrap_or(0))
    }

    /// Pods deployed for the service.
    ///
    /// # Errors
    ///
    /// Returns an error if pods cannot be listed.
    pub async fn pods_in_service(&self, service: &Service) -> Result<Vec<DynamicObject>, Error> {
        let selector = format!("{}={}", labels::LOG_WATCH, service.name);
        Ok(self.cluster.list(&kinds::pod(), self.project(), Some(&selector)).await?)
    }

    /// Logs of every container of every pod in the namespace, keyed by
    /// `<pod>-<container>`.
    ///
    /// # Errors
    ///
    /// Returns an error if pods cannot be listed or logs cannot be read.
    pub async fn logs(&self) -> Result<BTreeMap<String, String>, Error> {
        let pods = self.cluster.list(&kinds::pod(), self.project(), None).await?;
        self.collect_logs(&pods).await
    }

    /// Logs of the running pods of one service, keyed like [`Self::logs`].
    ///
    /// # Errors
    ///
    /// Returns an error if pods cannot be listed or logs cannot be read.
    pub async fn service_logs(&self, service: &Service) -> Result<BTreeMap<String, String>, Error> {
        let pods = self
            .pods_in_service(service)
            .await?
            .into_iter()
            .filter(DynamicObjectExt::is_pod_running)
            .collect::<Vec<_>>();
        self.collect_logs(&pods).await
    }

    async fn collect_logs(&self, pods: &[DynamicObject]) -> Result<BTreeMap<String, String>, Error> {
        let mut logs = BTreeMap::new();
        for pod in pods {
            let pod_name = pod.name_or_default();
            for container in pod.container_names() {
                let output =
                    self.cluster.container_logs(self.project(), &pod_name, &container).await?;
                let _previous = logs.insert(format!("{pod_name}-{container}"), output);
            }
        }
        Ok(logs)
    }

    /// Public URL of the service.
    ///
    /// Serverless services use the URL of their serving route; others use
    /// their OpenShift route with `https` when it terminates TLS.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no route or it carries no usable address.
    pub async fn url(&self, service: &Service) -> Result<Url, Error> {
        let name = service.name.as_str();
        let value = if self.is_serverless(name).await {
            let route = self.cluster.get(&kinds::knative_route(), self.project(), name).await?;
            route
                .as_ref()
                .and_then(|route| route.str_field(&["status", "url"]))
                .map(ToString::to_string)
                .context(error::ServerlessUrlMissingSnafu { name, namespace: self.project() })?
        } else {
            let route = self.cluster.get(&kinds::route(), self.project(), name).await?;
            let spec = route
                .as_ref()
                .and_then(|route| route.field(&["spec"]))
                .filter(|spec| !spec.is_null())
                .context(error::RouteNotFoundSnafu { name, namespace: self.project() })?;
            route_url(spec)
        };
        Url::parse(&value).with_context(|_| error::InvalidUrlSnafu { name, value: value.clone() })
    }

    /// Waits until every image stream of the template other than the
    /// service's own carries a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or the wait times out.
    pub async fn await_for(&self, service: &Service, file: &Path) -> Result<(), Error> {
        let template = tokio::fs::read_to_string(file)
            .await
            .with_context(|_| error::ReadTemplateSnafu { file: file.to_path_buf() })?;
        let resources =
            manifest::parse(&template).with_context(|_| error::TemplateSnafu { file })?;

        let settings = self.settings.poll.with_timeout(
            service.timeout_or(timeouts::IMAGE_STREAM_INSTALL, self.settings.poll.timeout),
        );
        let image_streams = resources
            .iter()
            .filter(|resource| matches!(resource, Resource::ImageStream(_)))
            .filter_map(Resource::name)
            .filter(|name| *name != service.name);

        let cluster = &self.cluster;
        let kind = &kinds::image_stream();
        let project = self.project();
        for name in image_streams {
            tracing::info!("Waiting for image stream {name}");
            readiness::poll_until(format!("image stream {name} to be imported"), settings, move || {
                async move {
                    let image_stream = cluster.get(kind, project, name).await?;
                    Ok::<_, cluster::Error>(readiness::has_image_stream_tags(image_stream.as_ref()))
                }
            })
            .await?;
        }
        Ok(())
    }

    /// Subscribes to an operator in the current namespace and waits until its
    /// cluster service version has been installed.
    ///
    /// # Errors
    ///
    /// Returns an error in shared namespaces, if the objects cannot be
    /// created, or if the installation times out.
    pub async fn install_operator(
        &self,
        service: &Service,
        operator: &OperatorSubscription,
    ) -> Result<(), Error> {
        snafu::ensure!(
            self.namespace.is_ephemeral(),
            error::OperatorsRequireEphemeralNamespacesSnafu { name: operator.name.clone() }
        );
        tracing::info!("Installing operator {} from {}", operator.name, operator.source);

        let group_kind = kinds::operator_group();
        let group = DynamicObject::new(&service.name, &group_kind)
            .data(json!({ "spec": { "targetNamespaces": [self.project()] } }));
        let _group = self.create_or_replace(&group_kind, group).await?;

        let subscription_kind = kinds::subscription();
        let subscription = DynamicObject::new(&operator.name, &subscription_kind).data(json!({
            "spec": {
                "channel": operator.channel,
                "name": operator.name,
                "source": operator.source,
                "sourceNamespace": operator.source_namespace,
            }
        }));
        let _subscription = self.create_or_replace(&subscription_kind, subscription).await?;

        let settings = self.settings.poll.with_timeout(
            service.timeout_or(timeouts::OPERATOR_INSTALL, self.settings.poll.timeout),
        );
        let cluster = &self.cluster;
        let subscription_kind = &subscription_kind;
        let csv_kind = &kinds::cluster_service_version();
        let project = self.project();
        let name = operator.name.as_str();
        readiness::poll_until(format!("operator {name} to be installed"), settings, move || {
            async move {
                let subscription = cluster.get(subscription_kind, project, name).await?;
                let Some(csv_name) = readiness::installed_csv(subscription.as_ref()) else {
                    return Ok(false);
                };
                let csv = cluster.get(csv_kind, project, csv_name).await?;
                Ok::<_, cluster::Error>(readiness::is_csv_succeeded(csv.as_ref()))
            }
        })
        .await?;
        tracing::info!("Operator {name} installed");
        Ok(())
    }

    /// Whether the custom resource reports a `Ready=True` condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster request fails.
    pub async fn is_custom_resource_ready(
        &self,
        kind: &ApiResource,
        name: &str,
    ) -> Result<bool, Error> {
        let object = self.cluster.get(kind, self.project(), name).await?;
        Ok(ReadinessState::of(object.as_ref()).is_ready())
    }

    /// Waits until [`Self::is_custom_resource_ready`] holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait times out.
    pub async fn await_custom_resource_ready(
        &self,
        kind: &ApiResource,
        name: &str,
    ) -> Result<(), Error> {
        let cluster = &self.cluster;
        let project = self.project();
        readiness::poll_until(
            format!("{} {name} to become ready", kind.kind),
            self.settings.poll,
            move || async move {
                let object = cluster.get(kind, project, name).await?;
                Ok::<_, cluster::Error>(ReadinessState::of(object.as_ref()).is_ready())
            },
        )
        .await?;
        Ok(())
    }

    /// Runs a command in a container and returns its output lines joined by
    /// newlines.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI or the command fails.
    pub async fn exec_on_pod(
        &self,
        pod: &str,
        container: &str,
        command: &[String],
    ) -> Result<String, Error> {
        let mut args = vec![
            "exec".into(),
            pod.into(),
            "-c".into(),
            container.into(),
            "-n".into(),
            self.project().into(),
        ];
        if !command.is_empty() {
            args.push("--".into());
            args.extend(command.iter().cloned());
        }
        self.run_cli(format!("execute `{}` on pod {pod}", command.join(" ")), args).await
    }

    /// Whether a serverless service named `name` exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the serving API cannot be queried, e.g. because
    /// the cluster has no serverless support installed.
    pub async fn probe_serverless(&self, name: &str) -> Result<bool, cluster::Error> {
        let service = self.cluster.get(&kinds::knative_service(), self.project(), name).await?;
        Ok(service.is_some())
    }

    async fn is_serverless(&self, name: &str) -> bool {
        self.probe_serverless(name).await.unwrap_or_else(|err| {
            tracing::warn!("Could not tell whether {name} is serverless, assuming not: {err}");
            false
        })
    }

    /// Events of the namespace as printed by the CLI; empty on failure.
    pub async fn get_events(&self) -> String {
        self.best_effort_cli("get events", ["get", "events"]).await
    }

    /// Status summary of the namespace as printed by the CLI; empty on failure.
    pub async fn get_status(&self) -> String {
        self.best_effort_cli("get status", ["status", "--suggest"]).await
    }

    async fn best_effort_cli<const N: usize>(&self, what: &str, args: [&str; N]) -> String {
        let args = args
            .into_iter()
            .chain(["-n", self.project()])
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        match self.runner.run(args).await {
            Ok(output) => output.joined_lines(),
            Err(err) => {
                tracing::warn!("Failed to {what} of namespace {}, error: {err}", self.project());
                String::new()
            }
        }
    }

    /// Tears the scenario down; see [`Namespace::teardown`].
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI deletion fails.
    pub async fn delete_project(&self) -> Result<(), Error> {
        self.namespace.teardown(&self.runner, &self.scenario_id).await?;
        Ok(())
    }
}

fn route_url(spec: &Value) -> String {
    let protocol = if spec.get("tls").is_some_and(|tls| !tls.is_null()) { "https" } else { "http" };
    let host = spec.get("host").and_then(Value::as_str).unwrap_or_default();
    let path = spec.get("path").and_then(Value::as_str).unwrap_or_default();
    format!("{protocol}://{host}{path}")
}

fn convert<T, U>(value: &T, kind: &str, name: &str) -> Result<U, Error>
where
    T: serde::Serialize,
    U: serde::de::DeserializeOwned,
{
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .with_context(|_| error::ConvertObjectSnafu { kind, name })
}

#[cfg(test)]
mod tests;
