use std::time::Duration;

use super::*;
use crate::testing::{FakeCluster, RecordingRunner};

const NAMESPACE: &str = "ts-abcdefghij";
const SCENARIO_ID: &str = "scn12345";

fn settings(build_output: &Path) -> Settings {
    Settings {
        ephemeral_namespaces: true,
        poll: PollSettings { timeout: Duration::from_millis(50), interval: Duration::from_millis(5) },
        build_output_directory: build_output.to_path_buf(),
        classpath: Vec::new(),
    }
}

fn orchestrator(
    cluster: FakeCluster,
    runner: RecordingRunner,
) -> Orchestrator<FakeCluster, RecordingRunner> {
    Orchestrator::attach(
        cluster,
        runner,
        Namespace::ephemeral(NAMESPACE),
        SCENARIO_ID,
        settings(Path::new("/nonexistent")),
    )
}

fn shared(cluster: FakeCluster, runner: RecordingRunner) -> Orchestrator<FakeCluster, RecordingRunner> {
    Orchestrator::attach(
        cluster,
        runner,
        Namespace::shared("team"),
        SCENARIO_ID,
        settings(Path::new("/nonexistent")),
    )
}

fn route(name: &str, spec: Value) -> Value { json!({ "metadata": { "name": name }, "spec": spec }) }

fn pod(name: &str, service: &str, phase: &str, containers: &[&str]) -> Value {
    let containers = containers.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>();
    json!({
        "metadata": { "name": name, "labels": { "tsLogWatch": service } },
        "spec": { "containers": containers },
        "status": { "phase": phase },
    })
}

const DEPLOYMENT_TEMPLATE: &str = "
apiVersion: image.openshift.io/v1
kind: ImageStream
metadata:
  name: openjdk-17
---
apiVersion: image.openshift.io/v1
kind: ImageStream
metadata:
  name: greeter
---
apiVersion: apps.openshift.io/v1
kind: DeploymentConfig
metadata:
  name: placeholder
spec:
  replicas: 1
  template:
    spec:
      containers:
        - name: app
          image: greeter:latest
";

#[tokio::test]
async fn test_create_in_shared_mode_uses_default_namespace() {
    let settings = Settings { ephemeral_namespaces: false, ..Settings::default() };
    let runner = RecordingRunner::new();
    let orchestrator =
        Orchestrator::create(FakeCluster::new("team"), runner, settings).await.unwrap();

    assert_eq!(orchestrator.project(), "team");
    assert!(!orchestrator.namespace().is_ephemeral());
    assert_eq!(orchestrator.scenario_id().len(), 8);
    assert!(orchestrator.runner.calls().is_empty());
}

#[tokio::test]
async fn test_create_in_ephemeral_mode_creates_project() {
    let orchestrator =
        Orchestrator::create(FakeCluster::default(), RecordingRunner::new(), Settings::default())
            .await
            .unwrap();

    assert!(namespace::is_generated_name(orchestrator.project()));
    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("new-project {}", orchestrator.project())]
    );
}

#[tokio::test]
async fn test_apply_passes_absolute_path_and_namespace() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    orchestrator.apply(Path::new("/tmp/app.yaml")).await.unwrap();
    orchestrator.delete_in_project(Path::new("/tmp/app.yaml"), "other").await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![
            format!("apply -f /tmp/app.yaml -n {NAMESPACE}"),
            "delete -f /tmp/app.yaml -n other".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_failed_apply_describes_action() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new().fail("apply"));
    let err = orchestrator.apply(Path::new("/tmp/app.yaml")).await.unwrap_err();

    assert!(matches!(err, Error::Command { .. }));
    assert!(err.to_string().starts_with(&format!(
        "Failed to apply resource /tmp/app.yaml in namespace {NAMESPACE}"
    )));
}

#[tokio::test]
async fn test_apply_template_enriches_writes_and_applies() {
    let root = tempfile::tempdir().unwrap();
    let build_output = root.path().join("target");
    std::fs::create_dir_all(build_output.join("classes/config")).unwrap();
    std::fs::write(build_output.join("classes/config/app.yml"), "greeting: hola\n").unwrap();
    let template = root.path().join("greeter.yaml");
    std::fs::write(&template, DEPLOYMENT_TEMPLATE).unwrap();
    let target = root.path().join("out/greeter.yaml");

    let orchestrator = Orchestrator::attach(
        FakeCluster::default(),
        RecordingRunner::new(),
        Namespace::ephemeral(NAMESPACE),
        SCENARIO_ID,
        settings(&build_output),
    );
    let service = Service::new("greeter").with_property("app.config", "resource::config/app.yml");
    let extra = BTreeMap::from([("EXTRA".to_string(), "1".to_string())]);

    orchestrator
        .apply_template(
            &service,
            &template,
            |text| text.replace("greeter:latest", "greeter:1.0"),
            &extra,
            &target,
        )
        .await
        .unwrap();

    let config_map = orchestrator.cluster.object(&kinds::config_map(), NAMESPACE, "config").unwrap();
    assert_eq!(config_map.data["data"]["app.yml"], "greeting: hola\n");

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("apply -f {} -n {NAMESPACE}", target.display())]
    );

    let written = manifest::parse(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(written.len(), 3);
    let Resource::DeploymentConfig(dc) = &written[2] else {
        panic!("expected a deployment config");
    };
    assert_eq!(dc.metadata.name.as_deref(), Some("greeter"));
    assert_eq!(dc.metadata.namespace.as_deref(), Some(NAMESPACE));

    let container = &dc.spec.template.as_ref().unwrap().spec.as_ref().unwrap().containers[0];
    assert_eq!(container.image.as_deref(), Some("greeter:1.0"));
    let env = container.env.as_ref().unwrap();
    let value_of = |name: &str| {
        env.iter().find(|var| var.name == name).and_then(|var| var.value.clone())
    };
    assert_eq!(value_of("app.config").as_deref(), Some("/config/app.yml"));
    assert_eq!(value_of("EXTRA").as_deref(), Some("1"));
    assert!(
        container
            .volume_mounts
            .as_ref()
            .unwrap()
            .iter()
            .any(|mount| mount.mount_path == "/config" && mount.read_only == Some(true))
    );
}

#[tokio::test]
async fn test_template_without_deployment_config_skips_properties() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let service = Service::new("greeter").with_property("app.config", "resource::config/app.yml");
    let template = "apiVersion: v1\nkind: Service\nmetadata:\n  name: greeter\n";

    let rendered = orchestrator
        .enrich_template(&service, template, &BTreeMap::new(), Path::new("service.yaml"))
        .await
        .unwrap();

    assert!(rendered.contains(NAMESPACE));
    assert!(rendered.contains(SCENARIO_ID));
    assert_eq!(orchestrator.cluster.count(&kinds::config_map(), NAMESPACE), 0);
}

#[tokio::test]
async fn test_config_map_is_updated_in_place() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let first = BTreeMap::from([("app.yml".to_string(), "a: 1".to_string())]);
    let second = BTreeMap::from([
        ("app.yml".to_string(), "a: 2".to_string()),
        ("extra.yml".to_string(), "b: 1".to_string()),
    ]);

    orchestrator.create_or_update_config_map("config", &first).await.unwrap();
    orchestrator.create_or_update_config_map("config", &second).await.unwrap();

    assert_eq!(orchestrator.cluster.count(&kinds::config_map(), NAMESPACE), 1);
    let config_map = orchestrator.cluster.object(&kinds::config_map(), NAMESPACE, "config").unwrap();
    assert_eq!(config_map.data["data"]["app.yml"], "a: 2");
    assert_eq!(config_map.data["data"]["extra.yml"], "b: 1");
}

#[tokio::test]
async fn test_existing_secret_is_not_recreated() {
    let cluster = FakeCluster::default()
        .with(&kinds::secret(), NAMESPACE, json!({ "metadata": { "name": "certs-tls-crt" } }));
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.create_secret_if_absent("certs-tls-crt", Path::new("certs/tls.crt")).await.unwrap();
    orchestrator.create_secret_if_absent("other", Path::new("/tmp/other.crt")).await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("create secret generic other --from-file=/tmp/other.crt -n {NAMESPACE}")]
    );
}

#[tokio::test]
async fn test_expose_existing_route_invokes_no_cli() {
    let cluster = FakeCluster::default()
        .with(&kinds::route(), NAMESPACE, route("greeter", json!({ "host": "greeter.apps" })));
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.expose(&Service::new("greeter"), 8080).await.unwrap();
    assert!(orchestrator.runner.calls().is_empty());
}

#[tokio::test]
async fn test_expose_creates_labelled_route() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    orchestrator.expose(&Service::new("greeter"), 8080).await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("expose svc/greeter --port=8080 -n {NAMESPACE} -l scenarioId={SCENARIO_ID}")]
    );
}

#[tokio::test]
async fn test_rollout_and_scale() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let service = Service::new("greeter");
    orchestrator.rollout(&service).await.unwrap();
    orchestrator.scale_to(&service, 2).await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![
            format!("rollout latest dc/greeter -n {NAMESPACE}"),
            format!("scale dc/greeter --replicas=2 -n {NAMESPACE}"),
        ]
    );
}

#[tokio::test]
async fn test_serverless_services_are_not_scaled() {
    let cluster = FakeCluster::default().with(
        &kinds::knative_service(),
        NAMESPACE,
        json!({ "metadata": { "name": "greeter" } }),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.scale_to(&Service::new("greeter"), 0).await.unwrap();
    assert!(orchestrator.runner.calls().is_empty());
}

#[tokio::test]
async fn test_serverless_services_are_not_scaled_when_ready() {
    let cluster = FakeCluster::default().with(
        &kinds::knative_service(),
        NAMESPACE,
        json!({ "metadata": { "name": "greeter" } }),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.scale_to_when_ready(&Service::new("greeter"), 1).await.unwrap();
    assert!(orchestrator.runner.calls().is_empty());
}

#[tokio::test]
async fn test_failing_serverless_probe_means_not_serverless() {
    let cluster = FakeCluster::default().failing(&kinds::knative_service());
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    assert!(orchestrator.probe_serverless("greeter").await.is_err());
    orchestrator.scale_to(&Service::new("greeter"), 1).await.unwrap();
    assert_eq!(orchestrator.runner.calls().len(), 1);
}

#[tokio::test]
async fn test_scale_when_ready_times_out_without_deployment_config() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let err = orchestrator.scale_to_when_ready(&Service::new("greeter"), 1).await.unwrap_err();

    assert!(matches!(err, Error::Readiness { .. }));
    assert!(orchestrator.runner.calls().is_empty());
}

#[tokio::test]
async fn test_url_of_route_with_tls_and_path() {
    let cluster = FakeCluster::default().with(
        &kinds::route(),
        NAMESPACE,
        route("greeter", json!({ "host": "greeter.apps.example.com", "path": "/api", "tls": {} })),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    let url = orchestrator.url(&Service::new("greeter")).await.unwrap();
    assert_eq!(url.as_str(), "https://greeter.apps.example.com/api");
}

#[tokio::test]
async fn test_url_of_plain_route() {
    let cluster = FakeCluster::default().with(
        &kinds::route(),
        NAMESPACE,
        route("greeter", json!({ "host": "greeter.apps.example.com" })),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    let url = orchestrator.url(&Service::new("greeter")).await.unwrap();
    assert_eq!(url.scheme(), "http");
    assert_eq!(url.host_str(), Some("greeter.apps.example.com"));
}

#[tokio::test]
async fn test_url_without_route_fails() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let err = orchestrator.url(&Service::new("greeter")).await.unwrap_err();
    assert!(matches!(err, Error::RouteNotFound { .. }));
}

#[tokio::test]
async fn test_url_of_serverless_service() {
    let cluster = FakeCluster::default()
        .with(&kinds::knative_service(), NAMESPACE, json!({ "metadata": { "name": "greeter" } }))
        .with(
            &kinds::knative_route(),
            NAMESPACE,
            json!({
                "metadata": { "name": "greeter" },
                "status": { "url": "https://greeter-ts.apps.example.com" },
            }),
        );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    let url = orchestrator.url(&Service::new("greeter")).await.unwrap();
    assert_eq!(url.host_str(), Some("greeter-ts.apps.example.com"));
}

#[tokio::test]
async fn test_logs_are_keyed_by_pod_and_container() {
    let cluster = FakeCluster::default()
        .with(&kinds::pod(), NAMESPACE, pod("greeter-1", "greeter", "Running", &["app", "proxy"]))
        .with(&kinds::pod(), NAMESPACE, pod("greeter-2", "greeter", "Pending", &["app"]))
        .with(&kinds::pod(), NAMESPACE, pod("db-1", "db", "Running", &["postgres"]));
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    let all = orchestrator.logs().await.unwrap();
    assert_eq!(
        all.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["db-1-postgres", "greeter-1-app", "greeter-1-proxy", "greeter-2-app"]
    );
    assert_eq!(all["greeter-1-proxy"], "log of greeter-1/proxy");

    let service = Service::new("greeter");
    assert_eq!(orchestrator.pods_in_service(&service).await.unwrap().len(), 2);
    let running = orchestrator.service_logs(&service).await.unwrap();
    assert_eq!(
        running.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["greeter-1-app", "greeter-1-proxy"]
    );
}

#[tokio::test]
async fn test_exec_on_pod_joins_output_lines() {
    let runner = RecordingRunner::new().reply("exec greeter-1", "one\ntwo\n");
    let orchestrator = orchestrator(FakeCluster::default(), runner);

    let command = vec!["cat".to_string(), "/etc/hosts".to_string()];
    let output = orchestrator.exec_on_pod("greeter-1", "app", &command).await.unwrap();

    assert_eq!(output, "one\ntwo");
    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("exec greeter-1 -c app -n {NAMESPACE} -- cat /etc/hosts")]
    );
}

#[tokio::test]
async fn test_exec_on_pod_without_command_omits_separator() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());

    let _output = orchestrator.exec_on_pod("greeter-1", "app", &[]).await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("exec greeter-1 -c app -n {NAMESPACE}")]
    );
}

#[tokio::test]
async fn test_events_and_status_are_best_effort() {
    let runner = RecordingRunner::new().reply("get events", "LAST SEEN   TYPE\n").fail("status");
    let orchestrator = orchestrator(FakeCluster::default(), runner);

    assert_eq!(orchestrator.get_events().await, "LAST SEEN   TYPE");
    assert_eq!(orchestrator.get_status().await, "");
    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("get events -n {NAMESPACE}"), format!("status --suggest -n {NAMESPACE}")]
    );
}

#[tokio::test]
async fn test_ready_replicas_defaults_to_zero() {
    let cluster = FakeCluster::default()
        .with(
            &kinds::deployment_config(),
            NAMESPACE,
            json!({ "metadata": { "name": "greeter" }, "status": { "readyReplicas": 2 } }),
        )
        .with(&kinds::deployment_config(), NAMESPACE, json!({ "metadata": { "name": "db" } }));
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    assert_eq!(orchestrator.ready_replicas(&Service::new("greeter")).await.unwrap(), 2);
    assert_eq!(orchestrator.ready_replicas(&Service::new("db")).await.unwrap(), 0);
    assert_eq!(orchestrator.ready_replicas(&Service::new("missing")).await.unwrap(), 0);
}

#[tokio::test]
async fn test_service_properties_are_pushed_into_deployment_config() {
    let cluster = FakeCluster::default().with(
        &kinds::deployment_config(),
        NAMESPACE,
        json!({
            "metadata": { "name": "greeter" },
            "spec": {
                "replicas": 1,
                "template": { "spec": { "containers": [
                    { "name": "app", "env": [{ "name": "GREETING", "value": "hello" }] }
                ] } },
            },
        }),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());
    let service =
        Service::new("greeter").with_property("GREETING", "hola").with_property("MODE", "test");

    orchestrator.apply_service_properties_using_deployment_config(&service).await.unwrap();

    let dc = orchestrator.cluster.object(&kinds::deployment_config(), NAMESPACE, "greeter").unwrap();
    let env = &dc.data["spec"]["template"]["spec"]["containers"][0]["env"];
    assert_eq!(
        env,
        &json!([{ "name": "GREETING", "value": "hola" }, { "name": "MODE", "value": "test" }])
    );
    assert_eq!(dc.data["spec"]["replicas"], 1);
}

#[tokio::test]
async fn test_missing_deployment_config_is_reported() {
    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let err = orchestrator
        .apply_service_properties_using_deployment_config(&Service::new("greeter"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DeploymentConfigNotFound { .. }));
}

#[tokio::test]
async fn test_await_for_waits_on_foreign_image_streams_only() {
    let root = tempfile::tempdir().unwrap();
    let template = root.path().join("greeter.yaml");
    std::fs::write(&template, DEPLOYMENT_TEMPLATE).unwrap();

    let cluster = FakeCluster::default().with(
        &kinds::image_stream(),
        NAMESPACE,
        json!({ "metadata": { "name": "openjdk-17" }, "status": { "tags": [{ "tag": "latest" }] } }),
    );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.await_for(&Service::new("greeter"), &template).await.unwrap();
}

#[tokio::test]
async fn test_await_for_times_out_on_untagged_image_stream() {
    let root = tempfile::tempdir().unwrap();
    let template = root.path().join("greeter.yaml");
    std::fs::write(&template, DEPLOYMENT_TEMPLATE).unwrap();

    let orchestrator = orchestrator(FakeCluster::default(), RecordingRunner::new());
    let service = Service::new("greeter")
        .with_timeout(timeouts::IMAGE_STREAM_INSTALL, Duration::from_millis(20));

    let err = orchestrator.await_for(&service, &template).await.unwrap_err();
    assert!(err.to_string().contains("image stream openjdk-17"));
}

#[tokio::test]
async fn test_follow_build_config_logs() {
    let cluster = FakeCluster::default()
        .with(&kinds::build_config(), NAMESPACE, json!({ "metadata": { "name": "greeter" } }))
        .with(
            &kinds::build(),
            NAMESPACE,
            json!({
                "metadata": { "name": "greeter-1", "labels": { "buildconfig": "greeter" } },
                "status": { "phase": "Complete" },
            }),
        );
    let runner = RecordingRunner::new().reply("logs bc/greeter", "step 1\nstep 2\n");
    let orchestrator = orchestrator(cluster, runner);

    let logs = orchestrator.follow_build_config_logs("greeter").await.unwrap();
    assert_eq!(logs, "step 1\nstep 2");
    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("logs bc/greeter --follow -n {NAMESPACE}")]
    );
}

#[tokio::test]
async fn test_failed_build_fails_the_follow() {
    let cluster = FakeCluster::default()
        .with(&kinds::build_config(), NAMESPACE, json!({ "metadata": { "name": "greeter" } }))
        .with(
            &kinds::build(),
            NAMESPACE,
            json!({
                "metadata": { "name": "greeter-2", "labels": { "buildconfig": "greeter" } },
                "status": { "phase": "Failed" },
            }),
        );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    assert!(orchestrator.is_build_failed("greeter").await.unwrap());
    assert!(!orchestrator.is_build_failed("other").await.unwrap());
    let err = orchestrator.follow_build_config_logs("greeter").await.unwrap_err();
    assert!(matches!(err, Error::BuildFailed { .. }));
}

fn operator() -> OperatorSubscription {
    OperatorSubscription {
        name: "amq-broker".to_string(),
        channel: "7.x".to_string(),
        source: "redhat-operators".to_string(),
        source_namespace: "openshift-marketplace".to_string(),
    }
}

#[tokio::test]
async fn test_operator_install_requires_ephemeral_namespace() {
    let orchestrator = shared(FakeCluster::default(), RecordingRunner::new());
    let err = orchestrator.install_operator(&Service::new("broker"), &operator()).await.unwrap_err();

    assert!(matches!(err, Error::OperatorsRequireEphemeralNamespaces { .. }));
    assert_eq!(orchestrator.cluster.count(&kinds::subscription(), "team"), 0);
}

#[tokio::test]
async fn test_operator_install_waits_for_succeeded_csv() {
    let cluster = FakeCluster::default()
        .with(
            &kinds::subscription(),
            NAMESPACE,
            json!({
                "metadata": { "name": "amq-broker" },
                "status": { "installedCSV": "amq-broker.v7.11.0" },
            }),
        )
        .with(
            &kinds::cluster_service_version(),
            NAMESPACE,
            json!({ "metadata": { "name": "amq-broker.v7.11.0" }, "status": { "phase": "Succeeded" } }),
        );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    orchestrator.install_operator(&Service::new("broker"), &operator()).await.unwrap();

    let group = orchestrator.cluster.object(&kinds::operator_group(), NAMESPACE, "broker").unwrap();
    assert_eq!(group.data["spec"]["targetNamespaces"], json!([NAMESPACE]));
    let subscription =
        orchestrator.cluster.object(&kinds::subscription(), NAMESPACE, "amq-broker").unwrap();
    assert_eq!(subscription.data["spec"]["channel"], "7.x");
    assert_eq!(subscription.data["spec"]["sourceNamespace"], "openshift-marketplace");
}

#[tokio::test]
async fn test_operator_install_times_out_while_csv_is_pending() {
    let cluster = FakeCluster::default()
        .with(
            &kinds::subscription(),
            NAMESPACE,
            json!({
                "metadata": { "name": "amq-broker" },
                "status": { "installedCSV": "amq-broker.v7.11.0" },
            }),
        )
        .with(
            &kinds::cluster_service_version(),
            NAMESPACE,
            json!({ "metadata": { "name": "amq-broker.v7.11.0" }, "status": { "phase": "Installing" } }),
        );
    let orchestrator = orchestrator(cluster, RecordingRunner::new());
    let service =
        Service::new("broker").with_timeout(timeouts::OPERATOR_INSTALL, Duration::from_millis(20));

    let err = orchestrator.install_operator(&service, &operator()).await.unwrap_err();
    assert!(matches!(err, Error::Readiness { .. }));
}

#[tokio::test]
async fn test_custom_resource_readiness() {
    let broker = kinds::custom("broker.amq.io", "v1beta1", "ActiveMQArtemis", "activemqartemises");
    let cluster = FakeCluster::default()
        .with(
            &broker,
            NAMESPACE,
            json!({
                "metadata": { "name": "ready" },
                "status": { "conditions": [{ "type": "Ready", "status": "True" }] },
            }),
        )
        .with(&broker, NAMESPACE, json!({ "metadata": { "name": "starting" }, "status": {} }));
    let orchestrator = orchestrator(cluster, RecordingRunner::new());

    assert!(orchestrator.is_custom_resource_ready(&broker, "ready").await.unwrap());
    assert!(!orchestrator.is_custom_resource_ready(&broker, "starting").await.unwrap());
    assert!(!orchestrator.is_custom_resource_ready(&broker, "missing").await.unwrap());
    orchestrator.await_custom_resource_ready(&broker, "ready").await.unwrap();
    assert!(orchestrator.await_custom_resource_ready(&broker, "starting").await.is_err());
}

#[tokio::test]
async fn test_delete_project_in_shared_mode_deletes_by_label() {
    let orchestrator = shared(FakeCluster::new("team"), RecordingRunner::new());
    orchestrator.delete_project().await.unwrap();

    assert_eq!(
        orchestrator.runner.command_lines(),
        vec![format!("delete -n team all -l scenarioId={SCENARIO_ID}")]
    );
}
