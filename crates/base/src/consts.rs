use std::time::Duration;

pub mod k8s {
    pub mod labels {
        /// Pod template label whose value is the owning service name; used to
        /// select the pods whose logs belong to one service.
        pub const LOG_WATCH: &str = "tsLogWatch";

        /// Label carried by every resource created during one scenario.
        pub const SCENARIO_ID: &str = "scenarioId";

        /// Label OpenShift puts on builds spawned from a build config.
        pub const BUILD_CONFIG: &str = "buildconfig";
    }

    pub mod phases {
        pub const POD_RUNNING: &str = "Running";
        pub const BUILD_FAILED: &str = "Failed";
        pub const OPERATOR_INSTALLED: &str = "Succeeded";
    }

    pub mod conditions {
        pub const READY_TYPE: &str = "Ready";
        pub const READY_STATUS: &str = "True";
    }
}

pub mod properties {
    pub const RESOURCE_PREFIX: &str = "resource::";
    pub const RESOURCE_WITH_DESTINATION_PREFIX: &str = "resource-with-destination::";
    pub const SECRET_PREFIX: &str = "secret::";
    pub const DESTINATION_SEPARATOR: char = '|';

    /// Mount directory used when a resource path has no directory portion.
    pub const RESOURCE_MOUNT_ROOT: &str = "/resources";
}

pub mod timeouts {
    pub const IMAGE_STREAM_INSTALL: &str = "imagestream.install.timeout";
    pub const OPERATOR_INSTALL: &str = "operator.install.timeout";
}

pub const DEFAULT_CLI_PROGRAM: &str = "oc";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_BUILD_OUTPUT_DIRECTORY: &str = "target";

pub const NAMESPACE_PREFIX: &str = "ts-";
pub const NAMESPACE_SUFFIX_LENGTH: usize = 10;
pub const NAMESPACE_CREATION_ATTEMPTS: usize = 5;
pub const SCENARIO_ID_LENGTH: usize = 8;
