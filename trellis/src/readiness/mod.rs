//! Fixed-interval polling of cluster state.
//!
//! Each wait repeatedly evaluates a probe until it reports `true` or the
//! timeout expires. Probe failures count as "not yet"; the last one is
//! reported if the wait times out.

mod error;

use std::{fmt, future::Future, time::Duration};

use kube::api::DynamicObject;
use serde_json::Value;
use tokio::time::Instant;
use trellis_base::consts::{self, k8s::phases};

pub use self::error::Error;
use crate::ext::DynamicObjectExt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self { timeout: consts::DEFAULT_TIMEOUT, interval: consts::DEFAULT_POLL_INTERVAL }
    }
}

impl PollSettings {
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Polls `probe` until it yields `Ok(true)`.
///
/// # Errors
///
/// Returns [`Error::Timeout`] when the probe has not succeeded within
/// `settings.timeout`.
pub async fn poll_until<F, Fut, E>(
    what: impl Into<String>,
    settings: PollSettings,
    mut probe: F,
) -> Result<(), Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: fmt::Display,
{
    let what = what.into();
    // `None` when the timeout is too large to represent; such a wait never expires.
    let deadline = Instant::now().checked_add(settings.timeout);
    let mut last_error = None;

    loop {
        match probe().await {
            Ok(true) => return Ok(()),
            Ok(false) => tracing::debug!("Still waiting for {what}"),
            Err(err) => {
                tracing::debug!("Probe for {what} failed, error: {err}");
                last_error = Some(err.to_string());
            }
        }

        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return error::TimeoutSnafu { what, timeout: settings.timeout, last_error }
                        .fail();
                }
                settings.interval.min(deadline - now)
            }
            None => settings.interval,
        };
        tokio::time::sleep(pause).await;
    }
}

/// Observed readiness of a resource with status conditions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadinessState {
    NotFound,
    NoStatus,
    NoConditions,
    NotReady,
    Ready,
}

impl ReadinessState {
    pub fn of(object: Option<&DynamicObject>) -> Self {
        let Some(object) = object else {
            return Self::NotFound;
        };
        let Some(status) = object.field(&["status"]).filter(|status| !status.is_null()) else {
            return Self::NoStatus;
        };
        match status.get("conditions").and_then(Value::as_array) {
            None => Self::NoConditions,
            Some(conditions) if conditions.is_empty() => Self::NoConditions,
            Some(_) if object.has_ready_condition() => Self::Ready,
            Some(_) => Self::NotReady,
        }
    }

    pub const fn is_ready(self) -> bool { matches!(self, Self::Ready) }
}

/// The image stream has been imported and carries at least one tag.
pub fn has_image_stream_tags(image_stream: Option<&DynamicObject>) -> bool {
    image_stream
        .and_then(|object| object.field(&["status", "tags"]))
        .and_then(Value::as_array)
        .is_some_and(|tags| !tags.is_empty())
}

/// Name of the cluster service version a subscription installed, if any.
pub fn installed_csv(subscription: Option<&DynamicObject>) -> Option<&str> {
    subscription
        .and_then(|object| object.str_field(&["status", "installedCSV"]))
        .filter(|csv| !csv.is_empty())
}

pub fn is_csv_succeeded(csv: Option<&DynamicObject>) -> bool {
    csv.and_then(|object| object.phase()) == Some(phases::OPERATOR_INSTALLED)
}

pub fn is_build_failed(build: &DynamicObject) -> bool {
    build.phase() == Some(phases::BUILD_FAILED)
}
