use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};

/// A workload under test: its name, the configuration properties handed to
/// it, and per-operation timeout overrides in seconds.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,

    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde_as(as = "BTreeMap<_, DurationSeconds<u64>>")]
    #[serde(default)]
    pub timeouts: BTreeMap<String, Duration>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), ..Self::default() } }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _previous = self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, key: impl Into<String>, timeout: Duration) -> Self {
        let _previous = self.timeouts.insert(key.into(), timeout);
        self
    }

    pub fn duration(&self, key: &str) -> Option<Duration> { self.timeouts.get(key).copied() }

    pub fn timeout_or(&self, key: &str, fallback: Duration) -> Duration {
        self.duration(key).unwrap_or(fallback)
    }
}
