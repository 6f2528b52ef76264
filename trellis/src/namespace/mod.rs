//! Lifecycle of the namespace a scenario runs in.
//!
//! In ephemeral mode every scenario creates its own randomly named project and
//! deletes it afterwards. In shared mode an existing namespace is reused and
//! only the resources labelled with the scenario id are removed at teardown.

mod error;

use rand::Rng;
use snafu::ResultExt;
use trellis_base::consts::{self, k8s::labels};

pub use self::error::Error;
use crate::command::CommandRunner;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NamespaceMode {
    Ephemeral,
    Shared,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Namespace {
    name: String,
    mode: NamespaceMode,
}

impl Namespace {
    pub fn ephemeral(name: impl Into<String>) -> Self {
        Self { name: name.into(), mode: NamespaceMode::Ephemeral }
    }

    pub fn shared(name: impl Into<String>) -> Self {
        Self { name: name.into(), mode: NamespaceMode::Shared }
    }

    pub fn name(&self) -> &str { &self.name }

    pub const fn mode(&self) -> NamespaceMode { self.mode }

    pub const fn is_ephemeral(&self) -> bool { matches!(self.mode, NamespaceMode::Ephemeral) }

    /// Creates a fresh project, picking a new random name for every attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreationExhausted`] once all attempts failed.
    pub async fn create_ephemeral<R>(runner: &R) -> Result<Self, Error>
    where
        R: CommandRunner,
    {
        let mut attempt = 1;
        loop {
            let name = random_name(&mut rand::rng());
            match runner.run(["new-project", name.as_str()]).await {
                Ok(_) => {
                    tracing::info!("Created ephemeral namespace {name}");
                    return Ok(Self::ephemeral(name));
                }
                Err(err) if attempt < consts::NAMESPACE_CREATION_ATTEMPTS => {
                    tracing::warn!("Attempt {attempt} to create namespace {name} failed, error: {err}");
                    attempt += 1;
                }
                Err(err) => {
                    return Err(err).context(error::CreationExhaustedSnafu { attempts: attempt });
                }
            }
        }
    }

    /// Removes what the scenario left behind: the whole project when
    /// ephemeral, otherwise only the resources labelled with `scenario_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the CLI deletion fails.
    pub async fn teardown<R>(&self, runner: &R, scenario_id: &str) -> Result<(), Error>
    where
        R: CommandRunner,
    {
        match self.mode {
            NamespaceMode::Ephemeral => {
                tracing::info!("Deleting namespace {}", self.name);
                let _output = runner
                    .run(["delete", "project", self.name.as_str()])
                    .await
                    .with_context(|_| error::DeleteSnafu { namespace: self.name.clone() })?;
            }
            NamespaceMode::Shared => {
                tracing::info!("Deleting resources of scenario {scenario_id} in {}", self.name);
                let selector = format!("{}={scenario_id}", labels::SCENARIO_ID);
                let _output = runner
                    .run(["delete", "-n", self.name.as_str(), "all", "-l", selector.as_str()])
                    .await
                    .with_context(|_| error::DeleteLabelledSnafu {
                        namespace: self.name.clone(),
                        scenario_id: scenario_id.to_string(),
                    })?;
            }
        }
        Ok(())
    }
}

/// `length` random lowercase ASCII letters.
pub fn random_suffix<R>(rng: &mut R, length: usize) -> String
where
    R: Rng + ?Sized,
{
    (0..length).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

pub fn random_name<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    format!("{}{}", consts::NAMESPACE_PREFIX, random_suffix(rng, consts::NAMESPACE_SUFFIX_LENGTH))
}

/// Whether `name` has the shape of a generated ephemeral namespace.
pub fn is_generated_name(name: &str) -> bool {
    name.strip_prefix(consts::NAMESPACE_PREFIX).is_some_and(|suffix| {
        suffix.len() == consts::NAMESPACE_SUFFIX_LENGTH
            && suffix.bytes().all(|byte| byte.is_ascii_lowercase())
    })
}
