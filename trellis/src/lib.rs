//! Trellis provisions throwaway OpenShift namespaces and deploys the services
//! of a test scenario into them.
//!
//! The [`orchestrator::Orchestrator`] is the entry point: it owns the active
//! [`namespace::Namespace`] and the scenario id labelling everything created
//! during one run, and exposes the operations a test needs (applying
//! enriched templates, scaling, exposing, collecting logs, installing
//! operators, tearing everything down).

pub mod cli;
pub mod cluster;
pub mod command;
pub mod config;
pub mod ext;
pub mod manifest;
pub mod namespace;
pub mod orchestrator;
pub mod readiness;
pub mod resolver;
pub mod ui;

#[cfg(test)]
mod testing;

mod shadow {
    #![allow(clippy::needless_raw_string_hashes)]
    use shadow_rs::shadow;
    shadow!(build);

    pub use self::build::*;
}
