//! Progress hooks for orchestrated runs

use tm_core::{Plan, Step, Version};
use tm_runner::RunReport;

/// Observer notified as a run progresses. Every hook defaults to a no-op.
pub trait Reporter: Send + Sync {
    /// The plan is computed and about to run
    fn plan_ready(&self, _plan: &Plan) {}

    /// A unit is about to be invoked
    fn step_started(&self, _step: &Step) {}

    /// A unit terminated, successfully or not
    fn step_finished(&self, _report: &RunReport) {}

    /// The marker now holds `version`
    fn version_recorded(&self, _version: Version) {}
}

/// Reporter that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
