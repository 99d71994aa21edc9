//! Migration plan computation.
//!
//! A plan is the ordered list of units a single run will drive, derived from
//! the current marker, the requested target, the direction and the full set of
//! known versions. It is recomputed on every run and never persisted.

use crate::error::{CoreError, CoreResult};
use crate::version::{Direction, Target, Version};

/// One unit invocation inside a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Unit to invoke
    pub version: Version,

    /// Mode to invoke it in
    pub direction: Direction,

    /// Marker value to persist once the unit reports success
    pub record_after: Version,
}

/// Ordered work list for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Direction of every step
    pub direction: Direction,

    /// Marker value the plan was computed from
    pub current: Version,

    /// Requested target
    pub target: Target,

    /// Steps in execution order
    pub steps: Vec<Step>,
}

/// Reject a target on the wrong side of `current` for `direction`.
///
/// Runs before any unit is discovered, so range errors never surface mid-run.
pub fn check_target(direction: Direction, current: Version, target: Target) -> CoreResult<()> {
    let Target::Exact(t) = target else {
        return Ok(());
    };
    match direction {
        Direction::Up if t < current => Err(CoreError::AheadOfTarget { current, target: t }),
        Direction::Down if t > current => Err(CoreError::BehindTarget { current, target: t }),
        _ => Ok(()),
    }
}

impl Plan {
    /// Plan an upgrade: every version above `current` in ascending order, up
    /// to and including a concrete target.
    pub fn upgrade(current: Version, target: Target, versions: &[Version]) -> CoreResult<Self> {
        check_target(Direction::Up, current, target)?;

        let mut sorted = versions.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut steps = Vec::new();
        for v in sorted {
            if let Target::Exact(t) = target {
                if v > t {
                    log::debug!("Stopping upgrade: migration {} is beyond target {}", v, t);
                    break;
                }
            }
            if current >= v {
                log::debug!("Skipping migration {}: already at {}", v, current);
                continue;
            }
            steps.push(Step {
                version: v,
                direction: Direction::Up,
                record_after: v,
            });
        }

        Ok(Self {
            direction: Direction::Up,
            current,
            target,
            steps,
        })
    }

    /// Plan a downgrade: every version at or below `current` in descending
    /// order, down to but excluding a concrete target.
    ///
    /// After undoing a unit the marker records the next lower known version,
    /// or 0 when none is left.
    pub fn downgrade(current: Version, target: Target, versions: &[Version]) -> CoreResult<Self> {
        check_target(Direction::Down, current, target)?;

        let mut sorted = versions.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let mut steps = Vec::new();
        for (i, &v) in sorted.iter().enumerate() {
            if let Target::Exact(t) = target {
                if v <= t {
                    log::debug!("Stopping downgrade: migration {} is at or below target {}", v, t);
                    break;
                }
            }
            if v > current {
                log::debug!("Skipping migration {}: already below it at {}", v, current);
                continue;
            }
            let below = sorted.get(i + 1).copied().unwrap_or(Version::ZERO);
            steps.push(Step {
                version: v,
                direction: Direction::Down,
                record_after: below,
            });
        }

        Ok(Self {
            direction: Direction::Down,
            current,
            target,
            steps,
        })
    }

    /// Plan in either direction
    pub fn compute(
        direction: Direction,
        current: Version,
        target: Target,
        versions: &[Version],
    ) -> CoreResult<Self> {
        match direction {
            Direction::Up => Self::upgrade(current, target, versions),
            Direction::Down => Self::downgrade(current, target, versions),
        }
    }

    /// True when the run has nothing to do
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Marker value once every step has succeeded
    pub fn final_version(&self) -> Version {
        self.steps
            .last()
            .map_or(self.current, |step| step.record_after)
    }

    /// Versions in execution order
    pub fn versions(&self) -> Vec<Version> {
        self.steps.iter().map(|s| s.version).collect()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
