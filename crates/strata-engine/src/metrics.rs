//! Per-phase and per-run scheduler metrics.
//!
//! [`PhaseReport`] records what one phase did; [`RunReport`] collects the
//! reports of a full [`execute`](crate::AgentSystem::execute) call.

use strata_agent::AgentKind;

/// Counters for a single phase.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseReport {
    /// Agent category the phase ran.
    pub kind: AgentKind,
    /// Agents spawned.
    pub spawned: u32,
    /// Agents that finished during initialization without taking a step.
    pub failed_to_start: u32,
    /// Scheduler ticks until the population drained.
    pub ticks: u64,
    /// Total `update` calls across all agents.
    pub agent_steps: u64,
    /// Wall-clock time for the phase, in microseconds.
    pub elapsed_us: u64,
}

impl PhaseReport {
    /// An empty report for a phase that did nothing.
    pub fn skipped(kind: AgentKind) -> Self {
        Self {
            kind,
            spawned: 0,
            failed_to_start: 0,
            ticks: 0,
            agent_steps: 0,
            elapsed_us: 0,
        }
    }

    /// Agents that initialized successfully and were stepped.
    pub fn started(&self) -> u32 {
        self.spawned - self.failed_to_start
    }
}

/// Reports for every phase of a run, in phase order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// One entry per configured phase, skipped phases included.
    pub phases: Vec<PhaseReport>,
}

impl RunReport {
    /// Ticks summed over all phases.
    pub fn total_ticks(&self) -> u64 {
        self.phases.iter().map(|p| p.ticks).sum()
    }

    /// Agent steps summed over all phases.
    pub fn total_steps(&self) -> u64 {
        self.phases.iter().map(|p| p.agent_steps).sum()
    }

    /// Agents spawned across all phases.
    pub fn total_spawned(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.spawned)).sum()
    }

    /// Wall-clock time across all phases, in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.phases.iter().map(|p| p.elapsed_us).sum()
    }
}
