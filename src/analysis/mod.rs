//! End-to-end community analysis

pub mod priority;
pub mod schedule;

use crate::config::Config;
use crate::data::MemberId;
use crate::error::Result;
use crate::graph::CommunityGraph;
use crate::topology::{DecompositionEngine, DecompositionResult, FiltrationEngine, FiltrationResult};
use serde::{Deserialize, Serialize};

pub use priority::priority_order;
pub use schedule::{EventScheduler, TimeSlotScore, WeeklyGridScheduler};

/// Everything one analysis pass produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityAnalysis {
    pub decomposition: DecompositionResult,
    pub filtration: FiltrationResult,
    pub event_times: Vec<TimeSlotScore>,

    /// (member, priority), highest first
    pub priorities: Vec<(MemberId, f32)>,

    pub health_score: f32,
    pub isolation_count: usize,
    pub bridge_count: usize,
    pub hole_count: usize,
}

/// Runs the whole-graph decomposition, filtration, event search and
/// priority ordering in sequence
#[derive(Debug, Clone)]
pub struct CommunityAnalyzer {
    config: Config,
}

impl CommunityAnalyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze with the weekly grid scheduler built from the configuration
    pub fn analyze(&self, graph: &mut CommunityGraph) -> Result<CommunityAnalysis> {
        let scheduler =
            WeeklyGridScheduler::new(self.config.event_top_n, self.config.event_min_attendance);
        self.analyze_with(graph, &scheduler)
    }

    /// Analyze with a caller-supplied scheduler
    pub fn analyze_with(
        &self,
        graph: &mut CommunityGraph,
        scheduler: &dyn EventScheduler,
    ) -> Result<CommunityAnalysis> {
        let decomposition = DecompositionEngine::new(&self.config).compute_full(graph)?;
        let filtration = FiltrationEngine::new().compute(graph, &self.config.filtration);
        let event_times = scheduler.rank_slots(graph);
        let priorities = priority_order(graph, &decomposition, &filtration);

        log::info!(
            "Analysis complete: health {:.1}, {} at isolation risk, {} event slots",
            decomposition.health,
            decomposition.isolation_risk.len(),
            event_times.len()
        );

        Ok(CommunityAnalysis {
            health_score: decomposition.health,
            isolation_count: decomposition.isolation_risk.len(),
            bridge_count: decomposition.bridges.len(),
            hole_count: decomposition.holes.len(),
            decomposition,
            filtration,
            event_times,
            priorities,
        })
    }
}

impl Default for CommunityAnalyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
