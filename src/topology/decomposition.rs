//! Two-subgroup decomposition: compare a community against two subgroups
//! and their overlap

use crate::config::Config;
use crate::data::MemberId;
use crate::error::Result;
use crate::graph::{CommunityGraph, OverlapGraph};
use crate::topology::health::{HealthFormula, HealthInputs};
use crate::topology::introductions::suggest_introductions;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Invariants of the two subgroups and their overlap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitInvariants {
    pub subgroup_a: String,
    pub subgroup_b: String,

    pub components_a: usize,
    pub cycles_a: usize,
    pub components_b: usize,
    pub cycles_b: usize,

    /// Original ids of members in both subgroups
    pub overlap_members: Vec<MemberId>,
    pub components_overlap: usize,
    pub cycles_overlap: usize,

    /// Estimated overlap components stitched together only through A or B.
    /// An approximation, not an exact kernel dimension.
    pub kernel_i0: usize,

    /// Estimated cycles of A and B not accounted for by the overlap.
    /// An approximation, not an exact cokernel dimension.
    pub cokernel_i1: usize,
}

/// Outcome of a decomposition pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionResult {
    /// Present for two-subgroup analysis, absent for whole-graph analysis
    pub split: Option<SplitInvariants>,

    /// Components of the whole graph
    pub components: usize,

    /// Independent cycles of the whole graph
    pub cycles: usize,

    pub is_cohesive: bool,

    pub health: f32,
    pub health_formula: HealthFormula,

    pub isolation_risk: Vec<MemberId>,
    pub bridges: Vec<MemberId>,

    /// Representative cycles (not a basis)
    pub holes: Vec<Vec<MemberId>>,

    pub suggested_introductions: Vec<(MemberId, MemberId)>,

    pub diagnosis: String,
}

/// Estimate of overlap components merged by paths that lie only in A or B
pub fn merged_component_estimate(
    components_overlap: usize,
    components_a: usize,
    components_b: usize,
) -> usize {
    if components_overlap <= 1 {
        return 0;
    }
    components_overlap.saturating_sub(components_a.max(components_b))
}

/// Estimate of cycles in A and B that the overlap does not account for
pub fn novel_cycle_estimate(cycles_a: usize, cycles_b: usize, cycles_overlap: usize) -> usize {
    let total = cycles_a + cycles_b;
    total - cycles_overlap.min(total)
}

/// Runs the decomposition over a community graph
#[derive(Debug, Clone)]
pub struct DecompositionEngine {
    config: Config,
}

impl DecompositionEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Decompose `graph` along two subgroups.
    ///
    /// Uses the graph's current relationships and derived scores; run
    /// `CommunityGraph::recompute` first.
    pub fn compute(
        &self,
        graph: &CommunityGraph,
        subgroup_a: &str,
        subgroup_b: &str,
    ) -> Result<DecompositionResult> {
        log::info!(
            "Decomposing community {} along {} / {}",
            graph.community_id,
            subgroup_a,
            subgroup_b
        );

        let graph_a = graph.induced_subgraph(subgroup_a);
        let graph_b = graph.induced_subgraph(subgroup_b);
        let overlap = OverlapGraph::compute(graph, subgroup_a, subgroup_b);

        let components_a = graph_a.component_count();
        let components_b = graph_b.component_count();
        let components_overlap = overlap.component_count();
        let cycles_a = graph_a.cycle_count();
        let cycles_b = graph_b.cycle_count();
        let cycles_overlap = overlap.cycle_count();

        let split = SplitInvariants {
            subgroup_a: subgroup_a.to_string(),
            subgroup_b: subgroup_b.to_string(),
            components_a,
            cycles_a,
            components_b,
            cycles_b,
            overlap_members: overlap.original_ids(),
            components_overlap,
            cycles_overlap,
            kernel_i0: merged_component_estimate(components_overlap, components_a, components_b),
            cokernel_i1: novel_cycle_estimate(cycles_a, cycles_b, cycles_overlap),
        };

        let components = graph.component_count();
        let cycles = graph.cycle_count();

        let isolation_risk = graph.boundary_members(self.config.boundary_threshold);
        let bridges = graph.bridge_members();
        let holes = graph.find_cycles();
        let suggested_introductions = suggest_introductions(
            graph,
            &holes,
            &isolation_risk,
            self.config.introduction_boundary_cap,
        )?;

        let health_formula = HealthFormula::Penalty;
        let health = health_formula.score(&HealthInputs {
            components,
            cycles,
            members: graph.member_count(),
            isolation_risk: isolation_risk.len(),
            bridges: bridges.len(),
        });

        let mut result = DecompositionResult {
            split: Some(split),
            components,
            cycles,
            // One cycle is tolerated as healthy structure
            is_cohesive: cycles <= 1,
            health,
            health_formula,
            isolation_risk,
            bridges,
            holes,
            suggested_introductions,
            diagnosis: String::new(),
        };
        result.diagnosis = split_diagnosis(&result);

        log::info!(
            "Decomposition health {:.1}, {} holes, {} introductions",
            result.health,
            result.holes.len(),
            result.suggested_introductions.len()
        );

        Ok(result)
    }

    /// Whole-graph analysis: recompute relationships and scores, then report
    /// invariants without a subgroup split
    pub fn compute_full(&self, graph: &mut CommunityGraph) -> Result<DecompositionResult> {
        log::info!(
            "Analyzing community {} ({} members)",
            graph.community_id,
            graph.member_count()
        );

        graph.recompute(self.config.min_strength)?;

        let components = graph.component_count();
        let cycles = graph.cycle_count();

        let isolation_risk = graph.boundary_members(self.config.boundary_threshold);
        let bridges = graph.bridge_members();
        let holes = graph.find_cycles();
        let suggested_introductions = suggest_introductions(
            graph,
            &holes,
            &isolation_risk,
            self.config.introduction_boundary_cap,
        )?;

        let health_formula = HealthFormula::Weighted;
        let health = health_formula.score(&HealthInputs {
            components,
            cycles,
            members: graph.member_count(),
            isolation_risk: isolation_risk.len(),
            bridges: bridges.len(),
        });

        let mut result = DecompositionResult {
            split: None,
            components,
            cycles,
            is_cohesive: cycles <= graph.member_count() / 10,
            health,
            health_formula,
            isolation_risk,
            bridges,
            holes,
            suggested_introductions,
            diagnosis: String::new(),
        };
        result.diagnosis = full_diagnosis(graph, &result);

        log::info!(
            "Community health {:.1}: {} components, {} cycles",
            result.health,
            result.components,
            result.cycles
        );

        Ok(result)
    }
}

fn split_diagnosis(result: &DecompositionResult) -> String {
    let mut out = String::new();

    if let Some(split) = &result.split {
        let _ = writeln!(out, "=== Two-subgroup decomposition ===");
        let _ = writeln!(
            out,
            "Subgroup A ({}): components={}, cycles={}",
            split.subgroup_a, split.components_a, split.cycles_a
        );
        let _ = writeln!(
            out,
            "Subgroup B ({}): components={}, cycles={}",
            split.subgroup_b, split.components_b, split.cycles_b
        );
        let _ = writeln!(
            out,
            "Overlap: {} members, components={}, cycles={}",
            split.overlap_members.len(),
            split.components_overlap,
            split.cycles_overlap
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Estimates (approximate):");
        let _ = writeln!(
            out,
            "  merged components (kernel_i0) = {}",
            split.kernel_i0
        );
        let _ = writeln!(out, "  novel cycles (cokernel_i1) = {}", split.cokernel_i1);
    }
    let _ = writeln!(out, "  full-graph cycles = {}", result.cycles);
    let _ = writeln!(out);

    if result.cycles > 0 {
        let _ = writeln!(out, "Structural holes detected. Community has gaps.");
        let _ = writeln!(
            out,
            "Recommended: {} introductions to fill holes.",
            result.suggested_introductions.len()
        );
    } else {
        let _ = writeln!(out, "Community is simply connected. No structural holes.");
    }

    let _ = writeln!(
        out,
        "{} members at isolation risk, {} bridge members.",
        result.isolation_risk.len(),
        result.bridges.len()
    );

    out
}

fn full_diagnosis(graph: &CommunityGraph, result: &DecompositionResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Community: {} members, {} relationships",
        graph.member_count(),
        graph.relationship_count()
    );
    let _ = writeln!(out, "Components: {}", result.components);
    let _ = writeln!(out, "Structural holes: {}", result.cycles);
    let _ = writeln!(out, "Isolation risk: {} members", result.isolation_risk.len());
    let _ = writeln!(out, "Bridge members: {}", result.bridges.len());
    let _ = writeln!(out, "Health score: {:.1}/100", result.health);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Member;

    #[test]
    fn merged_estimate() {
        assert_eq!(merged_component_estimate(0, 3, 3), 0);
        assert_eq!(merged_component_estimate(1, 0, 0), 0);
        assert_eq!(merged_component_estimate(4, 1, 2), 2);
        assert_eq!(merged_component_estimate(2, 5, 1), 0);
    }

    #[test]
    fn novel_cycle_estimate_never_negative() {
        assert_eq!(novel_cycle_estimate(2, 1, 0), 3);
        assert_eq!(novel_cycle_estimate(2, 1, 2), 1);
        assert_eq!(novel_cycle_estimate(1, 0, 5), 0);
    }

    fn campus() -> CommunityGraph {
        CommunityGraph::from_members(
            "campus",
            vec![
                Member::new(0, "a").with_subgroup("stem").with_course("CS1"),
                Member::new(1, "b")
                    .with_subgroup("stem")
                    .with_subgroup("band")
                    .with_course("CS1")
                    .with_interest("jazz"),
                Member::new(2, "c").with_subgroup("band").with_interest("jazz").with_course("CS1"),
                Member::new(3, "d").with_subgroup("band"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn split_invariants_for_triangle() {
        let mut g = campus();
        g.recompute(0.5).unwrap();
        // a-b, a-c, b-c share CS1; d has nothing
        assert_eq!(g.relationship_count(), 3);

        let engine = DecompositionEngine::new(&Config::default());
        let result = engine.compute(&g, "stem", "band").unwrap();
        let split = result.split.as_ref().unwrap();

        assert_eq!((split.components_a, split.cycles_a), (1, 0));
        assert_eq!((split.components_b, split.cycles_b), (2, 0));
        assert_eq!(split.overlap_members, vec![1]);
        assert_eq!((split.components_overlap, split.cycles_overlap), (1, 0));
        assert_eq!(split.kernel_i0, 0);
        assert_eq!(split.cokernel_i1, 0);

        assert_eq!(result.components, 2);
        assert_eq!(result.cycles, 1);
        assert!(result.is_cohesive);
        assert_eq!(result.isolation_risk, vec![3]);
        assert_eq!(result.health_formula, HealthFormula::Penalty);
        assert_eq!(result.holes.len(), 1);
        assert!(result.diagnosis.contains("Structural holes detected"));
        assert!(result.diagnosis.contains("Subgroup A (stem): components=1, cycles=0"));
    }

    #[test]
    fn compute_full_uses_weighted_formula() {
        let mut g = campus();
        let engine = DecompositionEngine::new(&Config::default());
        let result = engine.compute_full(&mut g).unwrap();

        assert!(result.split.is_none());
        assert_eq!(result.health_formula, HealthFormula::Weighted);
        assert_eq!(result.components, 2);
        assert_eq!(result.cycles, 1);
        // connectivity 80, cohesion 95, isolation 75
        assert!((result.health - (24.0 + 28.5 + 30.0)).abs() < 1e-3);
        assert!(result.diagnosis.contains("Components: 2"));
        // one cycle is more than 4 / 10 members tolerate
        assert!(!result.is_cohesive);
    }

    #[test]
    fn compute_full_tolerates_one_cycle_per_ten_members() {
        let members = (0..10).map(|i| {
            let m = Member::new(i, format!("m{i}"));
            if i < 3 {
                m.with_course("CS1")
            } else {
                m
            }
        });
        let mut g = CommunityGraph::from_members("hall", members).unwrap();
        let result = DecompositionEngine::new(&Config::default())
            .compute_full(&mut g)
            .unwrap();

        assert_eq!(result.cycles, 1);
        assert!(result.is_cohesive);
    }

    #[test]
    fn two_cycles_are_not_cohesive() {
        let mut g = CommunityGraph::from_members(
            "wings",
            (0..6).map(|i| {
                let (label, course) = if i < 3 { ("x", "CS1") } else { ("y", "BIO") };
                Member::new(i, format!("m{i}")).with_subgroup(label).with_course(course)
            }),
        )
        .unwrap();
        g.recompute(0.5).unwrap();

        let result = DecompositionEngine::new(&Config::default())
            .compute(&g, "x", "y")
            .unwrap();
        assert_eq!(result.components, 2);
        assert_eq!(result.cycles, 2);
        assert!(!result.is_cohesive);
        // one extra component; two cycles carry no hole penalty yet
        assert_eq!(result.health, 85.0);
    }

    #[test]
    fn overlap_stitched_through_one_side_raises_merged_estimate() {
        let shared = |id: u32, course: &str| {
            Member::new(id, format!("o{id}"))
                .with_subgroup("x")
                .with_subgroup("y")
                .with_course(course)
        };
        let hub = |id: u32, label: &str| {
            Member::new(id, format!("h{id}"))
                .with_subgroup(label)
                .with_course("C1")
                .with_course("C2")
                .with_course("C3")
        };
        let mut g = CommunityGraph::from_members(
            "stitched",
            vec![
                shared(1, "C1"),
                shared(2, "C2"),
                shared(3, "C3"),
                hub(10, "x"),
                hub(20, "y"),
            ],
        )
        .unwrap();
        g.recompute(0.5).unwrap();

        let result = DecompositionEngine::new(&Config::default())
            .compute(&g, "x", "y")
            .unwrap();
        let split = result.split.as_ref().unwrap();

        assert_eq!(split.overlap_members, vec![1, 2, 3]);
        assert_eq!(split.components_overlap, 3);
        assert_eq!((split.components_a, split.components_b), (1, 1));
        assert_eq!(split.kernel_i0, 2);
        assert_eq!(result.components, 1);
        assert_eq!(result.cycles, 3);
    }

    #[test]
    fn empty_graph_is_well_defined() {
        let mut g = CommunityGraph::new("empty");
        let engine = DecompositionEngine::new(&Config::default());

        let full = engine.compute_full(&mut g).unwrap();
        assert_eq!(full.components, 0);
        assert_eq!(full.cycles, 0);
        assert!(full.isolation_risk.is_empty());
        assert!(full.bridges.is_empty());

        let split = engine.compute(&g, "a", "b").unwrap();
        assert_eq!(split.health, 100.0);
        assert!(split.diagnosis.contains("simply connected"));
    }
}
