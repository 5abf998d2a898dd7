//! Strength filtration: replay relationships strongest-first and record when
//! groups of members are absorbed into larger ones

use crate::config::FiltrationParams;
use crate::data::{MemberId, Relationship};
use crate::graph::algorithms::DisjointSets;
use crate::graph::CommunityGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifetime of a merging group of members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barcode {
    /// 0 for a component
    pub dimension: u8,
    pub birth: f32,
    pub death: f32,
    /// Members of the absorbed component, in insertion order
    pub members: Vec<MemberId>,
}

impl Barcode {
    pub fn persistence(&self) -> f32 {
        self.death - self.birth
    }
}

/// Durability records partitioned by persistence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiltrationResult {
    pub barcodes: Vec<Barcode>,

    /// Persistence above twice the threshold
    pub stable_groups: Vec<Vec<MemberId>>,

    /// Persistence below half the threshold
    pub fragile_groups: Vec<Vec<MemberId>>,

    /// Everything in between
    pub unclassified_groups: Vec<Vec<MemberId>>,

    /// Strongest relationship strength (1.0 when there are none)
    pub max_strength: f32,

    /// 0.3 x max_strength
    pub persistence_threshold: f32,

    /// Range the caller asked for
    pub params: Option<FiltrationParams>,
}

/// Zero-dimensional persistence over decreasing relationship strength
#[derive(Debug, Clone, Copy, Default)]
pub struct FiltrationEngine;

impl FiltrationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Replay the graph's relationships strongest-first.
    ///
    /// Ties keep insertion order. Each merge of two distinct components
    /// records the component containing the relationship's target as
    /// absorbed, at filtration value `max_strength - strength`. Every member
    /// is present from filtration value 0, so births are 0. Components of a
    /// single member are not recorded.
    ///
    /// `params` is carried on the result; it does not discretise the
    /// filtration.
    pub fn compute(&self, graph: &CommunityGraph, params: &FiltrationParams) -> FiltrationResult {
        log::info!(
            "Computing strength filtration over {} relationships",
            graph.relationship_count()
        );
        log::debug!(
            "Requested range {}..{} in {} steps",
            params.min_strength,
            params.max_strength,
            params.steps
        );

        let members = graph.members();
        let position: HashMap<MemberId, usize> =
            members.iter().enumerate().map(|(i, m)| (m.id, i)).collect();

        let mut sorted: Vec<&Relationship> = graph.relationships().iter().collect();
        // Stable: equal strengths stay in insertion order
        sorted.sort_by(|a, b| b.strength.total_cmp(&a.strength));

        let max_strength = sorted.first().map_or(1.0, |r| r.strength);
        let mut sets = DisjointSets::new(members.len());
        let mut barcodes = Vec::new();

        for relationship in sorted {
            let (Some(&source), Some(&target)) = (
                position.get(&relationship.source),
                position.get(&relationship.target),
            ) else {
                continue;
            };

            let root_source = sets.find(source);
            let root_target = sets.find(target);
            if root_source == root_target {
                continue;
            }

            let absorbed: Vec<MemberId> = sets
                .members_of(root_target)
                .into_iter()
                .map(|i| members[i].id)
                .collect();

            if absorbed.len() > 1 {
                barcodes.push(Barcode {
                    dimension: 0,
                    birth: 0.0,
                    death: max_strength - relationship.strength,
                    members: absorbed,
                });
            }

            sets.union(root_source, root_target);
        }

        let persistence_threshold = max_strength * 0.3;
        let mut result = FiltrationResult {
            max_strength,
            persistence_threshold,
            params: Some(*params),
            ..Default::default()
        };

        for barcode in &barcodes {
            let persistence = barcode.persistence();
            if persistence > persistence_threshold * 2.0 {
                result.stable_groups.push(barcode.members.clone());
            } else if persistence < persistence_threshold * 0.5 {
                result.fragile_groups.push(barcode.members.clone());
            } else {
                result.unclassified_groups.push(barcode.members.clone());
            }
        }
        result.barcodes = barcodes;

        log::info!(
            "Filtration: {} barcodes ({} stable, {} fragile)",
            result.barcodes.len(),
            result.stable_groups.len(),
            result.fragile_groups.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Member, RelationshipType};

    fn graph(n: u32, edges: &[(u32, u32, f32)]) -> CommunityGraph {
        let mut g =
            CommunityGraph::from_members("f", (0..n).map(|i| Member::new(i, format!("m{i}"))))
                .unwrap();
        for &(s, t, w) in edges {
            g.add_relationship(Relationship::new(s, t, RelationshipType::StaffIntroduced, w))
                .unwrap();
        }
        g
    }

    #[test]
    fn empty_graph_has_no_barcodes() {
        let result = FiltrationEngine::new().compute(&graph(0, &[]), &FiltrationParams::default());
        assert!(result.barcodes.is_empty());
        assert_eq!(result.max_strength, 1.0);
    }

    #[test]
    fn singleton_merges_are_not_recorded() {
        let result = FiltrationEngine::new().compute(
            &graph(3, &[(0, 1, 5.0), (1, 2, 4.0)]),
            &FiltrationParams::default(),
        );
        assert!(result.barcodes.is_empty());
    }

    #[test]
    fn absorbed_side_is_target_component() {
        // {0,1} forms at 10.0, {2,3} at 9.0, then 3-1 (target side {0,1}) at 1.0
        let g = graph(4, &[(0, 1, 10.0), (2, 3, 9.0), (3, 1, 1.0)]);
        let result = FiltrationEngine::new().compute(&g, &FiltrationParams::default());

        assert_eq!(result.barcodes.len(), 1);
        let barcode = &result.barcodes[0];
        assert_eq!(barcode.members, vec![0, 1]);
        assert_eq!(barcode.birth, 0.0);
        assert_eq!(barcode.death, 9.0);
        // threshold 3.0: persistence 9 > 6 is stable
        assert_eq!(result.stable_groups, vec![vec![0, 1]]);
        assert!(result.fragile_groups.is_empty());
    }

    #[test]
    fn classification_bands() {
        // max 10, threshold 3: fragile < 1.5, stable > 6
        let g = graph(
            8,
            &[
                (0, 1, 10.0),
                (2, 3, 10.0),
                (4, 5, 10.0),
                (6, 7, 10.0),
                (0, 2, 9.0),
                (0, 4, 6.0),
                (0, 6, 2.0),
            ],
        );
        let result = FiltrationEngine::new().compute(&g, &FiltrationParams::default());

        let deaths: Vec<f32> = result.barcodes.iter().map(|b| b.death).collect();
        assert_eq!(deaths, vec![1.0, 4.0, 8.0]);
        assert_eq!(result.fragile_groups, vec![vec![2, 3]]);
        assert_eq!(result.unclassified_groups, vec![vec![4, 5]]);
        assert_eq!(result.stable_groups, vec![vec![6, 7]]);
    }

    #[test]
    fn equal_strengths_merge_in_insertion_order() {
        let g = graph(4, &[(0, 1, 3.0), (2, 3, 3.0), (1, 2, 3.0), (0, 3, 3.0)]);
        let first = FiltrationEngine::new().compute(&g, &FiltrationParams::default());
        let second = FiltrationEngine::new().compute(&g, &FiltrationParams::default());

        assert_eq!(first, second);
        assert_eq!(first.barcodes.len(), 1);
        assert_eq!(first.barcodes[0].members, vec![2, 3]);
        assert_eq!(first.barcodes[0].death, 0.0);
    }
}
