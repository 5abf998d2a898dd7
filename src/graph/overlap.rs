//! Overlap graph: members belonging to two named subgroups at once

use crate::data::{Member, MemberId, Relationship};
use crate::graph::algorithms::{count_components, cycle_rank};
use crate::graph::CommunityGraph;
use std::collections::{BTreeMap, BTreeSet};

/// Re-indexed induced subgraph over the members of both subgroups.
///
/// Members are renumbered 0..k-1 in ascending order of their original id;
/// relationships are renumbered likewise. Built fresh per query.
#[derive(Debug, Clone, Default)]
pub struct OverlapGraph {
    pub subgroup_a: String,
    pub subgroup_b: String,

    /// Copied members carrying their new ids
    pub members: Vec<Member>,

    /// Copied relationships between overlap members, re-indexed
    pub relationships: Vec<Relationship>,

    /// Original id to new id
    pub id_map: BTreeMap<MemberId, MemberId>,
}

impl OverlapGraph {
    /// Build the overlap of `subgroup_a` and `subgroup_b` in `graph`
    pub fn compute(graph: &CommunityGraph, subgroup_a: &str, subgroup_b: &str) -> Self {
        let in_a: BTreeSet<MemberId> = graph.subgroup_members(subgroup_a).iter().copied().collect();
        let in_b: BTreeSet<MemberId> = graph.subgroup_members(subgroup_b).iter().copied().collect();

        let mut overlap = OverlapGraph {
            subgroup_a: subgroup_a.to_string(),
            subgroup_b: subgroup_b.to_string(),
            ..Default::default()
        };

        for &old_id in in_a.intersection(&in_b) {
            let Ok(member) = graph.member(old_id) else {
                continue;
            };
            let new_id = overlap.members.len() as MemberId;
            let mut copy = member.clone();
            copy.id = new_id;
            overlap.members.push(copy);
            overlap.id_map.insert(old_id, new_id);
        }

        for relationship in graph.relationships() {
            let endpoints = (
                overlap.id_map.get(&relationship.source),
                overlap.id_map.get(&relationship.target),
            );
            if let (Some(&source), Some(&target)) = endpoints {
                let mut copy = relationship.clone();
                copy.id = overlap.relationships.len() as u32;
                copy.source = source;
                copy.target = target;
                overlap.relationships.push(copy);
            }
        }

        log::debug!(
            "Overlap of {} and {}: {} members, {} relationships",
            subgroup_a,
            subgroup_b,
            overlap.members.len(),
            overlap.relationships.len()
        );

        overlap
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Original member ids, in new-id order
    pub fn original_ids(&self) -> Vec<MemberId> {
        let mut ids: Vec<(MemberId, MemberId)> =
            self.id_map.iter().map(|(&old, &new)| (new, old)).collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, old)| old).collect()
    }

    pub fn component_count(&self) -> usize {
        count_components(
            self.members.len(),
            self.relationships
                .iter()
                .map(|r| (r.source as usize, r.target as usize)),
        )
    }

    pub fn cycle_count(&self) -> usize {
        cycle_rank(
            self.relationships.len(),
            self.members.len(),
            self.component_count(),
        )
    }
}
