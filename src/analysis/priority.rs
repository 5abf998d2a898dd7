//! Follow-up priority ordering for staff check-ins

use crate::data::MemberId;
use crate::graph::CommunityGraph;
use crate::topology::{DecompositionResult, FiltrationResult};
use std::collections::HashSet;

const BASE_PRIORITY: f32 = 50.0;
const ISOLATION_RISK_BONUS: f32 = 30.0;
const FRAGILE_GROUP_BONUS: f32 = 20.0;
const LOW_RATING_BONUS: f32 = 25.0;
const FOLLOW_UP_BONUS: f32 = 15.0;
const BRIDGE_BONUS: f32 = 5.0;
const STABLE_GROUP_DISCOUNT: f32 = 10.0;

/// Ratings at or below this (when present) count as low
pub const LOW_RATING: u8 = 2;

/// Score every member and sort highest priority first.
///
/// Ties keep insertion order.
pub fn priority_order(
    graph: &CommunityGraph,
    decomposition: &DecompositionResult,
    filtration: &FiltrationResult,
) -> Vec<(MemberId, f32)> {
    let isolated: HashSet<MemberId> = decomposition.isolation_risk.iter().copied().collect();
    let bridges: HashSet<MemberId> = decomposition.bridges.iter().copied().collect();
    let fragile: HashSet<MemberId> = filtration.fragile_groups.iter().flatten().copied().collect();
    let stable: HashSet<MemberId> = filtration.stable_groups.iter().flatten().copied().collect();

    let mut priorities: Vec<(MemberId, f32)> = graph
        .members()
        .iter()
        .map(|m| {
            let mut priority = BASE_PRIORITY;
            if isolated.contains(&m.id) {
                priority += ISOLATION_RISK_BONUS;
            }
            if fragile.contains(&m.id) {
                priority += FRAGILE_GROUP_BONUS;
            }
            if matches!(m.last_rating, Some(r) if r > 0 && r <= LOW_RATING) {
                priority += LOW_RATING_BONUS;
            }
            if m.follow_up_needed {
                priority += FOLLOW_UP_BONUS;
            }
            if bridges.contains(&m.id) {
                priority += BRIDGE_BONUS;
            }
            if stable.contains(&m.id) {
                priority -= STABLE_GROUP_DISCOUNT;
            }
            (m.id, priority)
        })
        .collect();

    priorities.sort_by(|a, b| b.1.total_cmp(&a.1));
    priorities
}
