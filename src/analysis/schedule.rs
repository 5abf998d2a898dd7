//! Event time search over a weekly grid of hourly slots

use crate::data::{MemberId, TimeBlock};
use crate::graph::CommunityGraph;
use serde::{Deserialize, Serialize};

/// First and last (exclusive) candidate hours of each day
pub const FIRST_HOUR: u16 = 8;
pub const LAST_HOUR: u16 = 22;

const ISOLATED_BOUNDARY: f32 = 0.7;
const ISOLATED_BONUS: f32 = 2.0;
const BRIDGE_BONUS: f32 = 1.5;

/// A candidate event slot and who could attend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotScore {
    pub slot: TimeBlock,
    pub available_count: usize,
    /// Fraction of the community available
    pub coverage: f32,
    /// Bonus for isolated and bridge members being available
    pub topology_score: f32,
    pub available_members: Vec<MemberId>,
}

impl TimeSlotScore {
    /// Ranking key: coverage x 100 + topology bonus
    pub fn combined(&self) -> f32 {
        self.coverage * 100.0 + self.topology_score
    }
}

/// Source of ranked event times for an analysis
pub trait EventScheduler {
    fn rank_slots(&self, graph: &CommunityGraph) -> Vec<TimeSlotScore>;
}

/// Brute-force search over hourly slots, 08:00-22:00, Monday to Sunday
#[derive(Debug, Clone, Copy)]
pub struct WeeklyGridScheduler {
    pub top_n: usize,
    pub min_attendance: usize,
}

impl WeeklyGridScheduler {
    pub fn new(top_n: usize, min_attendance: usize) -> Self {
        Self {
            top_n,
            min_attendance,
        }
    }
}

impl Default for WeeklyGridScheduler {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

impl EventScheduler for WeeklyGridScheduler {
    fn rank_slots(&self, graph: &CommunityGraph) -> Vec<TimeSlotScore> {
        let mut scores = Vec::new();
        if graph.is_empty() {
            return scores;
        }

        for day in 0..7u8 {
            for hour in FIRST_HOUR..LAST_HOUR {
                let slot = TimeBlock::hour(day, hour);

                let available: Vec<_> = graph
                    .members()
                    .iter()
                    .filter(|m| m.free_blocks.iter().any(|free| free.overlaps(&slot)))
                    .collect();

                if available.len() < self.min_attendance {
                    continue;
                }

                let topology_score = available
                    .iter()
                    .map(|m| {
                        let mut bonus = 0.0;
                        if m.boundary_score > ISOLATED_BOUNDARY {
                            bonus += ISOLATED_BONUS;
                        }
                        if m.is_bridge {
                            bonus += BRIDGE_BONUS;
                        }
                        bonus
                    })
                    .sum();

                scores.push(TimeSlotScore {
                    slot,
                    available_count: available.len(),
                    coverage: available.len() as f32 / graph.member_count() as f32,
                    topology_score,
                    available_members: available.iter().map(|m| m.id).collect(),
                });
            }
        }

        scores.sort_by(|a, b| b.combined().total_cmp(&a.combined()));
        scores.truncate(self.top_n);

        log::debug!("Ranked {} event slots", scores.len());

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Member;

    fn members_free_at(blocks: &[TimeBlock], count: u32, offset: u32) -> Vec<Member> {
        (0..count)
            .map(|i| {
                let mut m = Member::new(offset + i, format!("m{}", offset + i));
                m.free_blocks = blocks.to_vec();
                m
            })
            .collect()
    }

    #[test]
    fn low_attendance_slots_are_skipped() {
        let g = CommunityGraph::from_members(
            "s",
            members_free_at(&[TimeBlock::hour(0, 10)], 4, 0),
        )
        .unwrap();
        assert!(WeeklyGridScheduler::default().rank_slots(&g).is_empty());
    }

    #[test]
    fn best_covered_slot_ranks_first() {
        let mut members = members_free_at(&[TimeBlock::hour(0, 10), TimeBlock::hour(2, 18)], 5, 0);
        members.extend(members_free_at(&[TimeBlock::hour(2, 18)], 3, 5));
        let g = CommunityGraph::from_members("s", members).unwrap();

        let slots = WeeklyGridScheduler::default().rank_slots(&g);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot, TimeBlock::hour(2, 18));
        assert_eq!(slots[0].available_count, 8);
        assert_eq!(slots[0].coverage, 1.0);
        assert_eq!(slots[1].slot, TimeBlock::hour(0, 10));
    }

    #[test]
    fn topology_bonus_counts_isolated_and_bridges() {
        let mut members = members_free_at(&[TimeBlock::hour(1, 12)], 5, 0);
        members[0].boundary_score = 1.0;
        members[1].is_bridge = true;
        let g = CommunityGraph::from_members("s", members).unwrap();

        let slots = WeeklyGridScheduler::new(1, 5).rank_slots(&g);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].topology_score, 3.5);
    }

    #[test]
    fn results_are_truncated() {
        let blocks: Vec<TimeBlock> = (8..22).map(|h| TimeBlock::hour(3, h)).collect();
        let g = CommunityGraph::from_members("s", members_free_at(&blocks, 5, 0)).unwrap();
        assert_eq!(WeeklyGridScheduler::new(3, 5).rank_slots(&g).len(), 3);
    }
}
