//! Multi-factor relationship scoring between pairs of members

use crate::data::{Member, RelationshipType};
use std::collections::BTreeSet;

/// Strength at or above which a relationship also enters the strong adjacency
pub const STRONG_TIE_THRESHOLD: f32 = 2.0;

pub const SHARED_COURSE_WEIGHT: f32 = 2.0;
pub const SHARED_INTEREST_WEIGHT: f32 = 1.5;
pub const ROOMMATE_WEIGHT: f32 = 5.0;
pub const FLOOR_PROXIMITY_WEIGHT: f32 = 1.0;
pub const SHARED_SUBGROUP_WEIGHT: f32 = 0.5;

/// Overlap below this many whole hours contributes nothing
pub const MIN_OVERLAP_HOURS: u32 = 2;
/// Cap on the schedule-overlap contribution
pub const MAX_OVERLAP_CONTRIBUTION: f32 = 2.0;
/// Rooms whose numbers differ by at most this much are on the same wing
pub const FLOOR_PROXIMITY_DISTANCE: i32 = 5;

/// Accumulated evidence for a relationship between two members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairScore {
    /// Sum of every fired contribution, including shared subgroups
    pub total: f32,

    /// Typed contributions that fired, in precedence order
    pub kinds: Vec<RelationshipType>,

    /// Subgroups both members belong to
    pub shared_subgroups: BTreeSet<String>,
}

impl PairScore {
    /// The first typed contribution that fired
    pub fn primary_kind(&self) -> Option<RelationshipType> {
        self.kinds.first().copied()
    }

    /// Whether this pair becomes a relationship at `min_strength`.
    ///
    /// Shared subgroups add strength but cannot create an edge alone.
    pub fn qualifies(&self, min_strength: f32) -> bool {
        !self.kinds.is_empty() && self.total >= min_strength
    }
}

/// Score every factor for a pair of members
pub fn score_pair(a: &Member, b: &Member) -> PairScore {
    let mut score = PairScore::default();

    let courses = shared_course_count(a, b);
    if courses > 0 {
        score.total += courses as f32 * SHARED_COURSE_WEIGHT;
        score.kinds.push(RelationshipType::SharedCourse);
    }

    let hours = schedule_overlap_hours(a, b);
    if hours >= MIN_OVERLAP_HOURS {
        score.total += (hours as f32 / 5.0).min(MAX_OVERLAP_CONTRIBUTION);
        score.kinds.push(RelationshipType::ScheduleOverlap);
    }

    let interests = shared_interest_count(a, b);
    if interests > 0 {
        score.total += interests as f32 * SHARED_INTEREST_WEIGHT;
        score.kinds.push(RelationshipType::SharedInterest);
    }

    if are_roommates(a, b) {
        score.total += ROOMMATE_WEIGHT;
        score.kinds.push(RelationshipType::Roommate);
    }

    if are_floor_neighbors(&a.room, &b.room) {
        score.total += FLOOR_PROXIMITY_WEIGHT;
        score.kinds.push(RelationshipType::FloorProximity);
    }

    score.shared_subgroups = a.subgroups.intersection(&b.subgroups).cloned().collect();
    score.total += score.shared_subgroups.len() as f32 * SHARED_SUBGROUP_WEIGHT;

    score
}

/// Number of matching course pairs between the two course lists
pub fn shared_course_count(a: &Member, b: &Member) -> usize {
    a.courses
        .iter()
        .map(|c| b.courses.iter().filter(|other| *other == c).count())
        .sum()
}

/// Whole hours of overlap summed over every pair of free blocks
pub fn schedule_overlap_hours(a: &Member, b: &Member) -> u32 {
    let minutes: u32 = a
        .free_blocks
        .iter()
        .flat_map(|x| b.free_blocks.iter().map(move |y| x.overlap_minutes(y) as u32))
        .sum();
    minutes / 60
}

pub fn shared_interest_count(a: &Member, b: &Member) -> usize {
    a.interests.intersection(&b.interests).count()
}

/// Same, non-empty room identifier
pub fn are_roommates(a: &Member, b: &Member) -> bool {
    !a.room.is_empty() && a.room == b.room
}

/// Distinct rooms whose numbers are within the proximity distance.
///
/// Rooms without a parseable number are never neighbours.
pub fn are_floor_neighbors(room_a: &str, room_b: &str) -> bool {
    if room_a == room_b {
        return false;
    }
    match (room_number(room_a), room_number(room_b)) {
        (Some(x), Some(y)) => (x - y).abs() <= FLOOR_PROXIMITY_DISTANCE,
        _ => false,
    }
}

/// Leading integer in the first three characters of a room identifier.
///
/// "214B" gives 214, " 12" gives 12, "B214" and "" give None.
pub fn room_number(room: &str) -> Option<i32> {
    let prefix: String = room.chars().take(3).collect();
    let trimmed = prefix.trim_start();

    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i32>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TimeBlock;

    #[test]
    fn room_numbers() {
        assert_eq!(room_number("214"), Some(214));
        assert_eq!(room_number("214B"), Some(214));
        assert_eq!(room_number("3021"), Some(302));
        assert_eq!(room_number(" 12"), Some(12));
        assert_eq!(room_number("B214"), None);
        assert_eq!(room_number(""), None);
        assert_eq!(room_number("East"), None);
    }

    #[test]
    fn malformed_rooms_are_not_adjacent() {
        assert!(!are_floor_neighbors("Annex", "214"));
        assert!(!are_floor_neighbors("", ""));
        assert!(are_floor_neighbors("210", "214"));
        assert!(!are_floor_neighbors("210", "216"));
    }

    #[test]
    fn roommates_score_exactly_five() {
        let a = Member::new(0, "a").with_room("Annex-A");
        let b = Member::new(1, "b").with_room("Annex-A");
        let score = score_pair(&a, &b);
        assert_eq!(score.total, 5.0);
        assert_eq!(score.kinds, vec![RelationshipType::Roommate]);
    }

    #[test]
    fn numeric_roommates_skip_floor_proximity() {
        let a = Member::new(0, "a").with_room("214");
        let b = Member::new(1, "b").with_room("214");
        let score = score_pair(&a, &b);
        assert_eq!(score.total, 5.0);
        assert_eq!(score.primary_kind(), Some(RelationshipType::Roommate));
    }

    #[test]
    fn empty_rooms_are_not_roommates() {
        let a = Member::new(0, "a");
        let b = Member::new(1, "b");
        assert!(!are_roommates(&a, &b));
        assert!(score_pair(&a, &b).kinds.is_empty());
    }

    #[test]
    fn subgroups_alone_never_qualify() {
        let a = Member::new(0, "a")
            .with_subgroup("x")
            .with_subgroup("y")
            .with_subgroup("z");
        let b = a.clone();
        let score = score_pair(&a, &b);
        assert_eq!(score.total, 1.5);
        assert!(!score.qualifies(1.0));
        assert!(!score.qualifies(0.0));
    }

    #[test]
    fn schedule_overlap_gate_and_cap() {
        let a = Member::new(0, "a").with_free_block(TimeBlock::new(0, 0, 90));
        let b = Member::new(1, "b").with_free_block(TimeBlock::new(0, 0, 90));
        // 90 minutes is one whole hour: below the gate
        assert_eq!(schedule_overlap_hours(&a, &b), 1);
        assert!(score_pair(&a, &b).kinds.is_empty());

        let a = Member::new(0, "a").with_free_block(TimeBlock::new(0, 0, 1440));
        let b = Member::new(1, "b").with_free_block(TimeBlock::new(0, 0, 1440));
        let score = score_pair(&a, &b);
        assert_eq!(score.kinds, vec![RelationshipType::ScheduleOverlap]);
        assert_eq!(score.total, MAX_OVERLAP_CONTRIBUTION);
    }

    #[test]
    fn inverted_blocks_add_no_overlap() {
        let a = Member::new(0, "a").with_free_block(TimeBlock::new(1, 600, 500));
        let b = Member::new(1, "b").with_free_block(TimeBlock::new(1, 400, 700));
        assert_eq!(schedule_overlap_hours(&a, &b), 0);
        assert!(score_pair(&a, &b).kinds.is_empty());
    }

    #[test]
    fn precedence_picks_first_fired_type() {
        let a = Member::new(0, "a")
            .with_course("CS1")
            .with_interest("chess")
            .with_room("Annex-A");
        let b = a.clone();
        let score = score_pair(&a, &b);
        assert_eq!(score.primary_kind(), Some(RelationshipType::SharedCourse));
        assert_eq!(score.total, 2.0 + 1.5 + 5.0);
    }

    #[test]
    fn duplicate_course_entries_count_per_pair() {
        let a = Member::new(0, "a").with_course("CS1").with_course("CS1");
        let b = Member::new(1, "b").with_course("CS1");
        assert_eq!(shared_course_count(&a, &b), 2);
    }
}
