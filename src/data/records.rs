//! Member and relationship records

use crate::data::TimeBlock;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a community member
pub type MemberId = u32;

/// A community member (vertex of the community graph)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Member {
    /// Unique identifier within the owning graph
    pub id: MemberId,

    pub name: String,
    pub room: String,
    pub email: String,
    pub phone: String,

    /// Subgroup labels, e.g. "stem", "athletes"
    pub subgroups: BTreeSet<String>,

    /// Course codes
    pub courses: Vec<String>,

    /// When the member is in class
    pub busy_blocks: Vec<TimeBlock>,

    /// When the member is available
    pub free_blocks: Vec<TimeBlock>,

    pub interests: BTreeSet<String>,

    /// Most recent check-in rating (1-5), if any check-in happened
    pub last_rating: Option<u8>,

    /// Concerns flagged at check-in
    pub concerns: BTreeSet<String>,

    pub follow_up_needed: bool,

    // Derived state, rewritten by each analysis pass
    /// Degree normalised by the graph's maximum degree
    pub centrality: f32,

    /// 1 - centrality; high values mean isolation risk
    pub boundary_score: f32,

    /// Multi-subgroup member whose neighbours span two or more subgroups
    pub is_bridge: bool,

    /// Connected component index, None until assigned
    pub component_id: Option<usize>,
}

impl Member {
    /// Create a member with an id and name and no other attributes
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_subgroup(mut self, label: impl Into<String>) -> Self {
        self.subgroups.insert(label.into());
        self
    }

    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.courses.push(course.into());
        self
    }

    pub fn with_interest(mut self, interest: impl Into<String>) -> Self {
        self.interests.insert(interest.into());
        self
    }

    pub fn with_free_block(mut self, block: TimeBlock) -> Self {
        self.free_blocks.push(block);
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.last_rating = Some(rating);
        self
    }

    pub fn with_follow_up(mut self) -> Self {
        self.follow_up_needed = true;
        self
    }

    /// Reject schedules with blocks that are empty, inverted or out of range
    pub fn validate_schedule(&self) -> Result<()> {
        let invalid = self
            .busy_blocks
            .iter()
            .chain(&self.free_blocks)
            .find(|block| !block.is_valid());

        match invalid {
            Some(block) => Err(Error::InvalidTimeBlock {
                member_id: self.id,
                day: block.day,
                start_min: block.start_min,
                end_min: block.end_min,
            }),
            None => Ok(()),
        }
    }

    /// Whether the two members have at least one course in common
    pub fn shares_course_with(&self, other: &Member) -> bool {
        self.courses.iter().any(|c| other.courses.contains(c))
    }

    /// Whether the two members have at least one interest in common
    pub fn shares_interest_with(&self, other: &Member) -> bool {
        self.interests.iter().any(|i| other.interests.contains(i))
    }
}

/// Primary kind of a relationship, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    SharedCourse,
    ScheduleOverlap,
    SharedInterest,
    Roommate,
    FloorProximity,
    StaffIntroduced,
    MentionedInCheckin,
    SharedSubgroup,
}

/// An undirected edge between two members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Sequence number within the owning graph
    pub id: u32,
    pub source: MemberId,
    pub target: MemberId,
    pub kind: RelationshipType,
    /// Non-negative weight; higher is stronger
    pub strength: f32,
    /// Endpoints' subgroup sets are not both covered by the shared set
    pub is_bridge_edge: bool,
    /// Subgroups both endpoints belong to
    pub shared_subgroups: BTreeSet<String>,
}

impl Relationship {
    pub fn new(source: MemberId, target: MemberId, kind: RelationshipType, strength: f32) -> Self {
        Self {
            id: 0,
            source,
            target,
            kind,
            strength,
            is_bridge_edge: false,
            shared_subgroups: BTreeSet::new(),
        }
    }
}
