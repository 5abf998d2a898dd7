//! Error types for the community topology engine

use crate::data::MemberId;
use thiserror::Error;

/// Errors raised by graph construction and analysis
#[derive(Error, Debug)]
pub enum Error {
    /// A member id was referenced that the owning graph does not contain
    #[error("unknown member: {0}")]
    UnknownMember(MemberId),

    /// A member with this id was already added
    #[error("duplicate member: {0}")]
    DuplicateMember(MemberId),

    /// A relationship connects a member to itself
    #[error("relationship endpoints are the same member: {0}")]
    SelfLoop(MemberId),

    /// Relationship strength must be finite and non-negative
    #[error("invalid relationship strength: {strength}")]
    InvalidStrength {
        /// Offending strength value
        strength: f32,
    },

    /// A member's schedule holds an empty, inverted or out-of-range block
    #[error("member {member_id} has invalid time block: day {day}, {start_min}-{end_min}")]
    InvalidTimeBlock {
        member_id: MemberId,
        day: u8,
        start_min: u16,
        end_min: u16,
    },

    /// A relationship claims subgroups its endpoints do not share
    #[error("relationship {source_id}-{target_id} lists subgroups not shared by both endpoints")]
    SubgroupMismatch {
        /// Source endpoint
        source_id: MemberId,
        /// Target endpoint
        target_id: MemberId,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
