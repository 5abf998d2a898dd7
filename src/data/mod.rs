//! Member records and roster input

pub mod records;
pub mod roster;
pub mod time;

pub use records::{Member, MemberId, Relationship, RelationshipType};
pub use time::TimeBlock;
