//! Graph representation and algorithms module

pub mod algorithms;
pub mod community;
pub mod overlap;
pub mod scoring;

pub use community::CommunityGraph;
pub use overlap::OverlapGraph;
