//! Topology analysis of residential communities: relationship graphs,
//! subgroup decompositions, strength filtrations and follow-up planning

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;
pub mod topology;
pub mod viz;

pub use analysis::{CommunityAnalysis, CommunityAnalyzer};
pub use config::{Config, FiltrationParams};
pub use data::{Member, MemberId, Relationship, RelationshipType, TimeBlock};
pub use error::{Error, Result};
pub use graph::{CommunityGraph, OverlapGraph};
pub use topology::{DecompositionEngine, DecompositionResult, FiltrationEngine, FiltrationResult};
