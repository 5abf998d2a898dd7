//! Topological analysis: decomposition, filtration, health and exact ranks

pub mod decomposition;
pub mod filtration;
pub mod health;
pub mod introductions;
pub mod linalg;

pub use decomposition::{DecompositionEngine, DecompositionResult, SplitInvariants};
pub use filtration::{Barcode, FiltrationEngine, FiltrationResult};
pub use health::{HealthFormula, HealthInputs};
pub use introductions::suggest_introductions;
pub use linalg::{exact_betti_numbers, SparseMatrix};
