//! An interactive assistant for proofs about integers and finite sets.
//! Theorems are written as prefix s-expressions and proven by repeatedly
//! decomposing goals and deducing facts from givens.

pub mod types;
pub mod object;
pub mod sentence;
pub mod lexer;
pub mod parser;
pub mod print;
pub mod prover;
pub mod driver;
pub mod config;
pub mod error;

pub use driver::{DriverError, Reply, Session};
pub use error::{ParseError, ProofError};
pub use prover::{Mode, TheoremProver};
pub use sentence::Sentence;
