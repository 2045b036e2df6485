//! Contracts for external collaborators.

pub mod extractor;
