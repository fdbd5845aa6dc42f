//! Domain models for the music catalog.
//!
//! # Responsibility
//! - Define the persistence-ignorant value types passed between layers.
//!
//! # Invariants
//! - Models never carry driver types or SQL knowledge.

pub mod artist;
