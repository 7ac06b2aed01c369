//! Collaborator abstractions.
//!
//! The engine depends on these interfaces only; concrete providers and
//! storage backends are picked when the application is composed.

pub mod cache;
pub mod enricher;
pub mod source;
