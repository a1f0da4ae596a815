//! # vita-blackouts-domain
//!
//! Pure domain model for tracking scheduled power outages of one rotation
//! group.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **blackout periods** and merge them into minimal disjoint sets
//! - Define **rotation groups** and the operator's schedule structure, with
//!   typed lookups by day and group
//! - Evaluate the **sensor** state (power on/off, next change) for a moment
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod group;
pub mod merge;
pub mod period;
pub mod schedule;
pub mod sensor;
