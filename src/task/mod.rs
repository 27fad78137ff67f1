//! Task lifecycle management for Taskboard.
//!
//! Tasks move through four board columns, `Pending`, `In Progress`, `Done`
//! and `Archived`, along a strictly linear chain. The module follows
//! hexagonal architecture:
//!
//! - Domain types and lifecycle rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The session task store in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
