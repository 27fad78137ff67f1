//! Taskboard: personal task tracking client core.
//!
//! This crate holds the parts of a task board client that carry real
//! invariants: the task lifecycle rules and the session cache that keeps the
//! client's task collection consistent with a remote task authority.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task authority and
//!   credential provider
//! - **Adapters**: Concrete implementations of ports (in-memory, wire format)
//! - **Services**: The session-scoped task store
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle rules and cache synchronization

pub mod task;
