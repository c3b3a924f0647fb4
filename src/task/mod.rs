//! Task management for Taskboard.
//!
//! Creating, reading, listing, updating, and deleting task records. Listing
//! supports a status filter, a sort column and direction, and page windows
//! with derived pagination metadata. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
