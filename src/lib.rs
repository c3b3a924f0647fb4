//! Taskboard: task record management over a relational store.
//!
//! This crate provides the domain logic for a single task list: field
//! validation, the status model, filtered and sorted page retrieval, and the
//! error taxonomy that transport layers map to caller-visible outcomes.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task records, validation, listing, and persistence
//! - [`config`]: Database connection settings

pub mod config;
pub mod task;
