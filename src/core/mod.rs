//! core
//!
//! Core domain types and configuration for repowiz.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RepoId, Tracking
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and reject unknown keys

pub mod config;
pub mod types;
