//! Core types shared across scoreboard facilities
//!
//! This crate provides the canonical field keys and event names used by
//! both the error facility and the logging facility, so every crate logs
//! operations with the same vocabulary.

pub mod schema;
