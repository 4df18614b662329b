//! Scoreboard Store - SQLite persistence for the scoreboard manager
//!
//! Provides:
//! - The `Database` handle owning the single connection for a process
//! - Schema convergence: versioned migrations, column introspection, default seeding
//! - Repositories for sport definitions, teams, templates and matches
//! - Fully hydrated single-match reads and a reference-drift audit

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use db::{Database, DEFAULT_DB_FILE};
pub use errors::Result;
pub use migrations::{converge, ConvergeReport};
pub use repo::{
    find_reference_drift, load_hydrated_match, DriftFinding, MatchRepo, Repository, SportRepo,
    TeamRepo, TemplateRepo,
};
