// Library surface for integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod phrases;
pub mod scoring;
pub mod session;
pub mod web;
