//! Lens — résumé / job-description keyword matching.
//!
//! The library backs two binaries: `lens-api` (the HTTP service) and `lens`
//! (a CLI running either the local or the remote flow).

pub mod analysis;
pub mod client;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod keywords;
pub mod llm_client;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod workbench;
