// GitHub API module.
// Provides the HTTP transport and metadata views for the GitHub REST API.

#![allow(dead_code, unused_imports)]

pub mod client;
pub mod transport;
pub mod types;

pub use client::GitHubClient;
pub use transport::Transport;
pub use types::*;
