// Project gallery data.
// Cache-aside retrieval of repository metadata for the configured projects.

pub mod fetcher;

pub use fetcher::ProjectFetcher;
