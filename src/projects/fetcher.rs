// Cache-aside fetcher for repository metadata.
// Serves fresh cached entries, otherwise fetches from the API and writes the result back.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, KeyValueStore, cache_key};
use crate::clock::Clock;
use crate::error::Result;
use crate::github::Transport;
use crate::portfolio::ProjectRef;

/// Retrieves metadata for projects through a key-value cache.
///
/// Requests are issued one at a time; no timeout, retry or fallback to a
/// stale entry is applied.
pub struct ProjectFetcher<S, T, C> {
    store: S,
    transport: T,
    clock: C,
}

impl<S, T, C> ProjectFetcher<S, T, C>
where
    S: KeyValueStore,
    T: Transport,
    C: Clock,
{
    pub fn new(store: S, transport: T, clock: C) -> Self {
        Self {
            store,
            transport,
            clock,
        }
    }

    /// Return the project's metadata from a fresh cache entry, or fetch it.
    ///
    /// A successful fetch overwrites the cache entry with the call time. A
    /// failed fetch leaves any existing entry untouched.
    pub async fn get_or_fetch(&self, project: &ProjectRef) -> Result<Value> {
        let key = cache_key(&project.owner, &project.repo);
        let now = self.clock.now_millis();

        if let Some(entry) = self.read_entry(&key) {
            if entry.is_fresh(now) {
                debug!(%project, age_ms = entry.age(now), "using cached metadata");
                return Ok(entry.data);
            }
            debug!(%project, age_ms = entry.age(now), "cached metadata is stale");
        }

        let data = self.transport.get_json(&project.endpoint()).await?;

        let entry = CacheEntry::new(data, now);
        match entry.encode() {
            Ok(raw) => {
                if let Err(e) = self.store.set(&key, &raw) {
                    warn!(%project, error = %e, "failed to write cache entry");
                }
            }
            Err(e) => warn!(%project, error = %e, "failed to encode cache entry"),
        }

        Ok(entry.data)
    }

    /// Retrieve every project in order, dropping the ones that fail.
    pub async fn fetch_all(&self, projects: &[ProjectRef]) -> Vec<Value> {
        let mut results = Vec::with_capacity(projects.len());

        for project in projects {
            match self.get_or_fetch(project).await {
                Ok(data) => results.push(data),
                Err(e) => warn!(%project, error = %e, "skipping project"),
            }
        }

        info!(
            loaded = results.len(),
            configured = projects.len(),
            "project metadata loaded"
        );
        results
    }

    /// Read and parse the entry under `key`; unreadable entries count as absent.
    fn read_entry(&self, key: &str) -> Option<CacheEntry> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "failed to read cache entry");
                return None;
            }
        };

        match CacheEntry::parse(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed cache entry");
                None
            }
        }
    }
}
