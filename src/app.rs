// Command implementations.
// Wires the portfolio data, cache store, GitHub client and page renderer together.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, Utc};
use tracing::{debug, info};

use crate::cache::{self, EntryState, FileStore, KeyValueStore, MemoryStore, cache_key};
use crate::cli::{BuildArgs, Cli, Commands};
use crate::clock::{Clock, SystemClock};
use crate::error::{FolioError, Result};
use crate::github::{GitHubClient, Transport};
use crate::page::{MountPoint, Page, cards};
use crate::portfolio::{Portfolio, ProjectRef};
use crate::projects::ProjectFetcher;

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data: Option<PathBuf>,
    /// Explicit `--cache-dir`; the platform default is resolved on demand.
    pub cache_dir: Option<PathBuf>,
    pub api_base: String,
    pub no_cache: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data: cli.data.clone(),
            cache_dir: cli.cache_dir.clone(),
            api_base: cli.api_base.clone(),
            no_cache: cli.no_cache,
        }
    }

    /// Directory of the file store, only needed when the disk cache is used.
    pub fn store_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => cache::cache_dir().ok_or_else(|| {
                FolioError::Other(
                    "could not determine a cache directory; pass --cache-dir".to_string(),
                )
            }),
        }
    }
}

/// Run the command selected on the command line.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_cli(&cli);
    let portfolio = Portfolio::load(settings.data.as_deref())?;
    debug!(
        projects = portfolio.projects.len(),
        games = portfolio.games.len(),
        "portfolio loaded"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Build(BuildArgs::default()));

    if let Commands::Cache = command {
        let store = FileStore::new(settings.store_dir()?);
        for (project, state) in cache_report(&portfolio.projects, &store, &SystemClock) {
            println!("{}", format_state(&project, &state));
        }
        return Ok(());
    }

    let client = GitHubClient::with_base_url(&settings.api_base)?;
    if settings.no_cache {
        dispatch(command, &portfolio, MemoryStore::new(), client).await
    } else {
        let store = FileStore::new(settings.store_dir()?);
        dispatch(command, &portfolio, store, client).await
    }
}

async fn dispatch<S, T>(
    command: Commands,
    portfolio: &Portfolio,
    store: S,
    transport: T,
) -> Result<()>
where
    S: KeyValueStore,
    T: Transport,
{
    let fetcher = ProjectFetcher::new(store, transport, SystemClock);

    match command {
        Commands::Build(args) => {
            let index = args.out.join("index.html");
            build(
                portfolio,
                &fetcher,
                &index,
                Duration::from_millis(args.skeleton_delay_ms),
                Utc::now().year(),
            )
            .await?;
            println!("Wrote {}", index.display());
        }
        Commands::Fetch => {
            let projects = fetcher.fetch_all(&portfolio.projects).await;
            println!("{}", serde_json::to_string_pretty(&projects)?);
        }
        Commands::Cache => {}
    }
    Ok(())
}

/// Render the page to `index`: skeletons first, then games, then projects.
///
/// The skeleton page is written before any network access so a reader of the
/// output sees placeholders until the final page replaces it.
pub async fn build<S, T, C>(
    portfolio: &Portfolio,
    fetcher: &ProjectFetcher<S, T, C>,
    index: &Path,
    skeleton_delay: Duration,
    year: i32,
) -> Result<Page>
where
    S: KeyValueStore,
    T: Transport,
    C: Clock,
{
    let mut page = Page::new(portfolio);
    page.mount(MountPoint::Games, cards::skeleton(portfolio.games.len()));
    page.mount(
        MountPoint::Projects,
        cards::skeleton(portfolio.projects.len()),
    );
    page.mount(MountPoint::Footer, cards::footer(&portfolio.owner_name, year));
    page.write_to(index)?;
    debug!(path = %index.display(), "skeleton page written");

    if !skeleton_delay.is_zero() {
        tokio::time::sleep(skeleton_delay).await;
    }

    page.mount(MountPoint::Games, cards::games(&portfolio.games));

    let projects = fetcher.fetch_all(&portfolio.projects).await;
    page.mount(
        MountPoint::Projects,
        cards::projects(&projects, portfolio.projects.len()),
    );

    page.write_to(index)?;
    info!(
        path = %index.display(),
        projects = projects.len(),
        games = portfolio.games.len(),
        "page written"
    );
    Ok(page)
}

/// Cache state of each project, in configuration order.
pub fn cache_report<S, C>(
    projects: &[ProjectRef],
    store: &S,
    clock: &C,
) -> Vec<(ProjectRef, EntryState)>
where
    S: KeyValueStore,
    C: Clock,
{
    let now = clock.now_millis();
    projects
        .iter()
        .map(|project| {
            let key = cache_key(&project.owner, &project.repo);
            let state = match store.get(&key) {
                Ok(raw) => EntryState::classify(raw.as_deref(), now),
                Err(e) => EntryState::Unreadable(e.to_string()),
            };
            (project.clone(), state)
        })
        .collect()
}

fn format_state(project: &ProjectRef, state: &EntryState) -> String {
    match state {
        EntryState::Missing => format!("{:<40} {}", project, state.label()),
        EntryState::Fresh { age_ms } | EntryState::Stale { age_ms } => format!(
            "{:<40} {:<8} {}",
            project,
            state.label(),
            format_age(*age_ms)
        ),
        EntryState::Corrupt(reason) | EntryState::Unreadable(reason) => {
            format!("{:<40} {:<8} {}", project, state.label(), reason)
        }
    }
}

/// Human-readable age such as `42m` or `3h 5m`.
fn format_age(age_ms: i64) -> String {
    let minutes = age_ms.max(0) / 60_000;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, FRESHNESS_MS};
    use crate::clock::testing::FakeClock;
    use crate::portfolio::GameRecord;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const NOW: i64 = 1_700_000_000_000;

    fn portfolio() -> Portfolio {
        Portfolio {
            owner_name: "Ada".to_string(),
            tagline: String::new(),
            about: String::new(),
            projects: vec![
                ProjectRef::new("ada", "engine"),
                ProjectRef::new("ada", "gone"),
                ProjectRef::new("ada", "loom"),
            ],
            games: vec![GameRecord {
                title: "Analytical Tetris".to_string(),
                description: "Blocks".to_string(),
                image: None,
                url: "https://example.com/tetris".to_string(),
                tags: Vec::new(),
            }],
        }
    }

    #[tokio::test]
    async fn test_build_renders_and_caches() {
        let server = MockServer::start_async().await;
        let engine = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/ada/engine");
                then.status(200)
                    .json_body(json!({"name": "engine", "language": "Rust"}));
            })
            .await;
        let gone = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/ada/gone");
                then.status(404).body(r#"{"message":"Not Found"}"#);
            })
            .await;
        let loom = server
            .mock_async(|when, then| {
                when.method(GET).path("/repos/ada/loom");
                then.status(200).json_body(json!({"name": "loom"}));
            })
            .await;

        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("cache"));
        let client = GitHubClient::with_base_url(server.base_url()).unwrap();
        let fetcher = ProjectFetcher::new(store.clone(), client, FakeClock::at(NOW));
        let index = temp_dir.path().join("out/index.html");

        build(&portfolio(), &fetcher, &index, Duration::ZERO, 2026)
            .await
            .unwrap();
        build(&portfolio(), &fetcher, &index, Duration::ZERO, 2026)
            .await
            .unwrap();

        engine.assert_hits_async(1).await;
        loom.assert_hits_async(1).await;
        gone.assert_hits_async(2).await;

        let html = fs::read_to_string(&index).unwrap();
        assert_eq!(html.matches("project-card").count(), 2);
        assert!(html.find("engine").unwrap() < html.find("loom").unwrap());
        assert!(html.contains("Analytical Tetris"));
        assert!(html.contains("&copy; 2026 Ada."));
        assert!(!html.contains("skeleton"));

        assert!(store.get(&cache_key("ada", "engine")).unwrap().is_some());
        assert!(store.get(&cache_key("ada", "gone")).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_build_all_failed_shows_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = GitHubClient::with_base_url(server.base_url()).unwrap();
        let fetcher = ProjectFetcher::new(MemoryStore::new(), client, FakeClock::at(NOW));
        let index = temp_dir.path().join("index.html");

        let page = build(&portfolio(), &fetcher, &index, Duration::ZERO, 2026)
            .await
            .unwrap();

        assert!(page
            .content(MountPoint::Projects)
            .contains(cards::NO_PROJECTS_MESSAGE));
    }

    #[test]
    fn test_cache_report_states() {
        let store = MemoryStore::new();
        let fresh = CacheEntry::new(json!({}), NOW - 5 * 60_000);
        let stale = CacheEntry::new(json!({}), NOW - 2 * FRESHNESS_MS);
        store
            .set(&cache_key("ada", "engine"), &fresh.encode().unwrap())
            .unwrap();
        store
            .set(&cache_key("ada", "loom"), &stale.encode().unwrap())
            .unwrap();

        let report = cache_report(&portfolio().projects, &store, &FakeClock::at(NOW));
        let labels: Vec<_> = report.iter().map(|(_, s)| s.label()).collect();

        assert_eq!(labels, vec!["fresh", "missing", "stale"]);
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(42 * 60_000), "42m");
        assert_eq!(format_age(2 * FRESHNESS_MS), "2h");
        assert_eq!(format_age(FRESHNESS_MS + 5 * 60_000), "1h 5m");
        assert_eq!(format_age(-1), "0m");
    }

    #[test]
    fn test_settings_prefer_explicit_cache_dir() {
        let cli = <Cli as clap::Parser>::try_parse_from([
            "folio",
            "--cache-dir",
            "/tmp/folio-test",
            "fetch",
        ])
        .unwrap();

        let settings = Settings::from_cli(&cli);
        assert_eq!(settings.cache_dir, Some(PathBuf::from("/tmp/folio-test")));
        assert_eq!(
            settings.store_dir().unwrap(),
            PathBuf::from("/tmp/folio-test")
        );
        assert!(!settings.no_cache);
    }

    #[test]
    fn test_no_cache_settings_leave_cache_dir_unresolved() {
        let cli = <Cli as clap::Parser>::try_parse_from(["folio", "--no-cache", "fetch"]).unwrap();

        let settings = Settings::from_cli(&cli);
        assert!(settings.no_cache);
        assert!(settings.cache_dir.is_none());
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(FolioError::Other("permission denied".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cache_report_read_error_is_unreadable() {
        let report = cache_report(
            &portfolio().projects[..1],
            &UnreadableStore,
            &FakeClock::at(NOW),
        );

        assert_eq!(
            report[0].1,
            EntryState::Unreadable("permission denied".to_string())
        );
        assert_eq!(report[0].1.label(), "unreadable");
        assert!(format_state(&report[0].0, &report[0].1).contains("permission denied"));
    }

    #[tokio::test]
    async fn test_build_without_configured_projects_has_no_failure_message() {
        let temp_dir = TempDir::new().unwrap();
        let client = GitHubClient::with_base_url("http://127.0.0.1:9").unwrap();
        let fetcher = ProjectFetcher::new(MemoryStore::new(), client, FakeClock::at(NOW));
        let index = temp_dir.path().join("index.html");
        let mut portfolio = portfolio();
        portfolio.projects.clear();

        let page = build(&portfolio, &fetcher, &index, Duration::ZERO, 2026)
            .await
            .unwrap();

        assert_eq!(page.content(MountPoint::Projects), "");
        assert!(page.content(MountPoint::Games).contains("Analytical Tetris"));
    }
}
