// Gallery markup.
// Pure string templates mapping records to card fragments.

use serde_json::Value;

use crate::github::RepoSummary;
use crate::portfolio::GameRecord;

/// Shown in the project gallery when no project could be loaded.
pub const NO_PROJECTS_MESSAGE: &str = "Could not load projects.";

/// Placeholder cards painted before real content arrives.
pub fn skeleton(count: usize) -> String {
    (0..count)
        .map(|_| {
            r#"<div class="card skeleton" aria-hidden="true">
    <div class="skeleton-line skeleton-title"></div>
    <div class="skeleton-line"></div>
    <div class="skeleton-line skeleton-short"></div>
</div>"#
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cards for the static game gallery.
pub fn games(games: &[GameRecord]) -> String {
    games
        .iter()
        .map(render_game_card)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_game_card(game: &GameRecord) -> String {
    let image = game
        .image
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                html_escape(src),
                html_escape(&game.title)
            )
        })
        .unwrap_or_default();

    let tags = game
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, html_escape(tag)))
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"<div class="card game-card">
    {}
    <h3><a href="{}" target="_blank" rel="noopener">{}</a></h3>
    <p>{}</p>
    <div class="tags">{}</div>
</div>"#,
        image,
        html_escape(&game.url),
        html_escape(&game.title),
        html_escape(&game.description),
        tags
    )
}

/// Cards for fetched repository metadata, in the order given.
///
/// `configured` is the number of projects requested; the failure message is
/// shown only when some were requested and none loaded.
pub fn projects(repos: &[Value], configured: usize) -> String {
    if repos.is_empty() {
        if configured == 0 {
            return String::new();
        }
        return format!(r#"<p class="empty-state">{}</p>"#, NO_PROJECTS_MESSAGE);
    }

    repos
        .iter()
        .map(|repo| render_project_card(&RepoSummary::from_value(repo)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_project_card(repo: &RepoSummary) -> String {
    let name = repo.name.as_deref().unwrap_or("Untitled");
    let description = repo
        .description
        .as_deref()
        .unwrap_or("No description provided.");

    let title = match repo.html_url.as_deref() {
        Some(url) => format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(url),
            html_escape(name)
        ),
        None => html_escape(name),
    };

    let mut meta = Vec::new();
    if let Some(language) = repo.language.as_deref() {
        meta.push(format!(
            r#"<span class="language">{}</span>"#,
            html_escape(language)
        ));
    }
    if let Some(stars) = repo.stargazers_count {
        meta.push(format!(r#"<span class="stars">★ {}</span>"#, stars));
    }
    if let Some(created) = repo.created_at {
        meta.push(format!(
            r#"<span class="created">{}</span>"#,
            created.format("%b %Y")
        ));
    }

    format!(
        r#"<div class="card project-card">
    <h3>{}</h3>
    <p>{}</p>
    <div class="meta">{}</div>
</div>"#,
        title,
        html_escape(description),
        meta.join("")
    )
}

/// Footer content for the given year.
pub fn footer(owner_name: &str, year: i32) -> String {
    format!(
        r#"<footer class="footer">
    <p>&copy; {} {}. All rights reserved.</p>
</footer>"#,
        year,
        html_escape(owner_name)
    )
}

/// Escape text for use in element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
