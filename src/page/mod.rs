// Page shell and mount points.
// Holds the static sections of the portfolio and the containers the renderer fills.

pub mod cards;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::portfolio::Portfolio;

use cards::html_escape;

/// Containers whose content is replaced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    Games,
    Projects,
    Footer,
}

impl MountPoint {
    /// Element id of the container.
    pub fn id(&self) -> &'static str {
        match self {
            MountPoint::Games => "games",
            MountPoint::Projects => "projects",
            MountPoint::Footer => "bottom",
        }
    }
}

/// The portfolio page: fixed header and about sections plus mount points.
#[derive(Debug, Clone)]
pub struct Page {
    owner_name: String,
    tagline: String,
    about: String,
    mounts: HashMap<MountPoint, String>,
}

impl Page {
    pub fn new(portfolio: &Portfolio) -> Self {
        Self {
            owner_name: portfolio.owner_name.clone(),
            tagline: portfolio.tagline.clone(),
            about: portfolio.about.clone(),
            mounts: HashMap::new(),
        }
    }

    /// Replace the content of a mount point.
    pub fn mount(&mut self, point: MountPoint, html: String) {
        self.mounts.insert(point, html);
    }

    /// Current content of a mount point (empty if never mounted).
    pub fn content(&self, point: MountPoint) -> &str {
        self.mounts.get(&point).map(String::as_str).unwrap_or("")
    }

    /// Render the full document.
    pub fn to_html(&self) -> String {
        let owner = html_escape(&self.owner_name);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{owner}</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<header class="header">
    <h1>{owner}</h1>
    <p class="tagline">{tagline}</p>
</header>
<main>
<section class="about">
    <h2>About</h2>
    <p>{about}</p>
</section>
<section class="gallery">
    <h2>Projects</h2>
    <div id="{projects_id}" class="grid">
{projects}
    </div>
</section>
<section class="gallery">
    <h2>Games</h2>
    <div id="{games_id}" class="grid">
{games}
    </div>
</section>
</main>
<div id="{footer_id}">
{footer}
</div>
</body>
</html>
"#,
            owner = owner,
            tagline = html_escape(&self.tagline),
            about = html_escape(&self.about),
            projects_id = MountPoint::Projects.id(),
            projects = self.content(MountPoint::Projects),
            games_id = MountPoint::Games.id(),
            games = self.content(MountPoint::Games),
            footer_id = MountPoint::Footer.id(),
            footer = self.content(MountPoint::Footer),
        )
    }

    /// Write the document to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_html())?;
        Ok(())
    }
}
