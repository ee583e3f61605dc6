// Hand-authored portfolio content.
// Project references and game records, bundled at compile time or read from a data file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const BUNDLED: &str = include_str!("../data/portfolio.json");

/// A GitHub repository shown in the project gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub owner: String,
    pub repo: String,
}

impl ProjectRef {
    #[cfg(test)]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// API path of the repository's metadata.
    pub fn endpoint(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A game shown in the static game gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Everything the page shows that is not fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl Portfolio {
    /// The portfolio compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Ok(serde_json::from_str(BUNDLED)?)
    }

    /// Read a portfolio from a JSON data file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load from `path` when given, else the bundled data.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }
}
