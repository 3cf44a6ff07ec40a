//! Project records shown in the gallery.

use serde::Deserialize;

use crate::error::{PortfolioError, Result};

/// Placeholder used in the data file for links that do not exist yet.
pub const PLACEHOLDER_LINK: &str = "#";

pub const STATUS_PLANNED: &str = "Status: ongoing / planned to incorporate on GitHub.";

pub const STORY_CHALLENGE_FALLBACK: &str = "Clarifying the real user problem.";
pub const STORY_APPROACH_FALLBACK: &str =
    "Scoped the work to something small, testable, and easy to explain to non-technical stakeholders.";
pub const STORY_OUTCOME_FALLBACK: &str =
    "A clearer path from problem → fix → documentation that others can reuse.";

pub const CASE_APPROACH_FALLBACK: &str = "I approached this the same way I handle support: clarify the problem, design a small test, and iterate with feedback.";
pub const CASE_OUTCOME_FALLBACK: &str =
    "A clearer, more maintainable solution and a better story to tell in interviews.";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: String,
    pub desc: String,
    pub tools: Vec<String>,
    pub challenge: Option<String>,
    pub approach: Option<String>,
    pub outcome: Option<String>,
    pub links: Option<Links>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Links {
    pub github: Option<String>,
    pub live: Option<String>,
}

/// A link is real when it is non-empty after trimming and is not the
/// placeholder marker.
pub fn is_real_link(url: Option<&str>) -> bool {
    url.map(str::trim)
        .is_some_and(|u| !u.is_empty() && u != PLACEHOLDER_LINK)
}

fn real(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|u| is_real_link(Some(*u)))
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl Project {
    /// GitHub url, if it passes the real-link rule.
    pub fn github(&self) -> Option<&str> {
        real(self.links.as_ref()?.github.as_deref())
    }

    /// Live demo url, if it passes the real-link rule.
    pub fn live(&self) -> Option<&str> {
        real(self.links.as_ref()?.live.as_deref())
    }

    /// Neither link is real yet.
    pub fn is_planned(&self) -> bool {
        self.github().is_none() && self.live().is_none()
    }

    /// Text matched by the search box: title, category, description and
    /// tools joined by single spaces.
    pub fn haystack(&self) -> String {
        let mut parts = vec![self.title.as_str(), self.category.as_str(), self.desc.as_str()];
        parts.extend(self.tools.iter().map(String::as_str));
        parts.join(" ")
    }

    /// "Category • Tool • Tool" line used by stories and the modal.
    pub fn meta_line(&self) -> String {
        let mut line = self.category.clone();
        line.push_str(" • ");
        line.push_str(&self.tools.join(" • "));
        line
    }

    pub fn story_challenge(&self) -> &str {
        non_empty(self.challenge.as_ref())
            .or_else(|| non_empty(Some(&self.desc)))
            .unwrap_or(STORY_CHALLENGE_FALLBACK)
    }

    pub fn story_approach(&self) -> &str {
        non_empty(self.approach.as_ref()).unwrap_or(STORY_APPROACH_FALLBACK)
    }

    pub fn story_outcome(&self) -> &str {
        non_empty(self.outcome.as_ref()).unwrap_or(STORY_OUTCOME_FALLBACK)
    }

    pub fn case_challenge(&self) -> &str {
        non_empty(self.challenge.as_ref())
            .or_else(|| non_empty(Some(&self.desc)))
            .unwrap_or("")
    }

    pub fn case_approach(&self) -> &str {
        non_empty(self.approach.as_ref()).unwrap_or(CASE_APPROACH_FALLBACK)
    }

    pub fn case_outcome(&self) -> &str {
        non_empty(self.outcome.as_ref()).unwrap_or(CASE_OUTCOME_FALLBACK)
    }
}

/// Parse the page's project list. `null` counts as an empty collection.
pub fn parse_projects(json: &str) -> Result<Vec<Project>> {
    let parsed: Option<Vec<Project>> =
        serde_json::from_str(json).map_err(PortfolioError::ProjectData)?;
    Ok(parsed.unwrap_or_default())
}
