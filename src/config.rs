//! Site configuration: DOM mount ids, sky tuning and the contact endpoint.
//!
//! Defaults match the markup shipped in `static/index.html`. A page may set
//! `window.portfolioConfig` to a partial JSON object to override any field.

use serde::Deserialize;

use crate::error::{PortfolioError, Result};

/// Stories view never shows more than this many projects.
pub const STORY_LIMIT: usize = 6;

/// How long a randomly picked card keeps its highlight.
pub const HIGHLIGHT_MS: u32 = 2000;

/// Delay before the mock ping reports a result.
pub const PING_DELAY_MS: u32 = 650;

/// How long the contact form's result message stays up.
pub const CONTACT_CLEAR_MS: u32 = 5000;

/// Fraction of an element that must be visible before it reveals.
pub const REVEAL_THRESHOLD: f64 = 0.15;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub mounts: MountIds,
    pub sky: SkyConfig,
    /// Where the contact form POSTs its JSON body. The form stays inert
    /// without one.
    pub contact_endpoint: Option<String>,
}

impl SiteConfig {
    /// Parse a partial config; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(PortfolioError::Config)
    }

    /// Configured endpoint, ignoring a blank string.
    pub fn contact_endpoint(&self) -> Option<&str> {
        self.contact_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Element ids the browser layer looks up. A missing element disables the
/// feature that uses it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MountIds {
    pub sky: String,
    pub grid: String,
    pub stories: String,
    pub view_grid: String,
    pub view_stories: String,
    pub search: String,
    pub filters: String,
    pub modal: String,
    pub modal_close: String,
    pub case_title: String,
    pub case_meta: String,
    pub case_challenge: String,
    pub case_approach: String,
    pub case_outcome: String,
    pub case_links: String,
    pub assistant_bubble: String,
    pub assistant_panel: String,
    pub assistant_random: String,
    pub projects_section: String,
    pub mode_toggle: String,
    pub password_input: String,
    pub password_feedback: String,
    pub os_info: String,
    pub ping_button: String,
    pub ping_status: String,
    pub contact_form: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_message: String,
    pub contact_send: String,
    pub contact_status: String,
}

impl Default for MountIds {
    fn default() -> Self {
        Self {
            sky: "sky".into(),
            grid: "projectGrid".into(),
            stories: "projectStories".into(),
            view_grid: "viewGrid".into(),
            view_stories: "viewStories".into(),
            search: "projectSearch".into(),
            filters: "projectFilters".into(),
            modal: "caseModal".into(),
            modal_close: "caseClose".into(),
            case_title: "caseTitle".into(),
            case_meta: "caseMeta".into(),
            case_challenge: "caseChallenge".into(),
            case_approach: "caseApproach".into(),
            case_outcome: "caseOutcome".into(),
            case_links: "caseLinks".into(),
            assistant_bubble: "assistantBubble".into(),
            assistant_panel: "assistantPanel".into(),
            assistant_random: "assistantRandom".into(),
            projects_section: "projects".into(),
            mode_toggle: "modeToggle".into(),
            password_input: "pwInput".into(),
            password_feedback: "pwFeedback".into(),
            os_info: "osInfo".into(),
            ping_button: "pingBtn".into(),
            ping_status: "pingStatus".into(),
            contact_form: "contactForm".into(),
            contact_name: "name".into(),
            contact_email: "email".into(),
            contact_message: "message".into(),
            contact_send: "sendBtn".into(),
            contact_status: "formMsg".into(),
        }
    }
}

/// Particle counts for the sky canvas.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SkyConfig {
    pub star_count: usize,
    pub cloud_count: usize,
    pub dot_count: usize,
    pub max_shooting_stars: usize,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            star_count: 70,
            cloud_count: 12,
            dot_count: 32,
            max_shooting_stars: 2,
        }
    }
}
