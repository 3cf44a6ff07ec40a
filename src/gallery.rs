//! Gallery engine: filtering, view switching and case-study selection over
//! the static project list.
//!
//! The engine owns its state and hands back rendered markup; the browser
//! layer decides where that markup goes.

use rand::Rng;

use crate::markup::{self, CaseStudy};
use crate::project::Project;
use crate::reveal::RevealLedger;

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Grid,
    Stories,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Category {
    #[default]
    All,
    Named(String),
}

impl Category {
    /// Chip values: an empty value or the sentinel selects everything.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(value.to_owned())
        }
    }

    /// Exact, case-sensitive match.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryState {
    pub view: View,
    pub term: String,
    pub category: Category,
}

/// Projects matching the category and the search term, in source order.
pub fn apply_filters<'a>(projects: &'a [Project], state: &GalleryState) -> Vec<&'a Project> {
    let term = state.term.to_lowercase();
    projects
        .iter()
        .filter(|p| state.category.matches(&p.category))
        .filter(|p| term.is_empty() || p.haystack().to_lowercase().contains(&term))
        .collect()
}

/// Markup for `view` over an already filtered list.
pub fn render(view: View, filtered: &[&Project], revealed: &RevealLedger) -> String {
    match view {
        View::Grid => markup::grid(filtered, revealed),
        View::Stories => markup::stories(filtered, revealed),
    }
}

/// Fresh contents for one of the view containers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub view: View,
    pub html: String,
}

/// Outcome of a random pick: the card to highlight plus the grid it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pick {
    pub id: String,
    pub grid: Rendered,
}

#[derive(Debug, Default)]
pub struct Gallery {
    projects: Vec<Project>,
    state: GalleryState,
    case_study: Option<CaseStudy>,
    revealed: RevealLedger,
}

impl Gallery {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn filtered(&self) -> Vec<&Project> {
        apply_filters(&self.projects, &self.state)
    }

    pub fn render(&self, view: View) -> Rendered {
        Rendered {
            view,
            html: render(view, &self.filtered(), &self.revealed),
        }
    }

    pub fn render_active(&self) -> Rendered {
        self.render(self.state.view)
    }

    /// Switch views. The newly active view is always rebuilt so it never
    /// shows results from an older filter.
    pub fn set_view(&mut self, view: View) -> Rendered {
        self.state.view = view;
        self.render(view)
    }

    pub fn set_search_term(&mut self, term: &str) -> Rendered {
        term.clone_into(&mut self.state.term);
        self.render_active()
    }

    pub fn set_filter(&mut self, category: Category) -> Rendered {
        self.state.category = category;
        self.render_active()
    }

    /// Assistant shortcut: show one category in the grid with the search
    /// cleared.
    pub fn assistant_pick(&mut self, category: Category) -> Rendered {
        self.state.category = category;
        self.state.term.clear();
        self.set_view(View::Grid)
    }

    /// Pick a project uniformly from the filtered pool, or from everything
    /// when the filter matches nothing. Switches to the grid.
    pub fn random_pick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Pick> {
        let filtered = self.filtered();
        let pool: Vec<&Project> = if filtered.is_empty() {
            self.projects.iter().collect()
        } else {
            filtered
        };
        if pool.is_empty() {
            return None;
        }
        let id = pool[rng.random_range(0..pool.len())].id.clone();
        let grid = self.set_view(View::Grid);
        Some(Pick { id, grid })
    }

    /// Fill the shared modal with `id`. Unknown ids leave it untouched.
    pub fn open_case_study(&mut self, id: &str) -> Option<&CaseStudy> {
        let project = self.projects.iter().find(|p| p.id == id)?;
        self.case_study = Some(CaseStudy::from_project(project));
        self.case_study.as_ref()
    }

    /// Returns `true` if a case study was showing.
    pub fn close_case_study(&mut self) -> bool {
        self.case_study.take().is_some()
    }

    pub fn case_study(&self) -> Option<&CaseStudy> {
        self.case_study.as_ref()
    }

    pub fn mark_revealed(&mut self, view: View, id: &str) -> bool {
        self.revealed.mark(view, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, category: &str, title: &str, tools: &[&str]) -> Project {
        Project {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            desc: format!("{title} description"),
            tools: tools.iter().map(|t| (*t).to_owned()).collect(),
            ..Project::default()
        }
    }

    fn sample() -> Vec<Project> {
        vec![
            project("a", "Web", "Portfolio", &["HTML", "CSS"]),
            project("b", "Tools", "Ticket Helper", &["PowerShell"]),
            project("c", "Web", "Weather Board", &["JavaScript"]),
        ]
    }

    #[test]
    fn category_parse() {
        assert_eq!(Category::parse(""), Category::All);
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse("Web"), Category::Named("Web".into()));
        assert!(!Category::parse("web").matches("Web"));
    }

    #[test]
    fn search_is_case_insensitive_over_tools() {
        let projects = sample();
        let state = GalleryState {
            term: "powershell".into(),
            ..GalleryState::default()
        };
        let ids: Vec<&str> = apply_filters(&projects, &state)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["b"]);
    }

    #[test]
    fn search_and_category_combine() {
        let projects = sample();
        let state = GalleryState {
            term: "BOARD".into(),
            category: Category::Named("Web".into()),
            ..GalleryState::default()
        };
        let ids: Vec<&str> = apply_filters(&projects, &state)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["c"]);
    }

    #[test]
    fn filter_change_renders_active_view_only() {
        let mut gallery = Gallery::new(sample());
        gallery.set_view(View::Stories);
        let rendered = gallery.set_filter(Category::Named("Tools".into()));
        assert_eq!(rendered.view, View::Stories);
        assert!(rendered.html.contains(r#"data-id="b""#));
        assert!(!rendered.html.contains(r#"data-id="a""#));
    }

    #[test]
    fn switching_view_rebuilds_with_current_filter() {
        let mut gallery = Gallery::new(sample());
        gallery.set_search_term("weather");
        let grid = gallery.set_view(View::Grid);
        assert_eq!(grid.html.matches("<article").count(), 1);
        let stories = gallery.set_view(View::Stories);
        assert_eq!(stories.html.matches("<article").count(), 1);
        assert_eq!(gallery.state().view, View::Stories);
    }

    #[test]
    fn assistant_pick_resets_search() {
        let mut gallery = Gallery::new(sample());
        gallery.set_view(View::Stories);
        gallery.set_search_term("zzz");
        let rendered = gallery.assistant_pick(Category::Named("Web".into()));
        assert_eq!(rendered.view, View::Grid);
        assert_eq!(gallery.state().term, "");
        assert_eq!(rendered.html.matches("<article").count(), 2);
    }

    #[test]
    fn close_reports_previous_state() {
        let mut gallery = Gallery::new(sample());
        assert!(!gallery.close_case_study());
        assert!(gallery.open_case_study("a").is_some());
        assert!(gallery.close_case_study());
        assert!(gallery.case_study().is_none());
    }

    #[test]
    fn opening_another_case_study_replaces_content() {
        let mut gallery = Gallery::new(sample());
        gallery.open_case_study("a");
        let title = gallery.open_case_study("b").map(|c| c.title.clone());
        assert_eq!(title.as_deref(), Some("Ticket Helper"));
        assert_eq!(gallery.case_study().map(|c| c.id.as_str()), Some("b"));
    }
}
