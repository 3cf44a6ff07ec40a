//! HTML for the project grid, the story list and the case-study modal.
//!
//! Everything here is a pure function of its inputs: the same projects and
//! ledger always produce the same string. Project text is escaped before it
//! is interpolated.

use std::fmt::Write;

use crate::config::STORY_LIMIT;
use crate::gallery::View;
use crate::project::{Project, STATUS_PLANNED};
use crate::reveal::RevealLedger;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Outbound link buttons shared by cards and stories.
fn link_buttons(out: &mut String, p: &Project, live_label: &str, noopener: bool) {
    let rel = if noopener { r#" rel="noopener""# } else { "" };
    if let Some(url) = p.github() {
        let _ = write!(
            out,
            r#"<a class="btn outline" href="{}" target="_blank"{rel}>GitHub</a>"#,
            escape(url)
        );
    }
    if let Some(url) = p.live() {
        let _ = write!(
            out,
            r#"<a class="btn outline" href="{}" target="_blank"{rel}>{live_label}</a>"#,
            escape(url)
        );
    }
}

fn status_note(out: &mut String, p: &Project) {
    if p.is_planned() {
        let _ = write!(out, r#"<p class="project-status muted">{STATUS_PLANNED}</p>"#);
    }
}

/// One grid card.
pub fn card(p: &Project, revealed: &RevealLedger) -> String {
    let id = escape(&p.id);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<article class="card glass project {}" data-id="{id}">"#,
        revealed.classes(View::Grid, &p.id)
    );
    let _ = write!(
        out,
        r#"<h4 class="project-title" data-id="{id}">{}</h4><p class="muted">{}</p><p>{}</p>"#,
        escape(&p.title),
        escape(&p.category),
        escape(&p.desc)
    );
    status_note(&mut out, p);
    out.push_str(r#"<div class="tools">"#);
    for tool in &p.tools {
        let _ = write!(out, r#"<span class="tool">{}</span>"#, escape(tool));
    }
    out.push_str(r#"</div><div class="links">"#);
    link_buttons(&mut out, p, "Live", true);
    let _ = write!(
        out,
        r#"<button class="btn small outline case-btn" type="button" data-id="{id}">Case study</button>"#
    );
    out.push_str("</div></article>");
    out
}

/// One narrative story block.
pub fn story(p: &Project, revealed: &RevealLedger) -> String {
    let id = escape(&p.id);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<article class="story glass {}" data-id="{id}">"#,
        revealed.classes(View::Stories, &p.id)
    );
    let _ = write!(
        out,
        r#"<h4 class="project-title" data-id="{id}">{}</h4><p class="muted">{}</p>"#,
        escape(&p.title),
        escape(&p.meta_line())
    );
    status_note(&mut out, p);
    let _ = write!(
        out,
        "<p><strong>Challenge:</strong> {}</p>\
         <p><strong>My approach:</strong> {}</p>\
         <p><strong>Outcome:</strong> {}</p>",
        escape(p.story_challenge()),
        escape(p.story_approach()),
        escape(p.story_outcome())
    );
    out.push_str(r#"<div class="links">"#);
    link_buttons(&mut out, p, "Live", false);
    let _ = write!(
        out,
        r#"<button class="btn small outline case-btn" type="button" data-id="{id}">Full case study</button>"#
    );
    out.push_str("</div></article>");
    out
}

/// Grid view: every filtered project.
pub fn grid(projects: &[&Project], revealed: &RevealLedger) -> String {
    projects.iter().map(|p| card(p, revealed)).collect()
}

/// Stories view: the first few filtered projects, never more.
pub fn stories(projects: &[&Project], revealed: &RevealLedger) -> String {
    projects
        .iter()
        .take(STORY_LIMIT)
        .map(|p| story(p, revealed))
        .collect()
}

/// Contents of the shared case-study modal. Text fields are plain text and
/// go into `textContent`; `links_html` is markup for the links row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStudy {
    pub id: String,
    pub title: String,
    pub meta: String,
    pub challenge: String,
    pub approach: String,
    pub outcome: String,
    pub links_html: String,
}

impl CaseStudy {
    pub fn from_project(p: &Project) -> Self {
        let mut links_html = String::new();
        if let Some(url) = p.github() {
            let _ = write!(
                links_html,
                r#"<a class="btn outline" href="{}" target="_blank" rel="noopener">GitHub</a>"#,
                escape(url)
            );
        }
        if let Some(url) = p.live() {
            let _ = write!(
                links_html,
                r#"<a class="btn outline" href="{}" target="_blank" rel="noopener">Live demo</a>"#,
                escape(url)
            );
        }
        if p.is_planned() {
            let _ = write!(
                links_html,
                r#"<span class="muted small-text">{STATUS_PLANNED}</span>"#
            );
        }

        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            meta: p.meta_line(),
            challenge: p.case_challenge().to_owned(),
            approach: p.case_approach().to_owned(),
            outcome: p.case_outcome().to_owned(),
            links_html,
        }
    }
}
