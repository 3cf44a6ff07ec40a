use portfolio_wasm::gallery::{apply_filters, render, Category, Gallery, GalleryState, View};
use portfolio_wasm::markup::CaseStudy;
use portfolio_wasm::project::{parse_projects, Project, STATUS_PLANNED};
use portfolio_wasm::reveal::RevealLedger;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scenario() -> Vec<Project> {
    parse_projects(
        r##"[
            {"id":"a","title":"Alpha","category":"Web","desc":"first","tools":["X"],"links":{"github":"#"}},
            {"id":"b","title":"Beta","category":"Tools","desc":"second","tools":["Y"],"links":{"live":"https://ex.com"}}
        ]"##,
    )
    .unwrap()
}

fn many(n: usize) -> Vec<Project> {
    (0..n)
        .map(|i| Project {
            id: format!("p{i}"),
            title: format!("Project {i}"),
            category: if i % 2 == 0 { "Web" } else { "Tools" }.into(),
            desc: "A small thing".into(),
            tools: vec!["Rust".into()],
            ..Project::default()
        })
        .collect()
}

fn ids<'a>(projects: &[&'a Project]) -> Vec<&'a str> {
    projects.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn all_with_empty_term_is_everything() {
    let projects = many(9);
    let filtered = apply_filters(&projects, &GalleryState::default());
    assert_eq!(filtered.len(), projects.len());
}

#[test]
fn unknown_term_matches_nothing() {
    let projects = many(9);
    let state = GalleryState {
        term: "kubernetes".into(),
        ..GalleryState::default()
    };
    assert!(apply_filters(&projects, &state).is_empty());
}

#[test]
fn results_keep_source_order() {
    let projects = many(12);
    for category in ["all", "Web", "Tools"] {
        for term in ["", "project 1", "rust"] {
            let state = GalleryState {
                term: term.into(),
                category: Category::parse(category),
                ..GalleryState::default()
            };
            let filtered = apply_filters(&projects, &state);
            let positions: Vec<usize> = filtered
                .iter()
                .map(|f| projects.iter().position(|p| p.id == f.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{category}/{term}");
        }
    }
}

#[test]
fn stories_never_exceed_six() {
    let mut gallery = Gallery::new(many(15));
    let html = gallery.set_view(View::Stories).html;
    assert_eq!(html.matches("<article").count(), 6);
    assert_eq!(gallery.set_view(View::Grid).html.matches("<article").count(), 15);
}

#[test]
fn scenario_filter_and_links() {
    let projects = scenario();
    let web = GalleryState {
        category: Category::parse("Web"),
        ..GalleryState::default()
    };
    assert_eq!(ids(&apply_filters(&projects, &web)), ["a"]);

    let everything = apply_filters(&projects, &GalleryState::default());
    let html = render(View::Grid, &everything, &RevealLedger::new());
    let (card_a, card_b) = html.split_at(html.find(r#"data-id="b""#).unwrap());
    assert!(card_a.contains(STATUS_PLANNED));
    assert!(!card_a.contains(">GitHub<"));
    assert!(card_b.contains(r#"href="https:&#x2f;&#x2f;ex.com""#));
    assert!(card_b.contains(">Live<"));
    assert!(!card_b.contains(STATUS_PLANNED));
}

#[test]
fn planned_marker_in_every_view() {
    let projects = scenario();
    let a = &projects[0];
    let ledger = RevealLedger::new();
    assert!(render(View::Grid, &[a], &ledger).contains(STATUS_PLANNED));
    assert!(render(View::Stories, &[a], &ledger).contains(STATUS_PLANNED));
    assert!(CaseStudy::from_project(a).links_html.contains(STATUS_PLANNED));
}

#[test]
fn unknown_case_study_changes_nothing() {
    let mut gallery = Gallery::new(scenario());
    assert!(gallery.open_case_study("missing").is_none());
    assert!(gallery.case_study().is_none());

    let before = gallery.open_case_study("b").cloned();
    assert!(gallery.open_case_study("missing").is_none());
    assert_eq!(gallery.case_study().cloned(), before);
}

#[test]
fn render_is_idempotent() {
    let mut gallery = Gallery::new(many(8));
    gallery.set_search_term("project");
    gallery.mark_revealed(View::Grid, "p0");
    for view in [View::Grid, View::Stories] {
        assert_eq!(gallery.render(view), gallery.render(view));
    }
}

#[test]
fn reveal_survives_rerender() {
    let mut gallery = Gallery::new(many(3));
    let first = gallery.render(View::Grid).html;
    assert_eq!(first.matches("reveal-in").count(), 0);
    gallery.mark_revealed(View::Grid, "p1");
    let second = gallery.set_search_term("").html;
    assert_eq!(second.matches("reveal-in").count(), 1);
}

#[test]
fn random_pick_stays_in_filtered_pool() {
    let mut gallery = Gallery::new(many(10));
    gallery.set_view(View::Stories);
    gallery.set_filter(Category::parse("Tools"));
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let pick = gallery.random_pick(&mut rng).unwrap();
        let n: usize = pick.id[1..].parse().unwrap();
        assert_eq!(n % 2, 1);
        assert_eq!(pick.grid.view, View::Grid);
        assert!(pick.grid.html.contains(&format!(r#"data-id="{}""#, pick.id)));
    }
    assert_eq!(gallery.state().view, View::Grid);
}

#[test]
fn random_pick_falls_back_to_everything() {
    let mut gallery = Gallery::new(scenario());
    gallery.set_search_term("nothing matches this");
    let mut rng = StdRng::seed_from_u64(9);
    let pick = gallery.random_pick(&mut rng).unwrap();
    assert!(["a", "b"].contains(&pick.id.as_str()));

    let mut empty = Gallery::new(Vec::new());
    assert!(empty.random_pick(&mut rng).is_none());
}
