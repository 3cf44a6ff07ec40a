//! Gallery mounting: pushes rendered markup into the page and turns DOM
//! events into gallery commands.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::config::{MountIds, HIGHLIGHT_MS, REVEAL_THRESHOLD};
use crate::gallery::{Category, Gallery, Rendered, View};
use crate::markup::CaseStudy;
use crate::project::Project;
use crate::reveal::{REVEALED_CLASS, REVEAL_CLASS};

const HIDDEN: &str = "hidden";
const ACTIVE: &str = "on";
const HIGHLIGHT: &str = "project-highlight";

fn pending_reveal() -> String {
    format!(".{REVEAL_CLASS}:not(.{REVEALED_CLASS})")
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub(super) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
pub(super) fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub(super) fn elements(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn smooth_scroll(el: &Element, block: Option<ScrollLogicalPosition>) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    if let Some(block) = block {
        opts.set_block(block);
    }
    el.scroll_into_view_with_scroll_into_view_options(&opts);
}

#[derive(Clone)]
struct Mounts {
    grid: Option<Element>,
    stories: Option<Element>,
    view_grid: Option<Element>,
    view_stories: Option<Element>,
    search: Option<HtmlInputElement>,
    filters: Option<Element>,
    modal: Option<Element>,
    modal_close: Option<Element>,
    case_title: Option<Element>,
    case_meta: Option<Element>,
    case_challenge: Option<Element>,
    case_approach: Option<Element>,
    case_outcome: Option<Element>,
    case_links: Option<Element>,
    assistant_bubble: Option<Element>,
    assistant_panel: Option<Element>,
    assistant_random: Option<Element>,
    projects_section: Option<Element>,
}

impl Mounts {
    fn find(document: &Document, ids: &MountIds) -> Self {
        let get = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::debug!("#{id} not found; its gallery feature is off");
            }
            el
        };
        Self {
            grid: get(&ids.grid),
            stories: get(&ids.stories),
            view_grid: get(&ids.view_grid),
            view_stories: get(&ids.view_stories),
            search: get(&ids.search).and_then(|el| el.dyn_into().ok()),
            filters: get(&ids.filters),
            modal: get(&ids.modal),
            modal_close: get(&ids.modal_close),
            case_title: get(&ids.case_title),
            case_meta: get(&ids.case_meta),
            case_challenge: get(&ids.case_challenge),
            case_approach: get(&ids.case_approach),
            case_outcome: get(&ids.case_outcome),
            case_links: get(&ids.case_links),
            assistant_bubble: get(&ids.assistant_bubble),
            assistant_panel: get(&ids.assistant_panel),
            assistant_random: get(&ids.assistant_random),
            projects_section: get(&ids.projects_section),
        }
    }

    fn container(&self, view: View) -> Option<&Element> {
        match view {
            View::Grid => self.grid.as_ref(),
            View::Stories => self.stories.as_ref(),
        }
    }
}

struct GalleryUi {
    gallery: Gallery,
    mounts: Mounts,
    observer: Option<IntersectionObserver>,
}

type Shared = Rc<RefCell<GalleryUi>>;

impl GalleryUi {
    /// Replace a container's contents and hand its new cards to the reveal
    /// observer.
    fn fill(&self, rendered: &Rendered) {
        let Some(container) = self.mounts.container(rendered.view) else {
            return;
        };
        container.set_inner_html(&rendered.html);
        if let Some(observer) = &self.observer {
            for el in elements(container, &pending_reveal()) {
                observer.observe(&el);
            }
        }
    }

    /// Show `view`'s container and hide the other one.
    fn show(&self, view: View) {
        let pairs = [
            (View::Grid, &self.mounts.grid, &self.mounts.view_grid),
            (View::Stories, &self.mounts.stories, &self.mounts.view_stories),
        ];
        for (v, container, button) in pairs {
            let active = v == view;
            if let Some(c) = container {
                let _ = c.class_list().toggle_with_force(HIDDEN, !active);
            }
            if let Some(b) = button {
                let _ = b.class_list().toggle_with_force(ACTIVE, active);
            }
        }
    }

    fn switch(&self, rendered: &Rendered) {
        self.show(rendered.view);
        self.fill(rendered);
    }

    /// Highlight the chip whose `data-filter` matches `category`.
    fn sync_chips(&self, category: &Category) {
        let Some(filters) = &self.mounts.filters else {
            return;
        };
        for chip in elements(filters, ".chip") {
            let on = chip
                .get_attribute("data-filter")
                .is_some_and(|f| Category::parse(&f) == *category);
            let _ = chip.class_list().toggle_with_force(ACTIVE, on);
        }
    }

    fn show_case_study(&self, study: &CaseStudy) {
        let Some(modal) = &self.mounts.modal else {
            return;
        };
        let texts = [
            (&self.mounts.case_title, &study.title),
            (&self.mounts.case_meta, &study.meta),
            (&self.mounts.case_challenge, &study.challenge),
            (&self.mounts.case_approach, &study.approach),
            (&self.mounts.case_outcome, &study.outcome),
        ];
        for (el, text) in texts {
            if let Some(el) = el {
                el.set_text_content(Some(text.as_str()));
            }
        }
        if let Some(links) = &self.mounts.case_links {
            links.set_inner_html(&study.links_html);
        }
        let _ = modal.class_list().remove_1(HIDDEN);
        let _ = modal.set_attribute("aria-hidden", "false");
    }

    fn hide_case_study(&self) {
        if let Some(modal) = &self.mounts.modal {
            let _ = modal.class_list().add_1(HIDDEN);
            let _ = modal.set_attribute("aria-hidden", "true");
        }
    }
}

fn reveal_observer(ui: &Shared) -> Result<IntersectionObserver, JsValue> {
    let ui = Rc::downgrade(ui);
    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            let _ = target.class_list().add_1(REVEALED_CLASS);
            observer.unobserve(&target);

            let view = if target.class_list().contains("story") {
                View::Stories
            } else {
                View::Grid
            };
            if let (Some(ui), Some(id)) = (ui.upgrade(), target.get_attribute("data-id")) {
                if ui.borrow_mut().gallery.mark_revealed(view, &id) {
                    log::trace!("revealed {id}");
                }
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    Ok(observer)
}

/// Outline the picked card once the grid has painted, then clear it.
fn highlight_card(window: &Window, grid: Option<Element>, id: String) {
    let Some(grid) = grid else {
        return;
    };
    let paint = Closure::once_into_js(move || {
        let Some(card) = elements(&grid, "article[data-id]")
            .into_iter()
            .find(|el| el.get_attribute("data-id").as_deref() == Some(id.as_str()))
        else {
            return;
        };
        let _ = card.class_list().add_1(HIGHLIGHT);
        smooth_scroll(&card, Some(ScrollLogicalPosition::Center));
        Timeout::new(HIGHLIGHT_MS, move || {
            let _ = card.class_list().remove_1(HIGHLIGHT);
        })
        .forget();
    });
    let _ = window.request_animation_frame(paint.unchecked_ref());
}

/// Mount the gallery. Missing elements switch their feature off.
pub fn install(
    window: &Window,
    document: &Document,
    ids: &MountIds,
    projects: Vec<Project>,
) -> Result<(), JsValue> {
    let mounts = Mounts::find(document, ids);
    let ui: Shared = Rc::new(RefCell::new(GalleryUi {
        gallery: Gallery::new(projects),
        mounts: mounts.clone(),
        observer: None,
    }));
    let observer = reveal_observer(&ui)?;
    // Static sections outside the gallery reveal the same way as cards.
    if let Some(root) = document.document_element() {
        for el in elements(&root, &pending_reveal()) {
            observer.observe(&el);
        }
    }
    ui.borrow_mut().observer = Some(observer);

    for (view, button) in [
        (View::Grid, &mounts.view_grid),
        (View::Stories, &mounts.view_stories),
    ] {
        if let Some(button) = button {
            let ui = ui.clone();
            listen(button, "click", move |_| {
                let mut ui = ui.borrow_mut();
                let rendered = ui.gallery.set_view(view);
                ui.switch(&rendered);
            })?;
        }
    }

    if let Some(search) = &mounts.search {
        let ui = ui.clone();
        let input = search.clone();
        listen(search, "input", move |_| {
            let mut ui = ui.borrow_mut();
            let rendered = ui.gallery.set_search_term(&input.value());
            ui.fill(&rendered);
        })?;
    }

    if let Some(filters) = &mounts.filters {
        let ui = ui.clone();
        listen(filters, "click", move |e| {
            let Some(chip) = closest(&e, "button[data-filter]") else {
                return;
            };
            let category = Category::parse(&chip.get_attribute("data-filter").unwrap_or_default());
            log::debug!("filter -> {}", category.as_str());
            let mut ui = ui.borrow_mut();
            ui.sync_chips(&category);
            let rendered = ui.gallery.set_filter(category);
            ui.fill(&rendered);
        })?;
    }

    for container in [&mounts.grid, &mounts.stories].into_iter().flatten() {
        let ui = ui.clone();
        listen(container, "click", move |e| {
            let Some(id) = closest(&e, ".project-title, .case-btn")
                .and_then(|trigger| trigger.get_attribute("data-id"))
            else {
                return;
            };
            let mut ui = ui.borrow_mut();
            if let Some(study) = ui.gallery.open_case_study(&id).cloned() {
                ui.show_case_study(&study);
            }
        })?;
    }

    if let Some(close) = &mounts.modal_close {
        let ui = ui.clone();
        listen(close, "click", move |_| {
            let mut ui = ui.borrow_mut();
            ui.gallery.close_case_study();
            ui.hide_case_study();
        })?;
    }

    if let Some(modal) = &mounts.modal {
        let ui = ui.clone();
        let backdrop = JsValue::from(modal.clone());
        listen(modal, "click", move |e| {
            // Clicks inside the dialog bubble up here too; only the backdrop
            // itself closes it.
            if e.target().map(JsValue::from).as_ref() != Some(&backdrop) {
                return;
            }
            let mut ui = ui.borrow_mut();
            ui.gallery.close_case_study();
            ui.hide_case_study();
        })?;
    }

    {
        let ui = ui.clone();
        listen(window, "keydown", move |e| {
            let escape = e
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|k| k.key() == "Escape");
            if escape {
                let mut ui = ui.borrow_mut();
                ui.gallery.close_case_study();
                ui.hide_case_study();
            }
        })?;
    }

    if let (Some(bubble), Some(panel)) = (&mounts.assistant_bubble, &mounts.assistant_panel) {
        let panel = panel.clone();
        listen(bubble, "click", move |_| {
            let was_hidden = panel.class_list().contains(HIDDEN);
            let _ = panel.class_list().toggle_with_force(HIDDEN, !was_hidden);
            let _ = panel.set_attribute("aria-hidden", if was_hidden { "false" } else { "true" });
        })?;
    }

    if let Some(panel) = &mounts.assistant_panel {
        let ui = ui.clone();
        listen(panel, "click", move |e| {
            let Some(category) = closest(&e, "button[data-assist]")
                .and_then(|btn| btn.get_attribute("data-assist"))
                .filter(|c| !c.is_empty())
            else {
                return;
            };
            let category = Category::parse(&category);
            let mut ui = ui.borrow_mut();
            if let Some(search) = &ui.mounts.search {
                search.set_value("");
            }
            ui.sync_chips(&category);
            let rendered = ui.gallery.assistant_pick(category);
            ui.switch(&rendered);
            if let Some(section) = &ui.mounts.projects_section {
                smooth_scroll(section, None);
            }
        })?;
    }

    if let Some(random) = &mounts.assistant_random {
        let ui = ui.clone();
        let window = window.clone();
        listen(random, "click", move |_| {
            let mut ui = ui.borrow_mut();
            let Some(pick) = ui.gallery.random_pick(&mut rand::rng()) else {
                return;
            };
            ui.switch(&pick.grid);
            highlight_card(&window, ui.mounts.grid.clone(), pick.id);
            if let Some(section) = &ui.mounts.projects_section {
                smooth_scroll(section, None);
            }
        })?;
    }

    // Initial render: stories filled in the background, grid on screen.
    let mut ui = ui.borrow_mut();
    let stories = ui.gallery.render(View::Stories);
    ui.fill(&stories);
    let grid = ui.gallery.set_view(View::Grid);
    ui.switch(&grid);
    log::debug!("gallery mounted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, KeyboardEventInit};

    use super::*;
    use crate::project::parse_projects;

    wasm_bindgen_test_configure!(run_in_browser);

    const FIXTURE: &str = r#"
        <style>.hidden { display: none; }</style>
        <section id="intro" class="reveal">Hello</section>
        <section id="projects">
          <button id="viewGrid" type="button">Grid</button>
          <button id="viewStories" type="button">Stories</button>
          <div id="projectGrid"></div>
          <div id="projectStories" class="hidden"></div>
        </section>
        <div id="caseModal" class="hidden">
          <div class="case-dialog">
            <button id="caseClose" type="button">x</button>
            <h3 id="caseTitle"></h3>
            <div id="caseLinks"></div>
          </div>
        </div>
        <button id="assistantRandom" type="button">Surprise me</button>
    "#;

    /// Fresh fixture at the top of the page with the gallery installed.
    fn mount() -> (Window, Document) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        if let Some(old) = document.get_element_by_id("fixture") {
            old.remove();
        }
        let fixture = document.create_element("div").unwrap();
        fixture.set_id("fixture");
        fixture.set_inner_html(FIXTURE);
        let body = document.body().unwrap();
        body.insert_before(&fixture, body.first_child().as_ref())
            .unwrap();

        let projects =
            parse_projects(r#"[{"id":"a","title":"Alpha","category":"Web","tools":["X"]}]"#)
                .unwrap();
        install(&window, &document, &MountIds::default(), projects).unwrap();
        (window, document)
    }

    fn by_id(document: &Document, id: &str) -> HtmlElement {
        document.get_element_by_id(id).unwrap().dyn_into().unwrap()
    }

    fn hidden(el: &Element) -> bool {
        el.class_list().contains(HIDDEN)
    }

    fn open_case_study(document: &Document) -> HtmlElement {
        by_id(document, "projectGrid")
            .query_selector(".case-btn")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
        let modal = by_id(document, "caseModal");
        assert!(!hidden(&modal));
        assert_eq!(
            by_id(document, "caseTitle").text_content().as_deref(),
            Some("Alpha")
        );
        modal
    }

    #[wasm_bindgen_test]
    fn backdrop_click_closes_but_dialog_click_does_not() {
        let (_, document) = mount();
        let modal = open_case_study(&document);

        document
            .query_selector("#fixture .case-dialog")
            .unwrap()
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
        assert!(!hidden(&modal));

        modal.click();
        assert!(hidden(&modal));
        assert_eq!(modal.get_attribute("aria-hidden").as_deref(), Some("true"));
    }

    #[wasm_bindgen_test]
    fn close_button_closes() {
        let (_, document) = mount();
        let modal = open_case_study(&document);
        by_id(&document, "caseClose").click();
        assert!(hidden(&modal));
    }

    #[wasm_bindgen_test]
    fn escape_closes() {
        let (window, document) = mount();
        let modal = open_case_study(&document);

        let init = KeyboardEventInit::new();
        init.set_key("Enter");
        let enter = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window.dispatch_event(&enter).unwrap();
        assert!(!hidden(&modal));

        init.set_key("Escape");
        let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window.dispatch_event(&escape).unwrap();
        assert!(hidden(&modal));
    }

    #[wasm_bindgen_test]
    async fn static_sections_reveal() {
        let (_, document) = mount();
        TimeoutFuture::new(300).await;
        assert!(by_id(&document, "intro")
            .class_list()
            .contains(REVEALED_CLASS));
    }

    #[wasm_bindgen_test]
    async fn rerendered_cards_are_observed() {
        let (_, document) = mount();
        let stories = by_id(&document, "projectStories");
        TimeoutFuture::new(300).await;
        // Filled while hidden, so nothing there can have intersected yet.
        assert!(elements(&stories, &format!(".{REVEALED_CLASS}")).is_empty());

        by_id(&document, "viewStories").click();
        TimeoutFuture::new(300).await;
        let story = stories
            .query_selector("article[data-id]")
            .unwrap()
            .unwrap();
        assert!(story.class_list().contains(REVEALED_CLASS));
    }

    #[wasm_bindgen_test]
    async fn random_pick_highlight_clears() {
        let (_, document) = mount();
        by_id(&document, "assistantRandom").click();
        TimeoutFuture::new(200).await;
        let card = by_id(&document, "projectGrid")
            .query_selector(r#"article[data-id="a"]"#)
            .unwrap()
            .unwrap();
        assert!(card.class_list().contains(HIGHLIGHT));

        TimeoutFuture::new(HIGHLIGHT_MS + 300).await;
        assert!(!card.class_list().contains(HIGHLIGHT));
    }
}
