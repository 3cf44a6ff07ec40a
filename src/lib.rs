#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Client-side behavior for the portfolio site: the project gallery and the
//! animated sky behind it.
//!
//! The engines ([`gallery`], [`sky`]) are plain Rust and test on the host.
//! The browser glue under `wasm` only exists on `wasm32` and does nothing but
//! move data between them and the DOM.

pub mod config;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod markup;
pub mod palette;
pub mod project;
pub mod reveal;
pub mod sky;
pub mod support;
pub mod theme;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::Window;

    use crate::config::SiteConfig;
    use crate::project::{parse_projects, Project};

    mod contact;
    mod dom;
    mod render;
    mod support;
    mod theme;

    /// Serialize a page global through `JSON.stringify`. `None` when unset.
    fn global_json(window: &Window, name: &str) -> Option<String> {
        let value = js_sys::Reflect::get(window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        js_sys::JSON::stringify(&value).ok()?.as_string()
    }

    fn load_config(window: &Window) -> SiteConfig {
        match global_json(window, "portfolioConfig").map(|json| SiteConfig::from_json(&json)) {
            Some(Ok(config)) => config,
            Some(Err(err)) => {
                log::warn!("{err}; using defaults");
                SiteConfig::default()
            }
            None => SiteConfig::default(),
        }
    }

    fn load_projects(window: &Window) -> Vec<Project> {
        let Some(json) = global_json(window, "projects") else {
            log::debug!("window.projects not set; gallery is empty");
            return Vec::new();
        };
        parse_projects(&json).unwrap_or_else(|err| {
            log::warn!("{err}; gallery is empty");
            Vec::new()
        })
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug)
            .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = load_config(&window);
        let projects = load_projects(&window);
        log::info!("portfolio starting with {} projects", projects.len());

        let mode = theme::initial_mode(&window, &document);
        let sky = match render::start(&document, &config.mounts.sky, config.sky, mode) {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::debug!("sky disabled: {err}");
                None
            }
        };

        theme::install(&window, &document, &config.mounts, mode, sky)?;
        dom::install(&window, &document, &config.mounts, projects)?;
        support::install(&window, &document, &config.mounts)?;
        contact::install(&document, &config.mounts, config.contact_endpoint())?;
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
