//! Light/dark toggle and theme chips. Both feed the sky's palette and mode
//! hooks.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Storage, Window};

use super::dom::{closest, elements, listen};
use super::render::SkyHandle;
use crate::config::MountIds;
use crate::theme::{Mode, Theme, MODE_KEY, THEME_KEY};

fn storage(window: &Window) -> Option<Storage> {
    window.local_storage().ok().flatten()
}

/// Stored mode, else whatever class the body was served with.
pub fn initial_mode(window: &Window, document: &Document) -> Mode {
    if let Some(stored) = storage(window).and_then(|s| s.get_item(MODE_KEY).ok().flatten()) {
        return Mode::parse(&stored);
    }
    let light = document
        .body()
        .is_some_and(|b| b.class_list().contains(Mode::Light.class()));
    if light {
        Mode::Light
    } else {
        Mode::Dark
    }
}

struct ThemeUi {
    window: Window,
    body: HtmlElement,
    toggle: Option<Element>,
    sky: Option<SkyHandle>,
    mode: Mode,
}

impl ThemeUi {
    fn notify_sky(&self) {
        if let Some(sky) = &self.sky {
            sky.refresh_palette();
            sky.update_mode(self.mode);
        }
    }

    fn set_mode(&mut self, mode: Mode, animate: bool) {
        self.mode = mode;
        let classes = self.body.class_list();
        let _ = classes.remove_2(Mode::Light.class(), Mode::Dark.class());
        let _ = classes.add_1(mode.class());
        if let Some(s) = storage(&self.window) {
            let _ = s.set_item(MODE_KEY, mode.as_str());
        }
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-pressed", &(mode == Mode::Light).to_string());
            let _ = toggle.set_attribute("aria-label", mode.toggle_label());
        }
        self.notify_sky();
        if animate {
            self.toggle_fx();
        }
        log::debug!("mode -> {}", mode.as_str());
    }

    /// Brief glow (light) or twinkle (dark) on the toggle button.
    fn toggle_fx(&self) {
        let Some(toggle) = self.toggle.clone() else {
            return;
        };
        let (class, ms) = match self.mode {
            Mode::Light => ("mode-toggle--glow", 900),
            Mode::Dark => ("mode-toggle--twinkle", 700),
        };
        let _ = toggle
            .class_list()
            .remove_2("mode-toggle--glow", "mode-toggle--twinkle");
        let start = Closure::once_into_js(move || {
            let _ = toggle.class_list().add_1(class);
            Timeout::new(ms, move || {
                let _ = toggle.class_list().remove_1(class);
            })
            .forget();
        });
        let _ = self.window.request_animation_frame(start.unchecked_ref());
    }

    fn apply_theme(&self, theme: Theme) {
        let classes = self.body.class_list();
        for t in Theme::ALL {
            let _ = classes.remove_1(t.class());
        }
        let _ = classes.add_1(theme.class());
        if let Some(s) = storage(&self.window) {
            let _ = s.set_item(THEME_KEY, theme.class());
        }
        self.notify_sky();
        log::debug!("theme -> {}", theme.class());
    }
}

pub fn install(
    window: &Window,
    document: &Document,
    ids: &MountIds,
    mode: Mode,
    sky: Option<SkyHandle>,
) -> Result<(), JsValue> {
    let Some(body) = document.body() else {
        log::debug!("no <body>; mode and theme switching off");
        return Ok(());
    };
    let toggle = document.get_element_by_id(&ids.mode_toggle);
    let ui = Rc::new(RefCell::new(ThemeUi {
        window: window.clone(),
        body: body.clone(),
        toggle: toggle.clone(),
        sky,
        mode,
    }));

    ui.borrow_mut().set_mode(mode, false);
    if let Some(theme) = storage(window)
        .and_then(|s| s.get_item(THEME_KEY).ok().flatten())
        .and_then(|class| Theme::from_class(&class))
    {
        ui.borrow().apply_theme(theme);
    }

    if let Some(toggle) = &toggle {
        let ui = ui.clone();
        listen(toggle, "click", move |_| {
            let mut ui = ui.borrow_mut();
            let next = ui.mode.toggled();
            ui.set_mode(next, true);
        })?;
    }

    // Theme chips live in one or more `.palette` groups.
    for group in elements(&body, ".palette") {
        let ui = ui.clone();
        listen(&group, "click", move |e| {
            let theme = closest(&e, ".chip")
                .and_then(|chip| chip.get_attribute("data-theme"))
                .and_then(|class| Theme::from_class(&class));
            if let Some(theme) = theme {
                ui.borrow().apply_theme(theme);
            }
        })?;
    }

    {
        let ui = ui.clone();
        listen(window, "keydown", move |e| {
            let theme = e
                .dyn_ref::<KeyboardEvent>()
                .and_then(|k| Theme::from_shortcut(&k.key()));
            if let Some(theme) = theme {
                ui.borrow().apply_theme(theme);
            }
        })?;
    }
    Ok(())
}
