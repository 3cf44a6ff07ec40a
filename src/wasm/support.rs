use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement, Window};

use super::dom::listen;
use crate::config::{MountIds, PING_DELAY_MS};
use crate::support::{mock_ping, os_message, password_feedback, PING_RUNNING};

pub fn install(window: &Window, document: &Document, ids: &MountIds) -> Result<(), JsValue> {
    let by_id = |id: &str| document.get_element_by_id(id);

    let password = by_id(&ids.password_input).and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if let (Some(input), Some(feedback)) = (password, by_id(&ids.password_feedback)) {
        let field = input.clone();
        listen(&input, "input", move |_| {
            feedback.set_text_content(Some(password_feedback(&field.value())));
        })?;
    }

    if let Some(info) = by_id(&ids.os_info) {
        let ua = window.navigator().user_agent().unwrap_or_default();
        info.set_text_content(Some(&os_message(&ua)));
    }

    if let (Some(button), Some(status)) = (by_id(&ids.ping_button), by_id(&ids.ping_status)) {
        listen(&button, "click", move |_| {
            status.set_text_content(Some(PING_RUNNING));
            let status = status.clone();
            Timeout::new(PING_DELAY_MS, move || {
                status.set_text_content(Some(&mock_ping(&mut rand::rng())));
            })
            .forget();
        })?;
    }
    Ok(())
}
