//! Contact form glue: validates on click and POSTs JSON to the configured
//! endpoint.

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use super::dom::listen;
use crate::config::{MountIds, CONTACT_CLEAR_MS};
use crate::contact::{Status, Submission};

/// Value of an `<input>` or `<textarea>`; empty when the field is missing.
fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    el.dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
        .unwrap_or_default()
}

async fn post(endpoint: &str, submission: &Submission) -> Result<(), gloo_net::Error> {
    let resp = Request::post(endpoint)
        .header("Accept", "application/json")
        .json(submission)?
        .send()
        .await?;
    if !resp.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "contact endpoint answered {}",
            resp.status()
        )));
    }
    Ok(())
}

fn show(button: &HtmlButtonElement, status_line: &Element, status: Status) {
    button.set_disabled(status.busy());
    button.set_text_content(Some(status.button_label()));
    status_line.set_text_content(Some(status.message()));
    if status.clears() {
        let status_line = status_line.clone();
        Timeout::new(CONTACT_CLEAR_MS, move || status_line.set_text_content(Some(""))).forget();
    }
}

pub fn install(document: &Document, ids: &MountIds, endpoint: Option<&str>) -> Result<(), JsValue> {
    let form = document
        .get_element_by_id(&ids.contact_form)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    let button = document
        .get_element_by_id(&ids.contact_send)
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let status_line = document.get_element_by_id(&ids.contact_status);
    let (Some(form), Some(button), Some(status_line)) = (form, button, status_line) else {
        log::debug!("contact form not on this page");
        return Ok(());
    };
    let Some(endpoint) = endpoint.map(str::to_owned) else {
        log::debug!("no contactEndpoint configured; contact form off");
        return Ok(());
    };

    let document = document.clone();
    let ids = ids.clone();
    let target = button.clone();
    listen(&target, "click", move |e| {
        e.prevent_default();
        let submission = Submission::from_fields(
            &field_value(&document, &ids.contact_name),
            &field_value(&document, &ids.contact_email),
            &field_value(&document, &ids.contact_message),
        );
        let Some(submission) = submission else {
            show(&button, &status_line, Status::Incomplete);
            return;
        };

        show(&button, &status_line, Status::Sending);
        let (endpoint, form, button, status_line) = (
            endpoint.clone(),
            form.clone(),
            button.clone(),
            status_line.clone(),
        );
        spawn_local(async move {
            let status = match post(&endpoint, &submission).await {
                Ok(()) => {
                    form.reset();
                    Status::Sent
                }
                Err(err) => {
                    log::error!("contact form failed: {err}");
                    Status::Failed
                }
            };
            show(&button, &status_line, status);
        });
    })
}
