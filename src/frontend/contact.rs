use super::elements::{all_within, js_message, set_style, within, Lookup};
use super::schedule::PendingTimeout;
use super::{App, Listener, TimerRegistry};
use crate::config::AppConfig;
use crate::contact::{
    simulated_delay_ms, submit_analytics, validate_field, ContactForm, Field, FieldError, StatusKind,
    READY_LABEL, SENDING_LABEL, SUBMIT_EVENT_NAME,
};
use crate::error::{SetupError, SubmitError};
use crate::telemetry::{log_event, LogLevel};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Reflect};
use serde_json::json;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

const FORM: &str = "#contact-form";
const STATUS: &str = "#form-status";
const SUBMIT: &str = "button[type=\"submit\"]";
const ERROR_MESSAGE: &str = ".error-message";
const INPUTS: &str = "input, textarea";
const ERROR_BORDER: &str = "#e53e3e";
const DEFAULT_BORDER: &str = "var(--border-color)";
const SENDING_ICON: &str = "<i class=\"fas fa-spinner fa-spin\"></i>";
const READY_ICON: &str = "<i class=\"fas fa-paper-plane\"></i>";
const STATUS_TIMER: &str = "contact-status";

struct ContactView {
    form: HtmlFormElement,
    status: HtmlElement,
    submit: HtmlButtonElement,
}

impl ContactView {
    fn lookup(lookup: &Lookup<'_>) -> Result<Self, SetupError> {
        let form: HtmlFormElement = lookup.one(FORM)?;
        let status = lookup.one(STATUS)?;
        let submit = within(&form, SUBMIT)?;
        Ok(Self { form, status, submit })
    }

    fn field(&self, field: Field) -> Option<HtmlElement> {
        self.form
            .query_selector(&format!("[name=\"{}\"]", field.as_str()))
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn read(&self) -> ContactForm {
        let value = |field: Field| self.field(field).map(|element| element_value(&element)).unwrap_or_default();
        ContactForm {
            name: value(Field::Name),
            email: value(Field::Email),
            subject: value(Field::Subject),
            message: value(Field::Message),
        }
    }

    fn show_errors(&self, errors: &[FieldError]) {
        for error in errors {
            if let Some(element) = self.field(error.field) {
                show_field_error(&element, error.message);
            }
        }
        if let Some(element) = errors.first().and_then(|error| self.field(error.field)) {
            let _ = element.focus();
        }
    }

    fn clear_errors(&self) {
        for input in all_within::<HtmlElement>(&self.form, INPUTS) {
            clear_field_error(&input);
        }
    }

    fn set_sending(&self, sending: bool) {
        let (icon, label) = if sending {
            (SENDING_ICON, SENDING_LABEL)
        } else {
            (READY_ICON, READY_LABEL)
        };
        self.submit.set_inner_html(&format!("{icon} {label}"));
        self.submit.set_disabled(sending);
    }

    fn show_status(&self, kind: StatusKind) {
        self.status.set_class_name(kind.class_name());
        self.status.set_text_content(Some(kind.message()));
        set_style(&self.status, "display", "block");
    }
}

fn element_value(element: &HtmlElement) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

fn error_slot(element: &HtmlElement) -> Option<HtmlElement> {
    let parent = element.parent_element()?;
    within(&parent, ERROR_MESSAGE).ok()
}

fn show_field_error(element: &HtmlElement, message: &str) {
    set_style(element, "border-color", ERROR_BORDER);
    let _ = element.set_attribute("aria-invalid", "true");
    if let Some(slot) = error_slot(element) {
        slot.set_text_content(Some(message));
        set_style(&slot, "display", "block");
    }
}

fn clear_field_error(element: &HtmlElement) {
    set_style(element, "border-color", DEFAULT_BORDER);
    let _ = element.remove_attribute("aria-invalid");
    if let Some(slot) = error_slot(element) {
        slot.set_text_content(Some(""));
        set_style(&slot, "display", "none");
    }
}

/// Stand-in for a real endpoint: waits a random latency, then accepts unless
/// the form left the page in the meantime.
async fn simulated_send(form: &HtmlFormElement, config: &AppConfig) -> Result<(), SubmitError> {
    let delay = simulated_delay_ms(
        config.submit_min_delay_ms,
        config.submit_jitter_ms,
        js_sys::Math::random(),
    );
    TimeoutFuture::new(delay).await;
    if web_sys::window().is_none() {
        return Err(SubmitError::Unavailable);
    }
    if !form.is_connected() {
        return Err(SubmitError::Rejected("form was removed before sending".into()));
    }
    Ok(())
}

fn report_analytics() -> Result<(), JsValue> {
    let Some(win) = web_sys::window() else {
        return Ok(());
    };
    let Ok(gtag) = Reflect::get(&win, &JsValue::from_str("gtag"))?.dyn_into::<Function>() else {
        return Ok(());
    };
    let payload = serde_json::to_string(&submit_analytics())
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(SUBMIT_EVENT_NAME),
        &js_sys::JSON::parse(&payload)?,
    )?;
    Ok(())
}

async fn submit(view: Rc<ContactView>, config: Rc<AppConfig>, timers: TimerRegistry) {
    view.set_sending(true);
    log_event(config.log_level, LogLevel::Info, "contact.submit.start", json!({}));

    let outcome = simulated_send(&view.form, &config).await;
    view.set_sending(false);

    match outcome {
        Ok(()) => {
            view.show_status(StatusKind::Success);
            view.form.reset();

            let status = view.status.clone();
            timers.borrow_mut().insert(
                STATUS_TIMER,
                Box::new(PendingTimeout::new(config.success_hide_ms, move || {
                    set_style(&status, "display", "none");
                })),
            );

            if let Err(error) = report_analytics() {
                log_event(
                    config.log_level,
                    LogLevel::Warn,
                    "contact.analytics.failed",
                    json!({ "error": js_message(&error) }),
                );
            }
            log_event(config.log_level, LogLevel::Info, "contact.submit.success", json!({}));
        }
        Err(error) => {
            view.show_status(StatusKind::Error);
            log_event(
                config.log_level,
                LogLevel::Error,
                "contact.submit.failed",
                json!({ "error": error.to_string() }),
            );
        }
    }
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let view = Rc::new(ContactView::lookup(&app.lookup())?);
    let config = Rc::clone(app.config());
    let timers = app.timers();

    let on_submit = Rc::clone(&view);
    app.listen(Listener::new(&view.form, "submit", move |event: Event| {
        event.prevent_default();
        on_submit.clear_errors();

        let errors = on_submit.read().validate();
        if !errors.is_empty() {
            on_submit.show_errors(&errors);
            log_event(
                config.log_level,
                LogLevel::Debug,
                "contact.invalid",
                json!({ "errors": errors }),
            );
            return;
        }

        spawn_local(submit(Rc::clone(&on_submit), Rc::clone(&config), Rc::clone(&timers)));
    })?);

    for input in all_within::<HtmlElement>(&view.form, INPUTS) {
        let Some(field) = input.get_attribute("name").as_deref().and_then(Field::from_name) else {
            continue;
        };

        let blurred = input.clone();
        app.listen(Listener::new(&input, "blur", move |_| {
            match validate_field(field, &element_value(&blurred)) {
                Some(error) => show_field_error(&blurred, error.message),
                None => clear_field_error(&blurred),
            }
        })?);

        let edited = input.clone();
        app.listen(Listener::new(&input, "input", move |_| clear_field_error(&edited))?);
    }

    Ok(())
}
