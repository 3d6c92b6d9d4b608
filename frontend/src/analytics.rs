use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

pub const MODAL_OPENED: &str = "modal_opened";
pub const LEAD_SUBMITTED: &str = "lead_submitted";
pub const FORM_ERROR: &str = "form_error";

pub const LEAD_FORM_CATEGORY: &str = "lead_form";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub category: &'static str,
    pub label: Option<String>,
}

impl AnalyticsEvent {
    pub fn new(name: &'static str, category: &'static str, label: Option<String>) -> Self {
        Self { name, category, label }
    }
}

/// Fire-and-forget event sink. Implementations must never fail loudly; a
/// missing backend is a log line, not an error.
pub trait AnalyticsSink {
    fn track(&self, event: &AnalyticsEvent);
}

pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        info!(
            "analytics event {} ({}) {}",
            event.name,
            event.category,
            event.label.as_deref().unwrap_or("-")
        );
    }
}

#[derive(Serialize)]
struct GtagParams<'a> {
    event_category: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    event_label: Option<&'a str>,
}

/// Forwards events to `window.gtag` when the page loaded it.
pub struct GtagAnalytics;

impl AnalyticsSink for GtagAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        let Some(gtag) = gtag_function() else {
            LogAnalytics.track(event);
            return;
        };

        let params = GtagParams {
            event_category: event.category,
            event_label: event.label.as_deref(),
        };
        let params = match serde_wasm_bindgen::to_value(&params) {
            Ok(params) => params,
            Err(e) => {
                warn!("Could not encode analytics params: {}", e);
                return;
            }
        };

        if let Err(e) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event.name),
            &params,
        ) {
            warn!("gtag call failed: {:?}", e);
        }
    }
}

fn gtag_function() -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    js_sys::Reflect::get(&window, &JsValue::from_str("gtag"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}
