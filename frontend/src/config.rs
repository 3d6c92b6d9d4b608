use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;

use crate::lead::transport::{HttpTransport, LeadTransport, SimulatedTransport};

/// Tag stored on every lead so the backend knows which page produced it.
pub const LEAD_SOURCE: &str = "chatwing-landing";

pub const SUCCESS_CLOSE_DELAY_MS: u32 = 2_000;
pub const SIMULATED_LATENCY_MS: u32 = 2_000;
pub const TESTIMONIAL_INTERVAL_MS: u32 = 6_000;

/// Scroll offset after which the header switches to its translucent style.
pub const HEADER_SCROLL_THRESHOLD: f64 = 100.0;

/// Extra space left above a smooth-scroll target, on top of the header height.
pub const SCROLL_TARGET_GAP: f64 = 20.0;

#[cfg(debug_assertions)]
pub fn get_backend_url() -> Option<&'static str> {
    None // Local development runs against the simulated transport
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> Option<&'static str> {
    option_env!("CHATWING_BACKEND_URL").filter(|url| !url.is_empty())
}

pub fn lead_transport() -> Rc<dyn LeadTransport> {
    match get_backend_url() {
        Some(url) => Rc::new(HttpTransport::new(format!("{}/api/leads", url))),
        None => Rc::new(SimulatedTransport::new(SIMULATED_LATENCY_MS)),
    }
}

/// Launch offer ends on New Year's Eve, São Paulo time.
pub fn offer_deadline() -> DateTime<Utc> {
    Sao_Paulo
        .with_ymd_and_hms(2026, 12, 31, 23, 59, 59)
        .single()
        .map(|deadline| deadline.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
