use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;

use crate::lead::controller::LeadEvent;
use crate::lead::model::FormSubmission;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransmissionError {
    #[error("network error: {0}")]
    Network(String),
    #[error("lead rejected with status {status}")]
    Rejected { status: u16 },
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for TransmissionError {
    fn from(err: gloo_net::Error) -> Self {
        TransmissionError::Network(err.to_string())
    }
}

/// Delivers a lead somewhere. Resolves once, with the accepted record or a
/// reason; there is no cancellation.
pub trait LeadTransport {
    fn transmit(
        &self,
        submission: FormSubmission,
    ) -> LocalBoxFuture<'static, Result<FormSubmission, TransmissionError>>;
}

/// Awaits the transport and wraps the outcome as the controller's completion event.
pub async fn settle(transport: Rc<dyn LeadTransport>, submission: FormSubmission) -> LeadEvent {
    LeadEvent::TransmissionSettled(transport.transmit(submission).await)
}

pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: String) -> Self {
        Self { endpoint }
    }
}

impl LeadTransport for HttpTransport {
    fn transmit(
        &self,
        submission: FormSubmission,
    ) -> LocalBoxFuture<'static, Result<FormSubmission, TransmissionError>> {
        let endpoint = self.endpoint.clone();
        async move { post_lead(&endpoint, &submission).await }.boxed_local()
    }
}

async fn post_lead(endpoint: &str, submission: &FormSubmission) -> Result<FormSubmission, TransmissionError> {
    let response = Request::post(endpoint).json(submission)?.send().await?;

    if !response.ok() {
        return Err(TransmissionError::Rejected {
            status: response.status(),
        });
    }

    response
        .json::<FormSubmission>()
        .await
        .map_err(|e| TransmissionError::Decode(e.to_string()))
}

/// Stand-in used when no backend is configured: waits, then accepts the lead.
pub struct SimulatedTransport {
    latency_ms: u32,
}

impl SimulatedTransport {
    pub fn new(latency_ms: u32) -> Self {
        Self { latency_ms }
    }
}

impl LeadTransport for SimulatedTransport {
    fn transmit(
        &self,
        submission: FormSubmission,
    ) -> LocalBoxFuture<'static, Result<FormSubmission, TransmissionError>> {
        let latency_ms = self.latency_ms;
        async move {
            TimeoutFuture::new(latency_ms).await;
            Ok(submission)
        }
        .boxed_local()
    }
}
