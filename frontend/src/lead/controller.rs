use std::rc::Rc;

use chrono::Utc;
use log::{debug, warn};

use crate::analytics::{self, AnalyticsEvent, AnalyticsSink};
use crate::config;
use crate::lead::model::{Field, FieldErrors, FormSubmission, LeadFields};
use crate::lead::transport::TransmissionError;
use crate::lead::validation::validate_field;

pub const SUBMIT_LABEL: &str = "Request my demo";
pub const SUBMITTING_LABEL: &str = "Sending...";
pub const CONFIRMATION_MESSAGE: &str = "Thanks! Our team will reach out within one business day.";
pub const ERROR_BANNER_MESSAGE: &str = "We couldn't send your details. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
    Submitting,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: &'static str,
    pub disabled: bool,
}

impl SubmitControl {
    fn idle() -> Self {
        Self {
            label: SUBMIT_LABEL,
            disabled: false,
        }
    }

    fn busy() -> Self {
        Self {
            label: SUBMITTING_LABEL,
            disabled: true,
        }
    }
}

/// The slice of the page the controller is allowed to touch.
pub trait ModalSurface {
    fn set_scroll_locked(&self, locked: bool);
    fn focus_first_field(&self);
    fn state_changed(&self, _state: ModalState) {}
}

#[derive(Debug)]
pub enum LeadEvent {
    CtaActivated(String),
    CloseRequested(CloseTrigger),
    FieldEdited(Field, String),
    FieldBlurred(Field),
    SubmitRequested,
    TransmissionSettled(Result<FormSubmission, TransmissionError>),
    AutoCloseElapsed(u32),
    BannerDismissed,
}

/// Work the controller hands back to its host; it never runs futures or timers itself.
#[derive(Debug, PartialEq)]
pub enum Command {
    Transmit(FormSubmission),
    ScheduleClose { token: u32, delay_ms: u32 },
}

pub struct LeadFormController {
    surface: Rc<dyn ModalSurface>,
    analytics: Rc<dyn AnalyticsSink>,
    state: ModalState,
    fields: LeadFields,
    errors: FieldErrors,
    submit: SubmitControl,
    banner: Option<String>,
    close_token: u32,
}

impl LeadFormController {
    pub fn new(surface: Rc<dyn ModalSurface>, analytics: Rc<dyn AnalyticsSink>) -> Self {
        Self {
            surface,
            analytics,
            state: ModalState::Closed,
            fields: LeadFields::default(),
            errors: FieldErrors::new(),
            submit: SubmitControl::idle(),
            banner: None,
            close_token: 0,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields.get(field)
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn confirmation(&self) -> Option<&'static str> {
        (self.state == ModalState::Success).then_some(CONFIRMATION_MESSAGE)
    }

    pub fn handle(&mut self, event: LeadEvent) -> Option<Command> {
        match event {
            LeadEvent::CtaActivated(label) => {
                self.open(&label);
                None
            }
            LeadEvent::CloseRequested(trigger) => {
                debug!("Close requested via {:?}", trigger);
                self.close();
                None
            }
            LeadEvent::FieldEdited(field, value) => {
                self.edit(field, value);
                None
            }
            LeadEvent::FieldBlurred(field) => {
                self.blur(field);
                None
            }
            LeadEvent::SubmitRequested => self.submit().map(Command::Transmit),
            LeadEvent::TransmissionSettled(outcome) => self.settle(outcome),
            LeadEvent::AutoCloseElapsed(token) => {
                if token == self.close_token && self.state == ModalState::Success {
                    self.close();
                }
                None
            }
            LeadEvent::BannerDismissed => {
                self.banner = None;
                None
            }
        }
    }

    pub fn open(&mut self, cta_label: &str) {
        if self.state != ModalState::Closed {
            return;
        }
        self.transition(ModalState::Open);
        self.surface.set_scroll_locked(true);
        self.surface.focus_first_field();
        self.analytics.track(&AnalyticsEvent::new(
            analytics::MODAL_OPENED,
            analytics::LEAD_FORM_CATEGORY,
            Some(cta_label.to_string()),
        ));
    }

    /// Every close path ends here. A submission in flight keeps the modal up.
    pub fn close(&mut self) {
        match self.state {
            ModalState::Closed => return,
            ModalState::Submitting => {
                debug!("Ignoring close while a lead is being sent");
                return;
            }
            _ => {}
        }

        self.fields = LeadFields::default();
        self.errors.clear();
        self.banner = None;
        self.submit = SubmitControl::idle();
        // Invalidates any auto-close still pending from this session.
        self.close_token = self.close_token.wrapping_add(1);
        self.surface.set_scroll_locked(false);
        self.transition(ModalState::Closed);
    }

    fn edit(&mut self, field: Field, value: String) {
        if self.state == ModalState::Submitting {
            return;
        }
        self.fields.set(field, value);
        self.errors.remove(&field);
    }

    fn blur(&mut self, field: Field) {
        if self.state != ModalState::Open {
            return;
        }
        let result = validate_field(self.fields.get(field), field.kind(), Some(field.id()));
        if result.is_valid {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, result.error_message);
        }
    }

    fn submit(&mut self) -> Option<FormSubmission> {
        if self.state != ModalState::Open {
            debug!("Ignoring submit in state {:?}", self.state);
            return None;
        }

        match FormSubmission::from_fields(&self.fields, Utc::now()) {
            Ok(submission) => {
                self.errors.clear();
                self.banner = None;
                self.submit = SubmitControl::busy();
                self.transition(ModalState::Submitting);
                Some(submission)
            }
            Err(errors) => {
                debug!("Lead form has {} invalid field(s)", errors.len());
                self.errors = errors;
                None
            }
        }
    }

    fn settle(&mut self, outcome: Result<FormSubmission, TransmissionError>) -> Option<Command> {
        if self.state != ModalState::Submitting {
            warn!("Transmission settled outside of a submission, ignoring");
            return None;
        }

        self.submit = SubmitControl::idle();

        match outcome {
            Ok(submission) => {
                self.transition(ModalState::Success);
                self.analytics.track(&AnalyticsEvent::new(
                    analytics::LEAD_SUBMITTED,
                    analytics::LEAD_FORM_CATEGORY,
                    Some(submission.source),
                ));
                self.close_token = self.close_token.wrapping_add(1);
                Some(Command::ScheduleClose {
                    token: self.close_token,
                    delay_ms: config::SUCCESS_CLOSE_DELAY_MS,
                })
            }
            Err(err) => {
                warn!("Lead submission failed: {}", err);
                self.transition(ModalState::Error);
                self.banner = Some(ERROR_BANNER_MESSAGE.to_string());
                self.analytics.track(&AnalyticsEvent::new(
                    analytics::FORM_ERROR,
                    analytics::LEAD_FORM_CATEGORY,
                    Some(err.to_string()),
                ));
                self.transition(ModalState::Open);
                None
            }
        }
    }

    fn transition(&mut self, next: ModalState) {
        debug!("Lead modal {:?} -> {:?}", self.state, next);
        self.state = next;
        self.surface.state_changed(next);
    }
}

#[cfg(test)]
pub mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::lead::transport::testing::FakeTransport;
    use crate::lead::transport::{settle, LeadTransport};
    use crate::lead::validation::REQUIRED_MESSAGE;

    #[derive(Default)]
    struct FakeSurface {
        scroll_locked: Cell<bool>,
        focus_calls: Cell<usize>,
        states: RefCell<Vec<ModalState>>,
    }

    impl ModalSurface for FakeSurface {
        fn set_scroll_locked(&self, locked: bool) {
            self.scroll_locked.set(locked);
        }

        fn focus_first_field(&self) {
            self.focus_calls.set(self.focus_calls.get() + 1);
        }

        fn state_changed(&self, state: ModalState) {
            self.states.borrow_mut().push(state);
        }
    }

    #[derive(Default)]
    struct RecordingAnalytics {
        events: RefCell<Vec<AnalyticsEvent>>,
    }

    impl RecordingAnalytics {
        fn count(&self, name: &str) -> usize {
            self.events.borrow().iter().filter(|e| e.name == name).count()
        }
    }

    impl AnalyticsSink for RecordingAnalytics {
        fn track(&self, event: &AnalyticsEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    struct Harness {
        controller: LeadFormController,
        surface: Rc<FakeSurface>,
        analytics: Rc<RecordingAnalytics>,
    }

    impl Harness {
        fn new() -> Self {
            let surface = Rc::new(FakeSurface::default());
            let analytics = Rc::new(RecordingAnalytics::default());
            let controller = LeadFormController::new(surface.clone(), analytics.clone());
            Self {
                controller,
                surface,
                analytics,
            }
        }

        fn opened() -> Self {
            let mut harness = Self::new();
            harness.controller.handle(LeadEvent::CtaActivated("Book a free demo".to_string()));
            harness
        }

        fn fill_valid(&mut self) {
            for (field, value) in [
                (Field::Name, "Jo"),
                (Field::Email, "jo@x.com"),
                (Field::Phone, "(11) 91234-5678"),
                (Field::Business, "Acme"),
            ] {
                self.controller
                    .handle(LeadEvent::FieldEdited(field, value.to_string()));
            }
        }

        /// Plays a submit through the given transport the way the modal component does.
        fn submit_through(&mut self, transport: Rc<dyn LeadTransport>) -> Option<Command> {
            match self.controller.handle(LeadEvent::SubmitRequested) {
                Some(Command::Transmit(submission)) => {
                    let event = futures::executor::block_on(settle(transport, submission));
                    self.controller.handle(event)
                }
                other => other,
            }
        }

        fn states(&self) -> Vec<ModalState> {
            self.surface.states.borrow().clone()
        }
    }

    pub fn valid_submission() -> FormSubmission {
        let fields = LeadFields {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            phone: "(11) 91234-5678".to_string(),
            business: "Acme".to_string(),
        };
        FormSubmission::from_fields(&fields, Utc::now()).unwrap()
    }

    #[test]
    fn opening_locks_scroll_focuses_and_tracks() {
        let harness = Harness::opened();

        assert_eq!(harness.controller.state(), ModalState::Open);
        assert!(harness.surface.scroll_locked.get());
        assert_eq!(harness.surface.focus_calls.get(), 1);
        let events = harness.analytics.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, analytics::MODAL_OPENED);
        assert_eq!(events[0].label.as_deref(), Some("Book a free demo"));
    }

    #[test]
    fn submit_control_starts_idle() {
        let harness = Harness::new();
        let control = harness.controller.submit_control();

        assert_eq!(control.label, SUBMIT_LABEL);
        assert_eq!(control.label, "Request my demo");
        assert!(!control.disabled);
    }

    #[test]
    fn open_only_from_closed() {
        let mut harness = Harness::opened();
        harness.controller.handle(LeadEvent::CtaActivated("pricing".to_string()));

        assert_eq!(harness.analytics.count(analytics::MODAL_OPENED), 1);
        assert_eq!(harness.surface.focus_calls.get(), 1);
    }

    #[test]
    fn empty_submit_shows_four_errors_and_sends_nothing() {
        let mut harness = Harness::opened();
        let transport = Rc::new(FakeTransport::accepting());

        let command = harness.submit_through(transport.clone());

        assert_eq!(command, None);
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(harness.controller.state(), ModalState::Open);
        assert_eq!(harness.controller.errors().len(), 4);
        assert!(harness
            .controller
            .errors()
            .values()
            .all(|message| message == REQUIRED_MESSAGE));
    }

    #[test]
    fn successful_submit_runs_to_closed() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        let transport = Rc::new(FakeTransport::accepting());

        let command = harness.submit_through(transport.clone());

        let Some(Command::ScheduleClose { token, delay_ms }) = command else {
            panic!("expected an auto-close");
        };
        assert_eq!(delay_ms, 2_000);
        assert_eq!(harness.controller.state(), ModalState::Success);
        assert_eq!(harness.controller.confirmation(), Some(CONFIRMATION_MESSAGE));
        assert_eq!(transport.sent.borrow()[0].phone, "(11) 91234-5678");

        harness.controller.handle(LeadEvent::AutoCloseElapsed(token));

        assert_eq!(
            harness.states(),
            vec![
                ModalState::Open,
                ModalState::Submitting,
                ModalState::Success,
                ModalState::Closed
            ]
        );
        assert_eq!(harness.analytics.count(analytics::LEAD_SUBMITTED), 1);
        assert!(!harness.surface.scroll_locked.get());
        assert_eq!(harness.controller.value(Field::Name), "");
        assert_eq!(harness.controller.submit_control(), &SubmitControl::idle());
    }

    #[test]
    fn failed_submit_returns_to_open_with_data() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        let transport = Rc::new(FakeTransport::failing(TransmissionError::Network(
            "offline".to_string(),
        )));

        let command = harness.submit_through(transport);

        assert_eq!(command, None);
        assert_eq!(
            harness.states(),
            vec![
                ModalState::Open,
                ModalState::Submitting,
                ModalState::Error,
                ModalState::Open
            ]
        );
        assert_eq!(harness.controller.submit_control(), &SubmitControl::idle());
        assert_eq!(harness.controller.banner(), Some(ERROR_BANNER_MESSAGE));
        assert_eq!(harness.analytics.count(analytics::FORM_ERROR), 1);
        assert_eq!(harness.controller.value(Field::Email), "jo@x.com");
        assert_eq!(harness.controller.value(Field::Business), "Acme");

        harness.controller.handle(LeadEvent::BannerDismissed);
        assert_eq!(harness.controller.banner(), None);
    }

    #[test]
    fn closing_after_failure_resets_everything() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        harness.submit_through(Rc::new(FakeTransport::failing(TransmissionError::Network(
            "offline".to_string(),
        ))));
        harness.controller.handle(LeadEvent::FieldEdited(Field::Phone, "123".to_string()));
        harness.controller.handle(LeadEvent::FieldBlurred(Field::Phone));
        assert_eq!(harness.controller.banner(), Some(ERROR_BANNER_MESSAGE));
        assert!(harness.controller.error(Field::Phone).is_some());

        harness.controller.handle(LeadEvent::CloseRequested(CloseTrigger::Button));

        assert_eq!(harness.controller.state(), ModalState::Closed);
        assert_eq!(harness.controller.banner(), None);
        assert!(harness.controller.errors().is_empty());
        assert!(Field::ALL.iter().all(|&field| harness.controller.value(field).is_empty()));
        assert_eq!(harness.controller.submit_control(), &SubmitControl::idle());
        assert!(!harness.surface.scroll_locked.get());
    }

    #[test]
    fn retry_after_failure_can_succeed() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        harness.submit_through(Rc::new(FakeTransport::failing(TransmissionError::Rejected {
            status: 502,
        })));

        let command = harness.submit_through(Rc::new(FakeTransport::accepting()));

        assert!(matches!(command, Some(Command::ScheduleClose { .. })));
        assert_eq!(harness.controller.state(), ModalState::Success);
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut harness = Harness::opened();
        harness.fill_valid();

        let first = harness.controller.handle(LeadEvent::SubmitRequested);
        let second = harness.controller.handle(LeadEvent::SubmitRequested);

        assert!(matches!(first, Some(Command::Transmit(_))));
        assert_eq!(second, None);
        assert_eq!(harness.controller.state(), ModalState::Submitting);
        assert_eq!(harness.controller.submit_control(), &SubmitControl::busy());
    }

    #[test]
    fn close_is_refused_while_submitting() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        harness.controller.handle(LeadEvent::SubmitRequested);

        for trigger in [CloseTrigger::Escape, CloseTrigger::Backdrop, CloseTrigger::Button] {
            harness.controller.handle(LeadEvent::CloseRequested(trigger));
            assert_eq!(harness.controller.state(), ModalState::Submitting);
        }
        assert!(harness.surface.scroll_locked.get());
    }

    #[test]
    fn close_twice_is_a_no_op() {
        let mut harness = Harness::opened();
        harness.controller.handle(LeadEvent::FieldBlurred(Field::Name));
        assert!(harness.controller.error(Field::Name).is_some());

        harness.controller.handle(LeadEvent::CloseRequested(CloseTrigger::Escape));
        let after_first = harness.states();
        harness.controller.handle(LeadEvent::CloseRequested(CloseTrigger::Backdrop));

        assert_eq!(harness.controller.state(), ModalState::Closed);
        assert_eq!(harness.states(), after_first);
        assert!(harness.controller.errors().is_empty());
        assert!(!harness.surface.scroll_locked.get());
    }

    #[test]
    fn blur_validates_and_edit_clears() {
        let mut harness = Harness::opened();
        harness
            .controller
            .handle(LeadEvent::FieldEdited(Field::Email, "jo@".to_string()));
        harness.controller.handle(LeadEvent::FieldBlurred(Field::Email));
        assert!(harness.controller.error(Field::Email).is_some());

        harness
            .controller
            .handle(LeadEvent::FieldEdited(Field::Email, "jo@x.com".to_string()));
        assert_eq!(harness.controller.error(Field::Email), None);

        harness.controller.handle(LeadEvent::FieldBlurred(Field::Email));
        assert_eq!(harness.controller.error(Field::Email), None);
    }

    #[test]
    fn submit_revalidates_values_never_blurred() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        harness
            .controller
            .handle(LeadEvent::FieldEdited(Field::Phone, "123".to_string()));

        let command = harness.controller.handle(LeadEvent::SubmitRequested);

        assert_eq!(command, None);
        assert_eq!(harness.controller.errors().len(), 1);
        assert!(harness.controller.error(Field::Phone).is_some());
    }

    #[test]
    fn stale_auto_close_is_ignored_after_reopen() {
        let mut harness = Harness::opened();
        harness.fill_valid();
        let Some(Command::ScheduleClose { token, .. }) =
            harness.submit_through(Rc::new(FakeTransport::accepting()))
        else {
            panic!("expected an auto-close");
        };

        harness.controller.handle(LeadEvent::CloseRequested(CloseTrigger::Button));
        harness.controller.handle(LeadEvent::CtaActivated("footer".to_string()));
        harness.controller.handle(LeadEvent::AutoCloseElapsed(token));

        assert_eq!(harness.controller.state(), ModalState::Open);
    }

    #[test]
    fn late_settle_without_submission_is_dropped() {
        let mut harness = Harness::opened();

        let command = harness
            .controller
            .handle(LeadEvent::TransmissionSettled(Ok(valid_submission())));

        assert_eq!(command, None);
        assert_eq!(harness.controller.state(), ModalState::Open);
        assert_eq!(harness.analytics.count(analytics::LEAD_SUBMITTED), 0);
    }
}
