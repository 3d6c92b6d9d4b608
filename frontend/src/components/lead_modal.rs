use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::analytics::GtagAnalytics;
use crate::config;
use crate::lead::controller::{
    CloseTrigger, Command, LeadEvent, LeadFormController, ModalState, ModalSurface,
};
use crate::lead::model::Field;
use crate::lead::transport::{settle, LeadTransport};

/// Handed to every CTA below a `LeadCapture`; emitting the CTA label opens the modal.
#[derive(Clone, PartialEq)]
pub struct LeadOpener(pub Callback<String>);

/// Real page hooks for the controller: body scroll lock and first-field focus.
pub struct DocumentSurface {
    first_field: NodeRef,
}

impl DocumentSurface {
    pub fn new(first_field: NodeRef) -> Self {
        Self { first_field }
    }
}

impl ModalSurface for DocumentSurface {
    fn set_scroll_locked(&self, locked: bool) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };

        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            warn!("Failed to toggle page scroll: {:?}", e);
        }
    }

    fn focus_first_field(&self) {
        let first_field = self.first_field.clone();
        spawn_local(async move {
            // The form only mounts on the render that follows the open.
            TimeoutFuture::new(0).await;
            if let Some(input) = first_field.cast::<HtmlInputElement>() {
                if let Err(e) = input.focus() {
                    warn!("Could not focus the lead form: {:?}", e);
                }
            }
        });
    }
}

#[derive(Properties, PartialEq)]
pub struct LeadCaptureProps {
    #[prop_or_default]
    pub children: Children,
}

pub struct LeadCapture {
    controller: LeadFormController,
    transport: Rc<dyn LeadTransport>,
    opener: LeadOpener,
    first_field: NodeRef,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl Component for LeadCapture {
    type Message = LeadEvent;
    type Properties = LeadCaptureProps;

    fn create(ctx: &Context<Self>) -> Self {
        let first_field = NodeRef::default();
        let controller = LeadFormController::new(
            Rc::new(DocumentSurface::new(first_field.clone())),
            Rc::new(GtagAnalytics),
        );

        let link = ctx.link().clone();
        let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                link.send_message(LeadEvent::CloseRequested(CloseTrigger::Escape));
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        let keydown = match web_sys::window() {
            Some(window) => {
                match window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref()) {
                    Ok(()) => Some(keydown),
                    Err(e) => {
                        warn!("Could not register Escape handler: {:?}", e);
                        None
                    }
                }
            }
            None => None,
        };

        Self {
            controller,
            transport: config::lead_transport(),
            opener: LeadOpener(ctx.link().callback(LeadEvent::CtaActivated)),
            first_field,
            keydown,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match self.controller.handle(msg) {
            Some(Command::Transmit(submission)) => {
                ctx.link().send_future(settle(self.transport.clone(), submission));
            }
            Some(Command::ScheduleClose { token, delay_ms }) => {
                let link = ctx.link().clone();
                Timeout::new(delay_ms, move || {
                    link.send_message(LeadEvent::AutoCloseElapsed(token));
                })
                .forget();
            }
            None => {}
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <ContextProvider<LeadOpener> context={self.opener.clone()}>
                { for ctx.props().children.iter() }
                { self.view_modal(ctx) }
            </ContextProvider<LeadOpener>>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.close();
        if let (Some(window), Some(keydown)) = (web_sys::window(), self.keydown.take()) {
            if let Err(e) = window
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            {
                warn!("Could not remove Escape handler: {:?}", e);
            }
        }
    }
}

impl LeadCapture {
    fn view_modal(&self, ctx: &Context<Self>) -> Html {
        if self.controller.state() == ModalState::Closed {
            return html! {};
        }

        let submitting = self.controller.state() == ModalState::Submitting;
        let submit = self.controller.submit_control();

        let on_backdrop = ctx.link().batch_callback(|e: MouseEvent| {
            (e.target() == e.current_target())
                .then_some(LeadEvent::CloseRequested(CloseTrigger::Backdrop))
        });
        let on_close = ctx
            .link()
            .callback(|_: MouseEvent| LeadEvent::CloseRequested(CloseTrigger::Button));
        let on_submit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            LeadEvent::SubmitRequested
        });

        html! {
            <div class="lead-modal-overlay" onclick={on_backdrop}>
                <style>
                {r#".lead-modal-overlay {
                    position: fixed;
                    inset: 0;
                    background: rgba(15, 15, 15, 0.6);
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    z-index: 1000;
                    padding: 1rem;
                }
                .lead-modal {
                    position: relative;
                    background: #FDFCFB;
                    border-radius: 16px;
                    padding: 2.5rem 2rem 2rem;
                    width: 100%;
                    max-width: 460px;
                    box-shadow: 0 16px 48px rgba(0, 0, 0, 0.25);
                }
                .lead-modal-close {
                    position: absolute;
                    top: 1rem;
                    right: 1rem;
                    background: none;
                    border: none;
                    font-size: 1.5rem;
                    cursor: pointer;
                }
                .lead-field {
                    display: flex;
                    flex-direction: column;
                    margin-bottom: 1rem;
                }
                .lead-field input {
                    padding: 0.75rem;
                    border: 1px solid #d8d4cf;
                    border-radius: 8px;
                    font-size: 1rem;
                }
                .lead-field.has-error input {
                    border-color: #d93025;
                }
                .field-error {
                    color: #d93025;
                    font-size: 0.85rem;
                    margin-top: 0.25rem;
                }
                .lead-modal-banner {
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    background: #fdecea;
                    color: #a50e0e;
                    border-radius: 8px;
                    padding: 0.75rem 1rem;
                    margin-bottom: 1rem;
                }
                .lead-modal-banner button {
                    background: none;
                    border: none;
                    cursor: pointer;
                }
                .lead-modal-success {
                    text-align: center;
                    font-size: 1.1rem;
                    padding: 2rem 0;
                }
                .lead-submit {
                    width: 100%;
                    padding: 0.9rem;
                    border: none;
                    border-radius: 8px;
                    background: #1f1f1f;
                    color: #fff;
                    font-size: 1rem;
                    cursor: pointer;
                }
                .lead-submit:disabled {
                    opacity: 0.6;
                    cursor: progress;
                }"#}
                </style>
                <div class="lead-modal" role="dialog" aria-modal="true" aria-labelledby="lead-modal-title">
                    <button class="lead-modal-close" aria-label="Close" onclick={on_close} disabled={submitting}>
                        {"×"}
                    </button>
                    <h2 id="lead-modal-title">{"Talk to our team"}</h2>
                    if let Some(banner) = self.controller.banner() {
                        <div class="lead-modal-banner" role="alert">
                            <span>{banner}</span>
                            <button aria-label="Dismiss" onclick={ctx.link().callback(|_| LeadEvent::BannerDismissed)}>
                                {"✕"}
                            </button>
                        </div>
                    }
                    if let Some(message) = self.controller.confirmation() {
                        <p class="lead-modal-success" role="status">{message}</p>
                    } else {
                        <form onsubmit={on_submit} novalidate={true}>
                            { for Field::ALL.iter().map(|&field| self.view_field(ctx, field, submitting)) }
                            <button type="submit" class="lead-submit" disabled={submit.disabled}>
                                {submit.label}
                            </button>
                        </form>
                    }
                </div>
            </div>
        }
    }

    fn view_field(&self, ctx: &Context<Self>, field: Field, submitting: bool) -> Html {
        let error = self.controller.error(field);
        let error_id = format!("{}-error", field.id());
        let node_ref = if field == Field::ALL[0] {
            self.first_field.clone()
        } else {
            NodeRef::default()
        };

        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            LeadEvent::FieldEdited(field, input.value())
        });
        let onblur = ctx.link().callback(move |_: FocusEvent| LeadEvent::FieldBlurred(field));

        html! {
            <div class={classes!("lead-field", error.is_some().then_some("has-error"))}>
                <label for={field.id()}>{field.label()}</label>
                <input
                    id={field.id()}
                    name={field.id()}
                    type={field.kind().input_type()}
                    ref={node_ref}
                    placeholder={field.placeholder()}
                    value={self.controller.value(field).to_string()}
                    readonly={submitting}
                    aria-invalid={error.is_some().to_string()}
                    aria-describedby={error_id.clone()}
                    {oninput}
                    {onblur}
                />
                if let Some(error) = error {
                    <span class="field-error" id={error_id} role="alert">{error}</span>
                }
            </div>
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct CtaButtonProps {
    /// Shown on the button and reported with `modal_opened`.
    pub label: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(CtaButton)]
pub fn cta_button(props: &CtaButtonProps) -> Html {
    let opener = use_context::<LeadOpener>();

    let onclick = {
        let label = props.label.to_string();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            match &opener {
                Some(opener) => opener.0.emit(label.clone()),
                None => warn!("CTA '{}' rendered outside of a LeadCapture", label),
            }
        })
    };

    html! {
        <button class={classes!("cta-button", props.class.clone())} {onclick}>
            {&props.label}
        </button>
    }
}
