use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

/// Which question is expanded. Opening one closes the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    pub fn toggle(self, index: usize) -> Self {
        if self.open == Some(index) {
            Self { open: None }
        } else {
            Self { open: Some(index) }
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct FaqAccordionProps {
    pub items: Vec<FaqEntry>,
}

#[function_component(FaqAccordion)]
pub fn faq_accordion(props: &FaqAccordionProps) -> Html {
    let accordion = use_state_eq(Accordion::default);

    html! {
        <div class="faq-list">
            { for props.items.iter().enumerate().map(|(index, item)| {
                let is_open = accordion.is_open(index);
                let onclick = {
                    let accordion = accordion.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        accordion.set(accordion.toggle(index));
                    })
                };
                let onkeydown = {
                    let accordion = accordion.clone();
                    Callback::from(move |e: KeyboardEvent| {
                        if e.key() == "Enter" || e.key() == " " {
                            e.prevent_default();
                            accordion.set(accordion.toggle(index));
                        }
                    })
                };
                let answer_id = format!("faq-answer-{}", index);

                html! {
                    <div class={classes!("faq-item", is_open.then_some("open"))}>
                        <div
                            class="faq-question"
                            role="button"
                            tabindex="0"
                            aria-expanded={is_open.to_string()}
                            aria-controls={answer_id.clone()}
                            {onclick}
                            {onkeydown}
                        >
                            <span class="question-text">{&item.question}</span>
                            <span class="toggle-icon">{if is_open { "−" } else { "+" }}</span>
                        </div>
                        <div id={answer_id} class={classes!("faq-answer", is_open.then_some("active"))}>
                            <p>{&item.answer}</p>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
