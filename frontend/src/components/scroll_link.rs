use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::config;

/// In-page anchor target, or `None` for bare `#` and external links.
pub fn anchor_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Where to scroll so the target lands just below the fixed header.
pub fn scroll_target_top(target_offset_top: f64, header_height: f64) -> f64 {
    (target_offset_top - header_height - config::SCROLL_TARGET_GAP).max(0.0)
}

#[derive(Properties, PartialEq)]
pub struct ScrollLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub onclick: Option<Callback<()>>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ScrollLink)]
pub fn scroll_link(props: &ScrollLinkProps) -> Html {
    let onclick = {
        let href = props.href.clone();
        let notify = props.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(notify) = &notify {
                notify.emit(());
            }
            let Some(id) = anchor_id(&href) else {
                return;
            };
            if smooth_scroll_to(id) {
                e.prevent_default();
            }
        })
    };

    html! {
        <a href={props.href.clone()} class={props.class.clone()} {onclick}>
            { for props.children.iter() }
        </a>
    }
}

fn smooth_scroll_to(id: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(document) = window.document() else {
        return false;
    };
    let Some(target) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        debug!("No scroll target #{}", id);
        return false;
    };

    let header_height = document
        .query_selector(".header")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|header| header.offset_height() as f64)
        .unwrap_or(0.0);

    let options = ScrollToOptions::new();
    options.set_top(scroll_target_top(target.offset_top() as f64, header_height));
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    if let Err(e) = target
        .set_attribute("tabindex", "-1")
        .and_then(|_| target.focus())
    {
        warn!("Could not move focus to #{}: {:?}", id, e);
    }
    true
}
