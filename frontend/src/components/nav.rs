use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::lead_modal::CtaButton;
use crate::components::scroll_link::ScrollLink;
use crate::config;

const NAV_LINKS: [(&str, &str); 4] = [
    ("#how-it-works", "How it works"),
    ("#features", "Features"),
    ("#testimonials", "Customers"),
    ("#faq", "FAQ"),
];

pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > config::HEADER_SCROLL_THRESHOLD
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state_eq(|| false);
    let is_scrolled = use_state_eq(|| false);
    let container = use_node_ref();

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let listener = window.clone().map(|window| {
                    let window_clone = window.clone();
                    let scroll_callback = Closure::wrap(Box::new(move || {
                        let scroll_y = window_clone.scroll_y().unwrap_or(0.0);
                        is_scrolled.set(header_is_scrolled(scroll_y));
                    }) as Box<dyn FnMut()>);

                    if let Err(e) = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    ) {
                        warn!("Could not register header scroll handler: {:?}", e);
                    }
                    scroll_callback
                });

                move || {
                    if let (Some(window), Some(scroll_callback)) = (window, listener) {
                        if let Err(e) = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        ) {
                            warn!("Could not remove header scroll handler: {:?}", e);
                        }
                    }
                }
            },
            (),
        );
    }

    {
        // Clicks anywhere outside the toggle and the menu fold it away.
        let menu_open = menu_open.clone();
        use_click_away(container.clone(), move |_: Event| {
            menu_open.set(false);
        });
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: ()| menu_open.set(false))
    };

    html! {
        <header class={classes!("header", (*is_scrolled).then_some("scrolled"))}>
            <div class="nav-content" ref={container}>
                <ScrollLink href="#top" class={classes!("nav-logo")}>
                    {"ChatWing AI"}
                </ScrollLink>

                <button
                    id="mobile-menu-toggle"
                    class="burger-menu"
                    aria-label="Menu"
                    aria-controls="nav"
                    aria-expanded={(*menu_open).to_string()}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <nav id="nav" class={classes!("nav", (*menu_open).then_some("active"))}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <ScrollLink href={*href} class={classes!("nav-link")} onclick={close_menu.clone()}>
                            {*label}
                        </ScrollLink>
                    }) }
                    <CtaButton label="Book a demo" class={classes!("nav-cta")} />
                </nav>
            </div>
        </header>
    }
}
