use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

/// Fades its children in the first time they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |node: &NodeRef| {
                let observed = node.cast::<Element>().and_then(|element| {
                    let reveal_now = visible.clone();
                    let on_intersect = Closure::wrap(Box::new(
                        move |entries: js_sys::Array, observer: IntersectionObserver| {
                            for entry in entries.iter() {
                                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                                    continue;
                                };
                                if entry.is_intersecting() {
                                    visible.set(true);
                                    observer.unobserve(&entry.target());
                                }
                            }
                        },
                    )
                        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

                    let options = IntersectionObserverInit::new();
                    options.set_threshold(&JsValue::from_f64(THRESHOLD));
                    options.set_root_margin(ROOT_MARGIN);

                    match IntersectionObserver::new_with_options(
                        on_intersect.as_ref().unchecked_ref(),
                        &options,
                    ) {
                        Ok(observer) => {
                            observer.observe(&element);
                            Some((observer, on_intersect))
                        }
                        Err(e) => {
                            debug!("IntersectionObserver unavailable: {:?}", e);
                            reveal_now.set(true);
                            None
                        }
                    }
                });

                move || {
                    if let Some((observer, _on_intersect)) = observed {
                        observer.disconnect();
                    }
                }
            },
            node.clone(),
        );
    }

    html! {
        <div
            ref={node}
            id={props.id.clone()}
            class={classes!("reveal", props.class.clone(), (*visible).then_some("visible"))}
        >
            { for props.children.iter() }
        </div>
    }
}
