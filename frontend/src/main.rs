use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};

mod analytics;
mod config;
mod lead;
mod components {
    pub mod countdown;
    pub mod faq;
    pub mod lead_modal;
    pub mod nav;
    pub mod reveal;
    pub mod scroll_link;
    pub mod testimonials;
}
mod pages {
    pub mod landing;
}

use components::{
    lead_modal::{CtaButton, LeadCapture},
    nav::Nav,
};
use pages::landing::Landing;


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <section class="not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home}>{"Back to ChatWing AI"}</Link<Route>>
                    <CtaButton label="Or talk to our team" />
                </section>
            }
        },
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <LeadCapture>
                <Nav />
                <Switch<Route> render={switch} />
            </LeadCapture>
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
