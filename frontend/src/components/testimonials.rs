use std::rc::Rc;

use web_sys::MouseEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

#[derive(Clone, Copy, Debug)]
pub enum CarouselAction {
    Next,
    Prev,
    GoTo(usize),
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn active(&self) -> usize {
        self.index
    }

    pub fn apply(self, action: CarouselAction) -> Self {
        if self.len == 0 {
            return self;
        }
        let index = match action {
            CarouselAction::Next => (self.index + 1) % self.len,
            CarouselAction::Prev => (self.index + self.len - 1) % self.len,
            CarouselAction::GoTo(index) if index < self.len => index,
            CarouselAction::GoTo(_) => self.index,
        };
        Self { index, ..self }
    }
}

impl Reducible for Carousel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[derive(Clone, PartialEq)]
pub struct Testimonial {
    pub quote: AttrValue,
    pub author: AttrValue,
    pub role: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct TestimonialCarouselProps {
    pub items: Vec<Testimonial>,
}

#[function_component(TestimonialCarousel)]
pub fn testimonial_carousel(props: &TestimonialCarouselProps) -> Html {
    let len = props.items.len();
    let carousel = use_reducer_eq(move || Carousel::new(len));

    {
        let carousel = carousel.clone();
        use_interval(
            move || carousel.dispatch(CarouselAction::Next),
            config::TESTIMONIAL_INTERVAL_MS,
        );
    }

    let active = carousel.active();
    let step = |action: CarouselAction| {
        let carousel = carousel.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            carousel.dispatch(action);
        })
    };

    html! {
        <div class="testimonial-carousel">
            <button class="carousel-arrow prev" aria-label="Previous testimonial" onclick={step(CarouselAction::Prev)}>
                {"‹"}
            </button>
            <div class="testimonial-track">
                { for props.items.iter().enumerate().map(|(index, item)| {
                    let is_active = index == active;
                    html! {
                        <blockquote
                            class={classes!("testimonial-content", is_active.then_some("active"))}
                            aria-hidden={(!is_active).to_string()}
                        >
                            <p>{&item.quote}</p>
                            <footer>
                                <strong>{&item.author}</strong>
                                <span>{&item.role}</span>
                            </footer>
                        </blockquote>
                    }
                }) }
            </div>
            <button class="carousel-arrow next" aria-label="Next testimonial" onclick={step(CarouselAction::Next)}>
                {"›"}
            </button>
            <div class="carousel-dots">
                { for (0..len).map(|index| {
                    let onclick = step(CarouselAction::GoTo(index));
                    html! {
                        <button
                            class={classes!("carousel-dot", (index == active).then_some("active"))}
                            aria-label={format!("Show testimonial {}", index + 1)}
                            {onclick}
                        />
                    }
                }) }
            </div>
        </div>
    }
}
