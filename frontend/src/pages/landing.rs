use yew::prelude::*;

use crate::components::countdown::Countdown;
use crate::components::faq::{FaqAccordion, FaqEntry};
use crate::components::lead_modal::CtaButton;
use crate::components::reveal::Reveal;
use crate::components::scroll_link::ScrollLink;
use crate::components::testimonials::{Testimonial, TestimonialCarousel};
use crate::config;

const STEPS: [(&str, &str); 3] = [
    ("Connect WhatsApp", "Link your business number in a couple of minutes. No new phone needed."),
    ("Teach your assistant", "Upload your menu, price list or FAQ and ChatWing learns how you answer customers."),
    ("Let it reply", "Customers get instant answers day and night, and you step in whenever you want."),
];

const FEATURES: [(&str, &str); 4] = [
    ("Answers in seconds", "No more customers waiting hours for a reply to a simple question."),
    ("Books and qualifies", "Collects names, needs and preferred times before handing over to your team."),
    ("Sounds like you", "Replies follow your tone and only use information you approved."),
    ("Human handoff", "Hard conversations are flagged to you with the full context."),
];

fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            quote: "We stopped losing weekend orders. The assistant answers while we sleep.".into(),
            author: "Mariana S.".into(),
            role: "Owner, bakery".into(),
        },
        Testimonial {
            quote: "Half of our WhatsApp questions were the same five. Now they are handled automatically.".into(),
            author: "Rafael T.".into(),
            role: "Manager, auto repair shop".into(),
        },
        Testimonial {
            quote: "Setup took one afternoon and appointments went up the first week.".into(),
            author: "Camila R.".into(),
            role: "Founder, beauty studio".into(),
        },
    ]
}

fn faq_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry {
            question: "Do I need a new phone number?".into(),
            answer: "No. ChatWing works with the WhatsApp Business number you already use.".into(),
        },
        FaqEntry {
            question: "Can I take over a conversation?".into(),
            answer: "Yes. Reply from your phone at any time and the assistant steps back.".into(),
        },
        FaqEntry {
            question: "How long does setup take?".into(),
            answer: "Most businesses are live the same day. Our team helps you through the first setup.".into(),
        },
        FaqEntry {
            question: "Is there a contract?".into(),
            answer: "No. Plans are monthly and you can cancel whenever you like.".into(),
        },
    ]
}

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    html! {
        <div class="landing-page" id="top">
            <style>
            {r#".landing-page {
                background: #FDFCFB;
                color: #1f1f1f;
                font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
            }
            .landing-page section {
                max-width: 1100px;
                margin: 0 auto;
                padding: 6rem 1.5rem;
            }
            .hero {
                text-align: center;
                padding-top: 9rem !important;
            }
            .hero h1 {
                font-size: 3rem;
                line-height: 1.1;
                margin-bottom: 1.5rem;
            }
            .hero p {
                font-size: 1.25rem;
                color: #5c5753;
                margin-bottom: 2rem;
            }
            .cta-button {
                background: #1f1f1f;
                color: #fff;
                border: none;
                border-radius: 999px;
                padding: 1rem 2rem;
                font-size: 1rem;
                cursor: pointer;
            }
            .steps, .feature-grid {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                gap: 2rem;
            }
            .reveal {
                opacity: 0;
                transform: translateY(20px);
                transition: opacity 0.6s ease-out, transform 0.6s ease-out;
            }
            .reveal.visible {
                opacity: 1;
                transform: translateY(0);
            }
            .testimonial-content {
                display: none;
            }
            .testimonial-content.active {
                display: block;
            }
            .carousel-dot {
                width: 10px;
                height: 10px;
                border-radius: 50%;
                border: none;
                margin: 0 4px;
                background: #d8d4cf;
            }
            .carousel-dot.active {
                background: #1f1f1f;
            }
            .countdown {
                display: flex;
                justify-content: center;
                gap: 1.5rem;
                margin: 2rem 0;
            }
            .countdown-value {
                display: block;
                font-size: 2.5rem;
                font-weight: 700;
            }
            .faq-question {
                display: flex;
                justify-content: space-between;
                padding: 1.25rem 0;
                cursor: pointer;
                border-bottom: 1px solid #ebe7e3;
            }
            .faq-answer {
                display: none;
            }
            .faq-answer.active {
                display: block;
            }
            @media (max-width: 768px) {
                .hero h1 {
                    font-size: 2.2rem;
                }
                .nav {
                    display: none;
                }
                .nav.active {
                    display: flex;
                    flex-direction: column;
                }
            }"#}
            </style>

            <section class="hero">
                <h1>{"Your WhatsApp, answered around the clock"}</h1>
                <p>{"ChatWing AI replies to your customers instantly, books appointments and hands the tricky ones back to you."}</p>
                <CtaButton label="Book a free demo" />
                <p class="hero-secondary">
                    <ScrollLink href="#how-it-works">{"See how it works"}</ScrollLink>
                </p>
            </section>

            <section id="how-it-works">
                <h2>{"How it works"}</h2>
                <div class="steps">
                    { for STEPS.iter().enumerate().map(|(index, (title, body))| html! {
                        <Reveal class={classes!("step")}>
                            <span class="step-number">{index + 1}</span>
                            <h3>{*title}</h3>
                            <p>{*body}</p>
                        </Reveal>
                    }) }
                </div>
            </section>

            <section id="features">
                <h2>{"Everything a busy front desk needs"}</h2>
                <div class="feature-grid">
                    { for FEATURES.iter().map(|(title, body)| html! {
                        <Reveal class={classes!("feature-item")}>
                            <h3>{*title}</h3>
                            <p>{*body}</p>
                        </Reveal>
                    }) }
                </div>
            </section>

            <section id="testimonials">
                <h2>{"Small businesses already on ChatWing"}</h2>
                <Reveal>
                    <TestimonialCarousel items={testimonials()} />
                </Reveal>
            </section>

            <section id="offer" class="offer">
                <h2>{"Launch pricing ends soon"}</h2>
                <p>{"Sign up before the timer runs out and keep the launch price for a year."}</p>
                <Countdown deadline={config::offer_deadline()} />
                <CtaButton label="Claim launch pricing" />
            </section>

            <section id="faq">
                <h2>{"Frequently asked questions"}</h2>
                <FaqAccordion items={faq_entries()} />
            </section>

            <footer class="footer">
                <p>{"Ready to stop missing messages?"}</p>
                <CtaButton label="Talk to us" />
                <p class="footer-copy">{"© ChatWing AI"}</p>
            </footer>
        </div>
    }
}
