use chrono::{DateTime, Utc};
use yew::prelude::*;
use yew_hooks::prelude::*;

const TICK_MS: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Time left until `deadline`, never negative.
    pub fn until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = (deadline - now).num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: total % 86_400 / 3_600,
            minutes: total % 3_600 / 60,
            seconds: total % 60,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

#[derive(Properties, PartialEq)]
pub struct CountdownProps {
    pub deadline: DateTime<Utc>,
}

#[function_component(Countdown)]
pub fn countdown(props: &CountdownProps) -> Html {
    let now = use_state_eq(Utc::now);
    let remaining = Remaining::until(props.deadline, *now);

    {
        let now = now.clone();
        // Zero stops the ticking once the offer is over.
        let millis = if remaining.is_expired() { 0 } else { TICK_MS };
        use_interval(move || now.set(Utc::now()), millis);
    }

    if remaining.is_expired() {
        return html! {
            <div class="countdown expired" role="timer">
                {"This offer has ended."}
            </div>
        };
    }

    let units = [
        (remaining.days, "days"),
        (remaining.hours, "hours"),
        (remaining.minutes, "minutes"),
        (remaining.seconds, "seconds"),
    ];

    html! {
        <div class="countdown" role="timer" aria-live="off">
            { for units.iter().map(|(value, unit)| html! {
                <div class="countdown-unit">
                    <span class="countdown-value">{format!("{:02}", value)}</span>
                    <span class="countdown-label">{*unit}</span>
                </div>
            }) }
        </div>
    }
}
