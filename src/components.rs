//! Pure Yew view components for the landing page.
//!
//! Components here only render from props; timers, listeners and storage
//! live in `hooks.rs`.

use crate::hooks::CountdownView;
use coming_soon::signup::FormMessage;
use coming_soon::Theme;
use yew::prelude::*;

const UNIT_LABELS: [&str; 4] = ["Days", "Hours", "Minutes", "Seconds"];

#[derive(Properties, PartialEq)]
pub struct CountdownProps {
    pub view: CountdownView,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownProps) -> Html {
    let breakdown = match props.view {
        CountdownView::Running(breakdown) => breakdown,
        CountdownView::Live => {
            return html! {
                <div class="countdown-container">
                    <p class="countdown-ended">{ "We’re Live 🎉" }</p>
                </div>
            };
        }
    };

    html! {
        <div class="countdown-container">
            { breakdown.padded().into_iter().zip(UNIT_LABELS).map(|(value, label)| html! {
                <div class="countdown-item">
                    <span class="countdown-value" id={label.to_lowercase()}>{ value }</span>
                    <span class="countdown-label">{ label }</span>
                </div>
            }).collect::<Html>() }
        </div>
    }
}

/// Waitlist form. `submitting` disables the button until the request settles.
#[derive(Properties, PartialEq)]
pub struct SignupFormProps {
    pub email: AttrValue,
    pub submitting: bool,
    pub button_label: &'static str,
    pub message: Option<FormMessage>,
    pub honeypot: NodeRef,
    pub oninput: Callback<InputEvent>,
    pub onsubmit: Callback<SubmitEvent>,
}

#[function_component(SignupFormView)]
pub fn signup_form_view(props: &SignupFormProps) -> Html {
    let message_class = match &props.message {
        Some(message) => format!("form-message {}", message.kind.css_class()),
        None => "form-message".to_string(),
    };

    html! {
        <form id="signupForm" class="signup-form" onsubmit={props.onsubmit.clone()} novalidate=true>
            <div class="input-row">
                <input
                    type="email"
                    id="email"
                    placeholder="you@company.com"
                    autocomplete="email"
                    value={props.email.clone()}
                    oninput={props.oninput.clone()}
                />
                // Off-screen trap field for bots
                <input
                    type="text"
                    name="company"
                    class="hp-field"
                    tabindex="-1"
                    autocomplete="off"
                    aria-hidden="true"
                    ref={props.honeypot.clone()}
                />
                <button type="submit" class="cta-button" disabled={props.submitting}>
                    <span class="button-text">{ props.button_label }</span>
                </button>
            </div>
            <p id="formMessage" class={message_class} role="status">
                { props.message.as_ref().map(|m| m.text.clone()).unwrap_or_default() }
            </p>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
    pub theme: Theme,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let (icon, label) = match props.theme {
        Theme::Light => ("🌙", "Switch to dark theme"),
        Theme::Dark => ("☀️", "Switch to light theme"),
    };
    html! {
        <button class="theme-toggle" aria-label={label} title={label} onclick={props.onclick.clone()}>
            { icon }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct BrandMarkProps {
    pub pulsing: bool,
}

#[function_component(BrandMark)]
pub fn brand_mark(props: &BrandMarkProps) -> Html {
    html! {
        <div class={classes!("mantis-icon", props.pulsing.then_some("spin"))} aria-hidden="true">
            { "🦗" }
        </div>
    }
}
