//! Coming-soon landing page built with Yew.
//! Wires the countdown, waitlist form, theme toggle and easter egg.

use coming_soon::config::{signup_endpoint, LAUNCH_POLICY};
use coming_soon::countdown::resolve_launch_target;
use coming_soon::BrowserStorage;
use yew::prelude::*;

mod components;
mod hooks;

use components::{BrandMark, CountdownDisplay, SignupFormView, ThemeToggle};
use hooks::{now_ms, use_countdown, use_easter_egg, use_signup_form, use_theme};

/// Primary page component.
#[function_component(Landing)]
fn landing() -> Html {
    // Resolved once per page load; the rolling policy persists it here.
    let target = use_memo((), |_| {
        resolve_launch_target(LAUNCH_POLICY, &BrowserStorage, now_ms())
    });
    let countdown = use_countdown(*target);
    let pulsing = use_easter_egg();
    let (theme, toggle_theme) = use_theme();
    let signup = use_signup_form(signup_endpoint());
    let form = &*signup.state;

    html! {
        <main class="coming-soon">
            <header class="top-bar">
                <ThemeToggle theme={theme} onclick={toggle_theme} />
            </header>

            <section class="hero">
                <BrandMark pulsing={pulsing} />
                <h1>{ "Something new is coming" }</h1>
                <p class="tagline">{ "Join the waitlist and be the first to know when we launch." }</p>
            </section>

            <section class="countdown">
                <CountdownDisplay view={countdown} />
            </section>

            <section class="signup">
                <SignupFormView
                    email={AttrValue::from(form.email.clone())}
                    submitting={form.submitting}
                    button_label={form.button_label()}
                    message={form.message.clone()}
                    honeypot={signup.honeypot.clone()}
                    oninput={signup.on_input.clone()}
                    onsubmit={signup.on_submit.clone()}
                />
            </section>
        </main>
    }
}

/// Entry point: installs the console logger and panic hook, then renders.
fn main() {
    console_error_panic_hook::set_once();
    // Only fails if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    yew::Renderer::<Landing>::new().render();
}
