use coming_soon::config::{EASTER_EGG_MS, MESSAGE_CLEAR_MS, TICK_MS};
use coming_soon::countdown::{tick, Tick};
use coming_soon::signup::{validate_email, SignupRequest};
use coming_soon::{
    Breakdown, BrowserStorage, Countdown, CountdownEvent, FormAction, FormState, LaunchTarget,
    SequenceMatcher, SignupEndpoint, Theme,
};
use gloo_timers::callback::{Interval, Timeout};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

/// Wall clock in epoch milliseconds.
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// What the countdown section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownView {
    Running(Breakdown),
    Live,
}

impl CountdownView {
    fn at(target: LaunchTarget, now_ms: i64) -> Self {
        match tick(target, now_ms) {
            Tick::Remaining(breakdown) => CountdownView::Running(breakdown),
            Tick::Ended => CountdownView::Live,
        }
    }
}

fn apply_event(view: &UseStateHandle<CountdownView>, event: Option<CountdownEvent>) {
    match event {
        Some(CountdownEvent::Update(breakdown)) => view.set(CountdownView::Running(breakdown)),
        Some(CountdownEvent::Live) => view.set(CountdownView::Live),
        None => {}
    }
}

/// Tick once immediately, then every `TICK_MS` until the target is reached.
///
/// The interval is dropped from an effect rather than from its own callback,
/// once the view has switched to `Live`, and again on unmount.
#[hook]
pub fn use_countdown(target: LaunchTarget) -> CountdownView {
    let view = use_state(|| CountdownView::at(target, now_ms()));
    let interval = use_mut_ref(|| None::<Interval>);

    {
        let view = view.clone();
        let interval = interval.clone();
        use_effect_with(target, move |&target| {
            let countdown = Rc::new(RefCell::new(Countdown::new(target)));
            let first = countdown.borrow_mut().advance(now_ms());
            let already_live = matches!(first, Some(CountdownEvent::Live));
            apply_event(&view, first);

            if !already_live {
                let view = view.clone();
                let handle = Interval::new(TICK_MS, move || {
                    let event = countdown.borrow_mut().advance(now_ms());
                    apply_event(&view, event);
                });
                *interval.borrow_mut() = Some(handle);
            }

            move || {
                interval.borrow_mut().take();
            }
        });
    }

    {
        let interval = interval.clone();
        let is_live = *view == CountdownView::Live;
        use_effect_with(is_live, move |&is_live| {
            if is_live && interval.borrow_mut().take().is_some() {
                debug!("Countdown interval cancelled");
            }
        });
    }

    *view
}

/// Listen for the Konami code on the window; returns `true` while the pulse runs.
#[hook]
pub fn use_easter_egg() -> bool {
    let pulsing = use_state(|| false);
    let reset = use_mut_ref(|| None::<Timeout>);

    {
        let pulsing = pulsing.clone();
        use_effect_with((), move |_| {
            let matcher = RefCell::new(SequenceMatcher::konami());
            let listener = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
                if !matcher.borrow_mut().feed(&e.key()) {
                    return;
                }
                info!("Easter egg unlocked");
                pulsing.set(true);
                let pulsing = pulsing.clone();
                // Replacing the handle cancels a pulse still in flight.
                *reset.borrow_mut() = Some(Timeout::new(EASTER_EGG_MS, move || {
                    pulsing.set(false);
                }));
            });

            let window = gloo_utils::window();
            if window
                .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
                .is_err()
            {
                warn!("Could not attach keydown listener");
            }

            move || {
                let _ = gloo_utils::window()
                    .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            }
        });
    }

    *pulsing
}

fn apply_theme(theme: Theme) {
    let Some(root) = gloo_utils::document().document_element() else {
        return;
    };
    if root.set_attribute("data-theme", theme.as_str()).is_err() {
        warn!("Could not apply theme '{}'", theme.as_str());
    }
}

/// Persisted light/dark preference and a callback that flips it.
#[hook]
pub fn use_theme() -> (Theme, Callback<MouseEvent>) {
    let theme = use_state(|| Theme::load(&BrowserStorage));

    use_effect_with(*theme, |theme| apply_theme(*theme));

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            if let Err(e) = next.save(&BrowserStorage) {
                warn!("Theme not persisted: {}", e);
            }
            theme.set(next);
        })
    };

    (*theme, toggle)
}

/// Holds the signup form state and the callbacks its view needs.
#[derive(Clone)]
pub struct SignupForm {
    pub state: UseReducerHandle<FormState>,
    /// Updates the email text on every keystroke.
    pub on_input: Callback<InputEvent>,
    /// Validates, then submits in the background.
    pub on_submit: Callback<SubmitEvent>,
    /// Hidden honeypot input; humans leave it empty.
    pub honeypot: NodeRef,
}

/// Custom hook driving the waitlist form against `endpoint`.
#[hook]
pub fn use_signup_form(endpoint: SignupEndpoint) -> SignupForm {
    let state = use_reducer(FormState::default);
    let honeypot = use_node_ref();

    let on_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(FormAction::Edit(input.value()));
        })
    };

    let on_submit = {
        let state = state.clone();
        let honeypot = honeypot.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if state.submitting {
                return;
            }

            let email = match validate_email(&state.email) {
                Ok(email) => email,
                Err(_) => {
                    state.dispatch(FormAction::Invalid);
                    return;
                }
            };
            let trap = honeypot
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let request = SignupRequest::new(email, trap);

            state.dispatch(FormAction::Submitting);
            let dispatcher = state.dispatcher();
            let endpoint = endpoint.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = endpoint.submit(&request).await;
                dispatcher.dispatch(FormAction::Completed(result));
            });
        })
    };

    // One expiry timer per shown message; a newer message drops the older timer.
    {
        let dispatcher = state.dispatcher();
        let has_message = state.message.is_some();
        use_effect_with(state.message_seq, move |&seq| {
            let timer = has_message.then(|| {
                Timeout::new(MESSAGE_CLEAR_MS, move || {
                    dispatcher.dispatch(FormAction::Expire(seq));
                })
            });
            move || drop(timer)
        });
    }

    SignupForm {
        state,
        on_input,
        on_submit,
        honeypot,
    }
}
