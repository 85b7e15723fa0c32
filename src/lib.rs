//! Client-side logic for the coming-soon landing page.
//!
//! Everything in here is independent of the DOM: the clock and the storage
//! backend are passed in, so the modules are tested on the host. The Yew
//! binary in `main.rs` wires them to timers, listeners and `localStorage`.

pub mod config;
pub mod countdown;
pub mod sequence;
pub mod signup;
pub mod storage;
pub mod theme;

pub use countdown::{Breakdown, Countdown, CountdownEvent, LaunchPolicy, LaunchTarget, Ticker};
pub use sequence::SequenceMatcher;
pub use signup::{FormAction, FormState, SignupEndpoint, SignupError};
pub use storage::{BrowserStorage, KeyValueStore, MemoryStore};
pub use theme::Theme;
