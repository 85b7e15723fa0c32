//! Application-level configuration constants.

use crate::countdown::{LaunchPolicy, LaunchTarget};
use crate::signup::SignupEndpoint;

// Countdown
pub const TICK_MS: u32 = 1_000;
/// 2026-02-01T00:00:00Z
pub const FIXED_LAUNCH_MS: i64 = 1_769_904_000_000;
pub const ROLLING_OFFSET_DAYS: i64 = 15;
pub const LAUNCH_POLICY: LaunchPolicy = LaunchPolicy::RollingPersisted {
    offset_days: ROLLING_OFFSET_DAYS,
};
pub const FIXED_LAUNCH_POLICY: LaunchPolicy = LaunchPolicy::Fixed(LaunchTarget::from_millis(FIXED_LAUNCH_MS));

// Storage keys
pub const LAUNCH_DATE_KEY: &str = "launchDate";
pub const THEME_KEY: &str = "theme";

// UI Behavior
pub const MESSAGE_CLEAR_MS: u32 = 5_000;
pub const EASTER_EGG_MS: u32 = 1_000;

// Signup
pub const SIGNUP_URL: &str =
    "https://script.google.com/macros/s/AKfycbzPD5yWJpAWK69tIQGftYfLOJ6m_1XsQj6mgAIQAaAGkP4oHbZ2HtAgLidk6Dt9vzyP/exec";
pub const SIMULATED_DELAY_MS: u32 = 1_200;
pub const SIMULATED_JITTER_MS: u32 = 600;

/// Debug builds never hit the real sheet.
#[cfg(debug_assertions)]
pub fn signup_endpoint() -> SignupEndpoint {
    SignupEndpoint::Simulated {
        delay_ms: SIMULATED_DELAY_MS,
    }
}

#[cfg(not(debug_assertions))]
pub fn signup_endpoint() -> SignupEndpoint {
    SignupEndpoint::Remote {
        url: SIGNUP_URL.to_string(),
    }
}
