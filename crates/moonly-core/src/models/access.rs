use serde::{Deserialize, Serialize};

/// Outcome of a playback access check.
///
/// The default is a denial, so any code path that cannot confirm access ends
/// up closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
}

impl AccessDecision {
    pub const fn allow() -> Self {
        Self { allowed: true }
    }

    pub const fn deny() -> Self {
        Self { allowed: false }
    }
}
