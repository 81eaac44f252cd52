mod clipboard;
mod http;
mod timer;

pub use self::clipboard::{Clipboard, ClipboardOperation};
pub use self::http::{
    onboarding_url, EndpointError, OnboardingError, MAX_URL_LENGTH,
    ONBOARD_QUERY_PARAM,
};
pub use self::timer::{Timer, TimerError, TimerOperation, TimerOutput};

pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;
use crate::App;

#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("Onboarding error: {0}")]
    Onboarding(#[from] OnboardingError),

    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
}

// Field types are spelled out so the derived `Effect` variants are named
// `Http`, `Render`, `Timer` and `Clipboard`.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub timer: Timer<Event>,
    pub clipboard: Clipboard<Event>,
}
