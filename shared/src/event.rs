use serde::{Deserialize, Serialize};

use crate::capabilities::TimerOutput;
use crate::model::{Currency, FormConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Event {
    #[default]
    Noop,

    ConfigLoaded(FormConfig),
    ViewportResized {
        width: u32,
    },

    // Change and blur both land here.
    FromEmailChanged(String),
    ToEmailChanged(String),
    AmountChanged(String),

    CurrencyDropdownToggled,
    CurrencyDropdownDismissed,
    CurrencySelected(Currency),

    /// Small-screen button; the shell follows the compose link itself.
    SendViaMailAppClicked,
    /// Desktop button; also pings the onboarding endpoint.
    SendViaWebmailClicked,

    CopyRecipientClicked,
    CopySubjectClicked,

    // --- Internal: produced by capabilities, never by the shell ---
    #[serde(skip)]
    TimerFired(TimerOutput),
    #[serde(skip)]
    OnboardingResponded(Result<u16, String>),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::ConfigLoaded(_) => "config_loaded",
            Self::ViewportResized { .. } => "viewport_resized",
            Self::FromEmailChanged(_) => "from_email_changed",
            Self::ToEmailChanged(_) => "to_email_changed",
            Self::AmountChanged(_) => "amount_changed",
            Self::CurrencyDropdownToggled => "currency_dropdown_toggled",
            Self::CurrencyDropdownDismissed => "currency_dropdown_dismissed",
            Self::CurrencySelected(_) => "currency_selected",
            Self::SendViaMailAppClicked => "send_via_mail_app_clicked",
            Self::SendViaWebmailClicked => "send_via_webmail_clicked",
            Self::CopyRecipientClicked => "copy_recipient_clicked",
            Self::CopySubjectClicked => "copy_subject_clicked",
            Self::TimerFired(_) => "timer_fired",
            Self::OnboardingResponded(_) => "onboarding_responded",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Noop
                | Self::ConfigLoaded(_)
                | Self::ViewportResized { .. }
                | Self::TimerFired(_)
                | Self::OnboardingResponded(_)
        )
    }
}
