// lib.rs - sendeth transfer form core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod amount;
pub mod capabilities;
pub mod compose;
pub mod countdown;
pub mod event;
pub mod model;

use serde::{Deserialize, Serialize};

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use compose::{build_compose_link, is_valid_email, ComposeLink, EmailProvider};
pub use countdown::{CountdownState, ResendCountdown, TimerId, TimerKind};
pub use crux_core::{render::Render, App as CruxApp};
pub use event::Event;
pub use model::{Currency, FormConfig, Model};

pub const MAIL_APP_SEND_LABEL: &str = "Send via Mail App";
pub const MAIL_APP_RESEND_LABEL: &str = "Failed? Re-send via Gmail";
pub const WEBMAIL_RESEND_LABEL: &str = "Failed? Re-send via default mail app:";
pub const WEBMAIL_FALLBACK_NAME: &str = "Gmail";

#[must_use]
pub fn countdown_message(seconds_remaining: u32) -> String {
    format!("If you don't see a confirmation, re-send in {seconds_remaining} seconds...")
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyOption {
    pub currency: Currency,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewModel {
    pub from_email: String,
    pub to_email: String,
    pub amount_text: String,
    pub amount: Option<u64>,
    pub currency: Currency,
    pub currency_options: Vec<CurrencyOption>,
    pub dropdown_open: bool,

    pub provider_name: String,
    pub compose_url: String,
    pub subject: String,
    pub relayer_address: String,

    pub send_enabled: bool,
    pub mail_app_label: String,
    pub webmail_label: String,

    pub seconds_remaining: Option<u32>,
    pub countdown_message: Option<String>,

    pub email_sent: bool,
    pub view_sent_url: Option<String>,

    /// Recipient/subject panel for copy-paste, shown once the form is sendable.
    pub show_manual_details: bool,
    pub recipient_copied: bool,
    pub subject_copied: bool,
}

pub mod app {
    use tracing::{debug, info, trace, warn};

    use super::*;
    use crate::amount::{clamp_for_currency, normalize_amount_with_cap};
    use crate::capabilities::{onboarding_url, CapabilityError, OnboardingError, TimerOutput};
    use crate::compose::{sender_domain, sent_mail_search_url};
    use crate::countdown::TimerOutcome;

    #[derive(Default)]
    pub struct App;

    impl App {
        fn start_countdown(model: &mut Model, caps: &Capabilities) {
            let plan = model.countdown.start();

            if let Some(previous) = plan.cancel {
                for id in previous {
                    caps.timer.cancel(id);
                }
            }

            caps.timer
                .start(plan.tick, model.config.tick_interval_ms, Event::TimerFired);
            caps.timer
                .start(plan.ceiling, model.config.ceiling_ms, Event::TimerFired);
        }

        fn request_onboarding(model: &Model, caps: &Capabilities) -> Result<(), CapabilityError> {
            let url = onboarding_url(&model.config.onboard_endpoint, &model.from_email)?;

            caps.http.get(url.as_str()).send(|result| {
                Event::OnboardingResponded(
                    result
                        .map(|response| u16::from(response.status()))
                        .map_err(|e| e.to_string()),
                )
            });

            Ok(())
        }

        fn send(model: &mut Model, caps: &Capabilities, via_webmail: bool) {
            if !model.send_enabled() {
                debug!(
                    has_amount = model.amount.is_some(),
                    "send ignored: form incomplete"
                );
                return;
            }

            model.email_sent = true;
            Self::start_countdown(model, caps);

            info!(
                via_webmail,
                currency = %model.currency,
                sender_domain = sender_domain(&model.from_email).unwrap_or("none"),
                generation = model.countdown.generation(),
                "transfer email composed"
            );

            // Fire-and-forget: the countdown runs whatever happens here.
            if via_webmail {
                if let Err(e) = Self::request_onboarding(model, caps) {
                    warn!(error = %e, "onboarding request not sent");
                }
            }

            caps.render.render();
        }

        fn handle_timer(model: &mut Model, caps: &Capabilities, output: TimerOutput) {
            let id = match output.fired() {
                Ok(id) => id,
                Err(e) => {
                    trace!(error = %e, "timer ended without firing");
                    return;
                }
            };

            match model.countdown.on_timer(id) {
                TimerOutcome::Stale => {}
                TimerOutcome::Rearm(next) => {
                    caps.timer
                        .start(next, model.config.tick_interval_ms, Event::TimerFired);
                    caps.render.render();
                }
                TimerOutcome::Finished { cancel } => {
                    if let Some(pending) = cancel {
                        caps.timer.cancel(pending);
                    }
                    caps.render.render();
                }
            }
        }

        fn build_currency_options(model: &Model) -> Vec<CurrencyOption> {
            Currency::ALL
                .iter()
                .map(|&currency| CurrencyOption {
                    currency,
                    label: currency.to_string(),
                    selected: currency == model.currency,
                })
                .collect()
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            trace!(
                event = event.name(),
                user = event.is_user_initiated(),
                "update"
            );

            match event {
                Event::Noop => {}

                Event::ConfigLoaded(config) => match config.validate() {
                    Ok(()) => {
                        model.countdown.set_start_seconds(config.countdown_seconds);
                        model.amount =
                            clamp_for_currency(model.amount, model.currency, config.test_amount_cap);
                        model.config = config;
                        debug!("form config applied");
                        caps.render.render();
                    }
                    Err(e) => {
                        warn!(error = %e, "config rejected, keeping current settings");
                    }
                },

                Event::ViewportResized { width } => {
                    model.viewport_width = Some(width);
                    caps.render.render();
                }

                Event::FromEmailChanged(from_email) => {
                    model.from_email = from_email;
                    caps.render.render();
                }

                Event::ToEmailChanged(to_email) => {
                    model.to_email = to_email;
                    caps.render.render();
                }

                Event::AmountChanged(raw) => {
                    model.amount = normalize_amount_with_cap(
                        &raw,
                        model.currency,
                        model.config.test_amount_cap,
                    );
                    model.amount_text = raw;
                    caps.render.render();
                }

                Event::CurrencyDropdownToggled => {
                    model.dropdown_open = !model.dropdown_open;
                    caps.render.render();
                }

                Event::CurrencyDropdownDismissed => {
                    if model.dropdown_open {
                        model.dropdown_open = false;
                        caps.render.render();
                    }
                }

                Event::CurrencySelected(currency) => {
                    model.currency = currency;
                    model.dropdown_open = false;
                    model.amount =
                        clamp_for_currency(model.amount, currency, model.config.test_amount_cap);
                    debug!(%currency, "currency selected");
                    caps.render.render();
                }

                Event::SendViaMailAppClicked => Self::send(model, caps, false),
                Event::SendViaWebmailClicked => Self::send(model, caps, true),

                Event::CopyRecipientClicked => {
                    caps.clipboard.write(model.config.relayer_address.clone());
                    model.recipient_copied = true;
                    caps.render.render();
                }

                Event::CopySubjectClicked => {
                    caps.clipboard.write(model.subject());
                    model.subject_copied = true;
                    caps.render.render();
                }

                Event::TimerFired(output) => Self::handle_timer(model, caps, output),

                Event::OnboardingResponded(response) => {
                    match OnboardingError::check(&response) {
                        Ok(status) => debug!(status, "onboarding request acknowledged"),
                        Err(e) => warn!(error = %e, "problem with the onboarding request"),
                    }
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let subject = model.subject();
            let link = build_compose_link(
                &model.config.relayer_address,
                &model.from_email,
                &subject,
                "",
                model.is_small_screen(),
            );
            let seconds_remaining = model.countdown.seconds_remaining();
            let counting = seconds_remaining.is_some();
            let send_enabled = model.send_enabled();

            let webmail_label = if counting {
                WEBMAIL_RESEND_LABEL.to_string()
            } else {
                format!(
                    "Send via {}",
                    sender_domain(&model.from_email).unwrap_or(WEBMAIL_FALLBACK_NAME)
                )
            };

            ViewModel {
                from_email: model.from_email.clone(),
                to_email: model.to_email.clone(),
                amount_text: model.amount_text.clone(),
                amount: model.amount,
                currency: model.currency,
                currency_options: Self::build_currency_options(model),
                dropdown_open: model.dropdown_open,
                provider_name: link.provider_name,
                compose_url: link.url,
                subject,
                relayer_address: model.config.relayer_address.clone(),
                send_enabled,
                mail_app_label: if counting {
                    MAIL_APP_RESEND_LABEL
                } else {
                    MAIL_APP_SEND_LABEL
                }
                .to_string(),
                webmail_label,
                seconds_remaining,
                countdown_message: seconds_remaining.map(countdown_message),
                email_sent: model.email_sent,
                view_sent_url: model
                    .email_sent
                    .then(|| sent_mail_search_url(&model.config.relayer_address)),
                show_manual_details: send_enabled,
                recipient_copied: model.recipient_copied,
                subject_copied: model.subject_copied,
            }
        }
    }
}
