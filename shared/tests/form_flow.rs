mod common;

use common::Shell;
use crux_core::App as _;
use shared::{App, Currency, Event, FormConfig};

#[test]
fn compose_and_send_via_webmail() {
    let mut shell = Shell::desktop();
    shell.dispatch(Event::FromEmailChanged("alice@gmail.com".into()));
    shell.dispatch(Event::ToEmailChanged("bob@example.com".into()));
    shell.dispatch(Event::AmountChanged("150".into()));

    // TEST is the default currency, so the amount is capped.
    assert_eq!(shell.model.amount, Some(100));

    let view = App.view(&shell.model);
    assert!(view.send_enabled);
    assert_eq!(view.provider_name, "Gmail");
    assert_eq!(view.subject, "Send 100 TEST to bob@example.com");
    assert_eq!(
        view.compose_url,
        "https://mail.google.com/mail/?view=cm&fs=1&to=relayer%40sendeth.org\
         &su=Send%20100%20TEST%20to%20bob%40example.com&body="
    );
    assert_eq!(view.webmail_label, "Send via gmail.com");

    shell.dispatch(Event::SendViaWebmailClicked);

    assert_eq!(shell.http_requests.len(), 1);
    let request = &shell.http_requests[0];
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.url,
        "https://localhost:3000/api/onboard?data=alice%40gmail.com"
    );

    let view = App.view(&shell.model);
    assert!(view.email_sent);
    assert_eq!(view.seconds_remaining, Some(60));
    assert_eq!(view.webmail_label, "Failed? Re-send via default mail app:");
    assert!(view.view_sent_url.is_some());
    assert_eq!(shell.pending_ids().len(), 2);
}

#[test]
fn mail_app_send_skips_onboarding_request() {
    let mut shell = Shell::default();
    shell.dispatch(Event::ViewportResized { width: 390 });
    shell.fill_sendable_form("alice@outlook.com");

    let view = App.view(&shell.model);
    assert_eq!(view.provider_name, "Mail App");
    assert!(view.compose_url.starts_with("mailto:relayer%40sendeth.org?subject="));

    shell.dispatch(Event::SendViaMailAppClicked);

    assert!(shell.http_requests.is_empty());
    assert_eq!(shell.model.countdown.seconds_remaining(), Some(60));
    assert_eq!(App.view(&shell.model).mail_app_label, "Failed? Re-send via Gmail");
}

#[test]
fn incomplete_form_cannot_send() {
    let mut shell = Shell::desktop();
    shell.dispatch(Event::FromEmailChanged("alice@gmail.com".into()));
    shell.dispatch(Event::ToEmailChanged("bob@example".into()));
    shell.dispatch(Event::AmountChanged("10".into()));
    let renders = shell.renders;

    shell.dispatch(Event::SendViaWebmailClicked);
    shell.dispatch(Event::SendViaMailAppClicked);

    assert_eq!(shell.renders, renders);
    assert!(shell.http_requests.is_empty());
    assert!(shell.pending_ids().is_empty());
    assert!(!shell.model.email_sent);

    shell.dispatch(Event::ToEmailChanged("bob@example.com".into()));
    shell.dispatch(Event::AmountChanged("0".into()));
    shell.dispatch(Event::SendViaWebmailClicked);
    assert!(!shell.model.email_sent);
}

#[test]
fn onboarding_failure_is_logged_not_surfaced() {
    let mut shell = Shell::desktop();
    shell.fill_sendable_form("alice@pm.me");
    shell.dispatch(Event::SendViaWebmailClicked);
    let before = App.view(&shell.model);
    let renders = shell.renders;

    shell.dispatch(Event::OnboardingResponded(Err("connection refused".into())));
    shell.dispatch(Event::OnboardingResponded(Ok(500)));

    assert_eq!(App.view(&shell.model), before);
    assert_eq!(shell.renders, renders);
    assert_eq!(shell.model.countdown.seconds_remaining(), Some(60));
}

#[test]
fn bad_endpoint_still_starts_countdown() {
    let mut shell = Shell::desktop();
    // Validation rejects this via ConfigLoaded, so poke the model directly.
    shell.model.config.onboard_endpoint = "not a url".into();
    shell.fill_sendable_form("alice@gmail.com");

    shell.dispatch(Event::SendViaWebmailClicked);

    assert!(shell.http_requests.is_empty());
    assert_eq!(shell.model.countdown.seconds_remaining(), Some(60));
}

#[test]
fn copy_buttons_write_to_clipboard() {
    let mut shell = Shell::desktop();
    shell.fill_sendable_form("alice@gmail.com");
    shell.dispatch(Event::CurrencySelected(Currency::Dai));

    shell.dispatch(Event::CopyRecipientClicked);
    shell.dispatch(Event::CopySubjectClicked);

    assert_eq!(
        shell.clipboard,
        vec![
            "relayer@sendeth.org".to_string(),
            "Send 25 DAI to bob@example.com".to_string()
        ]
    );
    let view = App.view(&shell.model);
    assert!(view.recipient_copied);
    assert!(view.subject_copied);
}

#[test]
fn currency_dropdown_and_cap() {
    let mut shell = Shell::desktop();
    shell.dispatch(Event::CurrencySelected(Currency::Usdc));
    shell.dispatch(Event::AmountChanged("150".into()));
    assert_eq!(shell.model.amount, Some(150));

    shell.dispatch(Event::CurrencyDropdownToggled);
    assert!(App.view(&shell.model).dropdown_open);

    shell.dispatch(Event::CurrencyDropdownDismissed);
    assert!(!shell.model.dropdown_open);

    shell.dispatch(Event::CurrencyDropdownToggled);
    shell.dispatch(Event::CurrencySelected(Currency::Test));
    assert!(!shell.model.dropdown_open);
    assert_eq!(shell.model.amount, Some(100));
    assert_eq!(shell.model.amount_text, "150");
}

#[test]
fn dismissing_closed_dropdown_does_not_render() {
    let mut shell = Shell::desktop();
    let renders = shell.renders;
    shell.dispatch(Event::CurrencyDropdownDismissed);
    assert_eq!(shell.renders, renders);
}

#[test]
fn config_from_shell() {
    let mut shell = Shell::desktop();
    let config = FormConfig::from_json(
        r#"{"onboard_endpoint": "https://sendeth.org/api/onboard", "countdown_seconds": 30}"#,
    )
    .expect("valid config");
    shell.dispatch(Event::ConfigLoaded(config));

    shell.fill_sendable_form("alice@gmail.com");
    shell.dispatch(Event::SendViaWebmailClicked);

    assert_eq!(
        shell.http_requests[0].url,
        "https://sendeth.org/api/onboard?data=alice%40gmail.com"
    );
    assert_eq!(shell.model.countdown.seconds_remaining(), Some(30));
}

#[test]
fn invalid_config_is_ignored() {
    let mut shell = Shell::desktop();
    let config = FormConfig {
        relayer_address: "nobody".into(),
        ..FormConfig::default()
    };
    shell.dispatch(Event::ConfigLoaded(config));
    assert_eq!(shell.model.config, FormConfig::default());
}
