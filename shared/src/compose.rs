//! Compose-link construction for the relayer transfer email.
//!
//! Every link is addressed to the relayer mailbox; the sender's address is
//! only used to pick which webmail compose page to open.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::model::Currency;

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const GMAIL_COMPOSE: &str = "https://mail.google.com/mail/?view=cm&fs=1";
const OUTLOOK_COMPOSE: &str = "https://outlook.live.com/mail/0/compose";
const PROTON_COMPOSE: &str = "https://mail.protonmail.com/compose";
const GMAIL_SENT_SEARCH: &str = "https://mail.google.com/mail/u/0/#search/";

const OUTLOOK_DOMAINS: [&str; 2] = ["@outlook.com", "@hotmail.com"];
const PROTON_DOMAINS: [&str; 3] = ["@protonmail.com", "@proton.me", "@pm.me"];

const MAX_TLD_LEN: usize = 16;
const MIN_TLD_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailProvider {
    MailApp,
    Gmail,
    Outlook,
    Protonmail,
}

impl EmailProvider {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MailApp => "Mail App",
            Self::Gmail => "Gmail",
            Self::Outlook => "Outlook",
            Self::Protonmail => "Protonmail (manually copy-paste from below)",
        }
    }

    /// Webmail provider for a sender address. Unknown domains open Gmail.
    #[must_use]
    pub fn for_sender(from_email: &str) -> Self {
        if from_email.ends_with("@gmail.com") {
            Self::Gmail
        } else if OUTLOOK_DOMAINS.iter().any(|d| from_email.ends_with(d)) {
            Self::Outlook
        } else if PROTON_DOMAINS.iter().any(|d| from_email.ends_with(d)) {
            Self::Protonmail
        } else {
            Self::Gmail
        }
    }

    fn compose_url(self, to: &str, subject: &str, body: &str) -> String {
        let to = encode_component(to);
        let subject = encode_component(subject);
        let body = encode_component(body);
        match self {
            Self::MailApp => format!("mailto:{to}?subject={subject}&body={body}"),
            Self::Gmail => format!("{GMAIL_COMPOSE}&to={to}&su={subject}&body={body}"),
            Self::Outlook => format!("{OUTLOOK_COMPOSE}?to={to}&subject={subject}&body={body}"),
            Self::Protonmail => {
                format!("{PROTON_COMPOSE}?to={to}&subject={subject}&body={body}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeLink {
    pub provider: EmailProvider,
    pub provider_name: String,
    pub url: String,
}

/// Builds the link that opens a pre-filled compose window addressed to
/// `relayer`. Total: every input yields a link.
#[must_use]
pub fn build_compose_link(
    relayer: &str,
    from_email: &str,
    subject: &str,
    body: &str,
    is_small_screen: bool,
) -> ComposeLink {
    let provider = if is_small_screen {
        EmailProvider::MailApp
    } else {
        EmailProvider::for_sender(from_email)
    };

    ComposeLink {
        provider,
        provider_name: provider.label().to_string(),
        url: provider.compose_url(relayer, subject, body),
    }
}

#[must_use]
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Subject line the relayer parses: `Send {amount} {CURRENCY} to {recipient}`.
#[must_use]
pub fn transfer_subject(amount: Option<u64>, currency: Currency, to_email: &str) -> String {
    format!("Send {} {currency} to {to_email}", amount.unwrap_or(0))
}

/// Gmail search listing messages sent to the relayer.
#[must_use]
pub fn sent_mail_search_url(relayer: &str) -> String {
    format!(
        "{GMAIL_SENT_SEARCH}{}",
        encode_component(&format!("to:{relayer}"))
    )
}

/// Text between the first and second `@`, when present and non-empty.
#[must_use]
pub fn sender_domain(from_email: &str) -> Option<&str> {
    from_email
        .split('@')
        .nth(1)
        .filter(|domain| !domain.is_empty())
}

/// Shape check: `local@domain.tld` with a 2-16 letter TLD.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, rest)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return false;
    }

    if !rest
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'))
    {
        return false;
    }

    // The TLD is letters only, so it has to follow the last dot.
    let Some((domain, tld)) = rest.rsplit_once('.') else {
        return false;
    };

    !domain.is_empty()
        && (MIN_TLD_LEN..=MAX_TLD_LEN).contains(&tld.len())
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}
