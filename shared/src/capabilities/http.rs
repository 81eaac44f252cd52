use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const MAX_URL_LENGTH: usize = 2048;
pub const ONBOARD_QUERY_PARAM: &str = "data";

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL exceeds maximum length of {max} bytes")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("network response was not ok: HTTP {0}")]
    Status(u16),
}

impl OnboardingError {
    /// Classifies the shell's answer to the onboarding GET.
    pub fn check(response: &Result<u16, String>) -> Result<u16, Self> {
        match response {
            Ok(status) if (200..300).contains(status) => Ok(*status),
            Ok(status) => Err(Self::Status(*status)),
            Err(message) => Err(Self::Request(message.clone())),
        }
    }
}

/// `{endpoint}?data={from_email}` with the sender query-encoded.
pub fn onboarding_url(endpoint: &str, from_email: &str) -> Result<Url, EndpointError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(EndpointError::InvalidUrl {
            url: String::new(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    let mut url = Url::parse(trimmed).map_err(|e| EndpointError::InvalidUrl {
        url: truncate_url(trimmed),
        reason: e.to_string(),
    })?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(EndpointError::InvalidUrl {
            url: truncate_url(trimmed),
            reason: format!("invalid scheme '{scheme}', only 'http' and 'https' are allowed"),
        });
    }

    if url.host_str().is_none() {
        return Err(EndpointError::InvalidUrl {
            url: truncate_url(trimmed),
            reason: "URL must have a host".to_string(),
        });
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(EndpointError::InvalidUrl {
            url: truncate_url(trimmed),
            reason: "credentials in URL are not allowed".to_string(),
        });
    }

    url.query_pairs_mut()
        .append_pair(ONBOARD_QUERY_PARAM, from_email);

    if url.as_str().len() > MAX_URL_LENGTH {
        return Err(EndpointError::TooLong {
            max: MAX_URL_LENGTH,
        });
    }

    Ok(url)
}

fn truncate_url(url: &str) -> String {
    if url.len() <= 100 {
        url.to_string()
    } else {
        let cut = (0..=100).rev().find(|i| url.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &url[..cut])
    }
}
