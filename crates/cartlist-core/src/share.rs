//! Share message formatting
//!
//! Builds the plain-text message for a list and the deep link that hands it
//! to a messaging app. Opening the link is left to the front-end.

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::Item;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Default label in front of the list name
pub const DEFAULT_SHARE_LABEL: &str = "Shopping list";

/// Messaging apps a list can be shared to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTarget {
    WhatsApp,
    Messenger,
    Sms,
}

impl ShareTarget {
    /// All targets, in menu order
    pub const ALL: [ShareTarget; 3] = [
        ShareTarget::WhatsApp,
        ShareTarget::Messenger,
        ShareTarget::Sms,
    ];

    /// Parse a target identifier; unknown identifiers give `None`
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "whatsapp" => Some(ShareTarget::WhatsApp),
            "messenger" => Some(ShareTarget::Messenger),
            "sms" => Some(ShareTarget::Sms),
            _ => None,
        }
    }

    /// Identifier as used on the command line
    pub fn id(self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Messenger => "messenger",
            ShareTarget::Sms => "sms",
        }
    }

    /// Deep link carrying `message`
    pub fn url(self, message: &str) -> String {
        let encoded = utf8_percent_encode(message, URI_COMPONENT);
        match self {
            ShareTarget::WhatsApp => format!("whatsapp://send?text={}", encoded),
            ShareTarget::Messenger => format!("fb-messenger://share/?link={}", encoded),
            ShareTarget::Sms => format!("sms:?body={}", encoded),
        }
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error for unrecognized share target identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown share target '{0}' (expected one of {})", target_ids())]
pub struct UnknownShareTarget(pub String);

fn target_ids() -> String {
    ShareTarget::ALL
        .iter()
        .map(|target| target.id())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for ShareTarget {
    type Err = UnknownShareTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownShareTarget(s.to_string()))
    }
}

/// Format a list for sharing: `"<label>: <list>\n\n"` then one item per line
pub fn format_share_message(label: &str, list_name: &str, items: &[Item]) -> String {
    let body = items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}: {}\n\n{}", label, list_name, body)
}
