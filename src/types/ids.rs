//! Validated identifiers.
//!
//! Every constructor validates synchronously so malformed values never reach
//! the network.

use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]{1,32}$").expect("static username regex"));
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ -~]{8,128}$").expect("static token regex"));
static GRAPH_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9-]{1,16}$").expect("static graph id regex"));
static WEBHOOK_HASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("static webhook hash regex"));

fn check(re: &Regex, value: &str, field: &str) -> Result<()> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(Error::validation_with_context(
            format!("invalid {}: {:?}", field, value),
            ErrorContext::new()
                .with_field_path(field)
                .with_details(format!("expected {}", re.as_str())),
        ))
    }
}

/// Pixela user name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check(&USERNAME_RE, &value, "username")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Secret token sent in the `X-USER-TOKEN` header. Never printed.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserToken(String);

impl UserToken {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if TOKEN_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            // the rejected value is deliberately left out of the message
            Err(Error::validation_with_context(
                "invalid token",
                ErrorContext::new()
                    .with_field_path("token")
                    .with_details("expected 8 to 128 printable ASCII characters"),
            ))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserToken(***)")
    }
}

/// Graph identifier, unique per user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GraphId(String);

impl GraphId {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check(&GRAPH_ID_RE, &value, "graph id")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Hash identifying a registered webhook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WebhookHash(String);

impl WebhookHash {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        check(&WEBHOOK_HASH_RE, &value, "webhook hash")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

macro_rules! string_newtype_conversions {
    ($($ty:ident),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = Error;
            fn try_from(value: String) -> Result<Self> {
                Self::parse(value)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = Error;
            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }
    )*};
}

string_newtype_conversions!(Username, UserToken, GraphId, WebhookHash);

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for WebhookHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
