//! Local credential cache.
//!
//! Username and token are kept in a `.properties` style file:
//!
//! ```text
//! # pixela
//! pixela.username=alice
//! pixela.token=secret-token
//! ```

use crate::types::{UserToken, Username};
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const USERNAME_KEY: &str = "pixela.username";
pub const TOKEN_KEY: &str = "pixela.token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    token: UserToken,
}

impl Credentials {
    pub fn new(username: Username, token: UserToken) -> Self {
        Self { username, token }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn token(&self) -> &UserToken {
        &self.token
    }

    pub fn into_parts(self) -> (Username, UserToken) {
        (self.username, self.token)
    }

    /// Read credentials from the properties file at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), "credentials loaded");
        Self::from_properties(&text).map_err(|e| match e {
            Error::Configuration { message, context } => Error::Configuration {
                message,
                context: context.with_source(path.display().to_string()),
            },
            other => other,
        })
    }

    /// Write credentials to `path`, replacing any previous file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, self.to_properties()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!(path = %path.display(), "credentials saved");
        Ok(())
    }

    pub fn from_properties(text: &str) -> Result<Self> {
        let props = parse_properties(text);
        let username = required(&props, USERNAME_KEY)?;
        let token = required(&props, TOKEN_KEY)?;
        Ok(Self {
            username: Username::parse(username)?,
            token: UserToken::parse(token)?,
        })
    }

    pub fn to_properties(&self) -> String {
        format!(
            "{}={}\n{}={}\n",
            USERNAME_KEY,
            escape_value(self.username.as_str()),
            TOKEN_KEY,
            escape_value(self.token.expose())
        )
    }
}

fn required<'a>(props: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    props
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            Error::configuration_with_context(
                format!("missing credential {}", key),
                ErrorContext::new().with_field_path(key),
            )
        })
}

/// `key=value` or `key:value` lines; `#` and `!` start comments.
///
/// Whitespace before a value is skipped, whitespace after it is kept, and
/// backslash escapes are resolved as in Java properties files.
fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut props = HashMap::new();
    for line in text.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some(split) = line.find(&['=', ':'][..]) else {
            continue;
        };
        let key = line[..split].trim();
        let value = unescape_value(line[split + 1..].trim_start());
        props.insert(key.to_string(), value);
    }
    props
}

/// Backslashes are doubled and leading spaces escaped so `parse_properties`
/// reads back the exact value.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut leading = true;
    for c in value.chars() {
        match c {
            ' ' if leading => out.push_str("\\ "),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
        leading = leading && c == ' ';
    }
    out
}

fn unescape_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
