//! Staged builder for `POST /v1/users`.
//!
//! ```text
//! CreateUserBuilder
//!   → .token(..)?                  → CreateUserUsername
//!   → .username(..)?               → CreateUserAgreement
//!   → .agree_terms_of_service(..)  → CreateUserMinor
//!   → .not_minor(..)               → CreateUserOptions
//!   → [.thanks_code(..)] .build()  → CreateUser
//! ```
//!
//! ```compile_fail
//! # fn f(client: &pixela::PixelaClient) -> pixela::Result<()> {
//! // the agreement step is missing, so there is nothing to build
//! let _ = client.create_user().token("secret-token")?.username("alice")?.build();
//! # Ok(()) }
//! ```

use super::{CreateUser, CreateUserBody, YesNo};
use crate::types::{UserToken, Username};
use crate::Result;

pub struct CreateUserBuilder {
    _priv: (),
}

impl CreateUserBuilder {
    pub(crate) fn new() -> Self {
        Self { _priv: () }
    }

    pub fn token(self, token: impl Into<String>) -> Result<CreateUserUsername> {
        Ok(CreateUserUsername {
            token: UserToken::parse(token)?,
        })
    }
}

pub struct CreateUserUsername {
    token: UserToken,
}

impl CreateUserUsername {
    pub fn username(self, username: impl Into<String>) -> Result<CreateUserAgreement> {
        Ok(CreateUserAgreement {
            token: self.token,
            username: Username::parse(username)?,
        })
    }
}

pub struct CreateUserAgreement {
    token: UserToken,
    username: Username,
}

impl CreateUserAgreement {
    pub fn agree_terms_of_service(self, agree: bool) -> CreateUserMinor {
        CreateUserMinor {
            token: self.token,
            username: self.username,
            agree: agree.into(),
        }
    }
}

pub struct CreateUserMinor {
    token: UserToken,
    username: Username,
    agree: YesNo,
}

impl CreateUserMinor {
    pub fn not_minor(self, not_minor: bool) -> CreateUserOptions {
        CreateUserOptions {
            body: CreateUserBody {
                token: self.token,
                username: self.username,
                agree_terms_of_service: self.agree,
                not_minor: not_minor.into(),
                thanks_code: None,
            },
        }
    }
}

/// Final step: buildable, with an optional thanks code.
pub struct CreateUserOptions {
    body: CreateUserBody,
}

impl CreateUserOptions {
    pub fn thanks_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.body.thanks_code = if code.is_empty() { None } else { Some(code) };
        self
    }

    pub fn build(self) -> CreateUser {
        CreateUser { body: self.body }
    }
}
