use crate::error::auth::AuthError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;
use std::str::FromStr;

/// Separator between the key identifier and the signing secret.
pub const CREDENTIAL_SEPARATOR: char = '.';

/// An API key split into its public identifier and its signing secret.
#[derive(Debug, Clone)]
pub struct Credential {
    identifier: String,
    secret: RedactedSecret,
}

impl Credential {
    /// Parse an `identifier.secret` key.
    ///
    /// The key must contain exactly one separator and a non-empty identifier.
    /// An empty secret is accepted here and rejected at signing time.
    /// The key is split as given; surrounding whitespace is not stripped.
    #[track_caller]
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = raw.split(CREDENTIAL_SEPARATOR).collect();

        let [identifier, secret] = parts.as_slice() else {
            return Err(AuthError::InvalidCredentialFormat {
                message: format!(
                    "expected `<id>{CREDENTIAL_SEPARATOR}<secret>`, found {} segment(s)",
                    parts.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if identifier.is_empty() {
            return Err(AuthError::InvalidCredentialFormat {
                message: String::from("key identifier is empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            identifier: (*identifier).to_owned(),
            secret: RedactedSecret::new(*secret),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &RedactedSecret {
        &self.secret
    }
}

impl FromStr for Credential {
    type Err = AuthError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Credential::parse(s)
    }
}
