//! HS256 signed-claims tokens sent in the `Authorization` header.
//!
//! Layout is the usual compact form:
//! `base64url(header) . base64url(claims) . base64url(HMAC-SHA256(secret, first two parts))`
//! with the service-specific header field `sign_type = "SIGN"`.

use crate::auth::credential::Credential;
use crate::error::auth::AuthError;

use common::{ErrorLocation, RedactedSecret};

use std::fmt;
use std::panic::Location;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a signed token. Tokens are never refreshed.
pub const TOKEN_TTL: Duration = Duration::from_secs(72 * 60 * 60);

const SIGNING_ALGORITHM: &str = "HS256";
const SIGN_TYPE: &str = "SIGN";
const TOKEN_TYPE: &str = "JWT";
const SEGMENT_SEPARATOR: char = '.';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub sign_type: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: String::from(SIGNING_ALGORITHM),
            sign_type: String::from(SIGN_TYPE),
            typ: String::from(TOKEN_TYPE),
        }
    }
}

/// Claims carried by the token, all times in unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub api_key: String,
    pub exp: i64,
    pub timestamp: i64,
}

/// A compact signed token plus the claims it was built from.
#[derive(Clone)]
pub struct SignedToken {
    value: String,
    claims: TokenClaims,
}

impl SignedToken {
    /// Decode a compact token without checking its signature.
    #[track_caller]
    pub fn decode(token: &str) -> Result<Self, AuthError> {
        let [_, claims, _] = split_segments(token)?;
        let claims = decode_segment::<TokenClaims>(claims)?;

        Ok(Self {
            value: token.to_owned(),
            claims,
        })
    }

    /// Compact form, as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    #[track_caller]
    pub fn header(&self) -> Result<TokenHeader, AuthError> {
        let [header, _, _] = split_segments(&self.value)?;
        decode_segment(header)
    }

    pub fn issued_at(&self) -> i64 {
        self.claims.timestamp
    }

    pub fn expires_at(&self) -> i64 {
        self.claims.exp
    }

    pub fn is_expired_at(&self, unix_seconds: i64) -> bool {
        unix_seconds >= self.claims.exp
    }

    /// Recompute the MAC with `secret` and compare in constant time.
    #[track_caller]
    pub fn verify(&self, secret: &RedactedSecret) -> Result<(), AuthError> {
        let [header, claims, signature] = split_segments(&self.value)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|e| AuthError::TokenDecode {
                message: format!("signature is not base64url: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut mac = new_mac(secret)?;
        mac.update(header.as_bytes());
        mac.update(&[SEGMENT_SEPARATOR as u8]);
        mac.update(claims.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::TokenDecode {
                message: String::from("signature does not match"),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedToken")
            .field("value", &"[REDACTED]")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Sign a token for `credential`, issued now.
#[track_caller]
pub fn sign_token(credential: &Credential) -> Result<SignedToken, AuthError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AuthError::TokenSigning {
            message: format!("system clock is before the unix epoch: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
    let issued_at = i64::try_from(now.as_secs()).map_err(|e| AuthError::TokenSigning {
        message: format!("current time does not fit a unix timestamp: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    sign_token_at(credential, issued_at)
}

/// Sign a token for `credential` as if issued at `issued_at` (unix seconds).
#[track_caller]
pub fn sign_token_at(credential: &Credential, issued_at: i64) -> Result<SignedToken, AuthError> {
    if credential.secret().is_empty() {
        return Err(AuthError::TokenSigning {
            message: format!(
                "signing secret for key `{}` is empty",
                credential.identifier()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let exp = issued_at
        .checked_add(TOKEN_TTL.as_secs() as i64)
        .ok_or_else(|| AuthError::TokenSigning {
            message: format!("expiry overflows for issued_at {issued_at}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let claims = TokenClaims {
        api_key: credential.identifier().to_owned(),
        exp,
        timestamp: issued_at,
    };

    let signing_input = format!(
        "{}{SEGMENT_SEPARATOR}{}",
        encode_segment(&TokenHeader::default())?,
        encode_segment(&claims)?
    );

    let mut mac = new_mac(credential.secret())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(SignedToken {
        value: format!("{signing_input}{SEGMENT_SEPARATOR}{signature}"),
        claims,
    })
}

#[track_caller]
fn new_mac(secret: &RedactedSecret) -> Result<HmacSha256, AuthError> {
    HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| AuthError::TokenSigning {
        message: format!("invalid HMAC key: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
fn encode_segment<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(|e| AuthError::TokenSigning {
        message: format!("failed to serialize token segment: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

#[track_caller]
fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| AuthError::TokenDecode {
            message: format!("segment is not base64url: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
    serde_json::from_slice(&bytes).map_err(|e| AuthError::TokenDecode {
        message: format!("segment is not valid JSON: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
fn split_segments(token: &str) -> Result<[&str; 3], AuthError> {
    let mut parts = token.split(SEGMENT_SEPARATOR);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None) => Ok([header, claims, signature]),
        _ => Err(AuthError::TokenDecode {
            message: format!(
                "expected 3 segments, found {}",
                token.split(SEGMENT_SEPARATOR).count()
            ),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
