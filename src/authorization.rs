//! The OAuth2 authorization aggregate and its cross-field validating builder.
//!
//! An [`OAuth2Authorization`] bundles an access-token claim-set with an
//! optional refresh token, a token type, a scope set and an optional expiry.
//! Every invariant is enforced once, synchronously, in
//! [`OAuth2AuthorizationBuilder::build`]: either a fully valid frozen object
//! is produced or a [`ClaimsError`] is returned. There is no partial-success
//! state.
//!
//! The expiry contract is deliberately asymmetric: `expires_at` must agree
//! with the access token's own `exp` claim when both are present, but is
//! never derived from it when only the claim is set. Callers that want a
//! top-level expiry must declare it explicitly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClaimsError;
use crate::jwt::{JwtClaimSet, JwtClaimSetBuilder};

/// Access token type per RFC 6749 §7.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenType {
    /// Bearer token (RFC 6750).
    #[default]
    #[serde(rename = "Bearer")]
    Bearer,
    /// MAC token.
    #[serde(rename = "MAC")]
    Mac,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Bearer => f.write_str("Bearer"),
            TokenType::Mac => f.write_str("MAC"),
        }
    }
}

impl FromStr for TokenType {
    type Err = String;

    // RFC 6749 token type names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bearer" => Ok(TokenType::Bearer),
            "mac" => Ok(TokenType::Mac),
            other => Err(format!("unknown token type: {other}")),
        }
    }
}

/// A granted authorization, frozen after construction.
///
/// # Example
///
/// ```rust
/// use oauth2_claimset::{OAuth2Authorization, TokenType};
///
/// let authorization = OAuth2Authorization::builder()
///     .access_token(|claims| claims.subject("user123"))
///     .scope("openid")
///     .scope("email")
///     .build()
///     .unwrap();
///
/// assert_eq!(authorization.token_type(), TokenType::Bearer);
/// assert_eq!(authorization.scope().len(), 2);
/// assert!(authorization.refresh_token().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuth2Authorization {
    access_token: JwtClaimSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    token_type: TokenType,
    scope: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl OAuth2Authorization {
    /// Create a builder.
    pub fn builder() -> OAuth2AuthorizationBuilder {
        OAuth2AuthorizationBuilder::default()
    }

    /// The access-token claim-set. Never empty.
    pub fn access_token(&self) -> &JwtClaimSet {
        &self.access_token
    }

    /// The refresh token, if one was granted.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// The token type; Bearer unless set otherwise.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// The granted scope set. Empty when no scope was granted, never absent.
    pub fn scope(&self) -> &BTreeSet<String> {
        &self.scope
    }

    /// The explicitly declared expiry, if any. Never derived from the access
    /// token's `exp` claim.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

/// Single-use builder for [`OAuth2Authorization`].
///
/// `access_token` applies configuration closures to one accumulating
/// claim-set builder, so repeated calls layer onto the same token. `scope`
/// adds a single value; `scopes` resets the whole set. `build` consumes the
/// builder and enforces the cross-field invariants.
#[derive(Debug, Clone, Default)]
pub struct OAuth2AuthorizationBuilder {
    access_token: JwtClaimSetBuilder,
    refresh_token: Option<String>,
    token_type: TokenType,
    scope: BTreeSet<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl OAuth2AuthorizationBuilder {
    /// Configure the access-token claim-set. Mandatory: the built token must
    /// end up non-empty.
    pub fn access_token<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(JwtClaimSetBuilder) -> JwtClaimSetBuilder,
    {
        self.access_token = configure(self.access_token);
        self
    }

    /// Set the refresh token.
    pub fn refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the token type. Bearer if never called.
    pub fn token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Add one scope value. Additive: prior scopes are kept.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope.insert(scope.into());
        self
    }

    /// Reset the scope set to exactly the given values, discarding any scope
    /// accumulated so far.
    pub fn scopes<I>(mut self, scopes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.scope = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Declare the top-level expiry. Must agree with the access token's own
    /// `exp` claim at build time.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Declare the top-level expiry as `now + seconds`, captured at call
    /// time.
    pub fn expires_in(self, seconds: i64) -> Self {
        self.expires_at(Utc::now() + Duration::seconds(seconds))
    }

    /// Validate and freeze.
    ///
    /// # Errors
    ///
    /// - [`ClaimsError::MissingAccessToken`] when no access-token claim was
    ///   ever configured;
    /// - [`ClaimsError::MissingExpirationClaim`] when `expires_at` is
    ///   declared but the access token carries no `exp` claim;
    /// - [`ClaimsError::ExpiryMismatch`] when `expires_at` and the `exp`
    ///   claim disagree (compared at epoch-second precision, the claim's wire
    ///   resolution).
    pub fn build(self) -> Result<OAuth2Authorization, ClaimsError> {
        let access_token = self.access_token.build();
        if access_token.is_empty() {
            return Err(ClaimsError::MissingAccessToken);
        }

        if let Some(declared) = self.expires_at {
            match access_token.expiration_time() {
                None => return Err(ClaimsError::MissingExpirationClaim { declared }),
                Some(claimed) if claimed.timestamp() != declared.timestamp() => {
                    return Err(ClaimsError::ExpiryMismatch { declared, claimed });
                }
                Some(_) => {}
            }
        }

        Ok(OAuth2Authorization {
            access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            scope: self.scope,
            expires_at: self.expires_at,
        })
    }
}
