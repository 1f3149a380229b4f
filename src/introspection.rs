//! Introspection claim-sets (RFC 7662).
//!
//! An introspection response is a claim mapping like a JWT payload, with a
//! few members of its own (`active`, `client_id`, `username`, `scope`,
//! `token_type`) next to the mirrored JWT registered claims. As with
//! [`JwtClaimSet`](crate::JwtClaimSet), no member is mandatory at this layer.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::claims::{ClaimSet, ClaimSetBuilder, ClaimValue};
use crate::jwt::Principal;
use crate::names::IntrospectionClaimName;

/// A claim-set specialized to the RFC 7662 introspection response members.
///
/// # Example
///
/// ```rust
/// use oauth2_claimset::IntrospectionClaimSet;
///
/// let claims = IntrospectionClaimSet::builder()
///     .active(true)
///     .username("jdoe")
///     .scope(["read", "write"])
///     .build();
///
/// assert_eq!(claims.active(), Some(true));
/// assert_eq!(claims.username().as_deref(), Some("jdoe"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntrospectionClaimSet {
    claims: ClaimSet,
}

impl IntrospectionClaimSet {
    /// Create a builder with typed setters for the response members.
    pub fn builder() -> IntrospectionClaimSetBuilder {
        IntrospectionClaimSetBuilder::default()
    }

    /// The full underlying claim-set.
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// `active` member.
    pub fn active(&self) -> Option<bool> {
        self.claims
            .get_as_bool(IntrospectionClaimName::Active.wire_name())
    }

    /// `scope` member; space-delimited string and array forms both accepted.
    pub fn scope(&self) -> Option<BTreeSet<String>> {
        self.claims
            .get_as_string_set(IntrospectionClaimName::Scope.wire_name())
    }

    /// `client_id` member.
    pub fn client_id(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::ClientId.wire_name())
    }

    /// `username` member.
    pub fn username(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::Username.wire_name())
    }

    /// `token_type` member.
    pub fn token_type(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::TokenType.wire_name())
    }

    /// `iss` member.
    pub fn issuer(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::Issuer.wire_name())
    }

    /// `sub` member.
    pub fn subject(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::Subject.wire_name())
    }

    /// `aud` member.
    pub fn audience(&self) -> Option<BTreeSet<String>> {
        self.claims
            .get_as_string_set(IntrospectionClaimName::Audience.wire_name())
    }

    /// `exp` member as an absolute timestamp.
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(IntrospectionClaimName::ExpirationTime.wire_name())
    }

    /// `nbf` member as an absolute timestamp.
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(IntrospectionClaimName::NotBefore.wire_name())
    }

    /// `iat` member as an absolute timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(IntrospectionClaimName::IssuedAt.wire_name())
    }

    /// `jti` member.
    pub fn jwt_id(&self) -> Option<String> {
        self.claims
            .get_as_string(IntrospectionClaimName::JwtId.wire_name())
    }

    /// Whether the claim-set holds no members at all.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl From<ClaimSet> for IntrospectionClaimSet {
    fn from(claims: ClaimSet) -> Self {
        Self { claims }
    }
}

/// Identity wrapper over an [`IntrospectionClaimSet`]: the display name is
/// the `username` member, falling back to `sub` (RFC 7662 carries both and
/// `username` is the human-readable one).
#[derive(Debug, Clone, PartialEq)]
pub struct IntrospectionPrincipal {
    claims: IntrospectionClaimSet,
}

impl IntrospectionPrincipal {
    /// Wrap a frozen introspection claim-set as a principal.
    pub fn new(claims: IntrospectionClaimSet) -> Self {
        Self { claims }
    }

    /// The wrapped claim-set.
    pub fn claims(&self) -> &IntrospectionClaimSet {
        &self.claims
    }
}

impl Principal for IntrospectionPrincipal {
    fn name(&self) -> Option<String> {
        self.claims.username().or_else(|| self.claims.subject())
    }

    fn claim_set(&self) -> Option<&ClaimSet> {
        Some(&self.claims.claims)
    }
}

impl From<IntrospectionClaimSet> for IntrospectionPrincipal {
    fn from(claims: IntrospectionClaimSet) -> Self {
        Self::new(claims)
    }
}

/// Builder for [`IntrospectionClaimSet`]. Always succeeds.
#[derive(Debug, Clone, Default)]
pub struct IntrospectionClaimSetBuilder {
    delegate: ClaimSetBuilder,
}

impl IntrospectionClaimSetBuilder {
    /// Set an arbitrary member by wire key. Last write wins.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.delegate = self.delegate.claim(name, value);
        self
    }

    /// Set the `active` member.
    pub fn active(self, active: bool) -> Self {
        self.claim(IntrospectionClaimName::Active.wire_name(), active)
    }

    /// Set the `scope` member; duplicates collapse.
    pub fn scope<I>(self, scope: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: BTreeSet<String> = scope.into_iter().map(Into::into).collect();
        self.claim(
            IntrospectionClaimName::Scope.wire_name(),
            ClaimValue::Array(values.into_iter().map(ClaimValue::String).collect()),
        )
    }

    /// Set the `client_id` member.
    pub fn client_id(self, client_id: impl Into<String>) -> Self {
        self.claim(IntrospectionClaimName::ClientId.wire_name(), client_id.into())
    }

    /// Set the `username` member.
    pub fn username(self, username: impl Into<String>) -> Self {
        self.claim(IntrospectionClaimName::Username.wire_name(), username.into())
    }

    /// Set the `token_type` member.
    pub fn token_type(self, token_type: impl Into<String>) -> Self {
        self.claim(
            IntrospectionClaimName::TokenType.wire_name(),
            token_type.into(),
        )
    }

    /// Set the `iss` member.
    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        self.claim(IntrospectionClaimName::Issuer.wire_name(), issuer.into())
    }

    /// Set the `sub` member.
    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.claim(IntrospectionClaimName::Subject.wire_name(), subject.into())
    }

    /// Set the `aud` member; duplicates collapse.
    pub fn audience<I>(self, audience: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: BTreeSet<String> = audience.into_iter().map(Into::into).collect();
        self.claim(
            IntrospectionClaimName::Audience.wire_name(),
            ClaimValue::Array(values.into_iter().map(ClaimValue::String).collect()),
        )
    }

    /// Set the `exp` member, stored as epoch seconds.
    pub fn expiration_time(self, expiration_time: DateTime<Utc>) -> Self {
        self.claim(
            IntrospectionClaimName::ExpirationTime.wire_name(),
            expiration_time,
        )
    }

    /// Set the `exp` member to `now + seconds`, captured at call time.
    pub fn expires_in(self, seconds: i64) -> Self {
        self.expiration_time(Utc::now() + Duration::seconds(seconds))
    }

    /// Set the `nbf` member, stored as epoch seconds.
    pub fn not_before(self, not_before: DateTime<Utc>) -> Self {
        self.claim(IntrospectionClaimName::NotBefore.wire_name(), not_before)
    }

    /// Set the `iat` member, stored as epoch seconds.
    pub fn issued_at(self, issued_at: DateTime<Utc>) -> Self {
        self.claim(IntrospectionClaimName::IssuedAt.wire_name(), issued_at)
    }

    /// Set the `jti` member.
    pub fn jwt_id(self, jwt_id: impl Into<String>) -> Self {
        self.claim(IntrospectionClaimName::JwtId.wire_name(), jwt_id.into())
    }

    /// Freeze into an immutable [`IntrospectionClaimSet`].
    pub fn build(self) -> IntrospectionClaimSet {
        IntrospectionClaimSet {
            claims: self.delegate.build(),
        }
    }
}
