//! JWT claim-sets (RFC 7519) and principal identities.
//!
//! Per RFC 7519 §3 a JWT is a claim-set only; JOSE headers are a separate
//! object and never appear here. `JwtClaimSet` adds no validation beyond
//! [`ClaimSet`]: it is a typed view over the seven registered claims, and an
//! empty build succeeds (mandatoriness of e.g. `sub` is a caller concern).
//!
//! Identity is a separate concern from claims: [`JwtPrincipal`] is the thin
//! wrapper that turns a claim-set into a principal whose display name is the
//! subject claim.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::authorities::AUTHORITIES_CLAIM_NAME;
use crate::claims::{ClaimSet, ClaimSetBuilder, ClaimValue};
use crate::names::{JwtClaimName, TokenAttributeName};

/// A claim-set specialized to the JWT registered claims.
///
/// # Example
///
/// ```rust
/// use oauth2_claimset::JwtClaimSet;
///
/// let token = JwtClaimSet::builder()
///     .issuer("https://auth.example.com")
///     .subject("user123")
///     .audience(["https://api.example.com"])
///     .build();
///
/// assert_eq!(token.subject().as_deref(), Some("user123"));
/// assert!(token.expiration_time().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwtClaimSet {
    claims: ClaimSet,
}

impl JwtClaimSet {
    /// Create a builder with typed setters for the registered claims.
    pub fn builder() -> JwtClaimSetBuilder {
        JwtClaimSetBuilder::default()
    }

    /// The full underlying claim-set.
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// `iss` claim.
    pub fn issuer(&self) -> Option<String> {
        self.claims.get_as_string(JwtClaimName::Issuer.wire_name())
    }

    /// `sub` claim.
    pub fn subject(&self) -> Option<String> {
        self.claims.get_as_string(JwtClaimName::Subject.wire_name())
    }

    /// `aud` claim; single string and array forms are both accepted.
    pub fn audience(&self) -> Option<BTreeSet<String>> {
        self.claims
            .get_as_string_set(JwtClaimName::Audience.wire_name())
    }

    /// `exp` claim as an absolute timestamp.
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(JwtClaimName::ExpirationTime.wire_name())
    }

    /// `nbf` claim as an absolute timestamp.
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(JwtClaimName::NotBefore.wire_name())
    }

    /// `iat` claim as an absolute timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.claims
            .get_as_instant(JwtClaimName::IssuedAt.wire_name())
    }

    /// `jti` claim.
    pub fn jwt_id(&self) -> Option<String> {
        self.claims.get_as_string(JwtClaimName::JwtId.wire_name())
    }

    /// `scope` claim; space-delimited string and array forms both accepted.
    pub fn scope(&self) -> Option<BTreeSet<String>> {
        self.claims
            .get_as_string_set(TokenAttributeName::Scope.wire_name())
    }

    /// `authorities` claim: application authorities embedded in the token,
    /// read by the embedded authorities strategy.
    pub fn authorities(&self) -> Option<BTreeSet<String>> {
        self.claims.get_as_string_set(AUTHORITIES_CLAIM_NAME)
    }

    /// Raw claim value, registered or not.
    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.claims.get(name)
    }

    /// Claim coerced to a string, or `None` if absent.
    pub fn get_as_string(&self, name: &str) -> Option<String> {
        self.claims.get_as_string(name)
    }

    /// Claim interpreted as a set of strings, or `None` if absent.
    pub fn get_as_string_set(&self, name: &str) -> Option<BTreeSet<String>> {
        self.claims.get_as_string_set(name)
    }

    /// Claim interpreted as an epoch-seconds timestamp, or `None` if absent.
    pub fn get_as_instant(&self, name: &str) -> Option<DateTime<Utc>> {
        self.claims.get_as_instant(name)
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the claim-set holds no claims at all.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

impl From<ClaimSet> for JwtClaimSet {
    fn from(claims: ClaimSet) -> Self {
        Self { claims }
    }
}

/// Builder for [`JwtClaimSet`]. Always succeeds: JWT claim-sets have no
/// mandatory fields at this layer.
#[derive(Debug, Clone, Default)]
pub struct JwtClaimSetBuilder {
    delegate: ClaimSetBuilder,
}

impl JwtClaimSetBuilder {
    /// Set an arbitrary claim by wire key. Last write wins.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.delegate = self.delegate.claim(name, value);
        self
    }

    /// Set the `iss` claim.
    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        self.claim(JwtClaimName::Issuer.wire_name(), issuer.into())
    }

    /// Set the `sub` claim.
    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.claim(JwtClaimName::Subject.wire_name(), subject.into())
    }

    /// Set the `aud` claim from any collection of strings; duplicates
    /// collapse.
    pub fn audience<I>(self, audience: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: BTreeSet<String> = audience.into_iter().map(Into::into).collect();
        self.claim(
            JwtClaimName::Audience.wire_name(),
            ClaimValue::Array(values.into_iter().map(ClaimValue::String).collect()),
        )
    }

    /// Set the `exp` claim, stored as epoch seconds.
    pub fn expiration_time(self, expiration_time: DateTime<Utc>) -> Self {
        self.claim(JwtClaimName::ExpirationTime.wire_name(), expiration_time)
    }

    /// Set the `exp` claim to `now + seconds`, captured at call time.
    pub fn expires_in(self, seconds: i64) -> Self {
        self.expiration_time(Utc::now() + Duration::seconds(seconds))
    }

    /// Set the `nbf` claim, stored as epoch seconds.
    pub fn not_before(self, not_before: DateTime<Utc>) -> Self {
        self.claim(JwtClaimName::NotBefore.wire_name(), not_before)
    }

    /// Set the `iat` claim, stored as epoch seconds.
    pub fn issued_at(self, issued_at: DateTime<Utc>) -> Self {
        self.claim(JwtClaimName::IssuedAt.wire_name(), issued_at)
    }

    /// Set the `jti` claim.
    pub fn jwt_id(self, jwt_id: impl Into<String>) -> Self {
        self.claim(JwtClaimName::JwtId.wire_name(), jwt_id.into())
    }

    /// Set the `scope` claim from any collection of strings; duplicates
    /// collapse.
    pub fn scope<I>(self, scope: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: BTreeSet<String> = scope.into_iter().map(Into::into).collect();
        self.claim(
            TokenAttributeName::Scope.wire_name(),
            ClaimValue::Array(values.into_iter().map(ClaimValue::String).collect()),
        )
    }

    /// Set the `authorities` claim from any collection of strings;
    /// duplicates collapse.
    pub fn authorities<I>(self, authorities: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: BTreeSet<String> = authorities.into_iter().map(Into::into).collect();
        self.claim(
            AUTHORITIES_CLAIM_NAME,
            ClaimValue::Array(values.into_iter().map(ClaimValue::String).collect()),
        )
    }

    /// Freeze into an immutable [`JwtClaimSet`].
    pub fn build(self) -> JwtClaimSet {
        JwtClaimSet {
            claims: self.delegate.build(),
        }
    }
}

/// An authenticated party, as seen by the authorities layer.
///
/// The two capabilities are deliberately separate: a stable display name for
/// external lookups, and an optional claim-set for embedded-claim
/// strategies. A principal backed by an external identity store exposes only
/// the former.
pub trait Principal: Send + Sync {
    /// Stable identifier of the authenticated party, if any.
    fn name(&self) -> Option<String>;

    /// The claims backing this principal, when it carries claims at all.
    fn claim_set(&self) -> Option<&ClaimSet> {
        None
    }
}

/// Identity wrapper over a [`JwtClaimSet`]: the display name is the subject
/// claim.
#[derive(Debug, Clone, PartialEq)]
pub struct JwtPrincipal {
    claims: JwtClaimSet,
}

impl JwtPrincipal {
    /// Wrap a frozen JWT claim-set as a principal.
    pub fn new(claims: JwtClaimSet) -> Self {
        Self { claims }
    }

    /// The wrapped claim-set.
    pub fn claims(&self) -> &JwtClaimSet {
        &self.claims
    }
}

impl Principal for JwtPrincipal {
    fn name(&self) -> Option<String> {
        self.claims.subject()
    }

    fn claim_set(&self) -> Option<&ClaimSet> {
        Some(self.claims.claims())
    }
}

impl From<JwtClaimSet> for JwtPrincipal {
    fn from(claims: JwtClaimSet) -> Self {
        Self::new(claims)
    }
}

/// A principal that carries only a stable identifier and no claims, as
/// produced by an external identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPrincipal {
    name: String,
}

impl NamedPrincipal {
    /// Create a claims-less principal from its identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Principal for NamedPrincipal {
    fn name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_build_succeeds() {
        let token = JwtClaimSet::builder().build();
        assert!(token.is_empty());
        assert!(token.subject().is_none());
    }

    #[test]
    fn test_typed_setters_land_on_wire_keys() {
        let now = Utc::now();
        let token = JwtClaimSet::builder()
            .issuer("https://auth.example.com")
            .subject("user123")
            .audience(["api", "web"])
            .expiration_time(now)
            .not_before(now)
            .issued_at(now)
            .jwt_id("JlbmMiOiJBMTI4Q0JDLUhTMjU2In")
            .build();

        assert_eq!(
            token.get_as_string("iss").as_deref(),
            Some("https://auth.example.com")
        );
        assert_eq!(token.get_as_string("sub").as_deref(), Some("user123"));
        assert_eq!(token.get_as_string_set("aud").unwrap().len(), 2);
        assert_eq!(
            token.get_as_instant("exp").unwrap().timestamp(),
            now.timestamp()
        );
        assert!(token.get("nbf").is_some());
        assert!(token.get("iat").is_some());
        assert!(token.get("jti").is_some());
    }

    #[test]
    fn test_expiration_time_is_second_precision() {
        let now = Utc::now();
        let token = JwtClaimSet::builder().expiration_time(now).build();
        // Sub-second components are dropped by the epoch-seconds encoding.
        assert_eq!(
            token.expiration_time().unwrap().timestamp(),
            now.timestamp()
        );
        assert_eq!(
            token.expiration_time().unwrap().timestamp_subsec_nanos(),
            0
        );
    }

    #[test]
    fn test_expires_in_captures_now_at_call_time() {
        let before = Utc::now();
        let token = JwtClaimSet::builder().expires_in(30).build();
        let after = Utc::now();

        let exp = token.expiration_time().unwrap();
        assert!(exp.timestamp() >= before.timestamp() + 30 - 1);
        assert!(exp.timestamp() <= after.timestamp() + 30 + 1);
    }

    #[test]
    fn test_audience_single_string_input_reads_as_set() {
        let claims = ClaimSet::builder().claim("aud", "single").build();
        let token = JwtClaimSet::from(claims);
        assert_eq!(
            token.audience().unwrap(),
            BTreeSet::from(["single".to_string()])
        );
    }

    #[test]
    fn test_scope_setter_lands_on_wire_key_and_reads_back() {
        let token = JwtClaimSet::builder()
            .scope(["openid", "email", "openid"])
            .build();
        assert_eq!(
            token.get_as_string_set("scope").unwrap(),
            BTreeSet::from(["openid".to_string(), "email".to_string()])
        );
        assert_eq!(token.scope(), token.get_as_string_set("scope"));
    }

    #[test]
    fn test_authorities_setter_lands_on_authorities_claim() {
        let token = JwtClaimSet::builder()
            .subject("user123")
            .authorities(["ROLE_USER", "ROLE_ADMIN", "ROLE_USER"])
            .build();
        assert_eq!(
            token.authorities().unwrap(),
            BTreeSet::from(["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()])
        );
        assert_eq!(token.authorities(), token.get_as_string_set("authorities"));
    }

    #[test]
    fn test_authorities_accessor_accepts_space_delimited_claim() {
        let token = JwtClaimSet::from(
            ClaimSet::builder()
                .claim("authorities", "ROLE_USER ROLE_ADMIN")
                .build(),
        );
        assert_eq!(token.authorities().unwrap().len(), 2);
        assert!(JwtClaimSet::builder().build().authorities().is_none());
    }

    #[test]
    fn test_jwt_principal_name_is_subject() {
        let token = JwtClaimSet::builder().subject("user123").build();
        let principal = JwtPrincipal::new(token);
        assert_eq!(principal.name().as_deref(), Some("user123"));
        assert!(principal.claim_set().is_some());
    }

    #[test]
    fn test_named_principal_has_no_claims() {
        let principal = NamedPrincipal::new("user123");
        assert_eq!(principal.name().as_deref(), Some("user123"));
        assert!(principal.claim_set().is_none());
    }
}
