//! Authorities derivation.
//!
//! Maps an authenticated [`Principal`] to a deduplicated set of authority
//! strings. Two interchangeable strategies exist, selected by deployment
//! configuration:
//!
//! - [`ClaimAuthoritiesService`] reads a designated claim (default key
//!   `authorities`) from the principal's own claim-set;
//! - [`LookupAuthoritiesService`] queries an external [`AuthorityStore`] by
//!   the principal's stable identifier and reads no claims at all.
//!
//! For the embedded strategy, a principal without the claim-accessing
//! capability or without the expected claim is a configuration error, not a
//! user-input error: it fails loudly instead of degrading to an empty set.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::ClaimsError;
use crate::jwt::Principal;

/// Default claim key holding embedded authorities.
pub const AUTHORITIES_CLAIM_NAME: &str = "authorities";

/// Resolve the granted authorities for a principal.
#[async_trait]
pub trait GrantedAuthoritiesService: Send + Sync {
    /// The deduplicated authority set for this principal. Order is
    /// irrelevant.
    async fn authorities(&self, principal: &dyn Principal) -> Result<BTreeSet<String>, ClaimsError>;
}

/// Embedded strategy: authorities live in a claim of the principal itself.
///
/// # Example
///
/// ```rust
/// use oauth2_claimset::{ClaimAuthoritiesService, GrantedAuthoritiesService, JwtClaimSet, JwtPrincipal};
///
/// # tokio_test::block_on(async {
/// let principal = JwtPrincipal::new(
///     JwtClaimSet::builder()
///         .subject("user123")
///         .authorities(["ROLE_USER", "ROLE_ADMIN"])
///         .build(),
/// );
///
/// let service = ClaimAuthoritiesService::default();
/// let authorities = service.authorities(&principal).await.unwrap();
/// assert!(authorities.contains("ROLE_ADMIN"));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ClaimAuthoritiesService {
    claim_name: String,
}

impl ClaimAuthoritiesService {
    /// Read authorities from a non-default claim key.
    pub fn new(claim_name: impl Into<String>) -> Self {
        Self {
            claim_name: claim_name.into(),
        }
    }

    /// The claim key this service reads.
    pub fn claim_name(&self) -> &str {
        &self.claim_name
    }
}

impl Default for ClaimAuthoritiesService {
    fn default() -> Self {
        Self::new(AUTHORITIES_CLAIM_NAME)
    }
}

#[async_trait]
impl GrantedAuthoritiesService for ClaimAuthoritiesService {
    async fn authorities(&self, principal: &dyn Principal) -> Result<BTreeSet<String>, ClaimsError> {
        let claims = principal.claim_set().ok_or_else(|| {
            tracing::warn!("embedded authorities strategy used against a claims-less principal");
            ClaimsError::UnsupportedPrincipal
        })?;

        let authorities = claims.get_as_string_set(&self.claim_name).ok_or_else(|| {
            tracing::warn!(claim = %self.claim_name, "principal carries no authorities claim");
            ClaimsError::MissingAuthoritiesClaim {
                claim: self.claim_name.clone(),
            }
        })?;

        tracing::debug!(
            claim = %self.claim_name,
            count = authorities.len(),
            "resolved authorities from embedded claim"
        );
        Ok(authorities)
    }
}

/// External collaborator the lookup strategy queries; typically backed by a
/// user/authority database.
#[async_trait]
pub trait AuthorityStore: Send + Sync {
    /// The authority strings recorded for this principal identifier. An
    /// unknown principal is an empty list, not an error.
    async fn find_authorities(
        &self,
        name: &str,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}

/// External-lookup strategy: authorities come from an [`AuthorityStore`],
/// keyed by the principal's stable identifier. No claims are read.
#[derive(Debug, Clone)]
pub struct LookupAuthoritiesService<S> {
    store: S,
}

impl<S: AuthorityStore> LookupAuthoritiesService<S> {
    /// Wrap an authority store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: AuthorityStore> GrantedAuthoritiesService for LookupAuthoritiesService<S> {
    async fn authorities(&self, principal: &dyn Principal) -> Result<BTreeSet<String>, ClaimsError> {
        let name = principal.name().ok_or(ClaimsError::UnsupportedPrincipal)?;

        let authorities = self
            .store
            .find_authorities(&name)
            .await
            .map_err(ClaimsError::AuthorityLookup)?;

        tracing::debug!(principal = %name, count = authorities.len(), "looked up authorities");
        Ok(authorities.into_iter().collect())
    }
}
