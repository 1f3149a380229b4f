//! Error taxonomy for claim-set construction and authority resolution.
//!
//! Two failure families exist: construction/validation errors raised
//! synchronously at `build()` time, and configuration errors raised when an
//! authorities strategy is pointed at a principal it cannot serve. Coercion
//! misses are not errors: typed claim accessors return `None` for absent or
//! mismatched claims.

use chrono::{DateTime, Utc};

/// Errors raised while freezing an authorization or resolving authorities.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    /// An `OAuth2Authorization` was built without a non-empty access token.
    #[error("access token claim-set is mandatory and must not be empty")]
    MissingAccessToken,

    /// `expires_at` was set explicitly but the access token carries no
    /// expiration claim to agree with.
    #[error("expires_at is {declared} but the access token has no expiration claim")]
    MissingExpirationClaim {
        /// The explicitly declared expiry.
        declared: DateTime<Utc>,
    },

    /// `expires_at` and the access token's own expiration claim disagree.
    #[error("expires_at ({declared}) disagrees with the access token expiration claim ({claimed})")]
    ExpiryMismatch {
        /// The explicitly declared expiry.
        declared: DateTime<Utc>,
        /// The expiration carried by the access token's `exp` claim.
        claimed: DateTime<Utc>,
    },

    /// The embedded-authorities strategy found no authorities claim.
    #[error("principal has no \"{claim}\" claim")]
    MissingAuthoritiesClaim {
        /// The claim key the strategy was configured to read.
        claim: String,
    },

    /// The principal does not expose the claim-accessing capability the
    /// embedded strategy requires, or carries no stable identifier for the
    /// lookup strategy.
    #[error("principal does not expose the capability required by the authorities strategy")]
    UnsupportedPrincipal,

    /// The external authority store failed; the underlying cause is the
    /// collaborator's.
    #[error("authority lookup failed")]
    AuthorityLookup(#[source] Box<dyn std::error::Error + Send + Sync>),
}
