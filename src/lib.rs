//! # oauth2-claimset - Claim-Set & Authorization Modeling
//!
//! Standards-compliant modeling of OAuth2/JWT/introspection claim-sets with
//! validating builders, for use inside an authentication pipeline: a
//! collaborator decodes a token or introspection response into a raw claim
//! mapping, this crate freezes it into typed immutable claim-sets, and an
//! authorization aggregate enforces cross-field consistency before anything
//! downstream sees it.
//!
//! ## Design Principles
//!
//! - **Immutable after construction**: every frozen object is a plain value,
//!   safely shared across concurrent readers without locking
//! - **Coercion over exceptions**: optional claims that are absent or
//!   mismatched read as `None`, never as an error
//! - **Fail loudly at build time**: cross-field invariants are checked once,
//!   synchronously, in `build()` with no partial-success state
//! - **No I/O**: signing, transport and persistence belong to collaborators
//!
//! ## Architecture
//!
//! - [`claims`] - `ClaimValue` tagged union, immutable `ClaimSet`, generic
//!   builder
//! - [`names`] - registered claim name tables (RFC 7519, RFC 7662, RFC 6749)
//! - [`jwt`] - `JwtClaimSet` typed view, principal identities
//! - [`introspection`] - `IntrospectionClaimSet` typed view
//! - [`authorization`] - `OAuth2Authorization` aggregate with cross-field
//!   validation
//! - [`authorities`] - embedded and external-lookup authority resolution
//! - [`error`] - construction and configuration error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use oauth2_claimset::{OAuth2Authorization, TokenType};
//!
//! let authorization = OAuth2Authorization::builder()
//!     .access_token(|claims| {
//!         claims
//!             .issuer("https://auth.example.com")
//!             .subject("user123")
//!             .audience(["https://api.example.com"])
//!     })
//!     .refresh_token("8xLOxBtZp8")
//!     .scope("openid")
//!     .scope("email")
//!     .build()
//!     .expect("consistent authorization");
//!
//! assert_eq!(authorization.token_type(), TokenType::Bearer);
//! assert_eq!(
//!     authorization.access_token().subject().as_deref(),
//!     Some("user123")
//! );
//! ```
//!
//! ## Standards Compliance
//!
//! - **RFC 7519** - JSON Web Token registered claims (§4.1)
//! - **RFC 7662** - OAuth 2.0 Token Introspection response members (§2.2)
//! - **RFC 6749** - OAuth 2.0 token response attributes (§5.1)
//! - **RFC 6750** - Bearer token type

// Submodules
pub mod authorities;
pub mod authorization;
pub mod claims;
pub mod error;
pub mod introspection;
pub mod jwt;
pub mod names;

// Re-export the claim-set core
#[doc(inline)]
pub use claims::{ClaimSet, ClaimSetBuilder, ClaimValue};

// Re-export the registered name tables
#[doc(inline)]
pub use names::{IntrospectionClaimName, JwtClaimName, TokenAttributeName};

// Re-export typed claim-sets and principals
#[doc(inline)]
pub use jwt::{JwtClaimSet, JwtClaimSetBuilder, JwtPrincipal, NamedPrincipal, Principal};

#[doc(inline)]
pub use introspection::{
    IntrospectionClaimSet, IntrospectionClaimSetBuilder, IntrospectionPrincipal,
};

// Re-export the authorization aggregate
#[doc(inline)]
pub use authorization::{OAuth2Authorization, OAuth2AuthorizationBuilder, TokenType};

// Re-export authority resolution
#[doc(inline)]
pub use authorities::{
    AUTHORITIES_CLAIM_NAME, AuthorityStore, ClaimAuthoritiesService, GrantedAuthoritiesService,
    LookupAuthoritiesService,
};

#[doc(inline)]
pub use error::ClaimsError;
