//! Registered claim name tables.
//!
//! Fixed mappings from logical claim identifiers to their wire-format keys,
//! as standardized by RFC 7519 §4.1 (JWT), RFC 7662 §2.2 (introspection) and
//! RFC 6749 §5.1 (token response). The tables are process-wide constants with
//! no lifecycle.

use std::fmt;

/// JWT registered claim names per RFC 7519 §4.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JwtClaimName {
    /// `iss`: token issuer.
    Issuer,
    /// `sub`: token subject.
    Subject,
    /// `aud`: intended audience.
    Audience,
    /// `exp`: expiration time, epoch seconds.
    ExpirationTime,
    /// `nbf`: not-before time, epoch seconds.
    NotBefore,
    /// `iat`: issued-at time, epoch seconds.
    IssuedAt,
    /// `jti`: unique token identifier.
    JwtId,
}

impl JwtClaimName {
    /// All seven registered JWT claims.
    pub const ALL: [JwtClaimName; 7] = [
        JwtClaimName::Issuer,
        JwtClaimName::Subject,
        JwtClaimName::Audience,
        JwtClaimName::ExpirationTime,
        JwtClaimName::NotBefore,
        JwtClaimName::IssuedAt,
        JwtClaimName::JwtId,
    ];

    /// Wire-format key for this claim.
    pub const fn wire_name(self) -> &'static str {
        match self {
            JwtClaimName::Issuer => "iss",
            JwtClaimName::Subject => "sub",
            JwtClaimName::Audience => "aud",
            JwtClaimName::ExpirationTime => "exp",
            JwtClaimName::NotBefore => "nbf",
            JwtClaimName::IssuedAt => "iat",
            JwtClaimName::JwtId => "jti",
        }
    }
}

impl fmt::Display for JwtClaimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Introspection response members per RFC 7662 §2.2.
///
/// The last seven mirror the JWT registered claims under the same keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntrospectionClaimName {
    /// `active`: whether the token is currently active.
    Active,
    /// `scope`: space-separated scope values.
    Scope,
    /// `client_id`: client the token was issued to.
    ClientId,
    /// `username`: human-readable resource-owner identifier.
    Username,
    /// `token_type`: type of the introspected token.
    TokenType,
    /// `iss`: token issuer.
    Issuer,
    /// `sub`: token subject.
    Subject,
    /// `aud`: intended audience.
    Audience,
    /// `exp`: expiration time, epoch seconds.
    ExpirationTime,
    /// `nbf`: not-before time, epoch seconds.
    NotBefore,
    /// `iat`: issued-at time, epoch seconds.
    IssuedAt,
    /// `jti`: unique token identifier.
    JwtId,
}

impl IntrospectionClaimName {
    /// Wire-format key for this member.
    pub const fn wire_name(self) -> &'static str {
        match self {
            IntrospectionClaimName::Active => "active",
            IntrospectionClaimName::Scope => "scope",
            IntrospectionClaimName::ClientId => "client_id",
            IntrospectionClaimName::Username => "username",
            IntrospectionClaimName::TokenType => "token_type",
            IntrospectionClaimName::Issuer => "iss",
            IntrospectionClaimName::Subject => "sub",
            IntrospectionClaimName::Audience => "aud",
            IntrospectionClaimName::ExpirationTime => "exp",
            IntrospectionClaimName::NotBefore => "nbf",
            IntrospectionClaimName::IssuedAt => "iat",
            IntrospectionClaimName::JwtId => "jti",
        }
    }
}

impl fmt::Display for IntrospectionClaimName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Token response attributes per RFC 6749 §5.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenAttributeName {
    /// `access_token`: the issued access token.
    AccessToken,
    /// `token_type`: type of the issued token (Bearer, MAC).
    TokenType,
    /// `expires_in`: lifetime in seconds.
    ExpiresIn,
    /// `refresh_token`: optional refresh token.
    RefreshToken,
    /// `scope`: granted scope values.
    Scope,
}

impl TokenAttributeName {
    /// Wire-format key for this attribute.
    pub const fn wire_name(self) -> &'static str {
        match self {
            TokenAttributeName::AccessToken => "access_token",
            TokenAttributeName::TokenType => "token_type",
            TokenAttributeName::ExpiresIn => "expires_in",
            TokenAttributeName::RefreshToken => "refresh_token",
            TokenAttributeName::Scope => "scope",
        }
    }
}

impl fmt::Display for TokenAttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
