//! End-to-end authorization flow tests
//!
//! These tests walk the full pipeline a resource-server filter would:
//! a raw JSON claim mapping (decoded JWT payload or introspection response)
//! is frozen into a typed claim-set, wrapped into an authorization with
//! cross-field validation, and finally resolved into an authority set.
//!
//! # Standards Tested
//! - RFC 7519: JWT registered claims, single-string vs array audience
//! - RFC 7662: introspection response members
//! - RFC 6749: token type and scope semantics

use std::collections::BTreeSet;

use chrono::{Duration, Utc};
use oauth2_claimset::{
    AuthorityStore, ClaimAuthoritiesService, ClaimSet, ClaimsError, GrantedAuthoritiesService,
    IntrospectionClaimSet, IntrospectionPrincipal, JwtClaimSet, JwtPrincipal,
    LookupAuthoritiesService, NamedPrincipal, OAuth2Authorization, Principal, TokenType,
};
use serde_json::json;

fn claims_from(value: serde_json::Value) -> ClaimSet {
    let serde_json::Value::Object(object) = value else {
        panic!("fixture must be a JSON object");
    };
    ClaimSet::from_json_object(object)
}

/// Test: decoded JWT payload flows into a consistent authorization
#[test]
fn test_decoded_payload_to_authorization() {
    // GIVEN: a JSON-decoded JWT payload with single-string audience
    let payload = claims_from(json!({
        "iss": "https://auth.example.com",
        "sub": "user123",
        "aud": "https://api.example.com",
        "exp": 1893456000,
        "iat": 1893452400,
        "authorities": ["ROLE_USER"]
    }));
    let token = JwtClaimSet::from(payload);

    // WHEN: it is wrapped into an authorization agreeing on the expiry
    let authorization = OAuth2Authorization::builder()
        .access_token(|claims| {
            token
                .claims()
                .iter()
                .fold(claims, |b, (name, value)| b.claim(name, value.clone()))
        })
        .expires_at(token.expiration_time().unwrap())
        .scopes(["openid", "email"])
        .build()
        .unwrap();

    // THEN: the frozen aggregate reflects every piece
    assert_eq!(
        authorization.access_token().issuer().as_deref(),
        Some("https://auth.example.com")
    );
    assert_eq!(
        authorization.access_token().audience().unwrap(),
        BTreeSet::from(["https://api.example.com".to_string()])
    );
    assert_eq!(
        authorization.expires_at().unwrap().timestamp(),
        1893456000
    );
    assert_eq!(authorization.token_type(), TokenType::Bearer);
    assert_eq!(authorization.scope().len(), 2);
}

/// Test: expiry disagreement between aggregate and token claim is fatal
#[test]
fn test_expiry_disagreement_is_fatal() {
    let now = Utc::now();

    // GIVEN: an access token expiring one second after the declared expiry
    let result = OAuth2Authorization::builder()
        .access_token(|claims| {
            claims
                .subject("user123")
                .expiration_time(now + Duration::seconds(1))
        })
        // WHEN: the authorization declares a different expiry
        .expires_at(now)
        .build();

    // THEN: construction fails, no partial object exists
    assert!(matches!(result, Err(ClaimsError::ExpiryMismatch { .. })));
}

/// Test: authorities resolve from the frozen access token's embedded claim
#[tokio::test]
async fn test_embedded_authorities_from_frozen_token() {
    let authorization = OAuth2Authorization::builder()
        .access_token(|claims| {
            claims
                .subject("user123")
                .authorities(["ROLE_USER", "ROLE_ADMIN"])
        })
        .build()
        .unwrap();

    let principal = JwtPrincipal::new(authorization.access_token().clone());
    let authorities = ClaimAuthoritiesService::default()
        .authorities(&principal)
        .await
        .unwrap();

    assert_eq!(
        authorities,
        BTreeSet::from(["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()])
    );
}

/// Test: introspection response acts as a principal for external lookup
#[tokio::test]
async fn test_introspection_principal_with_external_lookup() {
    #[derive(Debug)]
    struct InMemoryStore;

    #[async_trait::async_trait]
    impl AuthorityStore for InMemoryStore {
        async fn find_authorities(
            &self,
            name: &str,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(match name {
                "jdoe" => vec!["ROLE_USER".to_string(), "ROLE_AUDITOR".to_string()],
                _ => vec![],
            })
        }
    }

    // GIVEN: an RFC 7662 response in its wire form (space-delimited scope)
    let response = claims_from(json!({
        "active": true,
        "username": "jdoe",
        "client_id": "l238j323ds-23ij4",
        "scope": "read write",
        "token_type": "Bearer",
        "sub": "Z5O3upPC88QrAjx00dis"
    }));
    let claims = IntrospectionClaimSet::from(response);
    assert_eq!(claims.active(), Some(true));
    assert_eq!(
        claims.scope().unwrap(),
        BTreeSet::from(["read".to_string(), "write".to_string()])
    );

    // WHEN: authorities are looked up by the principal's display name
    let principal = IntrospectionPrincipal::new(claims);
    let service = LookupAuthoritiesService::new(InMemoryStore);
    let authorities = service.authorities(&principal).await.unwrap();

    // THEN: the store answered for "jdoe", claims were not consulted
    assert_eq!(authorities.len(), 2);
    assert!(authorities.contains("ROLE_AUDITOR"));
}

/// Test: unknown principals resolve to an empty authority set, not an error
#[tokio::test]
async fn test_unknown_principal_resolves_empty() {
    #[derive(Debug)]
    struct EmptyStore;

    #[async_trait::async_trait]
    impl AuthorityStore for EmptyStore {
        async fn find_authorities(
            &self,
            _name: &str,
        ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(vec![])
        }
    }

    let service = LookupAuthoritiesService::new(EmptyStore);
    let authorities = service
        .authorities(&NamedPrincipal::new("nobody"))
        .await
        .unwrap();
    assert!(authorities.is_empty());
}

/// Test: frozen objects are plain values shared across threads
#[test]
fn test_frozen_authorization_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuth2Authorization>();
    assert_send_sync::<JwtClaimSet>();
    assert_send_sync::<IntrospectionClaimSet>();
    assert_send_sync::<ClaimSet>();

    let authorization = std::sync::Arc::new(
        OAuth2Authorization::builder()
            .access_token(|claims| claims.subject("user123"))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = authorization.clone();
            std::thread::spawn(move || shared.access_token().subject())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("user123"));
    }
}

/// Test: principals expose exactly the capabilities their backing allows
#[test]
fn test_principal_capabilities() {
    let jwt = JwtPrincipal::new(JwtClaimSet::builder().subject("user123").build());
    assert_eq!(jwt.name().as_deref(), Some("user123"));
    assert!(jwt.claim_set().is_some());

    let named = NamedPrincipal::new("external-id");
    assert_eq!(named.name().as_deref(), Some("external-id"));
    assert!(named.claim_set().is_none());
}
