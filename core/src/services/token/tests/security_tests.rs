//! Hostile-token tests: forged, tampered and downgraded credentials

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

use crate::domain::entities::token::{Claims, Identity, TokenKind};
use crate::errors::TokenError;
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig, MAX_TOKEN_SIZE_BYTES};

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

fn service_with(config: TokenServiceConfig, clock: Arc<ManualClock>) -> TokenService {
    TokenService::with_clock(config, clock).expect("Failed to create token service")
}

fn config(secret: &str) -> TokenServiceConfig {
    TokenServiceConfig::new(secret, Duration::minutes(15), Duration::hours(168))
}

fn alice() -> Identity {
    Identity::new(42, "alice", "a@x.com")
}

fn assert_invalid(result: Result<Claims, TokenError>) {
    match result {
        Err(TokenError::Invalid { .. }) => {}
        other => panic!("expected Invalid, got {:?}", other),
    }
}

/// Claims for `alice` valid from `start_time()` for 15 minutes
fn valid_claims() -> Claims {
    Claims::new(alice(), TokenKind::Access, start_time(), Duration::minutes(15), None)
}

fn sign_with(secret: &[u8], claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

fn segment(value: &serde_json::Value) -> String {
    URL_SAFE_NO_PAD.encode(value.to_string())
}

#[test]
fn test_wrong_secret_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let issuer = service_with(config("other-secret"), clock.clone());
    let verifier = service_with(config("s1"), clock);

    let pair = issuer.generate_tokens(&alice()).unwrap();

    assert_invalid(verifier.verify_token(&pair.access_token));
    assert!(matches!(
        verifier.refresh_access_token(&pair.refresh_token),
        Err(TokenError::Invalid { .. })
    ));
}

#[test]
fn test_expired_forgery_is_invalid_not_expired() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let issuer = service_with(config("other-secret"), clock.clone());
    let verifier = service_with(config("s1"), clock.clone());

    let pair = issuer.generate_tokens(&alice()).unwrap();
    clock.advance(Duration::hours(1));

    assert_eq!(
        issuer.verify_token(&pair.access_token).unwrap_err(),
        TokenError::Expired
    );
    assert_invalid(verifier.verify_token(&pair.access_token));
}

#[test]
fn test_other_hmac_size_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let hs512 = service_with(config("s1").with_algorithm(Algorithm::HS512), clock.clone());
    let hs256 = service_with(config("s1"), clock);

    let pair = hs512.generate_tokens(&alice()).unwrap();

    assert!(hs512.verify_token(&pair.access_token).is_ok());
    assert_invalid(hs256.verify_token(&pair.access_token));
}

#[test]
fn test_alg_none_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let header = segment(&json!({ "alg": "none", "typ": "JWT" }));
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&valid_claims()).unwrap());

    assert_invalid(service.verify_token(&format!("{header}.{payload}.")));
    assert_invalid(service.verify_token(&format!("{header}.{payload}")));
}

#[test]
fn test_asymmetric_header_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    // Genuine HS256 signature, header swapped to RS256
    let token = sign_with(b"s1", &valid_claims());
    let mut parts = token.split('.');
    let _header = parts.next().unwrap();
    let payload = parts.next().unwrap();
    let signature = parts.next().unwrap();
    let rs256 = segment(&json!({ "alg": "RS256", "typ": "JWT" }));

    assert_invalid(service.verify_token(&format!("{rs256}.{payload}.{signature}")));
}

#[test]
fn test_tampered_payload_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let pair = service.generate_tokens(&alice()).unwrap();
    let parts: Vec<&str> = pair.access_token.split('.').collect();

    let mut claims = service.verify_token(&pair.access_token).unwrap();
    claims.username = "mallory".to_string();
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());

    let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
    assert_invalid(service.verify_token(&forged));
}

#[test]
fn test_tampered_signature_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let pair = service.generate_tokens(&alice()).unwrap();
    let mut token = pair.access_token;
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    assert_invalid(service.verify_token(&token));
}

#[test]
fn test_not_yet_valid_is_invalid() {
    let later = Arc::new(ManualClock::new(start_time() + Duration::hours(1)));
    let now = Arc::new(ManualClock::new(start_time()));
    let issuer = service_with(config("s1"), later);
    let verifier = service_with(config("s1"), now.clone());

    let pair = issuer.generate_tokens(&alice()).unwrap();
    assert_invalid(verifier.verify_token(&pair.access_token));

    now.advance(Duration::hours(1));
    assert!(verifier.verify_token(&pair.access_token).is_ok());
}

#[test]
fn test_out_of_order_timestamps_are_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let mut claims = valid_claims();
    claims.nbf = claims.iat - 60;
    assert_invalid(service.verify_token(&sign_with(b"s1", &claims)));

    let mut claims = valid_claims();
    claims.exp = claims.nbf - 1;
    assert_invalid(service.verify_token(&sign_with(b"s1", &claims)));
}

#[test]
fn test_missing_temporal_claim_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let claims = json!({
        "user_id": 42,
        "username": "alice",
        "email": "a@x.com",
        "iat": start_time().timestamp(),
        "exp": start_time().timestamp() + 900,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"s1"),
    )
    .unwrap();

    assert_invalid(service.verify_token(&token));
}

#[test]
fn test_oversized_token_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let mut claims = valid_claims();
    claims.username = "a".repeat(MAX_TOKEN_SIZE_BYTES);
    let token = sign_with(b"s1", &claims);
    assert!(token.len() > MAX_TOKEN_SIZE_BYTES);

    assert_eq!(
        service.verify_token(&token).unwrap_err(),
        TokenError::Invalid {
            reason: "token exceeds maximum size"
        }
    );
}

#[test]
fn test_issuer_mismatch_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let ours = service_with(config("s1").with_issuer("tokenward"), clock.clone());
    let theirs = service_with(config("s1").with_issuer("elsewhere"), clock.clone());
    let unnamed = service_with(config("s1"), clock);

    let pair = ours.generate_tokens(&alice()).unwrap();
    let claims = ours.verify_token(&pair.access_token).unwrap();
    assert_eq!(claims.iss.as_deref(), Some("tokenward"));

    assert_invalid(theirs.verify_token(&pair.access_token));

    // An issuer-less token is rejected once an issuer is required
    let bare = unnamed.generate_tokens(&alice()).unwrap();
    assert_invalid(ours.verify_token(&bare.access_token));
}

#[test]
fn test_configured_issuer_requires_iss_claim() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1").with_issuer("tokenward"), clock);

    // Correct secret and window, no `iss`
    let token = sign_with(b"s1", &valid_claims());
    assert_eq!(
        service.verify_token(&token).unwrap_err(),
        TokenError::Invalid {
            reason: "missing required claim"
        }
    );

    let mut claims = valid_claims();
    claims.iss = Some("tokenward".to_string());
    assert!(service.verify_token(&sign_with(b"s1", &claims)).is_ok());
}

#[test]
fn test_foreign_claims_shape_is_invalid() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let claims = json!({
        "sub": "42",
        "iat": start_time().timestamp(),
        "nbf": start_time().timestamp(),
        "exp": start_time().timestamp() + 900,
    });
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"s1"),
    )
    .unwrap();

    assert_invalid(service.verify_token(&token));
}

#[test]
fn test_rejection_reason_stays_generic_for_clients() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let service = service_with(config("s1"), clock);

    let err = service.verify_token("garbage").unwrap_err();
    let response = tw_shared::errors::ErrorResponse::from(&err);

    assert_eq!(response.error, "TOKEN_INVALID");
    assert_eq!(response.message, "Token is invalid");
}
