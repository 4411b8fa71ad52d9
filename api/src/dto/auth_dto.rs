use serde::{Deserialize, Serialize};
use validator::Validate;

use tw_core::domain::entities::token::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Identity of the caller as seen by the authentication middleware
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub jti: Option<String>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_request_validation() {
        let empty = RefreshTokenRequest {
            refresh_token: String::new(),
        };
        assert!(empty.validate().is_err());

        let present = RefreshTokenRequest {
            refresh_token: "eyJ.x.y".to_string(),
        };
        assert!(present.validate().is_ok());
    }

    #[test]
    fn test_me_response_keeps_user_id_shape() {
        let numeric = MeResponse {
            user_id: UserId::Int(42),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            jti: None,
            expires_at: None,
        };
        let json = serde_json::to_value(&numeric).unwrap();
        assert_eq!(json["user_id"], serde_json::json!(42));

        let textual = MeResponse {
            user_id: UserId::Str("usr_1".to_string()),
            ..numeric
        };
        let json = serde_json::to_value(&textual).unwrap();
        assert_eq!(json["user_id"], serde_json::json!("usr_1"));
    }
}
