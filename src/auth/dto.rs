use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Request body for user registration. Absent fields read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn has_all_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: Uuid,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserPageResponse {
    pub message: &'static str,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"name":"ann"}"#).unwrap();
        assert_eq!(req.name, "ann");
        assert!(req.email.is_empty());
        assert!(!req.has_all_fields());
    }

    #[test]
    fn complete_request_has_all_fields() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"name":"ann","email":"a@x.com","password":"pw1"}"#).unwrap();
        assert!(req.has_all_fields());
    }

    #[test]
    fn responses_use_camel_case() {
        let json = serde_json::to_value(SessionResponse {
            user_id: Uuid::nil(),
            access_token: "T".into(),
        })
        .unwrap();
        assert_eq!(json["accessToken"], "T");
        assert!(json.get("userId").is_some());
    }
}
