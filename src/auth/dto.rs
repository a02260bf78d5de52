use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::diet::NOT_SET;

/// Diet preference as sent at signup: either a bare label or `{ "dietType": "…" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FoodPreferences {
    Label(String),
    #[serde(rename_all = "camelCase")]
    Object { diet_type: Option<String> },
}

impl FoodPreferences {
    pub fn label(&self) -> Option<&str> {
        match self {
            FoodPreferences::Label(l) => Some(l),
            FoodPreferences::Object { diet_type } => diet_type.as_deref(),
        }
    }
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub food_preferences: Option<FoodPreferences>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub diet_type: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            diet_type: user
                .diet()
                .map(|d| d.as_str().to_string())
                .unwrap_or_else(|| NOT_SET.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_accepts_bare_and_object_preferences() {
        let bare: SignupRequest = serde_json::from_str(
            r#"{"fullName":"A","email":"a@b.c","password":"p","foodPreferences":"vegan"}"#,
        )
        .unwrap();
        assert_eq!(bare.food_preferences.unwrap().label(), Some("vegan"));

        let obj: SignupRequest = serde_json::from_str(
            r#"{"fullName":"A","email":"a@b.c","password":"p","foodPreferences":{"dietType":"halal"}}"#,
        )
        .unwrap();
        assert_eq!(obj.food_preferences.unwrap().label(), Some("halal"));

        let none: SignupRequest =
            serde_json::from_str(r#"{"fullName":"A","email":"a@b.c","password":"p"}"#).unwrap();
        assert!(none.food_preferences.is_none());
    }

    #[test]
    fn login_response_uses_camel_case() {
        let response = LoginResponse {
            message: "Login successful".into(),
            user: PublicUser {
                id: Uuid::new_v4(),
                full_name: "Ada".into(),
                email: "test@example.com".into(),
                diet_type: NOT_SET.into(),
            },
            redirect_url: "/dashboard".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"redirectUrl\":\"/dashboard\""));
        assert!(json.contains("\"fullName\":\"Ada\""));
        assert!(!json.contains("password"));
    }
}
