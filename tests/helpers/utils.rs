use super::setup::TestApp;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use subex_domain::User;
use subex_sdk::SubExSDK;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    exp: usize,
    user_id: String,
}

pub fn create_token(user: &User, secret: &str) -> String {
    let claims = Claims {
        exp: (Utc::now().timestamp() + 60 * 60) as usize,
        user_id: user.id.to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("To create token")
}

/// Stores a new user and returns an SDK authenticated as that user
pub async fn create_user_sdk(app: &TestApp, email: &str) -> (User, SubExSDK) {
    let user = User::new(email, "Ada");
    app.ctx
        .repos
        .users
        .insert(&user)
        .await
        .expect("To insert user");
    let token = create_token(&user, &app.config.jwt_secret);
    let sdk = SubExSDK::new(app.address.clone(), token);
    (user, sdk)
}
