use crate::error::SubExError;
use actix_web::{web, HttpRequest};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use subex_api_structs::run_alerts_job::QueryParams;
use subex_domain::{User, ID};
use subex_infra::SubExContext;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// The `User` the token was issued for
    pub user_id: ID,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    if token_header_value.len() < 6 || !token_header_value[..6].eq_ignore_ascii_case("bearer") {
        return String::new();
    }
    token_header_value[6..].trim().to_string()
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(parse_authtoken_header)
        .filter(|token| !token.is_empty())
}

fn decode_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims)
}

/// Finds out which `User` is making the request from the bearer token
pub async fn protect_route(req: &HttpRequest, ctx: &SubExContext) -> Result<User, SubExError> {
    let token = bearer_token(req).ok_or_else(|| {
        SubExError::Unauthorized("Missing bearer token in the `authorization` header".into())
    })?;

    let claims = decode_token(&token, &ctx.config.jwt_secret).map_err(|e| {
        SubExError::Unauthorized(format!(
            "Malformed or expired token was provided. Error: {:?}",
            e
        ))
    })?;

    ctx.repos
        .users
        .find(&claims.user_id)
        .await
        .ok_or_else(|| {
            SubExError::Unauthorized(format!(
                "The user with id: {}, specified in the token was not found",
                claims.user_id
            ))
        })
}

/// Compares secrets without returning early on the first differing byte
fn secrets_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Only the external scheduler knowing the cron secret may trigger the alerts job.
/// The secret is read from the bearer token or the `secret` query parameter.
pub fn protect_cron_route(req: &HttpRequest, ctx: &SubExContext) -> Result<(), SubExError> {
    let query_secret = web::Query::<QueryParams>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().secret);

    let provided = [bearer_token(req), query_secret]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if provided.is_empty() {
        return Err(SubExError::Unauthorized(
            "Missing cron secret. Provide it as a bearer token or with the `secret` query parameter"
                .into(),
        ));
    }
    if provided
        .iter()
        .any(|secret| secrets_match(secret, &ctx.config.cron_secret))
    {
        Ok(())
    } else {
        Err(SubExError::Unauthorized("Invalid cron secret provided".into()))
    }
}
