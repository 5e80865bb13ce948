use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

/// Identity attached to the request by `protect`.
/// Handlers read it with `Extension<AuthUser>` and pass the id on explicitly.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

/// Requires `Authorization: Bearer <HS256 JWT>` signed with `JWT_SECRET`.
pub async fn protect(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let user_id = verify_token(token, &state.config.jwt_secret)?;
    req.extensions_mut().insert(AuthUser { id: user_id });
    Ok(next.run(req).await)
}

fn verify_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims.sub)
    .map_err(|e| {
        debug!("Rejected bearer token: {e}");
        AppError::Unauthorized
    })
}

#[cfg(test)]
pub fn bearer_for(user_id: Uuid, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[test]
    fn test_verify_token_round_trips_user_id() {
        let user_id = Uuid::new_v4();
        let header = bearer_for(user_id, "secret");
        let token = header.strip_prefix("Bearer ").unwrap();

        assert_eq!(verify_token(token, "secret").unwrap(), user_id);
    }

    #[test]
    fn test_verify_token_rejects_wrong_secret() {
        let header = bearer_for(Uuid::new_v4(), "secret");
        let token = header.strip_prefix("Bearer ").unwrap();

        assert!(matches!(
            verify_token(token, "other-secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        assert!(matches!(
            verify_token("not-a-jwt", "secret"),
            Err(AppError::Unauthorized)
        ));
    }
}
