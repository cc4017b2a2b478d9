use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use crate::shared::error::AppError;

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = claims_from_request(&req).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = claims_from_request(&req).await?;
    if !claims.is_admin {
        return Err(AppError::Forbidden);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

async fn claims_from_request(
    req: &Request<Body>,
) -> Result<contracts::system::auth::TokenClaims, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::NotAuthenticated)?;

    // Check Bearer prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::NotAuthenticated)?;

    super::jwt::validate_token(token)
        .await
        .map_err(|_| AppError::NotAuthenticated)
}
