use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use taskboard_core::{ActorIdentity, AppError, OrgId};

use crate::error::{ApiError, ApiResult};

/// Resolves the acting identity from headers set by the identity-aware
/// proxy fronting this API. Authentication itself is owned by the external
/// provider; requests reaching this service are already verified.
pub async fn require_identity(mut request: Request, next: Next) -> ApiResult<Response> {
    let headers = request.headers();

    let user_id = header_value(headers, "x-user-id")?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let display_name = header_value(headers, "x-user-name")?.unwrap_or_else(|| user_id.clone());
    let avatar_url = header_value(headers, "x-user-image")?.unwrap_or_default();
    let email = header_value(headers, "x-user-email")?;
    let org_id = header_value(headers, "x-org-id")?
        .map(OrgId::new)
        .transpose()?;

    let identity = ActorIdentity::new(user_id, display_name, avatar_url, email, org_id);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, ApiError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(ToOwned::to_owned)
                .map_err(|_| AppError::Validation(format!("{name} header is not valid UTF-8")))
        })
        .transpose()
        .map_err(ApiError::from)
}
