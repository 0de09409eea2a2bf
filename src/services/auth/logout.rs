use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::cache;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
///
/// access token 写入吊销表直到自然过期，身份缓存同时清除；
/// 空的 refresh_token cookie 让浏览器删除登录状态。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = JwtUtils::extract_bearer_token(request) {
        let cache = service.get_cache(request);
        let ttl = JwtUtils::verify_access_token(&token)
            .map(|claims| claims.remaining_seconds())
            .unwrap_or_else(|_| JwtUtils::access_token_ttl())
            .max(1);

        cache
            .insert_raw(cache::revoked_key(&token), "1".to_string(), ttl)
            .await;
        cache.remove(&cache::identity_key(&token)).await;
        info!("Access token revoked for {} seconds", ttl);
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
