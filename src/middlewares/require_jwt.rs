/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，通过后把当前用户放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * 处理程序中：
 *
 * ```rust,ignore
 * let user = RequireJWT::extract_user_claims(&req);
 * let user_id = RequireJWT::extract_user_id(&req);
 * ```
 *
 * 认证流程：
 *
 * 1. 校验签名、过期时间和 token 类型
 * 2. 已注销的 token 直接拒绝
 * 3. 先查缓存，未命中再查库并写回缓存
 * 4. 非 active 账号拒绝
 */

use crate::cache::{self, CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{self, UserRole, UserStatus};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireJWT;

enum AuthFailure {
    Invalid(String),
    Revoked,
}

// 辅助函数：提取并验证 JWT access token
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<entities::User, AuthFailure> {
    let token = JwtUtils::extract_bearer_token(req.request()).ok_or_else(|| {
        AuthFailure::Invalid("Missing or invalid Authorization header".to_string())
    })?;

    let claims = JwtUtils::verify_access_token(&token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        AuthFailure::Invalid("Invalid JWT token".to_string())
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .expect("Cache not found in app data")
        .get_ref()
        .clone();

    if cache.get_raw(&cache::revoked_key(&token)).await.is_found() {
        return Err(AuthFailure::Revoked);
    }

    // 从缓存中获取用户信息
    let identity_key = cache::identity_key(&token);
    match cache.get_raw(&identity_key).await {
        CacheResult::Found(json) => match serde_json::from_str::<entities::User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => {
                cache.remove(&identity_key).await;
                info!("Failed to deserialize cached user for token");
            }
        },
        _ => debug!("User not found in cache, loading from storage"),
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone();

    let user_id = claims
        .user_id()
        .ok_or_else(|| AuthFailure::Invalid("Invalid user ID in JWT".to_string()))?;

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| AuthFailure::Invalid("Failed to retrieve user from storage".to_string()))?
        .ok_or_else(|| AuthFailure::Invalid("User not found".to_string()))?;

    if user.status != UserStatus::Active {
        return Err(AuthFailure::Invalid("User is not active".to_string()));
    }

    // 缓存时间不超过 token 剩余有效期
    let ttl = AppConfig::get()
        .cache
        .default_ttl
        .min(claims.remaining_seconds())
        .max(1);
    if let Ok(user_json) = serde_json::to_string(&user) {
        cache.insert_raw(identity_key, user_json, ttl).await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    let (code, message) = match failure {
                        AuthFailure::Revoked => {
                            (ErrorCode::TokenRevoked, "Token has been revoked".to_string())
                        }
                        AuthFailure::Invalid(err) => {
                            (ErrorCode::Unauthorized, format!("Unauthorized: {err}"))
                        }
                    };
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        message
                    );
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, code, &message)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    /// 从请求扩展中提取用户ID
    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    /// 从请求扩展中提取已识别的角色，未知角色返回 None
    pub fn extract_user_role(req: &actix_web::HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<entities::User>()
            .and_then(|user| user.role())
    }
}
