//! 教师、学生档案附带的登录账号

use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::services::{bad_request, error_response};
use crate::storage::Storage;
use crate::utils::{password::hash_password, validate::validate_password_simple};

/// 提供了密码时创建登录账号，邮箱需已规范化
pub(crate) async fn provision_login(
    storage: &Arc<dyn Storage>,
    name: &str,
    email: &str,
    password: Option<&str>,
    role: UserRole,
) -> Result<Option<User>, HttpResponse> {
    let Some(password) = password else {
        return Ok(None);
    };

    if let Err(msg) = validate_password_simple(password) {
        return Err(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "A login with this email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(error_response(&e, "Failed to check login email")),
    }

    let password_hash = match hash_password(password) {
        Ok(hash) => hash,
        Err(e) => return Err(error_response(&e, "Failed to hash password")),
    };

    match storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            avatar_url: None,
        })
        .await
    {
        Ok(user) => {
            info!("Created {} login {} for {}", role, user.id, email);
            Ok(Some(user))
        }
        Err(e) => Err(error_response(&e, "Failed to create login")),
    }
}

/// 档案创建失败时回收刚开通的账号
pub(crate) async fn discard_login(storage: &Arc<dyn Storage>, user: Option<User>) {
    let Some(user) = user else {
        return;
    };
    if let Err(e) = storage.delete_user(user.id).await {
        warn!("Failed to discard orphan login {}: {}", user.id, e);
    }
}

/// 删除档案后一并删除其登录账号
pub(crate) async fn remove_linked_login(storage: &Arc<dyn Storage>, user_id: Option<i64>) {
    let Some(user_id) = user_id else {
        return;
    };
    if let Err(e) = storage.delete_user(user_id).await {
        warn!("Failed to delete linked login {}: {}", user_id, e);
    }
}
