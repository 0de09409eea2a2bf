use super::entities::UserRole;

/// 创建登录账号（存储层），`password_hash` 由服务层预先计算
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
}
