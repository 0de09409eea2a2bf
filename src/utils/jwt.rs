use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";
const REFRESH_COOKIE: &str = "refresh_token";

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // 用户 ID
    pub role: String,       // 角色标签（原样保存，可能是未识别的角色）
    pub token_type: String, // "access" 或 "refresh"
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// 距离过期的剩余秒数，已过期时为 0
    pub fn remaining_seconds(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        self.exp.saturating_sub(now) as u64
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// Access Token 有效期（秒）
    pub fn access_token_ttl() -> u64 {
        (AppConfig::get().jwt.access_token_expiry.max(0) * 60) as u64
    }

    /// Refresh Token 有效期，勾选"记住我"时使用更长的有效期
    pub fn refresh_token_lifetime(remember_me: bool) -> chrono::Duration {
        let jwt = &AppConfig::get().jwt;
        if remember_me {
            chrono::Duration::days(jwt.refresh_token_remember_me_expiry)
        } else {
            chrono::Duration::days(jwt.refresh_token_expiry)
        }
    }

    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::sign(
            &Self::claims(user_id, role, ACCESS_TOKEN, chrono::Duration::minutes(minutes)),
            &Self::secret(),
        )
    }

    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        remember_me: bool,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let secret = Self::secret();
        let refresh = Self::claims(
            user_id,
            role,
            REFRESH_TOKEN,
            Self::refresh_token_lifetime(remember_me),
        );

        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::sign(&refresh, &secret)?,
        })
    }

    pub fn claims(
        user_id: i64,
        role: &str,
        token_type: &str,
        lifetime: chrono::Duration,
    ) -> Claims {
        let now = chrono::Utc::now();
        Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + lifetime).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    pub fn sign(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// 校验签名、过期时间和 token 类型
    pub fn verify(
        token: &str,
        secret: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, &Self::secret(), ACCESS_TOKEN)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, &Self::secret(), REFRESH_TOKEN)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        lifetime: chrono::Duration,
    ) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                lifetime.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 创建空的 Refresh Token Cookie（用于注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }

    /// 从 Authorization 头中提取 Bearer token
    pub fn extract_bearer_token(req: &actix_web::HttpRequest) -> Option<String> {
        req.headers()
            .get(actix_web::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_sign_and_verify() {
        let claims = JwtUtils::claims(7, "teacher", ACCESS_TOKEN, chrono::Duration::minutes(5));
        let token = JwtUtils::sign(&claims, SECRET).unwrap();

        let verified = JwtUtils::verify(&token, SECRET, ACCESS_TOKEN).unwrap();
        assert_eq!(verified.user_id(), Some(7));
        assert_eq!(verified.role, "teacher");
        assert!(verified.remaining_seconds() > 0);
    }

    #[test]
    fn test_wrong_token_type_rejected() {
        let claims = JwtUtils::claims(7, "admin", REFRESH_TOKEN, chrono::Duration::days(1));
        let token = JwtUtils::sign(&claims, SECRET).unwrap();

        assert!(JwtUtils::verify(&token, SECRET, ACCESS_TOKEN).is_err());
        assert!(JwtUtils::verify(&token, SECRET, REFRESH_TOKEN).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = JwtUtils::claims(1, "student", ACCESS_TOKEN, chrono::Duration::minutes(5));
        let token = JwtUtils::sign(&claims, SECRET).unwrap();
        assert!(JwtUtils::verify(&token, "other", ACCESS_TOKEN).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = JwtUtils::claims(1, "student", ACCESS_TOKEN, chrono::Duration::hours(-2));
        let token = JwtUtils::sign(&claims, SECRET).unwrap();
        assert!(JwtUtils::verify(&token, SECRET, ACCESS_TOKEN).is_err());
        assert_eq!(claims.remaining_seconds(), 0);
    }

    #[test]
    fn test_unrecognized_role_survives_round_trip() {
        let claims = JwtUtils::claims(3, "janitor", ACCESS_TOKEN, chrono::Duration::minutes(5));
        let token = JwtUtils::sign(&claims, SECRET).unwrap();
        let verified = JwtUtils::verify(&token, SECRET, ACCESS_TOKEN).unwrap();
        assert_eq!(verified.role, "janitor");
    }
}
