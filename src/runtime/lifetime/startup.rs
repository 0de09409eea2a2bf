use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::{User, UserRole};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_ADMIN_EMAIL: &str = "admin@localhost";
const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// 缓存后端不可用时的回退
const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 创建缓存实例，配置的后端失败时回退到内存缓存
async fn create_cache() -> std::result::Result<Arc<dyn ObjectCache>, Box<dyn std::error::Error>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();

    let mut candidates = vec![cache_type];
    if cache_type != FALLBACK_CACHE {
        candidates.push(FALLBACK_CACHE);
    }

    for name in candidates {
        let Some(constructor) = get_object_cache_plugin(name) else {
            warn!("Cache backend '{}' not found in registry", name);
            continue;
        };
        match constructor().await {
            Ok(cache) => {
                if name != cache_type {
                    warn!("Falling back to {} cache backend", name);
                }
                warn!("Successfully created {} cache backend", name);
                return Ok(Arc::from(cache));
            }
            Err(e) => warn!("Failed to create {} cache: {}", name, e),
        }
    }

    Err(format!("No cache backend available (tried: {cache_type})").into())
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 没有任何账号时创建默认管理员，返回新建的账号
async fn ensure_admin(storage: &Arc<dyn Storage>, password_hash: String) -> Result<Option<User>> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(None);
    }

    let user = storage
        .create_user(CreateUserRequest {
            name: DEFAULT_ADMIN_NAME.to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password_hash,
            role: UserRole::Admin,
            avatar_url: None,
        })
        .await?;
    Ok(Some(user))
}

/// 初始化默认管理员账号
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("No users found in database, creating default admin account..."),
        Ok(_) => return,
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 优先使用环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    match ensure_admin(storage, password_hash).await {
        Ok(Some(user)) => info!(
            "Default admin account created successfully (ID: {}, email: {})",
            user.id, user.email
        ),
        Ok(None) => {}
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// 准备服务器启动的上下文：存储（含迁移）、默认管理员、缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;

    let cache = create_cache().await.expect("Failed to create cache");
    warn!("Cache backend initialized");

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[test]
    fn generated_password_uses_charset() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_alphanumeric() || "!@#$%".contains(c)));
    }

    #[tokio::test]
    async fn admin_is_seeded_only_once() {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::with_database_config(&DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                pool_size: 1,
                timeout: 5,
            })
            .await
            .unwrap(),
        );

        let admin = ensure_admin(&storage, "hash".to_string()).await.unwrap().unwrap();
        assert_eq!(admin.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(admin.role(), Some(UserRole::Admin));
        assert_eq!(admin.identity().avatar, "A");

        assert!(ensure_admin(&storage, "hash".to_string()).await.unwrap().is_none());
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
