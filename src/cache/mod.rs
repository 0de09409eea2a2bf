//! 缓存层
//!
//! 后端通过 `declare_object_cache_plugin!` 在进程启动时注册到插件表，
//! 启动流程按配置的 `cache.type` 选择具体实现。

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 缓存键：已认证用户（按 access token）
pub fn identity_key(token: &str) -> String {
    format!("user:{token}")
}

/// 缓存键：已注销的 access token
pub fn revoked_key(token: &str) -> String {
    format!("revoked:{token}")
}

/// 声明并注册一个缓存插件
///
/// 类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    ::std::boxed::Box::pin(async {
                        <$ty>::new()
                            .map(|cache| {
                                ::std::boxed::Box::new(cache)
                                    as ::std::boxed::Box<dyn $crate::cache::ObjectCache>
                            })
                            .map_err($crate::errors::SchoolHubError::cache_connection)
                    })
                }),
            );
        }
    };
}
