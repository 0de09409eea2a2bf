use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    navigation::{MenuResponse, resolve_menu},
};

pub struct NavigationService;

impl NavigationService {
    pub fn new_lazy() -> Self {
        Self
    }

    /// 当前用户可见菜单；未识别角色得到空菜单
    pub async fn menu(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized access, please login",
            )));
        };

        let response = MenuResponse {
            items: resolve_menu(&user.role),
            role: user.role,
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Menu resolved")))
    }
}
