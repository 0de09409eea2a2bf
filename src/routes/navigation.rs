use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::{DashboardService, NavigationService};

static NAVIGATION_SERVICE: Lazy<NavigationService> = Lazy::new(NavigationService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

pub async fn menu(request: HttpRequest) -> ActixResult<HttpResponse> {
    NAVIGATION_SERVICE.menu(&request).await
}

pub async fn dashboard(request: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.dashboard(&request).await
}

// 菜单与仪表盘对所有登录用户开放，内容由角色决定
pub fn configure_navigation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/navigation")
            .wrap(middlewares::RequireJWT)
            .route("/menu", web::get().to(menu)),
    )
    .service(
        web::scope("/api/v1/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(dashboard)),
    );
}
