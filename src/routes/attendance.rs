use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    attendance::{AttendanceQuery, AttendanceSummaryQuery, MarkAttendanceRequest, RollCallRequest},
    users::capabilities::Capability,
};
use crate::services::AttendanceService;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn mark_attendance(
    req: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.mark(&req, body.into_inner()).await
}

pub async fn roll_call(
    req: HttpRequest,
    body: web::Json<RollCallRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.roll_call(&req, body.into_inner()).await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list(&req, query.into_inner()).await
}

pub async fn attendance_summary(
    req: HttpRequest,
    query: web::Query<AttendanceSummaryQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.summary(&req, query.into_inner()).await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 查询范围由角色决定
                    .route(web::get().to(list_attendance))
                    .route(
                        web::put()
                            .to(mark_attendance)
                            .wrap(RequireCapability::new(Capability::RecordAttendance)),
                    ),
            )
            .route(
                "/roll-call",
                web::post()
                    .to(roll_call)
                    .wrap(RequireCapability::new(Capability::RecordAttendance)),
            )
            .route("/summary", web::get().to(attendance_summary)),
    );
}
