use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    grades::requests::{GradeSheetQuery, RecordGradeRequest},
    users::capabilities::Capability,
};
use crate::services::GradeService;
use crate::utils::SafeStudentIdI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn record_grade(
    req: HttpRequest,
    grade_data: web::Json<RecordGradeRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_grade(&req, grade_data.into_inner()).await
}

pub async fn grade_sheet(
    req: HttpRequest,
    query: web::Query<GradeSheetQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.grade_sheet(&req, query.into_inner()).await
}

pub async fn my_grades(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.my_grades(&req).await
}

pub async fn my_report_card(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.my_report_card(&req).await
}

pub async fn report_card(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.report_card(&req, student_id.0).await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .route(
                "",
                web::put()
                    .to(record_grade)
                    .wrap(RequireCapability::new(Capability::RecordGrades)),
            )
            .route(
                "/sheet",
                web::get()
                    .to(grade_sheet)
                    .wrap(RequireCapability::new(Capability::RecordGrades)),
            )
            .route(
                "/me",
                web::get()
                    .to(my_grades)
                    .wrap(RequireCapability::new(Capability::ViewOwnGrades)),
            ),
    )
    .service(
        web::scope("/api/v1/report-card")
            .wrap(middlewares::RequireJWT)
            .route(
                "/me",
                web::get()
                    .to(my_report_card)
                    .wrap(RequireCapability::new(Capability::ViewOwnReportCard)),
            )
            // 管理员、任课教师或学生本人，服务层判断
            .route("/{student_id}", web::get().to(report_card)),
    );
}
