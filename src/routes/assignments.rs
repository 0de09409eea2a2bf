use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    assignments::{AssignmentQuery, CreateAssignmentRequest},
    users::capabilities::Capability,
};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, id.0).await
}

pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 教师查看自己的授课安排
                    .route(web::get().to(list_assignments).wrap(RequireCapability::any(&[
                        Capability::ManageAssignments,
                        Capability::RecordGrades,
                    ])))
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(RequireCapability::new(Capability::ManageAssignments)),
                    ),
            )
            .service(
                web::resource("/{id}").route(
                    web::delete()
                        .to(delete_assignment)
                        .wrap(RequireCapability::new(Capability::ManageAssignments)),
                ),
            ),
    );
}
