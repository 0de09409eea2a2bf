use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    enrollments::{CreateEnrollmentRequest, EnrollmentQuery, UpdateEnrollmentRequest},
    users::capabilities::Capability,
};
use crate::services::EnrollmentService;
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, query.into_inner())
        .await
}

pub async fn create_enrollment(
    req: HttpRequest,
    enrollment_data: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(&req, enrollment_data.into_inner())
        .await
}

pub async fn update_enrollment(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete_enrollment(&req, id.0).await
}

pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(RequireCapability::new(Capability::ManageEnrollments))
                    .route("", web::get().to(list_enrollments))
                    .route("", web::post().to(create_enrollment))
                    .route("/{id}", web::put().to(update_enrollment))
                    .route("/{id}", web::delete().to(delete_enrollment)),
            ),
    );
}
