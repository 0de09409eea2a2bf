//! 入班记录：学生 × 班级，同一学生同时只有一条有效记录

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{CreateEnrollmentRequest, EnrollmentQuery, UpdateEnrollmentRequest},
};
use crate::services::students::create::ensure_class_has_room;
use crate::services::{enrolled_in_class, error_response, not_found};

super::lazy_service!(EnrollmentService);

impl EnrollmentService {
    pub async fn list_enrollments(
        &self,
        request: &HttpRequest,
        query: EnrollmentQuery,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.list_enrollments(query).await {
            Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollments,
                "Enrollment list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, "Failed to retrieve enrollment list")),
        }
    }

    // 转入新班级时，原有效记录标记为已转出
    pub async fn create_enrollment(
        &self,
        request: &HttpRequest,
        body: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_student_by_id(body.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => return Ok(error_response(&e, "Failed to load student")),
        }

        match enrolled_in_class(&storage, body.student_id, body.class_id).await {
            Ok(true) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::EnrollmentAlreadyExists,
                    "Student is already enrolled in this class",
                )));
            }
            Ok(false) => {}
            Err(resp) => return Ok(resp),
        }

        if let Err(resp) = ensure_class_has_room(&storage, body.class_id).await {
            return Ok(resp);
        }

        match storage.create_enrollment(body.student_id, body.class_id).await {
            Ok(enrollment) => {
                info!(
                    "Student {} enrolled in class {}",
                    enrollment.student_id, enrollment.class_id
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    enrollment,
                    "Enrollment created successfully",
                )))
            }
            Err(e) => Ok(error_response(&e, "Failed to create enrollment")),
        }
    }

    pub async fn update_enrollment(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.update_enrollment_status(id, body.status).await {
            Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment updated successfully",
            ))),
            Ok(None) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
            Err(e) => Ok(error_response(&e, "Failed to update enrollment")),
        }
    }

    pub async fn delete_enrollment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_enrollment(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Enrollment deleted successfully",
            ))),
            Ok(false) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
            Err(e) => Ok(error_response(&e, "Failed to delete enrollment")),
        }
    }
}
