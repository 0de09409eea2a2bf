//! 学科目录，仅管理员维护

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::errors::SchoolHubError;
use crate::models::{ApiResponse, ErrorCode, subjects::CreateSubjectRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::{validate_person_name, validate_subject_code};

super::lazy_service!(SubjectService);

impl SubjectService {
    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.list_subjects().await {
            Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                subjects,
                "Subject list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, "Failed to retrieve subject list")),
        }
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        mut body: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        // 代码统一大写
        body.code = body.code.trim().to_uppercase();
        body.name = body.name.trim().to_string();

        if let Err(msg) = validate_subject_code(&body.code) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
        if validate_person_name(&body.name).is_err() {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Subject name must be 1-100 characters",
            ));
        }

        let storage = self.get_storage(request);
        match storage.create_subject(body).await {
            Ok(subject) => {
                info!("Subject {} ({}) created", subject.id, subject.code);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    subject,
                    "Subject created successfully",
                )))
            }
            Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
                ApiResponse::error_empty(ErrorCode::SubjectAlreadyExists, "Subject code already exists"),
            )),
            Err(e) => Ok(error_response(&e, "Failed to create subject")),
        }
    }

    // 授课安排与成绩随学科级联删除
    pub async fn delete_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_subject(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Subject deleted successfully",
            ))),
            Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
            Err(e) => Ok(error_response(&e, "Failed to delete subject")),
        }
    }
}
