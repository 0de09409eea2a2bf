//! 授课安排：班级 × 学科 × 教师 × 学年

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::SchoolHubError;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::{AssignmentQuery, CreateAssignmentRequest},
};
use crate::services::{Actor, error_response, forbidden, not_found, resolve_actor};
use crate::storage::Storage;

super::lazy_service!(AssignmentService);

impl AssignmentService {
    // 教师只能看到自己的授课安排
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        mut query: AssignmentQuery,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match resolve_actor(&storage, request).await {
            Ok(Actor::Admin(_)) => {}
            Ok(Actor::Teacher(_, teacher)) => query.teacher_id = Some(teacher.id),
            Ok(_) => {
                return Ok(forbidden(
                    ErrorCode::Forbidden,
                    "You do not have permission to list assignments",
                ));
            }
            Err(resp) => return Ok(resp),
        }

        match storage.list_assignments(query).await {
            Ok(assignments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignments,
                "Assignment list retrieved successfully",
            ))),
            Err(e) => Ok(error_response(&e, "Failed to retrieve assignment list")),
        }
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        body: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        if let Err(resp) = ensure_references(&storage, &body).await {
            return Ok(resp);
        }

        let year = body.year.unwrap_or(AppConfig::get().app.school_year);
        match storage
            .create_assignment(body.class_id, body.subject_id, body.teacher_id, year)
            .await
        {
            Ok(assignment) => {
                info!(
                    "Assignment {} created: class {} subject {} teacher {}",
                    assignment.id, assignment.class_id, assignment.subject_id, assignment.teacher_id
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    assignment,
                    "Assignment created successfully",
                )))
            }
            Err(SchoolHubError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
                ApiResponse::error_empty(
                    ErrorCode::AssignmentAlreadyExists,
                    "This subject is already assigned for the class and year",
                ),
            )),
            Err(e) => Ok(error_response(&e, "Failed to create assignment")),
        }
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        match storage.delete_assignment(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Assignment deleted successfully",
            ))),
            Ok(false) => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
            Err(e) => Ok(error_response(&e, "Failed to delete assignment")),
        }
    }
}

/// 班级、学科、教师都必须存在
async fn ensure_references(
    storage: &Arc<dyn Storage>,
    body: &CreateAssignmentRequest,
) -> Result<(), HttpResponse> {
    match storage.get_class_by_id(body.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Err(error_response(&e, "Failed to load class")),
    }
    match storage.get_subject_by_id(body.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => return Err(error_response(&e, "Failed to load subject")),
    }
    crate::services::classes::ensure_teacher_exists(storage, body.teacher_id).await
}
