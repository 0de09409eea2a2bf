use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, can_view_student};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, forbidden, not_found, resolve_actor};

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let student = match storage.get_student_by_id(id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(&e, "Failed to load student")),
    };

    match can_view_student(&storage, &actor, &student).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(false) => Ok(forbidden(
            ErrorCode::Forbidden,
            "You do not have permission to view this student",
        )),
        Err(resp) => Ok(resp),
    }
}
