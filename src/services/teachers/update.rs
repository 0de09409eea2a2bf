use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::UpdateTeacherRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::{validate_email, validate_person_name};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
    mut body: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = body.name.as_mut() {
        *name = name.trim().to_string();
        if let Err(msg) = validate_person_name(name) {
            return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
        }
    }
    if let Some(email) = body.email.as_mut() {
        *email = email.trim().to_lowercase();
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
    }

    let storage = service.get_storage(request);
    match storage.update_teacher(id, body).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(error_response(&e, "Failed to update teacher")),
    }
}
