use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::UpdateStudentRequest};
use crate::services::{bad_request, error_response, not_found};
use crate::utils::validate::{validate_email, validate_person_name, validate_registration_number};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    mut body: UpdateStudentRequest,
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
    if let Some(number) = body.registration_number.as_mut() {
        *number = number.trim().to_string();
        if let Err(msg) = validate_registration_number(number) {
            return Ok(bad_request(ErrorCode::BadRequest, msg));
        }
    }

    let storage = service.get_storage(request);
    match storage.update_student(id, body).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(&e, "Failed to update student")),
    }
}
