use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, ensure_teacher_exists, validate_capacity};
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};
use crate::services::{bad_request, error_response, not_found};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    mut update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = update_data.name.as_mut() {
        *name = name.trim().to_string();
        if name.is_empty() {
            return Ok(bad_request(ErrorCode::BadRequest, "Class name must not be empty"));
        }
    }
    if let Err(msg) = validate_capacity(update_data.capacity) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let storage = service.get_storage(request);

    if let Some(teacher_id) = update_data.teacher_id
        && let Err(resp) = ensure_teacher_exists(&storage, teacher_id).await
    {
        return Ok(resp);
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(error_response(&e, "Failed to update class information")),
    }
}
