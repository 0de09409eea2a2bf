use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, ensure_teacher_exists, validate_capacity};
use crate::config::AppConfig;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};
use crate::services::{bad_request, error_response};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    class_data.name = class_data.name.trim().to_string();
    if class_data.name.is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Class name must not be empty"));
    }
    if class_data.grade_level.trim().is_empty() {
        return Ok(bad_request(ErrorCode::BadRequest, "Grade level must not be empty"));
    }
    if let Err(msg) = validate_capacity(class_data.capacity) {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    // 未指定学年时使用当前学年
    class_data.year.get_or_insert(AppConfig::get().app.school_year);

    let storage = service.get_storage(request);

    if let Some(teacher_id) = class_data.teacher_id
        && let Err(resp) = ensure_teacher_exists(&storage, teacher_id).await
    {
        return Ok(resp);
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.id, class.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(error_response(&e, "Class creation failed")),
    }
}
