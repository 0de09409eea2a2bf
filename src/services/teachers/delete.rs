use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::accounts::remove_linked_login;
use crate::services::{error_response, not_found};

// 授课安排与评语随教师级联删除，班主任置空
pub async fn delete_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match storage.get_teacher_by_id(id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => return Ok(error_response(&e, "Failed to load teacher")),
    };

    match storage.delete_teacher(id).await {
        Ok(true) => {
            remove_linked_login(&storage, teacher.user_id).await;
            info!("Teacher {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(error_response(&e, "Failed to delete teacher")),
    }
}
