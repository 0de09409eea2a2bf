use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode, attendance::AttendanceQuery};
use crate::services::{Actor, bad_request, error_response, forbidden, resolve_actor, teaches_class};
use crate::utils::validate::validate_date;

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    mut query: AttendanceQuery,
) -> ActixResult<HttpResponse> {
    if let Some(date) = &query.date {
        match validate_date(date) {
            Ok(parsed) => query.date = Some(parsed.format("%Y-%m-%d").to_string()),
            Err(msg) => return Ok(bad_request(ErrorCode::AttendanceDateInvalid, msg)),
        }
    }

    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    // 权限校验
    match &actor {
        Actor::Admin(_) => {}
        Actor::Teacher(_, teacher) => {
            let Some(class_id) = query.class_id else {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "class_id is required",
                ));
            };
            match teaches_class(&storage, teacher.id, class_id).await {
                Ok(true) => {}
                Ok(false) => {
                    return Ok(forbidden(
                        ErrorCode::AttendancePermissionDenied,
                        "You can only view attendance for classes you teach",
                    ));
                }
                Err(resp) => return Ok(resp),
            }
        }
        Actor::Student(_, student) => {
            if query.student_id.is_some_and(|id| id != student.id) {
                return Ok(forbidden(
                    ErrorCode::AttendancePermissionDenied,
                    "You can only view your own attendance",
                ));
            }
            query.student_id = Some(student.id);
        }
        Actor::Unrecognized(_) => {
            return Ok(forbidden(ErrorCode::Forbidden, "Access denied."));
        }
    }

    match storage.list_attendance(query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to list attendance")),
    }
}
