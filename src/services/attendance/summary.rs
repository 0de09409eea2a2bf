use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{AttendanceQuery, AttendanceSummary, AttendanceSummaryQuery},
};
use crate::services::{Actor, bad_request, error_response, forbidden, resolve_actor, teaches_class};

pub async fn attendance_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceSummaryQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let mut filter = AttendanceQuery {
        class_id: query.class_id,
        student_id: query.student_id,
        date: None,
    };

    // 学生只能查询自己
    match &actor {
        Actor::Admin(_) => {}
        Actor::Teacher(_, teacher) => {
            let Some(class_id) = query.class_id else {
                return Ok(bad_request(ErrorCode::BadRequest, "class_id is required"));
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
            filter.student_id = Some(student.id);
        }
        Actor::Unrecognized(_) => {
            return Ok(forbidden(ErrorCode::Forbidden, "Access denied."));
        }
    }

    match storage.list_attendance(filter).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSummary::from_records(&records),
            "Attendance summary computed",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to compute attendance summary")),
    }
}
