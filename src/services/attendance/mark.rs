use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, check_record_permission, class_student_ids};
use crate::models::{ApiResponse, ErrorCode, attendance::MarkAttendanceRequest};
use crate::services::{bad_request, error_response, resolve_actor};
use crate::utils::validate::validate_date;

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let date = match validate_date(&body.date) {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(msg) => return Ok(bad_request(ErrorCode::AttendanceDateInvalid, msg)),
    };

    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = check_record_permission(&storage, &actor, body.class_id).await {
        return Ok(resp);
    }

    match class_student_ids(&storage, body.class_id).await {
        Ok(ids) if ids.contains(&body.student_id) => {}
        Ok(_) => {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Student is not enrolled in this class",
            ));
        }
        Err(resp) => return Ok(resp),
    }

    match storage
        .upsert_attendance(body.student_id, body.class_id, &date, body.present)
        .await
    {
        Ok(record) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Attendance recorded",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to record attendance")),
    }
}
