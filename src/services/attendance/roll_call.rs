use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AttendanceService, check_record_permission, class_student_ids};
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{RollCallRequest, RollCallResponse},
};
use crate::services::{bad_request, error_response, resolve_actor};
use crate::utils::validate::validate_date;

/// 点名提交；重复提交覆盖当天记录，不会产生重复行
pub async fn roll_call(
    service: &AttendanceService,
    request: &HttpRequest,
    body: RollCallRequest,
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

    // 先整体校验，再写入
    let enrolled = match class_student_ids(&storage, body.class_id).await {
        Ok(ids) => ids,
        Err(resp) => return Ok(resp),
    };
    if let Some(stranger) = body
        .entries
        .iter()
        .find(|entry| !enrolled.contains(&entry.student_id))
    {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            format!("Student {} is not enrolled in this class", stranger.student_id),
        ));
    }

    let entries: Vec<(i64, bool)> = body
        .entries
        .iter()
        .map(|entry| (entry.student_id, entry.present))
        .collect();
    let records = match storage
        .upsert_attendance_batch(body.class_id, &date, &entries)
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(error_response(&e, "Failed to record attendance")),
    };

    info!(
        "Roll call for class {} on {}: {} entries by user {}",
        body.class_id,
        date,
        records.len(),
        actor.user().id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RollCallResponse {
            class_id: body.class_id,
            date,
            records,
        },
        "Roll call recorded",
    )))
}
