pub mod list;
pub mod mark;
pub mod roll_call;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    attendance::{AttendanceQuery, AttendanceSummaryQuery, MarkAttendanceRequest, RollCallRequest},
};
use crate::services::{Actor, error_response, forbidden, teaches_class};
use crate::storage::Storage;

super::lazy_service!(AttendanceService);

impl AttendanceService {
    // 记录单条考勤
    pub async fn mark(
        &self,
        request: &HttpRequest,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, body).await
    }

    // 点名：整班批量记录
    pub async fn roll_call(
        &self,
        request: &HttpRequest,
        body: RollCallRequest,
    ) -> ActixResult<HttpResponse> {
        roll_call::roll_call(self, request, body).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: AttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn summary(
        &self,
        request: &HttpRequest,
        query: AttendanceSummaryQuery,
    ) -> ActixResult<HttpResponse> {
        summary::attendance_summary(self, request, query).await
    }
}

/// 记录考勤权限：管理员任意班级，教师仅限任教班级
pub(crate) async fn check_record_permission(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    class_id: i64,
) -> Result<(), HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(_, teacher) => {
            if teaches_class(storage, teacher.id, class_id).await? {
                Ok(())
            } else {
                Err(forbidden(
                    ErrorCode::AttendancePermissionDenied,
                    "You can only record attendance for classes you teach",
                ))
            }
        }
        _ => Err(forbidden(
            ErrorCode::AttendancePermissionDenied,
            "You are not allowed to record attendance",
        )),
    }
}

/// 班级有效学生 ID
pub(crate) async fn class_student_ids(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<Vec<i64>, HttpResponse> {
    storage
        .list_students(crate::models::students::requests::StudentFilter {
            class_id: Some(class_id),
            status: None,
        })
        .await
        .map(|students| students.into_iter().map(|s| s.id).collect())
        .map_err(|e| error_response(&e, "Failed to load class roster"))
}
