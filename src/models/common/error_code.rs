use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码
///
/// 0 为成功；1xxx 通用；2xxx 认证与用户；3xxx 名册；4xxx 成绩；5xxx 考勤与评语。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    AuthFailed = 2000,
    TokenRevoked = 2001,
    UserNotFound = 2004,
    UserEmailInvalid = 2010,
    UserEmailAlreadyExists = 2011,
    UserPasswordInvalid = 2012,
    UserNameInvalid = 2013,

    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    TeacherNotFound = 3010,
    TeacherAlreadyExists = 3011,
    ClassNotFound = 3020,
    ClassAlreadyExists = 3021,
    ClassFull = 3022,
    SubjectNotFound = 3030,
    SubjectAlreadyExists = 3031,
    AssignmentNotFound = 3040,
    AssignmentAlreadyExists = 3041,
    EnrollmentNotFound = 3050,
    EnrollmentAlreadyExists = 3051,

    GradeScoreOutOfRange = 4000,
    GradeBimesterInvalid = 4001,
    GradePermissionDenied = 4003,

    AttendanceDateInvalid = 5000,
    AttendancePermissionDenied = 5003,
    ObservationNotFound = 5010,
    ObservationPermissionDenied = 5013,
}
