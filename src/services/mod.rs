// 服务骨架：懒加载存储，运行时从 app_data 取
macro_rules! lazy_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    crate::services::storage_from(request)
                }
            }
        }
    };
}

pub(crate) use lazy_service;

pub(crate) mod accounts;
pub mod assignments;
pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod enrollments;
pub mod grades;
pub mod navigation;
pub mod observations;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use assignments::AssignmentService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use grades::GradeService;
pub use navigation::NavigationService;
pub use observations::ObservationService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::errors::SchoolHubError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    classes::requests::ClassScope,
    students::entities::Student,
    teachers::entities::Teacher,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

/// 当前请求的调用者（已解析出对应的教师或学生档案）
pub(crate) enum Actor {
    Admin(User),
    Teacher(User, Teacher),
    Student(User, Student),
    Unrecognized(User),
}

impl Actor {
    pub(crate) fn user(&self) -> &User {
        match self {
            Actor::Admin(u) | Actor::Teacher(u, _) | Actor::Student(u, _) | Actor::Unrecognized(u) => u,
        }
    }
}

/// 存储层错误映射为 HTTP 响应
pub(crate) fn error_response(err: &SchoolHubError, context: &str) -> HttpResponse {
    match err {
        SchoolHubError::ScoreOutOfRange(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeScoreOutOfRange, msg)),
        SchoolHubError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        SchoolHubError::DateParse(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AttendanceDateInvalid, msg)),
        SchoolHubError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        SchoolHubError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        SchoolHubError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg))
        }
        SchoolHubError::Authentication(msg) => HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, msg)),
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

pub(crate) fn forbidden(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 解析调用者；教师/学生账号必须关联档案
pub(crate) async fn resolve_actor(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Actor, HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user",
        )));
    };

    match user.role() {
        Some(UserRole::Admin) => Ok(Actor::Admin(user)),
        Some(UserRole::Teacher) => match storage.get_teacher_by_user_id(user.id).await {
            Ok(Some(teacher)) => Ok(Actor::Teacher(user, teacher)),
            Ok(None) => Err(forbidden(
                ErrorCode::Forbidden,
                "No teacher profile is linked to this account",
            )),
            Err(e) => Err(error_response(&e, "Failed to load teacher profile")),
        },
        Some(UserRole::Student) => match storage.get_student_by_user_id(user.id).await {
            Ok(Some(student)) => Ok(Actor::Student(user, student)),
            Ok(None) => Err(forbidden(
                ErrorCode::Forbidden,
                "No student profile is linked to this account",
            )),
            Err(e) => Err(error_response(&e, "Failed to load student profile")),
        },
        None => Ok(Actor::Unrecognized(user)),
    }
}

/// 教师是否任教该班级（班主任或有授课安排）
pub(crate) async fn teaches_class(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
    class_id: i64,
) -> Result<bool, HttpResponse> {
    storage
        .list_classes(ClassScope::TaughtBy(teacher_id))
        .await
        .map(|classes| classes.iter().any(|c| c.id == class_id))
        .map_err(|e| error_response(&e, "Failed to load teacher classes"))
}

/// 学生是否在该班级有效就读
pub(crate) async fn enrolled_in_class(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    class_id: i64,
) -> Result<bool, HttpResponse> {
    storage
        .list_classes(ClassScope::EnrolledStudent(student_id))
        .await
        .map(|classes| classes.iter().any(|c| c.id == class_id))
        .map_err(|e| error_response(&e, "Failed to load student classes"))
}

/// 按请求取存储实例
pub(crate) fn storage_from(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}
