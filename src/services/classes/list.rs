use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{
    ApiResponse, ErrorCode, PaginatedResponse,
    classes::requests::{ClassQueryParams, ClassScope},
};
use crate::services::{Actor, error_response, forbidden, resolve_actor};
use crate::utils::roster_filter::filter_roster;

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员查全部，教师查任教班级，学生查就读班级
    let scope = match resolve_actor(&storage, request).await {
        Ok(Actor::Admin(_)) => ClassScope::All,
        Ok(Actor::Teacher(_, teacher)) => ClassScope::TaughtBy(teacher.id),
        Ok(Actor::Student(_, student)) => ClassScope::EnrolledStudent(student.id),
        Ok(Actor::Unrecognized(_)) => {
            return Ok(forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to list classes",
            ));
        }
        Err(resp) => return Ok(resp),
    };

    let mut classes = match storage.list_classes(scope).await {
        Ok(classes) => classes,
        Err(e) => return Ok(error_response(&e, "Failed to retrieve class list")),
    };
    if let Some(status) = query.status {
        classes.retain(|c| c.status == status);
    }

    let filtered = filter_roster(classes, query.search.as_deref().unwrap_or(""));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaginatedResponse::from_snapshot(filtered, &query.pagination),
        "Class list retrieved successfully",
    )))
}
