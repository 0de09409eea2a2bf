use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode, PaginatedResponse,
    classes::requests::ClassScope,
    students::requests::{StudentFilter, StudentQueryParams},
};
use crate::services::{Actor, error_response, forbidden, resolve_actor};
use crate::utils::roster_filter::filter_roster;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 教师只能看到自己任教班级的学生
    let taught: Option<HashSet<i64>> = match resolve_actor(&storage, request).await {
        Ok(Actor::Admin(_)) => None,
        Ok(Actor::Teacher(_, teacher)) => {
            match storage.list_classes(ClassScope::TaughtBy(teacher.id)).await {
                Ok(classes) => Some(classes.into_iter().map(|c| c.id).collect()),
                Err(e) => return Ok(error_response(&e, "Failed to load teacher classes")),
            }
        }
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::Forbidden,
                "You do not have permission to list students",
            ));
        }
        Err(resp) => return Ok(resp),
    };

    if let (Some(taught), Some(class_id)) = (&taught, query.class_id)
        && !taught.contains(&class_id)
    {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "You can only list students of classes you teach",
        ));
    }

    let students = match storage
        .list_students(StudentFilter {
            class_id: query.class_id,
            status: query.status,
        })
        .await
    {
        Ok(students) => students,
        Err(e) => return Ok(error_response(&e, "Failed to retrieve student list")),
    };

    let students = match &taught {
        Some(taught) => students
            .into_iter()
            .filter(|s| s.class_id.is_some_and(|id| taught.contains(&id)))
            .collect(),
        None => students,
    };

    let filtered = filter_roster(students, query.search.as_deref().unwrap_or(""));
    let page = PaginatedResponse::from_snapshot(filtered, &query.pagination);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        "Student list retrieved successfully",
    )))
}
