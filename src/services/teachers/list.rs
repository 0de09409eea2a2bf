use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, PaginatedResponse, teachers::requests::TeacherQueryParams};
use crate::services::error_response;
use crate::utils::roster_filter::filter_roster;

pub async fn list_teachers(
    service: &TeacherService,
    request: &HttpRequest,
    query: TeacherQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teachers = match storage.list_teachers(query.status).await {
        Ok(teachers) => teachers,
        Err(e) => return Ok(error_response(&e, "Failed to retrieve teacher list")),
    };

    let filtered = filter_roster(teachers, query.search.as_deref().unwrap_or(""));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaginatedResponse::from_snapshot(filtered, &query.pagination),
        "Teacher list retrieved successfully",
    )))
}
