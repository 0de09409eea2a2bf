use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::entries::student_grade_entries;
use crate::models::{ApiResponse, ErrorCode, grades::responses::StudentGradesResponse};
use crate::services::{Actor, error_response, forbidden, resolve_actor};

pub async fn my_grades(service: &GradeService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_actor(&storage, request).await {
        Ok(Actor::Student(_, student)) => student,
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::Forbidden,
                "Only students have personal grades",
            ));
        }
        Err(resp) => return Ok(resp),
    };

    match student_grade_entries(&storage, &student).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentGradesResponse {
                student_id: student.id,
                entries,
            },
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to load grades")),
    }
}
