use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::entries::build_report_card;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::can_view_student;
use crate::services::{Actor, error_response, forbidden, not_found, resolve_actor};

pub async fn my_report_card(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match resolve_actor(&storage, request).await {
        Ok(Actor::Student(_, student)) => student,
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::Forbidden,
                "Only students have a personal report card",
            ));
        }
        Err(resp) => return Ok(resp),
    };

    match build_report_card(&storage, student).await {
        Ok(card) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            card,
            "Report card retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to build report card")),
    }
}

pub async fn report_card(
    service: &GradeService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let student = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(&e, "Failed to load student")),
    };

    // 权限校验
    let allowed = match can_view_student(&storage, &actor, &student).await {
        Ok(allowed) => allowed,
        Err(resp) => return Ok(resp),
    };
    if !allowed {
        return Ok(forbidden(
            ErrorCode::Forbidden,
            "You are not allowed to view this report card",
        ));
    }

    match build_report_card(&storage, student).await {
        Ok(card) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            card,
            "Report card retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to build report card")),
    }
}
