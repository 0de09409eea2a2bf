use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    Actor, enrolled_in_class, error_response, forbidden, not_found, resolve_actor, teaches_class,
};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => return Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => return Ok(error_response(&e, "Failed to get class information")),
    };

    // 权限校验
    let allowed = match &actor {
        Actor::Admin(_) => Ok(true),
        Actor::Teacher(_, teacher) => teaches_class(&storage, teacher.id, class.id).await,
        Actor::Student(_, student) => enrolled_in_class(&storage, student.id, class.id).await,
        Actor::Unrecognized(_) => Ok(false),
    };

    match allowed {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class information retrieved successfully",
        ))),
        Ok(false) => Ok(forbidden(
            ErrorCode::Forbidden,
            "You do not have permission to view this class",
        )),
        Err(resp) => Ok(resp),
    }
}
