use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::ObservationService;
use crate::models::{
    ApiResponse, ErrorCode, classes::requests::ClassScope, observations::ObservationQuery,
};
use crate::services::{Actor, error_response, forbidden, resolve_actor};

pub async fn list_observations(
    service: &ObservationService,
    request: &HttpRequest,
    mut query: ObservationQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    // 教师只看到任教班级的评语
    let visible_classes: Option<HashSet<i64>> = match &actor {
        Actor::Admin(_) => None,
        Actor::Teacher(_, teacher) => {
            match storage.list_classes(ClassScope::TaughtBy(teacher.id)).await {
                Ok(classes) => Some(classes.into_iter().map(|c| c.id).collect()),
                Err(e) => return Ok(error_response(&e, "Failed to load teacher classes")),
            }
        }
        Actor::Student(_, student) => {
            query.student_id = Some(student.id);
            None
        }
        Actor::Unrecognized(_) => {
            return Ok(forbidden(ErrorCode::Forbidden, "Access denied."));
        }
    };

    match storage.list_observations(query).await {
        Ok(mut observations) => {
            if let Some(visible) = visible_classes {
                observations.retain(|o| visible.contains(&o.class_id));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                observations,
                "Observations retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, "Failed to list observations")),
    }
}
