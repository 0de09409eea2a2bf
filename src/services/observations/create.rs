use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ObservationService, validate_content};
use crate::models::{ApiResponse, ErrorCode, observations::CreateObservationRequest};
use crate::services::{
    Actor, bad_request, enrolled_in_class, error_response, forbidden, resolve_actor, teaches_class,
};

pub async fn create_observation(
    service: &ObservationService,
    request: &HttpRequest,
    mut body: CreateObservationRequest,
) -> ActixResult<HttpResponse> {
    body.content = match validate_content(&body.content) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request);
    let teacher = match resolve_actor(&storage, request).await {
        Ok(Actor::Teacher(_, teacher)) => teacher,
        Ok(_) => {
            return Ok(forbidden(
                ErrorCode::ObservationPermissionDenied,
                "Only teachers can write observations",
            ));
        }
        Err(resp) => return Ok(resp),
    };

    match teaches_class(&storage, teacher.id, body.class_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(forbidden(
                ErrorCode::ObservationPermissionDenied,
                "You can only write observations for classes you teach",
            ));
        }
        Err(resp) => return Ok(resp),
    }

    match enrolled_in_class(&storage, body.student_id, body.class_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Student is not enrolled in this class",
            ));
        }
        Err(resp) => return Ok(resp),
    }

    match storage.create_observation(teacher.id, body).await {
        Ok(observation) => Ok(HttpResponse::Created().json(ApiResponse::success(
            observation,
            "Observation created",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to create observation")),
    }
}
