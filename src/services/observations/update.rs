use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ObservationService, load_own_observation, validate_content};
use crate::models::{ApiResponse, ErrorCode, observations::UpdateObservationRequest};
use crate::services::{bad_request, error_response, not_found, resolve_actor};

pub async fn update_observation(
    service: &ObservationService,
    request: &HttpRequest,
    id: i64,
    body: UpdateObservationRequest,
) -> ActixResult<HttpResponse> {
    let content = match validate_content(&body.content) {
        Ok(content) => content,
        Err(msg) => return Ok(bad_request(ErrorCode::BadRequest, msg)),
    };

    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_own_observation(&storage, &actor, id, false).await {
        return Ok(resp);
    }

    match storage.update_observation(id, content).await {
        Ok(Some(observation)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            observation,
            "Observation updated",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::ObservationNotFound,
            "Observation not found",
        )),
        Err(e) => Ok(error_response(&e, "Failed to update observation")),
    }
}
