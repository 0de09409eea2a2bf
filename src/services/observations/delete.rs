use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ObservationService, load_own_observation};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found, resolve_actor};

pub async fn delete_observation(
    service: &ObservationService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = load_own_observation(&storage, &actor, id, true).await {
        return Ok(resp);
    }

    match storage.delete_observation(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Observation deleted"))),
        Ok(false) => Ok(not_found(
            ErrorCode::ObservationNotFound,
            "Observation not found",
        )),
        Err(e) => Ok(error_response(&e, "Failed to delete observation")),
    }
}
