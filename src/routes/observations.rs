use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    observations::{CreateObservationRequest, ObservationQuery, UpdateObservationRequest},
    users::capabilities::Capability,
};
use crate::services::ObservationService;
use crate::utils::SafeIDI64;

static OBSERVATION_SERVICE: Lazy<ObservationService> = Lazy::new(ObservationService::new_lazy);

pub async fn create_observation(
    req: HttpRequest,
    body: web::Json<CreateObservationRequest>,
) -> ActixResult<HttpResponse> {
    OBSERVATION_SERVICE.create(&req, body.into_inner()).await
}

pub async fn list_observations(
    req: HttpRequest,
    query: web::Query<ObservationQuery>,
) -> ActixResult<HttpResponse> {
    OBSERVATION_SERVICE.list(&req, query.into_inner()).await
}

pub async fn update_observation(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateObservationRequest>,
) -> ActixResult<HttpResponse> {
    OBSERVATION_SERVICE.update(&req, id.0, body.into_inner()).await
}

pub async fn delete_observation(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    OBSERVATION_SERVICE.delete(&req, id.0).await
}

pub fn configure_observation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/observations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_observations)).route(
                    web::post()
                        .to(create_observation)
                        .wrap(RequireCapability::new(Capability::WriteObservations)),
                ),
            )
            // 作者校验在服务层
            .service(
                web::resource("/{id}")
                    .route(web::put().to(update_observation))
                    .route(web::delete().to(delete_observation)),
            ),
    );
}
