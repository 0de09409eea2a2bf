/*!
 * 基于能力表的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。角色标签未识别的账号没有任何能力。
 *
 * ```rust,ignore
 * web::scope("/api/v1/teachers")
 *     .wrap(RequireCapability::new(Capability::ManageTeachers))
 *     .wrap(RequireJWT)
 * ```
 *
 * 任一能力即可：
 *
 * ```rust,ignore
 * .wrap(RequireCapability::any(&[Capability::RecordGrades, Capability::ViewOwnGrades]))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::{capabilities::Capability, entities},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireCapability {
    accepted: Vec<Capability>,
}

impl RequireCapability {
    pub fn new(capability: Capability) -> Self {
        Self {
            accepted: vec![capability],
        }
    }

    /// 具备其中任一能力即可
    pub fn any(capabilities: &[Capability]) -> Self {
        Self {
            accepted: capabilities.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCapability
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCapabilityMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCapabilityMiddleware {
            service: Rc::new(service),
            accepted: self.accepted.clone(),
        }))
    }
}

pub struct RequireCapabilityMiddleware<S> {
    service: Rc<S>,
    accepted: Vec<Capability>,
}

impl<S, B> Service<ServiceRequest> for RequireCapabilityMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let accepted = self.accepted.clone();

        Box::pin(async move {
            let user = req.extensions().get::<entities::User>().cloned();

            let Some(user) = user else {
                info!(
                    "Capability check failed: no user in request. Make sure RequireJWT middleware is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let allowed = user
                .role()
                .is_some_and(|role| accepted.iter().any(|c| role.can(*c)));

            if allowed {
                let res = srv.call(req).await?.map_into_left_body();
                Ok(res)
            } else {
                info!(
                    "Access denied for user {} (role: {}). Required any of: {:?}",
                    user.id, user.role, accepted
                );
                Ok(req.into_response(
                    create_error_response(
                        StatusCode::FORBIDDEN,
                        ErrorCode::Forbidden,
                        "Access denied.",
                    )
                    .map_into_right_body(),
                ))
            }
        })
    }
}
