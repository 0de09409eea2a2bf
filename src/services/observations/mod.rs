pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    observations::{
        CreateObservationRequest, Observation, ObservationQuery, UpdateObservationRequest,
    },
};
use crate::services::{Actor, error_response, forbidden, not_found};
use crate::storage::Storage;

super::lazy_service!(ObservationService);

/// 评语正文上限（字符）
pub(crate) const MAX_CONTENT_CHARS: usize = 2000;

impl ObservationService {
    pub async fn create(
        &self,
        request: &HttpRequest,
        body: CreateObservationRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_observation(self, request, body).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: ObservationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_observations(self, request, query).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateObservationRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_observation(self, request, id, body).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_observation(self, request, id).await
    }
}

/// 校验评语正文，返回去除首尾空白后的内容
pub(crate) fn validate_content(content: &str) -> Result<String, &'static str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err("Observation content cannot be empty");
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err("Observation content is too long");
    }
    Ok(trimmed.to_string())
}

/// 加载评语并确认调用者是作者（管理员可删除任意评语）
pub(crate) async fn load_own_observation(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    id: i64,
    admin_allowed: bool,
) -> Result<Observation, HttpResponse> {
    let observation = match storage.get_observation_by_id(id).await {
        Ok(Some(o)) => o,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::ObservationNotFound,
                "Observation not found",
            ));
        }
        Err(e) => return Err(error_response(&e, "Failed to load observation")),
    };

    match actor {
        Actor::Admin(_) if admin_allowed => Ok(observation),
        Actor::Teacher(_, teacher) if teacher.id == observation.teacher_id => Ok(observation),
        _ => Err(forbidden(
            ErrorCode::ObservationPermissionDenied,
            "Only the author can change this observation",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_trimmed_and_bounded() {
        assert_eq!(validate_content("  Participates well. ").unwrap(), "Participates well.");
        assert!(validate_content("   ").is_err());
        assert!(validate_content(&"a".repeat(MAX_CONTENT_CHARS + 1)).is_err());
        assert!(validate_content(&"a".repeat(MAX_CONTENT_CHARS)).is_ok());
    }
}
