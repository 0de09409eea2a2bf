use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::GradeService;
use super::entries::entries_from;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::Assignment,
    grades::requests::RecordGradeRequest,
};
use crate::services::{
    Actor, bad_request, enrolled_in_class, error_response, forbidden, not_found, resolve_actor,
};
use crate::storage::Storage;
use crate::utils::grade_calc;

pub async fn record_grade(
    service: &GradeService,
    request: &HttpRequest,
    body: RecordGradeRequest,
) -> ActixResult<HttpResponse> {
    // 输入边界校验，越界成绩不会进入存储
    if let Err(e) = grade_calc::validate_bimester(body.bimester) {
        return Ok(bad_request(ErrorCode::GradeBimesterInvalid, e.message()));
    }
    let score = match grade_calc::validate_period_score(body.score) {
        Ok(score) => score,
        Err(e) => return Ok(error_response(&e, "Invalid score")),
    };

    let storage = service.get_storage(request);
    let actor = match resolve_actor(&storage, request).await {
        Ok(actor) => actor,
        Err(resp) => return Ok(resp),
    };

    let assignment = match load_assignment_for(&storage, &actor, body.assignment_id).await {
        Ok(assignment) => assignment,
        Err(resp) => return Ok(resp),
    };

    match enrolled_in_class(&storage, body.student_id, assignment.class_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Student is not enrolled in the class of this assignment",
            ));
        }
        Err(resp) => return Ok(resp),
    }

    if let Err(e) = storage
        .upsert_grade(assignment.id, body.student_id, body.bimester, score)
        .await
    {
        return Ok(error_response(&e, "Failed to record grade"));
    }

    info!(
        "Grade recorded by user {}: assignment {}, student {}, bimester {}",
        actor.user().id,
        assignment.id,
        body.student_id,
        body.bimester
    );

    // 返回重新计算后的成绩条目
    match storage
        .list_period_scores(Some(assignment.id), Some(body.student_id))
        .await
    {
        Ok(scores) => {
            let entry = entries_from(std::slice::from_ref(&assignment), body.student_id, &scores)
                .pop();
            Ok(HttpResponse::Ok().json(ApiResponse::success(entry, "Grade recorded")))
        }
        Err(e) => Ok(error_response(&e, "Failed to reload grade entry")),
    }
}

/// 加载授课安排并校验录入权限：管理员任意，教师仅限本人授课
pub(crate) async fn load_assignment_for(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    assignment_id: i64,
) -> Result<Assignment, HttpResponse> {
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Err(not_found(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            ));
        }
        Err(e) => return Err(error_response(&e, "Failed to load assignment")),
    };

    match actor {
        Actor::Admin(_) => Ok(assignment),
        Actor::Teacher(_, teacher) if teacher.id == assignment.teacher_id => Ok(assignment),
        _ => Err(forbidden(
            ErrorCode::GradePermissionDenied,
            "You can only record grades for your own assignments",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest, web};

    async fn request_with_storage() -> (HttpRequest, Arc<dyn Storage>) {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::with_database_config(&DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                pool_size: 1,
                timeout: 5,
            })
            .await
            .unwrap(),
        );
        let req = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        (req, storage)
    }

    async fn error_code(resp: HttpResponse) -> i64 {
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["code"].as_i64().unwrap()
    }

    #[actix_web::test]
    async fn test_out_of_range_score_is_rejected_and_not_stored() {
        let (req, storage) = request_with_storage().await;
        let service = GradeService::new_lazy();

        for score in [11.0, -0.5] {
            let resp = record_grade(
                &service,
                &req,
                RecordGradeRequest {
                    assignment_id: 1,
                    student_id: 1,
                    bimester: 1,
                    score: Some(score),
                },
            )
            .await
            .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(error_code(resp).await, ErrorCode::GradeScoreOutOfRange as i64);
        }

        assert!(storage.list_period_scores(None, None).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_bimester_outside_one_to_four_is_rejected() {
        let (req, storage) = request_with_storage().await;
        let resp = record_grade(
            &GradeService::new_lazy(),
            &req,
            RecordGradeRequest {
                assignment_id: 1,
                student_id: 1,
                bimester: 5,
                score: Some(8.0),
            },
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(resp).await, ErrorCode::GradeBimesterInvalid as i64);
        assert!(storage.list_period_scores(None, None).await.unwrap().is_empty());
    }
}
