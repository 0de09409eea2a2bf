use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode, students::requests::CreateStudentRequest, users::entities::UserRole,
};
use crate::services::accounts::{discard_login, provision_login};
use crate::services::{bad_request, error_response, not_found};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_person_name, validate_registration_number};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    body.name = body.name.trim().to_string();
    body.email = body.email.trim().to_lowercase();
    body.registration_number = body.registration_number.trim().to_string();

    if let Err(resp) = validate_student(&body) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    if let Some(class_id) = body.class_id
        && let Err(resp) = ensure_class_has_room(&storage, class_id).await
    {
        return Ok(resp);
    }

    let login = match provision_login(
        &storage,
        &body.name,
        &body.email,
        body.password.as_deref(),
        UserRole::Student,
    )
    .await
    {
        Ok(login) => login,
        Err(resp) => return Ok(resp),
    };
    let user_id = login.as_ref().map(|u| u.id);

    match storage.create_student(body, user_id).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.id, student.registration_number);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => {
            discard_login(&storage, login).await;
            Ok(error_response(&e, "Failed to create student"))
        }
    }
}

fn validate_student(body: &CreateStudentRequest) -> Result<(), HttpResponse> {
    if let Err(msg) = validate_person_name(&body.name) {
        return Err(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&body.email) {
        return Err(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_registration_number(&body.registration_number) {
        return Err(bad_request(ErrorCode::BadRequest, msg));
    }
    Ok(())
}

/// 班级必须存在且未满
pub(crate) async fn ensure_class_has_room(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) if class.is_full() => Err(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassFull, "Class has reached its capacity"),
        )),
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Err(error_response(&e, "Failed to load class")),
    }
}
