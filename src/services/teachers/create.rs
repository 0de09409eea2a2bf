use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode, teachers::requests::CreateTeacherRequest, users::entities::UserRole,
};
use crate::services::accounts::{discard_login, provision_login};
use crate::services::{bad_request, error_response};
use crate::utils::validate::{validate_email, validate_person_name};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    mut body: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    body.name = body.name.trim().to_string();
    body.email = body.email.trim().to_lowercase();

    if let Err(msg) = validate_person_name(&body.name) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&body.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    let storage = service.get_storage(request);

    let login = match provision_login(
        &storage,
        &body.name,
        &body.email,
        body.password.as_deref(),
        UserRole::Teacher,
    )
    .await
    {
        Ok(login) => login,
        Err(resp) => return Ok(resp),
    };
    let user_id = login.as_ref().map(|u| u.id);

    match storage.create_teacher(body, user_id).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher created successfully",
            )))
        }
        Err(e) => {
            discard_login(&storage, login).await;
            Ok(error_response(&e, "Failed to create teacher"))
        }
    }
}
