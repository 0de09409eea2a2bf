use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireCapability};
use crate::models::{
    students::requests::{CreateStudentRequest, StudentQueryParams, UpdateStudentRequest},
    users::capabilities::Capability,
};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, id.0).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 管理员查看全部，教师查看任教班级的学生
                    .route(web::get().to(list_students).wrap(RequireCapability::any(&[
                        Capability::ManageStudents,
                        Capability::RecordGrades,
                    ])))
                    .route(
                        web::post()
                            .to(create_student)
                            .wrap(RequireCapability::new(Capability::ManageStudents)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 详情权限在服务层判断（学生可查看自己）
                    .route(web::get().to(get_student))
                    .route(
                        web::put()
                            .to(update_student)
                            .wrap(RequireCapability::new(Capability::ManageStudents)),
                    )
                    .route(
                        web::delete()
                            .to(delete_student)
                            .wrap(RequireCapability::new(Capability::ManageStudents)),
                    ),
            ),
    );
}
