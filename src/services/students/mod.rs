pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::{
    entities::Student,
    requests::{CreateStudentRequest, StudentQueryParams, UpdateStudentRequest},
};
use crate::services::{Actor, teaches_class};
use crate::storage::Storage;

super::lazy_service!(StudentService);

impl StudentService {
    // 获取学生名册
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, body).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_student(self, request, id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, body).await
    }

    // 删除学生及其登录账号
    pub async fn delete_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, id).await
    }
}

/// 管理员、任教该生所在班级的教师、学生本人可查看
pub(crate) async fn can_view_student(
    storage: &Arc<dyn Storage>,
    actor: &Actor,
    student: &Student,
) -> Result<bool, HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(true),
        Actor::Teacher(_, teacher) => match student.class_id {
            Some(class_id) => teaches_class(storage, teacher.id, class_id).await,
            None => Ok(false),
        },
        Actor::Student(_, own) => Ok(own.id == student.id),
        Actor::Unrecognized(_) => Ok(false),
    }
}
