pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherQueryParams, UpdateTeacherRequest,
};

super::lazy_service!(TeacherService);

impl TeacherService {
    pub async fn list_teachers(
        &self,
        request: &HttpRequest,
        query: TeacherQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, request, query).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        body: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, request, body).await
    }

    pub async fn get_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_teacher(self, request, id).await
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, request, id, body).await
    }

    pub async fn delete_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, request, id).await
    }
}
