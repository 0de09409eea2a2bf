pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ErrorCode,
    classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest},
};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

super::lazy_service!(ClassService);

impl ClassService {
    // 获取班级列表（按角色确定范围）
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        req: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, req, class_data).await
    }

    // 根据班级 ID 获取班级信息
    pub async fn get_class(&self, req: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, req, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, req, class_id, update_data).await
    }

    // 根据班级 ID 删除班级
    pub async fn delete_class(
        &self,
        req: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, req, class_id).await
    }
}

/// 班主任必须是已存在的教师
pub(crate) async fn ensure_teacher_exists(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Err(error_response(&e, "Failed to load teacher")),
    }
}

/// 容量必须为正数
pub(crate) fn validate_capacity(capacity: Option<i32>) -> Result<(), &'static str> {
    match capacity {
        Some(c) if c <= 0 => Err("Capacity must be a positive number"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_must_be_positive() {
        assert!(validate_capacity(None).is_ok());
        assert!(validate_capacity(Some(30)).is_ok());
        assert!(validate_capacity(Some(0)).is_err());
        assert!(validate_capacity(Some(-5)).is_err());
    }
}
