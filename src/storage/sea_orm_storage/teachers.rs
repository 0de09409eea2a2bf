use super::{SeaOrmStorage, write_error};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolHubError};
use crate::models::teachers::{
    entities::{Teacher, TeacherStatus},
    requests::{CreateTeacherRequest, UpdateTeacherRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(
        &self,
        req: CreateTeacherRequest,
        user_id: Option<i64>,
    ) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            user_id: Set(user_id),
            name: Set(req.name),
            email: Set(req.email),
            phone: Set(req.phone),
            specialization: Set(req.specialization),
            status: Set(req.status.unwrap_or(TeacherStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建教师失败", e))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过登录账号获取教师
    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 教师列表，按姓名排序
    pub async fn list_teachers_impl(&self, status: Option<TeacherStatus>) -> Result<Vec<Teacher>> {
        let mut select = Teachers::find();

        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let models = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 更新教师
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(specialization) = update.specialization {
            model.specialization = Set(Some(specialization));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新教师失败", e))?;

        Ok(Some(result.into_teacher()))
    }

    /// 删除教师（授课安排级联删除，班主任置空）
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
