//! 评语存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::observations::{ActiveModel, Column, Entity as Observations, Model};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{Result, SchoolHubError};
use crate::models::observations::{CreateObservationRequest, Observation, ObservationQuery};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;

impl SeaOrmStorage {
    pub async fn create_observation_impl(
        &self,
        teacher_id: i64,
        req: CreateObservationRequest,
    ) -> Result<Observation> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            class_id: Set(req.class_id),
            teacher_id: Set(teacher_id),
            content: Set(req.content),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建评语失败", e))?;

        self.with_teacher_names(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::not_found("评语创建后未找到"))
    }

    pub async fn get_observation_by_id_impl(&self, id: i64) -> Result<Option<Observation>> {
        let Some(model) = Observations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询评语失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.with_teacher_names(vec![model]).await?.pop())
    }

    /// 列出评语，最新的在前
    pub async fn list_observations_impl(&self, query: ObservationQuery) -> Result<Vec<Observation>> {
        let mut select = Observations::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        let models = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询评语列表失败: {e}")))?;

        self.with_teacher_names(models).await
    }

    pub async fn update_observation_impl(
        &self,
        id: i64,
        content: String,
    ) -> Result<Option<Observation>> {
        let Some(existing) = Observations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询评语失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.content = Set(content);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新评语失败", e))?;

        Ok(self.with_teacher_names(vec![result]).await?.pop())
    }

    pub async fn delete_observation_impl(&self, id: i64) -> Result<bool> {
        let result = Observations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除评语失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn with_teacher_names(&self, models: Vec<Model>) -> Result<Vec<Observation>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let names: HashMap<i64, String> = Teachers::find()
            .filter(TeacherColumn::Id.is_in(models.iter().map(|m| m.teacher_id)))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师信息失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let teacher_name = names.get(&m.teacher_id).cloned().unwrap_or_default();
                m.into_observation(teacher_name)
            })
            .collect())
    }
}
