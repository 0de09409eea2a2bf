//! 授课安排存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::classes::{Column as ClassColumn, Entity as Classes};
use crate::entity::from_timestamp;
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{Result, SchoolHubError};
use crate::models::assignments::{Assignment, AssignmentQuery};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::{HashMap, HashSet};

fn unique_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    ids.collect::<HashSet<_>>().into_iter().collect()
}

impl SeaOrmStorage {
    /// 创建授课安排
    pub async fn create_assignment_impl(
        &self,
        class_id: i64,
        subject_id: i64,
        teacher_id: i64,
        year: i32,
    ) -> Result<Assignment> {
        let model = ActiveModel {
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            teacher_id: Set(teacher_id),
            year: Set(year),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建授课安排失败", e))?;

        self.assemble_assignments(vec![result])
            .await?
            .pop()
            .ok_or_else(|| SchoolHubError::not_found("授课安排创建后未找到"))
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let Some(model) = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询授课安排失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.assemble_assignments(vec![model]).await?.pop())
    }

    pub async fn list_assignments_impl(&self, query: AssignmentQuery) -> Result<Vec<Assignment>> {
        let mut select = Assignments::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let models = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SchoolHubError::database_operation(format!("查询授课安排列表失败: {e}"))
            })?;

        self.assemble_assignments(models).await
    }

    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除授课安排失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量补全班级、学科、教师名称
    async fn assemble_assignments(&self, models: Vec<Model>) -> Result<Vec<Assignment>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let class_names: HashMap<i64, String> = Classes::find()
            .filter(ClassColumn::Id.is_in(unique_ids(models.iter().map(|m| m.class_id))))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询班级信息失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let subject_names: HashMap<i64, String> = Subjects::find()
            .filter(SubjectColumn::Id.is_in(unique_ids(models.iter().map(|m| m.subject_id))))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学科信息失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

        let teacher_names: HashMap<i64, String> = Teachers::find()
            .filter(TeacherColumn::Id.is_in(unique_ids(models.iter().map(|m| m.teacher_id))))
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询教师信息失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| Assignment {
                id: m.id,
                class_id: m.class_id,
                class_name: class_names.get(&m.class_id).cloned().unwrap_or_default(),
                subject_id: m.subject_id,
                subject_name: subject_names.get(&m.subject_id).cloned().unwrap_or_default(),
                teacher_id: m.teacher_id,
                teacher_name: teacher_names.get(&m.teacher_id).cloned().unwrap_or_default(),
                year: m.year,
                created_at: from_timestamp(m.created_at),
            })
            .collect())
    }
}
