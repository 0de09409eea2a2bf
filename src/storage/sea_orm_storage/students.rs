use super::{SeaOrmStorage, write_error};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolHubError};
use crate::models::{
    enrollments::EnrollmentStatus,
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentFilter, UpdateStudentRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生，提供 class_id 时在同一事务中写入入班记录
    pub async fn create_student_impl(
        &self,
        req: CreateStudentRequest,
        user_id: Option<i64>,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            user_id: Set(user_id),
            name: Set(req.name),
            email: Set(req.email),
            phone: Set(req.phone),
            registration_number: Set(req.registration_number),
            birth_date: Set(req.birth_date),
            address: Set(req.address),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let student = model
            .insert(&txn)
            .await
            .map_err(|e| write_error("创建学生失败", e))?;

        if let Some(class_id) = req.class_id {
            EnrollmentActiveModel {
                student_id: Set(student.id),
                class_id: Set(class_id),
                status: Set(EnrollmentStatus::Active.to_string()),
                enrolled_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| write_error("创建入班记录失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_student_by_id_impl(student.id)
            .await?
            .ok_or_else(|| SchoolHubError::not_found("学生创建后未找到"))
    }

    /// 通过 ID 获取学生（附带当前班级）
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let Some(model) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut classes = self.active_classes_for(&[model.id]).await?;
        let class = classes.remove(&model.id);
        Ok(Some(model.into_student(class)))
    }

    /// 通过登录账号获取学生
    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let Some(model) = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut classes = self.active_classes_for(&[model.id]).await?;
        let class = classes.remove(&model.id);
        Ok(Some(model.into_student(class)))
    }

    /// 学生名册，按姓名排序
    pub async fn list_students_impl(&self, filter: StudentFilter) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(class_id) = filter.class_id {
            let student_ids: Vec<i64> = Enrollments::find()
                .filter(EnrollmentColumn::ClassId.eq(class_id))
                .filter(EnrollmentColumn::Status.eq(EnrollmentStatus::Active.to_string()))
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolHubError::database_operation(format!("查询班级学生失败: {e}"))
                })?
                .into_iter()
                .map(|e| e.student_id)
                .collect();

            if student_ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(Column::Id.is_in(student_ids));
        }

        let models = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生列表失败: {e}")))?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut classes = self.active_classes_for(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let class = classes.remove(&m.id);
                m.into_student(class)
            })
            .collect())
    }

    /// 更新学生
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("查询学生失败: {e}")))?
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
        if let Some(registration_number) = update.registration_number {
            model.registration_number = Set(registration_number);
        }
        if let Some(birth_date) = update.birth_date {
            model.birth_date = Set(Some(birth_date));
        }
        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        model
            .update(&self.db)
            .await
            .map_err(|e| write_error("更新学生失败", e))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生（入班、成绩、考勤、评语级联删除）
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolHubError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
