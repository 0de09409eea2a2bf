//! 班级实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub grade_level: String,
    pub shift: String,
    pub year: i32,
    pub capacity: Option<i32>,
    pub classroom: Option<String>,
    pub status: String,
    pub teacher_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "SetNull"
    )]
    Teacher,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(
        self,
        teacher_name: Option<String>,
        total_students: i64,
    ) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::{Class, ClassStatus, Shift};
        use super::from_timestamp;

        Class {
            id: self.id,
            name: self.name,
            grade_level: self.grade_level,
            shift: self.shift.parse::<Shift>().unwrap_or(Shift::Morning),
            year: self.year,
            capacity: self.capacity,
            classroom: self.classroom,
            status: self
                .status
                .parse::<ClassStatus>()
                .unwrap_or(ClassStatus::Active),
            teacher_id: self.teacher_id,
            teacher_name,
            total_students,
            created_at: from_timestamp(self.created_at),
            updated_at: from_timestamp(self.updated_at),
        }
    }
}
