use serde::Deserialize;
use ts_rs::TS;

use super::entities::{ClassStatus, Shift};
use crate::models::common::PaginationQuery;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub status: Option<ClassStatus>,
}

// 创建班级请求，year 缺省时使用配置中的当前学年
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct CreateClassRequest {
    pub name: String,
    pub grade_level: String,
    pub shift: Shift,
    pub year: Option<i32>,
    pub capacity: Option<i32>,
    pub classroom: Option<String>,
    pub status: Option<ClassStatus>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub grade_level: Option<String>,
    pub shift: Option<Shift>,
    pub year: Option<i32>,
    pub capacity: Option<i32>,
    pub classroom: Option<String>,
    pub status: Option<ClassStatus>,
    pub teacher_id: Option<i64>,
}

/// 班级名册范围（存储层）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassScope {
    All,
    /// 教师任班主任或有授课安排的班级
    TaughtBy(i64),
    /// 学生有效入班的班级
    EnrolledStudent(i64),
}
