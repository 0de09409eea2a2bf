use serde::Deserialize;
use ts_rs::TS;

use super::entities::StudentStatus;
use crate::models::common::PaginationQuery;

// 学生列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

// 创建学生请求
//
// 提供 password 时同时创建学生登录账号；提供 class_id 时同时创建入班记录。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub registration_number: String,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
    pub class_id: Option<i64>,
    #[ts(optional)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub registration_number: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
}

/// 学生名册范围（存储层）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// 只保留在该班级有效入班的学生
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
}
