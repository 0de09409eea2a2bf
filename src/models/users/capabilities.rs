//! 角色能力表
//!
//! 菜单、访问控制中间件和各服务都从这张表判断角色可见性。

use serde::Serialize;
use ts_rs::TS;

use super::entities::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum Capability {
    ManageStudents,
    ManageTeachers,
    ManageClasses,
    ManageSubjects,
    ManageAssignments,
    ManageEnrollments,
    ViewReports,
    ViewAllReportCards,
    ViewOwnClasses,
    RecordGrades,
    RecordAttendance,
    WriteObservations,
    ViewOwnGrades,
    ViewOwnReportCard,
    ViewOwnAttendance,
}

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ManageStudents,
    Capability::ManageTeachers,
    Capability::ManageClasses,
    Capability::ManageSubjects,
    Capability::ManageAssignments,
    Capability::ManageEnrollments,
    Capability::ViewReports,
    Capability::ViewAllReportCards,
    Capability::RecordGrades,
    Capability::RecordAttendance,
];

const TEACHER_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnClasses,
    Capability::RecordGrades,
    Capability::RecordAttendance,
    Capability::WriteObservations,
    Capability::ViewAllReportCards,
];

const STUDENT_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnClasses,
    Capability::ViewOwnGrades,
    Capability::ViewOwnReportCard,
    Capability::ViewOwnAttendance,
];

impl UserRole {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            UserRole::Admin => ADMIN_CAPABILITIES,
            UserRole::Teacher => TEACHER_CAPABILITIES,
            UserRole::Student => STUDENT_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// 按原始角色标签判断能力，未知角色没有任何能力
pub fn tag_can(role_tag: &str, capability: Capability) -> bool {
    UserRole::parse(role_tag).is_some_and(|role| role.can(capability))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_manages_rosters_but_keeps_no_notes() {
        assert!(UserRole::Admin.can(Capability::ManageStudents));
        assert!(UserRole::Admin.can(Capability::ViewReports));
        assert!(!UserRole::Admin.can(Capability::WriteObservations));
    }

    #[test]
    fn teacher_records_but_does_not_manage() {
        assert!(UserRole::Teacher.can(Capability::RecordGrades));
        assert!(UserRole::Teacher.can(Capability::RecordAttendance));
        assert!(!UserRole::Teacher.can(Capability::ManageClasses));
        assert!(!UserRole::Teacher.can(Capability::ViewOwnGrades));
    }

    #[test]
    fn student_is_read_only() {
        for capability in UserRole::Student.capabilities() {
            assert!(!matches!(
                capability,
                Capability::RecordGrades | Capability::RecordAttendance
            ));
        }
        assert!(UserRole::Student.can(Capability::ViewOwnReportCard));
    }

    #[test]
    fn unknown_tag_has_no_capabilities() {
        assert!(!tag_can("guardian", Capability::ViewOwnGrades));
        assert!(tag_can("administrator", Capability::ManageTeachers));
    }
}
