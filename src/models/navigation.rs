//! 按角色解析导航菜单

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct MenuResponse {
    pub role: String,
    pub items: Vec<MenuItem>,
}

const ADMIN_MENU: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("Students", "/students"),
    ("Teachers", "/teachers"),
    ("Classes", "/classes"),
    ("Reports", "/reports"),
];

const TEACHER_MENU: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("My Classes", "/classes"),
    ("Grade Entry", "/grades"),
    ("Attendance", "/attendance"),
];

const STUDENT_MENU: &[(&str, &str)] = &[
    ("Dashboard", "/"),
    ("My Grades", "/grades"),
    ("Report Card", "/report-card"),
    ("Attendance", "/attendance"),
];

/// 角色标签 → 有序菜单；未知角色得到空菜单
pub fn resolve_menu(role_tag: &str) -> Vec<MenuItem> {
    let entries = match UserRole::parse(role_tag) {
        Some(UserRole::Admin) => ADMIN_MENU,
        Some(UserRole::Teacher) => TEACHER_MENU,
        Some(UserRole::Student) => STUDENT_MENU,
        None => &[],
    };

    entries
        .iter()
        .map(|(label, path)| MenuItem {
            label: (*label).to_string(),
            path: (*path).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(role: &str) -> Vec<String> {
        resolve_menu(role).into_iter().map(|item| item.path).collect()
    }

    #[test]
    fn admin_menu() {
        assert_eq!(
            paths("admin"),
            vec!["/", "/students", "/teachers", "/classes", "/reports"]
        );
        assert_eq!(resolve_menu("administrator"), resolve_menu("admin"));
    }

    #[test]
    fn teacher_and_student_menus() {
        assert_eq!(
            paths("teacher"),
            vec!["/", "/classes", "/grades", "/attendance"]
        );
        let student = resolve_menu("student");
        assert_eq!(student[2].label, "Report Card");
        assert_eq!(student.len(), 4);
    }

    #[test]
    fn unrecognized_role_gets_empty_menu() {
        assert!(resolve_menu("guardian").is_empty());
        assert!(resolve_menu("").is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        assert_eq!(resolve_menu("teacher"), resolve_menu("teacher"));
    }
}
