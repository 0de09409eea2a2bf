use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Admin,   // 管理员
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    /// 解析角色标签；无法识别的标签返回 `None`，不视为错误
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "admin" | "administrator" => Some(UserRole::Admin),
            "teacher" => Some(UserRole::Teacher),
            "student" => Some(UserRole::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => Self::ADMIN,
            UserRole::Teacher => Self::TEACHER,
            UserRole::Student => Self::STUDENT,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 用户状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

/// 登录账号
///
/// `role` 保存原始角色标签，由 [`User::role`] 解析；未知标签的账号仍可登录，
/// 只是没有菜单和任何能力。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: String,
    pub status: UserStatus,
    pub avatar_url: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn role(&self) -> Option<UserRole> {
        UserRole::parse(&self.role)
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            avatar: self
                .avatar_url
                .clone()
                .unwrap_or_else(|| initials(&self.name)),
        }
    }
}

/// 会话身份（登录时生成，登出时销毁）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
}

/// 姓名首字母（最多两个，大写）
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("administrator"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("teacher"), Some(UserRole::Teacher));
        assert_eq!(UserRole::parse("student"), Some(UserRole::Student));
        assert_eq!(UserRole::parse("guardian"), None);
        assert_eq!(UserRole::parse("Admin"), None);
    }

    #[test]
    fn avatar_initials() {
        assert_eq!(initials("ana maria souza"), "AM");
        assert_eq!(initials("Bruno"), "B");
        assert_eq!(initials("  "), "");
        assert_eq!(initials("élodie ñúñez"), "ÉÑ");
    }

    #[test]
    fn password_hash_never_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            name: "Ana Souza".into(),
            email: "ana@school.test".into(),
            password_hash: "secret".into(),
            role: "teacher".into(),
            status: UserStatus::Active,
            avatar_url: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(user.identity().avatar, "AS");
    }
}
