use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 学号：字母数字与连字符，4~32 位
static REGISTRATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]{4,32}$").expect("Invalid registration regex"));

/// 学科代码：大写字母数字，2~16 位
static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{2,16}$").expect("Invalid subject code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_person_name(name: &str) -> Result<(), &'static str> {
    let len = name.trim().chars().count();
    if len == 0 {
        return Err("Name must not be empty");
    }
    if len > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_registration_number(value: &str) -> Result<(), &'static str> {
    if !REGISTRATION_RE.is_match(value) {
        return Err("Registration number must be 4-32 letters, digits or hyphens");
    }
    Ok(())
}

pub fn validate_subject_code(code: &str) -> Result<(), &'static str> {
    if !SUBJECT_CODE_RE.is_match(code) {
        return Err("Subject code must be 2-16 uppercase letters or digits");
    }
    Ok(())
}

/// 日期必须是 `YYYY-MM-DD`
pub fn validate_date(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| "Date must be in YYYY-MM-DD format")
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 密码策略：至少 8 位，包含大写、小写和数字，且不在常见弱密码列表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    const WEAK_PASSWORDS: [&str; 7] = [
        "password1",
        "12345678",
        "qwerty123",
        "admin123",
        "abcd1234",
        "school123",
        "escola123",
    ];
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ana@school.test").is_ok());
        assert!(validate_email("ana.souza+1@escola.com.br").is_ok());
        assert!(validate_email("ana@school").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_date() {
        assert!(validate_date("2025-03-14").is_ok());
        assert!(validate_date("2025-02-30").is_err());
        assert!(validate_date("14/03/2025").is_err());
    }

    #[test]
    fn test_registration_and_code() {
        assert!(validate_registration_number("2025-0001").is_ok());
        assert!(validate_registration_number("a1").is_err());
        assert!(validate_subject_code("MAT01").is_ok());
        assert!(validate_subject_code("mat").is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("Ana Souza").is_ok());
        assert!(validate_person_name("   ").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("Professora2025").is_valid);
    }

    #[test]
    fn test_password_rules() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("School123");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
