use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页查询参数（名册先过滤后分页）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginatedResponse<T: TS> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 可选整数查询参数（`#[serde(flatten)]` 下查询参数均为字符串）
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(value)) => Ok(Some(value)),
        Some(Raw::Str(value)) if value.is_empty() => Ok(None),
        Some(Raw::Str(value)) => value
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid integer: {value}"))),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

impl PaginationQuery {
    /// 页码至少为 1，页大小限制在 1..=100
    pub fn normalized(&self) -> (i64, i64) {
        (self.page.max(1), self.size.clamp(1, 100))
    }
}

impl<T: TS> PaginatedResponse<T> {
    /// 对内存中已过滤的快照分页；超出末页时返回空页
    pub fn from_snapshot(items: Vec<T>, query: &PaginationQuery) -> Self {
        let (page, size) = query.normalized();
        let total = items.len() as i64;
        let total_pages = (total + size - 1) / size;
        // 超大页码不溢出，直接落到末页之后
        let skip = page.saturating_sub(1).saturating_mul(size);
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = usize::try_from(size).unwrap_or(usize::MAX);

        Self {
            items: items.into_iter().skip(skip).take(take).collect(),
            pagination: PaginationInfo {
                page,
                page_size: size,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_pagination() {
        let query = PaginationQuery { page: 2, size: 2 };
        let page = PaginatedResponse::from_snapshot(vec![1, 2, 3, 4, 5], &query);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 3);

        let beyond = PaginatedResponse::from_snapshot(vec![1, 2], &PaginationQuery { page: 9, size: 10 });
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.pagination.total_pages, 1);
    }

    #[test]
    fn huge_page_yields_empty_page() {
        let query = PaginationQuery {
            page: i64::MAX,
            size: 100,
        };
        let page = PaginatedResponse::from_snapshot(vec![1, 2, 3], &query);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.page, i64::MAX);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn page_and_size_accept_strings() {
        let query: PaginationQuery = serde_json::from_str(r#"{"page":"3","size":"25"}"#).unwrap();
        assert_eq!(query.normalized(), (3, 25));
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.normalized(), (1, 10));
    }
}
