//! 名册过滤
//!
//! 查询串转小写后，只要是记录任一检索字段（同样转小写）的子串即保留该记录。
//! 空查询保留全部；保留记录的相对顺序不变。查询串不做 trim。

/// 可被名册过滤的记录
pub trait RosterRecord {
    /// 参与匹配的字段，缺省字段不返回
    fn search_fields(&self) -> Vec<&str>;
}

pub fn matches<T: RosterRecord + ?Sized>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// 稳定过滤，不重新排序
pub fn filter_roster<T: RosterRecord>(records: Vec<T>, query: &str) -> Vec<T> {
    if query.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches(record, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        email: &'static str,
        class: Option<&'static str>,
    }

    impl RosterRecord for Row {
        fn search_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.name, self.email];
            fields.extend(self.class);
            fields
        }
    }

    fn roster() -> Vec<Row> {
        vec![
            Row {
                name: "Ana Souza",
                email: "ana@school.test",
                class: Some("9A"),
            },
            Row {
                name: "Bruno Lima",
                email: "bruno@school.test",
                class: Some("8B"),
            },
            Row {
                name: "Carla Dias",
                email: "carla@school.test",
                class: None,
            },
            Row {
                name: "Diego ANA",
                email: "diego@school.test",
                class: Some("9a"),
            },
        ]
    }

    #[test]
    fn empty_query_keeps_everything() {
        assert_eq!(filter_roster(roster(), ""), roster());
    }

    #[test]
    fn case_insensitive_substring_on_any_field() {
        let names: Vec<_> = filter_roster(roster(), "ANA")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ana Souza", "Diego ANA"]);

        let names: Vec<_> = filter_roster(roster(), "9a")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ana Souza", "Diego ANA"]);
    }

    #[test]
    fn result_is_order_preserving_subset_with_exact_partition() {
        let all = roster();
        for query in ["a", "school", "b", "zz", "LIMA", "@"] {
            let kept = filter_roster(all.clone(), query);
            let mut cursor = 0;
            for row in &kept {
                let pos = all[cursor..]
                    .iter()
                    .position(|r| r == row)
                    .expect("kept row must come from the input in order");
                cursor += pos + 1;
                assert!(matches(row, query));
            }
            for row in all.iter().filter(|r| !kept.contains(r)) {
                assert!(!matches(row, query), "{query} should not match {row:?}");
            }
        }
    }

    #[test]
    fn missing_fields_never_match() {
        let kept = filter_roster(roster(), "8b");
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Bruno Lima");
    }

    #[test]
    fn whitespace_is_part_of_the_query() {
        assert!(filter_roster(roster(), " ana ").is_empty());
        assert_eq!(filter_roster(roster(), "a s").len(), 1);
    }
}
