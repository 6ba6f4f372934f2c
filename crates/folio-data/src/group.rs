//! Alphabetical grouping for index pages.

use std::cmp::Ordering;

use serde::Serialize;

/// Group key shared by titles starting with a digit (and empty titles).
pub const DIGIT_GROUP: &str = "#";

/// Items sharing a first-character key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group<T> {
    pub key: String,
    pub items: Vec<T>,
}

/// The group key for a title: its first character uppercased, or
/// [`DIGIT_GROUP`] when it starts with a digit or is empty.
pub fn group_key(title: &str) -> String {
    match title.chars().next() {
        None => DIGIT_GROUP.to_string(),
        Some(c) if c.is_numeric() => DIGIT_GROUP.to_string(),
        Some(c) => c.to_uppercase().collect(),
    }
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

/// Collation used to order group keys.
///
/// Symbols sort before digits, digits before letters. Letters compare
/// case-insensitively, with the exact string as a tie-breaker.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| -> Vec<(u8, String)> {
        s.chars()
            .map(|c| (char_class(c), c.to_lowercase().collect::<String>()))
            .collect()
    };
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

/// Group items by the first character of their title.
///
/// Groups come out sorted by [`compare_keys`]; within a group items keep
/// their input order.
pub fn group_by_initial<T, F>(items: impl IntoIterator<Item = T>, title: F) -> Vec<Group<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: Vec<Group<T>> = Vec::new();
    for item in items {
        let key = group_key(title(&item));
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.items.push(item),
            None => groups.push(Group {
                key,
                items: vec![item],
            }),
        }
    }
    // Stable sort keeps per-group item order untouched.
    groups.sort_by(|a, b| compare_keys(&a.key, &b.key));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<T>(groups: &[Group<T>]) -> Vec<&str> {
        groups.iter().map(|g| g.key.as_str()).collect()
    }

    #[test]
    fn test_group_by_initial_sorts_digit_group_first() {
        let titles = vec!["Zorro", "apple", "123 Token", "Banana"];
        let groups = group_by_initial(titles, |t| *t);
        assert_eq!(keys(&groups), vec!["#", "A", "B", "Z"]);
        assert_eq!(groups[0].items, vec!["123 Token"]);
        assert_eq!(groups[1].items, vec!["apple"]);
    }

    #[test]
    fn test_items_keep_fetch_order() {
        let titles = vec!["beta", "Alpha", "Bitcoin", "altcoin", "Block"];
        let groups = group_by_initial(titles, |t| *t);
        assert_eq!(keys(&groups), vec!["A", "B"]);
        assert_eq!(groups[0].items, vec!["Alpha", "altcoin"]);
        assert_eq!(groups[1].items, vec!["beta", "Bitcoin", "Block"]);
    }

    #[test]
    fn test_empty_title_lands_in_digit_group() {
        let groups = group_by_initial(vec!["", "9 lives"], |t| *t);
        assert_eq!(keys(&groups), vec!["#"]);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_symbols_before_digits_before_letters() {
        let groups = group_by_initial(vec!["a", "1", "$stable", "Ω"], |t| *t);
        assert_eq!(keys(&groups), vec!["#", "$", "A", "Ω"]);
        assert_eq!(compare_keys("$", "#"), Ordering::Greater);
        assert_eq!(compare_keys("1", "$"), Ordering::Greater);
        assert_eq!(compare_keys("a", "9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_keys_case_insensitive() {
        assert_eq!(compare_keys("a", "B"), Ordering::Less);
        assert_eq!(compare_keys("b", "A"), Ordering::Greater);
    }

    #[test]
    fn test_grouping_struct_items() {
        struct Term {
            title: String,
        }
        let terms = vec![
            Term { title: "Nonce".into() },
            Term { title: "nft".into() },
        ];
        let groups = group_by_initial(terms, |t| t.title.as_str());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "N");
    }
}
