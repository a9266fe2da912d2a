/// Value of the last `key` in decoded query pairs. Repeated GET parameters
/// resolve to their final occurrence.
pub fn last_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_last_value_wins() {
        let query = pairs(&[("variant", "o"), ("year", "2016"), ("variant", "t")]);
        assert_eq!(last_value(&query, "variant"), Some("t"));
        assert_eq!(last_value(&query, "year"), Some("2016"));
        assert_eq!(last_value(&query, "party"), None);
    }

    #[test]
    fn test_empty_value_is_kept() {
        let query = pairs(&[("party", "ANC"), ("party", "")]);
        assert_eq!(last_value(&query, "party"), Some(""));
    }
}
