pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn quoted_list_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    format!("['{}']", values.join("', '"))
}

#[cfg(test)]
mod tests {
    use super::{contains_ignore_case, quoted_list_or_dash};

    #[test]
    fn contains_ignore_case_folds_both_sides() {
        assert!(contains_ignore_case("In Progress", "PROG"));
        assert!(contains_ignore_case("open", "Open"));
        assert!(!contains_ignore_case("Done", "open"));
    }

    #[test]
    fn quoted_list_or_dash_formats_values() {
        assert_eq!(quoted_list_or_dash(&[]), "-");
        assert_eq!(
            quoted_list_or_dash(&["a".to_string(), "b".to_string()]),
            "['a', 'b']"
        );
    }
}
