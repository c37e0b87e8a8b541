use serde_json::Value;

/// Query predicate for [`fetch_all`](crate::Gateway::fetch_all): at most one
/// equality test and one case-insensitive substring test, AND-combined when
/// both are present. This is the whole query language the backend contract
/// offers — no joins, no sorting, no aggregation.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    eq: Option<(String, String)>,
    contains: Option<(String, String)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value` exactly.
    pub fn eq(mut self, field: &str, value: &str) -> Self {
        self.eq = Some((field.to_string(), value.to_string()));
        self
    }

    /// Require `field` to contain `needle`, ignoring case.
    pub fn contains(mut self, field: &str, needle: &str) -> Self {
        self.contains = Some((field.to_string(), needle.to_string()));
        self
    }

    pub fn eq_predicate(&self) -> Option<(&str, &str)> {
        self.eq.as_ref().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn contains_predicate(&self) -> Option<(&str, &str)> {
        self.contains.as_ref().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.eq.is_none() && self.contains.is_none()
    }

    /// Evaluate the predicate against one record. Non-string fields are
    /// compared through their JSON string form; a missing field never matches.
    pub fn matches(&self, record: &Value) -> bool {
        if let Some((field, want)) = self.eq_predicate() {
            match field_text(record, field) {
                Some(have) if have == want => {}
                _ => return false,
            }
        }
        if let Some((field, needle)) = self.contains_predicate() {
            match field_text(record, field) {
                Some(have) if have.to_lowercase().contains(&needle.to_lowercase()) => {}
                _ => return false,
            }
        }
        true
    }
}

fn field_text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({"title": "Bike"})));
        assert!(Filter::new().is_empty());
    }

    #[test]
    fn equality_is_exact() {
        let filter = Filter::new().eq("category", "Vehicles");
        assert!(filter.matches(&json!({"category": "Vehicles"})));
        assert!(!filter.matches(&json!({"category": "vehicles"})));
        assert!(!filter.matches(&json!({"title": "Vehicles"})));
    }

    #[test]
    fn substring_ignores_case() {
        let filter = Filter::new().contains("title", "bIkE");
        assert!(filter.matches(&json!({"title": "Mountain Bike, barely used"})));
        assert!(!filter.matches(&json!({"title": "Canoe"})));
    }

    #[test]
    fn both_predicates_combine_with_and() {
        let filter = Filter::new().eq("category", "Vehicles").contains("title", "bike");
        assert!(filter.matches(&json!({"category": "Vehicles", "title": "Road bike"})));
        assert!(!filter.matches(&json!({"category": "Vehicles", "title": "Canoe"})));
        assert!(!filter.matches(&json!({"category": "Apparel", "title": "Bike jersey"})));
    }

    #[test]
    fn numeric_fields_compare_through_string_form() {
        let filter = Filter::new().eq("id", "42");
        assert!(filter.matches(&json!({"id": 42})));
        assert!(filter.matches(&json!({"id": "42"})));
        assert!(!filter.matches(&json!({"id": 421})));
    }
}
