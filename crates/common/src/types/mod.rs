use std::collections::HashMap;

/// Caller-supplied filter and pagination parameters, keyed by name.
pub type Criteria = HashMap<String, String>;

/// Build a [`Criteria`] map from string pairs.
pub fn criteria<I, K, V>(pairs: I) -> Criteria
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_collects_pairs() {
        let c = criteria([("size", "10"), ("page", "2")]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.get("size").map(String::as_str), Some("10"));
    }

    #[test]
    fn later_keys_win() {
        let c = criteria([("name", "admin"), ("name", "viewer")]);
        assert_eq!(c.get("name").map(String::as_str), Some("viewer"));
    }
}
