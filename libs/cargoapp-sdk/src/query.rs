//! Query-string assembly for remote function calls.

use url::form_urlencoded;

/// Build a query string from optional parameters.
///
/// Pairs with a `None` or empty value (or an empty key) are dropped; the
/// remaining pairs are percent-encoded. Returns an empty string when nothing
/// survives, so the URL never carries a stray `?`.
pub fn build_query(params: &[(String, Option<String>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        let Some(value) = value else { continue };
        if key.is_empty() || value.is_empty() {
            continue;
        }
        serializer.append_pair(key, value);
        any = true;
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// Convenience for building the parameter list inline.
pub fn param(key: &str, value: impl Into<Option<String>>) -> (String, Option<String>) {
    (key.to_owned(), value.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_empty_values_are_dropped() {
        let q = build_query(&[
            param("page", "1".to_owned()),
            param("search", None),
            param("status", String::new()),
        ]);
        assert_eq!(q, "?page=1");
    }

    #[test]
    fn all_dropped_means_no_question_mark() {
        let q = build_query(&[param("search", None), param("status", String::new())]);
        assert_eq!(q, "");
    }

    #[test]
    fn values_are_percent_encoded() {
        let q = build_query(&[param("search", "año & carga".to_owned())]);
        assert_eq!(q, "?search=a%C3%B1o+%26+carga");
    }

    #[test]
    fn empty_keys_are_dropped() {
        let q = build_query(&[("".to_owned(), Some("x".to_owned()))]);
        assert_eq!(q, "");
    }
}
