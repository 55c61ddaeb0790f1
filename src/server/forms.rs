//! Decoding of urlencoded form submissions.
//!
//! Bodies are decoded into a multi-value map, so a field arrives as a list
//! whether the client sent zero, one bare, or many values. Extracting typed
//! structs directly would lose the repeated-key fields (genre, platform) and
//! the raw values a re-rendered form has to echo back.

use std::collections::HashMap;

use url::form_urlencoded;

#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in form_urlencoded::parse(body) {
            fields
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self { fields }
    }

    /// First submitted value for a single-valued field.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every submitted value for a multi-valued field.
    pub fn values(&self, key: &str) -> &[String] {
        self.fields.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_accumulate() {
        let form = FormData::parse(b"genre=a&genre=b&name=Foo");
        assert_eq!(form.values("genre"), ["a", "b"]);
        assert_eq!(form.value("name"), Some("Foo"));
    }

    #[test]
    fn single_bare_value_is_a_one_element_list() {
        let form = FormData::parse(b"genre=a");
        assert_eq!(form.values("genre"), ["a"]);
    }

    #[test]
    fn missing_keys_are_empty() {
        let form = FormData::parse(b"name=Foo");
        assert!(form.values("genre").is_empty());
        assert_eq!(form.value("genre"), None);
    }

    #[test]
    fn percent_encoding_is_decoded() {
        let form = FormData::parse(b"name=Dark+Souls&description=good%20%26%20hard");
        assert_eq!(form.value("name"), Some("Dark Souls"));
        assert_eq!(form.value("description"), Some("good & hard"));
    }
}
