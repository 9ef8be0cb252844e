//! A single validated hyperlink.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ArgumentError;

/// A hyperlink as it appears inside a `_links` relation.
///
/// `href` is never empty. `templated` is derived from `href` at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkObject {
    name: String,
    href: String,
    method: String,
    templated: bool,
    title: Option<String>,
    media_type: Option<String>,
    hreflang: Option<String>,
    profile: Option<String>,
    deprecation: Option<String>,
}

impl LinkObject {
    /// Create a link targeting `href`, reached with the HTTP `method`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyHref`] if `href` is empty.
    pub fn new(href: impl Into<String>, method: impl Into<String>) -> Result<Self, ArgumentError> {
        let href = href.into();
        if href.is_empty() {
            return Err(ArgumentError::EmptyHref);
        }

        Ok(Self {
            name: String::new(),
            templated: is_templated(&href),
            href,
            method: method.into(),
            title: None,
            media_type: None,
            hreflang: None,
            profile: None,
            deprecation: None,
        })
    }

    /// Create a named CURIE link. The href usually carries a `{rel}` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyLinkName`] if `name` is empty and
    /// [`ArgumentError::EmptyHref`] if `href` is empty.
    pub fn curie(
        name: impl Into<String>,
        href: impl Into<String>,
        method: impl Into<String>,
    ) -> Result<Self, ArgumentError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArgumentError::EmptyLinkName);
        }

        let mut link = Self::new(href, method)?;
        link.name = name;
        Ok(link)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Whether `href` contains a `{...}` placeholder.
    #[must_use]
    pub fn templated(&self) -> bool {
        self.templated
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    #[must_use]
    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    #[must_use]
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Hint for the media type of the target, emitted as `type`.
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    #[must_use]
    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Mark the link as deprecated; the URL should explain the deprecation.
    #[must_use]
    pub fn with_deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.deprecation = Some(deprecation.into());
        self
    }

    /// Flattened form of the link as emitted under `_links`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();

        if !self.name.is_empty() {
            map.insert("name".to_string(), Value::from(self.name.as_str()));
        }
        map.insert("href".to_string(), Value::from(self.href.as_str()));
        if !self.method.is_empty() {
            map.insert("method".to_string(), Value::from(self.method.as_str()));
        }
        map.insert("templated".to_string(), Value::Bool(self.templated));

        let optional = [
            ("title", &self.title),
            ("type", &self.media_type),
            ("hreflang", &self.hreflang),
            ("profile", &self.profile),
            ("deprecation", &self.deprecation),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::from(value.as_str()));
            }
        }

        Value::Object(map)
    }
}

impl Serialize for LinkObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// An href is templated when a `{` is later closed by a `}`.
fn is_templated(href: &str) -> bool {
    href.find('{')
        .is_some_and(|open| href[open + 1..].contains('}'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_link_keeps_href_and_method() {
        let link = LinkObject::new("http://api/", "GET").unwrap();
        assert_eq!(link.href(), "http://api/");
        assert_eq!(link.method(), "GET");
        assert_eq!(link.name(), "");
        assert!(!link.templated());
    }

    #[test]
    fn new_link_rejects_empty_href() {
        let err = LinkObject::new("", "GET").unwrap_err();
        assert_eq!(err, ArgumentError::EmptyHref);
    }

    #[test]
    fn curie_link_is_named_and_templated() {
        let link = LinkObject::curie("link", "http://{rel}", "GET").unwrap();
        assert_eq!(link.name(), "link");
        assert_eq!(link.href(), "http://{rel}");
        assert_eq!(link.method(), "GET");
        assert!(link.templated());
    }

    #[test]
    fn curie_link_rejects_empty_name_or_href() {
        assert_eq!(
            LinkObject::curie("", "http://{rel}", "GET").unwrap_err(),
            ArgumentError::EmptyLinkName
        );
        assert_eq!(
            LinkObject::curie("link", "", "GET").unwrap_err(),
            ArgumentError::EmptyHref
        );
    }

    #[test]
    fn template_detection_requires_closed_braces() {
        assert!(is_templated("http://x/{id}"));
        assert!(is_templated("{a}"));
        assert!(!is_templated("http://x"));
        assert!(!is_templated("http://x/{id"));
        assert!(!is_templated("http://x/}{"));
    }

    #[test]
    fn to_value_omits_empty_name_method_and_unset_attributes() {
        let link = LinkObject::new("http://api/", "").unwrap();
        let value = link.to_value();
        assert_eq!(
            value,
            serde_json::json!({"href": "http://api/", "templated": false})
        );
    }

    #[test]
    fn to_value_includes_optional_attributes() {
        let link = LinkObject::new("http://api/orders", "GET")
            .unwrap()
            .with_title("Orders")
            .with_media_type("application/hal+json")
            .with_hreflang("en")
            .with_profile("http://profiles/order")
            .with_deprecation("http://docs/deprecations/orders");

        let value = link.to_value();
        assert_eq!(value["title"], "Orders");
        assert_eq!(value["type"], "application/hal+json");
        assert_eq!(value["hreflang"], "en");
        assert_eq!(value["profile"], "http://profiles/order");
        assert_eq!(value["deprecation"], "http://docs/deprecations/orders");
    }

    #[test]
    fn serializes_as_flattened_value() {
        let link = LinkObject::curie("doc", "http://docs/{rel}", "GET").unwrap();
        let json = serde_json::to_value(&link).expect("serialize");
        assert_eq!(json, link.to_value());
        assert_eq!(json["templated"], true);
    }

    proptest! {
        #[test]
        fn any_non_empty_href_builds(href in ".+", method in "[A-Z]{1,7}") {
            let link = LinkObject::new(href.clone(), method.clone()).unwrap();
            prop_assert_eq!(link.href(), href.as_str());
            prop_assert_eq!(link.method(), method.as_str());
        }

        #[test]
        fn placeholder_marks_link_templated(
            prefix in "[a-z:/.]{0,12}",
            var in "[a-z]{1,8}",
            suffix in "[a-z/]{0,8}",
        ) {
            let href = format!("{prefix}{{{var}}}{suffix}");
            prop_assert!(LinkObject::new(href, "GET").unwrap().templated());
        }

        #[test]
        fn brace_free_href_is_not_templated(href in "[a-z:/.?=&]{1,32}") {
            prop_assert!(!LinkObject::new(href, "GET").unwrap().templated());
        }
    }
}
