use serde::{Deserialize, Serialize};

/// A single HAL link object
///
/// Only `href` is required; every other field is left out of the serialized
/// form when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URI, possibly a URI template
    pub href: String,

    /// Whether `href` is a URI template
    #[serde(default, skip_serializing_if = "is_false")]
    pub templated: bool,

    /// Media type hint for the target resource
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,

    /// URL describing why the link is deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,

    /// Secondary key for selecting among links with the same relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Profile of the target resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Language of the target resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Link {
    /// Creates a link, marking it templated when `href` contains an expression
    ///
    /// ```
    /// use hal_navigator::Link;
    ///
    /// assert!(!Link::new("/a/b/c").templated);
    /// assert!(Link::new("/a/b/{c}").templated);
    /// ```
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            templated: href.contains('{'),
            href,
            ..Self::default()
        }
    }

    pub fn with_templated(mut self, templated: bool) -> Self {
        self.templated = templated;
        self
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.deprecation = Some(deprecation.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }
}
