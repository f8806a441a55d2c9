//! Value classification and static tag construction.

use std::sync::LazyLock;

use regex::Regex;

/// Absolute URL with an `http`, `https` or `ftp` scheme and a dotted host,
/// anchored at the start of the value.
static ABSOLUTE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:http|ftp|https)://[\w_\-]+(?:\.[\w_\-]+)+(?:[\w.,@?^=%\&:/\~+\#\-]*[\w@?^=%\&/\~+\#\-])?",
    )
    .unwrap()
});

/// Placeholder reference left in templates for links without a target.
const PLACEHOLDER: &str = "#";

/// What a located attribute value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Absolute URL pointing outside the site. Left untouched.
    External,
    /// The `#` placeholder. Left untouched.
    Placeholder,
    /// Path to a local asset. Rewritten to a static tag.
    Local,
}

impl ValueKind {
    /// Whether values of this kind are rewritten.
    #[must_use]
    pub fn is_rewritten(self) -> bool {
        self == Self::Local
    }
}

/// Classify a located attribute value.
///
/// Only the start of the value is checked for an absolute URL, so
/// `https://example.com/a.png" alt="x` still counts as external.
pub fn classify(value: &str) -> ValueKind {
    if ABSOLUTE_URL_RE.is_match(value) {
        ValueKind::External
    } else if value == PLACEHOLDER {
        ValueKind::Placeholder
    } else {
        ValueKind::Local
    }
}

/// Build the static tag that replaces a local reference.
///
/// The tag is padded with a space on both sides:
/// `static_tag("main/", "a.css")` gives `" {% static 'main/a.css' %} "`.
#[must_use]
pub fn static_tag(prefix: &str, value: &str) -> String {
    format!(" {{% static '{prefix}{value}' %}} ")
}

/// Namespace prefix for an optional application name.
///
/// `Some("main")` gives `"main/"`, `None` gives an empty prefix.
#[must_use]
pub fn namespace_prefix(app_name: Option<&str>) -> String {
    app_name.map(|name| format!("{name}/")).unwrap_or_default()
}
