//! Attribute keyword recognition.

/// Attribute keywords whose values may reference local assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `src="..."` on scripts, images and frames.
    Src,
    /// `href="..."` on links and stylesheets.
    Href,
    /// Inline CSS `url(...)`.
    Url,
}

impl Keyword {
    /// All keywords in scan order.
    pub const ALL: [Self; 3] = [Self::Src, Self::Href, Self::Url];

    /// Literal text searched for in a line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Src => "src",
            Self::Href => "href",
            Self::Url => "url",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lines the scanner is allowed to report matches for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanPolicy {
    /// Every line is scanned.
    #[default]
    AllLines,
    /// Lines containing the substring `a` produce no matches.
    ///
    /// Meant to skip anchor tags, but the check is a plain substring test:
    /// any lowercase "a" anywhere in the line (`class`, `alt`, `background`)
    /// suppresses the whole line. Kept as an opt-in for compatibility.
    ExcludeAnchorLines,
}

/// Marker checked by [`ScanPolicy::ExcludeAnchorLines`].
const ANCHOR_MARKER: &str = "a";

/// Return the keywords occurring anywhere in `line`, in [`Keyword::ALL`] order.
///
/// A keyword is reported once no matter how many times it occurs.
pub fn scan(line: &str, policy: ScanPolicy) -> Vec<Keyword> {
    if policy == ScanPolicy::ExcludeAnchorLines && line.contains(ANCHOR_MARKER) {
        return Vec::new();
    }

    Keyword::ALL
        .into_iter()
        .filter(|keyword| line.contains(keyword.as_str()))
        .collect()
}
