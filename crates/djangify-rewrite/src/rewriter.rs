//! Line rewriting pipeline.

use crate::classify::{classify, static_tag};
use crate::keyword::{ScanPolicy, scan};
use crate::locate::{HeuristicLocator, SpanLocator};

/// Result of rewriting a line or a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenLine {
    /// Rewritten text.
    pub text: String,
    /// Number of references replaced with a static tag.
    pub substitutions: usize,
}

impl RewrittenLine {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            substitutions: 0,
        }
    }
}

/// Rewrites local asset references into static tags.
///
/// Generic over the [`SpanLocator`] so a stricter locator can replace the
/// default heuristic without changing callers.
///
/// # Example
///
/// ```
/// use djangify_rewrite::{LineRewriter, ScanPolicy};
///
/// let rewriter = LineRewriter::new().with_scan_policy(ScanPolicy::AllLines);
/// let line = r#"<script src="js/app.js"></script>"#;
/// assert_eq!(
///     rewriter.rewrite(line, ""),
///     r#"<script src=" {% static 'js/app.js' %} "></script>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineRewriter<L = HeuristicLocator> {
    locator: L,
    policy: ScanPolicy,
}

impl LineRewriter {
    /// Create a rewriter with the heuristic locator and the default scan policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: SpanLocator> LineRewriter<L> {
    /// Create a rewriter with a custom locator.
    #[must_use]
    pub fn with_locator(locator: L) -> Self {
        Self {
            locator,
            policy: ScanPolicy::default(),
        }
    }

    /// Set the scan policy.
    #[must_use]
    pub fn with_scan_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rewrite a single line.
    ///
    /// `prefix` is prepended to every rewritten path, see
    /// [`namespace_prefix`](crate::namespace_prefix).
    pub fn rewrite(&self, line: &str, prefix: &str) -> String {
        self.rewrite_line(line, prefix).text
    }

    /// Rewrite a single line and count the substitutions.
    ///
    /// Keywords are handled in scan order. Each span is located against the
    /// output of the previous substitution. A keyword that an earlier
    /// substitution removed from the line is skipped.
    pub fn rewrite_line(&self, line: &str, prefix: &str) -> RewrittenLine {
        scan(line, self.policy)
            .into_iter()
            .fold(RewrittenLine::unchanged(line), |mut current, keyword| {
                let Some(span) = self.locator.locate(&current.text, keyword) else {
                    return current;
                };
                let Some(value) = current.text.get(span.start..span.end) else {
                    tracing::debug!(
                        %keyword,
                        start = span.start,
                        end = span.end,
                        "Locator returned a span outside the line"
                    );
                    return current;
                };
                if !classify(value).is_rewritten() {
                    return current;
                }

                let replacement = static_tag(prefix, value);
                current.text.replace_range(span.start..span.end, &replacement);
                current.substitutions += 1;
                current
            })
    }

    /// Rewrite a block of text line by line, keeping line terminators.
    pub fn rewrite_text(&self, text: &str, prefix: &str) -> RewrittenLine {
        let mut output = String::with_capacity(text.len());
        let mut substitutions = 0;

        for line in text.split_inclusive('\n') {
            let rewritten = self.rewrite_line(line, prefix);
            output.push_str(&rewritten.text);
            substitutions += rewritten.substitutions;
        }

        RewrittenLine {
            text: output,
            substitutions,
        }
    }
}

/// Rewrite a line with the default rewriter.
///
/// # Example
///
/// ```
/// use djangify_rewrite::transform_line;
///
/// let line = r#"<div style="background-image: url(img/img.jpg);">"#;
/// assert_eq!(
///     transform_line(line, ""),
///     r#"<div style="background-image: url( {% static 'img/img.jpg' %} );">"#
/// );
/// ```
pub fn transform_line(line: &str, prefix: &str) -> String {
    LineRewriter::new().rewrite(line, prefix)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::keyword::Keyword;
    use crate::locate::Span;

    #[test]
    fn test_transform_stylesheet() {
        assert_eq!(
            transform_line(r#"<link rel="stylesheet" href="style.css">"#, ""),
            r#"<link rel="stylesheet" href=" {% static 'style.css' %} ">"#
        );
    }

    #[test]
    fn test_transform_script() {
        assert_eq!(
            transform_line(r#"<script src="js/bootstrap/bootstrap.min.js">"#, ""),
            r#"<script src=" {% static 'js/bootstrap/bootstrap.min.js' %} ">"#
        );
    }

    #[test]
    fn test_transform_inline_image() {
        assert_eq!(
            transform_line(r#"<div style="background-image: url(img/img.jpg);">"#, ""),
            r#"<div style="background-image: url( {% static 'img/img.jpg' %} );">"#
        );
    }

    #[test]
    fn test_transform_with_app_prefix() {
        assert_eq!(
            transform_line(r#"<link rel="stylesheet" href="style.css">"#, "main/"),
            r#"<link rel="stylesheet" href=" {% static 'main/style.css' %} ">"#
        );
    }

    #[test]
    fn test_transform_external_link_unchanged() {
        let line = r#"<img class="img-profile rounded-circle" src="https://source.unsplash.com/NftWwc-oY2M/60x60">"#;
        assert_eq!(transform_line(line, ""), line);
    }

    #[test]
    fn test_transform_spaced_image_tag() {
        assert_eq!(
            transform_line(r#"< img src = "img/img.jpg" alt = "Nice image" >"#, ""),
            r#"< img src = {% static ' "img/img.jpg" alt ' %} = "Nice image" >"#
        );
    }

    #[test]
    fn test_transform_placeholder_unchanged() {
        let line = r##"<a href="#">Home</a>"##;
        assert_eq!(transform_line(line, ""), line);
    }

    #[test]
    fn test_transform_line_without_keywords() {
        let line = "<p>A lazy fox jumped over the brown frog</p>\n";
        assert_eq!(transform_line(line, "main/"), line);
    }

    #[test]
    fn test_transform_keeps_line_terminator() {
        assert_eq!(
            transform_line("<link rel=\"stylesheet\" href=\"style.css\">\n", ""),
            "<link rel=\"stylesheet\" href=\" {% static 'style.css' %} \">\n"
        );
    }

    #[test]
    fn test_transform_multiple_keywords_relocates_after_each_substitution() {
        assert_eq!(
            transform_line(
                r#"<img src="img/a.png" style="background: url(img/b.png)">"#,
                "main/"
            ),
            r#"<img src=" {% static 'main/img/a.png' %} " style="background: url( {% static 'main/img/b.png' %} )">"#
        );
        assert_eq!(
            transform_line(r#"<img src="img/logo.png"><link href="css/main.css">"#, ""),
            r#"<img src=" {% static 'img/logo.png' %} "><link href=" {% static 'css/main.css' %} ">"#
        );
    }

    #[test]
    fn test_transform_only_first_occurrence_per_keyword() {
        assert_eq!(
            transform_line(
                r#"<script src="js/app.js"></script><script src="js/other.js"></script>"#,
                ""
            ),
            r#"<script src=" {% static 'js/app.js' %} "></script><script src="js/other.js"></script>"#
        );
    }

    #[test]
    fn test_transform_quoted_url() {
        assert_eq!(
            transform_line(r#"<div style="background: url('img/bg.png')">"#, ""),
            r#"<div style="background: url(' {% static 'img/bg.png' %} ')">"#
        );
    }

    #[test]
    fn test_transform_empty_unclosed_value() {
        assert_eq!(
            transform_line("<img src=\"\n", ""),
            "<img src=\" {% static '' %} \n"
        );
    }

    #[test]
    fn test_transform_skips_keyword_removed_by_earlier_substitution() {
        // The href value swallows the "l" of "url", so url is no longer found.
        assert_eq!(
            transform_line("hrefurlhref\n", "app/"),
            "hrefur {% static 'app/lh' %} ref\n"
        );
    }

    #[test]
    fn test_transform_is_not_idempotent() {
        let once = transform_line(r#"<link rel="stylesheet" href="style.css">"#, "");
        let twice = transform_line(&once, "");

        assert_ne!(twice, once);
        assert_eq!(
            twice,
            r#"<link rel="stylesheet" href=" {% static ' {% static 'style.css' %} ' %} ">"#
        );
    }

    #[test]
    fn test_transform_non_ascii_path() {
        assert_eq!(
            transform_line(r#"<img src="img/é.png">"#, ""),
            r#"<img src=" {% static 'img/é.png' %} ">"#
        );
    }

    #[test]
    fn test_rewrite_line_counts_substitutions() {
        let rewriter = LineRewriter::new();
        let line = r#"<img src="a.png"><a href="https://example.com/">"#;

        let rewritten = rewriter.rewrite_line(line, "");
        assert_eq!(rewritten.substitutions, 1);
    }

    #[test]
    fn test_rewrite_with_anchor_exclusion() {
        let rewriter = LineRewriter::new().with_scan_policy(ScanPolicy::ExcludeAnchorLines);

        let anchor = r#"<a href="page.html">"#;
        assert_eq!(rewriter.rewrite(anchor, ""), anchor);

        let stylesheet = r#"<link rel="stylesheet" href="style.css">"#;
        assert_eq!(
            rewriter.rewrite(stylesheet, ""),
            r#"<link rel="stylesheet" href=" {% static 'style.css' %} ">"#
        );
    }

    #[test]
    fn test_rewrite_text_keeps_terminators() {
        let text = "<html>\r\n<script src=\"app.js\"></script>\n<link href=\"a.css\">";
        let rewritten = LineRewriter::new().rewrite_text(text, "blog/");

        assert_eq!(
            rewritten.text,
            "<html>\r\n<script src=\" {% static 'blog/app.js' %} \"></script>\n<link href=\" {% static 'blog/a.css' %} \">"
        );
        assert_eq!(rewritten.substitutions, 2);
    }

    /// Locator returning a fixed span, to check that rewriting follows the locator.
    struct FixedLocator(Span);

    impl SpanLocator for FixedLocator {
        fn locate(&self, _line: &str, _keyword: Keyword) -> Option<Span> {
            Some(self.0)
        }
    }

    #[test]
    fn test_custom_locator() {
        let rewriter = LineRewriter::with_locator(FixedLocator(Span::new(0, 3)));
        assert_eq!(rewriter.rewrite("src", ""), " {% static 'src' %} ");
    }

    #[test]
    fn test_out_of_range_span_is_skipped() {
        let rewriter = LineRewriter::with_locator(FixedLocator(Span::new(2, 99)));
        assert_eq!(rewriter.rewrite("<img src>", ""), "<img src>");
    }
}
