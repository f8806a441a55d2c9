//! Line rewriter turning local asset references into Django static tags.
//!
//! Operates on raw lines of markup, not on a DOM. For each recognized
//! attribute keyword (`src`, `href`, `url`) the first occurrence in the line
//! is located, classified and, if it points at a local file, replaced with a
//! `{% static '...' %}` directive.
//!
//! # Pipeline
//!
//! 1. [`scan`] finds which keywords occur in the line.
//! 2. A [`SpanLocator`] finds the value that belongs to each keyword.
//!    [`HeuristicLocator`] is the default.
//! 3. [`classify`] decides whether the value is external, a placeholder or a
//!    local reference, and [`static_tag`] builds the replacement.
//!
//! Substitutions are applied one keyword at a time. Each substitution changes
//! the line length, so every span is located against the current buffer.
//!
//! # Example
//!
//! ```
//! use djangify_rewrite::transform_line;
//!
//! let line = r#"<link rel="stylesheet" href="style.css">"#;
//! assert_eq!(
//!     transform_line(line, "main/"),
//!     r#"<link rel="stylesheet" href=" {% static 'main/style.css' %} ">"#
//! );
//! ```

mod classify;
mod keyword;
mod locate;
mod rewriter;

pub use classify::{ValueKind, classify, namespace_prefix, static_tag};
pub use keyword::{Keyword, ScanPolicy, scan};
pub use locate::{HeuristicLocator, Span, SpanLocator};
pub use rewriter::{LineRewriter, RewrittenLine, transform_line};
