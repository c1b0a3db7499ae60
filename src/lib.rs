//! # boilersieve
//!
//! Heuristic extraction of the main content region from an HTML document,
//! discriminating prose (articles, posts) from surrounding boilerplate
//! (navigation, comments, link lists, ads) using only document structure
//! and word statistics. No layout engine, no CSS, no rendering.
//!
//! The pipeline is four passes over an annotated tree, then a text render:
//! normalization (cleanup + per-node metrics and structural patterns),
//! title localization, top-down candidate selection, and bottom-up trash
//! pruning. It is best-effort by design: a well-formed document always
//! yields *some* text, with quality rather than success as the variable.
//! Navigation pages, forums and application UIs degrade gracefully.
//!
//! ## Quick Start
//!
//! ```rust
//! use boilersieve::extract;
//!
//! let html = r#"<html><head><title>My Article</title></head>
//! <body><div><h1>My Article</h1><p>Main content here.</p></div></body></html>"#;
//!
//! let result = extract(html)?;
//! println!("Title: {:?}", result.title);
//! println!("Content: {}", result.content_text);
//! # Ok::<(), boilersieve::Error>(())
//! ```
//!
//! ## Supplying your own tree
//!
//! Parsing is a front-end concern: the pipeline itself consumes a
//! [`Tree`] forest, so any parser can feed it through
//! [`extract_from_tree`]. The bundled front-end ([`parse`]) uses
//! `dom_query`.

mod error;
mod options;
mod result;

/// HTML parsing front-end producing the input forest.
pub mod parse;

/// Arena-backed document tree and per-node annotations.
pub mod tree;

/// The four-stage extraction pipeline (each stage usable in isolation).
pub mod extractor;

/// Plain-text rendering of the surviving candidate subtree.
pub mod formatter;

/// Serializable per-node annotation reports for debug rendering.
pub mod report;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use result::ExtractResult;
pub use tree::{NodeId, NodeKind, Tree};

/// Extracts main content from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use boilersieve::extract;
///
/// let html = "<html><body><p>Content</p></body></html>";
/// let result = extract(html)?;
/// println!("{}", result.content_text);
/// # Ok::<(), boilersieve::Error>(())
/// ```
pub fn extract(html: &str) -> Result<ExtractResult> {
    extract_with_options(html, &Options::default())
}

/// Extracts main content from an HTML document with custom options.
///
/// # Example
///
/// ```rust
/// use boilersieve::{extract_with_options, Options};
///
/// let html = "<html><body><p>Content</p></body></html>";
/// let options = Options {
///     decisive_score_ratio: 12.0,
///     ..Options::default()
/// };
/// let result = extract_with_options(html, &options)?;
/// # Ok::<(), boilersieve::Error>(())
/// ```
pub fn extract_with_options(html: &str, options: &Options) -> Result<ExtractResult> {
    let tree = parse::parse_html(html, options);
    extract_from_tree(tree, options)
}

/// Extracts main content from HTML bytes with automatic encoding detection.
///
/// The charset is sniffed from meta tags (`<meta charset=...>` or the
/// `Content-Type` form) and defaults to UTF-8; invalid sequences become
/// replacement characters rather than errors.
///
/// # Example
///
/// ```rust
/// use boilersieve::extract_bytes;
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9 review</p></body></html>";
/// let result = extract_bytes(html)?;
/// assert!(result.content_text.contains("Caf\u{e9}"));
/// # Ok::<(), boilersieve::Error>(())
/// ```
pub fn extract_bytes(html: &[u8]) -> Result<ExtractResult> {
    let html_str = encoding::transcode_to_utf8(html);
    extract(&html_str)
}

/// Extracts main content from HTML bytes with custom options and automatic
/// encoding detection.
pub fn extract_bytes_with_options(html: &[u8], options: &Options) -> Result<ExtractResult> {
    let html_str = encoding::transcode_to_utf8(html);
    extract_with_options(&html_str, options)
}

/// Runs the pipeline over an already-parsed input forest.
///
/// This is the seam for callers with their own parser: the forest must
/// contain a top-level `html` element with children, or consist of exactly
/// one rooted element. Anything else fails with [`Error::InvalidInput`]
/// and no partial result.
pub fn extract_from_tree(mut tree: Tree, options: &Options) -> Result<ExtractResult> {
    let (_root, candidate, ctx) = extractor::run(&mut tree, options)?;
    let content_text = formatter::format_text(&tree, candidate);
    Ok(ExtractResult {
        content_text,
        title: ctx.title_text,
        candidate,
        tree,
    })
}
