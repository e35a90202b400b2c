//! Highlighting of formula and image regions in an escaped code panel.
//!
//! The input is markup that has already been HTML-escaped for display, so a
//! `<math>` element appears as `&lt;math&gt;`. The highlighter locates the
//! escaped delimiter tokens and inserts wrapper markers around each region.
//! Every offset is taken from a single scan of the original text and the
//! markers are spliced in by offset, so the characters of the input are never
//! reordered or removed.

use log::trace;

/// Escaped opening of a MathML element. Attributes may follow, so the closing
/// `&gt;` is not part of the token.
pub const MATH_START: &str = "&lt;math";
/// Escaped closing MathML tag.
pub const MATH_END: &str = "&lt;/math&gt;";
/// Escaped opening of an image element.
pub const IMG_START: &str = "&lt;img";
/// Uppercase variant tried when no lowercase image tag is present.
pub const IMG_START_UPPER: &str = "&lt;IMG";
/// Escaped tag close.
pub const TAG_CLOSE: &str = "&gt;";

/// Marker inserted before each highlighted region.
pub const OPEN_MARKER: &str = "<pre class='language-xml wrs_inline' style='word-wrap:break-word;background-color:white'><code>";
/// Marker inserted after each highlighted region.
pub const CLOSE_MARKER: &str = "</code></pre>";

/// How formulas are embedded in the markup being highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Formulas are stored as `<math>` elements.
    StructuredMarkup,
    /// Formulas are stored as `<img>` elements (plain or base64-encoded).
    EmbeddedImage,
}

impl ContentMode {
    /// Resolve a mode name as used by the editor page.
    ///
    /// `xml` and `mathml` select structured markup; `image` and `base64`
    /// select embedded images. Anything else is `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "xml" | "mathml" => Some(ContentMode::StructuredMarkup),
            "image" | "base64" => Some(ContentMode::EmbeddedImage),
            _ => None,
        }
    }
}

/// A located occurrence of a delimiter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    /// Byte offset of the token in the scanned text.
    pub offset: usize,
    /// Length of the token in bytes.
    pub len: usize,
}

impl MatchSpan {
    /// Offset just past the token.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// The pair of fragments wrapped around each highlighted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightMarkers<'a> {
    pub open: &'a str,
    pub close: &'a str,
}

impl HighlightMarkers<'static> {
    /// The XML-highlighting `<pre><code>` block used by the code panel.
    pub const DEFAULT: Self = Self {
        open: OPEN_MARKER,
        close: CLOSE_MARKER,
    };
}

impl Default for HighlightMarkers<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Find every non-overlapping occurrence of `token`, scanning left to right.
pub fn find_matches(text: &str, token: &str) -> Vec<MatchSpan> {
    if token.is_empty() {
        return Vec::new();
    }

    text.match_indices(token)
        .map(|(offset, _)| MatchSpan {
            offset,
            len: token.len(),
        })
        .collect()
}

/// Highlight `text` with the default markers.
pub fn highlight(text: &str, mode: ContentMode) -> String {
    Highlighter::default().highlight(text, mode)
}

/// Highlight `text` for a mode given by name.
///
/// Unrecognized names leave the text unchanged.
pub fn highlight_named(text: &str, mode: &str) -> String {
    match ContentMode::from_name(mode) {
        Some(mode) => highlight(text, mode),
        None => {
            trace!("no highlighting for unknown mode {:?}", mode);
            text.to_string()
        }
    }
}

// Closing markers sort before opening markers at the same offset, so a
// region that ends exactly where the next begins stays balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Marker {
    Close,
    Open,
}

/// Inserts wrapper markers around formula regions.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter<'a> {
    markers: HighlightMarkers<'a>,
}

impl Default for Highlighter<'static> {
    fn default() -> Self {
        Self::new(HighlightMarkers::DEFAULT)
    }
}

impl<'a> Highlighter<'a> {
    /// Create a highlighter that wraps regions with `markers`.
    pub fn new(markers: HighlightMarkers<'a>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> HighlightMarkers<'a> {
        self.markers
    }

    /// Wrap each region of `text` recognized for `mode`.
    pub fn highlight(&self, text: &str, mode: ContentMode) -> String {
        let insertions = match mode {
            ContentMode::StructuredMarkup => structured_insertions(text),
            ContentMode::EmbeddedImage => image_insertions(text),
        };

        if insertions.is_empty() {
            return text.to_string();
        }

        self.splice(text, insertions)
    }

    fn splice(&self, text: &str, mut insertions: Vec<(usize, Marker)>) -> String {
        insertions.sort();

        let extra: usize = insertions
            .iter()
            .map(|(_, marker)| self.marker(*marker).len())
            .sum();
        let mut out = String::with_capacity(text.len() + extra);
        let mut cursor = 0;

        for (at, marker) in insertions {
            out.push_str(&text[cursor..at]);
            out.push_str(self.marker(marker));
            cursor = at;
        }
        out.push_str(&text[cursor..]);

        out
    }

    fn marker(&self, marker: Marker) -> &'a str {
        match marker {
            Marker::Open => self.markers.open,
            Marker::Close => self.markers.close,
        }
    }
}

fn structured_insertions(text: &str) -> Vec<(usize, Marker)> {
    let ends = find_matches(text, MATH_END);
    let starts = find_matches(text, MATH_START);
    trace!(
        "structured markup: {} opening and {} closing math tags",
        starts.len(),
        ends.len()
    );

    ends.iter()
        .map(|span| (span.end(), Marker::Close))
        .chain(starts.iter().map(|span| (span.offset, Marker::Open)))
        .collect()
}

fn image_insertions(text: &str) -> Vec<(usize, Marker)> {
    let mut starts = find_matches(text, IMG_START);
    if starts.is_empty() {
        starts = find_matches(text, IMG_START_UPPER);
    }
    trace!("embedded image: {} image tags", starts.len());

    let mut insertions = Vec::with_capacity(starts.len() * 2);
    for span in starts {
        if let Some(close) = text[span.offset..].find(TAG_CLOSE) {
            insertions.push((span.offset + close + TAG_CLOSE.len(), Marker::Close));
        }
        insertions.push((span.offset, Marker::Open));
    }
    insertions
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(text: &str) -> String {
        text.replace(OPEN_MARKER, "").replace(CLOSE_MARKER, "")
    }

    #[test]
    fn test_structured_single_block() {
        let input = "a &lt;math&gt;b&lt;/math&gt;c";
        let output = highlight(input, ContentMode::StructuredMarkup);

        assert_eq!(
            output,
            format!("a {OPEN_MARKER}&lt;math&gt;b&lt;/math&gt;{CLOSE_MARKER}c")
        );
        assert_eq!(strip(&output), input);
    }

    #[test]
    fn test_structured_math_with_attributes() {
        let input = "&lt;math xmlns=\"http://www.w3.org/1998/Math/MathML\"&gt;&lt;mn&gt;1&lt;/mn&gt;&lt;/math&gt;";
        let output = highlight(input, ContentMode::StructuredMarkup);

        assert!(output.starts_with(OPEN_MARKER));
        assert!(output.ends_with(CLOSE_MARKER));
        assert_eq!(strip(&output), input);
    }

    #[test]
    fn test_structured_two_blocks() {
        let input = "&lt;math&gt;1&lt;/math&gt; &lt;math&gt;2&lt;/math&gt;";
        let output = highlight(input, ContentMode::StructuredMarkup);

        assert_eq!(output.matches(OPEN_MARKER).count(), 2);
        assert_eq!(output.matches(CLOSE_MARKER).count(), 2);
        assert_eq!(
            output,
            format!(
                "{o}&lt;math&gt;1&lt;/math&gt;{c} {o}&lt;math&gt;2&lt;/math&gt;{c}",
                o = OPEN_MARKER,
                c = CLOSE_MARKER
            )
        );
    }

    #[test]
    fn test_structured_adjacent_blocks_close_before_open() {
        let input = "&lt;math&gt;1&lt;/math&gt;&lt;math&gt;2&lt;/math&gt;";
        let output = highlight(input, ContentMode::StructuredMarkup);

        assert!(output.contains(&format!("&lt;/math&gt;{CLOSE_MARKER}{OPEN_MARKER}&lt;math&gt;2")));
    }

    #[test]
    fn test_structured_unbalanced_end_only() {
        let input = "x&lt;/math&gt;y";
        let output = highlight(input, ContentMode::StructuredMarkup);

        assert_eq!(output, format!("x&lt;/math&gt;{CLOSE_MARKER}y"));
    }

    #[test]
    fn test_no_matches_is_unchanged() {
        let input = "&lt;p&gt;plain text&lt;/p&gt;";
        assert_eq!(highlight(input, ContentMode::StructuredMarkup), input);
        assert_eq!(highlight(input, ContentMode::EmbeddedImage), input);
        assert_eq!(highlight("", ContentMode::EmbeddedImage), "");
    }

    #[test]
    fn test_image_single_tag() {
        let input = "before &lt;img src=\"f.png\" alt=\"x\"&gt; after";
        let output = highlight(input, ContentMode::EmbeddedImage);

        assert_eq!(
            output,
            format!("before {OPEN_MARKER}&lt;img src=\"f.png\" alt=\"x\"&gt;{CLOSE_MARKER} after")
        );
    }

    #[test]
    fn test_image_uppercase_fallback() {
        let lower = highlight("&lt;img src=x&gt;", ContentMode::EmbeddedImage);
        let upper = highlight("&lt;IMG src=x&gt;", ContentMode::EmbeddedImage);

        assert_eq!(upper, format!("{OPEN_MARKER}&lt;IMG src=x&gt;{CLOSE_MARKER}"));
        assert_eq!(upper.replace("IMG", "img"), lower);
    }

    #[test]
    fn test_image_uppercase_ignored_when_lowercase_present() {
        let input = "&lt;img a&gt;&lt;IMG b&gt;";
        let output = highlight(input, ContentMode::EmbeddedImage);

        assert_eq!(output.matches(OPEN_MARKER).count(), 1);
        assert!(output.contains(&format!("{CLOSE_MARKER}&lt;IMG b&gt;")));
    }

    #[test]
    fn test_image_mixed_case_not_matched() {
        let input = "&lt;Img src=x&gt;";
        assert_eq!(highlight(input, ContentMode::EmbeddedImage), input);
    }

    #[test]
    fn test_image_missing_close() {
        let input = "&lt;img src=x";
        let output = highlight(input, ContentMode::EmbeddedImage);

        assert_eq!(output, format!("{OPEN_MARKER}&lt;img src=x"));
        assert!(!output.contains(CLOSE_MARKER));
    }

    #[test]
    fn test_image_adjacent_tags() {
        let input = "&lt;img a&gt;&lt;img b&gt;";
        let output = highlight(input, ContentMode::EmbeddedImage);

        assert_eq!(
            output,
            format!(
                "{o}&lt;img a&gt;{c}{o}&lt;img b&gt;{c}",
                o = OPEN_MARKER,
                c = CLOSE_MARKER
            )
        );
    }

    #[test]
    fn test_image_shared_close() {
        let input = "&lt;img a &lt;img b&gt;";
        let output = highlight(input, ContentMode::EmbeddedImage);

        assert_eq!(output.matches(OPEN_MARKER).count(), 2);
        assert_eq!(output.matches(CLOSE_MARKER).count(), 2);
        assert_eq!(strip(&output), input);
    }

    #[test]
    fn test_structured_mode_ignores_images() {
        let input = "&lt;img src=x&gt;";
        assert_eq!(highlight(input, ContentMode::StructuredMarkup), input);
    }

    #[test]
    fn test_highlight_named() {
        let input = "&lt;math&gt;1&lt;/math&gt;";
        assert_eq!(
            highlight_named(input, "xml"),
            highlight(input, ContentMode::StructuredMarkup)
        );
        assert_eq!(highlight_named(input, "svg"), input);
        assert_eq!(
            highlight_named("&lt;img&gt;", " Base64 "),
            highlight("&lt;img&gt;", ContentMode::EmbeddedImage)
        );
    }

    #[test]
    fn test_custom_markers() {
        let highlighter = Highlighter::new(HighlightMarkers {
            open: "[",
            close: "]",
        });
        let output = highlighter.highlight("x &lt;math&gt;1&lt;/math&gt; y", ContentMode::StructuredMarkup);

        assert_eq!(output, "x [&lt;math&gt;1&lt;/math&gt;] y");
    }

    #[test]
    fn test_find_matches() {
        let spans = find_matches("&gt;a&gt;&gt;", TAG_CLOSE);
        let offsets: Vec<usize> = spans.iter().map(|s| s.offset).collect();

        assert_eq!(offsets, vec![0, 5, 9]);
        assert_eq!(spans[1].end(), 9);
        assert!(find_matches("abc", "").is_empty());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ContentMode::from_name("XML"), Some(ContentMode::StructuredMarkup));
        assert_eq!(ContentMode::from_name("image"), Some(ContentMode::EmbeddedImage));
        assert_eq!(ContentMode::from_name("latex"), None);
    }
}
