//! Compile Sass and SCSS `<style>` regions of demo code to CSS.

use std::ops::Range;

use crate::DemoError;

const OPEN_TAG: &str = "<style";
const CLOSE_TAG: &str = "</style>";

/// Stylesheet dialect declared by a `lang` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleSyntax {
    /// Indented syntax.
    Sass,
    /// Curly-brace syntax.
    Scss,
}

impl StyleSyntax {
    /// Dialect for a `lang` attribute value, if it needs compiling.
    #[must_use]
    pub fn from_lang(lang: &str) -> Option<Self> {
        if lang.eq_ignore_ascii_case("sass") {
            Some(Self::Sass)
        } else if lang.eq_ignore_ascii_case("scss") {
            Some(Self::Scss)
        } else {
            None
        }
    }
}

/// Compiles a stylesheet dialect to plain CSS.
pub trait StyleCompiler {
    /// Compile `source` written in `syntax`.
    ///
    /// # Errors
    ///
    /// Returns [`DemoError::Style`] if the source does not compile.
    fn compile(&self, source: &str, syntax: StyleSyntax) -> Result<String, DemoError>;
}

/// [`StyleCompiler`] backed by the `grass` Sass compiler.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrassCompiler;

impl StyleCompiler for GrassCompiler {
    fn compile(&self, source: &str, syntax: StyleSyntax) -> Result<String, DemoError> {
        let input_syntax = match syntax {
            StyleSyntax::Sass => grass::InputSyntax::Sass,
            StyleSyntax::Scss => grass::InputSyntax::Scss,
        };
        let options = grass::Options::default().input_syntax(input_syntax);
        grass::from_string(source.to_owned(), &options).map_err(|e| DemoError::Style(e.to_string()))
    }
}

/// One `<style>` region found in the source.
struct StyleRegion<'a> {
    /// Whole opening tag, `<style ...>`.
    open: Range<usize>,
    /// Text between the opening tag and the close tag (or end of source).
    body: Range<usize>,
    /// `lang` attribute, relative to the opening tag, with its value.
    lang: Option<(Range<usize>, &'a str)>,
}

/// Find the next `<style>` region at or after `from`.
///
/// Tag names match without regard to ASCII case.
fn next_region(source: &str, from: usize) -> Option<StyleRegion<'_>> {
    let mut search = from;
    loop {
        let start = search + find_ignore_case(source.get(search..)?, OPEN_TAG)?;
        let after_name = start + OPEN_TAG.len();
        let next = source[after_name..].chars().next();
        if !next.is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace()) {
            // `<styles>` or similar
            search = after_name;
            continue;
        }

        let open_end = after_name + open_tag_end(&source[after_name..])? + 1;
        let body_end = find_ignore_case(&source[open_end..], CLOSE_TAG)
            .map_or(source.len(), |i| open_end + i);

        let tag = &source[start..open_end];
        return Some(StyleRegion {
            open: start..open_end,
            body: open_end..body_end,
            lang: find_lang(tag),
        });
    }
}

/// Byte offset of an ASCII `needle` in `haystack`, ignoring ASCII case.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Offset of the `>` closing an opening tag, skipping quoted attribute values.
fn open_tag_end(attrs: &str) -> Option<usize> {
    let mut quote = None;
    let mut after_equals = false;
    for (i, b) in attrs.bytes().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'>' => return Some(i),
                b'"' | b'\'' if after_equals => quote = Some(b),
                b'=' => after_equals = true,
                b if b.is_ascii_whitespace() => {}
                _ => after_equals = false,
            },
        }
        if quote.is_some() {
            after_equals = false;
        }
    }
    None
}

/// Locate the `lang` attribute in an opening tag.
///
/// The returned range covers the attribute and its leading whitespace, so
/// removing it leaves a well-formed tag.
fn find_lang(tag: &str) -> Option<(Range<usize>, &str)> {
    let bytes = tag.as_bytes();
    let end = tag.len() - 1; // trailing '>'
    let mut pos = OPEN_TAG.len();

    while pos < end {
        let attr_start = pos;
        while pos < end && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let name_start = pos;
        while pos < end && !matches!(bytes[pos], b'=' | b'/' | b'>') && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos == name_start {
            pos += 1;
            continue;
        }
        let name = &tag[name_start..pos];

        let mut value = "";
        let mut lookahead = pos;
        while lookahead < end && bytes[lookahead].is_ascii_whitespace() {
            lookahead += 1;
        }
        if lookahead < end && bytes[lookahead] == b'=' {
            pos = lookahead + 1;
            while pos < end && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos < end && matches!(bytes[pos], b'"' | b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                let value_end = tag[value_start..end]
                    .bytes()
                    .position(|b| b == quote)
                    .map_or(end, |i| value_start + i);
                value = &tag[value_start..value_end];
                pos = (value_end + 1).min(end);
            } else {
                let value_start = pos;
                while pos < end && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'/' {
                    pos += 1;
                }
                value = &tag[value_start..pos];
            }
        }

        if name.eq_ignore_ascii_case("lang") {
            return Some((attr_start..pos, value));
        }
    }
    None
}

/// Compile Sass and SCSS style regions of `source` to CSS.
///
/// Regions are scanned left to right. Each runs from a `<style>` opening tag
/// to the first `</style>` after it, or to the end of the source. A region
/// whose `lang` is `sass` or `scss` has its body replaced by the compiled
/// CSS and its `lang` attribute removed. Everything else is copied
/// unchanged, including regions that fail to compile.
pub fn compile_styles(source: &str, compiler: &dyn StyleCompiler) -> String {
    let mut output = String::with_capacity(source.len());
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(region) = next_region(source, cursor) {
        cursor = region.body.end;

        let Some((lang_range, lang)) = region.lang else {
            continue;
        };
        let Some(syntax) = StyleSyntax::from_lang(lang) else {
            continue;
        };

        match compiler.compile(&source[region.body.clone()], syntax) {
            Ok(css) => {
                let tag = &source[region.open.clone()];
                output.push_str(&source[copied..region.open.start]);
                output.push_str(&tag[..lang_range.start]);
                output.push_str(&tag[lang_range.end..]);
                output.push_str(&css);
                copied = region.body.end;
            }
            Err(e) => {
                tracing::warn!(lang, offset = region.open.start, error = %e, "Keeping style block that failed to compile");
            }
        }
    }

    output.push_str(&source[copied..]);
    output
}
