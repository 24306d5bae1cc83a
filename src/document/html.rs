//! Static HTML page adapter.
//!
//! Anchors are found by running the page through the `html5ever` tokenizer,
//! so comments, script bodies and attribute text never count as links and
//! every href comes back with its character references decoded. Rewriting
//! a href touches only the bytes of that attribute value; everything else is
//! written back exactly as read. The title is extracted with `scraper`.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::sync::LazyLock;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::{debug, warn};
use regex::Regex;
use scraper::{Html, Selector};

use super::{Anchor, AnchorId, Document};
use crate::error_handling::DocumentError;
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

/// `<` and a tag name at the start of a start tag.
static TAG_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"^<[A-Za-z][^\t\n\x0C\r />]*", "TAG_NAME_PATTERN")
});

/// One attribute at the start of the remaining tag text: its name and, when
/// present, its double-quoted, single-quoted or bare value.
static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r#"^[\t\n\x0C\r /]*([^\t\n\x0C\r />][^\t\n\x0C\r />=]*)(?:[\t\n\x0C\r ]*=[\t\n\x0C\r ]*("[^"]*"|'[^']*'|[^\t\n\x0C\r >]*))?"#,
        "ATTRIBUTE_PATTERN",
    )
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("title", "TITLE_SELECTOR"));

#[derive(Debug, Clone)]
struct AnchorSlot {
    /// Byte range of the attribute value (quotes included); `None` for injected anchors
    span: Option<Range<usize>>,
    quote: char,
    /// The attribute was written without `=value`
    bare: bool,
    href: String,
    dirty: bool,
}

/// An `<a href>` start tag reported by the tokenizer.
#[derive(Debug)]
struct TokenizedAnchor {
    /// The tag's `<` is the first one at or after this offset
    search_from: usize,
    href: String,
}

/// Collects `<a href>` start tags and switches the tokenizer into raw text
/// where a tree builder would.
#[derive(Default)]
struct AnchorSink {
    /// Byte offset of the character being fed
    offset: Cell<usize>,
    /// Offset of the character that completed the previous token
    boundary: Cell<usize>,
    anchors: RefCell<Vec<TokenizedAnchor>>,
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let result = match token {
            Token::ParseError(_) => return TokenSinkResult::Continue,
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => {
                if &*tag.name == "a" {
                    if let Some(attr) = tag.attrs.iter().find(|a| &*a.name.local == "href") {
                        self.anchors.borrow_mut().push(TokenizedAnchor {
                            search_from: self.boundary.get(),
                            href: String::from(&*attr.value),
                        });
                    }
                }
                content_model(&tag.name)
            }
            _ => TokenSinkResult::Continue,
        };
        self.boundary.set(self.offset.get());
        result
    }
}

/// How the text after a start tag is tokenized.
fn content_model(tag_name: &str) -> TokenSinkResult<()> {
    match tag_name {
        "script" => TokenSinkResult::RawData(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => {
            TokenSinkResult::RawData(RawKind::Rawtext)
        }
        "title" | "textarea" => TokenSinkResult::RawData(RawKind::Rcdata),
        "plaintext" => TokenSinkResult::Plaintext,
        _ => TokenSinkResult::Continue,
    }
}

/// Runs the tokenizer one character at a time so each token can be tied to
/// the offset where it ended.
fn tokenize_anchors(source: &str) -> Vec<TokenizedAnchor> {
    let opts = TokenizerOpts {
        discard_bom: false,
        ..Default::default()
    };
    let tokenizer = Tokenizer::new(AnchorSink::default(), opts);
    let input = BufferQueue::default();
    for (offset, ch) in source.char_indices() {
        tokenizer.sink.offset.set(offset);
        input.push_back(StrTendril::from_char(ch));
        let _ = tokenizer.feed(&input);
    }
    tokenizer.end();
    tokenizer.sink.anchors.take()
}

/// Byte range of the first `href` value in the start tag at the beginning of
/// `tag`, and whether it was written without a value.
fn locate_href(tag: &str) -> Option<(Range<usize>, bool)> {
    let mut pos = TAG_NAME_PATTERN.find(tag)?.end();
    while let Some(cap) = ATTRIBUTE_PATTERN.captures(&tag[pos..]) {
        let name = cap.get(1)?;
        if name.as_str().eq_ignore_ascii_case("href") {
            return Some(match cap.get(2) {
                Some(value) => (pos + value.start()..pos + value.end(), false),
                None => (pos + name.end()..pos + name.end(), true),
            });
        }
        pos += cap.get(0)?.end();
    }
    None
}

/// An HTML document held as text.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    anchors: Vec<AnchorSlot>,
    title: String,
    observe_mutations: bool,
}

impl HtmlPage {
    /// Parses a page. Never fails; malformed markup is tokenized the way a
    /// browser would and otherwise carried through.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();

        let mut anchors = Vec::new();
        for found in tokenize_anchors(&source) {
            let located = source[found.search_from..]
                .find('<')
                .map(|at| found.search_from + at)
                .and_then(|start| {
                    locate_href(&source[start..])
                        .map(|(span, bare)| (start + span.start..start + span.end, bare))
                });
            let Some((span, bare)) = located else {
                warn!(
                    "Could not locate href \"{}\" in the markup, leaving it untouched",
                    found.href
                );
                continue;
            };
            let quote = match source[span.clone()].chars().next() {
                Some(q @ ('"' | '\'')) => q,
                _ => '"',
            };
            anchors.push(AnchorSlot {
                span: Some(span),
                quote,
                bare,
                href: found.href,
                dirty: false,
            });
        }

        let document = Html::parse_document(&source);
        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        debug!("Parsed page \"{}\" with {} anchors", title, anchors.len());
        Self {
            source,
            anchors,
            title,
            observe_mutations: false,
        }
    }

    /// Enables or disables reporting of later insertions.
    pub fn with_mutation_observation(mut self, enabled: bool) -> Self {
        self.observe_mutations = enabled;
        self
    }

    /// Adds an anchor after initial load, as another script would.
    ///
    /// The anchor is rendered just before `</body>`.
    pub fn inject_anchor(&mut self, href: impl Into<String>) -> AnchorId {
        self.anchors.push(AnchorSlot {
            span: None,
            quote: '"',
            bare: false,
            href: href.into(),
            dirty: true,
        });
        self.anchors.len() - 1
    }

    /// Current href of one anchor.
    pub fn href(&self, id: AnchorId) -> Option<&str> {
        self.anchors.get(id).map(|slot| slot.href.as_str())
    }

    /// Number of parsed anchors whose href was replaced.
    pub fn modified_count(&self) -> usize {
        self.anchors
            .iter()
            .filter(|slot| slot.dirty && slot.span.is_some())
            .count()
    }

    /// Writes the page back out with every replaced href spliced in.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for slot in &self.anchors {
            let Some(span) = &slot.span else { continue };
            if !slot.dirty {
                continue;
            }
            out.push_str(&self.source[cursor..span.start]);
            if slot.bare {
                out.push('=');
            }
            out.push(slot.quote);
            out.push_str(&escape_attribute(&slot.href, slot.quote));
            out.push(slot.quote);
            cursor = span.end;
        }
        out.push_str(&self.source[cursor..]);

        let injected: String = self
            .anchors
            .iter()
            .filter(|slot| slot.span.is_none())
            .map(|slot| format!("<a href=\"{}\"></a>", escape_attribute(&slot.href, '"')))
            .collect();
        if injected.is_empty() {
            return out;
        }
        match out.to_ascii_lowercase().rfind("</body>") {
            Some(at) => out.insert_str(at, &injected),
            None => out.push_str(&injected),
        }
        out
    }
}

impl Document for HtmlPage {
    fn anchors(&self) -> Vec<Anchor> {
        self.anchors
            .iter()
            .enumerate()
            .map(|(id, slot)| Anchor {
                id,
                href: slot.href.clone(),
            })
            .collect()
    }

    fn set_href(&mut self, id: AnchorId, href: String) -> Result<(), DocumentError> {
        let slot = self
            .anchors
            .get_mut(id)
            .ok_or(DocumentError::UnknownAnchor(id))?;
        slot.href = href;
        slot.dirty = true;
        Ok(())
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn supports_mutation_observation(&self) -> bool {
        self.observe_mutations
    }
}

fn escape_attribute(value: &str, quote: char) -> String {
    let escaped = value.replace('&', "&amp;");
    match quote {
        '\'' => escaped.replace('\'', "&#39;"),
        _ => escaped.replace('"', "&quot;"),
    }
}
