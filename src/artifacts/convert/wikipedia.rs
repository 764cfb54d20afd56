//! MediaWiki article rendering
//!
//! Only the article body is kept: the children of `div.mw-parser-output`, minus tables,
//! figures, infoboxes, navigation boxes and the boilerplate sections at the end of an
//! article. Supported blocks are headings, paragraphs, lists, preformatted text and
//! block quotes; inline markup is limited to bold, italics, code and links.

use crate::artifacts::convert::{ConvertError, PageConverter};
use crate::artifacts::snapshot::article_title::ArticleTitle;
use scraper::{ElementRef, Html, Node};

const CONTENT_CLASS: &str = "mw-parser-output";
const HEADING_WRAPPER_CLASS: &str = "mw-heading";
const TOC_ID: &str = "toc";
const MAX_LIST_INDENT: usize = 2;

const SKIP_SECTIONS: phf::Set<&'static str> = phf::phf_set! {
    "References", "External links", "See also", "Further reading", "Notes",
};

const SKIP_CLASSES: phf::Set<&'static str> = phf::phf_set! {
    "infobox", "navbox", "vertical-navbox", "hatnote", "metadata", "mwe-math-element",
    "sidebar",
};

const SKIP_ELEMENTS: phf::Set<&'static str> = phf::phf_set! {
    "table", "figure", "img", "style", "script",
};

const SKIP_INLINE_CLASSES: phf::Set<&'static str> = phf::phf_set! {
    "mw-editsection", "mw-editsection-visualeditor",
};

#[derive(Debug, Clone, Copy, Default)]
pub struct WikipediaConverter;

impl PageConverter for WikipediaConverter {
    fn convert(&self, html: &str, title: &ArticleTitle) -> Result<String, ConvertError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let content = find(root, |e| is(e, "div") && has_class(e, CONTENT_CLASS))
            .ok_or(ConvertError::MissingContent)?;

        let heading = find(root, |e| is(e, "h1"))
            .map(|h1| collapse_whitespace(&h1.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| title.to_string());

        let mut lines = vec![format!("# {heading}"), String::new()];
        let mut ignore_section = false;

        for child in child_elements(content) {
            let block = unwrap_heading(child);

            if is_skipped_block(block) {
                continue;
            }

            // boilerplate sections run until the next h2
            if is(block, "h2") {
                ignore_section = SKIP_SECTIONS.contains(plain_text(block).as_str());
                if ignore_section {
                    continue;
                }
            }

            if ignore_section {
                continue;
            }

            match block.value().name() {
                "h2" | "h3" | "h4" | "h5" | "h6" => render_heading(block, &mut lines),
                "p" => render_paragraph(block, &mut lines),
                "ul" | "ol" => render_list(block, &mut lines),
                "pre" => render_code_block(block, &mut lines),
                "blockquote" => render_blockquote(block, &mut lines),
                _ => {}
            }
        }

        Ok(format!("{}\n", lines.join("\n").trim_end()))
    }
}

/// A child node the renderer cares about; comments and doctypes are dropped.
#[derive(Clone, Copy)]
enum Child<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

fn children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = Child<'a>> + 'a {
    element.children().filter_map(|node| match node.value() {
        Node::Text(text) => Some(Child::Text(&**text)),
        Node::Element(_) => ElementRef::wrap(node).map(Child::Element),
        _ => None,
    })
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

fn find<'a>(
    root: ElementRef<'a>,
    predicate: impl Fn(ElementRef<'a>) -> bool,
) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| predicate(*element))
}

fn is(element: ElementRef<'_>, name: &str) -> bool {
    element.value().name() == name
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Newer MediaWiki markup wraps section headings in `div.mw-heading`.
fn unwrap_heading(element: ElementRef<'_>) -> ElementRef<'_> {
    if is(element, "div") && has_class(element, HEADING_WRAPPER_CLASS) {
        child_elements(element)
            .find(|child| heading_level(*child).is_some())
            .unwrap_or(element)
    } else {
        element
    }
}

fn heading_level(element: ElementRef<'_>) -> Option<usize> {
    element
        .value()
        .name()
        .strip_prefix('h')
        .and_then(|level| level.parse::<usize>().ok())
        .filter(|level| (1..=6).contains(level))
}

fn is_skipped_block(element: ElementRef<'_>) -> bool {
    SKIP_ELEMENTS.contains(element.value().name())
        || (is(element, "div") && element.value().id() == Some(TOC_ID))
        || element
            .value()
            .classes()
            .any(|class| SKIP_CLASSES.contains(class))
}

fn is_skipped_inline(element: ElementRef<'_>) -> bool {
    (is(element, "sup") && has_class(element, "reference"))
        || (is(element, "span")
            && element
                .value()
                .classes()
                .any(|class| SKIP_INLINE_CLASSES.contains(class)))
        || is(element, "style")
        || is(element, "script")
}

fn render_heading(heading: ElementRef<'_>, lines: &mut Vec<String>) {
    let text = inline_text(children(heading));
    if text.is_empty() {
        return;
    }

    let level = heading_level(heading).unwrap_or(2);
    lines.push(format!("{} {text}", "#".repeat(level)));
    lines.push(String::new());
}

fn render_paragraph(paragraph: ElementRef<'_>, lines: &mut Vec<String>) {
    let text = inline_text(children(paragraph));
    if !text.is_empty() {
        lines.push(text);
        lines.push(String::new());
    }
}

fn render_list(list: ElementRef<'_>, lines: &mut Vec<String>) {
    let before = lines.len();
    render_list_items(list, 0, lines);

    if lines.len() > before {
        lines.push(String::new());
    }
}

fn render_list_items(list: ElementRef<'_>, indent: usize, lines: &mut Vec<String>) {
    let ordered = is(list, "ol");

    for (index, item) in child_elements(list).filter(|e| is(*e, "li")).enumerate() {
        let (sub_lists, inline): (Vec<Child>, Vec<Child>) = children(item).partition(
            |child| matches!(child, Child::Element(e) if is(*e, "ul") || is(*e, "ol")),
        );

        let text = inline_text(inline);
        if !text.is_empty() {
            let marker = if ordered {
                format!("{}.", index + 1)
            } else {
                "-".to_string()
            };
            lines.push(format!("{}{marker} {text}", "  ".repeat(indent)));
        }

        for sub_list in sub_lists {
            if let Child::Element(sub_list) = sub_list {
                render_list_items(sub_list, (indent + 1).min(MAX_LIST_INDENT), lines);
            }
        }
    }
}

fn render_code_block(pre: ElementRef<'_>, lines: &mut Vec<String>) {
    let code = pre.text().collect::<String>();

    lines.push("```".to_string());
    lines.push(code.trim_end_matches('\n').to_string());
    lines.push("```".to_string());
    lines.push(String::new());
}

fn render_blockquote(quote: ElementRef<'_>, lines: &mut Vec<String>) {
    let before = lines.len();

    for child in children(quote) {
        let text = match child {
            Child::Element(element) if is(element, "p") => inline_text(children(element)),
            other => inline_text([other]),
        };
        if !text.is_empty() {
            lines.push(format!("> {text}"));
        }
    }

    if lines.len() > before {
        lines.push(String::new());
    }
}

/// Renders inline nodes to a single trimmed Markdown line.
fn inline_text<'a>(nodes: impl IntoIterator<Item = Child<'a>>) -> String {
    let rendered = nodes.into_iter().map(render_inline).collect::<String>();
    collapse_whitespace(&rendered)
}

fn render_inline(node: Child<'_>) -> String {
    let element = match node {
        Child::Text(text) => return text.to_string(),
        Child::Element(element) => element,
    };

    if is_skipped_inline(element) {
        return String::new();
    }

    if is(element, "br") {
        return " ".to_string();
    }

    let inner = children(element).map(render_inline).collect::<String>();
    if inner.trim().is_empty() {
        return inner;
    }

    match element.value().name() {
        "b" | "strong" => mark(&inner, "**", "**"),
        "i" | "em" => mark(&inner, "*", "*"),
        "code" => mark(&inner, "`", "`"),
        "a" => match element.value().attr("href") {
            Some(href) if !href.is_empty() => mark(&inner, "[", &format!("]({href})")),
            _ => inner,
        },
        _ => inner,
    }
}

/// Wraps the text in markers, keeping its surrounding whitespace outside them.
fn mark(inner: &str, open: &str, close: &str) -> String {
    let leading = &inner[..inner.len() - inner.trim_start().len()];
    let trailing = &inner[inner.trim_end().len()..];

    format!("{leading}{open}{}{close}{trailing}", inner.trim())
}

/// Text of a heading without edit links or reference markers.
fn plain_text(element: ElementRef<'_>) -> String {
    fn collect(node: Child<'_>, text: &mut String) {
        match node {
            Child::Text(value) => text.push_str(value),
            Child::Element(element) if !is_skipped_inline(element) => {
                children(element).for_each(|child| collect(child, text))
            }
            Child::Element(_) => {}
        }
    }

    let mut text = String::new();
    children(element).for_each(|child| collect(child, &mut text));
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
