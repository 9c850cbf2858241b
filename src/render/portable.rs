//! Rich-text block rendering.
//!
//! The store's rich-text format is a flat array of blocks; list items are
//! blocks with a `listItem` kind rather than nested structures, so rendering
//! groups consecutive list blocks into a single `<ul>`/`<ol>`. Only the
//! subset the site's editors produce is supported: paragraph styles,
//! headings h1–h4, blockquotes, bullet/number lists, and bold/italic spans.
//! Unknown styles fall back to paragraphs.

use maud::{Markup, html};

use crate::content::types::{Block, Span};

/// Render a block sequence to HTML.
pub fn render_blocks(blocks: &[Block]) -> Markup {
    let mut out: Vec<Markup> = Vec::new();
    let mut list: Vec<&Block> = Vec::new();
    let mut list_kind = "";

    for block in blocks {
        match block.list_item.as_deref() {
            Some(kind) => {
                if !list.is_empty() && kind != list_kind {
                    out.push(render_list(list_kind, &list));
                    list.clear();
                }
                list_kind = kind;
                list.push(block);
            }
            None => {
                if !list.is_empty() {
                    out.push(render_list(list_kind, &list));
                    list.clear();
                }
                out.push(render_block(block));
            }
        }
    }
    if !list.is_empty() {
        out.push(render_list(list_kind, &list));
    }

    html! {
        @for piece in &out { (piece) }
    }
}

fn render_list(kind: &str, items: &[&Block]) -> Markup {
    let entries = html! {
        @for item in items {
            li { (render_spans(&item.children)) }
        }
    };
    match kind {
        "number" => html! { ol { (entries) } },
        _ => html! { ul { (entries) } },
    }
}

fn render_block(block: &Block) -> Markup {
    let spans = render_spans(&block.children);
    match block.style.as_str() {
        "h1" => html! { h1 { (spans) } },
        "h2" => html! { h2 { (spans) } },
        "h3" => html! { h3 { (spans) } },
        "h4" => html! { h4 { (spans) } },
        "blockquote" => html! { blockquote { (spans) } },
        _ => html! { p { (spans) } },
    }
}

fn render_spans(spans: &[Span]) -> Markup {
    html! {
        @for span in spans { (render_span(span)) }
    }
}

fn render_span(span: &Span) -> Markup {
    let strong = span.marks.iter().any(|m| m == "strong");
    let em = span.marks.iter().any(|m| m == "em");
    match (strong, em) {
        (true, true) => html! { strong { em { (span.text) } } },
        (true, false) => html! { strong { (span.text) } },
        (false, true) => html! { em { (span.text) } },
        (false, false) => html! { (span.text) },
    }
}
