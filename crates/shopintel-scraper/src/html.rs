//! Small helpers over `scraper` shared by the HTML extractors.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text is never rendered.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses a CSS selector, logging and skipping it when invalid.
pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(css, error = %e, "invalid CSS selector");
            None
        }
    }
}

/// `href` values of every anchor, in document order.
pub(crate) fn anchor_hrefs(document: &Html) -> Vec<&str> {
    let Some(anchors) = selector("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .collect()
}

/// First descendant of `element` matching `css`.
pub(crate) fn select_first<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    element.select(&sel).next()
}

/// Text of an element with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rendered text of the whole document, one space between text nodes.
pub(crate) fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        let trimmed = text.trim();
        if hidden || trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let doc = Html::parse_document(
            r#"<html><head><style>.a{color:red}</style><script>var email="x@y.com";</script></head>
               <body><p>Hello</p><p>World</p><noscript>enable js</noscript></body></html>"#,
        );
        assert_eq!(visible_text(&doc), "Hello World");
    }

    #[test]
    fn anchor_hrefs_in_document_order() {
        let doc = Html::parse_document(
            r#"<a href="/one">1</a><a>no href</a><a href=" /two ">2</a>"#,
        );
        assert_eq!(anchor_hrefs(&doc), vec!["/one", "/two"]);
    }

    #[test]
    fn element_text_collapses_whitespace() {
        let doc = Html::parse_fragment("<div>  Cozy \n  <b>Candle</b>\t</div>");
        let div = select_first(doc.root_element(), "div").unwrap();
        assert_eq!(element_text(div), "Cozy Candle");
    }

    #[test]
    fn invalid_selector_is_skipped() {
        assert!(selector("[[[").is_none());
    }
}
