use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::parsing::{
    CompiledDocument,
    blocks::{BlockKind, BlockNode},
    inline::InlineSpan,
    media::MediaNode,
    node::Node,
    toc::TocEntry,
};

/// Renders the body nodes of a compiled document.
pub fn render_body(nodes: &[Node]) -> String {
    let mut out = String::new();
    nodes_html(nodes, &mut out);
    out
}

/// `<nav class="toc">` with nested ordered lists linking to `#chapter-N`.
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut out = String::from("<nav class=\"toc\">\n");
    toc_list(entries, &mut out);
    out.push_str("</nav>\n");
    out
}

/// A standalone HTML page for a compiled lesson.
pub fn render_document(doc: &CompiledDocument) -> String {
    let title = doc.frontmatter.title.as_deref().unwrap_or_default();
    let mut out = page_head(title);

    if !title.is_empty() || doc.frontmatter.overview.is_some() {
        out.push_str("<header>\n");
        if !title.is_empty() {
            out.push_str(&format!("<h1>{}</h1>\n", encode_text(title)));
        }
        if let Some(overview) = &doc.frontmatter.overview {
            out.push_str(&format!(
                "<p class=\"overview\">{}</p>\n",
                encode_text(overview)
            ));
        }
        out.push_str("</header>\n");
    }
    if let Some(toc) = &doc.toc {
        out.push_str(&render_toc(toc));
    }
    out.push_str("<main>\n");
    nodes_html(&doc.body, &mut out);
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

/// The page shown in place of a lesson whose source did not compile.
pub fn render_failure(name: &str, error: &dyn fmt::Display) -> String {
    let mut out = page_head(name);
    out.push_str("<main class=\"compile-error\">\n");
    out.push_str("<h1>content failed to compile</h1>\n");
    out.push_str(&format!("<p>{}</p>\n", encode_text(name)));
    out.push_str(&format!("<pre>{}</pre>\n", encode_text(&error.to_string())));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn page_head(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n",
        encode_text(title)
    )
}

fn toc_list(entries: &[TocEntry], out: &mut String) {
    out.push_str("<ol>\n");
    for entry in entries {
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            encode_double_quoted_attribute(&entry.id),
            encode_text(&entry.text)
        ));
        if !entry.children.is_empty() {
            out.push('\n');
            toc_list(&entry.children, out);
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n");
}

fn nodes_html(nodes: &[Node], out: &mut String) {
    let mut inline_run = false;
    for node in nodes {
        match node {
            Node::Inline(span) => {
                span_html(span, out);
                inline_run = true;
            }
            Node::Block(block) => {
                if inline_run {
                    out.push('\n');
                    inline_run = false;
                }
                block_html(block, out);
            }
            Node::Media(media) => {
                if inline_run {
                    out.push('\n');
                    inline_run = false;
                }
                media_html(media, out);
            }
        }
    }
    if inline_run {
        out.push('\n');
    }
}

fn block_html(block: &BlockNode, out: &mut String) {
    match &block.kind {
        BlockKind::Heading { depth } => {
            out.push_str(&format!("<h{depth}"));
            if let Some(id) = block.attribute("id") {
                push_attr(out, "id", id);
            }
            out.push('>');
            inline_children(&block.children, out);
            out.push_str(&format!("</h{depth}>\n"));
        }
        BlockKind::Paragraph => {
            out.push_str("<p>");
            inline_children(&block.children, out);
            out.push_str("</p>\n");
        }
        BlockKind::RawList { ordered } => {
            let tag = if *ordered { "ol" } else { "ul" };
            out.push_str(&format!("<{tag}>\n"));
            for item in block.child_blocks() {
                out.push_str("<li>");
                inline_children(&item.children, out);
                out.push_str("</li>\n");
            }
            out.push_str(&format!("</{tag}>\n"));
        }
        kind => {
            let mut classes = vec![kind.directive_name().unwrap_or("block").to_string()];
            if *kind == BlockKind::List && block.child_blocks().any(|b| b.kind == BlockKind::Lead)
            {
                classes.push("en".to_string());
            }
            if let Some(extra) = block.attribute("class") {
                classes.extend(extra.split_whitespace().map(str::to_string));
            }
            out.push_str("<div");
            push_attr(out, "class", &classes.join(" "));
            if let Some(id) = block.attribute("id") {
                push_attr(out, "id", id);
            }
            out.push_str(">\n");
            nodes_html(&block.children, out);
            out.push_str("</div>\n");
        }
    }
}

fn media_html(media: &MediaNode, out: &mut String) {
    let mut class = media.variant.class().to_string();
    if let Some(size) = media.size.class() {
        class.push(' ');
        class.push_str(&size);
    }
    out.push_str("<figure");
    push_attr(out, "class", &class);
    out.push_str(">\n");
    for image in &media.images {
        img_html(&image.path, &image.alt, out);
        out.push('\n');
    }
    if !media.caption.is_empty() {
        out.push_str("<figcaption>");
        for span in &media.caption {
            span_html(span, out);
        }
        out.push_str("</figcaption>\n");
    }
    out.push_str("</figure>\n");
}

/// Inline content of a heading, paragraph or list item.
fn inline_children(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Inline(span) => span_html(span, out),
            other => nodes_html(std::slice::from_ref(other), out),
        }
    }
}

fn span_html(span: &InlineSpan, out: &mut String) {
    match span {
        InlineSpan::Text(t) => out.push_str(&encode_text(t)),
        InlineSpan::Term { children } => wrapped("span", "all", children, out),
        InlineSpan::Marker { children } => wrapped("span", "marker", children, out),
        InlineSpan::Emphasis { children } => wrapped("strong", "red", children, out),
        InlineSpan::Ruby { base, reading } => {
            out.push_str(&format!(
                "<ruby>{}<rp>(</rp><rt>{}</rt><rp>)</rp></ruby>",
                encode_text(base),
                encode_text(reading)
            ));
        }
        InlineSpan::Image { alt, src } => img_html(src, alt, out),
        InlineSpan::LineBreak => out.push_str("<br>"),
    }
}

fn wrapped(tag: &str, class: &str, children: &[InlineSpan], out: &mut String) {
    out.push_str(&format!("<{tag} class=\"{class}\">"));
    for child in children {
        span_html(child, out);
    }
    out.push_str(&format!("</{tag}>"));
}

fn img_html(src: &str, alt: &str, out: &mut String) {
    out.push_str("<img");
    push_attr(out, "src", src);
    push_attr(out, "alt", alt);
    out.push('>');
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!(
        " {name}=\"{}\"",
        encode_double_quoted_attribute(value)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{CompileOptions, compile_document};
    use pretty_assertions::assert_eq;

    fn body(src: &str) -> String {
        let doc = compile_document(src, &CompileOptions::default()).unwrap();
        render_body(&doc.body)
    }

    #[test]
    fn term_with_ruby() {
        assert_eq!(
            body("[[更新世|こうしんせい]]"),
            "<p><span class=\"all\"><ruby>更新世<rp>(</rp><rt>こうしんせい</rt><rp>)</rp></ruby></span></p>\n"
        );
    }

    #[test]
    fn marker_and_red_emphasis() {
        assert_eq!(
            body("==重要==と**注意**"),
            "<p><span class=\"marker\">重要</span>と<strong class=\"red\">注意</strong></p>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(body("a < b & c"), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn line_breaks_inside_paragraph() {
        assert_eq!(body("一行目\n二行目"), "<p>一行目<br>二行目</p>\n");
    }

    #[test]
    fn sections_are_divs_with_their_class() {
        assert_eq!(
            body(":::top\n本文\n:::lead\n導入\n:::"),
            "<div class=\"top\">\n本文\n</div>\n<div class=\"lead\">\n導入\n</div>\n"
        );
    }

    #[test]
    fn list_with_lead_gets_en() {
        let html = body(":::list\n:::lead\nx\n:::\n:::");
        assert!(html.starts_with("<div class=\"list en\">"), "{html}");
        let html = body(":::list\nx\n:::");
        assert!(html.starts_with("<div class=\"list\">"), "{html}");
    }

    #[test]
    fn directive_class_and_id_attributes() {
        let html = body(":::column{.wide #c1}\nx\n:::");
        assert!(html.starts_with("<div class=\"column wide\" id=\"c1\">"), "{html}");
    }

    #[test]
    fn media_figure_with_size_and_caption() {
        assert_eq!(
            body(":::gazo{size=\"half\"}\n![土器](a.png)\n縄文土器\n:::"),
            "<figure class=\"gazo size-half\">\n<img src=\"a.png\" alt=\"土器\">\n<figcaption>縄文土器</figcaption>\n</figure>\n"
        );
    }

    #[test]
    fn figure_keeps_size_when_images_are_dropped() {
        assert_eq!(
            body(":::gazo{size=\"quarter\"}\n![](now_loading.png)\n準備中\n:::"),
            "<figure class=\"gazo size-quarter\">\n<figcaption>準備中</figcaption>\n</figure>\n"
        );
    }

    #[test]
    fn unmerged_explanation_keeps_its_class() {
        let html = body(":::explanation\n解説\n:::");
        assert_eq!(html, "<div class=\"explanation\">\n解説\n</div>\n");
    }

    #[test]
    fn headings_carry_chapter_ids() {
        assert_eq!(
            body("## 一\n### 二"),
            "<h2 id=\"chapter-1\">一</h2>\n<h3 id=\"chapter-2\">二</h3>\n"
        );
    }

    #[test]
    fn raw_lists() {
        assert_eq!(body("1. a\n2. b"), "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n");
    }

    #[test]
    fn toc_nav() {
        let doc =
            compile_document("## 一\n### 二\n## 三", &CompileOptions::default()).unwrap();
        assert_eq!(
            render_toc(doc.toc.as_deref().unwrap()),
            "<nav class=\"toc\">\n<ol>\n\
             <li><a href=\"#chapter-1\">一</a>\n<ol>\n<li><a href=\"#chapter-2\">二</a></li>\n</ol>\n</li>\n\
             <li><a href=\"#chapter-3\">三</a></li>\n\
             </ol>\n</nav>\n"
        );
    }

    #[test]
    fn document_page_has_title_and_overview() {
        let doc = compile_document(
            "---\ntitle: 旧石器時代\noverview: 概要\n---\n本文",
            &CompileOptions::default(),
        )
        .unwrap();
        let html = render_document(&doc);
        assert!(html.contains("<title>旧石器時代</title>"));
        assert!(html.contains("<p class=\"overview\">概要</p>"));
        assert!(html.contains("<main>\n<p>本文</p>\n</main>"));
        assert!(!html.contains("class=\"toc\""));
    }

    #[test]
    fn failure_page_shows_the_error() {
        let err = compile_document(":::top\ntext", &CompileOptions::default()).unwrap_err();
        let html = render_failure("history/3", &err);
        assert!(html.contains("content failed to compile"));
        assert!(html.contains(":::top (line 1)"));
    }
}
