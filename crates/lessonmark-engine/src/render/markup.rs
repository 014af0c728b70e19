use std::collections::BTreeMap;

use crate::parsing::{
    CompiledDocument,
    blocks::{BlockKind, BlockNode, kinds::Directive},
    inline::{InlineSpan, kinds::Construct},
    media::MediaNode,
    node::Node,
};

/// Writes a document back as lesson source, frontmatter included.
pub fn to_source(doc: &CompiledDocument) -> String {
    let mut out = String::new();
    let fm = &doc.frontmatter;
    if fm.title.is_some() || fm.overview.is_some() || !fm.extra.is_empty() {
        match serde_yaml::to_string(fm) {
            Ok(yaml) => {
                out.push_str("---\n");
                out.push_str(&yaml);
                if !yaml.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str("---\n");
            }
            Err(e) => log::warn!("frontmatter not serializable, omitted: {e}"),
        }
    }
    out.push_str(&to_markup(&doc.body));
    out
}

/// Writes nodes as directive markup.
///
/// Every container gets an explicit `:::` close, so re-parsing the output
/// yields the same block kinds at the same nesting depth.
pub fn to_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[Node], out: &mut String) {
    let mut run: Vec<&InlineSpan> = vec![];
    for node in nodes {
        match node {
            Node::Inline(span) => run.push(span),
            Node::Block(block) => {
                flush_run(&mut run, out);
                write_block(block, out);
            }
            Node::Media(media) => {
                flush_run(&mut run, out);
                write_media(media, out);
            }
        }
    }
    flush_run(&mut run, out);
}

fn flush_run(run: &mut Vec<&InlineSpan>, out: &mut String) {
    if run.is_empty() {
        return;
    }
    for span in run.drain(..) {
        write_span(span, out);
    }
    out.push_str("\n\n");
}

fn write_block(block: &BlockNode, out: &mut String) {
    match &block.kind {
        BlockKind::Heading { depth } => {
            out.push_str(&"#".repeat(usize::from(*depth)));
            out.push(' ');
            write_inline_children(&block.children, out);
            out.push_str("\n\n");
        }
        BlockKind::Paragraph => {
            write_inline_children(&block.children, out);
            out.push_str("\n\n");
        }
        BlockKind::RawList { ordered } => {
            for (i, item) in block.child_blocks().enumerate() {
                if *ordered {
                    out.push_str(&format!("{}. ", i + 1));
                } else {
                    out.push_str("- ");
                }
                // Continuation lines must stay indented under the item.
                let mut text = String::new();
                write_inline_children(&item.children, &mut text);
                out.push_str(&text.replace('\n', "\n  "));
                out.push('\n');
            }
            out.push('\n');
        }
        kind => {
            let name = kind.directive_name().unwrap_or("block");
            out.push_str(Directive::CONTAINER);
            out.push_str(name);
            write_attributes(&block.attributes, out);
            out.push('\n');
            write_nodes(&block.children, out);
            out.push_str(Directive::CONTAINER);
            out.push_str("\n\n");
        }
    }
}

fn write_media(media: &MediaNode, out: &mut String) {
    out.push_str(Directive::CONTAINER);
    out.push_str(media.variant.class());
    if let Some(size) = media.size.as_str() {
        out.push_str(&format!("{{size=\"{size}\"}}"));
    }
    out.push('\n');
    for image in &media.images {
        out.push_str(&format!("![{}]({})\n", image.alt, image.path));
    }
    if !media.caption.is_empty() {
        for span in &media.caption {
            write_span(span, out);
        }
        out.push('\n');
    }
    out.push_str(Directive::CONTAINER);
    out.push_str("\n\n");
}

fn write_attributes(attributes: &BTreeMap<String, String>, out: &mut String) {
    if attributes.is_empty() {
        return;
    }
    let parts: Vec<String> = attributes
        .iter()
        .map(|(k, v)| {
            if v.contains('"') {
                format!("{k}='{v}'")
            } else {
                format!("{k}=\"{v}\"")
            }
        })
        .collect();
    out.push('{');
    out.push_str(&parts.join(" "));
    out.push('}');
}

fn write_inline_children(children: &[Node], out: &mut String) {
    for span in children.iter().filter_map(Node::as_inline) {
        write_span(span, out);
    }
}

fn write_span(span: &InlineSpan, out: &mut String) {
    match span {
        InlineSpan::Text(t) => out.push_str(t),
        InlineSpan::Term { children } => match children.as_slice() {
            [InlineSpan::Ruby { base, reading }] => {
                out.push_str(&format!(
                    "{}{base}|{reading}{}",
                    Construct::Term.open(),
                    Construct::Term.close()
                ));
            }
            _ => write_wrapped(Construct::Term, children, out),
        },
        InlineSpan::Marker { children } => write_wrapped(Construct::Marker, children, out),
        InlineSpan::Emphasis { children } => write_wrapped(Construct::Emphasis, children, out),
        InlineSpan::Ruby { base, reading } => {
            out.push_str(&format!(
                "{}{base}|{reading}{}",
                Construct::Ruby.open(),
                Construct::Ruby.close()
            ));
        }
        InlineSpan::Image { alt, src } => out.push_str(&format!("![{alt}]({src})")),
        InlineSpan::LineBreak => out.push('\n'),
    }
}

fn write_wrapped(c: Construct, children: &[InlineSpan], out: &mut String) {
    out.push_str(c.open());
    for child in children {
        write_span(child, out);
    }
    out.push_str(c.close());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{CompileOptions, compile_document, parse_blocks};
    use pretty_assertions::assert_eq;

    fn reparse(nodes: &[Node]) -> Vec<Node> {
        parse_blocks(&to_markup(nodes), 1).unwrap()
    }

    #[test]
    fn directives_get_explicit_closes() {
        let nodes = parse_blocks(":::top\n本文\n:::lead\n導入\n:::", 1).unwrap();
        assert_eq!(
            to_markup(&nodes),
            ":::top\n本文\n\n:::lead\n導入\n\n:::\n\n:::\n\n"
        );
    }

    #[test]
    fn inline_constructs_are_written_back() {
        let doc = compile_document(
            "==[[氷河時代]]を含む==と**{{卑弥呼|ひみこ}}**と[[更新世|こうしんせい]]",
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(
            to_markup(&doc.body),
            "==[[氷河時代]]を含む==と**{{卑弥呼|ひみこ}}**と[[更新世|こうしんせい]]\n\n"
        );
    }

    #[test]
    fn attributes_round_trip() {
        let nodes = parse_blocks(":::column{.wide #c1 note='say \"hi\"'}\nx\n:::", 1).unwrap();
        assert_eq!(reparse(&nodes), nodes);
    }

    #[test]
    fn media_is_written_as_gazo() {
        let doc = compile_document(
            ":::gazo-center{size=\"twice\"}\n![埴輪](a.png)\n写真\n:::",
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(
            to_markup(&doc.body),
            ":::gazo-center{size=\"twice\"}\n![埴輪](a.png)\n写真\n:::\n\n"
        );
    }

    #[test]
    fn size_is_written_without_images() {
        let doc = compile_document(
            ":::gazo{size=\"half\"}\n![](placeholder.png)\n準備中\n:::",
            &CompileOptions::default(),
        )
        .unwrap();
        assert_eq!(
            to_markup(&doc.body),
            ":::gazo{size=\"half\"}\n準備中\n:::\n\n"
        );
    }

    #[test]
    fn raw_list_continuations_stay_indented() {
        let nodes = parse_blocks("- a\n  続き\n- b", 1).unwrap();
        assert_eq!(to_markup(&nodes), "- a\n  続き\n- b\n\n");
    }

    #[test]
    fn source_includes_frontmatter() {
        let doc = compile_document("---\ntitle: Yayoi\n---\n本文", &CompileOptions::default())
            .unwrap();
        assert_eq!(to_source(&doc), "---\ntitle: Yayoi\n---\n本文\n\n");
    }
}
