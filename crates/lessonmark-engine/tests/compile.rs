use lessonmark_engine::{
    BlockKind, CompileError, CompileOptions, InlineSpan, MediaVariant, Node, SizeVariant,
    UnclosedOpen, compile_all, compile_document,
};
use pretty_assertions::assert_eq;

const LESSON: &str = "\
---
title: 旧石器時代
overview: 日本列島に人が住み始めた頃
---
## 旧石器時代の暮らし

:::top
約1万年前まで[[氷河時代]]が続いた。
==[[更新世|こうしんせい]]の終わり==に海面が上がった。
:::lead
大陸と陸続きだった
:::

:::gazo{size=\"half\"}
![ナウマンゾウ](naumann.png)
![オオツノジカ](otsunojika.png)
大型動物
:::
:::explanation
人々は大型動物を追って移動した。
:::

### 打製石器

:::middle
**{{打製石器|だせいせっき}}**を使った。
:::

## 縄文時代

:::list
:::lead
土器の特徴
:::
- 厚手
- 黒褐色
:::
";

fn compile(src: &str) -> Result<lessonmark_engine::CompiledDocument, CompileError> {
    compile_document(src, &CompileOptions::default())
}

/// Top-level kinds, with media reported by variant.
fn top_kinds(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|n| match n {
            Node::Block(b) => match &b.kind {
                BlockKind::Heading { depth } => format!("h{depth}"),
                kind => kind.directive_name().unwrap_or("block").to_string(),
            },
            Node::Media(m) => m.variant.class().to_string(),
            Node::Inline(_) => "inline".to_string(),
        })
        .collect()
}

#[test]
fn full_lesson_compiles() {
    let doc = compile(LESSON).unwrap();

    assert_eq!(doc.frontmatter.title.as_deref(), Some("旧石器時代"));
    assert_eq!(
        top_kinds(&doc.body),
        vec!["h2", "top", "lead", "gazo", "h3", "middle", "h2", "list"]
    );

    let toc = doc.toc.unwrap();
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].text, "旧石器時代の暮らし");
    assert_eq!(toc[0].children[0].id, "chapter-2");
    assert_eq!(toc[1].id, "chapter-3");
}

#[test]
fn toc_needs_three_headings() {
    let doc = compile("## 一\n\n## 二").unwrap();
    assert_eq!(doc.toc, None);

    let doc = compile("## 一\n\n## 二\n\n### 三").unwrap();
    let ids: Vec<_> = doc
        .toc
        .unwrap()
        .iter()
        .flat_map(|e| std::iter::once(e.id.clone()).chain(e.children.iter().map(|c| c.id.clone())))
        .collect();
    assert_eq!(ids, vec!["chapter-1", "chapter-2", "chapter-3"]);
}

#[test]
fn term_with_reading_is_ruby() {
    let doc = compile("[[更新世|こうしんせい]]").unwrap();
    let paragraph = doc.body[0].as_block().unwrap();
    assert_eq!(
        paragraph.children,
        vec![Node::Inline(InlineSpan::Term {
            children: vec![InlineSpan::ruby("更新世", "こうしんせい")]
        })]
    );
}

#[test]
fn marker_around_term() {
    let doc = compile("==[[氷河時代]]を含む==").unwrap();
    let paragraph = doc.body[0].as_block().unwrap();
    assert_eq!(
        paragraph.children,
        vec![Node::Inline(InlineSpan::Marker {
            children: vec![
                InlineSpan::Term {
                    children: vec![InlineSpan::text("氷河時代")]
                },
                InlineSpan::text("を含む"),
            ]
        })]
    );
}

#[test]
fn half_gazo_with_two_images() {
    let doc = compile(":::gazo{size=\"half\"}\n![](a.png)\n![](b.png)\n:::").unwrap();
    assert_eq!(doc.body.len(), 1);
    let media = doc.body[0].as_media().unwrap();
    assert_eq!(media.variant, MediaVariant::Gazo);
    assert_eq!(media.images.len(), 2);
    assert!(media.images.iter().all(|i| i.size == SizeVariant::Half));
}

#[test]
fn unclosed_top_cites_line_one() {
    assert_eq!(
        compile(":::top\ntext"),
        Err(CompileError::UnclosedDirective {
            open: vec![UnclosedOpen {
                name: "top".into(),
                line: 1
            }]
        })
    );
}

#[test]
fn unclosed_line_counts_frontmatter() {
    let err = compile("---\ntitle: x\n---\n\n:::middle\ntext").unwrap_err();
    assert_eq!(err.lines(), vec![5]);
}

#[test]
fn stray_close_is_reported() {
    assert_eq!(
        compile("本文\n:::"),
        Err(CompileError::UnexpectedClose { line: 2 })
    );
}

#[test]
fn explanation_is_absorbed_into_caption() {
    let doc = compile(LESSON).unwrap();
    let media = doc.body[3].as_media().unwrap();
    assert_eq!(
        media.caption,
        vec![
            InlineSpan::text("大型動物"),
            InlineSpan::LineBreak,
            InlineSpan::text("人々は大型動物を追って移動した。"),
        ]
    );
    assert!(
        !doc.body
            .iter()
            .filter_map(Node::as_block)
            .any(|b| b.kind == BlockKind::Explanation)
    );
}

#[test]
fn concurrent_compiles_do_not_share_state() {
    let sources: Vec<String> = (0..64)
        .map(|i| {
            let headings = 1 + i % 5;
            (0..headings).map(|h| format!("## {i}-{h}\n\n")).collect()
        })
        .collect();
    let options = CompileOptions::default();

    let shared = &options;
    let threaded: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|s| scope.spawn(move || compile_document(s, shared)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let pooled = compile_all(&sources, &options);
    let sequential: Vec<_> = sources
        .iter()
        .map(|s| compile_document(s, &options))
        .collect();

    assert_eq!(threaded, sequential);
    assert_eq!(pooled, sequential);

    for (i, result) in sequential.iter().enumerate() {
        let doc = result.as_ref().unwrap();
        let ids: Vec<_> = doc
            .body
            .iter()
            .filter_map(Node::as_block)
            .filter_map(|b| b.attribute("id"))
            .collect();
        let expected: Vec<_> = (1..=1 + i % 5).map(|n| format!("chapter-{n}")).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn serializes_to_json() {
    let doc = compile("## 見出し\n\n{{卑弥呼|ひみこ}}").unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["body"][0]["block"]["kind"], "heading");
    assert_eq!(json["body"][0]["block"]["depth"], 2);
    assert_eq!(json["body"][0]["block"]["attributes"]["id"], "chapter-1");
    assert_eq!(
        json["body"][1]["block"]["children"][0]["inline"]["ruby"]["reading"],
        "ひみこ"
    );
    assert!(json.get("toc").is_none());
}
