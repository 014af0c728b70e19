use std::collections::VecDeque;

use crate::parsing::{context::CompileContext, node::Node};

use super::{kinds::Construct, types::InlineSpan};

/// Expands every run of inline children in a block tree.
///
/// A run is a maximal sequence of adjacent inline siblings; block children
/// end a run, so constructs never match across a block boundary.
pub fn expand_tree(nodes: Vec<Node>, ctx: &mut CompileContext<'_>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut run = vec![];
    for node in nodes {
        match node {
            Node::Inline(span) => run.push(span),
            Node::Block(mut block) => {
                flush_run(&mut run, &mut out, ctx);
                block.children = expand_tree(block.children, ctx);
                out.push(Node::Block(block));
            }
            Node::Media(mut media) => {
                flush_run(&mut run, &mut out, ctx);
                media.caption = expand_inline(media.caption, ctx);
                out.push(Node::Media(media));
            }
        }
    }
    flush_run(&mut run, &mut out, ctx);
    out
}

fn flush_run(run: &mut Vec<InlineSpan>, out: &mut Vec<Node>, ctx: &mut CompileContext<'_>) {
    if run.is_empty() {
        return;
    }
    let spans = expand_inline(std::mem::take(run), ctx);
    out.extend(spans.into_iter().map(Node::Inline));
}

/// Expands all constructs over a sequence of sibling spans.
pub fn expand_inline(spans: Vec<InlineSpan>, ctx: &mut CompileContext<'_>) -> Vec<InlineSpan> {
    expand_with(spans, &Construct::PRECEDENCE, ctx)
}

fn expand_with(
    spans: Vec<InlineSpan>,
    constructs: &[Construct],
    ctx: &mut CompileContext<'_>,
) -> Vec<InlineSpan> {
    let Some((&first, rest)) = constructs.split_first() else {
        return spans;
    };
    let spans = expand_construct(spans, first, rest, ctx);
    expand_with(spans, rest, ctx)
}

/// One left-to-right pass for a single construct.
///
/// Only `Text` spans are scanned for the opener; the closer is searched in
/// the same text first, then in later sibling texts. Spans already built by
/// a higher-precedence construct are carried along into the capture.
fn expand_construct(
    spans: Vec<InlineSpan>,
    c: Construct,
    inner: &[Construct],
    ctx: &mut CompileContext<'_>,
) -> Vec<InlineSpan> {
    let (open, close) = (c.open(), c.close());
    let mut out = Vec::with_capacity(spans.len());
    let mut queue: VecDeque<InlineSpan> = spans.into();

    while let Some(span) = queue.pop_front() {
        let InlineSpan::Text(text) = span else {
            out.push(span);
            continue;
        };
        let Some(open_at) = text.find(open) else {
            push_text(&mut out, &text);
            continue;
        };
        let after = &text[open_at + open.len()..];

        if !has_close(close, after, &queue) {
            ctx.note_unterminated(open);
            push_text(&mut out, &text[..open_at + open.len()]);
            push_front_text(&mut queue, after);
            continue;
        }

        push_text(&mut out, &text[..open_at]);
        let (captured, remainder) = take_capture(after, close, &mut queue);

        if captured.is_empty() {
            push_text(&mut out, open);
            push_text(&mut out, close);
            push_front_text(&mut queue, &remainder);
            continue;
        }

        match c.build(captured, |children| expand_with(children, inner, ctx)) {
            Ok(built) => {
                out.push(built);
                push_front_text(&mut queue, &remainder);
            }
            Err(captured) => {
                // Not this construct after all: the opener is literal and the
                // rest is scanned again.
                push_text(&mut out, open);
                push_front_text(&mut queue, &remainder);
                queue.push_front(InlineSpan::text(close));
                for span in captured.into_iter().rev() {
                    queue.push_front(span);
                }
            }
        }
    }
    out
}

fn has_close(close: &str, after: &str, queue: &VecDeque<InlineSpan>) -> bool {
    after.contains(close)
        || queue
            .iter()
            .any(|s| matches!(s, InlineSpan::Text(t) if t.contains(close)))
}

/// Removes the capture from `after` and the queue. Returns the captured spans
/// and the text left over after the closer.
fn take_capture(
    after: &str,
    close: &str,
    queue: &mut VecDeque<InlineSpan>,
) -> (Vec<InlineSpan>, String) {
    if let Some(pos) = after.find(close) {
        return (text_if_any(&after[..pos]), after[pos + close.len()..].to_string());
    }

    let mut captured = text_if_any(after);
    while let Some(span) = queue.pop_front() {
        match span {
            InlineSpan::Text(t) => match t.find(close) {
                Some(pos) => {
                    captured.extend(text_if_any(&t[..pos]));
                    return (captured, t[pos + close.len()..].to_string());
                }
                None => captured.push(InlineSpan::Text(t)),
            },
            other => captured.push(other),
        }
    }
    (captured, String::new())
}

fn text_if_any(s: &str) -> Vec<InlineSpan> {
    if s.is_empty() {
        vec![]
    } else {
        vec![InlineSpan::text(s)]
    }
}

/// Appends text, merging with a preceding text span.
fn push_text(out: &mut Vec<InlineSpan>, s: &str) {
    if s.is_empty() {
        return;
    }
    if let Some(InlineSpan::Text(last)) = out.last_mut() {
        last.push_str(s);
    } else {
        out.push(InlineSpan::text(s));
    }
}

fn push_front_text(queue: &mut VecDeque<InlineSpan>, s: &str) {
    if !s.is_empty() {
        queue.push_front(InlineSpan::text(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::context::CompileOptions;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn expand(s: &str) -> Vec<InlineSpan> {
        expand_spans(vec![InlineSpan::text(s)])
    }

    fn expand_spans(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
        let options = CompileOptions::default();
        let mut ctx = CompileContext::new(&options);
        expand_inline(spans, &mut ctx)
    }

    fn text(s: &str) -> InlineSpan {
        InlineSpan::text(s)
    }

    fn term(children: Vec<InlineSpan>) -> InlineSpan {
        InlineSpan::Term { children }
    }

    fn marker(children: Vec<InlineSpan>) -> InlineSpan {
        InlineSpan::Marker { children }
    }

    fn emphasis(children: Vec<InlineSpan>) -> InlineSpan {
        InlineSpan::Emphasis { children }
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(expand("旧石器時代の人々"), vec![text("旧石器時代の人々")]);
    }

    #[test]
    fn term_with_reading_wraps_ruby() {
        assert_eq!(
            expand("[[更新世|こうしんせい]]"),
            vec![term(vec![InlineSpan::ruby("更新世", "こうしんせい")])]
        );
    }

    #[test]
    fn plain_term() {
        assert_eq!(
            expand("約1万年前まで[[氷河時代]]だった"),
            vec![
                text("約1万年前まで"),
                term(vec![text("氷河時代")]),
                text("だった"),
            ]
        );
    }

    #[test]
    fn marker_content_is_rescanned() {
        assert_eq!(
            expand("==[[氷河時代]]を含む=="),
            vec![marker(vec![term(vec![text("氷河時代")]), text("を含む")])]
        );
    }

    #[test]
    fn emphasis_wrapping_ruby() {
        assert_eq!(
            expand("**{{卑弥呼|ひみこ}}**"),
            vec![emphasis(vec![InlineSpan::ruby("卑弥呼", "ひみこ")])]
        );
    }

    #[test]
    fn plain_emphasis() {
        assert_eq!(
            expand("これは**重要**です"),
            vec![text("これは"), emphasis(vec![text("重要")]), text("です")]
        );
    }

    #[test]
    fn standalone_ruby() {
        assert_eq!(
            expand("{{邪馬台国|やまたいこく}}の女王"),
            vec![InlineSpan::ruby("邪馬台国", "やまたいこく"), text("の女王")]
        );
    }

    #[test]
    fn term_around_ruby_keeps_expanded_child() {
        assert_eq!(
            expand("[[{{打製|だせい}}石器]]"),
            vec![term(vec![InlineSpan::ruby("打製", "だせい"), text("石器")])]
        );
    }

    #[test]
    fn term_spans_an_expanded_marker() {
        assert_eq!(
            expand("[[前 ==中== 後]]"),
            vec![term(vec![text("前 "), marker(vec![text("中")]), text(" 後")])]
        );
    }

    #[test]
    fn marker_matches_across_sibling_nodes() {
        let spans = vec![
            text("==前半"),
            InlineSpan::LineBreak,
            text("後半==の後"),
        ];
        assert_eq!(
            expand_spans(spans),
            vec![
                marker(vec![text("前半"), InlineSpan::LineBreak, text("後半")]),
                text("の後"),
            ]
        );
    }

    #[test]
    fn term_matches_across_an_image() {
        let image = InlineSpan::Image {
            alt: "".into(),
            src: "a.png".into(),
        };
        let spans = vec![text("[[a"), image.clone(), text("b]]")];
        assert_eq!(
            expand_spans(spans),
            vec![term(vec![text("a"), image, text("b")])]
        );
    }

    #[test]
    fn several_constructs_in_one_line() {
        assert_eq!(
            expand("==[[縄文土器]]==と**[[弥生土器|やよいどき]]**"),
            vec![
                marker(vec![term(vec![text("縄文土器")])]),
                text("と"),
                emphasis(vec![term(vec![InlineSpan::ruby("弥生土器", "やよいどき")])]),
            ]
        );
    }

    #[rstest]
    #[case("[[閉じない")]
    #[case("==閉じない")]
    #[case("**閉じない")]
    #[case("{{閉じない|よみ")]
    #[case("{{よみなし}}")]
    #[case("{{|よみ}}")]
    #[case("====")]
    #[case("[[]]")]
    #[case("a ]] b")]
    fn malformed_constructs_stay_literal(#[case] s: &str) {
        assert_eq!(expand(s), vec![text(s)]);
    }

    #[test]
    fn unterminated_opener_does_not_block_later_constructs() {
        assert_eq!(
            expand("[[閉じない {{卑弥呼|ひみこ}}"),
            vec![text("[[閉じない "), InlineSpan::ruby("卑弥呼", "ひみこ")]
        );
    }

    #[test]
    fn failed_ruby_lets_next_one_match() {
        assert_eq!(
            expand("{{a}}{{b|c}}"),
            vec![text("{{a}}"), InlineSpan::ruby("b", "c")]
        );
    }

    #[test]
    fn unterminated_constructs_are_counted() {
        let options = CompileOptions::default();
        let mut ctx = CompileContext::new(&options);
        expand_inline(vec![text("[[a ==b")], &mut ctx);
        assert_eq!(ctx.stats().unterminated_inline, 2);
    }

    #[test]
    fn tree_runs_stop_at_blocks() {
        use crate::parsing::blocks::{BlockKind, BlockNode};

        let options = CompileOptions::default();
        let mut ctx = CompileContext::new(&options);
        let nodes = vec![
            Node::Inline(text("==a")),
            Node::Block(BlockNode::new(BlockKind::Arrow, 2)),
            Node::Inline(text("b==")),
        ];
        let out = expand_tree(nodes.clone(), &mut ctx);
        assert_eq!(out, nodes);
    }
}
