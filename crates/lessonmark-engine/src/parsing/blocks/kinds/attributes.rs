use std::collections::BTreeMap;

use crate::parsing::cursor::Cursor;

pub const OPEN: char = '{';
pub const CLOSE: char = '}';

/// Parses a directive attribute block such as
/// `{size="half", .wide #fig-1 caption='x'}`.
///
/// The cursor must sit on the opening `{`. On success the cursor is left
/// after the closing `}`. Returns `None` (cursor untouched) for a malformed
/// block, in which case the whole line is ordinary text.
///
/// `.name` appends to `class` (space separated), `#name` sets `id`.
pub fn parse(cur: &mut Cursor<'_>) -> Option<BTreeMap<String, String>> {
    let saved = cur.clone();
    let attrs = parse_inner(cur);
    if attrs.is_none() {
        *cur = saved;
    }
    attrs
}

fn parse_inner(cur: &mut Cursor<'_>) -> Option<BTreeMap<String, String>> {
    if cur.bump() != Some(OPEN) {
        return None;
    }

    let mut attrs = BTreeMap::new();
    loop {
        cur.eat_while(|c| c.is_whitespace() || c == ',');
        match cur.peek()? {
            CLOSE => {
                cur.bump();
                return Some(attrs);
            }
            '.' => {
                cur.bump();
                let class = ident(cur)?;
                attrs
                    .entry("class".to_string())
                    .and_modify(|existing: &mut String| {
                        existing.push(' ');
                        existing.push_str(class);
                    })
                    .or_insert_with(|| class.to_string());
            }
            '#' => {
                cur.bump();
                let id = ident(cur)?;
                attrs.insert("id".to_string(), id.to_string());
            }
            _ => {
                let key = ident(cur)?;
                cur.skip_whitespace();
                let value = if cur.eat("=") {
                    cur.skip_whitespace();
                    value(cur)?
                } else {
                    String::new()
                };
                attrs.insert(key.to_string(), value);
            }
        }
    }
}

fn ident<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let s = cur.eat_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ':'));
    (!s.is_empty()).then_some(s)
}

fn value(cur: &mut Cursor<'_>) -> Option<String> {
    match cur.peek()? {
        quote @ ('"' | '\'') => {
            cur.bump();
            let v = cur.eat_while(|c| c != quote);
            if cur.bump() != Some(quote) {
                return None;
            }
            Some(v.to_string())
        }
        _ => {
            let v = cur.eat_while(|c| !c.is_whitespace() && c != ',' && c != CLOSE);
            (!v.is_empty()).then(|| v.to_string())
        }
    }
}
