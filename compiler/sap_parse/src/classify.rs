//! The built-in classifier rules.
//!
//! Each rule inspects one verbatim word and either produces a value or
//! declines. Order is priority: literals first, marker prefixes next, type
//! shorthands after, qualified paths last. A word no rule claims becomes a
//! plain identifier, so there is no such thing as an unclassifiable word.

use sap_ir::Value;

use crate::markers;
use crate::rules::{Rule, RuleSet};
use crate::splitter::{find_balanced, split_unquoted};

/// The built-in rule chain, in priority order.
pub(crate) fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::builtin("keyword", keyword),
        Rule::builtin("string", string_literal),
        Rule::builtin("rune", rune_literal),
        Rule::builtin("int", int_literal),
        Rule::builtin("float", float_literal),
        Rule::builtin("unquote", unquote),
        Rule::builtin("typed-literal", typed_literal),
        Rule::builtin("colon-list", colon_list),
        Rule::builtin("spread", spread),
        Rule::builtin("underlying-type", underlying_type),
        Rule::builtin("address-of", address_of),
        Rule::builtin("deref", deref),
        Rule::builtin("not", not),
        Rule::builtin("chan-type", chan_type),
        Rule::builtin("array-type", array_or_slice_type),
        Rule::builtin("map-type", map_type),
        Rule::builtin("func-type", func_type),
        Rule::builtin("generic-type", generic_type),
        Rule::builtin("dot-path", dot_path),
    ]
}

fn tagged(marker: &str, items: impl IntoIterator<Item = Value>) -> Value {
    let mut seq = vec![Value::ident(marker)];
    seq.extend(items);
    Value::seq(seq)
}

fn keyword(_set: &RuleSet, word: &str) -> Option<Value> {
    match word {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "nil" => Some(Value::None),
        _ => None,
    }
}

/// `"..."` — strip the quotes and fold `\"` to `"`. Any other backslash is
/// kept literally along with the character after it; full escape
/// processing belongs to the host language, not this front end.
fn string_literal(_set: &RuleSet, word: &str) -> Option<Value> {
    let inner = word.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Some(Value::string(out))
}

/// `'c'` — the common control escapes, with a literal-character fallback
/// (`'\q'` is `q`, a trailing bare backslash is itself). The first
/// character wins; anything after it inside the quotes is ignored.
fn rune_literal(_set: &RuleSet, word: &str) -> Option<Value> {
    let inner = word.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let first = chars.next()?;
    if first != '\\' {
        return Some(Value::Rune(first));
    }
    let rune = match chars.next() {
        Some('n') => '\n',
        Some('t') => '\t',
        Some('r') => '\r',
        Some('a') => '\u{7}',
        Some('b') => '\u{8}',
        Some('f') => '\u{c}',
        Some('v') => '\u{b}',
        Some(other) => other,
        None => '\\',
    };
    Some(Value::Rune(rune))
}

fn int_literal(_set: &RuleSet, word: &str) -> Option<Value> {
    word.parse::<i64>().ok().map(Value::Int)
}

/// Requires at least one digit, so `inf` and `nan` stay identifiers.
fn float_literal(_set: &RuleSet, word: &str) -> Option<Value> {
    if !word.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    word.parse::<f64>().ok().map(Value::Float)
}

fn unquote(set: &RuleSet, word: &str) -> Option<Value> {
    let rest = word.strip_prefix(',')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::UNQUOTE, [set.classify(rest)]))
}

fn typed_literal(set: &RuleSet, word: &str) -> Option<Value> {
    let rest = word.strip_prefix('$')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::TYPED_LITERAL, [set.classify(rest)]))
}

/// `a:b:c` — an untagged list of the classified parts. All parts must be
/// non-empty, so `a:` and `::` stay identifiers.
fn colon_list(set: &RuleSet, word: &str) -> Option<Value> {
    let parts = split_unquoted(word, b':')?;
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(Value::seq(
        parts.iter().map(|p| set.classify(p)).collect(),
    ))
}

fn spread(set: &RuleSet, word: &str) -> Option<Value> {
    let rest = word.strip_prefix("...")?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::SPREAD, [set.classify(rest)]))
}

fn underlying_type(set: &RuleSet, word: &str) -> Option<Value> {
    let rest = word.strip_prefix('~')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::UNDERLYING_TYPE, [set.classify(rest)]))
}

fn address_of(set: &RuleSet, word: &str) -> Option<Value> {
    if word == "&&" || word == "&=" {
        return None;
    }
    let rest = word.strip_prefix('&')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::ADDRESS_OF, [set.classify(rest)]))
}

fn deref(set: &RuleSet, word: &str) -> Option<Value> {
    if word == "*=" {
        return None;
    }
    let rest = word.strip_prefix('*')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::DEREF, [set.classify(rest)]))
}

fn not(set: &RuleSet, word: &str) -> Option<Value> {
    if word == "!=" {
        return None;
    }
    let rest = word.strip_prefix('!')?;
    if rest.is_empty() {
        return None;
    }
    Some(tagged(markers::NOT, [set.classify(rest)]))
}

/// `<-chan[T]`, `chan<-[T]`, `chan[T]`. The bracket after the framing must
/// balance at the very end of the word.
fn chan_type(set: &RuleSet, word: &str) -> Option<Value> {
    let (marker, prefix) = if word.starts_with("<-chan[") {
        (markers::RECV_CHAN_TYPE, "<-chan")
    } else if word.starts_with("chan<-[") {
        (markers::SEND_CHAN_TYPE, "chan<-")
    } else if word.starts_with("chan[") {
        (markers::CHAN_TYPE, "chan")
    } else {
        return None;
    };
    let open = prefix.len();
    let close = find_balanced(word, open)?;
    if close != word.len().checked_sub(1)? {
        return None;
    }
    let elem = word.get(open.saturating_add(1)..close)?;
    if elem.is_empty() {
        return None;
    }
    Some(tagged(marker, [set.classify(elem)]))
}

/// `[]T` and `[n]T` with an integer length.
fn array_or_slice_type(set: &RuleSet, word: &str) -> Option<Value> {
    if !word.starts_with('[') {
        return None;
    }
    let close = find_balanced(word, 0)?;
    let len_text = word.get(1..close)?;
    let elem = word.get(close.saturating_add(1)..)?;
    if elem.is_empty() {
        return None;
    }
    if len_text.is_empty() {
        return Some(tagged(markers::SLICE_TYPE, [set.classify(elem)]));
    }
    let len = len_text.parse::<i64>().ok()?;
    Some(tagged(
        markers::ARRAY_TYPE,
        [Value::Int(len), set.classify(elem)],
    ))
}

fn map_type(set: &RuleSet, word: &str) -> Option<Value> {
    if !word.starts_with("map[") {
        return None;
    }
    let close = find_balanced(word, 3)?;
    let key = word.get(4..close)?;
    let value = word.get(close.saturating_add(1)..)?;
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some(tagged(
        markers::MAP_TYPE,
        [set.classify(key), set.classify(value)],
    ))
}

/// `func[p1, p2]ret` — parameters comma-split; an absent result type reads
/// as the absence value.
fn func_type(set: &RuleSet, word: &str) -> Option<Value> {
    if !word.starts_with("func[") {
        return None;
    }
    let close = find_balanced(word, 4)?;
    let params_text = word.get(5..close)?;
    let ret_text = word.get(close.saturating_add(1)..)?;
    let params = classify_comma_list(set, params_text)?;
    let ret = if ret_text.is_empty() {
        Value::None
    } else {
        set.classify(ret_text)
    };
    Some(tagged(markers::FUNC_TYPE, [Value::seq(params), ret]))
}

/// `Name[T1,T2]` — only reached when no earlier type rule claimed the
/// word, and only when the bracket closes at the very end.
fn generic_type(set: &RuleSet, word: &str) -> Option<Value> {
    let open = word.find('[')?;
    if open == 0 {
        return None;
    }
    let close = find_balanced(word, open)?;
    if close != word.len().checked_sub(1)? {
        return None;
    }
    let name = word.get(..open)?;
    let args_text = word.get(open.saturating_add(1)..close)?;
    if args_text.is_empty() {
        return None;
    }
    let args = classify_comma_list(set, args_text)?;
    let mut items = vec![set.classify(name)];
    items.extend(args);
    Some(tagged(markers::GENERIC_TYPE, items))
}

fn dot_path(set: &RuleSet, word: &str) -> Option<Value> {
    let parts = split_unquoted(word, b'.')?;
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(tagged(
        markers::DOT_PATH,
        parts.iter().map(|p| set.classify(p)),
    ))
}

/// Comma-split a bracketed parameter list, trimming the space that follows
/// a comma. Empty input is an empty list; an empty part is a no-match.
fn classify_comma_list(set: &RuleSet, text: &str) -> Option<Vec<Value>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    let parts = split_unquoted(text, b',')?;
    let mut out = Vec::with_capacity(parts.len());
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        out.push(set.classify(part));
    }
    Some(out)
}
