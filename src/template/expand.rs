use crate::template::parser::{Expression, Modifier, Part};
use crate::template::{ParamValue, Params};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved set
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Everything except unreserved and reserved characters
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

pub(crate) fn expand_parts(parts: &[Part], params: &Params) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            Part::Literal(text) => out.push_str(&encode(text, true)),
            Part::Expression(expr) => expand_expression(&mut out, expr, params),
        }
    }
    out
}

fn expand_expression(out: &mut String, expr: &Expression, params: &Params) {
    let op = expr.operator;
    let mut first = true;

    for var in &expr.vars {
        let Some(value) = params.defined(&var.name) else {
            continue;
        };

        out.push_str(if first { op.first() } else { op.separator() });
        first = false;

        let allow_reserved = op.allow_reserved();
        match (value, var.modifier) {
            (ParamValue::Scalar(text), modifier) => {
                let text = match modifier {
                    Modifier::Prefix(len) => truncate_chars(text, len),
                    _ => text.as_str(),
                };
                if op.named() {
                    push_named(out, &var.name, text, op.if_empty(), allow_reserved);
                } else {
                    out.push_str(&encode(text, allow_reserved));
                }
            }
            (ParamValue::List(items), Modifier::Explode) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(op.separator());
                    }
                    if op.named() {
                        push_named(out, &var.name, item, op.if_empty(), allow_reserved);
                    } else {
                        out.push_str(&encode(item, allow_reserved));
                    }
                }
            }
            (ParamValue::List(items), _) => {
                if op.named() {
                    out.push_str(&var.name);
                    out.push('=');
                }
                let joined: Vec<String> = items
                    .iter()
                    .map(|item| encode(item, allow_reserved))
                    .collect();
                out.push_str(&joined.join(","));
            }
            (ParamValue::Assoc(pairs), Modifier::Explode) => {
                for (i, (key, val)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push_str(op.separator());
                    }
                    let key = encode(key, allow_reserved);
                    if op.named() {
                        push_named(out, &key, val, op.if_empty(), allow_reserved);
                    } else {
                        out.push_str(&key);
                        out.push('=');
                        out.push_str(&encode(val, allow_reserved));
                    }
                }
            }
            (ParamValue::Assoc(pairs), _) => {
                if op.named() {
                    out.push_str(&var.name);
                    out.push('=');
                }
                let joined: Vec<String> = pairs
                    .iter()
                    .flat_map(|(key, val)| [encode(key, allow_reserved), encode(val, allow_reserved)])
                    .collect();
                out.push_str(&joined.join(","));
            }
        }
    }
}

fn push_named(out: &mut String, name: &str, value: &str, if_empty: &str, allow_reserved: bool) {
    out.push_str(name);
    if value.is_empty() {
        out.push_str(if_empty);
    } else {
        out.push('=');
        out.push_str(&encode(value, allow_reserved));
    }
}

fn truncate_chars(text: &str, len: usize) -> &str {
    match text.char_indices().nth(len) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Percent-encodes `value`; with `allow_reserved` existing pct-triplets are kept
fn encode(value: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return utf8_percent_encode(value, UNRESERVED).to_string();
    }

    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let is_triplet = bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();

        if is_triplet {
            out.extend(utf8_percent_encode(&value[start..i], RESERVED));
            out.push_str(&value[i..i + 3]);
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }

    out.extend(utf8_percent_encode(&value[start..], RESERVED));
    out
}
