//! Canonical multi-line dump of a value.
//!
//! Every value is prefixed with its type in parentheses. Composites open a
//! brace block with one element per line, indented by one space per level.
//! Each element line ends in a comma. Mapping keys are sorted with
//! [`Value::canonical_cmp`] and pointers are followed, so the dump depends
//! only on the value and never on memory layout.

use verity_core_types::{Sequence, Value};

/// Dump `value`, terminated by a newline
pub fn dump(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out.push('\n');
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(' ');
    }
}

fn type_prefix(out: &mut String, value: &Value) {
    out.push('(');
    out.push_str(&value.type_name());
    out.push_str(") ");
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Nil => out.push_str("<nil>"),
        Value::Str(s) => {
            type_prefix(out, value);
            out.push_str(&format!("(len={}) {:?}", s.len(), s));
        }
        Value::Seq(seq) | Value::Array(seq) => {
            type_prefix(out, value);
            write_items(out, seq, depth);
        }
        Value::Map(map) => {
            type_prefix(out, value);
            let entries = map.sorted_entries();
            if entries.is_empty() {
                out.push_str("{\n");
                indent(out, depth);
                out.push('}');
                return;
            }
            out.push_str(&format!("(len={}) {{\n", entries.len()));
            for (key, item) in entries {
                indent(out, depth + 1);
                write_value(out, key, depth + 1);
                out.push_str(": ");
                write_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push('}');
        }
        Value::Ptr(pointer) => {
            type_prefix(out, value);
            match &pointer.target {
                None => out.push_str("None"),
                Some(target) => {
                    out.push('&');
                    write_value(out, target, depth);
                }
            }
        }
        Value::Struct(record) => {
            type_prefix(out, value);
            out.push_str("{\n");
            for field in &record.fields {
                indent(out, depth + 1);
                out.push_str(&field.name);
                out.push_str(": ");
                write_value(out, &field.value, depth + 1);
                out.push_str(",\n");
            }
            indent(out, depth);
            out.push('}');
        }
        Value::Bool(_)
        | Value::Int(..)
        | Value::Uint(..)
        | Value::Float(..)
        | Value::Time(_)
        | Value::Chan(_)
        | Value::Opaque(_) => {
            type_prefix(out, value);
            out.push_str(&value.to_string());
        }
    }
}

fn write_items(out: &mut String, seq: &Sequence, depth: usize) {
    if seq.items.is_empty() {
        out.push_str("{\n");
        indent(out, depth);
        out.push('}');
        return;
    }
    out.push_str(&format!("(len={}) {{\n", seq.items.len()));
    for item in &seq.items {
        indent(out, depth + 1);
        write_value(out, item, depth + 1);
        out.push_str(",\n");
    }
    indent(out, depth);
    out.push('}');
}
