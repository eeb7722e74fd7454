//! String representation, numeric coercion and string-level helpers.

use std::borrow::Cow;

use ember_core::{FastHashSet, Value, fast_set_new, push_f64, push_i64};

use super::cell::Payload;
use super::heap::Heap;

impl Heap {
    /// String representation of any value. Absent values render as "".
    pub fn to_text(&self, v: Value) -> String {
        let mut out = String::new();
        let mut visiting = fast_set_new();
        self.write_text(v, &mut out, &mut visiting);
        out
    }

    /// Like `to_text` but borrows when `v` already is a string.
    pub fn text_of(&self, v: Value) -> Cow<'_, str> {
        match self.as_str(v) {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(self.to_text(v)),
        }
    }

    fn write_text(&self, v: Value, out: &mut String, visiting: &mut FastHashSet<Value>) {
        let Some(cell) = self.cell(v) else {
            return;
        };
        match &cell.payload {
            Payload::Null => {}
            Payload::Str(s) => out.push_str(s),
            Payload::Int(i) => push_i64(out, *i),
            Payload::Real(f) => push_f64(out, *f),
            Payload::Array(items) => {
                if !visiting.insert(v) {
                    out.push_str("[...]");
                    return;
                }
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_text(*item, out, visiting);
                }
                out.push(']');
                visiting.remove(&v);
            }
            Payload::Hash(_) => {
                if !visiting.insert(v) {
                    out.push_str("{...}");
                    return;
                }
                out.push('{');
                for (i, (key, value)) in self.hash_iter(v).enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write_text(key, out, visiting);
                    out.push(':');
                    self.write_text(value, out, visiting);
                }
                out.push('}');
                visiting.remove(&v);
            }
            Payload::Exec(_) => out.push_str("<exec>"),
            Payload::File(handle) => {
                out.push_str("<file ");
                out.push_str(&handle.path);
                out.push('>');
            }
            Payload::Program(_) => out.push_str("<program>"),
        }
    }

    /// Integer interpretation, memoized for strings.
    pub fn as_int(&self, v: Value) -> i64 {
        let Some(cell) = self.cell(v) else {
            return 0;
        };
        match &cell.payload {
            Payload::Int(i) => *i,
            Payload::Real(f) => *f as i64,
            Payload::Str(s) => {
                if let Some(i) = cell.cached_int.get() {
                    return i;
                }
                let i = parse_int_prefix(s);
                cell.cached_int.set(Some(i));
                i
            }
            Payload::Array(items) | Payload::Program(items) => items.len() as i64,
            Payload::Hash(table) => table.pairs as i64,
            Payload::Null | Payload::Exec(_) | Payload::File(_) => 0,
        }
    }

    /// Real interpretation, memoized for strings.
    pub fn as_real(&self, v: Value) -> f64 {
        let Some(cell) = self.cell(v) else {
            return 0.0;
        };
        match &cell.payload {
            Payload::Int(i) => *i as f64,
            Payload::Real(f) => *f,
            Payload::Str(s) => {
                if let Some(f) = cell.cached_real.get() {
                    return f;
                }
                let f = parse_real_prefix(s);
                cell.cached_real.set(Some(f));
                f
            }
            Payload::Array(items) | Payload::Program(items) => items.len() as f64,
            Payload::Hash(table) => table.pairs as f64,
            Payload::Null | Payload::Exec(_) | Payload::File(_) => 0.0,
        }
    }

    /// Split `text` on every literal occurrence of `separator`.
    ///
    /// An empty separator yields one element per character; empty text
    /// yields an empty array.
    pub fn split(&mut self, separator: Value, text: Value) -> Value {
        let sep = self.to_text(separator);
        let text = self.to_text(text);
        let parts: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else if sep.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(sep.as_str()).collect()
        };

        let out = self.array(parts.len());
        for part in parts {
            let s = self.string(part);
            self.array_push(out, s);
        }
        out
    }

    /// Join the string representations of an array's elements.
    pub fn join(&mut self, separator: Value, array: Value) -> Value {
        let sep = self.text_of(separator).into_owned();
        let joined = match self.items(array) {
            Some(items) => {
                let mut out = String::new();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(&sep);
                    }
                    out.push_str(&self.text_of(*item));
                }
                out
            }
            None => self.to_text(array),
        };
        self.string(&joined)
    }

    /// Replace `len` bytes at `offset` with `insert`.
    ///
    /// Returns the new string and the removed substring. A negative offset
    /// counts from the end; both bounds are clamped to the text and widened to
    /// character boundaries.
    pub fn splice(&mut self, text: Value, insert: Value, offset: i64, len: i64) -> (Value, Value) {
        let s = self.text_of(text).into_owned();
        let ins = self.text_of(insert).into_owned();
        let n = s.len() as i64;

        let start = if offset < 0 { n + offset } else { offset };
        let mut start = start.clamp(0, n) as usize;
        let mut end = start + len.clamp(0, n - start as i64) as usize;
        while !s.is_char_boundary(start) {
            start -= 1;
        }
        while !s.is_char_boundary(end) {
            end += 1;
        }

        let mut out = String::with_capacity(s.len() - (end - start) + ins.len());
        out.push_str(&s[..start]);
        out.push_str(&ins);
        out.push_str(&s[end..]);
        let removed = self.string(&s[start..end]);
        let spliced = self.string(&out);
        (spliced, removed)
    }
}

/// Leading integer of `s`: optional whitespace, sign, digits. Saturates.
pub(crate) fn parse_int_prefix(s: &str) -> i64 {
    let bytes = s.trim_start().as_bytes();
    let (neg, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };
    let mut acc: i64 = 0;
    for b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        let d = i64::from(b - b'0');
        acc = if neg {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Leading real of `s`: sign, digits, optional fraction and exponent.
pub(crate) fn parse_real_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let b = t.as_bytes();
    let mut end = 0;
    if matches!(b.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_start = end;
    while end < b.len() && b[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < b.len() && b[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < b.len() && b[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }
    if end < b.len() && matches!(b[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(b.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < b.len() && b[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    t[..end].parse().unwrap_or(0.0)
}
