//! Number formatting used by string representations.

/// Reals with no fractional part below this magnitude print as integers.
const INTEGRAL_LIMIT: f64 = 1e15;

pub fn i64_to_string(i: i64) -> String {
    let mut buf = itoa::Buffer::new();
    buf.format(i).to_string()
}

pub fn push_i64(out: &mut String, i: i64) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(i));
}

pub fn f64_to_string(f: f64) -> String {
    let mut out = String::new();
    push_f64(&mut out, f);
    out
}

pub fn push_f64(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("nan");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "inf" } else { "-inf" });
    } else if f.fract() == 0.0 && f.abs() < INTEGRAL_LIMIT {
        push_i64(out, f as i64);
    } else {
        let mut buf = ryu::Buffer::new();
        out.push_str(buf.format_finite(f));
    }
}
