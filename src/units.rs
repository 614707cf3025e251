//! Unit conversion tables and the quantity scanner.
//!
//! `go test -bench` reports metrics as free-text quantities such as
//! `950 ns/op`, `120 B/op` or `105.22 MB/s`, anywhere on the line and in
//! any combination. The scanners here find the first occurrence of each
//! pattern and convert it to a canonical scalar (seconds, bytes,
//! bytes/second).

/// Time units recognized in `<number><unit>/op`, mapped to seconds.
///
/// Ordered so that multi-character spellings are tried before the bare
/// `s` they all end with. Both micro-sign spellings (U+00B5 and U+03BC)
/// are accepted alongside ASCII `us`.
pub const TIME_UNITS: &[(&str, f64)] = &[
    ("ns", 1e-9),
    ("us", 1e-6),
    ("µs", 1e-6),
    ("μs", 1e-6),
    ("ms", 1e-3),
    ("s", 1.0),
];

/// The allocation unit in `<number>B/op`; already a byte count.
pub const BYTE_UNITS: &[(&str, f64)] = &[("B", 1.0)];

/// Map a byte-scale spelling to its canonical form and multiplier.
///
/// Scales are decimal, not binary: every downstream use is a ratio
/// against a same-unit baseline, so the constant cancels, but the same
/// convention must hold for all systems within one run. The scale letter
/// is matched case-insensitively; an unrecognized spelling falls back to
/// plain bytes.
pub fn byte_scale(unit: &str) -> (&'static str, f64) {
    match unit.to_ascii_lowercase().as_str() {
        "kb" => ("kB", 1e3),
        "mb" => ("MB", 1e6),
        "gb" => ("GB", 1e9),
        _ => ("B", 1.0),
    }
}

/// Scan `line` for the first `<number><space?><unit><suffix>` occurrence
/// and return the value multiplied by the unit's factor.
///
/// Whitespace is allowed between the number and the unit but not between
/// the unit and the suffix. Occurrences of the suffix that are not
/// preceded by a unit and a number (e.g. `/op` inside a benchmark name,
/// or Go's `allocs/op` column) are skipped.
pub fn find_quantity(line: &str, suffix: &str, units: &[(&str, f64)]) -> Option<f64> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(suffix) {
        let end = from + pos;
        for &(unit, factor) in units {
            if let Some(head) = line[..end].strip_suffix(unit) {
                if let Some(v) = trailing_number(head) {
                    return Some(v * factor);
                }
            }
        }
        from = end + suffix.len();
    }
    None
}

/// Scan `line` for the first throughput quantity `<number><space?><scale?>B/s`.
pub fn find_throughput(line: &str) -> Option<f64> {
    let mut from = 0;
    while let Some(pos) = line[from..].find("/s") {
        let end = from + pos;
        if let Some(head) = line[..end].strip_suffix('B') {
            // An alphabetic character directly before the `B` is the scale
            // letter; anything unrecognized degrades to plain bytes.
            let (head, factor) = match head.chars().next_back() {
                Some(c) if c.is_ascii_alphabetic() => {
                    let (_, factor) = byte_scale(&format!("{c}B"));
                    (&head[..head.len() - c.len_utf8()], factor)
                }
                _ => (head, 1.0),
            };
            if let Some(v) = trailing_number(head) {
                return Some(v * factor);
            }
        }
        from = end + 2;
    }
    None
}

/// Parse the maximal trailing run of digits and dots of `s`, after
/// trimming trailing whitespace, as an `f64`.
fn trailing_number(s: &str) -> Option<f64> {
    let s = s.trim_end();
    let bytes = s.as_bytes();
    let mut start = bytes.len();
    while start > 0 && (bytes[start - 1].is_ascii_digit() || bytes[start - 1] == b'.') {
        start -= 1;
    }
    if start == bytes.len() {
        return None;
    }
    s[start..].parse().ok()
}
