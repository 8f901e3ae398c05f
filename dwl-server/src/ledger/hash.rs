//! Transaction id derivation
//!
//! `tx_id` is the lowercase hex SHA-256 of a canonical JSON payload:
//!
//! - keys in lexicographic order
//! - `", "` between members, `": "` between key and value
//! - every character outside printable ASCII escaped as `\uXXXX`
//!   (UTF-16, so astral characters become surrogate pairs)
//! - floats in shortest round-trip form, positional for decimal exponents
//!   in `-4..=16` (always with a fractional part), scientific otherwise
//!   (`1e+16`, `1e-05`)
//!
//! Key order and separators follow Python's `json.dumps(sort_keys=True)`;
//! quantities are always serialized as floats.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter};
use sha2::{Digest, Sha256};
use std::io;

/// Fields covered by the digest. Declaration order is the key order.
#[derive(Debug, Serialize)]
pub struct CanonicalPayload<'a> {
    pub collector: &'a str,
    pub created_at: &'a str,
    pub household: &'a str,
    pub material: &'a str,
    pub price_per_kg: f64,
    pub total: f64,
    pub weight: f64,
}

impl CanonicalPayload<'_> {
    pub fn to_canonical_string(&self) -> serde_json::Result<String> {
        let mut buf = Vec::with_capacity(192);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
        self.serialize(&mut ser)?;
        // Output is pure ASCII
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn tx_id(&self) -> serde_json::Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.to_canonical_string()?.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// JSON formatter producing the canonical layout
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(format_float(value).as_bytes())
    }

    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        self.write_f64(writer, f64::from(value))
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        // Control characters, quote and backslash never reach this point;
        // serde_json emits those through write_char_escape.
        if fragment.bytes().all(|b| (b' '..=b'~').contains(&b)) {
            return CompactFormatter.write_string_fragment(writer, fragment);
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if (' '..='~').contains(&ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Shortest round-trip float text, positional or scientific
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".into()
        } else if value > 0.0 {
            "Infinity".into()
        } else {
            "-Infinity".into()
        };
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e3"
    let sci = format!("{:e}", value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let n = digits.len() as i32;
    // value = 0.DIGITS * 10^decpt
    let decpt = exp + 1;

    let body = if -4 < decpt && decpt <= 16 {
        if decpt <= 0 {
            format!("0.{}{}", "0".repeat((-decpt) as usize), digits)
        } else if decpt >= n {
            format!("{}{}.0", digits, "0".repeat((decpt - n) as usize))
        } else {
            let (int, frac) = digits.split_at(decpt as usize);
            format!("{int}.{frac}")
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() { lead.to_string() } else { format!("{lead}.{rest}") };
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{exp_sign}{:02}", exp.abs())
    };

    format!("{sign}{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload<'a>(household: &'a str, weight: f64, price: f64) -> CanonicalPayload<'a> {
        CanonicalPayload {
            collector: "Pengepul B",
            created_at: "2024-05-01T10:00:00.000000",
            household,
            material: "Plastik PET",
            price_per_kg: price,
            total: weight * price,
            weight,
        }
    }

    #[test]
    fn test_canonical_layout() {
        assert_eq!(
            payload("H1", 2.5, 4000.0).to_canonical_string().unwrap(),
            r#"{"collector": "Pengepul B", "created_at": "2024-05-01T10:00:00.000000", "household": "H1", "material": "Plastik PET", "price_per_kg": 4000.0, "total": 10000.0, "weight": 2.5}"#
        );
    }

    #[test]
    fn test_tx_id_is_pinned() {
        assert_eq!(
            payload("H1", 2.5, 4000.0).tx_id().unwrap(),
            "43d9448018eae824d4cc6817ef810aefa3844a1acd1ad3802aafe78ab5b1170b"
        );
    }

    #[test]
    fn test_non_ascii_and_exponent_floats() {
        let p = CanonicalPayload {
            collector: "Pengepul B",
            created_at: "2024-05-01T10:00:00.000000",
            household: "Bu Siti \u{2013} RT 03 \u{1F600}",
            material: "Kertas",
            price_per_kg: 1e16,
            total: 1e16 * 0.00001,
            weight: 0.00001,
        };
        assert_eq!(
            p.to_canonical_string().unwrap(),
            r#"{"collector": "Pengepul B", "created_at": "2024-05-01T10:00:00.000000", "household": "Bu Siti \u2013 RT 03 \ud83d\ude00", "material": "Kertas", "price_per_kg": 1e+16, "total": 100000000000.00002, "weight": 1e-05}"#
        );
        assert_eq!(
            p.tx_id().unwrap(),
            "f7327bbbf69761b969b075f00f86665d15ca0acbd1c087f3339df09510893d06"
        );
    }

    #[test]
    fn test_control_characters_escaped() {
        let p = payload("line\nbreak \"quoted\"", 1.0, 1.0);
        assert!(p.to_canonical_string().unwrap().contains(r#""household": "line\nbreak \"quoted\"""#));
    }

    #[test]
    fn test_format_float() {
        let cases = [
            (0.0, "0.0"),
            (-0.0, "-0.0"),
            (0.1, "0.1"),
            (32.0, "32.0"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (0.1 + 0.2, "0.30000000000000004"),
            (1234567890123456.0, "1234567890123456.0"),
            (12345678901234567.0, "1.2345678901234568e+16"),
            (1e22, "1e+22"),
            (-2.5, "-2.5"),
            (5e-324, "5e-324"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_float(value), expected, "formatting {value:?}");
        }
    }

    #[test]
    fn test_any_field_change_changes_tx_id() {
        let base = payload("H1", 2.0, 4000.0);
        let variants = [
            CanonicalPayload { household: "H2", ..payload("H1", 2.0, 4000.0) },
            CanonicalPayload { collector: "Pengepul A", ..payload("H1", 2.0, 4000.0) },
            CanonicalPayload { material: "HDPE", ..payload("H1", 2.0, 4000.0) },
            CanonicalPayload { created_at: "2024-05-01T10:00:00.000001", ..payload("H1", 2.0, 4000.0) },
            payload("H1", 2.1, 4000.0),
            payload("H1", 2.0, 4001.0),
        ];
        let base_id = base.tx_id().unwrap();
        for v in &variants {
            assert_ne!(v.tx_id().unwrap(), base_id, "{v:?}");
        }
        assert_eq!(payload("H1", 2.0, 4000.0).tx_id().unwrap(), base_id);
    }
}
