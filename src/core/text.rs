// VcfSheet - core/text.rs
//
// Byte and text decoding helpers shared by the cleanup pass and the vCard
// decoder. Pure functions, no I/O.

/// Decode bytes as UTF-8, dropping malformed sequences instead of failing
/// or substituting U+FFFD.
pub fn decode_utf8_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let valid_len = e.valid_up_to();
                out.push_str(std::str::from_utf8(&rest[..valid_len]).unwrap_or_default());
                // None means the input ends inside an incomplete sequence.
                let skip = e.error_len().unwrap_or(rest.len() - valid_len);
                rest = &rest[valid_len + skip..];
            }
        }
    }
}

/// Undo vCard text escaping: `\n`/`\N` become a newline, `\,` `\;` `\:` and
/// `\\` become the literal character. Unknown escapes are kept verbatim.
pub fn unescape_text(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(esc @ (',' | ';' | ':' | '\\')) => out.push(esc),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Decode a quoted-printable value (`=XX` hex escapes) into raw bytes.
///
/// Soft line breaks have already been joined by the cleanup pass, so a
/// lone `=` not followed by two hex digits is kept as a literal.
pub fn decode_quoted_printable(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'=' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lenient_decode_drops_invalid_bytes() {
        let bytes = b"Al\xffice\xc3";
        assert_eq!(decode_utf8_lenient(bytes), "Alice");
    }

    #[test]
    fn test_lenient_decode_keeps_multibyte_text() {
        let text = "张三 Zoë";
        assert_eq!(decode_utf8_lenient(text.as_bytes()), text);
    }

    #[test]
    fn test_unescape_text() {
        assert_eq!(unescape_text(r"Doe\, John"), "Doe, John");
        assert_eq!(unescape_text(r"a\;b\\c\nd"), "a;b\\c\nd");
        assert_eq!(unescape_text(r"keep \x"), r"keep \x");
        assert_eq!(unescape_text("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_quoted_printable_utf8() {
        let raw = decode_quoted_printable("=E5=BC=A0=E4=B8=89");
        assert_eq!(decode_utf8_lenient(&raw), "张三");
    }

    #[test]
    fn test_quoted_printable_literal_equals() {
        assert_eq!(decode_quoted_printable("a=b=3D"), b"a=b=".to_vec());
        assert_eq!(decode_quoted_printable("end="), b"end=".to_vec());
    }
}
