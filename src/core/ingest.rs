// VcfSheet - core/ingest.rs
//
// Raw vCard bytes -> contact records.
// Core layer: the app layer reads the file, this module does the rest:
//
//   1. lenient UTF-8 decode (malformed sequences dropped, BOM removed)
//   2. join quoted-printable soft line breaks (`=` + newline)
//   3. strip PHOTO fields and their multi-line values
//   4. spell out vCard 2.1 bare parameters, drop blank lines
//   5. decode cards
//   6. flatten each card into a Contact (FN + every TEL)

use crate::core::model::Contact;
use crate::core::text::decode_utf8_lenient;
use crate::core::vcard;
use crate::util::constants::PHOTO_PROPERTY_PREFIX;
use crate::util::error::DecodeError;
use regex::Regex;
use std::sync::OnceLock;

/// Bare vCard 2.1 parameters that name an encoding rather than a type.
const BARE_ENCODINGS: &[&str] = &["QUOTED-PRINTABLE", "BASE64", "B", "8BIT", "7BIT"];

/// Decode a whole vCard file into contacts, in source order.
///
/// Fails without partial results if the cleaned content is not a valid
/// vCard stream. Zero cards is a valid, empty result.
pub fn decode_contacts(bytes: &[u8]) -> Result<Vec<Contact>, DecodeError> {
    let cleaned = clean(bytes);
    let cards = vcard::decode(&cleaned)?;
    let contacts: Vec<Contact> = cards.iter().map(Contact::from_card).collect();
    tracing::debug!(
        bytes = bytes.len(),
        cleaned_bytes = cleaned.len(),
        contacts = contacts.len(),
        "vCard content decoded"
    );
    Ok(contacts)
}

/// Steps 1-4: produce the text handed to the decoder.
pub fn clean(bytes: &[u8]) -> String {
    let text = decode_utf8_lenient(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let text = text.replace("\r\n", "\n");
    normalize_parameters(&strip_photo_fields(&join_soft_line_breaks(&text)))
}

/// Remove quoted-printable soft line breaks (`=\r\n` and `=\n`), joining
/// each continued line with the next.
///
/// Only fields declaring `ENCODING=QUOTED-PRINTABLE` (or the bare 2.1 form)
/// carry soft line breaks. A trailing `=` anywhere else is data, such as
/// base64 padding, and is left alone.
pub fn join_soft_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quoted_printable = false;
    let mut continued = false;
    for line in text.split_inclusive('\n') {
        if !continued && field_name(line).is_some() {
            quoted_printable = declares_quoted_printable(line);
        }
        let soft_break = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .and_then(|l| l.strip_suffix('='));
        match soft_break {
            Some(kept) if quoted_printable => {
                out.push_str(kept);
                continued = true;
            }
            _ => {
                out.push_str(line);
                continued = false;
            }
        }
    }
    out
}

fn declares_quoted_printable(line: &str) -> bool {
    line.split(':')
        .next()
        .is_some_and(|head| head.to_ascii_uppercase().contains("QUOTED-PRINTABLE"))
}

/// Drop every PHOTO field together with its value lines.
///
/// A PHOTO field runs from its own line up to (not including) the next line
/// that starts a new field, or to end of input. Base64 and hex payload lines
/// never contain `;` or `:`, so they can never be mistaken for a field start.
pub fn strip_photo_fields(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_photo = false;
    for line in text.split_inclusive('\n') {
        if let Some(name) = field_name(line) {
            in_photo = name
                .to_ascii_uppercase()
                .starts_with(PHOTO_PROPERTY_PREFIX);
        }
        if !in_photo {
            out.push_str(line);
        }
    }
    out
}

/// Rewrite vCard 2.1 bare parameters into `NAME=VALUE` form and drop blank
/// lines.
///
/// `TEL;CELL;VOICE:1` becomes `TEL;TYPE=CELL;TYPE=VOICE:1` and
/// `FN;QUOTED-PRINTABLE:..` becomes `FN;ENCODING=QUOTED-PRINTABLE:..`.
pub fn normalize_parameters(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            continue;
        }
        let Some(name_end) = field_start().find(line).map(|m| m.end() - 1) else {
            out.push_str(line);
            continue;
        };
        let rest = &line[name_end..];
        let Some(colon) = rest.find(':') else {
            out.push_str(line);
            continue;
        };
        out.push_str(&line[..name_end]);
        for segment in rest[..colon].split(';').filter(|s| !s.is_empty()) {
            out.push(';');
            if segment.contains('=') {
                out.push_str(segment);
            } else {
                let upper = segment.trim().to_ascii_uppercase();
                let name = if BARE_ENCODINGS.contains(&upper.as_str()) {
                    "ENCODING"
                } else {
                    "TYPE"
                };
                out.push_str(name);
                out.push('=');
                out.push_str(&upper);
            }
        }
        out.push_str(&rest[colon..]);
    }
    out
}

/// A letter-initial token (optionally `group.`-prefixed) immediately
/// followed by `;` or `:` at the start of a line.
fn field_start() -> &'static Regex {
    static FIELD_START: OnceLock<Regex> = OnceLock::new();
    FIELD_START.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z][A-Za-z0-9-]*\.)?([A-Za-z][A-Za-z0-9-]*)[;:]")
            .expect("ingest: invalid field-start regex")
    })
}

/// Name of the field a line starts, if it starts one.
fn field_name(line: &str) -> Option<&str> {
    field_start()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_AND_BOB: &str = "BEGIN:VCARD\nVERSION:3.0\nFN:Alice\nTEL:123\nTEL:456\nEND:VCARD\n\
                                 BEGIN:VCARD\nVERSION:3.0\nFN:Bob\nTEL:789\nEND:VCARD\n";

    #[test]
    fn test_decode_alice_and_bob() {
        let contacts = decode_contacts(ALICE_AND_BOB.as_bytes()).unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("Alice", vec!["123".into(), "456".into()]),
                Contact::new("Bob", vec!["789".into()]),
            ]
        );
    }

    #[test]
    fn test_missing_fn_and_tel_yield_empty_fields() {
        let contacts = decode_contacts(b"BEGIN:VCARD\nVERSION:3.0\nEMAIL:x@y.z\nEND:VCARD\n").unwrap();
        assert_eq!(contacts, vec![Contact::default()]);
    }

    #[test]
    fn test_empty_file_is_zero_contacts() {
        assert!(decode_contacts(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_failure_is_error_not_empty() {
        let err = decode_contacts(b"BEGIN:VCARD\nFN:Alice\n").unwrap_err();
        assert!(err.reason.contains("END:VCARD"));
    }

    #[test]
    fn test_soft_line_breaks_joined_in_quoted_printable_fields() {
        let input = "NOTE;ENCODING=QUOTED-PRINTABLE:ab=\r\ncd=\nef\nTEL:1\n";
        assert_eq!(
            join_soft_line_breaks(input),
            "NOTE;ENCODING=QUOTED-PRINTABLE:abcdef\nTEL:1\n"
        );
    }

    #[test]
    fn test_trailing_equals_outside_quoted_printable_kept() {
        let input = "PHOTO;ENCODING=b:QUJD\n RA==\nTEL:555\nNOTE:a=\nb\n";
        assert_eq!(join_soft_line_breaks(input), input);
    }

    #[test]
    fn test_bare_parameters_spelled_out() {
        assert_eq!(
            normalize_parameters("TEL;CELL;VOICE:1\n\nFN;QUOTED-PRINTABLE:A\nN:x;y\n"),
            "TEL;TYPE=CELL;TYPE=VOICE:1\nFN;ENCODING=QUOTED-PRINTABLE:A\nN:x;y\n"
        );
    }

    #[test]
    fn test_padded_photo_followed_by_tel() {
        for padding in ["=", "=="] {
            let input = format!(
                "BEGIN:VCARD\nVERSION:3.0\nFN:Pic\n\
                 PHOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQSkZJRgABAQ\n \
                 CQgKDBQNDAsLDBkSEw{padding}\n\
                 TEL:555\nEND:VCARD\n"
            );
            let contacts = decode_contacts(input.as_bytes()).unwrap();
            assert_eq!(contacts, vec![Contact::new("Pic", vec!["555".into()])]);
        }
    }

    #[test]
    fn test_padded_photo_followed_by_end() {
        let input = "BEGIN:VCARD\nFN:Pic\nPHOTO;ENCODING=b:QUJD\n RA==\nEND:VCARD\n";
        let contacts = decode_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts, vec![Contact::new("Pic", vec![])]);
    }

    #[test]
    fn test_unfolded_vcard21_photo_padding_then_blank_line() {
        let input = "BEGIN:VCARD\r\nVERSION:2.1\r\nFN:Pic\r\n\
                     PHOTO;ENCODING=BASE64;TYPE=JPEG:\r\n\
                     /9j/4AAQSkZJRgABAQ\r\n\
                     CQgKDBQNDAsLDBkSEw==\r\n\
                     \r\n\
                     TEL;CELL:555\r\nEND:VCARD\r\n";
        let contacts = decode_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts, vec![Contact::new("Pic", vec!["555".into()])]);
    }

    #[test]
    fn test_quoted_printable_name_across_soft_break() {
        let input = "BEGIN:VCARD\nVERSION:2.1\n\
                     FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:=E5=BC=A0=\n=E4=B8=89\n\
                     TEL;CELL:138\nEND:VCARD\n";
        let contacts = decode_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts[0].name, "张三");
        assert_eq!(contacts[0].phone_numbers, vec!["138"]);
    }

    #[test]
    fn test_invalid_utf8_and_bom_tolerated() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"BEGIN:VCARD\nFN:Al\xffice\nEND:VCARD\n");
        let contacts = decode_contacts(&bytes).unwrap();
        assert_eq!(contacts[0].name, "Alice");
    }

    #[test]
    fn test_photo_blob_removed_before_tel() {
        let input = "BEGIN:VCARD\nVERSION:3.0\nFN:Pic\n\
                     PHOTO;ENCODING=b;TYPE=JPEG:/9j/4AAQSkZJRgABAQ\n \
                     AAAQABAAD/2wBDAAgGBgcGBQgHBwcJ\n \
                     CQgKDBQNDAsLDBkSEw8U\n\
                     TEL:555\nEND:VCARD\n";
        let contacts = decode_contacts(input.as_bytes()).unwrap();
        assert_eq!(contacts[0].name, "Pic");
        assert_eq!(contacts[0].phone_numbers, vec!["555"]);
    }

    #[test]
    fn test_strip_photo_unfolded_base64_lines() {
        // vCard 2.1 exporters often write the payload on unindented lines.
        let input = "FN:A\nPHOTO;ENCODING=BASE64;JPEG:AAAA\nBBBBCCCC\nDDDD\n\nTEL:1\n";
        assert_eq!(strip_photo_fields(input), "FN:A\nTEL:1\n");
    }

    #[test]
    fn test_strip_photo_without_params() {
        assert_eq!(strip_photo_fields("PHOTO:http://x/y.png\nFN:A\n"), "FN:A\n");
    }

    #[test]
    fn test_strip_photo_as_last_field_without_newline() {
        assert_eq!(strip_photo_fields("FN:A\nPHOTO;ENCODING=b:QUJD"), "FN:A\n");
    }

    #[test]
    fn test_strip_grouped_photo_and_keep_grouped_fields() {
        let input = "item1.PHOTO;ENCODING=b:QUJD\n RUZH\nitem2.TEL:42\n";
        assert_eq!(strip_photo_fields(input), "item2.TEL:42\n");
    }

    #[test]
    fn test_non_photo_content_untouched() {
        let input = "BEGIN:VCARD\r\nFN:Photographer\r\nNOTE:PHOTO is not a field here\r\nEND:VCARD\r\n";
        assert_eq!(strip_photo_fields(input), input);
    }
}
