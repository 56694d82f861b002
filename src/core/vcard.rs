// VcfSheet - core/vcard.rs
//
// vCard decoding on top of the `ical` crate's VcardParser.
// The parser handles unfolding, the content-line grammar and component
// nesting. This module maps its output into `Card`s, decodes values
// (quoted-printable, text escapes) and rejects cards left open at end of
// input, which the parser otherwise drops silently.

use crate::core::model::{Card, Param, Property};
use crate::core::text;
use crate::util::constants::VCARD_COMPONENT;
use crate::util::error::DecodeError;

/// Decode every card in `input`, in source order.
///
/// `input` must already be cleaned (see `core::ingest::clean`). An empty
/// input decodes to an empty list.
pub fn decode(input: &str) -> Result<Vec<Card>, DecodeError> {
    let mut cards = Vec::new();
    for (idx, result) in ical::VcardParser::new(input.as_bytes()).enumerate() {
        let contact = result.map_err(|e| DecodeError::new(idx + 1, e.to_string()))?;
        cards.push(Card {
            properties: contact.properties.into_iter().map(convert_property).collect(),
        });
    }

    if cards.len() < count_card_openings(input) {
        return Err(DecodeError::new(
            cards.len() + 1,
            "card is missing END:VCARD before end of input",
        ));
    }

    Ok(cards)
}

fn count_card_openings(input: &str) -> usize {
    input
        .lines()
        .filter(|line| {
            line.split_once(':').is_some_and(|(name, value)| {
                name.trim().eq_ignore_ascii_case("BEGIN")
                    && value.trim().eq_ignore_ascii_case(VCARD_COMPONENT)
            })
        })
        .count()
}

fn convert_property(raw: ical::property::Property) -> Property {
    let (group, name) = match raw.name.rsplit_once('.') {
        Some((group, name)) => (Some(group.to_string()), name.to_ascii_uppercase()),
        None => (None, raw.name.to_ascii_uppercase()),
    };
    let params = raw
        .params
        .unwrap_or_default()
        .into_iter()
        .map(|(name, values)| Param {
            name: name.to_ascii_uppercase(),
            values: values
                .into_iter()
                .map(|v| v.trim_matches('"').to_string())
                .collect(),
        })
        .collect();

    let mut prop = Property {
        group,
        name,
        params,
        value: String::new(),
    };
    prop.value = decode_value(&prop, raw.value.as_deref().unwrap_or_default());
    prop
}

fn decode_value(prop: &Property, raw: &str) -> String {
    let quoted_printable = prop
        .param("ENCODING")
        .is_some_and(|e| e.eq_ignore_ascii_case("QUOTED-PRINTABLE"));
    if quoted_printable {
        let bytes = text::decode_quoted_printable(raw);
        text::unescape_text(&text::decode_utf8_lenient(&bytes))
    } else {
        text::unescape_text(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_two_cards_in_order() {
        let text = "BEGIN:VCARD\nVERSION:3.0\nFN:Alice\nTEL:123\nTEL:456\nEND:VCARD\n\
                    BEGIN:VCARD\nVERSION:3.0\nFN:Bob\nTEL:789\nEND:VCARD\n";
        let cards = decode(text).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].first("FN").unwrap().value, "Alice");
        let tels: Vec<_> = cards[0].all("TEL").map(|p| p.value.as_str()).collect();
        assert_eq!(tels, vec!["123", "456"]);
        assert_eq!(cards[1].first("fn").unwrap().value, "Bob");
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn test_folded_value_unfolded() {
        let cards = decode("BEGIN:VCARD\nFN:Ali\n ce\nEND:VCARD\n").unwrap();
        assert_eq!(cards[0].first("FN").unwrap().value, "Alice");
    }

    #[test]
    fn test_group_and_params() {
        let cards = decode("BEGIN:VCARD\nitem1.TEL;TYPE=CELL,VOICE:+1 555\nEND:VCARD\n").unwrap();
        let tel = cards[0].first("TEL").unwrap();
        assert_eq!(tel.group.as_deref(), Some("item1"));
        assert_eq!(tel.param("type"), Some("CELL"));
        assert_eq!(tel.value, "+1 555");
    }

    #[test]
    fn test_value_may_contain_colons() {
        let cards = decode("BEGIN:VCARD\nURL:http://example.com:8080/a\nEND:VCARD\n").unwrap();
        assert_eq!(cards[0].first("URL").unwrap().value, "http://example.com:8080/a");
    }

    #[test]
    fn test_quoted_printable_and_escapes_decoded() {
        let text = "BEGIN:VCARD\n\
                    FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:J=C3=BCrgen\n\
                    NOTE:a\\, b\\nc\n\
                    END:VCARD\n";
        let cards = decode(text).unwrap();
        assert_eq!(cards[0].first("FN").unwrap().value, "J\u{fc}rgen");
        assert_eq!(cards[0].first("NOTE").unwrap().value, "a, b\nc");
    }

    #[test]
    fn test_missing_colon_is_error() {
        let err = decode("BEGIN:VCARD\nFN Alice\nEND:VCARD\n").unwrap_err();
        assert_eq!(err.card, 1);
    }

    #[test]
    fn test_property_outside_card_is_error() {
        assert!(decode("FN:Alice\n").is_err());
    }

    #[test]
    fn test_unterminated_card_is_error() {
        let text = "BEGIN:VCARD\nFN:Alice\nEND:VCARD\nBEGIN:VCARD\nFN:Bob\n";
        let err = decode(text).unwrap_err();
        assert_eq!(err.card, 2);
        assert!(err.reason.contains("END:VCARD"), "{err}");
    }

    #[test]
    fn test_nested_vcard_is_error() {
        let text = "BEGIN:VCARD\nFN:A\nBEGIN:VCARD\nFN:B\nEND:VCARD\nEND:VCARD\n";
        assert!(decode(text).is_err());
    }
}
