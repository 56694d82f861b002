// VcfSheet - tests/e2e_convert.rs
//
// End-to-end tests for the ingest -> filter -> export pipeline.
//
// These tests read real fixture files from disk, write real workbooks into a
// temp directory, and read them back with calamine. No mocks.

use calamine::Reader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vcfsheet::app::convert::{self, ExportOptions};
use vcfsheet::core::model::Contact;
use vcfsheet::util::error::IngestError;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Every cell of `sheet` in `path`, as strings, row by row.
fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let bytes = std::fs::read(path).unwrap();
    let mut workbook = calamine::open_workbook_auto_from_rs(std::io::Cursor::new(bytes))
        .expect("exported file should open as a workbook");
    let range = workbook
        .worksheet_range(sheet)
        .expect("exported workbook should contain the sheet");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    calamine::Data::Empty => String::new(),
                    calamine::Data::String(s) => s.clone(),
                    other => panic!("unexpected non-text cell {other:?}"),
                })
                .collect()
        })
        .collect()
}

// =============================================================================
// Ingest
// =============================================================================

#[test]
fn e2e_ingest_keeps_source_order_and_all_numbers() {
    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    assert_eq!(
        contacts,
        vec![
            Contact::new("Alice Smith", vec!["123".into(), "456".into()]),
            Contact::new("Bob Jones", vec!["789".into()]),
            Contact::new("Carol", vec![]),
        ]
    );
}

#[test]
fn e2e_ingest_strips_photo_payload() {
    let contacts = convert::ingest(&fixture("photo.vcf")).unwrap();
    assert_eq!(contacts, vec![Contact::new("Dana Photo", vec!["555".into()])]);
}

#[test]
fn e2e_ingest_padded_photo_payloads_keep_following_fields() {
    let contacts = convert::ingest(&fixture("photo_padded.vcf")).unwrap();
    assert_eq!(
        contacts,
        vec![
            Contact::new("Erin Padded", vec!["555".into()]),
            Contact::new("Finn Padded", vec!["666".into()]),
            Contact::new("Gale Padded", vec!["777".into()]),
        ]
    );
}

#[test]
fn e2e_ingest_vcard21_quoted_printable() {
    let contacts = convert::ingest(&fixture("vcard21_qp.vcf")).unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "J\u{fc}rgen M\u{fc}ller");
    assert_eq!(
        contacts[0].phone_numbers,
        vec!["+49 170 1234567", "+49 30 7654321"]
    );
    assert_eq!(contacts[1].name, "Very Long Display Name");
    assert_eq!(contacts[1].phone_numbers, vec!["0301112233"]);
}

#[test]
fn e2e_ingest_unterminated_card_is_parse_error() {
    let err = convert::ingest(&fixture("malformed.vcf")).unwrap_err();
    match err {
        IngestError::Parse { path, source } => {
            assert!(path.ends_with("malformed.vcf"));
            assert_eq!(source.card, 2, "error should name the unclosed card");
        }
        other => panic!("expected Parse error, got {other:?}"),
    }
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn e2e_filter_is_case_insensitive_and_trimmed() {
    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();

    let names = |query: &str| -> Vec<String> {
        convert::filter(&contacts, query)
            .into_iter()
            .map(|c| c.name)
            .collect()
    };

    assert_eq!(names("  SMITH "), vec!["Alice Smith"]);
    assert_eq!(names("o"), vec!["Bob Jones", "Carol"]);
    assert_eq!(names(""), vec!["Alice Smith", "Bob Jones", "Carol"]);
    assert!(names("zzz").is_empty());
}

#[test]
fn e2e_filter_is_subsequence_of_input() {
    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    for query in ["", "a", "B", "jones", "x"] {
        let filtered = convert::filter(&contacts, query);
        let mut rest = contacts.iter();
        for kept in &filtered {
            assert!(
                rest.any(|c| c == kept),
                "filter({query:?}) reordered or invented {kept:?}"
            );
        }
        assert_eq!(convert::filter(&filtered, query), filtered);
    }
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn e2e_export_xlsx_round_trips_table() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("contacts.xlsx");

    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    let rows = convert::export(&contacts, &dest, &ExportOptions::default()).unwrap();
    assert_eq!(rows, 3);

    let cells = read_sheet(&dest, "Contacts");
    assert_eq!(
        cells,
        vec![
            vec!["Name", "Phone1", "Phone2"],
            vec!["Alice Smith", "123", "456"],
            vec!["Bob Jones", "789", ""],
            vec!["Carol", "", ""],
        ]
    );
}

#[test]
fn e2e_export_filtered_set_recomputes_phone_columns() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("bob.xlsx");

    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    let filtered = convert::filter(&contacts, "bob");
    let options = ExportOptions {
        sheet_name: "People".to_string(),
        format: None,
    };
    convert::export(&filtered, &dest, &options).unwrap();

    assert_eq!(
        read_sheet(&dest, "People"),
        vec![vec!["Name", "Phone1"], vec!["Bob Jones", "789"]]
    );
}

#[test]
fn e2e_export_contact_without_numbers_keeps_one_phone_column() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("carol.xlsx");

    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    let filtered = convert::filter(&contacts, "carol");
    convert::export(&filtered, &dest, &ExportOptions::default()).unwrap();

    assert_eq!(
        read_sheet(&dest, "Contacts"),
        vec![vec!["Name", "Phone1"], vec!["Carol", ""]]
    );
}

#[test]
fn e2e_export_nothing_matching_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("empty.xlsx");

    let contacts = convert::ingest(&fixture("alice_bob.vcf")).unwrap();
    let filtered = convert::filter(&contacts, "nobody");
    let err = convert::export(&filtered, &dest, &ExportOptions::default()).unwrap_err();

    assert!(err.is_nothing_to_export());
    assert!(!dest.exists());
}

#[test]
fn e2e_export_csv_matches_table() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("contacts.csv");

    let contacts = convert::ingest(&fixture("photo.vcf")).unwrap();
    convert::export(&contacts, &dest, &ExportOptions::default()).unwrap();

    assert_eq!(
        std::fs::read_to_string(&dest).unwrap(),
        "Name,Phone1\nDana Photo,555\n"
    );
}
