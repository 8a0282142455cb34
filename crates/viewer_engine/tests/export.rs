use std::fs;

use pretty_assertions::assert_eq;
use viewer_engine::{export_tables, table_filename, TableDocument};

fn doc(id: &str, html: &str) -> TableDocument {
    TableDocument {
        table_id: id.to_string(),
        html: html.to_string(),
    }
}

#[test]
fn writes_one_html_file_per_table() {
    let dir = tempfile::tempdir().expect("tempdir");

    let written = export_tables(
        dir.path(),
        &[
            doc("t1", "<table><tr><td>a</td></tr></table>"),
            doc("t2", "<table><tr><td>b</td></tr></table>"),
        ],
    )
    .expect("export ok");

    assert_eq!(written.len(), 2);
    assert_eq!(written[0].file_name().unwrap(), "t1.html");

    let content = fs::read_to_string(&written[0]).expect("read back");
    assert!(content.starts_with("<!DOCTYPE html>"));
    assert!(content.contains("<table><tr><td>a</td></tr></table>"));
    assert!(content.contains("<title>t1</title>"));
}

#[test]
fn re_export_overwrites_cleanly() {
    let dir = tempfile::tempdir().expect("tempdir");

    export_tables(dir.path(), &[doc("t1", "<table>old</table>")]).expect("first export");
    let written = export_tables(dir.path(), &[doc("t1", "<table>new</table>")])
        .expect("second export");

    let content = fs::read_to_string(&written[0]).expect("read back");
    assert!(content.contains("<table>new</table>"));
    assert!(!content.contains("old"));
}

#[test]
fn table_ids_are_sanitized_for_the_filesystem() {
    assert_eq!(table_filename("t1"), "t1.html");
    assert_eq!(table_filename("tab/le:1"), "tab_le_1.html");
    assert_eq!(table_filename("..."), "table.html");
}

#[test]
fn creates_missing_output_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("exports").join("tables");

    let written = export_tables(&nested, &[doc("t9", "<table/>")]).expect("export ok");
    assert!(written[0].exists());
}
