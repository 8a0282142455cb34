use pretty_assertions::assert_eq;
use viewer_engine::{
    count_tables, extract_regions, map_coordinates, parse_points, ExtractError, Point,
};

const PAGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
  <Page imageFilename="scan.png" imageWidth="1000" imageHeight="800">
    <TextRegion id="r1">
      <Coords points="10,10 500,10 500,100 10,100"/>
      <TextLine id="l1">
        <Coords points="10,20 490,20 490,60 10,60"/>
        <Word id="w1">
          <Coords points="10,20 50,20 50,60 10,60"/>
          <TextEquiv><Unicode>word-level</Unicode></TextEquiv>
        </Word>
        <TextEquiv><Unicode>line-level text</Unicode></TextEquiv>
      </TextLine>
      <TextLine id="l2">
        <Coords points="10,70 490,70 490,95 10,95"/>
      </TextLine>
    </TextRegion>
    <TableRegion id="t1">
      <Coords points="100,200 900,200 900,700 100,700"/>
      <TableCell id="c1"/>
    </TableRegion>
  </Page>
</PcGts>
"#;

#[test]
fn extracts_regions_in_document_order() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");

    assert_eq!(regions.tables.len(), 1);
    assert_eq!(regions.tables[0].id, "t1");
    let line_ids: Vec<&str> = regions.text_lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(line_ids, vec!["l1", "l2"]);
}

#[test]
fn count_tables_matches_extraction() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");
    assert_eq!(count_tables(PAGE_XML).expect("count ok"), regions.tables.len());
}

#[test]
fn line_level_transcription_wins_over_word_level() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");
    assert_eq!(
        regions.text_lines[0].transcription.as_deref(),
        Some("line-level text")
    );
}

#[test]
fn missing_transcription_is_absent_not_an_error() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");
    assert_eq!(regions.text_lines[1].transcription, None);
}

#[test]
fn polygons_flip_to_bottom_left_origin() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");

    // Pixel (100,200) in a 800px-high image lands at row 600, col 100.
    assert_eq!(
        regions.tables[0].polygon[0],
        Point {
            row: 600.0,
            col: 100.0
        }
    );
    assert_eq!(regions.tables[0].polygon.len(), 4);
}

#[test]
fn mapping_is_invertible() {
    let pixels = parse_points("12,34 56.5,78 90,11").expect("parse ok");
    let mapped = map_coordinates(&pixels, 800.0);

    let back: Vec<(f64, f64)> = mapped.iter().map(|p| (p.col, 800.0 - p.row)).collect();
    assert_eq!(back, pixels);
}

#[test]
fn table_raw_content_is_the_source_fragment() {
    let regions = extract_regions(PAGE_XML, 800.0).expect("extract ok");
    let raw = &regions.tables[0].raw_content;

    assert!(raw.starts_with("<TableRegion id=\"t1\">"));
    assert!(raw.contains("points=\"100,200 900,200 900,700 100,700\""));
    assert!(raw.ends_with("</TableRegion>"));
}

#[test]
fn malformed_xml_is_a_structured_error() {
    let err = extract_regions("<PcGts><Page>", 800.0).unwrap_err();
    assert!(matches!(err, ExtractError::Parse(_)));

    assert!(count_tables("not xml at all").is_err());
}

#[test]
fn document_without_page_is_rejected() {
    let err = extract_regions("<PcGts/>", 800.0).unwrap_err();
    assert!(matches!(err, ExtractError::MissingPage));
}

#[test]
fn unusable_regions_are_skipped_not_fatal() {
    viewer_logging::initialize_for_tests();
    let xml = r#"<PcGts><Page>
      <TableRegion id="no-coords"/>
      <TableRegion id="degenerate"><Coords points="1,1 2,2"/></TableRegion>
      <TableRegion><Coords points="1,1 2,1 2,2"/></TableRegion>
      <TableRegion id="ok"><Coords points="1,1 2,1 2,2 1,2"/></TableRegion>
    </Page></PcGts>"#;

    let regions = extract_regions(xml, 100.0).expect("extract ok");
    assert_eq!(regions.tables.len(), 1);
    assert_eq!(regions.tables[0].id, "ok");
}

#[test]
fn lines_outside_text_regions_are_ignored() {
    let xml = r#"<PcGts><Page>
      <TextLine id="stray"><Coords points="1,1 2,1 2,2"/></TextLine>
      <TextRegion id="r">
        <TextLine id="kept"><Coords points="1,1 2,1 2,2"/></TextLine>
      </TextRegion>
    </Page></PcGts>"#;

    let regions = extract_regions(xml, 100.0).expect("extract ok");
    let ids: Vec<&str> = regions.text_lines.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["kept"]);
}

#[test]
fn parse_points_rejects_garbage() {
    assert!(parse_points("1,2 3").is_err());
    assert!(parse_points("1,two").is_err());
    assert_eq!(parse_points("").expect("empty ok"), Vec::new());
}
