use roxmltree::{Document, Node};
use thiserror::Error;
use viewer_logging::viewer_warn;

use crate::coords::{map_coordinates, parse_points, Point};

/// A detected table region. `raw_content` keeps the serialized source
/// fragment as the fallback display when no HTML rendering exists.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    pub id: String,
    pub polygon: Vec<Point>,
    pub raw_content: String,
}

/// A text line nested under a text-region container.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLineRegion {
    pub id: String,
    pub polygon: Vec<Point>,
    /// Line-level transcription; word-level annotations are ignored.
    pub transcription: Option<String>,
}

/// Extraction output, both lists in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSet {
    pub tables: Vec<TableRegion>,
    pub text_lines: Vec<TextLineRegion>,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is not well-formed XML: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("document has no <Page> element")]
    MissingPage,
}

/// Parses PAGE-XML into typed regions with polygons mapped into the
/// rendering surface's bottom-left-origin coordinates.
///
/// Individual regions with missing ids or unusable polygons are skipped
/// with a warning; only a malformed document or a missing `<Page>` root
/// structure fails the whole call.
pub fn extract_regions(xml_text: &str, image_height: f64) -> Result<RegionSet, ExtractError> {
    let doc = Document::parse(xml_text)?;
    let page = doc
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "Page")
        .ok_or(ExtractError::MissingPage)?;

    let mut regions = RegionSet::default();
    for node in page.descendants().filter(Node::is_element) {
        match node.tag_name().name() {
            "TableRegion" => {
                let Some((id, polygon)) = region_basics(node, image_height) else {
                    continue;
                };
                regions.tables.push(TableRegion {
                    id,
                    polygon,
                    raw_content: xml_text[node.range()].to_string(),
                });
            }
            "TextLine" if under_text_region(node) => {
                let Some((id, polygon)) = region_basics(node, image_height) else {
                    continue;
                };
                regions.text_lines.push(TextLineRegion {
                    id,
                    polygon,
                    transcription: line_transcription(node),
                });
            }
            _ => {}
        }
    }
    Ok(regions)
}

/// Counts table-region elements without running the full extraction.
pub fn count_tables(xml_text: &str) -> Result<usize, ExtractError> {
    let doc = Document::parse(xml_text)?;
    Ok(doc
        .descendants()
        .filter(|node| node.is_element() && node.tag_name().name() == "TableRegion")
        .count())
}

fn under_text_region(node: Node<'_, '_>) -> bool {
    node.ancestors()
        .skip(1)
        .any(|a| a.is_element() && a.tag_name().name() == "TextRegion")
}

/// Id plus mapped polygon, or `None` (with a warning) when the element
/// cannot be placed on the surface.
fn region_basics(node: Node<'_, '_>, image_height: f64) -> Option<(String, Vec<Point>)> {
    let tag = node.tag_name().name();
    let Some(id) = node.attribute("id") else {
        viewer_warn!("skipping <{tag}> without an id attribute");
        return None;
    };
    let Some(points_attr) = node
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == "Coords")
        .and_then(|coords| coords.attribute("points"))
    else {
        viewer_warn!("skipping <{tag}> {id:?}: no Coords points");
        return None;
    };
    let pixel_points = match parse_points(points_attr) {
        Ok(points) => points,
        Err(err) => {
            viewer_warn!("skipping <{tag}> {id:?}: {err}");
            return None;
        }
    };
    if pixel_points.len() < 3 {
        viewer_warn!(
            "skipping <{tag}> {id:?}: polygon has {} points, need at least 3",
            pixel_points.len()
        );
        return None;
    }
    Some((id.to_string(), map_coordinates(&pixel_points, image_height)))
}

/// The transcription is the `TextEquiv/Unicode` text where the `TextEquiv`
/// is a direct child of the line. Word-level equivalents sit deeper in the
/// tree and must not leak into the line value.
fn line_transcription(line: Node<'_, '_>) -> Option<String> {
    let text_equiv = line
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == "TextEquiv")?;
    text_equiv
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == "Unicode")
        .and_then(|unicode| unicode.text())
        .map(str::to_string)
}
