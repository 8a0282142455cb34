use viewer_core::{PanelSurface, PolygonHandle, RenderSurface};
use viewer_logging::viewer_info;

/// Axis-aligned bounds of one polygon in surface coordinates.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_row: f64,
    min_col: f64,
    max_row: f64,
    max_col: f64,
}

/// Console stand-in for the interactive map: polygons become registered
/// shapes with bounds, and focus/highlight calls become log lines. Anything
/// implementing the two core traits could replace it.
pub struct ConsoleSurface {
    polygons: Vec<(String, Bounds)>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            polygons: Vec::new(),
        }
    }

    /// Adds a polygon and hands back the handle the selection index keys on.
    pub fn add_polygon(&mut self, region_id: &str, points: &[(f64, f64)]) -> PolygonHandle {
        let mut bounds = Bounds {
            min_row: f64::INFINITY,
            min_col: f64::INFINITY,
            max_row: f64::NEG_INFINITY,
            max_col: f64::NEG_INFINITY,
        };
        for &(row, col) in points {
            bounds.min_row = bounds.min_row.min(row);
            bounds.min_col = bounds.min_col.min(col);
            bounds.max_row = bounds.max_row.max(row);
            bounds.max_col = bounds.max_col.max(col);
        }
        let handle = PolygonHandle(self.polygons.len() as u64);
        self.polygons.push((region_id.to_string(), bounds));
        handle
    }

    fn polygon(&self, handle: PolygonHandle) -> Option<&(String, Bounds)> {
        self.polygons.get(handle.0 as usize)
    }
}

impl RenderSurface for ConsoleSurface {
    fn fit_bounds(&mut self, handle: PolygonHandle) {
        if let Some((id, bounds)) = self.polygon(handle) {
            viewer_info!(
                "view fitted to region {id} [{:.0},{:.0}]..[{:.0},{:.0}]",
                bounds.min_row,
                bounds.min_col,
                bounds.max_row,
                bounds.max_col
            );
        }
    }

    fn highlight(&mut self, handle: PolygonHandle) {
        if let Some((id, _)) = self.polygon(handle) {
            viewer_info!("region {id} highlighted");
        }
    }

    fn clear_highlight(&mut self, handle: PolygonHandle) {
        if let Some((id, _)) = self.polygon(handle) {
            viewer_info!("region {id} highlight cleared");
        }
    }
}

impl PanelSurface for ConsoleSurface {
    fn scroll_to(&mut self, region_id: &str) {
        viewer_info!("panel entry {region_id} scrolled into view");
    }

    fn flash(&mut self, region_id: &str) {
        viewer_info!("panel entry {region_id} flashed");
    }

    fn clear_flash(&mut self, region_id: &str) {
        viewer_info!("panel entry {region_id} flash cleared");
    }
}
