use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// How long a focused polygon or flashed panel entry keeps its emphasis
/// before the host reverts it.
pub const HIGHLIGHT_REVERT: Duration = Duration::from_secs(2);

/// Opaque token issued by the rendering surface when a polygon is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolygonHandle(pub u64);

/// The slice of the rendering-surface contract the selection index drives:
/// recenter on a polygon and toggle its visual emphasis.
pub trait RenderSurface {
    fn fit_bounds(&mut self, handle: PolygonHandle);
    fn highlight(&mut self, handle: PolygonHandle);
    fn clear_highlight(&mut self, handle: PolygonHandle);
}

/// The transcript/table panel side: scroll an entry into view and toggle
/// its emphasis class.
pub trait PanelSurface {
    fn scroll_to(&mut self, region_id: &str);
    fn flash(&mut self, region_id: &str);
    fn clear_flash(&mut self, region_id: &str);
}

/// Two-way, id-keyed join between a region's overlay polygon and its panel
/// entry. Owned by the result view; lives exactly as long as one rendered
/// result.
#[derive(Debug, Default)]
pub struct SelectionIndex {
    polygons: HashMap<String, PolygonHandle>,
    panels: HashSet<String>,
}

impl SelectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_polygon(&mut self, region_id: impl Into<String>, handle: PolygonHandle) {
        self.polygons.insert(region_id.into(), handle);
    }

    pub fn register_panel(&mut self, region_id: impl Into<String>) {
        self.panels.insert(region_id.into());
    }

    pub fn polygon(&self, region_id: &str) -> Option<PolygonHandle> {
        self.polygons.get(region_id).copied()
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Recenter the view on the region's polygon and apply the transient
    /// emphasis. An unregistered id is a lookup miss: logged and ignored.
    pub fn focus(&self, region_id: &str, surface: &mut dyn RenderSurface) -> bool {
        let Some(handle) = self.polygon(region_id) else {
            log::warn!("focus on unregistered region id {region_id:?}");
            return false;
        };
        surface.fit_bounds(handle);
        surface.highlight(handle);
        true
    }

    /// Reverts the emphasis applied by [`focus`](Self::focus). The host calls
    /// this after [`HIGHLIGHT_REVERT`].
    pub fn clear_focus(&self, region_id: &str, surface: &mut dyn RenderSurface) {
        if let Some(handle) = self.polygon(region_id) {
            surface.clear_highlight(handle);
        }
    }

    /// A click on the overlay polygon scrolls the paired panel entry into
    /// view and flashes it.
    pub fn polygon_clicked(&self, region_id: &str, panel: &mut dyn PanelSurface) -> bool {
        if !self.panels.contains(region_id) {
            log::warn!("polygon click for region id {region_id:?} with no panel entry");
            return false;
        }
        panel.scroll_to(region_id);
        panel.flash(region_id);
        true
    }

    pub fn clear_panel_flash(&self, region_id: &str, panel: &mut dyn PanelSurface) {
        if self.panels.contains(region_id) {
            panel.clear_flash(region_id);
        }
    }

    /// A click on a panel entry centers the map on the paired polygon.
    pub fn panel_clicked(&self, region_id: &str, surface: &mut dyn RenderSurface) -> bool {
        self.focus(region_id, surface)
    }
}
