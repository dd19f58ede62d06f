//! A [`Host`] backed by a region of the terminal.

use ratatui::layout::Rect;

use crate::widget::Host;

/// Braille dots per terminal cell, horizontally and vertically.
const DOTS_PER_CELL: (f64, f64) = (2.0, 4.0);

/// Terminal region acting as the spinner's parent container.
///
/// Spinner units are mapped to Braille dots, scaled by `zoom`, which keeps the
/// square widget square on screen.
#[derive(Debug, Clone)]
pub struct TerminalHost {
    parent: Option<Rect>,
    zoom: f64,
    parent_enabled: bool,
    visible: bool,
    position: (f64, f64),
    side: f64,
    redraw_pending: bool,
}

impl TerminalHost {
    pub fn new(zoom: f64) -> Self {
        Self {
            parent: None,
            zoom: if zoom > 0.0 { zoom } else { 1.0 },
            parent_enabled: true,
            visible: false,
            position: (0.0, 0.0),
            side: 0.0,
            redraw_pending: true,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Attach to (or follow a resize of) the parent region.
    pub fn set_parent(&mut self, area: Rect) {
        if self.parent != Some(area) {
            self.parent = Some(area);
            self.redraw_pending = true;
        }
    }

    pub fn parent(&self) -> Option<Rect> {
        self.parent
    }

    pub fn is_parent_enabled(&self) -> bool {
        self.parent_enabled
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn side(&self) -> f64 {
        self.side
    }

    /// Consume the pending redraw request, if any.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Cells covered by the widget, clipped to the parent. `None` if nothing is visible.
    pub fn widget_area(&self) -> Option<Rect> {
        let parent = self.parent?;
        if !self.visible || self.side <= 0.0 {
            return None;
        }

        let to_cols = |units: f64| units * self.zoom / DOTS_PER_CELL.0;
        let to_rows = |units: f64| units * self.zoom / DOTS_PER_CELL.1;

        let x = to_cols(self.position.0).round().max(0.0) as u16;
        let y = to_rows(self.position.1).round().max(0.0) as u16;
        let width = to_cols(self.side).ceil().max(1.0) as u16;
        let height = to_rows(self.side).ceil().max(1.0) as u16;

        let area = Rect::new(
            parent.x.saturating_add(x),
            parent.y.saturating_add(y),
            width,
            height,
        )
        .intersection(parent);
        (!area.is_empty()).then_some(area)
    }
}

impl Host for TerminalHost {
    fn parent_size(&self) -> Option<(f64, f64)> {
        self.parent.map(|area| {
            (
                f64::from(area.width) * DOTS_PER_CELL.0 / self.zoom,
                f64::from(area.height) * DOTS_PER_CELL.1 / self.zoom,
            )
        })
    }

    fn set_parent_enabled(&mut self, enabled: bool) {
        self.parent_enabled = enabled;
        self.redraw_pending = true;
    }

    fn set_fixed_size(&mut self, side: f64) {
        self.side = side;
        self.redraw_pending = true;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    fn show(&mut self) {
        self.visible = true;
        self.redraw_pending = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.redraw_pending = true;
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_size_in_dots() {
        let mut host = TerminalHost::new(1.0);
        assert_eq!(host.parent_size(), None);
        host.set_parent(Rect::new(0, 0, 80, 24));
        assert_eq!(host.parent_size(), Some((160.0, 96.0)));

        let mut zoomed = TerminalHost::new(2.0);
        zoomed.set_parent(Rect::new(0, 0, 80, 24));
        assert_eq!(zoomed.parent_size(), Some((80.0, 48.0)));
    }

    #[test]
    fn test_widget_area_hidden() {
        let mut host = TerminalHost::new(1.0);
        host.set_parent(Rect::new(0, 0, 80, 24));
        host.set_fixed_size(40.0);
        assert_eq!(host.widget_area(), None);
    }

    #[test]
    fn test_widget_area_maps_units_to_cells() {
        let mut host = TerminalHost::new(1.0);
        host.set_parent(Rect::new(0, 1, 80, 24));
        host.set_fixed_size(40.0);
        host.move_to(60.0, 28.0);
        host.show();
        assert_eq!(host.widget_area(), Some(Rect::new(30, 8, 20, 10)));
    }

    #[test]
    fn test_widget_area_clipped_to_parent() {
        let mut host = TerminalHost::new(1.0);
        host.set_parent(Rect::new(0, 0, 10, 5));
        host.set_fixed_size(40.0);
        host.move_to(-20.0, -20.0);
        host.show();
        assert_eq!(host.widget_area(), Some(Rect::new(0, 0, 10, 5)));
    }

    #[test]
    fn test_take_redraw_consumes_request() {
        let mut host = TerminalHost::new(1.0);
        assert!(host.take_redraw());
        assert!(!host.take_redraw());
        host.request_redraw();
        assert!(host.take_redraw());
    }

    #[test]
    fn test_set_parent_same_area_does_not_request_redraw() {
        let mut host = TerminalHost::new(1.0);
        host.set_parent(Rect::new(0, 0, 10, 5));
        let _ = host.take_redraw();
        host.set_parent(Rect::new(0, 0, 10, 5));
        assert!(!host.take_redraw());
    }
}
