//! Presenting a [`Pixmap`] on a terminal.

use nexum_core::Rgba;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::pixmap::Pixmap;

/// Glyph whose foreground paints the top half of a cell.
const UPPER_HALF: &str = "▀";

/// Logical pixels per terminal column.
pub const CELL_WIDTH: f32 = 8.0;
/// Logical pixels per terminal row.
pub const CELL_HEIGHT: f32 = 16.0;
/// Device pixels per logical pixel: one per column, two per row.
pub const TERMINAL_PIXEL_RATIO: f32 = 1.0 / CELL_WIDTH;

/// Draws two device pixels per cell, top in the foreground and bottom in the
/// background, flattened onto an opaque backdrop.
#[derive(Debug, Clone, Copy)]
pub struct CanvasView<'a> {
    pixmap: &'a Pixmap,
    backdrop: Rgba,
}

impl<'a> CanvasView<'a> {
    pub fn new(pixmap: &'a Pixmap) -> Self {
        Self {
            pixmap,
            backdrop: Rgba::BLACK,
        }
    }

    pub fn backdrop(mut self, backdrop: Rgba) -> Self {
        self.backdrop = backdrop;
        self
    }

    fn cell(&self, x: u16, y: u16) -> Span<'static> {
        let top = self
            .pixmap
            .composite_over(x as u32, y as u32 * 2, self.backdrop);
        let bottom = self
            .pixmap
            .composite_over(x as u32, y as u32 * 2 + 1, self.backdrop);
        Span::styled(
            UPPER_HALF,
            Style::default().fg(top.to_color()).bg(bottom.to_color()),
        )
    }

    /// One line of spans per terminal row.
    pub fn lines(&self, width: u16, height: u16) -> Vec<Line<'static>> {
        (0..height)
            .map(|y| Line::from((0..width).map(|x| self.cell(x, y)).collect::<Vec<_>>()))
            .collect()
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines(area.width, area.height)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use nexum_core::Point;
    use ratatui::style::Color;

    use super::*;
    use crate::surface::Surface;

    #[test]
    fn test_cell_splits_rows() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.blend_point(Point::new(0.0, 0.0), Rgba::rgb(255, 0, 0));
        pixmap.blend_point(Point::new(0.0, 1.0), Rgba::rgb(0, 0, 255));

        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&pixmap).render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), UPPER_HALF);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(1, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_area_larger_than_pixmap_shows_backdrop() {
        let pixmap = Pixmap::new(1, 1).unwrap();
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&pixmap)
            .backdrop(Rgba::rgb(1, 2, 3))
            .render(area, &mut buf);
        assert_eq!(buf[(2, 1)].fg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_terminal_ratio_maps_cells_to_pixels() {
        assert_eq!(CELL_WIDTH * TERMINAL_PIXEL_RATIO, 1.0);
        assert_eq!(CELL_HEIGHT * TERMINAL_PIXEL_RATIO, 2.0);
    }
}
