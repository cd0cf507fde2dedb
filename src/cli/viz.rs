//! Terminal sheet diagrams using braille graphics
//!
//! Draws each sheet layout on a drawille canvas: the sheet border plus the
//! outline of every placed panel, scaled to a fixed terminal width. The
//! diagram is a convenience view; the JSON output is the contract for real
//! renderers.

use drawille::Canvas;

use crate::entities::layout::SheetLayout;

/// Canvas width in braille dots
const CANVAS_WIDTH: u32 = 160;

/// Render one sheet layout as a braille diagram
pub fn render_sheet(layout: &SheetLayout) -> String {
    if layout.sheet.width <= 0.0 || layout.sheet.height <= 0.0 {
        return String::new();
    }

    let scale = CANVAS_WIDTH as f64 / layout.sheet.width;
    let height = ((layout.sheet.height * scale).ceil() as u32).max(1);
    let mut canvas = Canvas::new(CANVAS_WIDTH, height);

    draw_rect(&mut canvas, 0, 0, CANVAS_WIDTH, height);

    for rect in &layout.placed {
        let x = (rect.x * scale).round() as u32;
        let y = (rect.y * scale).round() as u32;
        let w = ((rect.width * scale).round() as u32).max(1);
        let h = ((rect.height * scale).round() as u32).max(1);
        draw_rect(&mut canvas, x, y, w.min(CANVAS_WIDTH - x), h.min(height - y));
    }

    canvas.frame()
}

fn draw_rect(canvas: &mut Canvas, x: u32, y: u32, w: u32, h: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let x2 = x + w;
    let y2 = y + h;
    canvas.line(x, y, x2, y);
    canvas.line(x, y2, x2, y2);
    canvas.line(x, y, x, y2);
    canvas.line(x2, y, x2, y2);
}
