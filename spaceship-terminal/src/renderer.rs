/// Character-grid surface drawn to the terminal with crossterm
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use spaceship_core::{CellGrid, Style, Surface};
use std::io::{self, Write};

/// Foreground color for each cell style
fn style_color(style: Style) -> Color {
    match style {
        Style::Empty => Color::Reset,
        Style::Edge => Color::Cyan,
        Style::Face => Color::White,
    }
}

/// A [`Surface`] that buffers one frame in memory and writes it out on
/// [`Surface::present`]
pub struct TerminalSurface<W: Write> {
    grid: CellGrid,
    writer: W,
    status: Option<String>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            grid: CellGrid::new(usize::from(width), usize::from(height)),
            writer,
            status: None,
        }
    }

    /// Follow terminal resizes. Reallocates only when the size changed.
    pub fn sync_size(&mut self, width: u16, height: u16) {
        if self.grid.size() != (width, height) {
            log::debug!("Terminal resized to {}x{}", width, height);
            self.grid.resize(usize::from(width), usize::from(height));
        }
    }

    /// Text drawn over the first row on the next present
    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (u16, u16) {
        self.grid.size()
    }

    fn clear(&mut self) {
        self.grid.clear();
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        self.grid.set_cell(col, row, glyph, style);
    }

    fn present(&mut self) -> io::Result<()> {
        let mut current = None;
        for (y, row) in self.grid.rows().enumerate() {
            // Raw mode does not return the carriage on '\n'
            self.writer.queue(cursor::MoveTo(0, y as u16))?;
            for &(glyph, style) in row {
                let color = style_color(style);
                if current != Some(color) {
                    self.writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                self.writer.queue(Print(glyph))?;
            }
        }

        if let Some(status) = &self.status {
            let width = self.grid.width();
            let text: String = status.chars().take(width).collect();
            self.writer
                .queue(cursor::MoveTo(0, 0))?
                .queue(Clear(ClearType::CurrentLine))?
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(text))?;
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spaceship_core::raster::draw_line;

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8_lossy(surface.writer()).into_owned()
    }

    #[test]
    fn test_present_writes_drawn_cells() {
        let mut surface = TerminalSurface::new(Vec::new(), 10, 3);
        draw_line(&mut surface, (0, 1), (9, 1), '#', Style::Edge);
        surface.present().unwrap();
        let out = output(&surface);
        assert_eq!(out.matches('#').count(), 10);
    }

    #[test]
    fn test_status_is_truncated_to_width() {
        let mut surface = TerminalSurface::new(Vec::new(), 5, 2);
        surface.set_status(Some("abcdefghij".to_string()));
        surface.present().unwrap();
        let out = output(&surface);
        assert!(out.contains("abcde"));
        assert!(!out.contains("abcdef"));
    }

    #[test]
    fn test_sync_size_resizes_grid() {
        let mut surface = TerminalSurface::new(Vec::new(), 10, 3);
        surface.set_cell(1, 1, '#', Style::Face);
        surface.sync_size(10, 3);
        assert_eq!(surface.grid().filled(), 1);
        surface.sync_size(20, 6);
        assert_eq!(surface.size(), (20, 6));
        assert_eq!(surface.grid().filled(), 0);
    }

    #[test]
    fn test_zero_size_present_is_harmless() {
        let mut surface = TerminalSurface::new(Vec::new(), 0, 0);
        surface.set_cell(0, 0, '#', Style::Edge);
        assert!(surface.present().is_ok());
    }
}
