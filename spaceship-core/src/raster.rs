/// Line rasterization onto a character grid
use std::io;

/// How a segment should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Blank cell
    #[default]
    Empty,
    /// A mesh edge
    Edge,
    /// One side of a front-facing triangle
    Face,
}

/// A projected line between two grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: (i32, i32),
    pub to: (i32, i32),
    pub style: Style,
}

/// A grid of character cells that can be drawn on
pub trait Surface {
    /// `(columns, rows)`
    fn size(&self) -> (u16, u16);

    fn clear(&mut self);

    /// Set a single cell. Cells outside the grid must be ignored.
    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style);

    /// Make everything drawn since the last `clear` visible
    fn present(&mut self) -> io::Result<()>;
}

/// Cells visited by a Bresenham line, both endpoints included.
///
/// Endpoints are put in a fixed order before stepping, so a segment and its
/// reverse visit the same cells in the same sequence.
#[derive(Debug, Clone)]
pub struct Line {
    x: i32,
    y: i32,
    end: (i32, i32),
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl Iterator for Line {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let cell = (self.x, self.y);
        if cell == self.end {
            self.done = true;
            return Some(cell);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(cell)
    }
}

/// Rasterize the segment between `a` and `b`
pub fn line(a: (i32, i32), b: (i32, i32)) -> Line {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    let dx = (i64::from(end.0) - i64::from(start.0)).abs();
    let dy = (i64::from(end.1) - i64::from(start.1)).abs();
    Line {
        x: start.0,
        y: start.1,
        end,
        dx,
        dy,
        sx: if start.0 < end.0 { 1 } else { -1 },
        sy: if start.1 < end.1 { 1 } else { -1 },
        err: dx - dy,
        done: false,
    }
}

/// Plot a line onto a surface
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    from: (i32, i32),
    to: (i32, i32),
    glyph: char,
    style: Style,
) {
    for (col, row) in line(from, to) {
        surface.set_cell(col, row, glyph, style);
    }
}

/// Plot every segment with the same glyph
pub fn draw_segments<S: Surface + ?Sized>(surface: &mut S, segments: &[Segment], glyph: char) {
    for segment in segments {
        draw_line(surface, segment.from, segment.to, glyph, segment.style);
    }
}

/// An in-memory character grid
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<(char, Style)>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Style::Empty); width * height],
        }
    }

    /// Reallocate for a new size, clearing every cell
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![(' ', Style::Empty); width * height];
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<(char, Style)> {
        if col < self.width && row < self.height {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[(char, Style)]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of non-blank cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|(_, style)| *style != Style::Empty).count()
    }
}

impl Surface for CellGrid {
    fn size(&self) -> (u16, u16) {
        (
            u16::try_from(self.width).unwrap_or(u16::MAX),
            u16::try_from(self.height).unwrap_or(u16::MAX),
        )
    }

    fn clear(&mut self) {
        self.cells.fill((' ', Style::Empty));
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
            return;
        };
        if col < self.width && row < self.height {
            self.cells[row * self.width + col] = (glyph, style);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let cells: Vec<_> = line((0, 0), (5, 0)).collect();
        assert_eq!(cells, (0..=5).map(|x| (x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_diagonal_line() {
        let cells: Vec<_> = line((0, 0), (5, 5)).collect();
        assert_eq!(cells, (0..=5).map(|i| (i, i)).collect::<Vec<_>>());
    }

    #[test]
    fn test_vertical_line_upward() {
        let cells: Vec<_> = line((2, 4), (2, 1)).collect();
        assert_eq!(cells, vec![(2, 1), (2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_single_point() {
        let cells: Vec<_> = line((3, -7), (3, -7)).collect();
        assert_eq!(cells, vec![(3, -7)]);
    }

    #[test]
    fn test_reverse_visits_same_cells() {
        let ends = [
            ((0, 0), (2, 1)),
            ((0, 0), (7, 3)),
            ((-4, 9), (6, -2)),
            ((10, 0), (0, 3)),
            ((1, 1), (1, 8)),
            ((-3, -3), (4, 12)),
        ];
        for (a, b) in ends {
            let forward: Vec<_> = line(a, b).collect();
            let backward: Vec<_> = line(b, a).collect();
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn test_line_is_connected_and_hits_endpoints() {
        for (a, b) in [((0, 0), (9, 4)), ((5, 5), (-3, 11)), ((0, 8), (3, -8))] {
            let cells: Vec<_> = line(a, b).collect();
            assert!(cells.contains(&a));
            assert!(cells.contains(&b));
            let major = (a.0 - b.0).abs().max((a.1 - b.1).abs()) as usize;
            assert_eq!(cells.len(), major + 1);
            for pair in cells.windows(2) {
                assert!((pair[0].0 - pair[1].0).abs() <= 1);
                assert!((pair[0].1 - pair[1].1).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_off_grid_cells_are_ignored() {
        let mut grid = CellGrid::new(4, 3);
        draw_line(&mut grid, (-5, 1), (10, 1), '#', Style::Edge);
        assert_eq!(grid.filled(), 4);
        assert_eq!(grid.get(0, 1), Some(('#', Style::Edge)));
        assert_eq!(grid.get(3, 1), Some(('#', Style::Edge)));
        assert_eq!(grid.get(0, 0), Some((' ', Style::Empty)));
    }

    #[test]
    fn test_draw_segments_and_clear() {
        let mut grid = CellGrid::new(8, 8);
        let segments = [
            Segment {
                from: (0, 0),
                to: (7, 0),
                style: Style::Edge,
            },
            Segment {
                from: (0, 7),
                to: (0, 1),
                style: Style::Face,
            },
        ];
        draw_segments(&mut grid, &segments, '#');
        assert_eq!(grid.filled(), 15);
        assert_eq!(grid.get(0, 4), Some(('#', Style::Face)));
        grid.clear();
        assert_eq!(grid.filled(), 0);
        assert_eq!(grid.size(), (8, 8));
    }
}
