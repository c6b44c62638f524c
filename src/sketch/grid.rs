use crate::config::SPACING;

/// Regular grid of cell origins over a canvas, column-major like the
/// sketch's nested x/y loops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub width: f64,
    pub height: f64,
    pub spacing: f64,
}

impl Grid {
    pub fn new(width: f64, height: f64, spacing: f64) -> Self {
        Self {
            width,
            height,
            spacing,
        }
    }

    /// Grid over a canvas with the default spacing
    pub fn with_default_spacing(width: f64, height: f64) -> Self {
        Self::new(width, height, SPACING)
    }

    /// Cells along the x axis: origins at 0, spacing, ... < width
    pub fn columns(&self) -> usize {
        axis_steps(self.width, self.spacing)
    }

    /// Cells along the y axis
    pub fn rows(&self) -> usize {
        axis_steps(self.height, self.spacing)
    }

    pub fn len(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every cell origin, x outer and y inner
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let rows = self.rows();
        (0..self.columns()).flat_map(move |i| {
            (0..rows).map(move |j| (i as f64 * self.spacing, j as f64 * self.spacing))
        })
    }
}

fn axis_steps(extent: f64, spacing: f64) -> usize {
    if extent <= 0.0 || spacing <= 0.0 {
        return 0;
    }
    (extent / spacing).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_count_matches_ceil() {
        let cases = [(900.0, 600.0), (901.0, 601.0), (1280.0, 800.0), (29.0, 31.0), (30.0, 30.0)];
        for (w, h) in cases {
            let grid = Grid::with_default_spacing(w, h);
            let expected = (w / 30.0_f64).ceil() as usize * (h / 30.0_f64).ceil() as usize;
            assert_eq!(grid.len(), expected, "canvas {}x{}", w, h);
            assert_eq!(grid.cells().count(), expected, "canvas {}x{}", w, h);
        }
    }

    #[test]
    fn test_cells_within_bounds() {
        let grid = Grid::with_default_spacing(1000.0, 700.0);
        for (x, y) in grid.cells() {
            assert!(x >= 0.0 && x < 1000.0, "x out of range: {}", x);
            assert!(y >= 0.0 && y < 700.0, "y out of range: {}", y);
        }
    }

    #[test]
    fn test_iteration_order() {
        let grid = Grid::with_default_spacing(60.0, 60.0);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells, vec![(0.0, 0.0), (0.0, 30.0), (30.0, 0.0), (30.0, 30.0)]);
    }

    #[test]
    fn test_empty_canvas() {
        assert!(Grid::with_default_spacing(0.0, 500.0).is_empty());
        assert!(Grid::with_default_spacing(500.0, 0.0).is_empty());
        assert_eq!(Grid::with_default_spacing(0.0, 0.0).cells().count(), 0);
    }
}
