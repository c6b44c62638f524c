//! The entropy clock sketch: entropy state, noise field, and the per-frame
//! layout of squares. Everything here is pure CPU math; the GPU side only
//! consumes the `GpuSquare` list a frame produces.

mod color;
mod entropy;
mod field;
mod grid;
mod square;

pub use color::hsb_to_rgba;
pub use entropy::Entropy;
pub use field::{hue, offset, rotation, NoiseField};
pub use grid::Grid;
pub use square::GpuSquare;

use crate::config::{BRIGHTNESS, SATURATION, SPACING, SQUARE_RATIO};

/// Sketch state owned by the render loop
pub struct Sketch {
    entropy: Entropy,
    field: NoiseField,
    frame_count: u64,
}

impl Sketch {
    pub fn new(seed: u32) -> Self {
        Self {
            entropy: Entropy::new(),
            field: NoiseField::new(seed),
            frame_count: 0,
        }
    }

    pub fn entropy(&self) -> f64 {
        self.entropy.value()
    }

    pub fn is_saturated(&self) -> bool {
        self.entropy.is_saturated()
    }

    /// Frames drawn so far; the first frame is 1
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn seed(&self) -> u32 {
        self.field.seed()
    }

    /// Press handler
    pub fn press(&mut self) {
        self.entropy.press();
    }

    /// Run one frame: advance time and entropy, then lay out every square
    /// for a `width` x `height` canvas into `out`.
    pub fn frame(&mut self, width: f64, height: f64, out: &mut Vec<GpuSquare>) {
        self.frame_count += 1;
        self.entropy.advance();
        self.layout(width, height, out);
    }

    /// Squares for the current frame and entropy, without advancing either
    pub fn layout(&self, width: f64, height: f64, out: &mut Vec<GpuSquare>) {
        let entropy = self.entropy.value();
        let grid = Grid::with_default_spacing(width, height);
        let color = hsb_to_rgba(hue(entropy), SATURATION, BRIGHTNESS);
        let size = SPACING * SQUARE_RATIO;

        out.clear();
        if grid.is_empty() {
            return;
        }
        out.reserve(grid.len());
        out.extend(grid.cells().map(|(x, y)| {
            let n = self.field.sample(x, y, self.frame_count);
            let offset = offset(n, entropy);
            GpuSquare::new((x + offset, y + offset), rotation(offset, entropy), size, color)
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_advances_entropy_and_count() {
        let mut sketch = Sketch::new(1);
        let mut squares = Vec::new();
        for _ in 0..250 {
            sketch.frame(300.0, 300.0, &mut squares);
        }
        assert_eq!(sketch.frame_count(), 250);
        assert!((sketch.entropy() - 2.5).abs() < 1e-6);

        sketch.press();
        assert!((sketch.entropy() - 1.5).abs() < 1e-6);
        for _ in 0..10 {
            sketch.press();
        }
        assert_eq!(sketch.entropy(), 0.0);
    }

    #[test]
    fn test_zero_entropy_layout_is_aligned() {
        let sketch = Sketch::new(5);
        let mut squares = Vec::new();
        sketch.layout(120.0, 90.0, &mut squares);

        let grid = Grid::with_default_spacing(120.0, 90.0);
        assert_eq!(squares.len(), grid.len());
        for (square, (x, y)) in squares.iter().zip(grid.cells()) {
            assert_eq!(square.center, [x as f32, y as f32]);
            assert_eq!(square.rotation, 0.0);
            assert_eq!(square.half_size, 9.0);
        }
    }

    #[test]
    fn test_square_count_matches_grid() {
        let mut sketch = Sketch::new(9);
        let mut squares = Vec::new();
        sketch.frame(1001.0, 499.0, &mut squares);
        assert_eq!(squares.len(), 34 * 17);

        // Buffer is reused, not appended to
        sketch.frame(60.0, 60.0, &mut squares);
        assert_eq!(squares.len(), 4);
    }

    #[test]
    fn test_offsets_bounded_by_entropy() {
        let mut sketch = Sketch::new(21);
        let mut squares = Vec::new();
        for _ in 0..300 {
            sketch.frame(240.0, 240.0, &mut squares);
        }
        let reach = (sketch.entropy() * 10.0) as f32 + 1e-3;
        let grid = Grid::with_default_spacing(240.0, 240.0);
        for (square, (x, y)) in squares.iter().zip(grid.cells()) {
            let dx = square.center[0] - x as f32;
            let dy = square.center[1] - y as f32;
            assert!((dx - dy).abs() < 1e-3, "offset must match on both axes");
            assert!(dx.abs() <= reach, "offset {} exceeds {}", dx, reach);
        }
    }

    #[test]
    fn test_all_squares_share_entropy_hue() {
        let mut sketch = Sketch::new(2);
        let mut squares = Vec::new();
        for _ in 0..100 {
            sketch.frame(150.0, 150.0, &mut squares);
        }
        let expected = hsb_to_rgba(hue(sketch.entropy()), 80.0, 100.0);
        assert!(squares.iter().all(|s| s.color == expected));
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = Sketch::new(77);
        let mut b = Sketch::new(77);
        let (mut sa, mut sb) = (Vec::new(), Vec::new());
        for _ in 0..20 {
            a.frame(200.0, 120.0, &mut sa);
            b.frame(200.0, 120.0, &mut sb);
        }
        assert_eq!(sa, sb);
    }
}
