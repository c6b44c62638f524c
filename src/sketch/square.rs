/// GPU-compatible square instance, read by the square vertex shader.
///
/// Layout: 32 bytes total.
/// - center: [f32; 2] = 8 bytes - Center in logical canvas pixels (y down)
/// - rotation: f32 = 4 bytes - Radians, clockwise on screen
/// - half_size: f32 = 4 bytes - Half the side length
/// - color: [f32; 4] = 16 bytes - Fill RGBA
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSquare {
    pub center: [f32; 2],
    pub rotation: f32,
    pub half_size: f32,
    pub color: [f32; 4],
}

impl GpuSquare {
    pub fn new(center: (f64, f64), rotation: f64, size: f64, color: [f32; 4]) -> Self {
        Self {
            center: [center.0 as f32, center.1 as f32],
            rotation: rotation as f32,
            half_size: (size * 0.5) as f32,
            color,
        }
    }

    /// Corner positions after rotation, in canvas pixels.
    /// Mirrors the vertex shader; used to check transforms on the CPU.
    #[allow(dead_code)]
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let (sin, cos) = self.rotation.sin_cos();
        let h = self.half_size;
        [[-h, -h], [h, -h], [h, h], [-h, h]].map(|[x, y]| {
            [
                self.center[0] + x * cos - y * sin,
                self.center[1] + x * sin + y * cos,
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_size() {
        assert_eq!(std::mem::size_of::<GpuSquare>(), 32);
    }

    #[test]
    fn test_unrotated_corners() {
        let square = GpuSquare::new((30.0, 60.0), 0.0, 18.0, [1.0; 4]);
        assert_eq!(
            square.corners(),
            [[21.0, 51.0], [39.0, 51.0], [39.0, 69.0], [21.0, 69.0]]
        );
    }

    #[test]
    fn test_quarter_turn_is_clockwise() {
        // With y pointing down, +90° sends the right-hand corner downward
        let square = GpuSquare::new((0.0, 0.0), std::f64::consts::FRAC_PI_2, 2.0, [1.0; 4]);
        let top_right = square.corners()[1];
        assert!((top_right[0] - 1.0).abs() < 1e-6);
        assert!((top_right[1] - 1.0).abs() < 1e-6);
    }
}
