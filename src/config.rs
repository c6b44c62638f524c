/// Distance between grid cells in logical pixels (both axes)
pub const SPACING: f64 = 30.0;

/// Side of each square relative to the grid spacing
pub const SQUARE_RATIO: f64 = 0.6;

// ============================================
// Entropy
// ============================================

/// Entropy gained every frame
pub const ENTROPY_INCREASE: f64 = 0.01;

/// Entropy ceiling
pub const MAX_ENTROPY: f64 = 5.0;

/// Entropy removed by a single press
pub const PRESS_DECREMENT: f64 = 1.0;

// ============================================
// Noise Field
// ============================================

/// Spatial frequency of the noise field (per logical pixel)
pub const NOISE_SCALE: f64 = 0.02;

/// Temporal frequency of the noise field (per frame)
pub const NOISE_TIME_SCALE: f64 = 0.01;

/// Number of noise octaves summed per sample
pub const NOISE_OCTAVES: usize = 4;

/// Amplitude falloff between octaves
pub const NOISE_FALLOFF: f64 = 0.5;

/// Offset range per unit of entropy: offset ∈ [-entropy * k, entropy * k]
pub const OFFSET_SCALE: f64 = 10.0;

/// Rotation (radians) per unit of offset per unit of entropy
pub const ROTATION_SCALE: f64 = 0.01;

// ============================================
// Color
// ============================================

/// Hue range end (degrees) reached at MAX_ENTROPY
pub const MAX_HUE: f64 = 360.0;

/// Fill saturation in percent
pub const SATURATION: f64 = 80.0;

/// Fill brightness in percent
pub const BRIGHTNESS: f64 = 100.0;

/// Opacity of the black layer composited over the canvas every frame
pub const FADE_ALPHA: f32 = 10.0 / 255.0;

// ============================================
// Window
// ============================================

pub const WINDOW_TITLE: &str = "Entropy Clock";

/// Initial window size in logical pixels
pub const INITIAL_WIDTH: u32 = 1280;
pub const INITIAL_HEIGHT: u32 = 800;

/// Animation rate the frame pacer aims for
pub const TARGET_FPS: f64 = 60.0;
