/// Convert HSB to RGBA.
///
/// `hue` is in degrees (wraps at 360), `saturation` and `brightness` are
/// percentages. Output channels are in [0, 1] with opaque alpha.
pub fn hsb_to_rgba(hue: f64, saturation: f64, brightness: f64) -> [f32; 4] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = (saturation / 100.0).clamp(0.0, 1.0);
    let v = (brightness / 100.0).clamp(0.0, 1.0);

    let chroma = v * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [(r + m) as f32, (g + m) as f32, (b + m) as f32, 1.0]
}
