use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, starting
/// at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Plot series colours
// ---------------------------------------------------------------------------

/// Colours for the scatter plot: data points and the fitted line.
#[derive(Debug, Clone, Copy)]
pub struct SeriesColors {
    pub points: Color32,
    pub fit: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        // Blue points, complementary orange line.
        let palette = generate_palette(2, 210.0);
        Self {
            points: palette.first().copied().unwrap_or(Color32::LIGHT_BLUE),
            fit: palette.get(1).copied().unwrap_or(Color32::RED),
        }
    }
}
