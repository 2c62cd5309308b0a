use crate::error::{ChartError, ChartResult};

/// Opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Converts HSL (`hue` in degrees, `saturation`/`lightness` in 0..=1).
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> ChartResult<Self> {
        for (channel, value) in [("saturation", saturation), ("lightness", lightness)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "hsl channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        if !hue.is_finite() {
            return Err(ChartError::InvalidData("hsl hue must be finite".to_owned()));
        }

        let hue = hue.rem_euclid(360.0);
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let sector = hue / 60.0;
        let second = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u8 {
            0 => (chroma, second, 0.0),
            1 => (second, chroma, 0.0),
            2 => (0.0, chroma, second),
            3 => (0.0, second, chroma),
            4 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };
        let offset = lightness - chroma / 2.0;
        let channel = |value: f64| ((value + offset) * 255.0).round().clamp(0.0, 255.0) as u8;
        Ok(Self::rgb(channel(r), channel(g), channel(b)))
    }

    /// CSS `rgba(r,g,b,a)` string.
    #[must_use]
    pub fn css_rgba(self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.red, self.green, self.blue, alpha)
    }
}
