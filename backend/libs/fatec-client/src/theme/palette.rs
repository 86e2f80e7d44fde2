/// Light and dark colour palettes
use super::color::interpolate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub container: &'static str,
    pub header: &'static str,
    pub card: &'static str,
    pub card_border: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub arrow: &'static str,
    /// Warm accents in light mode, cool accents in dark mode
    pub accents: [&'static str; 4],
}

pub const LIGHT: Palette = Palette {
    container: "#fafafa",
    header: "#1a1a1a",
    card: "rgba(255, 255, 255, 0.7)",
    card_border: "rgba(255, 255, 255, 0.9)",
    text: "#2d2d2d",
    text_secondary: "#666666",
    arrow: "#b0b0b0",
    accents: ["#ff6b6b", "#ffa726", "#ff7043", "#ec407a"],
};

pub const DARK: Palette = Palette {
    container: "#0d0d0d",
    header: "#f5f5f5",
    card: "rgba(26, 26, 26, 0.5)",
    card_border: "rgba(255, 255, 255, 0.05)",
    text: "#e8e8e8",
    text_secondary: "#999999",
    arrow: "#555555",
    accents: ["#4fc3f7", "#7c4dff", "#00bcd4", "#26c6da"],
};

/// Palette colours sampled at one point of the light/dark fade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatedPalette {
    pub container: String,
    pub header: String,
    pub card: String,
    pub card_border: String,
    pub text: String,
    pub text_secondary: String,
    pub arrow: String,
    pub accents: [String; 4],
}

impl AnimatedPalette {
    /// Blend [`LIGHT`] into [`DARK`] at `t` (0.0 light, 1.0 dark)
    pub fn at(t: f32) -> Self {
        let mix = |light: &str, dark: &str| interpolate(light, dark, t);
        Self {
            container: mix(LIGHT.container, DARK.container),
            header: mix(LIGHT.header, DARK.header),
            card: mix(LIGHT.card, DARK.card),
            card_border: mix(LIGHT.card_border, DARK.card_border),
            text: mix(LIGHT.text, DARK.text),
            text_secondary: mix(LIGHT.text_secondary, DARK.text_secondary),
            arrow: mix(LIGHT.arrow, DARK.arrow),
            accents: std::array::from_fn(|i| mix(LIGHT.accents[i], DARK.accents[i])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animated_palette_matches_endpoints() {
        let light = AnimatedPalette::at(0.0);
        assert_eq!(light.container, LIGHT.container);
        assert_eq!(light.card, LIGHT.card);
        assert_eq!(light.accents[3], LIGHT.accents[3]);

        let dark = AnimatedPalette::at(1.0);
        assert_eq!(dark.text, DARK.text);
        assert_eq!(dark.card_border, DARK.card_border);
        assert_eq!(dark.accents[0], DARK.accents[0]);
    }
}
