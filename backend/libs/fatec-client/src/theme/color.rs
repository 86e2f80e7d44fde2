/// CSS colour parsing and linear interpolation
///
/// Understands `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)`, which covers every colour in the app palettes.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 0.0..=1.0
    pub a: f32,
}

impl Rgba {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = input.to_ascii_lowercase();
        let (args, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<f32> = args
            .split(',')
            .map(|part| part.trim().parse::<f32>().ok())
            .collect::<Option<_>>()?;

        match (parts.as_slice(), has_alpha) {
            ([r, g, b, a], true) => Some(Self::clamped(*r, *g, *b, *a)),
            ([r, g, b], false) => Some(Self::clamped(*r, *g, *b, 1.0)),
            _ => None,
        }
    }

    fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 255.0),
            g: g.clamp(0.0, 255.0),
            b: b.clamp(0.0, 255.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: f32, to: f32| from + (to - from) * t;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise
    pub fn to_css(&self) -> String {
        let (r, g, b) = (channel(self.r), channel(self.g), channel(self.b));
        if self.a >= 0.999 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("rgba({}, {}, {}, {})", r, g, b, format_alpha(self.a))
        }
    }
}

fn channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn format_alpha(alpha: f32) -> String {
    let text = format!("{:.3}", alpha);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(f32::from);
    let nibble = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f32::from(v * 17));

    match hex.len() {
        3 => Some(Rgba {
            r: nibble(&hex[0..1])?,
            g: nibble(&hex[1..2])?,
            b: nibble(&hex[2..3])?,
            a: 1.0,
        }),
        6 => Some(Rgba {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: 1.0,
        }),
        8 => Some(Rgba {
            r: byte(&hex[0..2])?,
            g: byte(&hex[2..4])?,
            b: byte(&hex[4..6])?,
            a: byte(&hex[6..8])? / 255.0,
        }),
        _ => None,
    }
}

/// Colour at `t` between `light` (0.0) and `dark` (1.0). Unparseable inputs
/// switch over at the midpoint instead of blending.
pub fn interpolate(light: &str, dark: &str, t: f32) -> String {
    match (Rgba::parse(light), Rgba::parse(dark)) {
        (Some(from), Some(to)) => from.lerp(to, t).to_css(),
        _ => {
            tracing::debug!(light, dark, "Cannot blend colours, stepping");
            if t < 0.5 {
                light.to_string()
            } else {
                dark.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_formats() {
        assert_eq!(
            Rgba::parse("#fafafa"),
            Some(Rgba { r: 250.0, g: 250.0, b: 250.0, a: 1.0 })
        );
        assert_eq!(Rgba::parse("#ddd").map(|c| c.r), Some(221.0));
        assert_eq!(Rgba::parse("#00ebdfff").map(|c| c.a), Some(1.0));
        assert_eq!(
            Rgba::parse("rgba(255, 255, 255, 0.7)"),
            Some(Rgba { r: 255.0, g: 255.0, b: 255.0, a: 0.7 })
        );
        assert!(Rgba::parse("tomato").is_none());
        assert!(Rgba::parse("#12345").is_none());
    }

    #[test]
    fn endpoints_round_trip() {
        assert_eq!(interpolate("#fafafa", "#0d0d0d", 0.0), "#fafafa");
        assert_eq!(interpolate("#fafafa", "#0d0d0d", 1.0), "#0d0d0d");
        assert_eq!(
            interpolate("rgba(255, 255, 255, 0.7)", "rgba(26, 26, 26, 0.5)", 1.0),
            "rgba(26, 26, 26, 0.5)"
        );
    }

    #[test]
    fn midpoint_blends_channels_and_alpha() {
        assert_eq!(interpolate("#000000", "#ffffff", 0.5), "#808080");
        assert_eq!(
            interpolate("rgba(0, 0, 0, 1)", "rgba(0, 0, 0, 0)", 0.5),
            "rgba(0, 0, 0, 0.5)"
        );
    }

    #[test]
    fn unparseable_colours_step() {
        assert_eq!(interpolate("tomato", "#000", 0.2), "tomato");
        assert_eq!(interpolate("tomato", "#000", 0.8), "#000");
    }
}
