pub type Rgb = (u8, u8, u8);

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

// Bright shell colours, full saturation at mid lightness
pub const SHELL_PALETTE: [Hsl; 8] = [
    Hsl::new(0.0, 100.0, 50.0),   // red
    Hsl::new(30.0, 100.0, 50.0),  // orange
    Hsl::new(60.0, 100.0, 50.0),  // yellow
    Hsl::new(120.0, 100.0, 50.0), // green
    Hsl::new(180.0, 100.0, 50.0), // cyan
    Hsl::new(240.0, 100.0, 50.0), // blue
    Hsl::new(300.0, 100.0, 50.0), // purple
    Hsl::new(330.0, 100.0, 50.0), // pink
];

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        (
            ((r + m) * 255.0).round() as u8,
            ((g + m) * 255.0).round() as u8,
            ((b + m) * 255.0).round() as u8,
        )
    }
}

/// Source-over blend of `src` onto `dst` with the given coverage.
pub fn blend(dst: [f32; 3], src: Rgb, alpha: f32) -> [f32; 3] {
    let a = alpha.clamp(0.0, 1.0);
    [
        dst[0] * (1.0 - a) + src.0 as f32 * a,
        dst[1] * (1.0 - a) + src.1 as f32 * a,
        dst[2] * (1.0 - a) + src.2 as f32 * a,
    ]
}

pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
