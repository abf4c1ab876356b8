#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn to_rgb(&self) -> Rgb {
        match *self {
            Self::Rgb { r, g, b } => Rgb::new(r, g, b),
            Self::Oklch { l, c, h } => {
                use palette::{IntoColor, Oklch, Srgb};

                let srgb: Srgb = Oklch::new(l, c, h).into_color();
                let (r, g, b) = srgb.into_format::<u8>().into_components();
                Rgb::new(r, g, b)
            }
        }
    }
}
