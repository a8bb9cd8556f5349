//! Fixed console palette.
//!
//! The emulated console has no palette swapping at this layer; all colours
//! used by the compositor and the level builder come from [`Palette`].

/// An opaque RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Named colours of the fixed palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Palette {
    Black,
    White,
    Red,
    Blue,
    Green,
    Brown,
    Yellow,
    SkyBlue,
    Gray,
    DarkGray,
}

impl Palette {
    pub const fn rgb(self) -> Rgb {
        match self {
            Palette::Black => Rgb::new(0, 0, 0),
            Palette::White => Rgb::new(255, 255, 255),
            Palette::Red => Rgb::new(228, 0, 88),
            Palette::Blue => Rgb::new(0, 120, 248),
            Palette::Green => Rgb::new(0, 200, 0),
            Palette::Brown => Rgb::new(168, 100, 0),
            Palette::Yellow => Rgb::new(248, 248, 0),
            Palette::SkyBlue => Rgb::new(60, 188, 252),
            Palette::Gray => Rgb::new(88, 88, 88),
            Palette::DarkGray => Rgb::new(44, 44, 44),
        }
    }
}
