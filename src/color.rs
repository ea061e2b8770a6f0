//! B/W Color for the monochrome COG panels

/// Only for the B/W Displays
///
/// The COG reads a set bit as a black pixel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Black color
    Black,
    /// White color
    #[default]
    White,
}

impl Color {
    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(&self) -> u8 {
        match self {
            Color::White => 0x00,
            Color::Black => 0xff,
        }
    }
}
