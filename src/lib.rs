//! A simple Driver for small monochrome Chip-On-Glass (COG) E-Ink Displays via SPI
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0.0
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - Chip select is a plain GPIO driven by the driver, the bus is used as
//!   an [`SpiBus`](embedded_hal::spi::SpiBus)
//!
//! ### Other....
//!
//! - Buffersize: both frame buffers of an update need [`buffer_len`]`(width, height)` bytes,
//!   8 pixels per byte, row by row, a set bit is a black pixel
//! - The second ("old") buffer of an update is expected to be all zero
//!
//! # Usage
//!
//! Pick a [`PanelModel`](panel::PanelModel), create an [`Epd`](cog::Epd), initialize it for
//! global or fast updates and send frames. See [`cog`] for an example.
//!
//! # Features
//!
//! - `log`: debug output of every phase through the `log` facade
//! - `defmt`: the same through `defmt`, plus `defmt::Format` for the public types
#![cfg_attr(not(test), no_std)]

mod log;

mod traits;

pub mod color;

pub mod config;

pub mod error;

/// Interface for the physical connection between display and the controlling device
mod interface;

pub mod mode;

pub mod panel;

pub mod cog;

pub mod prelude {
    pub use crate::buffer_len;
    pub use crate::cog::Epd;
    pub use crate::color::Color;
    pub use crate::config::Config;
    pub use crate::error::ErrorKind;
    pub use crate::mode::UpdateMode;
    pub use crate::panel::{derive_fast_settings, PanelModel, PanelProfile, PanelSettings};
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};

/// Computes the needed buffer length. Takes care of rounding up in case of
/// a pixel count that is not a multiple of 8.
pub const fn buffer_len(width: usize, height: usize) -> usize {
    (width * height + 7) / 8
}
