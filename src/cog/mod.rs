//! Driver for the Chip-On-Glass (COG) controller of small monochrome ePaper panels
//!
//! One driver covers all supported sizes, the panel is picked with a
//! [`PanelModel`] when the driver is created.
//!
//! # Example
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::{delay::NoopDelay, digital::Mock as PinMock, spi::Mock as SpiMock};
//!# fn main() -> Result<(), epd_cog::error::ErrorKind<SpiMock<u8>, PinMock, PinMock, PinMock, PinMock>> {
//!use epd_cog::prelude::*;
//!#
//!# let mut spi = SpiMock::<u8>::new(&[]);
//!# let cs = PinMock::new(&[]);
//!# let busy = PinMock::new(&[]);
//!# let dc = PinMock::new(&[]);
//!# let rst = PinMock::new(&[]);
//!# let mut delay = NoopDelay::new();
//!
//!// Setup EPD
//!let mut epd = Epd::new(PanelModel::Epd213, cs, busy, dc, rst, Config::default());
//!epd.initialize_global(&mut spi, &mut delay)?;
//!
//!// 1 is black, 0 is white. The old frame stays blank.
//!let mut image = [Color::White.get_byte_value(); buffer_len(104, 212)];
//!image[..13].fill(Color::Black.get_byte_value());
//!let old = [0u8; buffer_len(104, 212)];
//!
//!epd.update_global(&mut spi, &mut delay, &image, &old)?;
//!
//!// Switch off the charge pump
//!epd.power_off(&mut spi, &mut delay)?;
//!# Ok(())
//!# }
//!```
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

use crate::color::Color;
use crate::config::Config;
use crate::error::ErrorKind;
use crate::interface::DisplayInterface;
use crate::log;
use crate::mode::UpdateMode;
use crate::panel::{derive_fast_settings, PanelProfile};

pub(crate) mod command;
pub(crate) mod constants;
use self::command::Command;
use self::constants::*;

/// Driver for a COG driven panel
///
/// The SPI bus and the delay are handed in on every call, so they can be
/// shared with other devices between calls.
pub struct Epd<SPI, CS, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
    /// Panel geometry and settings
    profile: PanelProfile,
    /// Mode of the last completed initialization
    mode: Option<UpdateMode>,
}

impl<SPI, CS, BUSY, DC, RST, DELAY> Epd<SPI, CS, BUSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new driver from a panel and the CS, Busy, DC and RST pins
    ///
    /// Nothing is sent to the display yet, call
    /// [`initialize_global`](Epd::initialize_global) or
    /// [`initialize_fast`](Epd::initialize_fast) before the first update.
    pub fn new(
        profile: impl Into<PanelProfile>,
        cs: CS,
        busy: BUSY,
        dc: DC,
        rst: RST,
        config: Config,
    ) -> Self {
        let interface = DisplayInterface::new(cs, busy, dc, rst, &config);
        Epd {
            interface,
            profile: profile.into(),
            mode: None,
        }
    }

    /// Gives the pins back
    pub fn release(self) -> (CS, BUSY, DC, RST) {
        self.interface.release()
    }

    /// The panel this driver was created for
    pub fn profile(&self) -> &PanelProfile {
        &self.profile
    }

    /// Get the width of the display
    pub fn width(&self) -> u16 {
        self.profile.width()
    }

    /// Get the height of the display
    pub fn height(&self) -> u16 {
        self.profile.height()
    }

    /// Number of bytes each frame buffer needs
    pub fn buffer_len(&self) -> usize {
        self.profile.buffer_len()
    }

    /// Mode of the last successful initialization
    ///
    /// `None` before the first initialization, after [`power_off`](Epd::power_off)
    /// and after any failure on the bus or the busy line.
    pub fn mode(&self) -> Option<UpdateMode> {
        self.mode
    }

    /// Powers the COG on and configures it for full screen refreshes
    pub fn initialize_global(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.initialize(spi, delay, UpdateMode::Global)
    }

    /// Powers the COG on and configures it for fast refreshes
    pub fn initialize_fast(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.initialize(spi, delay, UpdateMode::Fast)
    }

    /// Sends a new image and refreshes the whole screen
    ///
    /// `new` holds the image, `old` must be a blank (all zero) frame. Both
    /// need exactly [`buffer_len`](Epd::buffer_len) bytes.
    pub fn update_global(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        new: &[u8],
        old: &[u8],
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.update(spi, delay, new, old, UpdateMode::Global)
    }

    /// Sends a new image and refreshes the screen with the fast waveform
    ///
    /// Same buffer requirements as [`update_global`](Epd::update_global).
    /// Panels that need it get their border and VCOM settings around the
    /// transfer.
    pub fn update_fast(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        new: &[u8],
        old: &[u8],
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.update(spi, delay, new, old, UpdateMode::Fast)
    }

    /// Fills the whole screen with one color and refreshes it
    pub fn clear_frame(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        color: Color,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        if self.mode.is_none() {
            return Err(ErrorKind::NotInitialized);
        }
        log::debug!("clearing frame to {:?}", color);
        let result = self.send_clear(spi, delay, color);
        self.track(result)
    }

    /// Turns off the DC/DC converter of the COG and releases the control lines
    ///
    /// The panel needs a new initialization before the next update.
    pub fn power_off(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        log::debug!("powering off COG");
        self.mode = None;
        self.interface.wait_until_idle(delay)?;
        self.interface.cmd_with_data(spi, Command::PowerOff, &[])?;
        self.interface.wait_until_idle(delay)?;
        self.interface.release_lines()
    }

    /// Wait until the display has stopped processing data
    pub fn wait_until_idle(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let result = self.interface.wait_until_idle(delay);
        self.track(result)
    }

    /// Samples the busy line once
    pub fn is_busy(&mut self) -> Result<bool, ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let result = self.interface.is_busy();
        self.track(result)
    }

    fn initialize(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        mode: UpdateMode,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        log::debug!(
            "initializing {:?} for {:?} updates",
            self.profile.model(),
            mode
        );
        self.mode = None;
        self.interface.deselect()?;
        self.power_on(spi, delay)?;

        let constants = mode.constants();
        self.interface
            .cmd_with_data(spi, Command::InputTemperature, &[constants.input_temperature])?;
        self.interface
            .cmd_with_data(spi, Command::ActiveTemperature, &[constants.active_temperature])?;

        self.send_panel_settings(spi, mode)?;

        if let Some(cdi) = constants.vcom_and_data_interval {
            self.interface
                .cmd_with_data(spi, Command::VcomAndDataIntervalSetting, &[cdi])?;
        }

        self.mode = Some(mode);
        Ok(())
    }

    fn power_on(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        log::debug!("resetting COG");
        self.interface.reset(delay, &POWER_ON_RESET)?;
        self.interface
            .cmd_with_data(spi, Command::PanelSetting, &[SOFT_RESET])?;
        self.interface.wait_until_idle(delay)
    }

    fn send_panel_settings(
        &mut self,
        spi: &mut SPI,
        mode: UpdateMode,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        if self.profile.model().uses_alternate_settings() {
            self.interface
                .cmd_with_data(spi, Command::AlternateSetting1, &[ALTERNATE_SETTING_1])?;
            return self
                .interface
                .cmd_with_data(spi, Command::AlternateSetting2, &[ALTERNATE_SETTING_2]);
        }

        let settings = match mode {
            UpdateMode::Global => self.profile.settings(),
            UpdateMode::Fast => derive_fast_settings(self.profile.settings()),
        };
        self.interface
            .cmd_with_data(spi, Command::PanelSetting, &settings.bytes())
    }

    fn update(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        new: &[u8],
        old: &[u8],
        mode: UpdateMode,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        if self.mode.is_none() {
            return Err(ErrorKind::NotInitialized);
        }
        self.check_buffer(new)?;
        self.check_buffer(old)?;
        log::debug!("{:?} update with {} bytes per frame", mode, new.len());

        let result = self.send_frames(spi, delay, new, old, mode);
        self.track(result)
    }

    fn check_buffer(&self, buffer: &[u8]) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let expected = self.profile.buffer_len();
        if buffer.len() != expected {
            return Err(ErrorKind::InvalidBufferSize {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    fn send_frames(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        new: &[u8],
        old: &[u8],
        mode: UpdateMode,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let bracket = mode == UpdateMode::Fast && self.profile.model().needs_border_management();

        if bracket {
            log::debug!("setting border for fast update");
            self.interface
                .cmd_with_data(spi, Command::VcomAndDataIntervalSetting, &[BORDER_SETTING])?;
        }

        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission1, new)?;
        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission2, old)?;

        if bracket {
            self.interface.cmd_with_data(
                spi,
                Command::VcomAndDataIntervalSetting,
                &[VCOM_AND_DATA_INTERVAL],
            )?;
        }

        self.refresh(spi, delay)
    }

    fn send_clear(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        color: Color,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let len = self.profile.buffer_len();

        self.interface.cmd(spi, Command::DataStartTransmission1)?;
        self.interface
            .data_x_times(spi, color.get_byte_value(), len)?;

        self.interface.cmd(spi, Command::DataStartTransmission2)?;
        self.interface
            .data_x_times(spi, Color::White.get_byte_value(), len)?;

        self.refresh(spi, delay)
    }

    /// Charge pump on, then refresh. Busy is awaited before, between and after.
    fn refresh(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        log::debug!("refreshing display");
        self.interface.wait_until_idle(delay)?;
        self.interface.cmd_with_data(spi, Command::PowerOn, &[])?;
        self.interface.wait_until_idle(delay)?;
        self.interface
            .cmd_with_data(spi, Command::DisplayRefresh, &[])?;
        self.interface.wait_until_idle(delay)
    }

    // forget the initialization once the COG may be in an unknown state
    fn track<T>(
        &mut self,
        result: Result<T, ErrorKind<SPI, CS, BUSY, DC, RST>>,
    ) -> Result<T, ErrorKind<SPI, CS, BUSY, DC, RST>> {
        if let Err(err) = &result {
            if err.leaves_cog_undefined() {
                self.mode = None;
            }
        }
        result
    }
}
