use crate::{config::Config, error::ErrorKind, log, traits::Command};
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiBus,
};

/// Largest chunk handed to a single spi write on linux
const LINUX_SPI_CHUNK: usize = 4096;

/// Bytes buffered at once by `data_x_times`
const REPEAT_CHUNK: usize = 64;

/// Timing of the hardware reset pulse, all values in ms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResetTiming {
    /// Wait before the reset line is touched
    pub lead: u32,
    /// Reset held high before the pulse
    pub high: u32,
    /// Width of the low pulse
    pub low: u32,
    /// Wait after the reset line is released
    pub release: u32,
}

/// The connection interface between the COG and the controlling device
///
/// Chip select is driven by the interface itself, so the bus only needs to
/// implement [`SpiBus`].
pub(crate) struct DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// DELAY
    _delay: PhantomData<DELAY>,
    /// CS for SPI, low while a transfer is running
    cs: CS,
    /// Low for busy, Wait until display is ready!
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// number of us the idle loop should sleep on
    delay_us: u32,
    /// upper bound of a single busy wait in us
    timeout_us: Option<u64>,
}

impl<SPI, CS, BUSY, DC, RST, DELAY> DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(cs: CS, busy: BUSY, dc: DC, rst: RST, config: &Config) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            _delay: PhantomData,
            cs,
            busy,
            dc,
            rst,
            delay_us: config.busy_poll_interval_us,
            timeout_us: config.busy_timeout_us(),
        }
    }

    /// Hands the pins back
    pub fn release(self) -> (CS, BUSY, DC, RST) {
        (self.cs, self.busy, self.dc, self.rst)
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// The command byte is sent with DC low inside its own CS frame. DC is
    /// left high afterwards.
    pub(crate) fn cmd<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;

        // Transfer the command over spi
        self.with_cs(spi, |spi| Self::write(spi, &[command.address()]))?;

        // back to data mode
        self.dc.set_high().map_err(ErrorKind::DcError)
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// The data phase always opens a CS frame, even when `data` is empty.
    pub(crate) fn data(
        &mut self,
        spi: &mut SPI,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;

        self.with_cs(spi, |spi| {
            if data.is_empty() {
                Ok(())
            } else {
                Self::write(spi, data)
            }
        })
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: usize,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;

        let chunk = [val; REPEAT_CHUNK];
        self.with_cs(spi, |spi| {
            let mut remaining = repetitions;
            while remaining > 0 {
                let len = remaining.min(REPEAT_CHUNK);
                spi.write(&chunk[..len]).map_err(ErrorKind::SpiError)?;
                remaining -= len;
            }
            spi.flush().map_err(ErrorKind::SpiError)
        })
    }

    // frames a transfer with cs low, cs is released even if the transfer failed
    fn with_cs<F>(&mut self, spi: &mut SPI, f: F) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>>
    where
        F: FnOnce(&mut SPI) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>>,
    {
        self.cs.set_low().map_err(ErrorKind::CsError)?;
        let result = f(spi);
        let released = self.cs.set_high().map_err(ErrorKind::CsError);
        result.and(released)
    }

    // spi write helper/abstraction function
    fn write(spi: &mut SPI, data: &[u8]) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        // Be careful!! Linux has a default limit of 4096 bytes per spi transfer
        // see https://raspberrypi.stackexchange.com/questions/65595/spi-transfer-fails-with-buffer-size-greater-than-4096
        if cfg!(target_os = "linux") {
            for data_chunk in data.chunks(LINUX_SPI_CHUNK) {
                spi.write(data_chunk).map_err(ErrorKind::SpiError)?;
            }
        } else {
            spi.write(data).map_err(ErrorKind::SpiError)?;
        }
        // cs must not rise before the last bit left the bus
        spi.flush().map_err(ErrorKind::SpiError)
    }

    /// Waits until device isn't busy anymore (busy == HIGH)
    ///
    /// Gives up with [`ErrorKind::DeviceNotResponding`] once the configured
    /// timeout has elapsed. With a poll interval of 0 every sample counts as
    /// 1us towards the timeout.
    pub(crate) fn wait_until_idle(
        &mut self,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        let step = u64::from(self.delay_us.max(1));
        let mut waited_us: u64 = 0;
        while self.is_busy()? {
            if let Some(timeout_us) = self.timeout_us {
                if waited_us >= timeout_us {
                    log::warning!("busy line still low after {} us", waited_us);
                    return Err(ErrorKind::DeviceNotResponding);
                }
            }
            if self.delay_us > 0 {
                delay.delay_us(self.delay_us);
            }
            waited_us = waited_us.saturating_add(step);
        }
        Ok(())
    }

    /// Checks if device is still busy
    ///
    /// The COG pulls the busy line low while it is working.
    pub(crate) fn is_busy(&mut self) -> Result<bool, ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.busy.is_low().map_err(ErrorKind::BusyError)
    }

    /// Drives reset and chip select high, the idle level before a power on
    pub(crate) fn deselect(&mut self) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        self.cs.set_high().map_err(ErrorKind::CsError)
    }

    /// Pulses the reset line with the given timing
    pub(crate) fn reset(
        &mut self,
        delay: &mut DELAY,
        timing: &ResetTiming,
    ) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        delay.delay_ms(timing.lead);
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        delay.delay_ms(timing.high);
        self.rst.set_low().map_err(ErrorKind::RstError)?;
        delay.delay_ms(timing.low);
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        delay.delay_ms(timing.release);
        Ok(())
    }

    /// Drives dc, cs and reset low, the state the panel is left in after a power off
    pub(crate) fn release_lines(&mut self) -> Result<(), ErrorKind<SPI, CS, BUSY, DC, RST>> {
        self.dc.set_low().map_err(ErrorKind::DcError)?;
        self.cs.set_low().map_err(ErrorKind::CsError)?;
        self.rst.set_low().map_err(ErrorKind::RstError)
    }
}
