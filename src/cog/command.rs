//! SPI Commands for the COG of the small monochrome panels
use crate::traits;

/// COG commands
///
/// Should rarely (never?) be needed directly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Panel settings (PSR), two bytes of data.
    ///
    /// Doubles as the soft reset when sent with the single byte 0x0E.
    PanelSetting = 0x00,
    /// Turns off charge pump, source and gate driver and VCOM.
    /// Register data is kept until VDD goes off.
    PowerOff = 0x02,
    /// Turns the charge pump on, has to precede every display refresh
    PowerOn = 0x04,
    /// Writes the "new" frame into SRAM
    DataStartTransmission1 = 0x10,
    /// Refreshes the panel according to SRAM data and the temperature settings.
    ///
    /// Busy goes low while the refresh is running.
    DisplayRefresh = 0x12,
    /// Writes the "old" frame into SRAM
    DataStartTransmission2 = 0x13,
    /// First of the two settings sent instead of the PSR on the 2.90" COG
    AlternateSetting1 = 0x4D,
    /// Border setting and VCOM and data interval
    VcomAndDataIntervalSetting = 0x50,
    /// Active temperature
    ActiveTemperature = 0xE0,
    /// Input temperature, fast mode carries its flag in bit 6
    InputTemperature = 0xE5,
    /// Second of the two settings sent instead of the PSR on the 2.90" COG
    AlternateSetting2 = 0xE9,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::PanelSetting.address(), 0x00);

        assert_eq!(Command::DisplayRefresh.address(), 0x12);

        assert_eq!(Command::InputTemperature.address(), 0xE5);

        assert_eq!(Command::AlternateSetting2.address(), 0xE9);
    }
}
