//! Constant tables of the COG
use crate::interface::ResetTiming;

/// Reset pulse of the power on sequence
pub(crate) const POWER_ON_RESET: ResetTiming = ResetTiming {
    lead: 5,
    high: 5,
    low: 10,
    release: 5,
};

/// Data byte of the soft reset (sent with the panel settings command)
pub(crate) const SOFT_RESET: u8 = 0x0E;

/// Input temperature of 25 degrees celsius
pub(crate) const TEMPERATURE_25C: u8 = 25;

/// Added to the input temperature to select the fast update waveform
pub(crate) const FAST_TEMPERATURE_OFFSET: u8 = 0x40;

/// Active temperature
pub(crate) const ACTIVE_TEMPERATURE: u8 = 0x02;

/// VCOM and data interval closing a fast update
pub(crate) const VCOM_AND_DATA_INTERVAL: u8 = 0x07;

/// Border setting opening a fast update
pub(crate) const BORDER_SETTING: u8 = 0x27;

/// Sent with [AlternateSetting1](super::command::Command::AlternateSetting1)
pub(crate) const ALTERNATE_SETTING_1: u8 = 0x55;

/// Sent with [AlternateSetting2](super::command::Command::AlternateSetting2)
pub(crate) const ALTERNATE_SETTING_2: u8 = 0x02;

/// Environment constants that differ between the update modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModeConstants {
    pub input_temperature: u8,
    pub active_temperature: u8,
    /// Sent after the panel settings when present
    pub vcom_and_data_interval: Option<u8>,
}

pub(crate) const GLOBAL: ModeConstants = ModeConstants {
    input_temperature: TEMPERATURE_25C,
    active_temperature: ACTIVE_TEMPERATURE,
    vcom_and_data_interval: None,
};

pub(crate) const FAST: ModeConstants = ModeConstants {
    input_temperature: TEMPERATURE_25C + FAST_TEMPERATURE_OFFSET,
    active_temperature: ACTIVE_TEMPERATURE,
    vcom_and_data_interval: Some(VCOM_AND_DATA_INTERVAL),
};
