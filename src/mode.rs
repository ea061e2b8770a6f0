//! Global and fast update modes

use crate::cog::constants::{self, ModeConstants};

/// Selects how the COG drives the refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateMode {
    /// Full screen refresh, the panel flashes through its whole waveform
    #[default]
    Global,
    /// Quick refresh without the flashing, ghosting builds up over time.
    ///
    /// Do a global update every now and then.
    Fast,
}

impl UpdateMode {
    pub(crate) const fn constants(self) -> &'static ModeConstants {
        match self {
            UpdateMode::Global => &constants::GLOBAL,
            UpdateMode::Fast => &constants::FAST,
        }
    }
}
