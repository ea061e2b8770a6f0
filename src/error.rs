use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{digital, spi};

/// Epd error type
///
/// Every transport failure keeps the error of the line or bus it came from.
pub enum ErrorKind<SPI, CS, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    CS: digital::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    /// Encountered an SPI error
    SpiError(SPI::Error),

    /// Encountered an error on CS GPIO
    CsError(CS::Error),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY::Error),

    /// Encountered an error on DC GPIO
    DcError(DC::Error),

    /// Encountered an error on RST GPIO
    RstError(RST::Error),

    /// The busy line did not report ready within the configured timeout
    DeviceNotResponding,

    /// A frame buffer does not match the panel size
    InvalidBufferSize {
        /// Bytes required by the panel
        expected: usize,
        /// Bytes that were handed in
        actual: usize,
    },

    /// An update was requested before the COG was initialized
    NotInitialized,
}

impl<SPI, CS, BUSY, DC, RST> ErrorKind<SPI, CS, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    CS: digital::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    /// True if the COG may be in an unknown state after this error.
    ///
    /// That is every failure on the bus or a control line, and a busy line
    /// that never came back. Size and state checks fail before anything is
    /// sent.
    pub fn leaves_cog_undefined(&self) -> bool {
        !matches!(
            self,
            Self::InvalidBufferSize { .. } | Self::NotInitialized
        )
    }
}

impl<SPI, CS, BUSY, DC, RST> Display for ErrorKind<SPI, CS, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    CS: digital::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "spi error: {:?}", err),
            Self::CsError(err) => write!(f, "cs pin error: {:?}", err),
            Self::BusyError(err) => write!(f, "busy pin error: {:?}", err),
            Self::DcError(err) => write!(f, "dc pin error: {:?}", err),
            Self::RstError(err) => write!(f, "rst pin error: {:?}", err),
            Self::DeviceNotResponding => write!(f, "the display did not leave the busy state"),
            Self::InvalidBufferSize { expected, actual } => write!(
                f,
                "frame buffer has {} bytes but the panel needs {}",
                actual, expected
            ),
            Self::NotInitialized => write!(f, "the COG has not been initialized"),
        }
    }
}

impl<SPI, CS, BUSY, DC, RST> Debug for ErrorKind<SPI, CS, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    CS: digital::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => f.debug_tuple("SpiError").field(err).finish(),
            Self::CsError(err) => f.debug_tuple("CsError").field(err).finish(),
            Self::BusyError(err) => f.debug_tuple("BusyError").field(err).finish(),
            Self::DcError(err) => f.debug_tuple("DcError").field(err).finish(),
            Self::RstError(err) => f.debug_tuple("RstError").field(err).finish(),
            Self::DeviceNotResponding => write!(f, "DeviceNotResponding"),
            Self::InvalidBufferSize { expected, actual } => f
                .debug_struct("InvalidBufferSize")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
            Self::NotInitialized => write!(f, "NotInitialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bus;
    struct Pin;

    impl spi::ErrorType for Bus {
        type Error = spi::ErrorKind;
    }

    impl digital::ErrorType for Pin {
        type Error = digital::ErrorKind;
    }

    type Error = ErrorKind<Bus, Pin, Pin, Pin, Pin>;

    #[test]
    fn cog_state_after_error() {
        assert!(Error::SpiError(spi::ErrorKind::Other).leaves_cog_undefined());
        assert!(Error::BusyError(digital::ErrorKind::Other).leaves_cog_undefined());
        assert!(Error::RstError(digital::ErrorKind::Other).leaves_cog_undefined());
        assert!(Error::DeviceNotResponding.leaves_cog_undefined());

        assert!(!Error::NotInitialized.leaves_cog_undefined());
        assert!(!Error::InvalidBufferSize {
            expected: 2756,
            actual: 0
        }
        .leaves_cog_undefined());
    }
}
