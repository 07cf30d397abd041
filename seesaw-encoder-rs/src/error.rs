//! Error types for the rotary encoder driver.

use core::fmt;

/// Errors from the rotary encoder breakout.
#[derive(Debug)]
pub enum EncoderError<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// The device answered but its hardware ID is not a Seesaw chip.
    UnknownHardware(u8),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for EncoderError<E> {
    fn from(error: E) -> Self {
        EncoderError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::I2c(e) => write!(f, "I2C error: {:?}", e),
            EncoderError::UnknownHardware(id) => write!(f, "unknown Seesaw hardware ID 0x{:02X}", id),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            EncoderError::UnknownHardware(id) => defmt::write!(f, "Unknown hardware ID {=u8:#x}", id),
        }
    }
}
