//! High-level interface for the I2C QT Rotary Encoder breakout.

use embedded_hal_async::i2c::I2c;

use crate::error::EncoderError;
use crate::registers::{
    ENCODER_POSITION, GPIO_BULK, GPIO_BULK_SET, GPIO_DIRCLR_BULK, GPIO_PULLENSET, KNOWN_HW_IDS,
    MODULE_ENCODER, MODULE_GPIO, MODULE_STATUS, STATUS_HW_ID, SWITCH_MASK,
};
use crate::seesaw::Seesaw;

/// One rotary encoder with a push switch, read over I2C.
///
/// The Seesaw firmware accumulates detents into a signed 32-bit position;
/// callers sample it and compute deltas themselves.
///
/// # Example
///
/// ```no_run
/// use seesaw_encoder::RotaryEncoder;
///
/// let mut encoder = RotaryEncoder::new(i2c, seesaw_encoder::DEFAULT_ADDRESS);
/// encoder.init().await?;
///
/// let position = encoder.read_position().await?;
/// let pressed = encoder.switch_pressed().await?;
/// ```
pub struct RotaryEncoder<I2C> {
    seesaw: Seesaw<I2C>,
}

impl<I2C> RotaryEncoder<I2C>
where
    I2C: I2c,
{
    /// Wrap an I2C device. No bus traffic until [`init()`](Self::init).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            seesaw: Seesaw::new(i2c, address),
        }
    }

    /// Check the hardware ID and configure the push switch as a pulled-up
    /// input.
    ///
    /// # Errors
    /// * [`EncoderError::UnknownHardware`] if the ID is not a Seesaw chip
    /// * [`EncoderError::I2c`] on communication failure
    pub async fn init(&mut self) -> Result<(), EncoderError<I2C::Error>> {
        let id = self.seesaw.read_u8(MODULE_STATUS, STATUS_HW_ID).await?;
        if !KNOWN_HW_IDS.contains(&id) {
            return Err(EncoderError::UnknownHardware(id));
        }

        self.seesaw.write_u32(MODULE_GPIO, GPIO_DIRCLR_BULK, SWITCH_MASK).await?;
        self.seesaw.write_u32(MODULE_GPIO, GPIO_PULLENSET, SWITCH_MASK).await?;
        self.seesaw.write_u32(MODULE_GPIO, GPIO_BULK_SET, SWITCH_MASK).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Position
    // -----------------------------------------------------------------------

    /// Read the absolute encoder position.
    pub async fn read_position(&mut self) -> Result<i32, EncoderError<I2C::Error>> {
        self.seesaw.read_i32(MODULE_ENCODER, ENCODER_POSITION).await
    }

    /// Overwrite the accumulated position, e.g. to re-zero it.
    pub async fn set_position(&mut self, value: i32) -> Result<(), EncoderError<I2C::Error>> {
        self.seesaw.write_i32(MODULE_ENCODER, ENCODER_POSITION, value).await
    }

    // -----------------------------------------------------------------------
    // Push switch
    // -----------------------------------------------------------------------

    /// Raw switch level. The switch pulls the pin low when pressed.
    ///
    /// The level is not debounced; callers polling it should filter bounce
    /// themselves.
    pub async fn switch_pressed(&mut self) -> Result<bool, EncoderError<I2C::Error>> {
        let levels = self.seesaw.read_u32(MODULE_GPIO, GPIO_BULK).await?;
        Ok(levels & SWITCH_MASK == 0)
    }
}
