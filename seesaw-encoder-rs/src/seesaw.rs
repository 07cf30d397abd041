//! Seesaw register access over async I2C.
//!
//! Every read is a register-address write, a fixed settling delay, then a
//! plain read. `write_read()` is avoided because a repeated start leaves
//! the Seesaw firmware no time to load the response.

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::error::EncoderError;
use crate::registers::SEESAW_DELAY_US;

/// Register-level Seesaw bus handle.
pub(crate) struct Seesaw<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Seesaw<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Read `N` bytes from `[module, offset]`.
    async fn read<const N: usize>(
        &mut self,
        module: u8,
        offset: u8,
    ) -> Result<[u8; N], EncoderError<I2C::Error>> {
        let mut buf = [0u8; N];
        self.i2c.write(self.address, &[module, offset]).await?;
        Timer::after(Duration::from_micros(SEESAW_DELAY_US)).await;
        self.i2c.read(self.address, &mut buf).await?;
        Ok(buf)
    }

    /// Write `N` payload bytes to `[module, offset]` in one transaction.
    async fn write<const N: usize>(
        &mut self,
        module: u8,
        offset: u8,
        payload: [u8; N],
    ) -> Result<(), EncoderError<I2C::Error>> {
        // Two address bytes plus at most four payload bytes.
        let mut buf = [0u8; 6];
        buf[0] = module;
        buf[1] = offset;
        buf[2..2 + N].copy_from_slice(&payload);
        self.i2c.write(self.address, &buf[..2 + N]).await?;
        Ok(())
    }

    pub async fn read_u8(&mut self, module: u8, offset: u8) -> Result<u8, EncoderError<I2C::Error>> {
        let [b] = self.read::<1>(module, offset).await?;
        Ok(b)
    }

    /// Seesaw registers are big-endian.
    pub async fn read_u32(&mut self, module: u8, offset: u8) -> Result<u32, EncoderError<I2C::Error>> {
        Ok(u32::from_be_bytes(self.read::<4>(module, offset).await?))
    }

    pub async fn read_i32(&mut self, module: u8, offset: u8) -> Result<i32, EncoderError<I2C::Error>> {
        Ok(i32::from_be_bytes(self.read::<4>(module, offset).await?))
    }

    pub async fn write_u32(
        &mut self,
        module: u8,
        offset: u8,
        value: u32,
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.write(module, offset, value.to_be_bytes()).await
    }

    pub async fn write_i32(
        &mut self,
        module: u8,
        offset: u8,
        value: i32,
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.write(module, offset, value.to_be_bytes()).await
    }
}
