//! Seesaw register map for the I2C QT Rotary Encoder.
//!
//! Registers are addressed as `[MODULE, OFFSET]`. The board exposes one
//! encoder (index 0) and routes its push switch to Seesaw GPIO pin 24.

// ---------------------------------------------------------------------------
// Module IDs
// ---------------------------------------------------------------------------

/// Status module (hardware ID).
pub const MODULE_STATUS: u8 = 0x00;

/// GPIO module.
pub const MODULE_GPIO: u8 = 0x01;

/// Encoder module.
pub const MODULE_ENCODER: u8 = 0x11;

// ---------------------------------------------------------------------------
// Status module
// ---------------------------------------------------------------------------

/// Hardware ID (8-bit, read-only).
pub const STATUS_HW_ID: u8 = 0x01;

/// Known hardware IDs: SAMD09, ATtiny817, ATtiny807, ATtiny1617, ATtiny1616.
pub const KNOWN_HW_IDS: [u8; 5] = [0x55, 0x87, 0x84, 0x88, 0x89];

// ---------------------------------------------------------------------------
// GPIO module (32-bit pin masks)
// ---------------------------------------------------------------------------

/// Configure masked pins as inputs.
pub const GPIO_DIRCLR_BULK: u8 = 0x03;

/// Read all pin levels.
pub const GPIO_BULK: u8 = 0x04;

/// Drive masked pins high (selects pull-up when the pull is enabled).
pub const GPIO_BULK_SET: u8 = 0x05;

/// Enable pulls on masked pins.
pub const GPIO_PULLENSET: u8 = 0x0B;

// ---------------------------------------------------------------------------
// Encoder module
// ---------------------------------------------------------------------------

/// Absolute position (32-bit signed).
pub const ENCODER_POSITION: u8 = 0x30;

// ---------------------------------------------------------------------------
// Board constants
// ---------------------------------------------------------------------------

/// Seesaw GPIO pin wired to the encoder's push switch (active low).
pub const SWITCH_PIN: u8 = 24;

/// Mask for [`SWITCH_PIN`] in the 32-bit GPIO bulk registers.
pub const SWITCH_MASK: u32 = 1 << SWITCH_PIN;

/// Delay between the register-address write and the read, in microseconds.
pub const SEESAW_DELAY_US: u64 = 125;

/// Factory I2C address.
pub const DEFAULT_ADDRESS: u8 = 0x36;
