//! Bring-up for the Analog Devices SSM2603 audio codec.
//!
//! The codec has no readable registers worth speaking of during bring-up; it
//! is configured by a fixed, ordered sequence of write-only control register
//! writes over I2C. A device that stops acknowledging mid-sequence is left
//! alone: partial configuration is not recoverable here, the caller decides
//! what to do.

mod registers;

pub use self::registers::{
	ConfigStep,
	POWER_UP_SEQUENCE,
	Register,
};

use failure::Fail;

use crate::i2c::{
	I2cError,
	I2cMaster,
	I2cRegisters,
};

/// 7-bit device address with the CSB pin tied low.
pub const DEVICE_ADDRESS_CSB_LOW: u8 = 0x1a; // 0001_1010
/// 7-bit device address with the CSB pin tied high.
pub const DEVICE_ADDRESS_CSB_HIGH: u8 = 0x1b;

#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
	#[fail(display = "codec not acknowledging while writing {:?} (register 0x{:02x})", step, register)]
	CodecNotAcknowledging {
		step: ConfigStep,
		register: u8,
	},
	#[fail(display = "bus error while writing {:?} (register 0x{:02x})", step, register)]
	BusError {
		step: ConfigStep,
		register: u8,
	},
}

impl InitError {
	fn from_i2c(error: I2cError, step: ConfigStep) -> Self {
		let register = step.register() as u8;
		match error {
			I2cError::NoAcknowledge { .. } => InitError::CodecNotAcknowledging { step, register },
			I2cError::Bus { .. } => InitError::BusError { step, register },
		}
	}

	/// The configuration step the sequence failed at.
	pub fn step(&self) -> ConfigStep {
		match *self {
			InitError::CodecNotAcknowledging { step, .. } => step,
			InitError::BusError { step, .. } => step,
		}
	}
}

/// Write the full power-up sequence to the codec at `device_address`.
///
/// Fails fast: the first transaction fault aborts the remaining writes, the
/// error names the step (and register) that failed.
pub fn initialize<R: I2cRegisters>(
	master: &mut I2cMaster<R>,
	device_address: u8,
) -> Result<(), InitError> {
	for step in POWER_UP_SEQUENCE.iter() {
		debug!("codec 0x{:02x}: writing {:?}", device_address, step);
		master
			.write_to_device(device_address, &step.encode())
			.map_err(|e| InitError::from_i2c(e, *step))?;
	}
	Ok(())
}
