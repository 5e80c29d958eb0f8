//! Driver for an OpenCores-style memory-mapped I2C master.
//!
//! The controller exposes five byte-wide registers (word-spaced on the
//! platform bus):
//! - PRERlo/PRERhi: clock prescale, `sys_clk / (5 * SCL) - 1`
//! - CTR: control (core enable, interrupt enable)
//! - TXR (write) / RXR (read): transmit/receive data
//! - CR (write) / SR (read): command/status
//!
//! A write transaction is: load TXR with `address << 1`, command STA+WR,
//! then one WR command per payload byte, STO on the last one. After every
//! byte the controller reports whether the device pulled SDA low during the
//! acknowledge cycle (RxACK, 0 = acked).

mod control;
mod master;
mod registers;
#[cfg(test)]
pub(crate) mod sim;

pub use self::control::{
	CommandWrite,
	StatusRead,
};

pub use self::master::{
	BusSpeed,
	I2cError,
	I2cMaster,
};

pub use self::registers::{
	I2cRegisters,
	REGISTER_COUNT,
};
