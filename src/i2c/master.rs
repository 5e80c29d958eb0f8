use std::fmt;
use std::str::FromStr;

use failure::Fail;

use super::control::{
	CommandWrite,
	StatusRead,
};
use super::registers::{
	self,
	I2cRegisters,
};

// the hardware enforces no timeout on its own; bound the busy-wait so a dead
// or unclocked controller surfaces as an error instead of hanging the caller
const POLL_LIMIT: usize = 0xffff;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusSpeed {
	Standard,
	Fast,
}

impl BusSpeed {
	pub fn scl_hz(self) -> u32 {
		match self {
			BusSpeed::Standard => 100_000,
			BusSpeed::Fast => 400_000,
		}
	}

	// PRER = sys_clk / (5 * SCL) - 1
	pub fn prescale(self, sys_clk_hz: u32) -> u16 {
		let div = (sys_clk_hz / (5 * self.scl_hz())).saturating_sub(1);
		if div > 0xffff {
			warn!("prescale {} exceeds 16 bits, clamping", div);
		}
		div.min(0xffff) as u16
	}
}

impl fmt::Display for BusSpeed {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			BusSpeed::Standard => write!(f, "standard (100 kHz)"),
			BusSpeed::Fast => write!(f, "fast (400 kHz)"),
		}
	}
}

impl FromStr for BusSpeed {
	type Err = failure::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"standard" => Ok(BusSpeed::Standard),
			"fast" => Ok(BusSpeed::Fast),
			_ => bail!("unknown bus speed {:?} (expected \"standard\" or \"fast\")", s),
		}
	}
}

#[derive(Debug, Fail, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
	#[fail(display = "no acknowledge from device 0x{:02x}", address)]
	NoAcknowledge {
		address: u8,
	},
	#[fail(display = "bus fault while talking to device 0x{:02x} (arbitration lost, stuck line or dead controller)", address)]
	Bus {
		address: u8,
	},
}

pub struct I2cMaster<R: I2cRegisters> {
	regs: R,
}

impl<R: I2cRegisters> I2cMaster<R> {
	/// Take over an already configured controller without touching the
	/// prescale registers.
	pub fn attach(regs: R) -> Self {
		I2cMaster { regs }
	}

	pub fn new(regs: R, speed: BusSpeed, sys_clk_hz: u32) -> Self {
		let mut master = I2cMaster::attach(regs);
		master.configure(speed, sys_clk_hz);
		master
	}

	/// Program the SCL prescale and enable the core. The core must be
	/// disabled while the prescale registers change.
	pub fn configure(&mut self, speed: BusSpeed, sys_clk_hz: u32) {
		let prescale = speed.prescale(sys_clk_hz);
		debug!("configuring I2C master: {}, prescale {}", speed, prescale);

		self.regs.write_reg(registers::CONTROL, 0);
		self.regs.write_reg(registers::PRESCALE_LO, prescale as u8);
		self.regs.write_reg(registers::PRESCALE_HI, (prescale >> 8) as u8);
		self.regs.write_reg(registers::CONTROL, registers::CONTROL_CORE_ENABLE);
	}

	pub fn into_registers(self) -> R {
		self.regs
	}

	pub fn status(&self) -> StatusRead {
		StatusRead(self.regs.read_reg(registers::COMMAND))
	}

	pub fn control(&self) -> u8 {
		self.regs.read_reg(registers::CONTROL)
	}

	/// Blocking write transaction: start condition, `address` with the
	/// write bit, all of `payload`, stop condition. The acknowledge bit is
	/// checked after the address byte and after every payload byte;
	/// a missing acknowledge releases the bus and fails the transaction.
	pub fn write_to_device(&mut self, address: u8, payload: &[u8]) -> Result<(), I2cError> {
		assert!(address < 0x80, "I2C device addresses are 7 bit");

		self.regs.write_reg(registers::TRANSMIT, address << 1);
		self.regs.write_reg(registers::COMMAND, CommandWrite::start_write().0);
		self.check_acknowledged(address)?;

		// without payload bytes there is no write command carrying the stop
		// condition, so the bus has to be released explicitly
		if payload.is_empty() {
			self.release_bus();
			return Ok(());
		}

		for (i, data) in payload.iter().enumerate() {
			let mut command = CommandWrite::write();
			if i + 1 == payload.len() {
				command.set_stop();
			}
			self.regs.write_reg(registers::TRANSMIT, *data);
			self.regs.write_reg(registers::COMMAND, command.0);
			self.check_acknowledged(address)?;
		}

		Ok(())
	}

	/// Address-only transaction; reports whether a device acknowledged.
	pub fn probe(&mut self, address: u8) -> Result<bool, I2cError> {
		assert!(address < 0x80, "I2C device addresses are 7 bit");

		self.regs.write_reg(registers::TRANSMIT, address << 1);
		self.regs.write_reg(registers::COMMAND, CommandWrite::start_write().0);
		let status = self.wait_transfer(address)?;

		self.release_bus();
		Ok(!status.is_rx_nack())
	}

	fn check_acknowledged(&mut self, address: u8) -> Result<(), I2cError> {
		let status = self.wait_transfer(address)?;
		if status.is_rx_nack() {
			self.release_bus();
			return Err(I2cError::NoAcknowledge { address });
		}
		Ok(())
	}

	// poll until the byte transfer completes; arbitration loss and a poll
	// that never completes are both bus faults
	fn wait_transfer(&mut self, address: u8) -> Result<StatusRead, I2cError> {
		for _ in 0..POLL_LIMIT {
			let status = self.status();
			if status.is_arbitration_lost() {
				return Err(I2cError::Bus { address });
			}
			if !status.is_transfer_in_progress() {
				return Ok(status);
			}
		}
		Err(I2cError::Bus { address })
	}

	// issue a stop so a failed transaction doesn't leave the bus claimed
	fn release_bus(&mut self) {
		self.regs.write_reg(registers::COMMAND, CommandWrite::stop().0);
		for _ in 0..POLL_LIMIT {
			if !self.status().is_busy() {
				return;
			}
		}
		warn!("bus still busy after stop condition");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::i2c::sim::SimBus;

	#[test]
	fn prescale_standard_50mhz() {
		assert_eq!(99, BusSpeed::Standard.prescale(50_000_000));
	}

	#[test]
	fn prescale_fast_50mhz() {
		assert_eq!(24, BusSpeed::Fast.prescale(50_000_000));
	}

	#[test]
	fn configure_programs_prescale_and_enables_core() {
		let mut sim = SimBus::new();
		{
			let master = I2cMaster::new(&mut sim, BusSpeed::Standard, 50_000_000);
			assert_ne!(0, master.control() & crate::i2c::registers::CONTROL_CORE_ENABLE);
		}
		assert_eq!(99, sim.prescale());
	}

	#[test]
	fn write_records_one_frame() {
		let mut master = I2cMaster::new(SimBus::new(), BusSpeed::Fast, 50_000_000);
		master.write_to_device(0x1a, &[0x12, 0x01]).unwrap();

		assert_eq!(1, master.regs.frames.len());
		assert_eq!(0x1a, master.regs.frames[0].address);
		assert_eq!(&[0x12, 0x01], &master.regs.frames[0].bytes[..]);
	}

	#[test]
	fn address_nack_fails_and_releases_bus() {
		let mut sim = SimBus::new();
		sim.nack_from_frame(0);
		let mut master = I2cMaster::new(sim, BusSpeed::Fast, 50_000_000);

		let err = master.write_to_device(0x1a, &[0x12, 0x01]).unwrap_err();
		assert_eq!(I2cError::NoAcknowledge { address: 0x1a }, err);
		assert!(!master.status().is_busy());
		assert!(master.regs.frames[0].bytes.is_empty());
	}

	#[test]
	fn data_byte_nack_fails_and_releases_bus() {
		let mut sim = SimBus::new();
		sim.nack_at_byte(0, 1); // first data byte
		let mut master = I2cMaster::new(sim, BusSpeed::Fast, 50_000_000);

		let err = master.write_to_device(0x1a, &[0x12, 0x01]).unwrap_err();
		assert_eq!(I2cError::NoAcknowledge { address: 0x1a }, err);
		assert!(!master.status().is_busy());
		// nothing goes out past the unacknowledged byte
		assert_eq!(&[0x12], &master.regs.frames[0].bytes[..]);
	}

	#[test]
	fn stuck_controller_is_a_bus_fault() {
		let mut sim = SimBus::new();
		sim.hold_transfer_in_progress();
		let mut master = I2cMaster::new(sim, BusSpeed::Fast, 50_000_000);

		let err = master.write_to_device(0x1a, &[0x12, 0x01]).unwrap_err();
		assert_eq!(I2cError::Bus { address: 0x1a }, err);
	}

	#[test]
	fn empty_payload_still_releases_the_bus() {
		let mut master = I2cMaster::new(SimBus::new(), BusSpeed::Fast, 50_000_000);
		master.write_to_device(0x1a, &[]).unwrap();

		assert!(!master.status().is_busy());
		assert_eq!(1, master.regs.frames.len());
		assert!(master.regs.frames[0].bytes.is_empty());
	}

	#[test]
	fn arbitration_loss_is_a_bus_fault() {
		let mut sim = SimBus::new();
		sim.lose_arbitration_at_frame(0);
		let mut master = I2cMaster::new(sim, BusSpeed::Fast, 50_000_000);

		let err = master.write_to_device(0x1a, &[0x12, 0x01]).unwrap_err();
		assert_eq!(I2cError::Bus { address: 0x1a }, err);
	}

	#[test]
	fn probe_reports_acknowledge() {
		let mut master = I2cMaster::new(SimBus::new(), BusSpeed::Fast, 50_000_000);
		assert!(master.probe(0x1a).unwrap());

		let mut sim = SimBus::new();
		sim.nack_from_frame(0);
		let mut master = I2cMaster::new(sim, BusSpeed::Fast, 50_000_000);
		assert!(!master.probe(0x1a).unwrap());
	}
}
