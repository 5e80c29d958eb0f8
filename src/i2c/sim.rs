//! Simulated I2C master controller for tests: models the register protocol
//! of the core (transmit latch, command strobes, status flags) together with
//! a device that acknowledges everything until told otherwise. Completed
//! frames are recorded for inspection.

use super::registers::{
	self,
	I2cRegisters,
};

// SR flags, mirroring the hardware layout
const SR_RX_NACK: u8 = 0x80;
const SR_BUSY: u8 = 0x40;
const SR_ARB_LOST: u8 = 0x20;

const SR_TIP: u8 = 0x02;

// CR flags
const CR_START: u8 = 0x80;
const CR_STOP: u8 = 0x40;
const CR_WRITE: u8 = 0x10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
	pub address: u8,
	pub bytes: Vec<u8>,
}

pub(crate) struct SimBus {
	prescale_lo: u8,
	prescale_hi: u8,
	control: u8,
	transmit: u8,
	status: u8,
	current: Option<Frame>,
	pub frames: Vec<Frame>,
	nack_from: Option<usize>,
	nack_at_byte: Option<(usize, usize)>,
	arb_lost_at: Option<usize>,
	stuck_tip: bool,
}

impl SimBus {
	pub fn new() -> Self {
		SimBus {
			prescale_lo: 0,
			prescale_hi: 0,
			control: 0,
			transmit: 0,
			status: 0,
			current: None,
			frames: Vec::new(),
			nack_from: None,
			nack_at_byte: None,
			arb_lost_at: None,
			stuck_tip: false,
		}
	}

	/// Frames with index >= `n` get no acknowledge on their address byte.
	pub fn nack_from_frame(&mut self, n: usize) {
		self.nack_from = Some(n);
	}

	/// No acknowledge on byte `byte` of frame `frame` (the address byte is
	/// byte 0, the first data byte is byte 1).
	pub fn nack_at_byte(&mut self, frame: usize, byte: usize) {
		self.nack_at_byte = Some((frame, byte));
	}

	/// Arbitration is lost during the address byte of frame `n`.
	pub fn lose_arbitration_at_frame(&mut self, n: usize) {
		self.arb_lost_at = Some(n);
	}

	/// The controller never finishes a byte transfer: TIP stays set.
	pub fn hold_transfer_in_progress(&mut self) {
		self.stuck_tip = true;
	}

	pub fn prescale(&self) -> u16 {
		(self.prescale_lo as u16) | ((self.prescale_hi as u16) << 8)
	}

	/// Completed frames decoded as (device address, register, 9-bit value).
	pub fn device_writes(&self) -> Vec<(u8, u8, u16)> {
		self.frames
			.iter()
			.filter(|f| 2 == f.bytes.len())
			.map(|f| {
				let register = f.bytes[0] >> 1;
				let value = (((f.bytes[0] & 1) as u16) << 8) | (f.bytes[1] as u16);
				(f.address, register, value)
			})
			.collect()
	}

	// index the next started frame will get
	fn next_frame_index(&self) -> usize {
		self.frames.len()
	}

	fn device_acks_frame(&self, index: usize) -> bool {
		match self.nack_from {
			Some(n) => index < n,
			None => true,
		}
	}

	fn device_acks_byte(&self, frame: usize, byte: usize) -> bool {
		Some((frame, byte)) != self.nack_at_byte
	}

	fn handle_command(&mut self, command: u8) {
		if 0 != command & CR_START && 0 != command & CR_WRITE {
			let index = self.next_frame_index();
			self.current = Some(Frame {
				address: self.transmit >> 1,
				bytes: Vec::new(),
			});
			self.status = SR_BUSY;
			if Some(index) == self.arb_lost_at {
				self.status |= SR_ARB_LOST;
			} else if !self.device_acks_frame(index) || !self.device_acks_byte(index, 0) {
				self.status |= SR_RX_NACK;
			}
		} else if 0 != command & CR_WRITE {
			let index = self.next_frame_index();
			let data = self.transmit;
			let byte = match self.current {
				Some(ref mut frame) => {
					frame.bytes.push(data);
					frame.bytes.len()
				}
				None => panic!("data byte without start condition"),
			};
			if !self.device_acks_byte(index, byte) {
				self.status |= SR_RX_NACK;
			}
		}

		if 0 != command & CR_STOP {
			if let Some(frame) = self.current.take() {
				self.frames.push(frame);
			}
			self.status &= !SR_BUSY;
		}
	}
}

impl I2cRegisters for SimBus {
	fn read_reg(&self, index: usize) -> u8 {
		match index {
			registers::PRESCALE_LO => self.prescale_lo,
			registers::PRESCALE_HI => self.prescale_hi,
			registers::CONTROL => self.control,
			registers::TRANSMIT => 0xff, // receive path unused
			// TIP completes instantly unless the controller is held stuck
			registers::COMMAND => {
				if self.stuck_tip {
					self.status | SR_TIP
				} else {
					self.status
				}
			}
			_ => panic!("read of unknown register {}", index),
		}
	}

	fn write_reg(&mut self, index: usize, data: u8) {
		match index {
			registers::PRESCALE_LO => self.prescale_lo = data,
			registers::PRESCALE_HI => self.prescale_hi = data,
			registers::CONTROL => self.control = data,
			registers::TRANSMIT => self.transmit = data,
			registers::COMMAND => self.handle_command(data),
			_ => panic!("write of unknown register {}", index),
		}
	}
}
