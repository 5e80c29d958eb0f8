#![allow(dead_code)]
use std::fmt;

// CR flags (write only)
const COMMAND_START:     u8 = 0x80;
const COMMAND_STOP:      u8 = 0x40;
const COMMAND_READ:      u8 = 0x20;
const COMMAND_WRITE:     u8 = 0x10;
const COMMAND_NACK:      u8 = 0x08; // ACK level to send after a read
const COMMAND_IRQ_ACK:   u8 = 0x01;

// SR flags (read only)
const STATUS_RX_NACK:    u8 = 0x80; // 1 = no acknowledge received
const STATUS_BUSY:       u8 = 0x40; // start seen, stop not yet
const STATUS_ARB_LOST:   u8 = 0x20;
const STATUS_TIP:        u8 = 0x02; // transfer in progress
const STATUS_IRQ:        u8 = 0x01;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusRead(pub u8);

impl StatusRead {
	pub fn is_rx_nack(&self) -> bool {
		0 != self.0 & STATUS_RX_NACK
	}
	pub fn is_busy(&self) -> bool {
		0 != self.0 & STATUS_BUSY
	}
	pub fn is_arbitration_lost(&self) -> bool {
		0 != self.0 & STATUS_ARB_LOST
	}
	pub fn is_transfer_in_progress(&self) -> bool {
		0 != self.0 & STATUS_TIP
	}
	pub fn is_interrupt_pending(&self) -> bool {
		0 != self.0 & STATUS_IRQ
	}
}

impl fmt::Display for StatusRead {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x}", self.0)
	}
}

impl fmt::Debug for StatusRead {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (", self.0)?;
		if self.is_rx_nack() { write!(f, " [NACK]")?; }
		if self.is_busy() { write!(f, " [BUSY]")?; }
		if self.is_arbitration_lost() { write!(f, " [AL]")?; }
		if self.is_transfer_in_progress() { write!(f, " [TIP]")?; }
		if self.is_interrupt_pending() { write!(f, " [IF]")?; }
		write!(f, " )")
	}
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandWrite(pub u8);

impl CommandWrite {
	pub fn idle() -> Self {
		CommandWrite(0)
	}

	pub fn start_write() -> Self {
		*CommandWrite(0)
			.set_start()
			.set_write()
	}

	pub fn write() -> Self {
		*CommandWrite(0)
			.set_write()
	}

	pub fn stop() -> Self {
		*CommandWrite(0)
			.set_stop()
	}

	pub fn is_start(&self) -> bool {
		0 != self.0 & COMMAND_START
	}
	pub fn set_start(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_START;
		self
	}

	pub fn is_stop(&self) -> bool {
		0 != self.0 & COMMAND_STOP
	}
	pub fn set_stop(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_STOP;
		self
	}

	pub fn is_read(&self) -> bool {
		0 != self.0 & COMMAND_READ
	}
	pub fn set_read(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_READ;
		self
	}

	pub fn is_write(&self) -> bool {
		0 != self.0 & COMMAND_WRITE
	}
	pub fn set_write(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_WRITE;
		self
	}

	pub fn is_nack(&self) -> bool {
		0 != self.0 & COMMAND_NACK
	}
	pub fn set_nack(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_NACK;
		self
	}

	pub fn is_irq_ack(&self) -> bool {
		0 != self.0 & COMMAND_IRQ_ACK
	}
	pub fn set_irq_ack(&mut self) -> &mut Self {
		self.0 = self.0 | COMMAND_IRQ_ACK;
		self
	}
}

impl fmt::Display for CommandWrite {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x}", self.0)
	}
}

impl fmt::Debug for CommandWrite {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (", self.0)?;
		if self.is_start() { write!(f, " [STA]")?; }
		if self.is_stop() { write!(f, " [STO]")?; }
		if self.is_read() { write!(f, " [RD]")?; }
		if self.is_write() { write!(f, " [WR]")?; }
		if self.is_nack() { write!(f, " [NACK]")?; }
		if self.is_irq_ack() { write!(f, " [IACK]")?; }
		write!(f, " )")
	}
}
