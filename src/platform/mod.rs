//! Platform access to the memory-mapped peripherals. Linux only for now:
//! register windows are mapped out of /dev/mem at a physical base address
//! the platform (device tree, Qsys) hands us.

mod devmem;

use self::devmem::Mapped;

use crate::i2c::{
	I2cRegisters,
	REGISTER_COUNT,
};
use crate::timestamp::{
	CycleCounter,
	TIMER_REGISTER_COUNT,
	TimerRegisters,
	TimestampTimer,
};
use crate::AResult;

struct WrapI2cWindow {
	window: Mapped,
}

// the I2C core exposes 8-bit registers in the low byte of each word
impl I2cRegisters for WrapI2cWindow {
	fn read_reg(&self, index: usize) -> u8 {
		self.window.read_word(index) as u8
	}

	fn write_reg(&mut self, index: usize, data: u8) {
		self.window.write_word(index, data as u32);
	}
}

struct WrapTimerWindow {
	window: Mapped,
}

// the interval timer exposes 16-bit registers in the low half of each word
impl TimerRegisters for WrapTimerWindow {
	fn read_reg(&self, index: usize) -> u16 {
		self.window.read_word(index) as u16
	}

	fn write_reg(&mut self, index: usize, data: u16) {
		self.window.write_word(index, data as u32);
	}
}

pub fn open_i2c_registers(base: u64) -> AResult<impl I2cRegisters> {
	let window = with_context!(
		("map I2C master registers at 0x{:08x}", base),
		{ Ok(devmem::inner_open(base, REGISTER_COUNT)?) }
	)?;
	Ok(WrapI2cWindow { window })
}

pub fn open_timestamp_timer(base: u64) -> AResult<impl CycleCounter> {
	let window = with_context!(
		("map timestamp timer registers at 0x{:08x}", base),
		{ Ok(devmem::inner_open(base, TIMER_REGISTER_COUNT)?) }
	)?;
	Ok(TimestampTimer::new(WrapTimerWindow { window }))
}
