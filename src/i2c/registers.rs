#![allow(dead_code)]
// register file of the I2C master core (indices, not byte offsets; the
// platform bus spaces them one word apart)
pub const PRESCALE_LO: usize = 0;
pub const PRESCALE_HI: usize = 1;
pub const CONTROL: usize = 2;
pub const TRANSMIT: usize = 3; // RECEIVE when read
pub const COMMAND: usize = 4; // STATUS when read

pub const REGISTER_COUNT: usize = 5;

// CTR flags
pub const CONTROL_CORE_ENABLE: u8 = 0x80;
pub const CONTROL_INTERRUPT_ENABLE: u8 = 0x40;

pub trait I2cRegisters {
	fn read_reg(&self, index: usize) -> u8;
	fn write_reg(&mut self, index: usize, data: u8);
}

impl<'a, R: ?Sized + I2cRegisters> I2cRegisters for &'a mut R {
	fn read_reg(&self, index: usize) -> u8 {
		R::read_reg(*self, index)
	}
	fn write_reg(&mut self, index: usize, data: u8) {
		R::write_reg(*self, index, data);
	}
}
