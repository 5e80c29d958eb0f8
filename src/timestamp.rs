//! Elapsed-cycle measurement around the initialization sequence.
//!
//! The hardware source is an Avalon interval timer driven as a free-running
//! timestamp counter: loaded with the maximum period, running continuously,
//! snapshot latched on demand. The counter counts down, so the tick count
//! reported here (period minus snapshot) rises and wraps at 32 bits.

use std::time::Instant;

// register file of the interval timer (16-bit registers, word-spaced)
pub const STATUS: usize = 0;
pub const CONTROL: usize = 1;
pub const PERIOD_LO: usize = 2;
pub const PERIOD_HI: usize = 3;
pub const SNAP_LO: usize = 4;
pub const SNAP_HI: usize = 5;

pub const TIMER_REGISTER_COUNT: usize = 6;

// CONTROL flags
pub const CONTROL_CONTINUOUS: u16 = 0x2;
pub const CONTROL_START: u16 = 0x4;
pub const CONTROL_STOP: u16 = 0x8;

pub trait TimerRegisters {
	fn read_reg(&self, index: usize) -> u16;
	fn write_reg(&mut self, index: usize, data: u16);
}

pub trait CycleCounter {
	fn start(&mut self);
	fn sample(&mut self) -> u32;
	fn stop(&mut self) {}
}

/// Ticks between two samples of the same counter; correct across a single
/// wrap of the 32-bit counter.
pub fn elapsed_ticks(before: u32, after: u32) -> u32 {
	after.wrapping_sub(before)
}

pub struct TimestampTimer<R: TimerRegisters> {
	regs: R,
}

impl<R: TimerRegisters> TimestampTimer<R> {
	pub fn new(regs: R) -> Self {
		TimestampTimer { regs }
	}
}

impl<R: TimerRegisters> CycleCounter for TimestampTimer<R> {
	fn start(&mut self) {
		// maximum period; with CONT set the counter reloads and keeps
		// running, which is what makes wrapping subtraction work
		self.regs.write_reg(PERIOD_LO, 0xffff);
		self.regs.write_reg(PERIOD_HI, 0xffff);
		self.regs.write_reg(CONTROL, CONTROL_START | CONTROL_CONTINUOUS);
	}

	fn sample(&mut self) -> u32 {
		// a write to either snap register latches the running count
		self.regs.write_reg(SNAP_LO, 0);
		let lo = self.regs.read_reg(SNAP_LO) as u32;
		let hi = self.regs.read_reg(SNAP_HI) as u32;
		let snapshot = lo | (hi << 16);
		// down-counter from 0xffff_ffff
		!snapshot
	}

	fn stop(&mut self) {
		self.regs.write_reg(CONTROL, CONTROL_STOP);
	}
}

/// Host-clock fallback for platforms without a mapped timestamp timer;
/// ticks are nanoseconds.
pub struct HostCounter {
	started: Instant,
}

impl HostCounter {
	pub fn new() -> Self {
		HostCounter {
			started: Instant::now(),
		}
	}
}

impl CycleCounter for HostCounter {
	fn start(&mut self) {
		self.started = Instant::now();
	}

	fn sample(&mut self) -> u32 {
		let elapsed = self.started.elapsed();
		(elapsed.as_secs().wrapping_mul(1_000_000_000))
			.wrapping_add(elapsed.subsec_nanos() as u64) as u32
	}
}
