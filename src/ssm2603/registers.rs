/// Control registers of the SSM2603. Register values are 9 bit wide; on the
/// wire the register index and the value's top bit share the first byte:
/// `{ index[6:0], value[8] } { value[7:0] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Register {
	LeftAdcVolume = 0x00,
	RightAdcVolume = 0x01,
	LeftDacVolume = 0x02,
	RightDacVolume = 0x03,
	AnaloguePath = 0x04,
	DigitalPath = 0x05,
	PowerManagement = 0x06,
	InterfaceFormat = 0x07,
	SamplingControl = 0x08,
	ActiveControl = 0x09,
	SoftwareReset = 0x0f,
}

/// One step of the power-up sequence, carrying its 9-bit register value.
/// The tag names the intent of the write so the sequence reads without the
/// datasheet at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStep {
	SoftwareReset(u16),
	PowerManagement(u16),
	LeftLineIn(u16),
	RightLineIn(u16),
	LeftHeadphoneOut(u16),
	RightHeadphoneOut(u16),
	AnaloguePath(u16),
	DigitalPath(u16),
	InterfaceFormat(u16),
	SamplingControl(u16),
	ActiveControl(u16),
}

impl ConfigStep {
	pub fn register(&self) -> Register {
		match self {
			ConfigStep::SoftwareReset(_) => Register::SoftwareReset,
			ConfigStep::PowerManagement(_) => Register::PowerManagement,
			ConfigStep::LeftLineIn(_) => Register::LeftAdcVolume,
			ConfigStep::RightLineIn(_) => Register::RightAdcVolume,
			ConfigStep::LeftHeadphoneOut(_) => Register::LeftDacVolume,
			ConfigStep::RightHeadphoneOut(_) => Register::RightDacVolume,
			ConfigStep::AnaloguePath(_) => Register::AnaloguePath,
			ConfigStep::DigitalPath(_) => Register::DigitalPath,
			ConfigStep::InterfaceFormat(_) => Register::InterfaceFormat,
			ConfigStep::SamplingControl(_) => Register::SamplingControl,
			ConfigStep::ActiveControl(_) => Register::ActiveControl,
		}
	}

	pub fn value(&self) -> u16 {
		match *self {
			ConfigStep::SoftwareReset(v)
			| ConfigStep::PowerManagement(v)
			| ConfigStep::LeftLineIn(v)
			| ConfigStep::RightLineIn(v)
			| ConfigStep::LeftHeadphoneOut(v)
			| ConfigStep::RightHeadphoneOut(v)
			| ConfigStep::AnaloguePath(v)
			| ConfigStep::DigitalPath(v)
			| ConfigStep::InterfaceFormat(v)
			| ConfigStep::SamplingControl(v)
			| ConfigStep::ActiveControl(v) => v,
		}
	}

	/// Two-byte I2C payload for this write.
	pub fn encode(&self) -> [u8; 2] {
		let value = self.value();
		debug_assert!(value <= 0x1ff, "register values are 9 bit");
		[
			((self.register() as u8) << 1) | ((value >> 8) as u8),
			value as u8,
		]
	}
}

/// Power-up configuration in the order the codec requires it: reset, power
/// everything up with the line outputs still held off, route and configure
/// the signal path, start the digital core, and only then release the
/// outputs. The order is a contract of the device; entries must be written
/// exactly as listed.
pub const POWER_UP_SEQUENCE: [ConfigStep; 12] = [
	ConfigStep::SoftwareReset(0x000),
	ConfigStep::PowerManagement(0x010), // all on except the line outputs
	ConfigStep::LeftLineIn(0x017), // 0 dB, unmuted
	ConfigStep::RightLineIn(0x017),
	ConfigStep::LeftHeadphoneOut(0x079), // 0 dB
	ConfigStep::RightHeadphoneOut(0x079),
	ConfigStep::AnaloguePath(0x012), // DAC selected, microphone muted
	ConfigStep::DigitalPath(0x000), // DAC unmuted
	ConfigStep::InterfaceFormat(0x002), // I2S, 16 bit, slave
	ConfigStep::SamplingControl(0x000), // 48 kHz at 256 fs
	ConfigStep::ActiveControl(0x001),
	ConfigStep::PowerManagement(0x000), // line outputs on
];
