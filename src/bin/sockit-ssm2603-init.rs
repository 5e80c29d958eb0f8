#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate sockit_ssm2603_init;
use sockit_ssm2603_init::*;

use std::process::exit;

use sockit_ssm2603_init::i2c::{
	BusSpeed,
	I2cMaster,
};
use sockit_ssm2603_init::timestamp::{
	CycleCounter,
	HostCounter,
	elapsed_ticks,
};

fn get_param<T>(matches: &clap::ArgMatches, name: &str) -> AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid paramater {}: {}", name, e);
		e.context(msg).into()
	})
}

// addresses are usually quoted from the Qsys memory map, i.e. hex
fn get_address(matches: &clap::ArgMatches, name: &str) -> AResult<u64> {
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	let (digits, radix) = if param.starts_with("0x") || param.starts_with("0X") {
		(&param[2..], 16)
	} else {
		(param, 10)
	};
	match u64::from_str_radix(digits, radix) {
		Ok(v) => Ok(v),
		Err(e) => bail!("invalid paramater {}: {}", name, e),
	}
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (clap::App::new("sockit-ssm2603-init")
			.version(crate_version!())
			.about(crate_description!()))
		(@arg I2C_BASE: +required "Physical base address of the I2C master register window (e.g. 0xff200000)")
		(@arg timer: -t --("timer-base") +takes_value "Physical base address of the timestamp timer; falls back to the host clock (nanosecond ticks) if absent")
		(@arg address: -a --("device-address") +takes_value "7-bit codec device address (default 0x1a, CSB low)")
		(@arg speed: -s --speed +takes_value "Bus speed: standard or fast (default fast)")
		(@arg clock: -c --("clock-hz") +takes_value "I2C core input clock in Hz (default 50000000)")
	).get_matches();

	let i2c_base = get_address(&matches, "I2C_BASE")?;

	let device_address = if matches.is_present("address") {
		let address = get_address(&matches, "address")?;
		ensure!(address < 0x80, "device address 0x{:x} doesn't fit 7 bits", address);
		address as u8
	} else {
		ssm2603::DEVICE_ADDRESS_CSB_LOW
	};

	let speed = if matches.is_present("speed") {
		get_param::<BusSpeed>(&matches, "speed")?
	} else {
		BusSpeed::Fast
	};

	let sys_clk_hz = if matches.is_present("clock") {
		get_param::<u32>(&matches, "clock")?
	} else {
		50_000_000
	};

	let mut counter: Box<dyn CycleCounter> = if matches.is_present("timer") {
		let timer_base = get_address(&matches, "timer")?;
		Box::new(platform::open_timestamp_timer(timer_base)?)
	} else {
		debug!("no timestamp timer given, using the host clock");
		Box::new(HostCounter::new())
	};

	let regs = platform::open_i2c_registers(i2c_base)?;
	let mut master = I2cMaster::new(regs, speed, sys_clk_hz);

	counter.start();
	let time0 = counter.sample();
	let result = ssm2603::initialize(&mut master, device_address);
	let time1 = counter.sample();
	counter.stop();

	// a partially configured codec must be visible in the exit status
	result?;

	println!("ticks spent = {}", elapsed_ticks(time0, time1));
	info!("codec 0x{:02x} initialized ({})", device_address, speed);

	Ok(())
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
