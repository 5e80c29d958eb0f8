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

fn controller_status(sub_m: &clap::ArgMatches) -> AResult<()> {
	let base = get_address(sub_m, "I2C_BASE")?;
	let regs = platform::open_i2c_registers(base)?;
	let master = I2cMaster::attach(regs);

	println!("control: 0x{:02x}", master.control());
	println!("status : {:?}", master.status());

	Ok(())
}

fn probe(sub_m: &clap::ArgMatches) -> AResult<()> {
	let base = get_address(sub_m, "I2C_BASE")?;
	let regs = platform::open_i2c_registers(base)?;
	let mut master = I2cMaster::new(regs, BusSpeed::Standard, 50_000_000);

	if sub_m.is_present("scan") {
		// reserved addresses below 0x08 and above 0x77 are skipped
		let mut found = 0usize;
		for address in 0x08u8..0x78 {
			if master.probe(address)? {
				println!("device at 0x{:02x}", address);
				found += 1;
			}
		}
		if 0 == found {
			warn!("no devices acknowledged");
		}
	} else {
		let address = if sub_m.is_present("address") {
			let address = get_address(sub_m, "address")?;
			ensure!(address < 0x80, "device address 0x{:x} doesn't fit 7 bits", address);
			address as u8
		} else {
			ssm2603::DEVICE_ADDRESS_CSB_LOW
		};
		if master.probe(address)? {
			println!("0x{:02x}: acknowledge", address);
		} else {
			println!("0x{:02x}: no acknowledge", address);
			exit(2);
		}
	}

	Ok(())
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (clap::App::new("ssm2603-debug")
			.version(crate_version!())
			.about("Poke at the I2C master in front of the SSM2603 codec"))
		(@setting SubcommandRequiredElseHelp)
		(global_setting: clap::AppSettings::VersionlessSubcommands)
		(@subcommand status =>
			(about: "decode the controller control/status registers")
			(@arg I2C_BASE: +required "physical base address of the I2C master register window")
		)
		(@subcommand probe =>
			(about: "check whether a device acknowledges its address")
			(@arg scan: --scan "probe the whole 7-bit address range")
			(@arg address: -a --("device-address") +takes_value "7-bit device address (default 0x1a)")
			(@arg I2C_BASE: +required "physical base address of the I2C master register window")
		)
	).get_matches();

	match matches.subcommand() {
		("status", Some(sub_m)) => {
			controller_status(sub_m)
		}
		("probe", Some(sub_m)) => {
			probe(sub_m)
		}
		("", _) => bail!("no subcommand"),
		(cmd, _) => bail!("not implemented subcommand {:?}", cmd),
	}
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
