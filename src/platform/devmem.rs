use std::ffi::CString;
use std::fs;
use std::io;
use std::os::unix::io::{
	FromRawFd,
};
use std::ptr;

use libc::{
	MAP_SHARED,
	O_CLOEXEC,
	O_RDWR,
	O_SYNC,
	PROT_READ,
	PROT_WRITE,
	_SC_PAGESIZE,
	c_void,
	mmap,
	munmap,
	open,
	sysconf,
};

/// A window of word-spaced 32-bit hardware registers mapped from /dev/mem.
#[derive(Debug)]
pub struct Mapped {
	map: ptr::NonNull<u8>,
	map_len: usize,
	regs: ptr::NonNull<u8>, // first register, inside the mapping
	words: usize,
}

impl Drop for Mapped {
	fn drop(&mut self) {
		unsafe {
			let res = munmap(
				self.map.as_ptr() as *mut c_void,
				self.map_len,
			);
			if 0 != res {
				panic!("munmap failed: {}", io::Error::last_os_error());
			}
		}
	}
}

impl Mapped {
	pub fn read_word(&self, index: usize) -> u32 {
		assert!(index < self.words);
		u32::from_le(unsafe {
			ptr::read_volatile(self.regs.as_ptr().add(4 * index) as *const u32)
		})
	}

	pub fn write_word(&mut self, index: usize, data: u32) {
		assert!(index < self.words);
		unsafe {
			ptr::write_volatile(self.regs.as_ptr().add(4 * index) as *mut u32, data.to_le())
		}
	}
}

pub fn inner_open(base: u64, words: usize) -> io::Result<Mapped> {
	assert!(0 == base & 3, "register windows are word aligned");
	assert!(words > 0);

	let page_size = unsafe { sysconf(_SC_PAGESIZE) } as u64;
	// mmap offsets must be page aligned; map from the enclosing page
	let map_base = base & !(page_size - 1);
	let skip = (base - map_base) as usize;
	let span = skip + 4 * words;
	let map_len = (span + page_size as usize - 1) & !(page_size as usize - 1);

	let path = CString::new("/dev/mem")?;

	let fd = unsafe { open(path.as_ptr(), O_RDWR | O_CLOEXEC | O_SYNC) };
	if -1 == fd {
		return Err(io::Error::last_os_error());
	}
	// now get fd managed to prevent resource leak
	let _f = unsafe { fs::File::from_raw_fd(fd) };

	let area = unsafe {
		mmap(
			ptr::null_mut(),
			map_len,
			PROT_READ | PROT_WRITE,
			MAP_SHARED,
			fd,
			map_base as libc::off_t,
		)
	};

	if area as usize == !0usize {
		return Err(io::Error::last_os_error());
	}
	match ptr::NonNull::new(area as *mut u8) {
		None => panic!("mmap shouldn't return NULL ever"),
		Some(map) => Ok(Mapped {
			map,
			map_len,
			regs: unsafe { ptr::NonNull::new_unchecked(map.as_ptr().add(skip)) },
			words,
		}),
	}
}
