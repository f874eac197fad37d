//! Guest physical RAM region.
//!
//! This module implements the one contiguous RAM region of the machine:
//! 1. **Buffer:** mmap-backed zeroed storage (`RamBuffer`).
//! 2. **Ram:** the region descriptor mapping `[begin, begin + size)` of the
//!    guest physical address space onto the buffer.

/// Raw backing storage for guest RAM.
pub mod buffer;

use self::buffer::RamBuffer;
use crate::common::{MemoryError, PAGE_OFFSET_MASK};

/// The machine's main RAM region.
///
/// `begin` and `size` are page-aligned, and a physical address `p` belongs
/// to RAM iff `begin <= p < begin + size`. The host address of `p` is
/// `base pointer + (p - begin)`.
#[derive(Debug)]
pub struct Ram {
    begin: u64,
    buffer: RamBuffer,
}

impl Ram {
    /// Creates a RAM region at the given guest physical base.
    ///
    /// Fails if `begin` or `size` is not page-aligned, or if the host
    /// cannot allocate the backing buffer. The region arrives zero-filled.
    pub fn new(begin: u64, size: u64) -> Result<Self, MemoryError> {
        if begin & PAGE_OFFSET_MASK != 0 || size & PAGE_OFFSET_MASK != 0 {
            log::error!(
                "memory boundaries misaligned: {:#010x} - {:#010x}",
                begin,
                begin.wrapping_add(size)
            );
            return Err(MemoryError::MisalignedRegion { begin, size });
        }
        let buffer = RamBuffer::new(size as usize)?;
        Ok(Self { begin, buffer })
    }

    /// Returns the base guest physical address of the region.
    pub fn begin(&self) -> u64 {
        self.begin
    }

    /// Returns the region size in bytes.
    pub fn size(&self) -> u64 {
        self.buffer.len() as u64
    }

    /// Resolves a guest physical address to a host pointer.
    ///
    /// Returns `None` when the address is outside the region. Constant time.
    #[inline(always)]
    pub fn host_ptr(&self, paddr: u64) -> Option<*mut u8> {
        let offset = paddr.wrapping_sub(self.begin);
        if offset < self.buffer.len() as u64 {
            Some(unsafe { self.buffer.as_mut_ptr().add(offset as usize) })
        } else {
            None
        }
    }

    /// Copies bytes into RAM at a region-relative offset.
    ///
    /// Used for loading kernels and test images during machine setup.
    /// Out-of-range loads are ignored.
    pub fn load(&self, offset: u64, data: &[u8]) {
        let offset = offset as usize;
        if offset + data.len() <= self.buffer.len() {
            self.buffer.write_slice(offset, data);
        }
    }

    /// Reads bytes from RAM at a region-relative offset.
    ///
    /// # Panics
    ///
    /// Panics if the range exceeds the region.
    pub fn read(&self, offset: u64, len: usize) -> &[u8] {
        self.buffer.read_slice(offset as usize, len)
    }
}
