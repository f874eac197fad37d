//! Guest RAM backing buffer.
//!
//! A wrapper around raw host memory holding the guest's physical RAM. On
//! Unix systems the buffer is an anonymous `mmap`, so large guest RAM sizes
//! are allocated lazily by the host kernel and arrive zero-filled. Other
//! platforms fall back to a zeroed `Vec`. The buffer hands out raw pointers
//! because the TLB caches host addresses and DMA-capable devices address it
//! directly.

use std::slice;

use crate::common::MemoryError;

/// Raw backing storage for a guest RAM region.
///
/// The pointer is stable for the lifetime of the buffer, which is what lets
/// the TLB cache `host pointer - virtual base` biases across accesses.
#[derive(Debug)]
pub struct RamBuffer {
    ptr: *mut u8,
    size: usize,
    is_mmap: bool,
}

// The buffer itself is plain memory; synchronization of guest-visible
// ordering happens at the instruction layer, not here.
unsafe impl Send for RamBuffer {}
unsafe impl Sync for RamBuffer {}

impl RamBuffer {
    /// Allocates a zero-initialized buffer of the given size.
    ///
    /// Returns `MemoryError::AllocationFailed` if the host refuses the
    /// mapping.
    pub fn new(size: usize) -> Result<Self, MemoryError> {
        #[cfg(unix)]
        {
            use std::ptr;
            let ptr = unsafe {
                libc::mmap(
                    ptr::null_mut(),
                    size,
                    libc::PROT_READ | libc::PROT_WRITE,
                    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                    -1,
                    0,
                )
            };

            if ptr == libc::MAP_FAILED {
                return Err(MemoryError::AllocationFailed(size));
            }

            Ok(Self {
                ptr: ptr as *mut u8,
                size,
                is_mmap: true,
            })
        }

        #[cfg(not(unix))]
        {
            let mut vec = vec![0u8; size];
            let ptr = vec.as_mut_ptr();
            std::mem::forget(vec);
            Ok(Self {
                ptr,
                size,
                is_mmap: false,
            })
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns a raw pointer to the buffer.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Returns a mutable raw pointer to the buffer.
    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Reads a slice of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` exceeds the buffer size.
    pub fn read_slice(&self, offset: usize, len: usize) -> &[u8] {
        assert!(offset + len <= self.size, "RAM read out of bounds");
        unsafe { slice::from_raw_parts(self.ptr.add(offset), len) }
    }

    /// Writes a slice into the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `offset + data.len()` exceeds the buffer size.
    pub fn write_slice(&self, offset: usize, data: &[u8]) {
        assert!(offset + data.len() <= self.size, "RAM write out of bounds");
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), self.ptr.add(offset), data.len());
        }
    }
}

impl Drop for RamBuffer {
    fn drop(&mut self) {
        if self.is_mmap {
            #[cfg(unix)]
            unsafe {
                libc::munmap(self.ptr as *mut _, self.size);
            }
        } else {
            #[cfg(not(unix))]
            unsafe {
                let _ = Vec::from_raw_parts(self.ptr, self.size, self.size);
            }
        }
    }
}
