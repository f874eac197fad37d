//! Physical address map.
//!
//! This module routes guest physical addresses to their backing. It provides:
//! 1. **RAM resolution:** constant-time translation of a physical address to
//!    a host pointer inside the machine's one contiguous RAM region.
//! 2. **MMIO lookup:** linear scan over the registered device regions.
//! 3. **Registration:** devices are added at machine construction and the
//!    list is read-only while harts execute.

use crate::common::MemoryError;
use crate::soc::devices::MmioDevice;
use crate::soc::memory::Ram;

/// The machine's physical address space: one RAM region plus MMIO devices.
///
/// Answers the single question the translation core keeps asking: given a
/// physical address, is it RAM (host pointer), MMIO (device), or void?
pub struct PhysMap {
    ram: Ram,
    devices: Vec<Box<dyn MmioDevice>>,
}

impl PhysMap {
    /// Creates an address map over the given RAM region with no devices.
    pub fn new(ram: Ram) -> Self {
        Self {
            ram,
            devices: Vec::new(),
        }
    }

    /// Returns the RAM region.
    pub fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Registers an MMIO device region.
    ///
    /// The region must not overlap RAM. Overlap between MMIO regions is not
    /// checked; the first containing region wins on lookup, so the caller
    /// must keep the map disjoint. Only call while all harts are quiesced.
    pub fn add_device(&mut self, dev: Box<dyn MmioDevice>) -> Result<(), MemoryError> {
        let (begin, size) = dev.address_range();
        let end = begin.wrapping_add(size);
        if begin < self.ram.begin() + self.ram.size() && end > self.ram.begin() {
            return Err(MemoryError::RegionOverlap {
                device: dev.name().to_string(),
                begin,
            });
        }
        log::trace!(
            "mapping {} at {:#x} - {:#x}",
            dev.name(),
            begin,
            end
        );
        self.devices.push(dev);
        Ok(())
    }

    /// Resolves a physical address to a host pointer when it lies in RAM.
    #[inline(always)]
    pub fn phys_to_host(&self, paddr: u64) -> Option<*mut u8> {
        self.ram.host_ptr(paddr)
    }

    /// Finds the MMIO device whose region contains the given address.
    ///
    /// Returns the device and the device-relative offset of the address.
    pub fn find_mmio(&mut self, paddr: u64) -> Option<(&mut dyn MmioDevice, u64)> {
        for dev in self.devices.iter_mut() {
            let (begin, size) = dev.address_range();
            if paddr >= begin && paddr < begin.wrapping_add(size) {
                return Some((dev.as_mut(), paddr - begin));
            }
        }
        None
    }
}
