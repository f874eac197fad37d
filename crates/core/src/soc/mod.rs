//! Physical side of the machine.
//!
//! This module owns everything behind the translation boundary:
//! 1. **Interconnect:** the physical address map routing addresses to RAM or MMIO.
//! 2. **Memory:** the guest RAM region and its backing buffer.
//! 3. **Devices:** the MMIO device trait.
//! 4. **MMIO adapter:** size and alignment adaptation between guest accesses
//!    and device operation windows.

/// MMIO device trait.
pub mod devices;

/// Physical address map (RAM + MMIO routing).
pub mod interconnect;

/// Guest RAM region and backing buffer.
pub mod memory;

/// MMIO size/alignment adapter.
pub mod mmio;

pub use interconnect::PhysMap;
pub use memory::Ram;
