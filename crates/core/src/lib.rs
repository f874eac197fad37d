//! Memory translation core for a RISC-V system emulator.
//!
//! This crate implements the subsystem that turns a guest virtual address
//! into a host memory operation under the RISC-V privileged architecture:
//! 1. **MMU:** page table walker for Sv32/Sv39/Sv48/Sv57 plus the Bare and
//!    Machine-mode identity shortcuts, with MPRV/MXR privilege blending.
//! 2. **TLB:** a direct-mapped, per-hart software TLB caching successful
//!    walks as host-pointer biases.
//! 3. **Dispatch:** routing of translated accesses into guest RAM or MMIO
//!    devices, page-crossing splits, and trap latching on failure.
//! 4. **SoC:** the physical address map, the mmap-backed RAM region, the
//!    MMIO device trait, and the size/alignment adapter.
//!
//! The instruction executor, CSR file, trap dispatcher, and device models
//! are external collaborators; this crate only reads the CSR fields that
//! affect translation and latches traps for the executor to collect.

/// Common types and constants (addresses, access types, traps).
pub mod common;

/// Memory subsystem configuration (defaults, hierarchical structures).
pub mod config;

/// Hart-side components (arch state, hart context, MMU).
pub mod core;

/// Physical side (address map, RAM, MMIO devices and adapter).
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Per-hart translation context; owns the TLB and the access entry points.
pub use crate::core::Hart;
/// Physical address map; owns RAM and the MMIO device list.
pub use crate::soc::PhysMap;
/// Guest RAM region backed by host memory.
pub use crate::soc::Ram;
