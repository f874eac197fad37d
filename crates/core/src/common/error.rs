//! Trap and configuration error definitions.
//!
//! This module defines the failure types of the translation core:
//! 1. **Trap Representation:** The synchronous faults translation can raise,
//!    each carrying the faulting virtual address as its `tval`.
//! 2. **Configuration Errors:** Construction-time failures (misaligned RAM,
//!    allocation failure, overlapping regions) that are fatal to machine start.

use std::fmt;

use super::data::AccessType;

/// Synchronous trap raised by a failed memory access.
///
/// Only the cause codes the translation core can produce are represented.
/// Page faults mean no valid translation exists for the virtual address;
/// access faults mean translation succeeded but the physical address hit
/// neither RAM nor a responding MMIO device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// Instruction access fault (cause 1).
    ///
    /// A fetch resolved to a physical address outside RAM and every MMIO
    /// region. The associated value is the faulting virtual address.
    InstructionAccessFault(u64),

    /// Load access fault (cause 5).
    LoadAccessFault(u64),

    /// Store/AMO access fault (cause 7).
    StoreAccessFault(u64),

    /// Instruction page fault (cause 12).
    ///
    /// A fetch found no valid translation: invalid or reserved PTE,
    /// missing execute permission, misaligned superpage, or a
    /// non-canonical virtual address.
    InstructionPageFault(u64),

    /// Load page fault (cause 13).
    LoadPageFault(u64),

    /// Store/AMO page fault (cause 15).
    StorePageFault(u64),
}

impl Trap {
    /// Builds the page-fault trap matching an access type.
    pub fn page_fault(access: AccessType, vaddr: u64) -> Self {
        match access {
            AccessType::Fetch => Trap::InstructionPageFault(vaddr),
            AccessType::Read => Trap::LoadPageFault(vaddr),
            AccessType::Write => Trap::StorePageFault(vaddr),
        }
    }

    /// Builds the access-fault trap matching an access type.
    pub fn access_fault(access: AccessType, vaddr: u64) -> Self {
        match access {
            AccessType::Fetch => Trap::InstructionAccessFault(vaddr),
            AccessType::Read => Trap::LoadAccessFault(vaddr),
            AccessType::Write => Trap::StoreAccessFault(vaddr),
        }
    }

    /// Returns the architectural exception cause code for this trap.
    pub fn cause(&self) -> u64 {
        match self {
            Trap::InstructionAccessFault(_) => 1,
            Trap::LoadAccessFault(_) => 5,
            Trap::StoreAccessFault(_) => 7,
            Trap::InstructionPageFault(_) => 12,
            Trap::LoadPageFault(_) => 13,
            Trap::StorePageFault(_) => 15,
        }
    }

    /// Returns the trap value register contents (the faulting virtual address).
    pub fn tval(&self) -> u64 {
        match self {
            Trap::InstructionAccessFault(a)
            | Trap::LoadAccessFault(a)
            | Trap::StoreAccessFault(a)
            | Trap::InstructionPageFault(a)
            | Trap::LoadPageFault(a)
            | Trap::StorePageFault(a) => *a,
        }
    }
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::InstructionAccessFault(a) => write!(f, "InstructionAccessFault({:#x})", a),
            Trap::LoadAccessFault(a) => write!(f, "LoadAccessFault({:#x})", a),
            Trap::StoreAccessFault(a) => write!(f, "StoreAccessFault({:#x})", a),
            Trap::InstructionPageFault(a) => write!(f, "InstructionPageFault({:#x})", a),
            Trap::LoadPageFault(a) => write!(f, "LoadPageFault({:#x})", a),
            Trap::StorePageFault(a) => write!(f, "StorePageFault({:#x})", a),
        }
    }
}

impl std::error::Error for Trap {}

/// Construction-time configuration failure.
///
/// These surface from `Ram::new` and `PhysMap::add_device` and are fatal to
/// machine start. They never occur on the access path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemoryError {
    /// RAM begin or size is not a multiple of the page size.
    MisalignedRegion {
        /// Requested region base physical address.
        begin: u64,
        /// Requested region size in bytes.
        size: u64,
    },

    /// The host refused to allocate the backing buffer.
    AllocationFailed(usize),

    /// An MMIO region overlaps guest RAM.
    RegionOverlap {
        /// Name of the offending device.
        device: String,
        /// Base physical address of the offending region.
        begin: u64,
    },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::MisalignedRegion { begin, size } => {
                write!(f, "memory region misaligned: {:#x} + {:#x}", begin, size)
            }
            MemoryError::AllocationFailed(size) => {
                write!(f, "failed to allocate {} bytes of guest RAM", size)
            }
            MemoryError::RegionOverlap { device, begin } => {
                write!(f, "MMIO region {} at {:#x} overlaps RAM", device, begin)
            }
        }
    }
}

impl std::error::Error for MemoryError {}
