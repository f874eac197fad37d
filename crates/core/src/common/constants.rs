//! Global constants for the translation core.
//!
//! Page geometry shared by every paging mode, and the SATP mode encodings
//! the core recognizes.

/// Page size in bytes (4 KiB in all RISC-V paging modes).
pub const PAGE_SIZE: u64 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u64 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// SATP MODE encoding for Bare (no translation).
pub const SATP_MODE_BARE: u64 = 0;

/// SATP MODE encoding for Sv32 two-level paging.
pub const SATP_MODE_SV32: u64 = 1;

/// SATP MODE encoding for Sv39 three-level paging.
pub const SATP_MODE_SV39: u64 = 8;

/// SATP MODE encoding for Sv48 four-level paging.
pub const SATP_MODE_SV48: u64 = 9;

/// SATP MODE encoding for Sv57 five-level paging.
pub const SATP_MODE_SV57: u64 = 10;
