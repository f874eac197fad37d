//! Memory Access Types.
//!
//! Classification of memory accesses used throughout the translation core:
//! 1. **Permission Validation:** Selecting the R/W/X bit a leaf PTE must carry.
//! 2. **Fault Generation:** Choosing the page fault or access fault trap type.
//! 3. **TLB Keying:** Each access kind has its own tag in a TLB slot.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch. Requires Execute (X) permission.
    Fetch,

    /// Data load. Requires Read (R) permission, or Execute when MXR is set.
    Read,

    /// Data store. Requires Write (W) permission.
    Write,
}
