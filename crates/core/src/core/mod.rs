//! Hart-side components.
//!
//! 1. **Arch:** privilege modes and the CSR fields translation reads.
//! 2. **Hart:** the per-hart context, trap latch, and access entry points.
//! 3. **Units:** the MMU (TLB + page table walker).

/// Architectural state (privilege modes, CSR slice).
pub mod arch;

/// Per-hart context and memory access entry points.
pub mod hart;

/// Functional units (MMU).
pub mod units;

pub use hart::Hart;
