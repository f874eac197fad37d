//! Hart-side translation context.
//!
//! This module holds the per-hart state the translation core operates on:
//! 1. **Context:** privilege mode, the CSR slice, and the MMU with its TLB.
//! 2. **CSR Writes:** SATP/MSTATUS/privilege updates, which invalidate
//!    cached translations.
//! 3. **Trap Latch:** the stand-in for the external trap dispatcher. A
//!    failed access latches a trap; the instruction executor collects it
//!    with `take_trap` and discards the instruction's effects.
//!
//! The memory access entry points live in the `memory` submodule.

mod memory;

use crate::common::{Trap, VirtAddr};
use crate::core::arch::csr::CsrFile;
use crate::core::arch::mode::PrivilegeMode;
use crate::core::units::mmu::Mmu;

/// One hardware thread's translation context.
///
/// The TLB inside is private to this hart; no synchronization is needed
/// around its reads, fills, or flushes.
pub struct Hart {
    /// Current privilege mode.
    pub privilege: PrivilegeMode,
    /// The CSR fields translation reads (SATP, MSTATUS).
    pub csrs: CsrFile,
    /// The MMU with its per-hart TLB.
    pub mmu: Mmu,
    pending_trap: Option<Trap>,
}

impl Hart {
    /// Creates a hart in Machine mode with translation off.
    pub fn new(tlb_entries: usize) -> Self {
        Self {
            privilege: PrivilegeMode::Machine,
            csrs: CsrFile::default(),
            mmu: Mmu::new(tlb_entries),
            pending_trap: None,
        }
    }

    /// Resets the hart to its power-on translation state.
    pub fn reset(&mut self) {
        self.privilege = PrivilegeMode::Machine;
        self.csrs = CsrFile::default();
        self.mmu.tlb.flush();
        self.pending_trap = None;
    }

    /// Writes SATP and invalidates all cached translations.
    pub fn write_satp(&mut self, val: u64) {
        self.csrs.satp = val;
        self.mmu.tlb.flush();
    }

    /// Writes MSTATUS and invalidates all cached translations.
    ///
    /// MPRV and MXR change how accesses translate, so any cached walk may
    /// be stale after this.
    pub fn write_mstatus(&mut self, val: u64) {
        self.csrs.mstatus = val;
        self.mmu.tlb.flush();
    }

    /// Switches privilege mode and invalidates all cached translations.
    pub fn set_privilege(&mut self, mode: PrivilegeMode) {
        self.privilege = mode;
        self.mmu.tlb.flush();
    }

    /// Invalidates every TLB entry (SFENCE.VMA with no address).
    pub fn flush_tlb(&mut self) {
        self.mmu.tlb.flush();
    }

    /// Invalidates the TLB slot covering one page (SFENCE.VMA with an
    /// address argument).
    pub fn flush_tlb_page(&mut self, vaddr: VirtAddr) {
        self.mmu.tlb.flush_page(vaddr.val());
    }

    /// Latches a trap for the instruction executor.
    pub(crate) fn raise_trap(&mut self, trap: Trap) {
        log::trace!("trap raised: {}", trap);
        self.pending_trap = Some(trap);
    }

    /// Returns the latched trap without consuming it.
    pub fn pending_trap(&self) -> Option<&Trap> {
        self.pending_trap.as_ref()
    }

    /// Hands the latched trap to the trap dispatcher.
    pub fn take_trap(&mut self) -> Option<Trap> {
        self.pending_trap.take()
    }

    /// Hook for trace-cache invalidation on guest writes.
    ///
    /// The embedding emulator overrides this behavior when it JIT-compiles
    /// guest code; here it is a no-op.
    #[inline(always)]
    pub fn jit_invalidate(&mut self, _vaddr: u64, _paddr: u64, _size: usize) {}
}
