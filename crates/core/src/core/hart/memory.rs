//! Memory access entry points.
//!
//! The dispatch layer between the instruction executor and the physical
//! address space. Every guest load, store, and fetch funnels through here:
//! 1. **Page-Crossing Split:** accesses straddling a page boundary become
//!    two independent sub-accesses.
//! 2. **Fast Path:** a TLB hit turns the virtual address into a host
//!    address with one add, then copies.
//! 3. **Slow Path:** translate, then route to RAM (installing a TLB entry)
//!    or through the MMIO adapter, or latch the matching trap.

use std::ptr;

use super::Hart;
use crate::common::constants::{PAGE_OFFSET_MASK, PAGE_SHIFT, PAGE_SIZE};
use crate::common::{AccessType, Trap, VirtAddr};
use crate::soc::{mmio, PhysMap};

/// Returns whether an access of `size` bytes at `vaddr` stays in one page.
#[inline(always)]
fn block_in_page(vaddr: u64, size: usize) -> bool {
    (vaddr & PAGE_OFFSET_MASK) + size as u64 <= PAGE_SIZE
}

impl Hart {
    /// Reads guest memory at a virtual address into `buf`.
    ///
    /// Returns `false` when a trap was latched; the caller must discard the
    /// current instruction's effects.
    pub fn mem_read(&mut self, pam: &mut PhysMap, vaddr: VirtAddr, buf: &mut [u8]) -> bool {
        self.copy_from_guest(pam, vaddr, buf, AccessType::Read)
    }

    /// Fetches instruction bytes at a virtual address into `buf`.
    pub fn mem_fetch(&mut self, pam: &mut PhysMap, vaddr: VirtAddr, buf: &mut [u8]) -> bool {
        self.copy_from_guest(pam, vaddr, buf, AccessType::Fetch)
    }

    /// Writes `buf` to guest memory at a virtual address.
    ///
    /// Returns `false` when a trap was latched. A page-crossing store whose
    /// second half faults has already committed its first half; the
    /// executor sees the failure and traps, but RAM keeps the partial
    /// write.
    pub fn mem_write(&mut self, pam: &mut PhysMap, vaddr: VirtAddr, buf: &[u8]) -> bool {
        let va = vaddr.val();

        if !block_in_page(va, buf.len()) {
            let part = (PAGE_SIZE - (va & PAGE_OFFSET_MASK)) as usize;
            let (lo, hi) = buf.split_at(part);
            return self.mem_write(pam, vaddr, lo)
                && self.mem_write(pam, VirtAddr::new(va + part as u64), hi);
        }

        if let Some(bias) = self.mmu.tlb.lookup(va >> PAGE_SHIFT, AccessType::Write) {
            self.mmu.tlb_hits += 1;
            unsafe {
                ptr::copy_nonoverlapping(
                    buf.as_ptr(),
                    bias.wrapping_add(va as usize) as *mut u8,
                    buf.len(),
                );
            }
            return true;
        }

        self.mmu.tlb_misses += 1;
        let paddr = match self
            .mmu
            .translate(&self.csrs, self.privilege, pam, va, AccessType::Write)
        {
            Some(paddr) => paddr,
            None => {
                self.raise_trap(Trap::page_fault(AccessType::Write, va));
                return false;
            }
        };

        if let Some(host) = pam.phys_to_host(paddr) {
            let bias = (host as usize).wrapping_sub(va as usize);
            self.mmu.tlb.put(va, bias, AccessType::Write);
            self.jit_invalidate(va, paddr, buf.len());
            unsafe {
                ptr::copy_nonoverlapping(buf.as_ptr(), host, buf.len());
            }
            return true;
        }

        if let Some((dev, offset)) = pam.find_mmio(paddr) {
            if mmio::write(dev, buf, offset) {
                return true;
            }
        }

        self.raise_trap(Trap::access_fault(AccessType::Write, va));
        false
    }

    /// Shared read/fetch path: copies guest memory into `buf`.
    fn copy_from_guest(
        &mut self,
        pam: &mut PhysMap,
        vaddr: VirtAddr,
        buf: &mut [u8],
        access: AccessType,
    ) -> bool {
        let va = vaddr.val();

        if !block_in_page(va, buf.len()) {
            let part = (PAGE_SIZE - (va & PAGE_OFFSET_MASK)) as usize;
            let (lo, hi) = buf.split_at_mut(part);
            return self.copy_from_guest(pam, vaddr, lo, access)
                && self.copy_from_guest(pam, VirtAddr::new(va + part as u64), hi, access);
        }

        if let Some(bias) = self.mmu.tlb.lookup(va >> PAGE_SHIFT, access) {
            self.mmu.tlb_hits += 1;
            unsafe {
                ptr::copy_nonoverlapping(
                    bias.wrapping_add(va as usize) as *const u8,
                    buf.as_mut_ptr(),
                    buf.len(),
                );
            }
            return true;
        }

        self.mmu.tlb_misses += 1;
        let paddr = match self
            .mmu
            .translate(&self.csrs, self.privilege, pam, va, access)
        {
            Some(paddr) => paddr,
            None => {
                self.raise_trap(Trap::page_fault(access, va));
                return false;
            }
        };

        if let Some(host) = pam.phys_to_host(paddr) {
            let bias = (host as usize).wrapping_sub(va as usize);
            self.mmu.tlb.put(va, bias, access);
            unsafe {
                ptr::copy_nonoverlapping(host as *const u8, buf.as_mut_ptr(), buf.len());
            }
            return true;
        }

        if let Some((dev, offset)) = pam.find_mmio(paddr) {
            if mmio::read(dev, buf, offset) {
                return true;
            }
        }

        self.raise_trap(Trap::access_fault(access, va));
        false
    }
}
