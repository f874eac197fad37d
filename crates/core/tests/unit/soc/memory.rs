//! Guest RAM Region Unit Tests.
//!
//! Verifies construction rules, zero initialization, and load/read helpers.

use rvmem_core::common::MemoryError;
use rvmem_core::Ram;

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn misaligned_base_is_rejected() {
    let err = Ram::new(0x8000_0800, 0x10_0000).unwrap_err();
    assert!(matches!(
        err,
        MemoryError::MisalignedRegion {
            begin: 0x8000_0800,
            ..
        }
    ));
}

#[test]
fn misaligned_size_is_rejected() {
    let err = Ram::new(0x8000_0000, 0x10_0800).unwrap_err();
    assert!(matches!(err, MemoryError::MisalignedRegion { .. }));
}

#[test]
fn region_reports_its_bounds() {
    let ram = Ram::new(0x8000_0000, 0x10_0000).unwrap();
    assert_eq!(ram.begin(), 0x8000_0000);
    assert_eq!(ram.size(), 0x10_0000);
}

// ══════════════════════════════════════════════════════════
// 2. Contents
// ══════════════════════════════════════════════════════════

#[test]
fn fresh_ram_is_zeroed() {
    let ram = Ram::new(0x8000_0000, 0x2000).unwrap();
    assert!(ram.read(0, 0x2000).iter().all(|&b| b == 0));
}

#[test]
fn load_and_read_roundtrip() {
    let ram = Ram::new(0x8000_0000, 0x2000).unwrap();
    ram.load(0x100, &[1, 2, 3, 4]);
    assert_eq!(ram.read(0x100, 4), &[1, 2, 3, 4]);
}

#[test]
fn out_of_range_load_is_ignored() {
    let ram = Ram::new(0x8000_0000, 0x1000).unwrap();
    ram.load(0xFFE, &[1, 2, 3, 4]);
    assert_eq!(ram.read(0xFFE, 2), &[0, 0]);
}

#[test]
fn host_ptr_offsets_match_region_offsets() {
    let ram = Ram::new(0x8000_0000, 0x2000).unwrap();
    ram.load(0x1004, &[0x42]);

    let ptr = ram.host_ptr(0x8000_1004).unwrap();
    assert_eq!(unsafe { *ptr }, 0x42);
    assert!(ram.host_ptr(0x8000_2000).is_none());
}
