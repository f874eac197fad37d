//! Software TLB Unit Tests.
//!
//! Verifies the direct-mapped, three-tag TLB:
//! - Per-access-kind hits and misses
//! - Fill rules (read, write, fetch) and sibling-tag invalidation
//! - Aliasing eviction
//! - Full and single-page flushes

use rvmem_core::common::AccessType;
use rvmem_core::core::units::mmu::tlb::Tlb;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

const PAGE: u64 = 0x1000;

// ══════════════════════════════════════════════════════════
// 1. Basic Operations
// ══════════════════════════════════════════════════════════

#[test]
fn lookup_miss_on_empty() {
    let tlb = Tlb::new(16);
    assert_eq!(tlb.lookup(0x100, AccessType::Read), None);
    assert_eq!(tlb.lookup(0x100, AccessType::Write), None);
    assert_eq!(tlb.lookup(0x100, AccessType::Fetch), None);
}

#[test]
fn zero_vpn_misses_on_fresh_tlb() {
    // The all-invalid initial state must not spuriously hit VPN 0.
    let tlb = Tlb::new(16);
    assert_eq!(tlb.lookup(0, AccessType::Read), None);
}

#[test]
fn put_and_lookup_hit() {
    let mut tlb = Tlb::new(16);
    let bias = 0xABCD_0000usize;

    tlb.put(5 * PAGE, bias, AccessType::Read);

    assert_eq!(tlb.lookup(5, AccessType::Read), Some(bias));
}

// ══════════════════════════════════════════════════════════
// 2. Fill Rules
// ══════════════════════════════════════════════════════════

#[test]
fn read_fill_does_not_grant_write_or_fetch() {
    let mut tlb = Tlb::new(16);

    tlb.put(5 * PAGE, 0x1000, AccessType::Read);

    assert!(tlb.lookup(5, AccessType::Read).is_some());
    assert_eq!(tlb.lookup(5, AccessType::Write), None);
    assert_eq!(tlb.lookup(5, AccessType::Fetch), None);
}

#[test]
fn write_fill_grants_read_and_write() {
    let mut tlb = Tlb::new(16);

    tlb.put(5 * PAGE, 0x1000, AccessType::Write);

    assert!(tlb.lookup(5, AccessType::Read).is_some());
    assert!(tlb.lookup(5, AccessType::Write).is_some());
    assert_eq!(tlb.lookup(5, AccessType::Fetch), None);
}

#[test]
fn fetch_fill_grants_only_fetch() {
    let mut tlb = Tlb::new(16);

    tlb.put(5 * PAGE, 0x1000, AccessType::Fetch);

    assert_eq!(tlb.lookup(5, AccessType::Read), None);
    assert_eq!(tlb.lookup(5, AccessType::Write), None);
    assert!(tlb.lookup(5, AccessType::Fetch).is_some());
}

#[test]
fn upgrade_preserves_matching_tags() {
    let mut tlb = Tlb::new(16);

    tlb.put(5 * PAGE, 0x1000, AccessType::Read);
    tlb.put(5 * PAGE, 0x1000, AccessType::Write);

    // The write fill for the same VPN keeps the read view.
    assert!(tlb.lookup(5, AccessType::Read).is_some());
    assert!(tlb.lookup(5, AccessType::Write).is_some());
}

#[test]
fn fetch_fill_invalidates_stale_data_tags() {
    let size = 16u64;
    let mut tlb = Tlb::new(size as usize);

    // Same slot, different VPNs: the fetch fill must evict the data view.
    tlb.put(5 * PAGE, 0x1000, AccessType::Write);
    tlb.put((5 + size) * PAGE, 0x2000, AccessType::Fetch);

    assert_eq!(tlb.lookup(5, AccessType::Read), None);
    assert_eq!(tlb.lookup(5, AccessType::Write), None);
    assert!(tlb.lookup(5 + size, AccessType::Fetch).is_some());
}

// ══════════════════════════════════════════════════════════
// 3. Aliasing / Conflict Misses
// ══════════════════════════════════════════════════════════

#[test]
fn aliasing_eviction() {
    let size = 16u64;
    let mut tlb = Tlb::new(size as usize);

    // VPN 3 and VPN 3 + size map to the same slot.
    tlb.put(3 * PAGE, 0x1000, AccessType::Read);
    assert!(tlb.lookup(3, AccessType::Read).is_some());

    tlb.put((3 + size) * PAGE, 0x2000, AccessType::Read);
    assert!(tlb.lookup(3 + size, AccessType::Read).is_some());
    assert_eq!(
        tlb.lookup(3, AccessType::Read),
        None,
        "old entry should be evicted by alias"
    );
}

// ══════════════════════════════════════════════════════════
// 4. Flushing
// ══════════════════════════════════════════════════════════

#[test]
fn flush_clears_all_entries() {
    let mut tlb = Tlb::new(16);
    tlb.put(PAGE, 0x1000, AccessType::Write);
    tlb.put(2 * PAGE, 0x2000, AccessType::Fetch);

    tlb.flush();

    for kind in [AccessType::Read, AccessType::Write, AccessType::Fetch] {
        assert_eq!(tlb.lookup(1, kind), None);
        assert_eq!(tlb.lookup(2, kind), None);
    }
}

#[test]
fn flush_page_clears_only_its_slot() {
    let mut tlb = Tlb::new(16);
    tlb.put(PAGE, 0x1000, AccessType::Write);
    tlb.put(2 * PAGE, 0x2000, AccessType::Write);

    tlb.flush_page(PAGE);

    assert_eq!(tlb.lookup(1, AccessType::Read), None);
    assert_eq!(tlb.lookup(1, AccessType::Write), None);
    assert!(
        tlb.lookup(2, AccessType::Write).is_some(),
        "other slots must be preserved"
    );
}

#[test]
fn non_power_of_two_size_rounds_up() {
    let mut tlb = Tlb::new(10); // becomes 16

    // VPN 10 and VPN 26 collide only if the size rounded to 16.
    tlb.put(10 * PAGE, 0x1000, AccessType::Read);
    tlb.put(26 * PAGE, 0x2000, AccessType::Read);

    assert_eq!(tlb.lookup(10, AccessType::Read), None);
    assert_eq!(tlb.lookup(26, AccessType::Read), Some(0x2000));
}
