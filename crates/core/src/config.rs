//! Configuration for the translation core.
//!
//! This module defines the configuration structures used to parameterize a
//! machine's memory subsystem. It provides:
//! 1. **Defaults:** Baseline constants for RAM placement and TLB sizing.
//! 2. **Structures:** Hierarchical config for the physical memory map and MMU.
//!
//! Configuration is deserialized from JSON by the embedding emulator, or use
//! `Config::default()` for a conventional `virt`-style machine.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Base address of main system RAM (2 GiB).
    ///
    /// All guest physical accesses below this address are treated as MMIO.
    pub const RAM_BASE: u64 = 0x8000_0000;

    /// Total size of main system RAM (128 MiB).
    pub const RAM_SIZE: u64 = 128 * 1024 * 1024;

    /// Translation Lookaside Buffer entry count.
    ///
    /// Number of virtual page translations cached per hart. Must be a
    /// power of two; direct-mapped by the low VPN bits.
    pub const TLB_ENTRIES: usize = 256;
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvmem_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.system.ram_base, 0x8000_0000);
/// assert_eq!(config.mmu.tlb_entries, 256);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use rvmem_core::config::Config;
///
/// let json = r#"{
///     "system": { "ram_base": 2147483648, "ram_size": 67108864 },
///     "mmu": { "tlb_entries": 512 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.system.ram_size, 67108864);
/// assert_eq!(config.mmu.tlb_entries, 512);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Physical memory map parameters.
    #[serde(default)]
    pub system: SystemConfig,
    /// Per-hart MMU parameters.
    #[serde(default)]
    pub mmu: MmuConfig,
}

/// Physical memory map configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Main RAM base physical address. Must be page-aligned.
    #[serde(default = "SystemConfig::default_ram_base")]
    pub ram_base: u64,

    /// Main RAM size in bytes. Must be page-aligned.
    #[serde(default = "SystemConfig::default_ram_size")]
    pub ram_size: u64,
}

impl SystemConfig {
    /// Returns the default RAM base address.
    fn default_ram_base() -> u64 {
        defaults::RAM_BASE
    }

    /// Returns the default RAM size in bytes.
    fn default_ram_size() -> u64 {
        defaults::RAM_SIZE
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}

/// Per-hart MMU configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MmuConfig {
    /// TLB entry count (rounded up to a power of two at construction).
    #[serde(default = "MmuConfig::default_tlb_entries")]
    pub tlb_entries: usize,
}

impl MmuConfig {
    /// Returns the default TLB entry count.
    fn default_tlb_entries() -> usize {
        defaults::TLB_ENTRIES
    }
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            tlb_entries: defaults::TLB_ENTRIES,
        }
    }
}
