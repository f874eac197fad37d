use rvmem_core::common::constants::{SATP_MODE_SV32, SATP_MODE_SV39, SATP_MODE_SV48, SATP_MODE_SV57};
use rvmem_core::core::arch::csr::SATP_MODE_SHIFT;
use rvmem_core::core::arch::mode::PrivilegeMode;
use rvmem_core::soc::devices::MmioDevice;
use rvmem_core::{Config, Hart, PhysMap, Ram};

/// Default guest RAM placement for tests.
pub const RAM_BASE: u64 = 0x8000_0000;
pub const RAM_SIZE: u64 = 0x0100_0000; // 16 MiB

pub struct TestContext {
    pub hart: Hart,
    pub pam: PhysMap,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_ram(RAM_BASE, RAM_SIZE)
    }

    pub fn with_ram(base: u64, size: u64) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = Config::default();
        let ram = Ram::new(base, size).expect("guest RAM allocation");
        let pam = PhysMap::new(ram);
        let hart = Hart::new(config.mmu.tlb_entries);

        Self { hart, pam }
    }

    pub fn map_device(&mut self, dev: Box<dyn MmioDevice>) {
        self.pam.add_device(dev).expect("device mapping");
    }

    /// Writes bytes at a guest physical address inside RAM.
    pub fn fill_phys(&self, paddr: u64, data: &[u8]) {
        let ram = self.pam.ram();
        ram.load(paddr - ram.begin(), data);
    }

    pub fn write_phys_u32(&self, paddr: u64, val: u32) {
        self.fill_phys(paddr, &val.to_le_bytes());
    }

    pub fn write_phys_u64(&self, paddr: u64, val: u64) {
        self.fill_phys(paddr, &val.to_le_bytes());
    }

    pub fn read_phys_u32(&self, paddr: u64) -> u32 {
        let ram = self.pam.ram();
        u32::from_le_bytes(ram.read(paddr - ram.begin(), 4).try_into().unwrap())
    }

    pub fn read_phys_u64(&self, paddr: u64) -> u64 {
        let ram = self.pam.ram();
        u64::from_le_bytes(ram.read(paddr - ram.begin(), 8).try_into().unwrap())
    }

    /// Enables Sv32 translation in Supervisor mode with the given root table.
    pub fn enable_sv32(&mut self, root_paddr: u64) {
        self.enable_paging(SATP_MODE_SV32, root_paddr);
    }

    /// Enables Sv39 translation in Supervisor mode with the given root table.
    pub fn enable_sv39(&mut self, root_paddr: u64) {
        self.enable_paging(SATP_MODE_SV39, root_paddr);
    }

    pub fn enable_sv48(&mut self, root_paddr: u64) {
        self.enable_paging(SATP_MODE_SV48, root_paddr);
    }

    pub fn enable_sv57(&mut self, root_paddr: u64) {
        self.enable_paging(SATP_MODE_SV57, root_paddr);
    }

    pub fn enable_paging(&mut self, satp_mode: u64, root_paddr: u64) {
        self.hart
            .write_satp((satp_mode << SATP_MODE_SHIFT) | (root_paddr >> 12));
        self.hart.set_privilege(PrivilegeMode::Supervisor);
    }
}
