//! RISC-V Privilege Modes.
//!
//! Privilege levels as the translation core sees them:
//! 1. **Mode Classification:** User (U), Supervisor (S), and Machine (M).
//! 2. **Decoding:** conversion from the 2-bit encodings found in MPP.
//! 3. **Observability:** human-readable naming for diagnostics.

/// RISC-V privilege mode levels.
///
/// Machine mode is the highest privilege level and bypasses address
/// translation entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrivilegeMode {
    /// User mode (U-mode), the lowest privilege level.
    User = 0,

    /// Supervisor mode (S-mode), where paged translation applies.
    Supervisor = 1,

    /// Machine mode (M-mode), which always uses physical addresses.
    Machine = 3,
}

impl PrivilegeMode {
    /// Decodes a 2-bit privilege encoding.
    ///
    /// The encoding 2 is reserved; like any WARL normalization, it and any
    /// other out-of-range value decode to `Machine`.
    pub fn from_bits(val: u8) -> Self {
        match val {
            0 => PrivilegeMode::User,
            1 => PrivilegeMode::Supervisor,
            _ => PrivilegeMode::Machine,
        }
    }

    /// Returns the 2-bit encoding of the privilege mode.
    pub fn to_bits(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the privilege mode.
    pub fn name(&self) -> &'static str {
        match self {
            PrivilegeMode::User => "User",
            PrivilegeMode::Supervisor => "Supervisor",
            PrivilegeMode::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
