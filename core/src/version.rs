//! # API Versions and the Version Gate
//!
//! Versions are encoded the way the C ABI encodes them, `major << 16 | minor`,
//! so the numeric order of the raw value is the lexicographic order of the
//! `(major, minor)` pair.
//!
//! Every entry point carries the version that introduced it. A table whose
//! negotiated version is lower than that tag must not route the call, even if
//! the owning sub-table is present: entries are appended to existing groups
//! over time.

use core::fmt;

/// API version (`ze_api_version_t`)
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// Version 1.0
    pub const V1_0: Self = Self::new(1, 0);
    /// Version 1.1
    pub const V1_1: Self = Self::new(1, 1);
    /// Version 1.2
    pub const V1_2: Self = Self::new(1, 2);
    /// Version 1.3
    pub const V1_3: Self = Self::new(1, 3);
    /// Version 1.4
    pub const V1_4: Self = Self::new(1, 4);
    /// Version 1.5
    pub const V1_5: Self = Self::new(1, 5);
    /// Version 1.6
    pub const V1_6: Self = Self::new(1, 6);
    /// Version 1.7
    pub const V1_7: Self = Self::new(1, 7);
    /// Version 1.8
    pub const V1_8: Self = Self::new(1, 8);
    /// Version 1.9
    pub const V1_9: Self = Self::new(1, 9);
    /// Version 1.10
    pub const V1_10: Self = Self::new(1, 10);
    /// Version 1.11
    pub const V1_11: Self = Self::new(1, 11);
    /// Version 1.12
    pub const V1_12: Self = Self::new(1, 12);
    /// Version 1.13
    pub const V1_13: Self = Self::new(1, 13);

    /// Latest version known to this loader
    pub const CURRENT: Self = Self::V1_13;

    /// Every released version, oldest first
    pub const KNOWN: &'static [ApiVersion] = &[
        Self::V1_0,
        Self::V1_1,
        Self::V1_2,
        Self::V1_3,
        Self::V1_4,
        Self::V1_5,
        Self::V1_6,
        Self::V1_7,
        Self::V1_8,
        Self::V1_9,
        Self::V1_10,
        Self::V1_11,
        Self::V1_12,
        Self::V1_13,
    ];

    /// Create a version from its parts
    pub const fn new(major: u16, minor: u16) -> Self {
        Self(((major as u32) << 16) | minor as u32)
    }

    /// Major component
    pub const fn major(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Minor component
    pub const fn minor(self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    /// Raw encoded value
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Create from a raw encoded value
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiVersion({}.{})", self.major(), self.minor())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

// =============================================================================
// Version Gate
// =============================================================================

/// Decide whether a table negotiated at `negotiated` may route an entry
/// point introduced at `required`
#[inline]
pub const fn supports(negotiated: ApiVersion, required: ApiVersion) -> bool {
    negotiated.0 >= required.0
}
