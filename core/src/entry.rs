//! # Entry Points
//!
//! Static metadata for every generated entry point: its C name, the category
//! and feature group that own it, the version that introduced it, and the
//! shape of its parameters.

use core::fmt;

use crate::param::ParamSpec;
use crate::version::ApiVersion;

/// API category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Compute (`ze`)
    Compute,
    /// Tools (`zet`)
    Tools,
    /// System management (`zes`)
    Sysman,
}

impl Category {
    /// Every generated category
    pub const ALL: [Category; 3] = [Category::Compute, Category::Tools, Category::Sysman];

    /// C symbol prefix
    pub const fn prefix(self) -> &'static str {
        match self {
            Category::Compute => "ze",
            Category::Tools => "zet",
            Category::Sysman => "zes",
        }
    }

    /// Human readable name
    pub const fn name(self) -> &'static str {
        match self {
            Category::Compute => "compute",
            Category::Tools => "tools",
            Category::Sysman => "sysman",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry point descriptor
#[derive(Debug)]
pub struct EntryPoint {
    /// C name, e.g. `zesDeviceGetProperties`
    pub name: &'static str,
    /// Owning category
    pub category: Category,
    /// Owning feature group
    pub group: &'static str,
    /// Version that introduced the entry point
    pub version: ApiVersion,
    /// Parameters in declaration order
    pub params: &'static [ParamSpec],
    /// Destroys the object named by its first handle
    pub releases: bool,
}

impl EntryPoint {
    /// Position of the count parameter describing the array at `index`
    ///
    /// Counts always immediately precede the array they size.
    pub fn count_for(&self, index: usize) -> Option<usize> {
        let prev = index.checked_sub(1)?;
        self.params.get(prev).filter(|p| p.count).map(|_| prev)
    }

    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: &[ParamSpec] = &[
        ParamSpec { name: "hDevice", optional: false, count: false, input: false, handle: Some(Category::Sysman) },
        ParamSpec { name: "pCount", optional: false, count: true, input: false, handle: None },
        ParamSpec { name: "phFan", optional: true, count: false, input: false, handle: None },
    ];

    const ENUM_FANS: EntryPoint = EntryPoint {
        name: "zesDeviceEnumFans",
        category: Category::Sysman,
        group: "Device",
        version: ApiVersion::V1_0,
        params: PARAMS,
        releases: false,
    };

    #[test]
    fn test_count_lookup() {
        assert_eq!(ENUM_FANS.count_for(2), Some(1));
        assert_eq!(ENUM_FANS.count_for(1), None);
        assert_eq!(ENUM_FANS.count_for(0), None);
    }

    #[test]
    fn test_param_lookup() {
        assert!(ENUM_FANS.param("phFan").is_some_and(|p| p.optional));
        assert!(ENUM_FANS.param("missing").is_none());
    }

    #[test]
    fn test_category_prefixes() {
        assert_eq!(Category::Sysman.prefix(), "zes");
        assert_eq!(Category::Tools.prefix(), "zet");
        assert_eq!(Category::Compute.prefix(), "ze");
    }

    #[test]
    fn test_handle_params_carry_their_category() {
        assert_eq!(ENUM_FANS.params[0].handle, Some(Category::Sysman));
        assert!(ENUM_FANS.params[1..].iter().all(|p| p.handle.is_none()));
    }
}
