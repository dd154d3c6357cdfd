//! # Driver Dispatch Interface
//!
//! Declarative entry-point tables for each generated category.
//!
//! The tables are exported as callback macros so that other crates can expand
//! the same rows into their own items (driver stubs, C exports) without
//! repeating them:
//!
//! ```ignore
//! macro_rules! my_callback {
//!     (@category $Category:ident, $prefix:ident, $($rest:tt)*) => { /* ... */ };
//! }
//! zel_core::zes_ddi_table!(my_callback);
//! ```

pub mod compute;
pub mod sysman;
pub mod tools;

pub use compute::{ComputeApi, ComputeGroups};
pub use sysman::{SysmanApi, SysmanGroups};
pub use tools::{ToolsApi, ToolsGroups};

use crate::entry::{Category, EntryPoint};

/// Every generated entry point of `category`
pub fn entry_points(category: Category) -> &'static [&'static EntryPoint] {
    match category {
        Category::Compute => compute::COMPUTE_ENTRY_POINTS,
        Category::Tools => tools::TOOLS_ENTRY_POINTS,
        Category::Sysman => sysman::SYSMAN_ENTRY_POINTS,
    }
}

/// Find an entry point by its C name
pub fn find_entry(name: &str) -> Option<&'static EntryPoint> {
    Category::ALL
        .iter()
        .filter(|category| name.starts_with(category.prefix()))
        .flat_map(|category| entry_points(*category).iter().copied())
        .find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::ApiVersion;

    #[test]
    fn test_find_entry() {
        let entry = find_entry("zesDeviceEccAvailable").expect("entry");
        assert_eq!(entry.category, Category::Sysman);
        assert_eq!(entry.version, ApiVersion::V1_4);
        assert!(find_entry("zetMetricGet").is_some());
        assert_eq!(find_entry("zeInit").map(|e| e.category), Some(Category::Compute));
        assert!(find_entry("zeMemAllocDevice").is_none());
    }

    #[test]
    fn test_shorter_prefix_does_not_shadow() {
        assert_eq!(find_entry("zesDeviceReset").map(|e| e.category), Some(Category::Sysman));
        assert_eq!(find_entry("zetDebugAttach").map(|e| e.category), Some(Category::Tools));
        assert_eq!(find_entry("zeDeviceGet").map(|e| e.category), Some(Category::Compute));
    }

    #[test]
    fn test_names_are_unique() {
        for category in Category::ALL {
            let entries = entry_points(category);
            for (i, a) in entries.iter().enumerate() {
                assert!(entries[i + 1..].iter().all(|b| b.name != a.name), "{}", a.name);
            }
        }
    }
}
