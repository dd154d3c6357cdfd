//! # Driver Discovery
//!
//! Names of the driver libraries the loader tries to open, in load order.
//!
//! ## Ordering
//!
//! `ZEL_DRIVERS_ORDER` moves selected drivers to the front. Each comma
//! separated token is one of:
//!
//! - `<index>`: the driver at that position in the discovered list
//! - `<type>`: every driver of that type, in discovered order
//! - `<type>:<index>`: the n-th driver of that type
//!
//! Types are `DISCRETE_GPU_ONLY`, `GPU`, `INTEGRATED_GPU_ONLY` and `NPU`;
//! `NPU` also selects drivers of no recognised type. Invalid tokens and
//! out-of-range indices are ignored, a driver selected twice keeps its first
//! position, and unselected drivers follow in discovered order.

use crate::config::LoaderConfig;

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        /// Driver libraries known on this platform
        pub const KNOWN_DRIVERS: &[&str] = &["ze_intel_gpu64.dll", "ze_intel_vpu.dll"];
    } else if #[cfg(target_os = "macos")] {
        /// Driver libraries known on this platform
        pub const KNOWN_DRIVERS: &[&str] = &[];
    } else {
        /// Driver libraries known on this platform
        pub const KNOWN_DRIVERS: &[&str] = &["libze_intel_gpu.so.1", "libze_intel_vpu.so.1"];
    }
}

/// Kind of device a driver serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverType {
    /// Discrete GPUs only
    DiscreteGpu,
    /// GPUs of any kind
    Gpu,
    /// Integrated GPUs only
    IntegratedGpu,
    /// Neural processing units
    Npu,
    /// Anything else
    Other,
}

impl DriverType {
    /// Parse an ordering type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DISCRETE_GPU_ONLY" => Some(Self::DiscreteGpu),
            "GPU" => Some(Self::Gpu),
            "INTEGRATED_GPU_ONLY" => Some(Self::IntegratedGpu),
            "NPU" => Some(Self::Npu),
            _ => None,
        }
    }

    /// Guess the type from a library name
    pub fn classify(library: &str) -> Self {
        let name = library.to_ascii_lowercase();
        if name.contains("dgpu") || name.contains("discrete") {
            Self::DiscreteGpu
        } else if name.contains("igpu") || name.contains("integrated") {
            Self::IntegratedGpu
        } else if name.contains("npu") || name.contains("vpu") {
            Self::Npu
        } else if name.contains("gpu") {
            Self::Gpu
        } else {
            Self::Other
        }
    }

    /// Check if a driver of type `kind` is selected by this filter
    fn selects(self, kind: DriverType) -> bool {
        match self {
            Self::Npu => matches!(kind, Self::Npu | Self::Other),
            _ => self == kind,
        }
    }
}

/// One `ZEL_DRIVERS_ORDER` token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverOrder {
    /// Position in the discovered list
    Index(usize),
    /// Every driver of a type
    Type(DriverType),
    /// Position among the drivers of a type
    TypeIndex(DriverType, usize),
}

impl DriverOrder {
    /// Parse one trimmed token
    pub fn parse(token: &str) -> Option<Self> {
        if let Some((kind, index)) = token.split_once(':') {
            let kind = DriverType::from_name(kind.trim())?;
            let index = index.trim().parse().ok()?;
            return Some(Self::TypeIndex(kind, index));
        }
        match token.parse() {
            Ok(index) => Some(Self::Index(index)),
            Err(_) => DriverType::from_name(token).map(Self::Type),
        }
    }
}

/// Parse a list of order tokens, skipping invalid ones
pub fn parse_order(tokens: &[String]) -> Vec<DriverOrder> {
    tokens
        .iter()
        .filter_map(|token| {
            let order = DriverOrder::parse(token.trim());
            if order.is_none() {
                log::warn!("ignoring driver order token {:?}", token);
            }
            order
        })
        .collect()
}

/// Move the drivers selected by `order` to the front
pub fn order_drivers<T>(items: Vec<T>, kind: impl Fn(&T) -> DriverType, order: &[DriverOrder]) -> Vec<T> {
    if order.is_empty() {
        return items;
    }

    let kinds: Vec<DriverType> = items.iter().map(&kind).collect();
    let of_type = |filter: DriverType| {
        kinds
            .iter()
            .enumerate()
            .filter(move |(_, kind)| filter.selects(**kind))
            .map(|(index, _)| index)
    };

    let mut picked: Vec<usize> = Vec::with_capacity(items.len());
    let mut pick = |index: usize| {
        if index < kinds.len() && !picked.contains(&index) {
            picked.push(index);
        }
    };
    for spec in order {
        match *spec {
            DriverOrder::Index(index) => pick(index),
            DriverOrder::Type(filter) => of_type(filter).for_each(&mut pick),
            DriverOrder::TypeIndex(filter, nth) => {
                if let Some(index) = of_type(filter).nth(nth) {
                    pick(index);
                }
            },
        }
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut ordered: Vec<T> = picked.iter().filter_map(|&index| slots[index].take()).collect();
    ordered.extend(slots.into_iter().flatten());
    ordered
}

/// Libraries to try
///
/// `ZE_ENABLE_ALT_DRIVERS` replaces the known list rather than extending it.
/// `ZEL_DRIVERS_ORDER` is applied last.
pub fn driver_names(config: &LoaderConfig) -> Vec<String> {
    let names = if config.alt_drivers.is_empty() {
        KNOWN_DRIVERS.iter().map(|name| name.to_string()).collect()
    } else {
        config.alt_drivers.clone()
    };
    let order = parse_order(&config.driver_order);
    order_drivers(names, |name| DriverType::classify(name), &order)
}
