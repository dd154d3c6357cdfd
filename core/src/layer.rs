//! # Layer Chain
//!
//! Layers wrap every routed call. Each layer sees the same [`Call`] and
//! decides whether to continue down the chain with [`Next::run`] or to answer
//! on its own. The end of the chain is the forward contract of the
//! [`Dispatcher`](crate::dispatch::Dispatcher); layers cannot alter the
//! arguments it receives.
//!
//! ```text
//!   caller ──▶ layer 0 ──▶ layer 1 ──▶ … ──▶ forward ──▶ driver
//! ```

use alloc::sync::Arc;

use crate::entry::EntryPoint;
use crate::handle::RawHandle;
use crate::param::{Arg, ParamSpec};
use crate::registry::HandleRegistry;
use crate::result::ZeResult;

/// Maximum number of installed layers
pub const MAX_LAYERS: usize = 8;

/// Interception layer
pub trait Layer: Send + Sync {
    /// Layer name used in diagnostics
    fn name(&self) -> &'static str;

    /// Handle a call
    ///
    /// The default continues down the chain.
    fn intercept(&self, call: &Call<'_>, next: Next<'_>) -> ZeResult {
        next.run(call)
    }
}

/// A call travelling through the chain
pub struct Call<'a> {
    entry: &'static EntryPoint,
    args: &'a [Arg],
    registry: &'a HandleRegistry,
}

impl<'a> Call<'a> {
    /// Describe a call
    pub fn new(entry: &'static EntryPoint, args: &'a [Arg], registry: &'a HandleRegistry) -> Self {
        Self {
            entry,
            args,
            registry,
        }
    }

    /// Entry point being called
    #[inline]
    pub fn entry(&self) -> &'static EntryPoint {
        self.entry
    }

    /// Argument values in declaration order
    #[inline]
    pub fn args(&self) -> &'a [Arg] {
        self.args
    }

    /// Parameters paired with their values
    pub fn params(&self) -> impl Iterator<Item = (&'static ParamSpec, Arg)> + 'a {
        self.entry.params.iter().zip(self.args.iter().copied())
    }

    /// Check that `handle` is known to the loader and not destroyed
    pub fn is_live(&self, handle: RawHandle) -> bool {
        self.registry.is_live(handle)
    }
}

impl core::fmt::Debug for Call<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Call")
            .field("entry", &self.entry.name)
            .field("args", &self.args)
            .finish()
    }
}

/// The rest of the chain
pub struct Next<'a> {
    layers: &'a [Arc<dyn Layer>],
    terminal: &'a dyn Fn() -> ZeResult,
}

impl<'a> Next<'a> {
    /// Start a chain over `layers`, ending in `terminal`
    pub fn new(layers: &'a [Arc<dyn Layer>], terminal: &'a dyn Fn() -> ZeResult) -> Self {
        Self { layers, terminal }
    }

    /// Continue with the next layer, or the terminal once layers run out
    pub fn run(self, call: &Call<'_>) -> ZeResult {
        match self.layers.split_first() {
            Some((layer, rest)) => layer.intercept(
                call,
                Next {
                    layers: rest,
                    terminal: self.terminal,
                },
            ),
            None => (self.terminal)(),
        }
    }

    /// Number of layers still ahead
    pub fn remaining(&self) -> usize {
        self.layers.len()
    }
}

impl core::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.layers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Category;
    use crate::version::ApiVersion;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;
    use spin::Mutex;

    static ENTRY: EntryPoint = EntryPoint {
        name: "zesFanGetState",
        category: Category::Sysman,
        group: "Fan",
        version: ApiVersion::V1_0,
        params: &[],
        releases: false,
    };

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Layer for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn intercept(&self, call: &Call<'_>, next: Next<'_>) -> ZeResult {
            self.log.lock().push(self.name);
            next.run(call)
        }
    }

    struct Refuse;

    impl Layer for Refuse {
        fn name(&self) -> &'static str {
            "refuse"
        }

        fn intercept(&self, _call: &Call<'_>, _next: Next<'_>) -> ZeResult {
            ZeResult::ERROR_NOT_AVAILABLE
        }
    }

    #[test]
    fn test_chain_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let layers: Vec<Arc<dyn Layer>> = vec![
            Arc::new(Recorder { name: "outer", log: log.clone() }),
            Arc::new(Recorder { name: "inner", log: log.clone() }),
        ];
        let registry = HandleRegistry::new();
        let reached = Cell::new(false);
        let terminal = || {
            reached.set(true);
            ZeResult::SUCCESS
        };

        let call = Call::new(&ENTRY, &[], &registry);
        assert_eq!(Next::new(&layers, &terminal).run(&call), ZeResult::SUCCESS);
        assert!(reached.get());
        assert_eq!(*log.lock(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_layer_can_answer() {
        let layers: Vec<Arc<dyn Layer>> = vec![Arc::new(Refuse)];
        let registry = HandleRegistry::new();
        let reached = Cell::new(false);
        let terminal = || {
            reached.set(true);
            ZeResult::SUCCESS
        };

        let call = Call::new(&ENTRY, &[], &registry);
        assert_eq!(Next::new(&layers, &terminal).run(&call), ZeResult::ERROR_NOT_AVAILABLE);
        assert!(!reached.get());
    }
}
