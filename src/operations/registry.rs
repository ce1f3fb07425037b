use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::Operation;
use super::definitions;

/// Static registry mapping every sign alias to its operation
static REGISTRY: OnceLock<FxHashMap<&'static str, &'static Operation>> = OnceLock::new();

/// Initialize the registry with all operation definitions
fn init_registry() -> FxHashMap<&'static str, &'static Operation> {
    let mut map = FxHashMap::default();

    for op in definitions::ALL {
        for sign in op.signs {
            map.insert(*sign, op);
        }
    }

    log::trace!("operation registry built with {} signs", map.len());
    map
}

/// Central registry for looking up operations by sign
pub(crate) struct Registry;

impl Registry {
    /// Get an operation by any of its signs - O(1) HashMap lookup
    pub(crate) fn get(sign: &str) -> Option<&'static Operation> {
        REGISTRY.get_or_init(init_registry).get(sign).copied()
    }

    /// All recognised signs, aliases included
    pub(crate) fn signs() -> impl Iterator<Item = &'static str> {
        REGISTRY.get_or_init(init_registry).keys().copied()
    }
}
