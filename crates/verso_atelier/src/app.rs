//! Component registry.

use verso_carton::{FxHashSet, String};

/// The set of registered component names.
///
/// The generator emits `r.Component_<Tag>(…)` for tags found here and plain
/// tag rendering otherwise. Populate the registry before compiling; the
/// generator only reads it, so a registry may be shared across concurrent
/// compilations once initialization is done.
#[derive(Debug, Clone)]
pub struct App {
    components: FxHashSet<String>,
}

impl App {
    /// Create a registry with the runtime built-ins `component` and `slot`
    /// pre-registered.
    pub fn new() -> Self {
        let mut components = FxHashSet::default();
        components.insert(String::from("component"));
        components.insert(String::from("slot"));
        App { components }
    }

    /// Register a component name.
    pub fn component(&mut self, name: &str) {
        self.components.insert(name.into());
    }

    /// Exact-match membership test.
    pub fn is_registered(&self, name: &str) -> bool {
        self.components.contains(name)
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}
