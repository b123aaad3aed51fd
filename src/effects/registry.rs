//! Effect registry
//!
//! Name to implementation lookup, read-mostly after startup registration.
//! Unknown names are a reportable error, never a silent no-op.

use std::collections::HashMap;
use std::sync::Arc;

use crate::effects::{Effect, ErasedEffect, Fireworks, Lightning, ShockRing, Sparkle};
use crate::error::{EngineError, EngineResult};

/// Maps effect names to their implementations
#[derive(Default)]
pub struct EffectRegistry {
    effects: HashMap<String, Arc<dyn ErasedEffect>>,
}

impl EffectRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the built-in catalog
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Fireworks);
        registry.register(Sparkle);
        registry.register(Lightning);
        registry.register(ShockRing);
        registry
    }

    /// Register an effect under its descriptor name. A second registration
    /// under the same name replaces the first.
    pub fn register<E: Effect>(&mut self, effect: E) {
        let name = effect.descriptor().name;
        log::debug!("registered effect '{}'", name);
        self.effects.insert(name.to_string(), Arc::new(effect));
    }

    /// Resolve a name to its effect
    pub fn get(&self, name: &str) -> EngineResult<Arc<dyn ErasedEffect>> {
        self.effects
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::effect_not_found(name))
    }

    /// Whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.effects.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.effects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered effects
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let registry = EffectRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["fireworks", "lightning", "shock_ring", "sparkle"]
        );
        assert!(registry.contains("fireworks"));
    }

    #[test]
    fn test_lookup_resolves_descriptor() {
        let registry = EffectRegistry::with_builtins();
        let effect = registry.get("sparkle").unwrap();
        assert_eq!(effect.descriptor().name, "sparkle");
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let registry = EffectRegistry::with_builtins();
        let err = registry.get("supernova").unwrap_err();
        match err {
            EngineError::EffectNotFound { name } => assert_eq!(name, "supernova"),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = EffectRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("fireworks").is_err());
    }
}
