//! Variant registry for script lookup.
//!
//! The `VariantRegistry` maps stable variant ids ("canfield",
//! "forty-thieves", ...) to factories that build a fresh script.

use anyhow::{anyhow, Result};
use rustc_hash::FxHashMap;

use crate::rules::script::VariantScript;

use super::canfield::{Canfield, CanfieldParams};
use super::forty_thieves::{FortyThieves, FortyThievesParams};

/// Builds a fresh script for one game.
pub type VariantFactory = fn() -> Box<dyn VariantScript>;

/// Registry of variant factories.
///
/// ## Example
///
/// ```
/// use patience::variants::VariantRegistry;
///
/// let registry = VariantRegistry::standard();
/// assert!(registry.contains("storehouse"));
///
/// let script = registry.create("forty-thieves").unwrap();
/// assert_eq!(script.info().window_shape, "landscape");
///
/// assert!(registry.create("spider").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VariantRegistry {
    factories: FxHashMap<String, VariantFactory>,
}

impl VariantRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in variant.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register("canfield", || Box::new(Canfield::new(CanfieldParams::canfield())));
        registry.register("canfield-draw-one", || {
            Box::new(Canfield::new(CanfieldParams::draw_one()))
        });
        registry.register("storehouse", || {
            Box::new(Canfield::new(CanfieldParams::storehouse()))
        });
        registry.register("rainbow", || Box::new(Canfield::new(CanfieldParams::rainbow())));

        registry.register("forty-thieves", || {
            Box::new(FortyThieves::new(FortyThievesParams::forty_thieves()))
        });
        registry.register("lucas", || Box::new(FortyThieves::new(FortyThievesParams::lucas())));
        registry.register("limited", || {
            Box::new(FortyThieves::new(FortyThievesParams::limited()))
        });
        registry.register("forty-and-eight", || {
            Box::new(FortyThieves::new(FortyThievesParams::forty_and_eight()))
        });
        registry.register("red-and-black", || {
            Box::new(FortyThieves::new(FortyThievesParams::red_and_black()))
        });
        registry.register("number-ten", || {
            Box::new(FortyThieves::new(FortyThievesParams::number_ten()))
        });
        registry.register("rank-and-file", || {
            Box::new(FortyThieves::new(FortyThievesParams::rank_and_file()))
        });
        registry.register("indian", || Box::new(FortyThieves::new(FortyThievesParams::indian())));
        registry.register("maria", || Box::new(FortyThieves::new(FortyThievesParams::maria())));
        registry.register("sixty-thieves", || {
            Box::new(FortyThieves::new(FortyThievesParams::sixty_thieves()))
        });

        registry
    }

    /// Register a variant factory.
    ///
    /// Panics if the id is already registered.
    pub fn register(&mut self, id: impl Into<String>, factory: VariantFactory) {
        let id = id.into();
        if self.factories.contains_key(&id) {
            panic!("Variant {id:?} already registered");
        }
        self.factories.insert(id, factory);
    }

    /// Build a fresh script for `id`.
    pub fn create(&self, id: &str) -> Result<Box<dyn VariantScript>> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| anyhow!("Unknown variant '{id}'"))?;
        Ok(factory())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
