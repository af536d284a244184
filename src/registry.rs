//! Framework registry: map framework identifiers to renderers
//!
//! Identifier lookup goes through [`Framework`]'s `FromStr`, so accepted
//! spellings are defined in one place. An unknown identifier is always an
//! error; there is no fallback framework.

use crate::error::{Error, Result};
use crate::framework::Framework;
use crate::render::{JUnitRenderer, JestRenderer, PytestRenderer, Renderer, UnittestRenderer};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Renderers keyed by framework
pub struct Registry {
    renderers: BTreeMap<Framework, Box<dyn Renderer>>,
}

impl Registry {
    /// Registry without any renderer
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Registry holding the four built-in renderers
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(PytestRenderer));
        registry.register(Box::new(UnittestRenderer));
        registry.register(Box::new(JestRenderer));
        registry.register(Box::new(JUnitRenderer));
        registry
    }

    /// Bind a renderer to its framework, replacing any previous binding
    pub fn register(&mut self, renderer: Box<dyn Renderer>) -> &mut Self {
        self.renderers.insert(renderer.framework(), renderer);
        self
    }

    /// Renderer for a framework identifier (case-insensitive)
    pub fn resolve(&self, id: &str) -> Result<&dyn Renderer> {
        let framework: Framework = id.parse()?;
        self.get(framework)
            .ok_or_else(|| Error::UnknownFramework(id.to_string()))
    }

    pub fn get(&self, framework: Framework) -> Option<&dyn Renderer> {
        self.renderers.get(&framework).map(|r| r.as_ref())
    }

    /// Registered frameworks in canonical order
    pub fn frameworks(&self) -> Vec<Framework> {
        self.renderers.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("frameworks", &self.frameworks())
            .finish()
    }
}

/// Process-wide registry of built-in renderers
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::builtin)
}

/// Resolve an identifier against the built-in registry
pub fn resolve(id: &str) -> Result<&'static dyn Renderer> {
    registry().resolve(id)
}
