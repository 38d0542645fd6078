//! Per-family builder tables and the polymorphic [`build`](TypeRegistry::build).

use std::fmt;

use cap_core::{BuildError, PropertyTree, TreeError};
use indexmap::IndexMap;

use crate::family::{Family, TYPE_KEY};

/// A boxed constructor producing a family's product from configuration.
pub type Builder<F> = Box<dyn Fn(&PropertyTree) -> Result<<F as Family>::Product, BuildError>>;

/// Mapping from type name to constructor for one [`Family`].
///
/// Registration overwrites silently, which lets tests swap an
/// implementation in and out under the same name. The registry is not
/// synchronized; callers that register from several threads must
/// serialize access themselves.
///
/// # Examples
///
/// ```
/// use cap_core::{BuildError, PropertyTree};
/// use cap_factory::{Family, TypeRegistry};
///
/// struct Greeting;
/// impl Family for Greeting {
///     const NAME: &'static str = "Greeting";
///     type Product = String;
/// }
///
/// let mut registry = TypeRegistry::<Greeting>::new();
/// registry.register("Hello", |ptree: &PropertyTree| {
///     Ok(format!("hello {}", ptree.get_string("name")?))
/// });
///
/// let mut ptree = PropertyTree::new();
/// ptree.put("type", "Hello").unwrap();
/// ptree.put("name", "world").unwrap();
/// assert_eq!(registry.build(Some(&ptree)).unwrap(), "hello world");
///
/// assert!(matches!(
///     registry.build(None),
///     Err(BuildError::MissingConfiguration { family: "Greeting" })
/// ));
/// ```
pub struct TypeRegistry<F: Family> {
    builders: IndexMap<String, Builder<F>>,
}

impl<F: Family> TypeRegistry<F> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            builders: IndexMap::new(),
        }
    }

    /// Register `builder` under `type_name`.
    ///
    /// Returns `true` if an existing entry was replaced.
    pub fn register<B>(&mut self, type_name: impl Into<String>, builder: B) -> bool
    where
        B: Fn(&PropertyTree) -> Result<F::Product, BuildError> + 'static,
    {
        let type_name = type_name.into();
        let replaced = self
            .builders
            .insert(type_name.clone(), Box::new(builder))
            .is_some();
        tracing::debug!(family = F::NAME, %type_name, replaced, "registered builder");
        replaced
    }

    /// Remove the entry for `type_name`.
    ///
    /// Returns `true` if an entry existed. Subsequent builds naming this
    /// type fail with [`BuildError::UnknownType`].
    pub fn unregister(&mut self, type_name: &str) -> bool {
        let removed = self.builders.shift_remove(type_name).is_some();
        tracing::debug!(family = F::NAME, type_name, removed, "unregistered builder");
        removed
    }

    /// `true` if `type_name` is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.builders.contains_key(type_name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Build a concrete instance from `config`.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingConfiguration`] if `config` is `None`: an
    ///   abstract family is never built bare.
    /// - [`BuildError::MissingTypeKey`] if the tree has no `type` value.
    /// - [`BuildError::UnknownType`] if the name is not registered.
    /// - Whatever the concrete constructor returns.
    pub fn build(&self, config: Option<&PropertyTree>) -> Result<F::Product, BuildError> {
        let config = config.ok_or(BuildError::MissingConfiguration { family: F::NAME })?;
        let type_name = match config.get_string(TYPE_KEY) {
            Ok(name) => name,
            Err(TreeError::MissingKey { .. }) => {
                return Err(BuildError::MissingTypeKey { family: F::NAME })
            }
            Err(e) => return Err(e.into()),
        };
        let builder = self
            .builders
            .get(&type_name)
            .ok_or_else(|| BuildError::UnknownType {
                family: F::NAME,
                type_name: type_name.clone(),
            })?;
        let product = builder(config)?;
        tracing::trace!(family = F::NAME, %type_name, "built instance");
        Ok(product)
    }
}

impl<F: Family> Default for TypeRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Family> fmt::Debug for TypeRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("family", &F::NAME)
            .field("types", &self.builders.keys().collect::<Vec<_>>())
            .finish()
    }
}
