//! Name-to-factory registry used to resolve rules like `minLength: [6, "msg"]`.

use std::fmt;
use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::builtin;
use crate::{Args, ArgsError, CheckFn, RegistryError};

/// Rule keys with structural meaning; never valid check names.
pub const RESERVED_KEYS: [&str; 3] = ["validators", "children", "fail"];

/// Whether `name` is a structural rule key.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Builds a check from its arguments.
pub type CheckFactory = Arc<dyn Fn(&Args) -> Result<CheckFn, ArgsError> + Send + Sync>;

static GLOBAL: LazyLock<Arc<CheckRegistry>> = LazyLock::new(|| Arc::new(CheckRegistry::with_builtins()));

/// Thread-safe registry of check factories.
///
/// The process-wide instance returned by [`global`](Self::global) starts with
/// every built-in check; names added to it are visible to every validator
/// that does not carry its own registry. Uses `DashMap` so registration and
/// lookup never block each other for long.
///
/// # Examples
///
/// ```rust,ignore
/// use vigil_check::{CheckRegistry, ErrorDescriptor, check_fn};
///
/// let registry = CheckRegistry::with_builtins();
/// registry.register("even", |args| {
///     let message = args.message(0);
///     Ok(check_fn(move |value, _| {
///         let even = value.as_i64().is_some_and(|n| n % 2 == 0);
///         (!even).then(|| ErrorDescriptor::single("even", message.clone()))
///     }))
/// })?;
/// ```
pub struct CheckRegistry {
    factories: DashMap<String, CheckFactory>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: DashMap::new(),
        }
    }

    /// Creates a registry holding every built-in check.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for (name, factory) in builtin::entries() {
            registry.factories.insert(name.to_owned(), factory);
        }
        registry
    }

    /// The process-wide registry.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Registers a factory under a new name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Reserved`] for structural keys and
    /// [`RegistryError::Duplicate`] if the name is taken.
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(&Args) -> Result<CheckFn, ArgsError> + Send + Sync + 'static,
    {
        let name = name.into();
        if is_reserved(&name) {
            return Err(RegistryError::Reserved { name });
        }
        match self.factories.entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::Duplicate {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                tracing::info!(check = %entry.key(), "registered check");
                entry.insert(Arc::new(factory));
                Ok(())
            }
        }
    }

    /// Registers a factory, replacing any existing one with the same name.
    /// Returns the replaced factory.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Reserved`] for structural keys.
    pub fn register_or_replace<F>(
        &self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<Option<CheckFactory>, RegistryError>
    where
        F: Fn(&Args) -> Result<CheckFn, ArgsError> + Send + Sync + 'static,
    {
        let name = name.into();
        if is_reserved(&name) {
            return Err(RegistryError::Reserved { name });
        }
        tracing::info!(check = %name, "registered check (replacing)");
        Ok(self.factories.insert(name, Arc::new(factory)))
    }

    /// Factory registered under `name`.
    pub fn factory(&self, name: &str) -> Option<CheckFactory> {
        self.factories.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Builds the check registered under `name`.
    ///
    /// The factory runs after the map guard is released, so factories may
    /// consult the registry themselves.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownCheck`] or [`RegistryError::InvalidArguments`].
    pub fn create(&self, name: &str, args: &Args) -> Result<CheckFn, RegistryError> {
        let factory = self.factory(name).ok_or_else(|| RegistryError::UnknownCheck {
            name: name.to_owned(),
        })?;
        factory(args).map_err(|source| RegistryError::InvalidArguments {
            name: name.to_owned(),
            source,
        })
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Removes a factory. Returns it, if any.
    pub fn remove(&self, name: &str) -> Option<CheckFactory> {
        self.factories.remove(name).map(|(_, factory)| factory)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Check, ErrorDescriptor, args, check_fn};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn one_of(args: &Args) -> Result<CheckFn, ArgsError> {
        let allowed = args
            .value(0)?
            .as_array()
            .cloned()
            .ok_or(ArgsError::Expected {
                index: 0,
                expected: "an array",
            })?;
        let message = args.message(1);
        Ok(check_fn(move |value, _| {
            (!allowed.contains(value)).then(|| ErrorDescriptor::single("enum", message.clone()))
        }))
    }

    #[test]
    fn builtins_are_registered() {
        let registry = CheckRegistry::with_builtins();
        for name in ["required", "minLength", "and", "phone", "ipv6"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert_eq!(registry.len(), 25);
        assert!(CheckRegistry::new().is_empty());
    }

    #[tokio::test]
    async fn custom_check_by_name() {
        let registry = CheckRegistry::new();
        registry.register("enum", one_of).unwrap();

        let check = registry
            .create("enum", &Args::from(json!([["a", "b", "c"], "error."])))
            .unwrap();
        assert!(check.check(&json!("a"), &Value::Null).await.unwrap().is_none());

        let outcome = check.check(&json!("d"), &Value::Null).await.unwrap().unwrap();
        assert_eq!(outcome.get("enum"), Some(&json!("error.")));
    }

    #[test]
    fn duplicates_are_rejected() {
        let registry = CheckRegistry::with_builtins();
        let err = registry.register("required", one_of).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                name: "required".into()
            }
        );

        let replaced = registry.register_or_replace("required", one_of).unwrap();
        assert!(replaced.is_some());
    }

    #[test]
    fn reserved_names_are_rejected() {
        let registry = CheckRegistry::new();
        for name in RESERVED_KEYS {
            assert_eq!(
                registry.register(name, one_of).unwrap_err(),
                RegistryError::Reserved { name: name.into() }
            );
        }
        assert!(registry.register_or_replace("fail", one_of).is_err());
    }

    #[test]
    fn create_reports_unknown_and_bad_arguments() {
        let registry = CheckRegistry::with_builtins();
        assert_eq!(
            registry.create("nope", &Args::new()).err(),
            Some(RegistryError::UnknownCheck {
                name: "nope".into()
            })
        );
        assert_eq!(
            registry.create("minLength", &args!["six"]).err(),
            Some(RegistryError::InvalidArguments {
                name: "minLength".into(),
                source: ArgsError::Expected {
                    index: 0,
                    expected: "a number",
                },
            })
        );
        assert!(registry.create("and", &args![1, "m"]).is_err());
    }

    #[test]
    fn remove_and_names() {
        let registry = CheckRegistry::new();
        registry.register("b", one_of).unwrap();
        registry.register("a", one_of).unwrap();
        assert_eq!(registry.names(), vec!["a", "b"]);

        assert!(registry.remove("a").is_some());
        assert!(!registry.contains("a"));
    }

    #[test]
    fn global_is_shared() {
        let first = CheckRegistry::global();
        let second = CheckRegistry::global();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.contains("email"));
    }
}
