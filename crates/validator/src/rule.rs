//! Rule declarations: what to check on which field.
//!
//! A [`RuleDeclaration`] maps field names to a [`RuleShape`]. Shapes come in
//! four forms, from most to least direct:
//!
//! ```rust,ignore
//! let rules = RuleDeclaration::new()
//!     .field("name", required("name is required"))                  // single check
//!     .field("pwd", vec![required(()), min_length(6, "too short")])  // list of checks
//!     .field("age", RuleConfig::new().check("min", args![18, "adults only"]))
//!     .skip("nickname");                                             // not validated
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Iter;
use vigil_check::{Args, CheckFn};

use crate::options::FieldFailHook;
use crate::tree::FieldError;
use crate::validator::Validator;

// ============================================================================
// RULE SHAPE
// ============================================================================

/// Declared form of one field's rule.
#[derive(Clone, Default)]
pub enum RuleShape {
    /// The field is not validated and may be absent.
    #[default]
    Skip,
    /// One check.
    Single(CheckFn),
    /// Independent checks, run in order. An empty list always passes.
    List(Vec<CheckFn>),
    /// Checks named through the registry, nested rules and a field hook.
    Config(RuleConfig),
}

impl RuleShape {
    /// Shape that validates an object field against a nested declaration.
    pub fn nested(rules: impl Into<RuleDeclaration>) -> Self {
        Self::Config(RuleConfig::new().children(rules))
    }

    /// Whether the field is exempt from validation.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

impl fmt::Debug for RuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("Skip"),
            Self::Single(_) => f.write_str("Single(..)"),
            Self::List(checks) => write!(f, "List({} checks)", checks.len()),
            Self::Config(config) => f.debug_tuple("Config").field(config).finish(),
        }
    }
}

impl From<CheckFn> for RuleShape {
    fn from(check: CheckFn) -> Self {
        Self::Single(check)
    }
}

impl From<Vec<CheckFn>> for RuleShape {
    fn from(checks: Vec<CheckFn>) -> Self {
        Self::List(checks)
    }
}

impl From<RuleConfig> for RuleShape {
    fn from(config: RuleConfig) -> Self {
        Self::Config(config)
    }
}

impl From<Validator> for RuleShape {
    fn from(validator: Validator) -> Self {
        Self::Config(RuleConfig::new().sub_validator(validator))
    }
}

impl From<Arc<Validator>> for RuleShape {
    fn from(validator: Arc<Validator>) -> Self {
        Self::Config(RuleConfig::new().sub_validator(validator))
    }
}

impl From<()> for RuleShape {
    fn from((): ()) -> Self {
        Self::Skip
    }
}

// ============================================================================
// RULE CONFIG
// ============================================================================

/// Sub-rules of a [`RuleConfig`].
#[derive(Clone)]
pub enum Children {
    /// Extra checks on the field itself, run after the named checks.
    Checks(Vec<CheckFn>),
    /// A declaration for the fields of an object value.
    Rules(Arc<RuleDeclaration>),
    /// An already configured validator for the fields of an object value.
    /// It keeps its own options and registry.
    Validator(Arc<Validator>),
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checks(checks) => write!(f, "Checks({} checks)", checks.len()),
            Self::Rules(rules) => f.debug_tuple("Rules").field(rules).finish(),
            Self::Validator(validator) => f.debug_tuple("Validator").field(validator).finish(),
        }
    }
}

/// Configuration form of a field rule.
///
/// Named checks are built through the validator's
/// [`CheckRegistry`](vigil_check::CheckRegistry) when the field is first
/// validated, in the order they were added.
#[derive(Clone, Default)]
pub struct RuleConfig {
    checks: Vec<(String, Args)>,
    children: Option<Children>,
    fail: Option<FieldFailHook>,
}

impl RuleConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a registry check by name.
    ///
    /// `args` follows the factory's convention, e.g. `args![6, "too short"]`
    /// for `minLength`, or a single message for `required`.
    #[must_use = "builder methods must be chained or built"]
    pub fn check(mut self, name: impl Into<String>, args: impl Into<Args>) -> Self {
        self.checks.push((name.into(), args.into()));
        self
    }

    /// Extra checks on the field, run after the named checks. Replaces any
    /// previous children.
    #[must_use = "builder methods must be chained or built"]
    pub fn validators(mut self, checks: Vec<CheckFn>) -> Self {
        self.children = Some(Children::Checks(checks));
        self
    }

    /// Nested declaration applied to an object value. Replaces any previous
    /// children.
    #[must_use = "builder methods must be chained or built"]
    pub fn children(mut self, rules: impl Into<RuleDeclaration>) -> Self {
        self.children = Some(Children::Rules(Arc::new(rules.into())));
        self
    }

    /// Prebuilt validator applied to an object value. Replaces any previous
    /// children.
    ///
    /// Unlike [`children`](Self::children), the validator keeps its own
    /// `check_all`, `ignore`, `max_depth` and registry; its session hook is
    /// not called for nested failures.
    #[must_use = "builder methods must be chained or built"]
    pub fn sub_validator(mut self, validator: impl Into<Arc<Validator>>) -> Self {
        self.children = Some(Children::Validator(validator.into()));
        self
    }

    /// Hook called with the field's entry when it fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_fail<F>(mut self, hook: F) -> Self
    where
        F: Fn(&FieldError) + Send + Sync + 'static,
    {
        self.fail = Some(Arc::new(hook));
        self
    }

    /// Named checks in declaration order.
    pub fn named_checks(&self) -> &[(String, Args)] {
        &self.checks
    }

    /// Declared children.
    pub fn children_ref(&self) -> Option<&Children> {
        self.children.as_ref()
    }

    /// Field failure hook.
    pub fn fail_hook(&self) -> Option<&FieldFailHook> {
        self.fail.as_ref()
    }
}

impl fmt::Debug for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleConfig")
            .field("checks", &self.checks)
            .field("children", &self.children)
            .field("fail", &self.fail.is_some())
            .finish()
    }
}

// ============================================================================
// RULE DECLARATION
// ============================================================================

/// Ordered mapping from field name to rule. Fields are validated in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleDeclaration(IndexMap<String, RuleShape>);

impl RuleDeclaration {
    /// Creates an empty declaration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, shape: impl Into<RuleShape>) -> Self {
        self.0.insert(name.into(), shape.into());
        self
    }

    /// Declares a field that is not validated.
    #[must_use = "builder methods must be chained or built"]
    pub fn skip(self, name: impl Into<String>) -> Self {
        self.field(name, RuleShape::Skip)
    }

    /// Declares or redeclares a field, returning the previous rule.
    pub fn insert(&mut self, name: impl Into<String>, shape: impl Into<RuleShape>) -> Option<RuleShape> {
        self.0.insert(name.into(), shape.into())
    }

    /// Rule of a field.
    pub fn get(&self, name: &str) -> Option<&RuleShape> {
        self.0.get(name)
    }

    /// Whether a field is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> Iter<'_, String, RuleShape> {
        self.0.iter()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, S: Into<RuleShape>> FromIterator<(K, S)> for RuleDeclaration {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, shape)| (name.into(), shape.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a RuleDeclaration {
    type Item = (&'a String, &'a RuleShape);
    type IntoIter = Iter<'a, String, RuleShape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
