//! Rule declarations read from configuration data.

use serde_json::{Map, Value};
use vigil_check::Args;
use vigil_check::value::type_name;

use crate::error::RuleError;
use crate::rule::{RuleConfig, RuleDeclaration, RuleShape};

impl RuleDeclaration {
    /// Builds a declaration from JSON.
    ///
    /// Each field maps to `null` or `false` (not validated) or to an object
    /// whose keys name registry checks and whose values are their arguments.
    /// `validators` / `children` hold a nested declaration; `fail` is ignored
    /// since hooks cannot be expressed as data.
    ///
    /// ```rust,ignore
    /// let rules = RuleDeclaration::from_json(&json!({
    ///     "name": {"required": "name is required", "minLength": [6, "too short"]},
    ///     "address": {"object": "must be an object", "children": {"zip": {"required": "zip required"}}},
    ///     "nickname": null,
    /// }))?;
    /// ```
    ///
    /// Check names are not looked up here; an unknown name is reported when
    /// the field is resolved by a [`Validator`](crate::Validator).
    ///
    /// # Errors
    ///
    /// [`RuleError`] if the JSON does not have the shape above.
    pub fn from_json(value: &Value) -> Result<Self, RuleError> {
        match value {
            Value::Object(fields) => declaration(fields, None),
            other => Err(RuleError::NotAnObject {
                found: type_name(other),
            }),
        }
    }
}

fn declaration(fields: &Map<String, Value>, parent: Option<&str>) -> Result<RuleDeclaration, RuleError> {
    let mut rules = RuleDeclaration::new();
    for (field, rule) in fields {
        let path = parent.map_or_else(|| field.clone(), |parent| format!("{parent}.{field}"));
        let shape = match rule {
            Value::Null | Value::Bool(false) => RuleShape::Skip,
            Value::Object(entries) => RuleShape::Config(config(entries, &path)?),
            other => {
                return Err(RuleError::InvalidShape {
                    field: path,
                    found: type_name(other),
                });
            }
        };
        rules.insert(field.clone(), shape);
    }
    Ok(rules)
}

fn config(entries: &Map<String, Value>, path: &str) -> Result<RuleConfig, RuleError> {
    let mut config = RuleConfig::new();
    for (key, args) in entries {
        match (key.as_str(), args) {
            ("validators" | "children", Value::Null) | ("fail", _) => {}
            ("validators" | "children", Value::Object(children)) => {
                config = config.children(declaration(children, Some(path))?);
            }
            ("validators" | "children", other) => {
                return Err(RuleError::InvalidChildren {
                    field: path.to_owned(),
                    key: key.clone(),
                    found: type_name(other),
                });
            }
            (name, args) => config = config.check(name, Args::from(args.clone())),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Children;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builds_configs_in_order() {
        let rules = RuleDeclaration::from_json(&json!({
            "name": {"required": "r", "minLength": [6, "m"]},
            "nickname": null,
            "legacy": false,
        }))
        .unwrap();

        let Some(RuleShape::Config(name)) = rules.get("name") else {
            panic!("expected a config rule");
        };
        let checks: Vec<_> = name
            .named_checks()
            .iter()
            .map(|(check, args)| (check.as_str(), args.len()))
            .collect();
        assert_eq!(checks, vec![("required", 1), ("minLength", 2)]);
        assert!(rules.get("nickname").unwrap().is_skip());
        assert!(rules.get("legacy").unwrap().is_skip());
    }

    #[test]
    fn nested_children() {
        let rules = RuleDeclaration::from_json(&json!({
            "address": {
                "object": "o",
                "fail": "ignored",
                "validators": {"zip": {"required": "z"}}
            }
        }))
        .unwrap();

        let Some(RuleShape::Config(address)) = rules.get("address") else {
            panic!("expected a config rule");
        };
        assert_eq!(address.named_checks().len(), 1);
        let Some(Children::Rules(children)) = address.children_ref() else {
            panic!("expected nested rules");
        };
        assert!(children.contains("zip"));
    }

    #[test]
    fn shape_errors_carry_paths() {
        assert_eq!(
            RuleDeclaration::from_json(&json!([1])).unwrap_err(),
            RuleError::NotAnObject { found: "array" }
        );
        assert_eq!(
            RuleDeclaration::from_json(&json!({"name": "required"})).unwrap_err(),
            RuleError::InvalidShape {
                field: "name".into(),
                found: "string"
            }
        );
        assert_eq!(
            RuleDeclaration::from_json(&json!({"a": {"children": {"b": {"children": [1]}}}}))
                .unwrap_err(),
            RuleError::InvalidChildren {
                field: "a.b".into(),
                key: "children".into(),
                found: "array"
            }
        );
    }
}
