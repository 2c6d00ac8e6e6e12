//! Validators built from JSON rule declarations.

use pretty_assertions::assert_eq;
use serde_json::json;
use vigil_validator::prelude::*;

#[tokio::test]
async fn json_declaration_end_to_end() {
    let rules = RuleDeclaration::from_json(&json!({
        "name": {"required": "name is required", "minLength": [6, "at least 6"]},
        "age": {"int": "age must be an integer", "min": [18, "adults only"]},
        "address": {
            "object": "address must be an object",
            "children": {"zip": {"required": "zip is required", "len": [6, "6 digits"]}}
        },
        "nickname": null
    }))
    .unwrap();
    let validator = Validator::new(rules).with_options(ValidatorOptions::new().check_all(true));
    validator.resolve_all().unwrap();

    assert!(
        validator
            .check(json!({"name": "ajanuw", "age": 30, "address": {"zip": "100000"}}))
            .await
            .unwrap()
    );

    let result = validator
        .validate(json!({"name": "aja", "age": 17.5, "address": {"zip": "1"}, "nickname": 1}))
        .await
        .unwrap();
    let errors = result.errors();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "age", "address"]);
    assert_eq!(
        errors.get("age").unwrap().errors.keys().collect::<Vec<_>>(),
        vec!["int", "min"]
    );
    assert_eq!(result.get_error("len", "address/zip"), Some(&json!("6 digits")));
    assert_eq!(result.first_error(), Some(&json!("at least 6")));
}

#[tokio::test]
async fn error_tree_serializes_for_clients() {
    let rules = RuleDeclaration::from_json(&json!({"name": {"required": "name is required"}})).unwrap();
    let result = Validator::new(rules).validate(json!({"name": ""})).await.unwrap();

    assert_eq!(
        serde_json::to_value(result.errors()).unwrap(),
        json!({"name": {"value": "", "data": {"name": ""}, "errors": {"required": "name is required"}}})
    );
}

#[tokio::test]
async fn unknown_names_surface_at_resolution() {
    let rules = RuleDeclaration::from_json(&json!({"name": {"requried": "typo"}})).unwrap();
    let validator = Validator::new(rules);

    let err = validator.resolve_all().unwrap_err();
    assert_eq!(err.to_string(), "field `name`: unknown check `requried`");
}

#[tokio::test]
async fn malformed_arguments_surface_at_resolution() {
    let rules = RuleDeclaration::from_json(&json!({"pwd": {"minLength": ["eight", "m"]}})).unwrap();
    let err = Validator::new(rules).validate(json!({"pwd": "x"})).await.unwrap_err();
    assert!(matches!(err, ValidateError::InvalidArguments { ref name, .. } if name == "minLength"));
}

#[test]
fn options_from_config() {
    let options: ValidatorOptions =
        serde_json::from_value(json!({"check_all": true, "ignore": false})).unwrap();
    let validator = Validator::new(RuleDeclaration::new()).with_options(options);
    assert!(validator.options().check_all);
    assert!(!validator.options().ignore);
    assert_eq!(validator.options().max_depth, 32);
}
