//! End-to-end scenarios: sign-up forms, combinators, custom checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vigil_validator::prelude::*;

fn check_name() -> CheckFn {
    async_check_fn(|name: Value, _data: Value| async move {
        Ok((name != "ajanuw").then(|| ErrorDescriptor::single("checkName", "name error.")))
    })
}

fn confirm_password() -> CheckFn {
    check_fn(|input, data| {
        (input != &data["pwd"]).then(|| ErrorDescriptor::single("checkPwd", "passwords differ"))
    })
}

fn sign_up(field_failures: Arc<AtomicUsize>, session_failures: Arc<AtomicUsize>) -> Validator {
    Validator::new(
        RuleDeclaration::new()
            .field(
                "name",
                RuleConfig::new()
                    .check("required", "name is required")
                    .validators(vec![min_length(6, "at least 6 characters"), check_name()])
                    .on_fail(move |entry| {
                        assert_eq!(entry.errors.get("minLength"), Some(&json!("at least 6 characters")));
                        assert!(entry.errors.contains("checkName"));
                        field_failures.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .field(
                "pwd",
                RuleConfig::new()
                    .check("required", "password is required")
                    .check("minLength", args![8, "at least 8 characters"]),
            )
            .field(
                "pwd2",
                RuleConfig::new()
                    .check("required", "confirm the password")
                    .validators(vec![confirm_password()]),
            ),
    )
    .with_options(
        ValidatorOptions::new()
            .check_all(true)
            .ignore(false)
            .on_fail(move |errors| {
                assert!(errors.contains("name"));
                assert!(errors.error("required", "pwd2").is_some());
                assert!(errors.error("checkPwd", "pwd2").is_some());
                session_failures.fetch_add(1, Ordering::SeqCst);
            }),
    )
}

#[tokio::test]
async fn sign_up_form() {
    let field_failures = Arc::new(AtomicUsize::new(0));
    let session_failures = Arc::new(AtomicUsize::new(0));
    let validator = sign_up(Arc::clone(&field_failures), Arc::clone(&session_failures));

    let ok = validator
        .validate(json!({"name": "ajanuw", "pwd": "12345678", "pwd2": "12345678"}))
        .await
        .unwrap();
    assert!(ok.is_valid());
    assert_eq!(session_failures.load(Ordering::SeqCst), 0);

    let bad = validator
        .validate(json!({"name": "aja", "pwd": "12345678", "pwd2": ""}))
        .await
        .unwrap();
    assert!(bad.is_invalid());
    assert_eq!(bad.errors().fields().collect::<Vec<_>>(), vec!["name", "pwd2"]);
    assert_eq!(field_failures.load(Ordering::SeqCst), 1);
    assert_eq!(session_failures.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn check_all_collects_only_failed_checks() {
    let validator = Validator::new(
        RuleDeclaration::new()
            .field(
                "name",
                RuleConfig::new().check("required", "r").check("minLength", args![6, "m"]),
            )
            .field("pwd", RuleConfig::new().check("required", "r2")),
    )
    .with_options(ValidatorOptions::new().check_all(true));

    let result = validator.validate(json!({"name": "ab", "pwd": "x"})).await.unwrap();
    let errors = result.errors();
    assert_eq!(errors.len(), 1);
    let name = errors.get("name").unwrap();
    assert_eq!(name.errors.keys().collect::<Vec<_>>(), vec!["minLength"]);
    assert_eq!(name.errors.get("minLength"), Some(&json!("m")));

    let result = validator.validate(json!({"name": "", "pwd": ""})).await.unwrap();
    assert_eq!(result.get_error("required", "name"), Some(&json!("r")));
    assert_eq!(result.get_error("required", "pwd"), Some(&json!("r2")));
    assert_eq!(result.get_error("minLength", "name"), Some(&json!("m")));
}

#[rstest::rstest]
#[case(json!(123), true)]
#[case(json!("0x1"), true)]
#[case(json!("0x01"), true)]
#[case(json!(true), false)]
#[tokio::test]
async fn number_or_hex_string(#[case] x: Value, #[case] valid: bool) {
    let validator = Validator::new(RuleDeclaration::new().field(
        "x",
        RuleConfig::new().check("required", "required").check(
            "or",
            args![
                vec![number(()), and(vec![string(()), hex(())], ())],
                "must be a number or a hex string"
            ],
        ),
    ));

    let result = validator.validate(json!({ "x": x })).await.unwrap();
    assert_eq!(result.is_valid(), valid);
    if !valid {
        assert_eq!(
            result.get_error("or", "x"),
            Some(&json!("must be a number or a hex string"))
        );
    }
}

#[tokio::test]
async fn empty_value_fails_required_and_reaches_call_hook() {
    let validator = Validator::new(RuleDeclaration::new().field("username", required("name is required!")));
    let seen = Arc::new(AtomicUsize::new(0));
    let hook = {
        let seen = Arc::clone(&seen);
        move |errors: &ErrorTree| {
            assert_eq!(errors.error("required", "username"), Some(&json!("name is required!")));
            assert_eq!(Validator::first_error(errors), Some(&json!("name is required!")));
            seen.fetch_add(1, Ordering::SeqCst);
        }
    };

    let result = validator
        .validate_with(json!({"username": ""}), &ValidateOptions::new().on_fail(hook))
        .await
        .unwrap();
    assert!(result.is_invalid());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn numeric_bounds() {
    let validator = Validator::new(
        RuleDeclaration::new()
            .field("low", max(10.0, "no more than 10"))
            .field("high", RuleConfig::new().check("min", args![10, "no less than 10"])),
    )
    .with_options(ValidatorOptions::new().check_all(true));

    assert!(validator.check(json!({"low": 9, "high": 11})).await.unwrap());

    let result = validator.validate(json!({"low": 11, "high": 9})).await.unwrap();
    assert!(result.has_error("max", "low"));
    assert!(result.has_error("min", "high"));
}

#[tokio::test]
async fn hex_forms() {
    let rules: RuleDeclaration = ["a", "b", "c", "d", "e"]
        .into_iter()
        .map(|field| (field, hex("value is not a hex")))
        .collect();
    let validator = Validator::new(rules);

    let data = json!({"a": "0x0A", "b": "0Ah", "c": "0A", "d": "0X0A", "e": "0AH"});
    assert!(validator.check(data).await.unwrap());
}

#[tokio::test]
async fn custom_check_in_a_private_registry() {
    let registry = Arc::new(CheckRegistry::with_builtins());
    registry
        .register("enum", |args: &Args| {
            let allowed = args.value(0)?.as_array().cloned().unwrap_or_default();
            let message = args.message(1);
            Ok(check_fn(move |value, _| {
                (!allowed.contains(value)).then(|| ErrorDescriptor::single("enum", message.clone()))
            }))
        })
        .unwrap();

    let validator = Validator::new(
        RuleDeclaration::new().field("x", RuleConfig::new().check("enum", json!([["a", "b", "c"], "error."]))),
    )
    .with_registry(Arc::clone(&registry));

    assert!(validator.check(json!({"x": "a"})).await.unwrap());
    let result = validator.validate(json!({"x": "d"})).await.unwrap();
    assert_eq!(result.get_error("enum", "x"), Some(&json!("error.")));

    // Unknown to the global registry.
    let global = Validator::new(
        RuleDeclaration::new().field("x", RuleConfig::new().check("enum", json!([["a"], "error."]))),
    );
    assert!(matches!(
        global.validate(json!({"x": "a"})).await,
        Err(ValidateError::UnknownCheck { .. })
    ));
}

#[tokio::test]
async fn format_checks_by_name() {
    let validator = Validator::new(
        RuleDeclaration::new()
            .field("email", RuleConfig::new().check("email", "bad email"))
            .field("phone", RuleConfig::new().check("phone", args!["e164", "bad phone"]))
            .field("site", RuleConfig::new().check("url", "bad url"))
            .field("host", RuleConfig::new().check("ipv4", "bad ip")),
    )
    .with_options(ValidatorOptions::new().check_all(true));

    let ok = json!({
        "email": "user@example.com",
        "phone": "+14155551234",
        "site": "https://example.com",
        "host": "10.0.0.1"
    });
    assert!(validator.check(ok).await.unwrap());

    let bad = json!({"email": "user", "phone": "12", "site": "nope", "host": "10.0.0"});
    let result = validator.validate(bad).await.unwrap();
    assert_eq!(
        result.errors().fields().collect::<Vec<_>>(),
        vec!["email", "phone", "site", "host"]
    );
}

/// Username check backed by a lookup that may be unavailable.
struct UniqueUsername {
    taken: Vec<&'static str>,
    online: bool,
}

#[async_trait::async_trait]
impl Check for UniqueUsername {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        if !self.online {
            return Err(CheckError::internal("user directory unavailable"));
        }
        let taken = value.as_str().is_some_and(|name| self.taken.contains(&name));
        Ok(taken.then(|| ErrorDescriptor::single("unique", "username is taken")))
    }
}

#[tokio::test]
async fn trait_checks_mix_with_builtins() {
    let rules = |online| {
        RuleDeclaration::new().field(
            "username",
            vec![
                required("username is required"),
                Arc::new(UniqueUsername {
                    taken: vec!["admin", "root"],
                    online,
                }) as CheckFn,
            ],
        )
    };

    let validator = Validator::new(rules(true));
    assert!(validator.check(json!({"username": "ajanuw"})).await.unwrap());
    let result = validator.validate(json!({"username": "admin"})).await.unwrap();
    assert_eq!(result.get_error("unique", "username"), Some(&json!("username is taken")));

    let err = Validator::new(rules(false))
        .validate(json!({"username": "ajanuw"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ValidateError::Check { ref field, .. } if field == "username"));
}
