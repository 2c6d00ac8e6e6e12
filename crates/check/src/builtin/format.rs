//! Format checks for strings: phone numbers, e-mail addresses, hexadecimal
//! strings, URLs and IP addresses. Non-string values always fail.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use ::url::{Host, Url};

use crate::{Check, CheckFn, CheckResult, ErrorDescriptor, Message};

// ============================================================================
// PHONE
// ============================================================================

static CN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("phone pattern is valid"));

/// Phone number format accepted by [`Phone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneMode {
    /// Mainland China mobile numbers: 11 digits starting with `13`-`19`.
    #[default]
    ZhCn,
    /// E.164: `+` followed by 7-15 digits, no leading zero.
    E164,
    /// Digits with optional `+ - ( ) . ` separators, 7-15 digits in total.
    Lenient,
}

impl FromStr for PhoneMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zh-CN" => Ok(Self::ZhCn),
            "e164" | "E.164" => Ok(Self::E164),
            "lenient" => Ok(Self::Lenient),
            _ => Err(()),
        }
    }
}

impl PhoneMode {
    fn accepts(self, input: &str) -> bool {
        match self {
            Self::ZhCn => CN_MOBILE.is_match(input),
            Self::E164 => input.strip_prefix('+').is_some_and(|digits| {
                digits.chars().all(|c| c.is_ascii_digit())
                    && !digits.starts_with('0')
                    && (7..=15).contains(&digits.len())
            }),
            Self::Lenient => {
                let allowed = |c: char| c.is_ascii_digit() || "+-() .".contains(c);
                let digits = input.chars().filter(char::is_ascii_digit).count();
                input.chars().all(allowed)
                    && input.rfind('+').is_none_or(|at| at == 0)
                    && (7..=15).contains(&digits)
            }
        }
    }
}

/// Phone number check.
#[derive(Debug, Clone)]
pub struct Phone {
    mode: PhoneMode,
    message: Message,
}

impl Phone {
    /// Registry name reported in the error descriptor.
    pub const NAME: &'static str = "phone";

    /// Creates the check.
    pub fn new(mode: PhoneMode, message: impl Into<Message>) -> Self {
        Self {
            mode,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Check for Phone {
    async fn check(&self, value: &Value, _data: &Value) -> CheckResult {
        let passed = value.as_str().is_some_and(|s| self.mode.accepts(s));
        Ok((!passed).then(|| ErrorDescriptor::single(Self::NAME, self.message.clone())))
    }
}

/// Phone number in the default (`zh-CN`) format.
pub fn phone(message: impl Into<Message>) -> CheckFn {
    Arc::new(Phone::new(PhoneMode::default(), message))
}

/// Phone number in the given format.
pub fn phone_with(mode: PhoneMode, message: impl Into<Message>) -> CheckFn {
    Arc::new(Phone::new(mode, message))
}

// ============================================================================
// EMAIL
// ============================================================================

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

fn is_email(input: &str) -> bool {
    let Some((local, _domain)) = input.rsplit_once('@') else {
        return false;
    };
    input.len() <= 254 && local.len() <= 64 && EMAIL.is_match(input)
}

crate::macros::check! {
    /// Passes for e-mail addresses (at most 254 chars, local part at most 64).
    pub Email => "email";
    rule(input) { input.as_str().is_some_and(is_email) }
    fn email;
}

// ============================================================================
// HEX
// ============================================================================

fn is_hex(input: &str) -> bool {
    let body = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let body = body
        .strip_suffix('h')
        .or_else(|| body.strip_suffix('H'))
        .unwrap_or(body);
    body.chars().all(|c| c.is_ascii_hexdigit())
}

crate::macros::check! {
    /// Passes for hexadecimal strings; a `0x` prefix and an `h` suffix are
    /// allowed (`"0x0A"`, `"0Ah"`). Digits are optional, so `""` and `"0x"` pass.
    pub Hex => "hex";
    rule(input) { input.as_str().is_some_and(is_hex) }
    fn hex;
}

// ============================================================================
// URL
// ============================================================================

fn is_url(input: &str) -> bool {
    if input.is_empty() || input.trim() != input || input.contains(char::is_whitespace) {
        return false;
    }
    let parsed = if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(&format!("http://{input}"))
    };
    let Ok(url) = parsed else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https" | "ftp")
        || !url.username().is_empty()
        || url.password().is_some()
    {
        return false;
    }
    match url.host() {
        Some(Host::Domain(domain)) => {
            domain == "localhost"
                || (domain.contains('.') && domain.split('.').all(|label| !label.is_empty()))
        }
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    }
}

crate::macros::check! {
    /// Passes for http, https and ftp URLs; the scheme may be omitted.
    pub IsUrl => "url";
    rule(input) { input.as_str().is_some_and(is_url) }
    fn url;
}

// ============================================================================
// IP ADDRESSES
// ============================================================================

crate::macros::check! {
    /// Passes for dotted-quad IPv4 addresses.
    pub Ipv4 => "ipv4";
    rule(input) { input.as_str().is_some_and(|s| s.parse::<Ipv4Addr>().is_ok()) }
    fn ipv4;
}

crate::macros::check! {
    /// Passes for IPv6 addresses.
    pub Ipv6 => "ipv6";
    rule(input) { input.as_str().is_some_and(|s| s.parse::<Ipv6Addr>().is_ok()) }
    fn ipv6;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    async fn passes(check: CheckFn, value: Value) -> bool {
        check.check(&value, &Value::Null).await.unwrap().is_none()
    }

    #[rstest]
    #[case("0x0A", true)]
    #[case("0Ah", true)]
    #[case("0A", true)]
    #[case("0X0A", true)]
    #[case("0AH", true)]
    #[case("0x1", true)]
    #[case("0xhello", false)]
    #[case("0x", true)]
    #[case("", true)]
    #[case("12g", false)]
    #[tokio::test]
    async fn hex_strings(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(hex("value is not a hex"), json!(input)).await, expected);
    }

    #[tokio::test]
    async fn hex_rejects_non_strings() {
        assert!(!passes(hex(()), json!(10)).await);
    }

    #[rstest]
    #[case(PhoneMode::ZhCn, "13812345678", true)]
    #[case(PhoneMode::ZhCn, "12812345678", false)]
    #[case(PhoneMode::ZhCn, "1381234567", false)]
    #[case(PhoneMode::E164, "+14155551234", true)]
    #[case(PhoneMode::E164, "14155551234", false)]
    #[case(PhoneMode::Lenient, "+1 (415) 555-1234", true)]
    #[case(PhoneMode::Lenient, "555-12", false)]
    #[case(PhoneMode::Lenient, "415+5551234", false)]
    #[tokio::test]
    async fn phone_modes(#[case] mode: PhoneMode, #[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(phone_with(mode, ()), json!(input)).await, expected);
    }

    #[test]
    fn phone_mode_names() {
        assert_eq!("zh-CN".parse(), Ok(PhoneMode::ZhCn));
        assert_eq!("e164".parse(), Ok(PhoneMode::E164));
        assert_eq!("lenient".parse(), Ok(PhoneMode::Lenient));
        assert_eq!("en-US".parse::<PhoneMode>(), Err(()));
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("no-at-sign", false)]
    #[case("two@@example.com", false)]
    #[case("trailing.@example.com", false)]
    #[tokio::test]
    async fn email_addresses(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(email(()), json!(input)).await, expected);
    }

    #[tokio::test]
    async fn email_length_limits() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(!passes(email(()), json!(long_local)).await);
    }

    #[rstest]
    #[case("https://example.com/path?q=1", true)]
    #[case("example.com", true)]
    #[case("ftp://files.example.org", true)]
    #[case("http://localhost:8080", true)]
    #[case("http://127.0.0.1", true)]
    #[case("mailto:user@example.com", false)]
    #[case("http://nodot", false)]
    #[case("not a url", false)]
    #[case("", false)]
    #[tokio::test]
    async fn urls(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(url(()), json!(input)).await, expected);
    }

    #[tokio::test]
    async fn ip_addresses() {
        assert!(passes(ipv4(()), json!("192.168.0.1")).await);
        assert!(!passes(ipv4(()), json!("256.1.1.1")).await);
        assert!(!passes(ipv4(()), json!("::1")).await);
        assert!(passes(ipv6(()), json!("::1")).await);
        assert!(passes(ipv6(()), json!("2001:db8::8a2e:370:7334")).await);
        assert!(!passes(ipv6(()), json!("192.168.0.1")).await);
    }
}
