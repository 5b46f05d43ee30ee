//! Unit tests for flag builders, coercion, and validators.

use futures::executor::block_on;
use rstest::rstest;

use super::*;

#[rstest]
#[case("1", true)]
#[case("true", true)]
#[case("TRUE", true)]
#[case("0", false)]
#[case("false", false)]
#[case("FALSE", false)]
fn coerces_boolean_forms(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(
        FlagKind::Boolean.coerce(raw),
        Some(FlagValue::Boolean(expected))
    );
}

#[rstest]
#[case("True")]
#[case("yes")]
#[case("")]
#[case(" true")]
fn rejects_other_boolean_text(#[case] raw: &str) {
    assert_eq!(FlagKind::Boolean.coerce(raw), None);
}

#[rstest]
#[case("42", 42.0)]
#[case("-3.5", -3.5)]
#[case("1e3", 1000.0)]
#[case("  7 ", 7.0)]
fn coerces_numbers(#[case] raw: &str, #[case] expected: f64) {
    assert_eq!(FlagKind::Number.coerce(raw), Some(FlagValue::Number(expected)));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("abc")]
#[case("12px")]
#[case("NaN")]
#[case("inf")]
fn rejects_unparseable_numbers(#[case] raw: &str) {
    assert_eq!(FlagKind::Number.coerce(raw), None);
}

#[test]
fn strings_pass_through_unchanged() {
    assert_eq!(
        FlagKind::String.coerce("  spaced "),
        Some(FlagValue::String(String::from("  spaced ")))
    );
}

#[test]
fn builder_records_every_attribute() {
    let def: FlagDefinition = Flag::string("foo")
        .alias("f")
        .env("FOO")
        .envars(["FOO_FALLBACK", "LEGACY_FOO"])
        .default_value("fffff")
        .validator(|_: String| async { Validity::Valid })
        .into();
    assert_eq!(def.name(), "foo");
    assert_eq!(def.alias(), Some("f"));
    assert_eq!(def.envars(), ["FOO", "FOO_FALLBACK", "LEGACY_FOO"]);
    assert_eq!(def.kind(), FlagKind::String);
    assert_eq!(
        def.default_value(),
        Some(&FlagValue::String(String::from("fffff")))
    );
    assert!(def.validator().is_some());
}

#[test]
fn typed_constructors_set_kind() {
    assert_eq!(Flag::boolean("v").build().kind(), FlagKind::Boolean);
    assert_eq!(Flag::number("n").build().kind(), FlagKind::Number);
    assert_eq!(
        Flag::number("n").default_value(3).build().default_value(),
        Some(&FlagValue::Number(3.0))
    );
}

#[test]
fn validator_sees_typed_value() {
    let validator = Validator::new(|n: f64| async move {
        if n > 1024.0 {
            Validity::Valid
        } else {
            Validity::invalid(format!("{n} is a privileged port"))
        }
    });
    assert_eq!(block_on(validator.check(FlagValue::Number(8080.0))), Validity::Valid);
    assert_eq!(
        block_on(validator.check(FlagValue::Number(80.0))),
        Validity::invalid("80 is a privileged port")
    );
}

#[test]
fn validator_rejects_mismatched_kind() {
    let validator = Validator::new(|_: bool| async { Validity::Valid });
    let verdict = block_on(validator.check(FlagValue::String(String::from("x"))));
    assert!(!verdict.is_valid());
}

#[test]
fn validity_from_result() {
    assert_eq!(Validity::from(Ok::<(), String>(())), Validity::Valid);
    assert_eq!(
        Validity::from(Err::<(), _>("nope")),
        Validity::invalid("nope")
    );
}
