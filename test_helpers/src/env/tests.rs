//! Unit tests for environment helpers.

use super::*;

fn current(key: &str) -> Option<String> {
    env::var(key).ok()
}

#[test]
fn set_restores_absent_variable() {
    let key = "FLAGWISE_HELPERS_SET_ABSENT";
    {
        let _scope = EnvScope::new().unset(key);
        {
            let _inner = EnvScope::new().set(key, "tmp");
            assert_eq!(current(key).as_deref(), Some("tmp"));
        }
        assert_eq!(current(key), None);
    }
}

#[test]
fn unset_restores_original_value() {
    let key = "FLAGWISE_HELPERS_UNSET";
    let _outer = EnvScope::new().set(key, "original");
    {
        let _inner = EnvScope::new().unset(key);
        assert_eq!(current(key), None);
    }
    assert_eq!(current(key).as_deref(), Some("original"));
}

#[test]
fn repeated_keys_restore_in_reverse_order() {
    let key = "FLAGWISE_HELPERS_STACKED";
    let _outer = EnvScope::new().set(key, "base");
    {
        let _inner = EnvScope::new().set(key, "v1").set(key, "v2");
        assert_eq!(current(key).as_deref(), Some("v2"));
    }
    assert_eq!(current(key).as_deref(), Some("base"));
}

#[test]
fn unset_all_clears_each_key() {
    let keys = ["FLAGWISE_HELPERS_A", "FLAGWISE_HELPERS_B"];
    let _outer = EnvScope::new().set(keys[0], "a").set(keys[1], "b");
    {
        let _inner = EnvScope::new().unset_all(keys);
        assert!(keys.iter().all(|k| current(k).is_none()));
    }
    assert_eq!(current(keys[1]).as_deref(), Some("b"));
}

#[test]
fn with_vars_scopes_changes_to_closure() {
    let key = "FLAGWISE_HELPERS_WITH_VARS";
    let _outer = EnvScope::new().unset(key);
    let seen = with_vars([(key, Some("inside"))], || current(key));
    assert_eq!(seen.as_deref(), Some("inside"));
    assert_eq!(current(key), None);
}
