// ==============================================
// INSTANCE CONTRACT TESTS (integration)
// ==============================================
//
// Behavior of one instance as seen from outside the crate: factory,
// memoization, hooks, registry exposure and chaining.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rerandom::prelude::*;

fn noop_key() -> KeyProcessor {
    KeyProcessor::new(|_| Value::Undefined)
}

fn noop_post() -> PostProcessor {
    PostProcessor::new(|_, _| Value::Undefined)
}

fn plus_one() -> PostProcessor {
    PostProcessor::new(|v, _| Value::from(v.as_f64().unwrap_or(0.0) + 1.0))
}

// ==============================================
// Factory and instance
// ==============================================

mod factory {
    use super::*;

    #[test]
    fn returns_independent_instances() {
        let mut a = rerandom();
        let mut b = rerandom();
        let va = a.invoke("same");
        b.set_generator(Generator::new(|| Value::from(0.75))).unwrap();
        assert_eq!(b.invoke("same"), Value::from(0.75));
        assert_eq!(a.invoke("same"), va);
    }

    #[test]
    fn returns_itself_when_chaining() {
        let mut instance = rerandom();
        let addr: *const Rerandom = &instance;
        let chained = instance
            .reset_registry()
            .set_post(noop_post())
            .set_key(noop_key());
        assert!(std::ptr::eq(chained, addr));
    }

    #[test]
    fn returns_a_number() {
        let mut instance = rerandom();
        assert!(instance.invoke_unkeyed().is_number());
    }
}

// ==============================================
// Custom generators
// ==============================================

mod generators {
    use super::*;

    #[test]
    fn can_be_injected() {
        let mut instance = rerandom();
        let one = Generator::new(|| Value::from(1));
        instance.set_generator(one.clone()).unwrap();
        assert!(one.ptr_eq(instance.generator()));
    }

    #[test]
    fn are_used_if_injected() {
        let mut instance = rerandom();
        instance
            .set_generator(Generator::new(|| Value::from(1)))
            .unwrap();
        assert_eq!(instance.invoke_unkeyed(), Value::from(1));
        assert_eq!(instance.invoke("first"), Value::from(1));
    }

    #[test]
    fn must_return_numbers() {
        let mut instance = rerandom();
        let result = instance.set_generator(Generator::new(|| Value::from(true)));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("must be a function that returns a number"));
        assert!(instance.generator().is_platform());
    }

    #[test]
    fn default_is_platform_source() {
        let instance = rerandom();
        assert!(instance.generator().ptr_eq(&Generator::platform()));
    }

    #[test]
    fn validation_draw_is_a_real_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mut instance = rerandom();
        instance
            .set_generator(Generator::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::from(0.5)
            }))
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

// ==============================================
// Key processing
// ==============================================

mod key_processing {
    use super::*;

    #[test]
    fn is_injected() {
        let mut instance = rerandom();
        let noop = noop_key();
        instance.set_key(noop.clone());
        assert!(instance.key().is_some_and(|k| k.ptr_eq(&noop)));
    }

    #[test]
    fn is_applied() {
        let mut instance = rerandom();
        instance.set_key(KeyProcessor::new(|v| {
            Value::from(v.as_f64().unwrap_or(0.0) + 1.0)
        }));
        instance.invoke(1);
        assert!(instance.registry().has(&Value::from(2)));
    }

    #[test]
    fn can_increase_the_frequency_of_matches() {
        let mut instance = rerandom();
        assert_ne!(
            instance.invoke(Value::list(["a"])),
            instance.invoke(Value::list(["a"]))
        );
        instance.set_key(KeyProcessor::stringify());
        assert_eq!(
            instance.invoke(Value::list(["a"])),
            instance.invoke(Value::list(["a"]))
        );
    }

    #[test]
    fn same_list_handle_matches_without_processor() {
        let mut instance = rerandom();
        let key = Value::list(["a"]);
        assert_eq!(instance.invoke(key.clone()), instance.invoke(key));
    }
}

// ==============================================
// Registry
// ==============================================

mod registry {
    use super::*;

    #[test]
    fn is_exposed() {
        let mut instance = rerandom();
        instance.invoke("a");
        assert!(instance.registry().has(&Value::from("a")));
    }

    #[test]
    fn can_be_reset() {
        let mut instance = rerandom();
        instance.invoke("a");
        instance.reset_registry();
        assert!(!instance.registry().has(&Value::from("a")));
        assert!(instance.registry().is_empty());
    }

    #[test]
    fn stores_the_generated_value() {
        let mut instance = rerandom();
        let v = instance.invoke("a");
        assert_eq!(instance.registry().get(&Value::from("a")), Some(&v));
    }

    #[test]
    fn keeps_insertion_order() {
        let mut instance = rerandom();
        for k in ["c", "a", "b", "a"] {
            instance.invoke(k);
        }
        let keys: Vec<String> = instance.registry().keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn falsy_keys_are_not_stored() {
        let mut instance = rerandom();
        instance.invoke(0);
        instance.invoke("");
        instance.invoke(false);
        instance.invoke(Value::Null);
        instance.invoke_unkeyed();
        assert!(instance.registry().is_empty());
    }
}

// ==============================================
// Post-processing
// ==============================================

mod post_processing {
    use super::*;

    #[test]
    fn is_injected() {
        let mut instance = rerandom();
        let noop = noop_post();
        instance.set_post(noop.clone());
        assert!(instance.post().is_some_and(|p| p.ptr_eq(&noop)));
    }

    #[test]
    fn is_applied() {
        let mut instance = rerandom();
        instance.set_post(plus_one());
        for _ in 0..50 {
            let n = instance.invoke_unkeyed().as_f64().unwrap();
            assert!((1.0..2.0).contains(&n));
        }
    }

    #[test]
    fn derives_other_value_types() {
        let mut instance = rerandom();
        instance.set_post(PostProcessor::new(|v, key| {
            Value::from(format!("{}-{}", key, (v.as_f64().unwrap_or(0.0) * 1e6) as u64))
        }));
        let id = instance.invoke("user");
        assert!(id.as_str().is_some_and(|s| s.starts_with("user-")));
        assert_eq!(instance.invoke("user"), id);
    }
}

// ==============================================
// Randomization
// ==============================================

mod randomization {
    use super::*;

    #[test]
    fn returns_a_number_in_unit_range() {
        let mut instance = rerandom();
        let n = instance.invoke_unkeyed().as_f64().unwrap();
        assert!((0.0..1.0).contains(&n));
    }

    #[test]
    fn randomizes_only_unknown_inputs() {
        let mut instance = rerandom();
        let results: Vec<Value> = ["a", "b", "b"].iter().map(|&k| instance.invoke(k)).collect();
        assert_ne!(results[0], results[1]);
        assert_eq!(results[1], results[2]);
    }

    #[test]
    fn returns_consistent_values_for_matching_inputs() {
        let mut instance = rerandom();
        let keys = ["a", "b", "c", "d", "a", "b", "c", "d"];
        let results: Vec<Value> = keys.iter().map(|&k| instance.invoke(k)).collect();
        for i in 0..4 {
            assert_eq!(results[i], results[i + 4]);
        }
    }

    #[test]
    fn unkeyed_calls_differ() {
        let mut instance = rerandom();
        instance
            .set_generator(Generator::seeded(11))
            .unwrap();
        assert_ne!(instance.invoke_unkeyed(), instance.invoke_unkeyed());
    }
}
