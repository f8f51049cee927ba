//! Proptest generators for property-based testing.

use proptest::prelude::*;

use causeway::Error;
use causeway_code::Code;

/// Generate a short display text.
pub fn text() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,19}"
}

/// Generate an application-range code (values 1000 and above).
pub fn code() -> impl Strategy<Value = Code> {
    (1000i32..100_000, "[A-Z][a-z]{2,10}")
        .prop_map(|(value, message)| Code::new(value, message, None))
}

/// Generate a pure chain of 1 to `max_depth` levels.
pub fn chain(max_depth: usize) -> impl Strategy<Value = Error> {
    prop::collection::vec(text(), 1..=max_depth.max(1)).prop_map(|texts| {
        let mut levels = texts.into_iter();
        let mut err = Error::new(levels.next().expect("at least one level"));
        for level in levels {
            err = Error::wrap(Some(err), level).expect("cause is present");
        }
        err
    })
}

/// Generate a chain whose innermost level carries a generated code.
pub fn coded_chain(max_depth: usize) -> impl Strategy<Value = Error> {
    (code(), prop::collection::vec(text(), 0..max_depth.max(1))).prop_map(|(code, texts)| {
        let mut err = Error::new_code(code, "origin");
        for level in texts {
            err = Error::wrap(Some(err), level).expect("cause is present");
        }
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn chain_renders_reverse_joined(texts in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let mut levels = texts.iter();
            let mut err = Error::new(levels.next().unwrap().clone());
            for level in levels {
                err = Error::wrap(Some(err), level.clone()).unwrap();
            }
            let expected = texts.iter().rev().cloned().collect::<Vec<_>>().join(": ");
            prop_assert_eq!(err.to_string(), expected);
        }

        #[test]
        fn code_inherits_over_any_depth(code in code(), depth in 0usize..6) {
            let mut err = Error::new_code(code.clone(), "origin");
            for level in 0..depth {
                err = Error::wrap(Some(err), format!("level {}", level)).unwrap();
            }
            prop_assert_eq!(err.code(), &code);
        }

        #[test]
        fn wrapping_none_is_none_for_any_text(text in text()) {
            prop_assert!(Error::wrap(None::<Error>, text).is_none());
        }

        #[test]
        fn coded_chain_always_reports_a_code(err in coded_chain(4)) {
            prop_assert!(!err.code().is_nil());
            prop_assert!(err.code().value() >= 1000);
        }

        #[test]
        fn rendering_never_panics(err in chain(5)) {
            let _ = err.to_string();
            let _ = format!("{:-}", err);
            let _ = serde_json_safe(&err);
        }
    }

    fn serde_json_safe(err: &Error) -> String {
        serde_json::to_string(err).expect("serialization is infallible")
    }
}
