//! Chain queries over arbitrary errors.
//!
//! These functions accept any `dyn std::error::Error` and attempt
//! capabilities in a fixed order: first a downcast to the chain node
//! [`Error`], then the standard `source` chain. Foreign error types that
//! implement neither capability answer with the documented fallbacks.

use std::error::Error as StdError;

use causeway_code::Code;

use crate::chain::{same_object, Error, RootCause};
use crate::config::StackConfig;

/// The effective code of `err`: the first non-sentinel code found walking
/// the chain, or [`Code::NIL`].
pub fn code<'a>(err: &'a (dyn StdError + 'static)) -> &'a Code {
    if let Some(node) = err.downcast_ref::<Error>() {
        return node.code();
    }
    match err.source() {
        Some(next) => code(next),
        None => {
            static NIL: Code = Code::NIL;
            &NIL
        }
    }
}

/// Whether the first code-bearing error in the chain carries `target`.
pub fn has_code(err: &(dyn StdError + 'static), target: &Code) -> bool {
    if let Some(node) = err.downcast_ref::<Error>() {
        return node.code() == target;
    }
    match err.source() {
        Some(next) => has_code(next, target),
        None => false,
    }
}

/// The root cause of `err`.
///
/// A chain node answers through [`Error::cause`]; a foreign error is walked
/// to the innermost `source` (handing over to a chain node if one appears
/// along the way), and is its own root when it has no source.
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> RootCause<'a> {
    if let Some(node) = err.downcast_ref::<Error>() {
        return node.cause();
    }
    let mut current = err;
    while let Some(next) = current.source() {
        if let Some(node) = next.downcast_ref::<Error>() {
            return node.cause();
        }
        current = next;
    }
    RootCause::External(current)
}

/// The rendered stack of `err`, or its message when it carries no stack.
pub fn stack(err: &(dyn StdError + 'static), config: &StackConfig) -> String {
    match err.downcast_ref::<Error>() {
        Some(node) => node.stack_with(config),
        None => err.to_string(),
    }
}

/// Whether `err` carries a renderable stack.
pub fn has_stack(err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<Error>().is_some()
}

/// A detached copy of the current level of `err`, or `None` when `err` is
/// not a chain node.
pub fn current(err: &(dyn StdError + 'static)) -> Option<Error> {
    err.downcast_ref::<Error>().map(Error::current)
}

/// The next level of `err`, one step down the chain.
pub fn unwrapped<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Whether `err` and `target` are equal, asking either side's shallow
/// equality when it is a chain node.
pub fn equal(err: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    if same_object(err, target) {
        return true;
    }
    if let Some(node) = err.downcast_ref::<Error>() {
        return node.equal(target);
    }
    if let Some(node) = target.downcast_ref::<Error>() {
        return node.equal(err);
    }
    false
}

/// Whether `target` appears in the chain of `err`. Only chain nodes carry
/// a membership test; a foreign `err` answers `false`.
pub fn is(err: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    match err.downcast_ref::<Error>() {
        Some(node) => node.is(target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Opaque(&'static str);

    impl std::fmt::Display for Opaque {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Opaque {}

    #[test]
    fn test_code_walks_through_foreign_wrapper() {
        let inner = Error::new_code(Code::NOT_FOUND, "gone");
        let outer = Error::wrap(Some(inner), "loading").unwrap();
        assert_eq!(code(&outer), &Code::NOT_FOUND);
        assert!(has_code(&outer, &Code::NOT_FOUND));
        assert!(!has_code(&outer, &Code::SERVER_BUSY));
    }

    #[test]
    fn test_code_of_foreign_error_is_nil() {
        let foreign = Opaque("no codes here");
        assert!(code(&foreign).is_nil());
        assert!(!has_code(&foreign, &Code::NIL.with_detail(serde_json::json!(1))));
    }

    #[test]
    fn test_cause_of_foreign_error_is_itself() {
        let foreign = Opaque("solo");
        match cause(&foreign) {
            RootCause::External(root) => assert_eq!(root.to_string(), "solo"),
            RootCause::Synthesized(_) => panic!("expected external root"),
        }
    }

    #[test]
    fn test_stack_of_foreign_error_is_its_message() {
        let foreign = Opaque("plain text");
        assert_eq!(stack(&foreign, &StackConfig::default()), "plain text");
        assert!(!has_stack(&foreign));
        assert!(has_stack(&Error::new("x")));
    }

    #[test]
    fn test_current_of_foreign_error_is_none() {
        assert!(current(&Opaque("plain")).is_none());
        let node = Error::wrap(Some(Error::new("inner")), "outer").unwrap();
        let level = current(&node).unwrap();
        assert_eq!(level.to_string(), "outer");
    }

    #[test]
    fn test_unwrapped_steps_one_level() {
        let node = Error::wrap(Some(Error::new("inner")), "outer").unwrap();
        assert_eq!(unwrapped(&node).unwrap().to_string(), "inner");
        assert!(unwrapped(&Opaque("leaf")).is_none());
    }

    #[test]
    fn test_equal_tries_both_sides() {
        let node = Error::new("same text");
        let foreign = Opaque("same text");
        assert!(equal(&node, &foreign));
        assert!(equal(&foreign, &node));
        let other_a = Opaque("a");
        let other_b = Opaque("a");
        assert!(!equal(&other_a, &other_b));
    }

    #[test]
    fn test_equal_same_object() {
        let foreign = Opaque("a");
        let dyn_ref: &(dyn StdError + 'static) = &foreign;
        assert!(equal(dyn_ref, dyn_ref));
    }

    #[test]
    fn test_is_only_answers_for_chain_nodes() {
        let target = Error::new("inner");
        let chain = Error::wrap(Some(Error::new("inner")), "outer").unwrap();
        assert!(is(&chain, &target));
        assert!(!is(&Opaque("inner"), &target));
    }
}
