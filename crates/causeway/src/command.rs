//! Process option reading.
//!
//! Parses `--key=value`, `--key value`, and `-key` argument forms once per
//! process, with environment-variable fallback: option `a.b.c` falls back
//! to the variable `A_B_C`.

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

static PARSED: Lazy<ParsedArgs> = Lazy::new(|| ParsedArgs::parse(env::args().skip(1)));

#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    arguments: Vec<String>,
    options: HashMap<String, String>,
}

impl ParsedArgs {
    pub(crate) fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let args: Vec<String> = args.into_iter().collect();
        let mut parsed = ParsedArgs::default();
        let mut i = 0;
        while i < args.len() {
            match split_option(&args[i]) {
                Some((key, Some(value))) => {
                    parsed.options.insert(key.to_string(), value.to_string());
                }
                Some((key, None)) => {
                    // A bare option consumes the next argument as its value
                    // unless that argument is itself an option.
                    match args.get(i + 1) {
                        Some(next) if !next.starts_with('-') => {
                            parsed.options.insert(key.to_string(), next.clone());
                            i += 1;
                        }
                        _ => {
                            parsed.options.insert(key.to_string(), String::new());
                        }
                    }
                }
                None => parsed.arguments.push(args[i].clone()),
            }
            i += 1;
        }
        parsed
    }

    pub(crate) fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub(crate) fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }
}

/// Read an option by its dotted key, falling back to the environment:
/// `a.b.c` reads option `a.b.c`, then variable `A_B_C`.
pub(crate) fn option_with_env(key: &str) -> Option<String> {
    let option_key = key.replace('_', ".").to_lowercase();
    if let Some(value) = PARSED.option(&option_key) {
        return Some(value.to_string());
    }
    let env_key = key.replace('.', "_").to_uppercase();
    env::var(env_key).ok()
}

fn split_option(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))?;
    if body.is_empty() {
        return None;
    }
    let (key, value) = match body.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (body, None),
    };
    if key.is_empty() || !key.chars().all(is_option_char) {
        return None;
    }
    Some((key, value))
}

fn is_option_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '?' | '.' | '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedArgs {
        ParsedArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_key_value_forms() {
        let parsed = parse(&["--mode=detail", "-v=1", "--flag"]);
        assert_eq!(parsed.option("mode"), Some("detail"));
        assert_eq!(parsed.option("v"), Some("1"));
        assert_eq!(parsed.option("flag"), Some(""));
    }

    #[test]
    fn test_bare_option_consumes_next_argument() {
        let parsed = parse(&["--mode", "detail", "run"]);
        assert_eq!(parsed.option("mode"), Some("detail"));
        assert_eq!(parsed.argument(0), Some("run"));
    }

    #[test]
    fn test_bare_option_does_not_consume_option() {
        let parsed = parse(&["--mode", "--other=1"]);
        assert_eq!(parsed.option("mode"), Some(""));
        assert_eq!(parsed.option("other"), Some("1"));
    }

    #[test]
    fn test_plain_arguments_kept_in_order() {
        let parsed = parse(&["build", "--quiet=1", "target"]);
        assert_eq!(parsed.argument(0), Some("build"));
        assert_eq!(parsed.argument(1), Some("target"));
        assert_eq!(parsed.argument(2), None);
    }

    #[test]
    fn test_dotted_keys() {
        let parsed = parse(&["--causeway.error.stack.mode=detail"]);
        assert_eq!(parsed.option("causeway.error.stack.mode"), Some("detail"));
    }

    #[test]
    fn test_invalid_option_chars_treated_as_argument() {
        let parsed = parse(&["--no spaces", "--"]);
        assert_eq!(parsed.option("no spaces"), None);
        assert_eq!(parsed.argument(0), Some("--no spaces"));
        assert_eq!(parsed.argument(1), Some("--"));
    }

    #[test]
    fn test_option_with_env_falls_back_to_environment() {
        env::set_var("CAUSEWAY_TEST_COMMAND_KEY", "from-env");
        assert_eq!(
            option_with_env("causeway.test.command.key").as_deref(),
            Some("from-env")
        );
        env::remove_var("CAUSEWAY_TEST_COMMAND_KEY");
        assert_eq!(option_with_env("causeway.test.command.key"), None);
    }
}
