//! Stack capture and chain trace rendering.
//!
//! Capture records raw frame addresses only; resolving addresses to
//! (function, file, line) is deferred until stack text is requested, so
//! constructing an error stays cheap on hot paths.
//!
//! Rendering walks the chain from the outermost node inward, filters
//! runtime and framework frames, and deduplicates call sites that repeat
//! across levels, keeping only the deepest occurrence.

use std::collections::HashSet;
use std::fmt::Write as _;

use backtrace::Backtrace;

use crate::chain::Error;
use crate::config::StackConfig;

/// Maximum number of frames rendered per chain level.
const MAX_STACK_DEPTH: usize = 64;

/// This crate's own sources, excluded from every rendered trace so wrapper
/// noise never pollutes a dump.
const STACK_FILTER_MODULE_PATH: &str = "/causeway/src/";

/// Path fragments identifying the language runtime, toolchain library
/// sources, and the frame-capture machinery.
const RUNTIME_PATH_MARKERS: &[&str] = &["/rustc/", "/library/std/", "/library/core/", "/backtrace-"];

/// A captured, unresolved stack snapshot.
#[derive(Clone, Default)]
pub(crate) struct Stack {
    trace: Option<Backtrace>,
    skip: usize,
}

impl Stack {
    /// Capture the current stack without resolving symbols. `skip` drops
    /// that many additional caller-side frames at render time.
    pub(crate) fn capture(skip: usize) -> Self {
        Self {
            trace: Some(Backtrace::new_unresolved()),
            skip,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn is_captured(&self) -> bool {
        self.trace.is_some()
    }

    /// Resolve and filter this snapshot into renderable lines.
    ///
    /// Frames without symbol information are omitted, never an error.
    fn lines(&self, config: &StackConfig) -> Vec<StackLine> {
        let Some(trace) = &self.trace else {
            return Vec::new();
        };
        let mut resolved = trace.clone();
        resolved.resolve();

        let mut lines = Vec::new();
        for frame in resolved.frames() {
            for symbol in frame.symbols() {
                let Some(name) = symbol.name() else { continue };
                let Some(file) = symbol.filename() else { continue };
                let Some(line) = symbol.lineno() else { continue };
                let file = file.to_string_lossy();
                if file.contains('<') {
                    continue;
                }
                if RUNTIME_PATH_MARKERS.iter().any(|marker| file.contains(marker)) {
                    continue;
                }
                if file.contains(STACK_FILTER_MODULE_PATH) {
                    continue;
                }
                if config.is_brief() && file.contains(config.filter_key()) {
                    continue;
                }
                let name = name.to_string();
                lines.push(StackLine {
                    function: strip_symbol_hash(&name).to_string(),
                    file_line: format!("{}:{}", file, line),
                });
            }
        }
        if self.skip > 0 {
            lines.drain(..self.skip.min(lines.len()));
        }
        lines.truncate(MAX_STACK_DEPTH);
        lines
    }
}

/// One chain level in a rendered trace.
struct StackInfo {
    message: String,
    lines: Vec<StackLine>,
}

/// One resolved frame.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StackLine {
    function: String,
    file_line: String,
}

impl Error {
    /// Render the chain's stack trace using the installed process
    /// configuration.
    pub fn stack(&self) -> String {
        self.stack_with(crate::config::installed())
    }

    /// Render the chain's stack trace with an explicit configuration.
    ///
    /// Each level prints as `N. <message>` followed by its surviving
    /// frames. A non-node external terminus appends a final message-only
    /// entry.
    pub fn stack_with(&self, config: &StackConfig) -> String {
        let mut infos = Vec::new();
        let mut node = self;
        loop {
            infos.push(StackInfo {
                message: node.level_message(),
                lines: node.stack.lines(config),
            });
            match node.cause.as_deref() {
                Some(next) => match next.downcast_ref::<Error>() {
                    Some(inner) => node = inner,
                    None => {
                        infos.push(StackInfo {
                            message: next.to_string(),
                            lines: Vec::new(),
                        });
                        break;
                    }
                },
                None => break,
            }
        }
        dedup_file_lines(&mut infos);
        render_infos(&infos)
    }
}

/// Remove lines whose `file:line` already appears at a deeper level.
///
/// A shared call site reappears at every level above the wrap that
/// recorded it; only the deepest occurrence is kept.
fn dedup_file_lines(infos: &mut [StackInfo]) {
    let mut seen = HashSet::new();
    for info in infos.iter_mut().rev() {
        info.lines.retain(|line| seen.insert(line.file_line.clone()));
    }
}

fn render_infos(infos: &[StackInfo]) -> String {
    let mut out = String::new();
    for (i, info) in infos.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, info.message);
        for (j, line) in info.lines.iter().enumerate() {
            // One space less of padding once the line index needs two digits.
            let space = if j >= 9 { " " } else { "  " };
            let _ = writeln!(out, "   {}).{}{}", j + 1, space, line.function);
            let _ = writeln!(out, "        {}", line.file_line);
        }
    }
    out
}

/// Trim the trailing `::h<16 hex>` disambiguator from a demangled symbol.
fn strip_symbol_hash(name: &str) -> &str {
    if let Some(pos) = name.rfind("::h") {
        let hash = &name[pos + 3..];
        if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return &name[..pos];
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StackMode;

    fn info(message: &str, file_lines: &[&str]) -> StackInfo {
        StackInfo {
            message: message.to_string(),
            lines: file_lines
                .iter()
                .map(|fl| StackLine {
                    function: format!("fn_at_{}", fl.replace([':', '.', '/'], "_")),
                    file_line: (*fl).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_strip_symbol_hash() {
        assert_eq!(
            strip_symbol_hash("app::load::h0123456789abcdef"),
            "app::load"
        );
        assert_eq!(strip_symbol_hash("app::load"), "app::load");
        // Too-short suffix is not a disambiguator.
        assert_eq!(strip_symbol_hash("app::h12"), "app::h12");
    }

    #[test]
    fn test_dedup_keeps_deepest_occurrence() {
        let mut infos = vec![
            info("outer", &["main.rs:10", "handler.rs:42"]),
            info("mid", &["handler.rs:42", "repo.rs:7"]),
            info("inner", &["repo.rs:7"]),
        ];
        dedup_file_lines(&mut infos);

        assert_eq!(infos[0].lines.len(), 1);
        assert_eq!(infos[0].lines[0].file_line, "main.rs:10");
        assert_eq!(infos[1].lines.len(), 1);
        assert_eq!(infos[1].lines[0].file_line, "handler.rs:42");
        assert_eq!(infos[2].lines.len(), 1);
        assert_eq!(infos[2].lines[0].file_line, "repo.rs:7");
    }

    #[test]
    fn test_render_numbering_and_indent() {
        let infos = vec![info("saving order", &["svc.rs:3"]), info("db write", &[])];
        let out = render_infos(&infos);
        assert_eq!(
            out,
            "1. saving order\n   1).  fn_at_svc_rs_3\n        svc.rs:3\n2. db write\n"
        );
    }

    #[test]
    fn test_render_padding_shrinks_past_nine() {
        let file_lines: Vec<String> = (1..=11).map(|n| format!("deep.rs:{}", n)).collect();
        let refs: Vec<&str> = file_lines.iter().map(String::as_str).collect();
        let out = render_infos(&[info("deep", &refs)]);
        assert!(out.contains("   9).  fn_at_deep_rs_9"));
        assert!(out.contains("   10). fn_at_deep_rs_10"));
        assert!(out.contains("   11). fn_at_deep_rs_11"));
    }

    #[test]
    fn test_empty_stack_has_no_lines() {
        let stack = Stack::empty();
        assert!(!stack.is_captured());
        assert!(stack.lines(&StackConfig::new(StackMode::Detail)).is_empty());
    }

    #[test]
    fn test_capture_records_snapshot() {
        let stack = Stack::capture(0);
        assert!(stack.is_captured());
        // Resolution of this crate's own frames is filtered; just ensure the
        // resolve path runs without panicking.
        let _ = stack.lines(&StackConfig::new(StackMode::Detail));
    }
}
