//! Section scanning for the tool's `=`-ruled text reports.
//!
//! A report section starts after the first line containing its header phrase
//! and stops at the first of:
//! - a rule line (a run of `=`),
//! - a blank line immediately followed by a rule,
//! - a `Filter:` line once the body has started.
//!
//! The tool prints `Filter:` right after some headers, so a `Filter:` line
//! seen before the first body line is preamble. Blank lines are never yielded.

use std::iter::Peekable;
use std::str::Lines;

const FILTER_SENTINEL: &str = "Filter:";

/// Lazily yields the trimmed body lines of the section introduced by `marker`.
///
/// # Examples
/// ```
/// use capstat_core::reports::section::section_lines;
///
/// let text = "====\nTotals\nFilter:\n\na 1\nb 2\n====\nc 3\n";
/// let lines: Vec<_> = section_lines(text, "Totals").collect();
/// assert_eq!(lines, vec!["a 1", "b 2"]);
/// ```
pub fn section_lines<'a>(text: &'a str, marker: &str) -> SectionLines<'a> {
    let mut lines = text.lines().peekable();
    let found = lines.by_ref().any(|line| line.contains(marker));
    SectionLines {
        lines,
        in_body: false,
        done: !found,
    }
}

pub struct SectionLines<'a> {
    lines: Peekable<Lines<'a>>,
    in_body: bool,
    done: bool,
}

impl<'a> Iterator for SectionLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(line) = self.lines.next() else {
                self.done = true;
                break;
            };
            let trimmed = line.trim();

            if is_rule(trimmed) {
                self.done = true;
                break;
            }
            if trimmed.is_empty() {
                if self.lines.peek().is_some_and(|next| is_rule(next.trim())) {
                    self.done = true;
                }
                continue;
            }
            if trimmed.contains(FILTER_SENTINEL) {
                if self.in_body {
                    self.done = true;
                }
                continue;
            }

            self.in_body = true;
            return Some(trimmed);
        }
        None
    }
}

fn is_rule(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '=')
}
