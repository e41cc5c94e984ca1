// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::cst::CSTNode;
use crate::input::{Cursor, Input};
use crate::memo::MemoTable;
use crate::rule::Rule;
use tracing::trace;

/// Per-parse knobs.
#[derive(Clone, Copy, Debug)]
pub struct ParseOptions {
    /// Memoize named-rule outcomes per offset (packrat parsing). Turning it
    /// off yields plain recursive descent with identical results; the trade
    /// is memory for re-matching under heavy backtracking.
    pub packrat: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { packrat: true }
    }
}

/// Mutable state threaded through one parse: the memo table, the options the
/// parse was started with, and the separator designation captured at entry so
/// the whole parse sees one consistent separator without touching the global
/// slot again. One context never outlives its `parse` call and is never
/// shared across threads.
pub(crate) struct ParseCtx<'a> {
    pub memo: MemoTable<'a>,
    pub packrat: bool,
    pub separator: Option<&'static Rule>,
}

impl ParseCtx<'_> {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            memo: MemoTable::new(),
            packrat: options.packrat,
            separator: crate::rule::current_separator(),
        }
    }
}

/// Run `rule` against `input` from the beginning. On success returns the root
/// node, whose tag is the rule's tag and whose span covers exactly the
/// matched bytes; on failure returns `None` with no partial tree.
///
/// The match is not anchored to end of input; compose `boi() & top & eoi()`
/// for that. The returned tree borrows from `input`.
pub fn parse<'i, I>(rule: &'static Rule, input: &'i I) -> Option<CSTNode<'i>>
where
    I: Input + ?Sized,
{
    parse_with_options(rule, input, ParseOptions::default())
}

/// [`parse`], with explicit [`ParseOptions`].
pub fn parse_with_options<'i, I>(
    rule: &'static Rule,
    input: &'i I,
    options: ParseOptions,
) -> Option<CSTNode<'i>>
where
    I: Input + ?Sized,
{
    let mut cursor = Cursor::new(input.as_bytes());
    parse_at(rule, &mut cursor, options)
}

/// Run `rule` at an existing cursor. On success the cursor is left at the end
/// of the match; on failure it is restored to where it was. This is the entry
/// to use when a caller needs to observe consumption or continue scanning
/// after the match.
///
/// Panics if `rule` is silent: a silent top rule has no node to return.
pub fn parse_at<'i>(
    rule: &'static Rule,
    cursor: &mut Cursor<'i>,
    options: ParseOptions,
) -> Option<CSTNode<'i>> {
    assert!(
        !rule.is_silent(),
        "top rule `{}` must not be silent",
        rule.name()
    );
    let mut ctx = ParseCtx::new(options);
    let mut out = Vec::new();
    let matched = rule.attempt(cursor, &mut out, &mut ctx);
    trace!(
        rule = rule.name(),
        matched,
        end = cursor.offset(),
        memo_entries = ctx.memo.len(),
        "parse finished"
    );
    if matched {
        debug_assert_eq!(out.len(), 1);
        out.pop()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StringInput;
    use crate::matchers::{eoi, lit, one, plus, range, star};
    use crate::{boi, rule};

    rule! { digits = plus(range(b'0'..=b'9')) }
    rule! { silent silent_digits = plus(range(b'0'..=b'9')) }

    #[test]
    fn parse_returns_root_with_rule_tag() {
        let tree = parse(&digits, "123").expect("should match");
        assert_eq!(tree.tag(), digits.tag());
        assert_eq!(tree.as_bytes(), b"123");
        assert_eq!(tree.start(), 0);
        assert_eq!(tree.end(), 3);
    }

    #[test]
    fn parse_failure_returns_none() {
        assert!(parse(&digits, "abc").is_none());
        assert!(parse(&digits, "").is_none());
    }

    #[test]
    fn parse_does_not_anchor_to_end() {
        let tree = parse(&digits, "12ab").expect("should match the prefix");
        assert_eq!(tree.as_bytes(), b"12");
    }

    rule! { anchored = boi() & &digits & eoi() }

    #[test]
    fn explicit_anchoring_rejects_trailing_input() {
        assert!(parse(&anchored, "12").is_some());
        assert!(parse(&anchored, "12ab").is_none());
    }

    #[test]
    #[should_panic(expected = "must not be silent")]
    fn silent_top_rule_panics() {
        let _ = parse(&silent_digits, "123");
    }

    #[test]
    fn parse_at_reports_consumption() {
        let mut cursor = Cursor::new(b"42!");
        let tree = parse_at(&digits, &mut cursor, ParseOptions::default()).expect("should match");
        assert_eq!(cursor.offset(), 2);
        assert_eq!(tree.end(), 2);
        assert_eq!(cursor.peek(), b'!');
    }

    #[test]
    fn parse_at_restores_cursor_on_failure() {
        let mut cursor = Cursor::new(b"ab");
        cursor.advance(1);
        let before = cursor.pos();
        assert!(parse_at(&digits, &mut cursor, ParseOptions::default()).is_none());
        assert_eq!(cursor.pos(), before);
    }

    #[test]
    fn owned_and_borrowed_inputs_agree() {
        let owned = StringInput::new("777");
        let from_owned = parse(&digits, &owned).expect("should match");
        let from_str = parse(&digits, "777").expect("should match");
        assert_eq!(from_owned.text(), from_str.text());
        assert_eq!(from_owned.tag(), from_str.tag());
    }

    rule! { letter = one("abcdefghijklmnopqrstuvwxyz") }
    rule! { letters = &letter & star(&letter) & lit("!") }

    #[test]
    fn packrat_and_descent_agree() {
        for input in ["a!", "abc!", "abc", ""] {
            let packrat = parse_with_options(&letters, input, ParseOptions { packrat: true });
            let descent = parse_with_options(&letters, input, ParseOptions { packrat: false });
            assert_eq!(packrat, descent);
        }
    }
}
