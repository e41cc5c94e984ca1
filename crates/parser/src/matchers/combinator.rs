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

use super::{IntoMatcher, Matcher, seq_join};
use crate::cst::CSTNode;
use crate::input::Cursor;
use crate::parse::ParseCtx;

/// PEG optional `e?`: attempt the body, succeed either way. Children emitted
/// by a successful body are kept.
pub fn opt(body: impl IntoMatcher) -> Matcher {
    Matcher::Opt(Box::new(body.into_matcher()))
}

/// PEG zero-or-more `e*`: repeat the body until it fails. Always succeeds.
pub fn star(body: impl IntoMatcher) -> Matcher {
    Matcher::Star(Box::new(body.into_matcher()))
}

/// PEG one-or-more `e+`: like [`star`], but fails if the first attempt fails.
pub fn plus(body: impl IntoMatcher) -> Matcher {
    Matcher::Plus(Box::new(body.into_matcher()))
}

/// PEG and-predicate `&e`: succeed iff the body matches here, consuming
/// nothing and emitting nothing.
pub fn at(body: impl IntoMatcher) -> Matcher {
    Matcher::At(Box::new(body.into_matcher()))
}

/// PEG not-predicate `!e`: succeed iff the body does not match here,
/// consuming nothing and emitting nothing.
pub fn not_at(body: impl IntoMatcher) -> Matcher {
    Matcher::NotAt(Box::new(body.into_matcher()))
}

/// `item` separated by `sep`: `item & *(sep & item)`.
pub fn list(item: impl IntoMatcher, sep: impl IntoMatcher) -> Matcher {
    let item = item.into_matcher();
    item.clone() & star(sep.into_matcher() & item)
}

/// `item` separated by `sep` with `pad` on both sides of each separator:
/// `item & *((pad & sep & pad) & item)`.
pub fn list_pad(
    item: impl IntoMatcher,
    sep: impl IntoMatcher,
    pad: impl IntoMatcher,
) -> Matcher {
    let item = item.into_matcher();
    let pad = pad.into_matcher();
    item.clone() & star((pad.clone() & sep.into_matcher() & pad) & item)
}

/// `first`, then each of `rest` prefixed by `sep`:
/// `first & (sep & rest[0]) & (sep & rest[1]) & ...`.
pub fn join(
    sep: impl IntoMatcher,
    first: impl IntoMatcher,
    rest: impl IntoIterator<Item = Matcher>,
) -> Matcher {
    let sep = sep.into_matcher();
    let mut acc = first.into_matcher();
    for item in rest {
        acc = seq_join(acc, sep.clone() & item);
    }
    acc
}

pub(super) fn match_seq<'a>(
    items: &[Matcher],
    cur: &mut Cursor<'a>,
    out: &mut Vec<CSTNode<'a>>,
    ctx: &mut ParseCtx<'a>,
) -> bool {
    let entry = cur.pos();
    let mark = out.len();
    for item in items {
        if !item.attempt(cur, out, ctx) {
            cur.jump(entry);
            out.truncate(mark);
            return false;
        }
    }
    true
}

pub(super) fn match_sor<'a>(
    items: &[Matcher],
    cur: &mut Cursor<'a>,
    out: &mut Vec<CSTNode<'a>>,
    ctx: &mut ParseCtx<'a>,
) -> bool {
    // Each alternative restores on its own failure, so every alternative sees
    // the original cursor; the first success is committed.
    items.iter().any(|item| item.attempt(cur, out, ctx))
}

/// Repetition loop shared by `Star` and `Plus`. An iteration that consumes no
/// bytes ends the loop: a zero-consumption success at the same offset can
/// only recur identically, even when the body is a named rule that wraps a
/// node per pass. The match is kept once.
pub(super) fn match_star<'a>(
    body: &Matcher,
    cur: &mut Cursor<'a>,
    out: &mut Vec<CSTNode<'a>>,
    ctx: &mut ParseCtx<'a>,
) {
    loop {
        let offset = cur.offset();
        if !body.attempt(cur, out, ctx) {
            return;
        }
        if cur.offset() == offset {
            return;
        }
    }
}

/// Predicate body run: match against a discarded scratchpad, restore the
/// cursor unconditionally, report whether the body matched.
pub(super) fn match_predicate<'a>(
    body: &Matcher,
    cur: &mut Cursor<'a>,
    ctx: &mut ParseCtx<'a>,
) -> bool {
    let entry = cur.pos();
    let mut scratch = Vec::new();
    let matched = body.attempt(cur, &mut scratch, ctx);
    cur.jump(entry);
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{lit, one};
    use crate::parse::ParseOptions;

    fn run(m: &Matcher, input: &[u8]) -> (bool, usize) {
        let mut cur = Cursor::new(input);
        let mut out = Vec::new();
        let mut ctx = ParseCtx::new(ParseOptions::default());
        let ok = m.attempt(&mut cur, &mut out, &mut ctx);
        (ok, cur.offset())
    }

    #[test]
    fn seq_is_all_or_nothing() {
        let m = one("a") & one("b") & one("c");
        assert_eq!(run(&m, b"abc"), (true, 3));
        assert_eq!(run(&m, b"abx"), (false, 0));
        assert_eq!(run(&m, b"a"), (false, 0));
    }

    #[test]
    fn sor_commits_to_first_success() {
        let m = lit("ab") | lit("a");
        assert_eq!(run(&m, b"ab"), (true, 2));
        assert_eq!(run(&m, b"ac"), (true, 1));
        assert_eq!(run(&m, b"x"), (false, 0));
    }

    #[test]
    fn opt_always_succeeds() {
        let m = opt(lit("ab"));
        assert_eq!(run(&m, b"ab"), (true, 2));
        assert_eq!(run(&m, b"xy"), (true, 0));
        assert_eq!(run(&m, b""), (true, 0));
    }

    #[test]
    fn star_consumes_all_repeats() {
        let m = star(lit("ab"));
        assert_eq!(run(&m, b"ababab"), (true, 6));
        assert_eq!(run(&m, b"abx"), (true, 2));
        assert_eq!(run(&m, b""), (true, 0));
    }

    #[test]
    fn plus_requires_one() {
        let m = plus(lit("ab"));
        assert_eq!(run(&m, b"abab"), (true, 4));
        assert_eq!(run(&m, b""), (false, 0));
        assert_eq!(run(&m, b"x"), (false, 0));
    }

    #[test]
    fn star_of_zero_width_terminates() {
        let m = star(opt(one("x")));
        assert_eq!(run(&m, b""), (true, 0));
        assert_eq!(run(&m, b"xxy"), (true, 2));
    }

    // A regular named rule wraps a node on every success, zero-width ones
    // included; the repetition must still stop after one such pass.
    crate::rule! { at_input_end = crate::matchers::eoi() }

    #[test]
    fn repetition_of_zero_width_named_rule_keeps_one_match() {
        let mut cur = Cursor::new(b"");
        let mut out = Vec::new();
        let mut ctx = ParseCtx::new(ParseOptions::default());
        assert!(star(&at_input_end).attempt(&mut cur, &mut out, &mut ctx));
        assert_eq!(cur.offset(), 0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tag(), at_input_end.tag());

        let mut cur = Cursor::new(b"");
        let mut out = Vec::new();
        let mut ctx = ParseCtx::new(ParseOptions::default());
        assert!(plus(&at_input_end).attempt(&mut cur, &mut out, &mut ctx));
        assert_eq!(cur.offset(), 0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].tag(), at_input_end.tag());
    }

    #[test]
    fn predicates_never_consume() {
        let m = at(lit("ab"));
        assert_eq!(run(&m, b"ab"), (true, 0));
        assert_eq!(run(&m, b"ax"), (false, 0));

        let m = !lit("ab");
        assert_eq!(run(&m, b"ab"), (false, 0));
        assert_eq!(run(&m, b"ax"), (true, 0));
    }

    #[test]
    fn list_matches_separated_items() {
        let m = list(one("0123456789"), one(","));
        assert_eq!(run(&m, b"1,2,3"), (true, 5));
        assert_eq!(run(&m, b"1"), (true, 1));
        // A trailing separator is not consumed.
        assert_eq!(run(&m, b"1,2,"), (true, 3));
    }

    #[test]
    fn join_requires_every_piece() {
        let m = join(one(","), one("a"), vec![one("b"), one("c")]);
        assert_eq!(run(&m, b"a,b,c"), (true, 5));
        assert_eq!(run(&m, b"a,b"), (false, 0));
    }
}
