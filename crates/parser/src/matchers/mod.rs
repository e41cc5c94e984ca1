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
use crate::input::Cursor;
use crate::parse::ParseCtx;
use crate::rule::Rule;
use std::ops::{BitAnd, BitOr, Neg, Not};

mod combinator;
mod compound;
mod primitive;

pub use combinator::{at, join, list, list_pad, not_at, opt, plus, star};
pub use compound::{ident, ident_first, ident_other, keyword};
pub use primitive::{boi, bol, eoi, eol, lit, one, range, ranges};

/// A matching expression: one primitive, or a fixed algebraic combination of
/// sub-expressions. Values of this type are the bodies of named rules.
///
/// Matchers obey a single contract: `attempt` either succeeds, leaving the
/// cursor at the end of the match and any produced child nodes appended to
/// the scratchpad, or fails, leaving both exactly as they were. Matchers
/// never produce nodes themselves; only named rules wrap spans into
/// [`CSTNode`]s, which is why tree shape follows naming, not grouping.
#[derive(Clone, Debug, PartialEq)]
pub enum Matcher {
    /// Begin of input. Zero-width.
    Boi,
    /// End of input. Zero-width.
    Eoi,
    /// Begin of line (column 0). Zero-width.
    Bol,
    /// End of line: `\n` or `\r\n`. A lone `\r` does not match.
    Eol,
    /// Any one byte of the set.
    One(Vec<u8>),
    /// An exact byte sequence.
    Lit(Vec<u8>),
    /// A byte within any of the closed intervals, or equal to the singleton.
    Range {
        ranges: Vec<(u8, u8)>,
        singleton: Option<u8>,
    },
    /// Ordered sequence; all must match in order. Kept flat: composing
    /// sequences splices rather than nests, so grouping parentheses cannot
    /// change tree shape.
    Seq(Vec<Matcher>),
    /// Ordered choice; first success wins and is committed. Kept flat like
    /// [`Matcher::Seq`].
    Sor(Vec<Matcher>),
    /// Optional; always succeeds.
    Opt(Box<Matcher>),
    /// Zero or more; always succeeds.
    Star(Box<Matcher>),
    /// One or more; fails iff the first attempt fails.
    Plus(Box<Matcher>),
    /// And-predicate: match without consuming, emit nothing.
    At(Box<Matcher>),
    /// Not-predicate: succeed iff the body does not match here.
    NotAt(Box<Matcher>),
    /// Injection point for the designated separator rule. Matches empty when
    /// no separator is designated.
    Sep,
    /// Reference to a named rule. This indirection is what lets rule graphs
    /// be cyclic.
    Call(&'static Rule),
}

impl Matcher {
    /// Try to match at the cursor. On success the cursor has advanced over
    /// the match and produced children (if any) are appended to `out`; on
    /// failure both are untouched.
    pub(crate) fn attempt<'a>(
        &self,
        cur: &mut Cursor<'a>,
        out: &mut Vec<CSTNode<'a>>,
        ctx: &mut ParseCtx<'a>,
    ) -> bool {
        match self {
            Matcher::Boi => cur.is_boi(),
            Matcher::Eoi => cur.is_eoi(),
            Matcher::Bol => cur.column() == 0,
            Matcher::Eol => primitive::match_eol(cur),
            Matcher::One(set) => primitive::match_one(set, cur),
            Matcher::Lit(bytes) => primitive::match_lit(bytes, cur),
            Matcher::Range { ranges, singleton } => {
                primitive::match_range(ranges, *singleton, cur)
            }
            Matcher::Seq(items) => combinator::match_seq(items, cur, out, ctx),
            Matcher::Sor(items) => combinator::match_sor(items, cur, out, ctx),
            Matcher::Opt(body) => {
                body.attempt(cur, out, ctx);
                true
            }
            Matcher::Star(body) => {
                combinator::match_star(body, cur, out, ctx);
                true
            }
            Matcher::Plus(body) => {
                let offset = cur.offset();
                if !body.attempt(cur, out, ctx) {
                    return false;
                }
                // A zero-consumption first match ends the repetition too.
                if cur.offset() > offset {
                    combinator::match_star(body, cur, out, ctx);
                }
                true
            }
            Matcher::At(body) => combinator::match_predicate(body, cur, ctx),
            Matcher::NotAt(body) => !combinator::match_predicate(body, cur, ctx),
            Matcher::Sep => crate::rule::attempt_separator(cur, out, ctx),
            Matcher::Call(rule) => rule.attempt(cur, out, ctx),
        }
    }
}

/// Conversion into a [`Matcher`], so combinators and operators accept both
/// matcher values and `&'static Rule` references interchangeably.
pub trait IntoMatcher {
    fn into_matcher(self) -> Matcher;

    /// Sequence with separator injection: `a.and_sep(b)` composes
    /// `a`, the separator injection point, then `b`, splicing flat with any
    /// surrounding sequence. With a separator designated this means
    /// `a & sep & b`; with none it degrades to `a & b`.
    fn and_sep(self, rhs: impl IntoMatcher) -> Matcher
    where
        Self: Sized,
    {
        seq_join(
            seq_join(self.into_matcher(), Matcher::Sep),
            rhs.into_matcher(),
        )
    }
}

impl IntoMatcher for Matcher {
    fn into_matcher(self) -> Matcher {
        self
    }
}

impl IntoMatcher for &'static Rule {
    fn into_matcher(self) -> Matcher {
        Matcher::Call(self)
    }
}

/// Compose a sequence, splicing existing sequences flat on both sides.
pub(crate) fn seq_join(lhs: Matcher, rhs: Matcher) -> Matcher {
    match (lhs, rhs) {
        (Matcher::Seq(mut items), Matcher::Seq(tail)) => {
            items.extend(tail);
            Matcher::Seq(items)
        }
        (Matcher::Seq(mut items), rhs) => {
            items.push(rhs);
            Matcher::Seq(items)
        }
        (lhs, Matcher::Seq(tail)) => {
            let mut items = Vec::with_capacity(tail.len() + 1);
            items.push(lhs);
            items.extend(tail);
            Matcher::Seq(items)
        }
        (lhs, rhs) => Matcher::Seq(vec![lhs, rhs]),
    }
}

/// Compose an ordered choice, splicing existing choices flat on both sides.
pub(crate) fn sor_join(lhs: Matcher, rhs: Matcher) -> Matcher {
    match (lhs, rhs) {
        (Matcher::Sor(mut items), Matcher::Sor(tail)) => {
            items.extend(tail);
            Matcher::Sor(items)
        }
        (Matcher::Sor(mut items), rhs) => {
            items.push(rhs);
            Matcher::Sor(items)
        }
        (lhs, Matcher::Sor(tail)) => {
            let mut items = Vec::with_capacity(tail.len() + 1);
            items.push(lhs);
            items.extend(tail);
            Matcher::Sor(items)
        }
        (lhs, rhs) => Matcher::Sor(vec![lhs, rhs]),
    }
}

impl<R: IntoMatcher> BitAnd<R> for Matcher {
    type Output = Matcher;

    fn bitand(self, rhs: R) -> Matcher {
        seq_join(self, rhs.into_matcher())
    }
}

impl<R: IntoMatcher> BitAnd<R> for &'static Rule {
    type Output = Matcher;

    fn bitand(self, rhs: R) -> Matcher {
        seq_join(Matcher::Call(self), rhs.into_matcher())
    }
}

impl<R: IntoMatcher> BitOr<R> for Matcher {
    type Output = Matcher;

    fn bitor(self, rhs: R) -> Matcher {
        sor_join(self, rhs.into_matcher())
    }
}

impl<R: IntoMatcher> BitOr<R> for &'static Rule {
    type Output = Matcher;

    fn bitor(self, rhs: R) -> Matcher {
        sor_join(Matcher::Call(self), rhs.into_matcher())
    }
}

impl Not for Matcher {
    type Output = Matcher;

    fn not(self) -> Matcher {
        Matcher::NotAt(Box::new(self))
    }
}

impl Not for &'static Rule {
    type Output = Matcher;

    fn not(self) -> Matcher {
        Matcher::NotAt(Box::new(Matcher::Call(self)))
    }
}

impl Neg for Matcher {
    type Output = Matcher;

    fn neg(self) -> Matcher {
        Matcher::Opt(Box::new(self))
    }
}

impl Neg for &'static Rule {
    type Output = Matcher;

    fn neg(self) -> Matcher {
        Matcher::Opt(Box::new(Matcher::Call(self)))
    }
}
