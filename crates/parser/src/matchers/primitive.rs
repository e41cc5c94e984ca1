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

use super::Matcher;
use crate::input::Cursor;
use std::ops::RangeInclusive;

/// Match the beginning of input. Consumes nothing.
pub fn boi() -> Matcher {
    Matcher::Boi
}

/// Match the end of input. Consumes nothing.
pub fn eoi() -> Matcher {
    Matcher::Eoi
}

/// Match at column 0, i.e. the beginning of a line. Consumes nothing.
pub fn bol() -> Matcher {
    Matcher::Bol
}

/// Match and consume a line ending, `\n` or `\r\n`. A `\r` not followed by
/// `\n` does not match.
pub fn eol() -> Matcher {
    Matcher::Eol
}

/// Match and consume any one byte of `set`. `one("abc")` is `[abc]` in PEG
/// notation.
pub fn one(set: impl AsRef<[u8]>) -> Matcher {
    let set = set.as_ref().to_vec();
    debug_assert!(!set.is_empty(), "one() requires a non-empty byte set");
    Matcher::One(set)
}

/// Match and consume an exact byte sequence. `lit("abcd")` is `"abcd"` in PEG
/// notation. A one-byte literal is the same matcher as `one` of that byte.
pub fn lit(bytes: impl AsRef<[u8]>) -> Matcher {
    let bytes = bytes.as_ref().to_vec();
    if bytes.len() == 1 {
        Matcher::One(bytes)
    } else {
        Matcher::Lit(bytes)
    }
}

/// Match and consume one byte within a closed interval. `range(b'0'..=b'9')`
/// is `[0-9]`.
pub fn range(interval: RangeInclusive<u8>) -> Matcher {
    let (lo, hi) = interval.into_inner();
    debug_assert!(lo <= hi, "invalid range");
    Matcher::Range {
        ranges: vec![(lo, hi)],
        singleton: None,
    }
}

/// Match and consume one byte within any of several closed intervals, given
/// as consecutive bound pairs with an optional trailing singleton:
/// `ranges(b"azAZ")` is `[a-zA-Z]`, `ranges(b"azAZ_")` is `[a-zA-Z_]`.
pub fn ranges(bounds: impl AsRef<[u8]>) -> Matcher {
    let bounds = bounds.as_ref();
    debug_assert!(!bounds.is_empty(), "ranges() requires at least one bound");
    let mut intervals = Vec::with_capacity(bounds.len() / 2);
    let mut singleton = None;
    for pair in bounds.chunks(2) {
        if let &[lo, hi] = pair {
            debug_assert!(lo <= hi, "invalid range");
            intervals.push((lo, hi));
        } else {
            singleton = Some(pair[0]);
        }
    }
    Matcher::Range {
        ranges: intervals,
        singleton,
    }
}

pub(super) fn match_eol(cur: &mut Cursor) -> bool {
    match cur.peek() {
        b'\n' => {
            cur.advance(1);
            true
        }
        b'\r' if cur.peek_at(1) == b'\n' => {
            cur.advance(2);
            true
        }
        _ => false,
    }
}

pub(super) fn match_one(set: &[u8], cur: &mut Cursor) -> bool {
    if cur.is_eoi() {
        return false;
    }
    if set.contains(&cur.peek()) {
        cur.advance(1);
        true
    } else {
        false
    }
}

pub(super) fn match_lit(bytes: &[u8], cur: &mut Cursor) -> bool {
    if cur.rest().starts_with(bytes) {
        cur.advance(bytes.len());
        true
    } else {
        false
    }
}

pub(super) fn match_range(intervals: &[(u8, u8)], singleton: Option<u8>, cur: &mut Cursor) -> bool {
    if cur.is_eoi() {
        return false;
    }
    let b = cur.peek();
    if intervals.iter().any(|&(lo, hi)| lo <= b && b <= hi) || singleton == Some(b) {
        cur.advance(1);
        true
    } else {
        false
    }
}
