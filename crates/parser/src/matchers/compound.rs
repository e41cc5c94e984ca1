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

use super::combinator::star;
use super::primitive::{lit, ranges};
use super::Matcher;

/// First byte of an identifier: `[a-zA-Z_]`.
pub fn ident_first() -> Matcher {
    ranges(b"azAZ_")
}

/// Any identifier byte after the first: `[a-zA-Z0-9_]`.
pub fn ident_other() -> Matcher {
    ranges(b"azAZ09_")
}

/// A whole identifier: `ident_first` then any number of `ident_other`.
pub fn ident() -> Matcher {
    ident_first() & star(ident_other())
}

/// An exact word with an identifier boundary after it, so `keyword("if")`
/// matches `if` but not the prefix of `iffy`.
pub fn keyword(word: impl AsRef<[u8]>) -> Matcher {
    lit(word) & !ident_other()
}
