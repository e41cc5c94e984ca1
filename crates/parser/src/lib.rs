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

mod cst;
mod input;
mod matchers;
mod memo;
mod parse;
mod rule;
mod tag;


pub use crate::cst::{CSTNode, CSTSpan};
pub use crate::input::{BytesInput, Cursor, Input, Pos, StringInput};
pub use crate::matchers::{
    IntoMatcher, Matcher, at, boi, bol, eoi, eol, ident, ident_first, ident_other, join, keyword,
    list, list_pad, lit, not_at, one, opt, plus, range, ranges, star,
};
pub use crate::parse::{ParseOptions, parse, parse_at, parse_with_options};
pub use crate::rule::{Rule, clear_separator, set_separator};
pub use crate::tag::{NO_RULE, RuleTag, tag_name};

// Used by the declaration macros.
#[doc(hidden)]
pub use paste as __paste;
