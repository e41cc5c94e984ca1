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

//! The arithmetic grammar: sums over products over values, parentheses for
//! grouping, a silent `blank` rule designated as the ambient separator so
//! whitespace is tolerated between terms.

use sprig_parser::{
    IntoMatcher, boi, define_rule, eoi, one, plus, range, rule, set_separator, star,
};

rule! { pub silent blank = star(one(" \t\r\n")) }

rule! { pub num = plus(range(b'0'..=b'9')) }

rule! { pub value = &num | one("(").and_sep(&expr).and_sep(one(")")) }

rule! { pub product_op = one("*/") }
rule! { pub product = &value & star((&blank & &product_op).and_sep(&value)) }

rule! { pub sum_op = one("+-") }
rule! { pub sum = &product & star((&blank & &sum_op).and_sep(&product)) }

rule! { pub expr }
define_rule! { expr = &sum }

/// Whole-input entry point: anchored on both ends, surrounding whitespace
/// allowed.
rule! { pub grammar = boi() & &blank & &expr & &blank & eoi() }

/// Designate `blank` as the separator injected between `and_sep`-composed
/// terms. Call once before parsing.
pub fn install() {
    set_separator(&blank);
}
