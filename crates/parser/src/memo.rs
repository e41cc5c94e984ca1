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
use crate::input::Pos;
use crate::tag::RuleTag;
use ahash::AHashMap;

/// Recorded outcome of one named-rule attempt at one offset: whether it
/// matched, where it ended, and the nodes it pushed onto its caller's
/// scratchpad (one wrapped node for a regular rule, the inlined children for
/// a silent one).
#[derive(Clone, Debug)]
pub(crate) struct MemoEntry<'a> {
    pub success: bool,
    pub end: Pos,
    pub children: Vec<CSTNode<'a>>,
}

/// Packrat memo table, keyed by `(offset, rule key)`. Populated only at
/// named-rule entry points; primitives and combinators are never memoized.
/// The key is the rule's internal registry key rather than its public tag, so
/// distinct silent rules (which all expose `NO_RULE`) keep distinct entries.
///
/// One table lives for exactly one `parse` call. Size is bounded by
/// input length x named-rule count; no eviction.
#[derive(Debug, Default)]
pub(crate) struct MemoTable<'a> {
    entries: AHashMap<(usize, RuleTag), MemoEntry<'a>>,
}

impl<'a> MemoTable<'a> {
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    pub fn lookup(&self, offset: usize, key: RuleTag) -> Option<&MemoEntry<'a>> {
        self.entries.get(&(offset, key))
    }

    pub fn record(&mut self, offset: usize, key: RuleTag, entry: MemoEntry<'a>) {
        self.entries.insert((offset, key), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
