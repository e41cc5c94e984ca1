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

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Mutex;

/// Stable identity of a named rule. Tags are handed out by a process-global
/// registry the first time a rule is touched, so uniqueness holds by
/// construction rather than by hashing. Tags are opaque: compare them, key
/// maps with them, resolve them back to a name with [`tag_name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct RuleTag(pub(crate) u64);

/// Reserved sentinel: the tag silent rules expose. Never appears in a tree
/// and is never assigned by the registry.
pub const NO_RULE: RuleTag = RuleTag(u64::MAX);

impl RuleTag {
    pub fn is_no_rule(&self) -> bool {
        *self == NO_RULE
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tag_name(*self) {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "<no rule>"),
        }
    }
}

static REGISTRY: Lazy<Mutex<Vec<&'static str>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Assign the next sequential tag for `name`. Called once per named rule,
/// from the rule's lazy identity slot.
pub(crate) fn register(name: &'static str) -> RuleTag {
    let mut registry = REGISTRY.lock().expect("rule tag registry poisoned");
    let tag = RuleTag(registry.len() as u64);
    registry.push(name);
    tag
}

/// The declared name behind a tag, or `None` for [`NO_RULE`] and tags not
/// issued by the registry.
pub fn tag_name(tag: RuleTag) -> Option<&'static str> {
    if tag == NO_RULE {
        return None;
    }
    let registry = REGISTRY.lock().expect("rule tag registry poisoned");
    registry.get(tag.0 as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_assigns_distinct_tags_and_remembers_names() {
        let a = register("alpha_test_rule");
        let b = register("beta_test_rule");
        assert_ne!(a, b);
        assert_eq!(tag_name(a), Some("alpha_test_rule"));
        assert_eq!(tag_name(b), Some("beta_test_rule"));
    }

    #[test]
    fn no_rule_is_reserved() {
        assert!(NO_RULE.is_no_rule());
        assert_eq!(tag_name(NO_RULE), None);
        assert_eq!(format!("{NO_RULE}"), "<no rule>");
    }
}
