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

use crate::cst::{CSTNode, CSTSpan};
use crate::input::Cursor;
use crate::matchers::Matcher;
use crate::memo::MemoEntry;
use crate::parse::ParseCtx;
use crate::tag::{NO_RULE, RuleTag, register};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::RwLock;
use tracing::trace;

/// A named grammar rule: a stable identity, a silence flag, and a matcher
/// body. Rules are `static`s produced by the [`rule!`] / [`define_rule!`]
/// macros; bodies refer to other rules through `&'static Rule`, and both the
/// body and the identity are resolved lazily on first use, which is what lets
/// mutually recursive rule graphs compose.
///
/// Named rules are the only construct that produces [`CSTNode`]s. A regular
/// rule wraps the children its body collected into one node spanning the
/// match; a silent rule passes the children through to its caller unwrapped.
pub struct Rule {
    name: &'static str,
    silent: bool,
    build: fn() -> Matcher,
    body: OnceCell<Matcher>,
    key: OnceCell<RuleTag>,
}

impl Rule {
    /// Back a regular (node-producing) rule. Use through [`rule!`].
    pub const fn new(name: &'static str, build: fn() -> Matcher) -> Self {
        Self {
            name,
            silent: false,
            build,
            body: OnceCell::new(),
            key: OnceCell::new(),
        }
    }

    /// Back a silent rule. Use through [`rule!`].
    pub const fn new_silent(name: &'static str, build: fn() -> Matcher) -> Self {
        Self {
            name,
            silent: true,
            build,
            body: OnceCell::new(),
            key: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// The rule's public tag: stable for the life of the process, `NO_RULE`
    /// for silent rules.
    pub fn tag(&self) -> RuleTag {
        if self.silent { NO_RULE } else { self.key() }
    }

    /// Internal identity, distinct for every rule including silent ones.
    /// Memoization keys on this, never on the public tag.
    pub(crate) fn key(&self) -> RuleTag {
        *self.key.get_or_init(|| register(self.name))
    }

    fn body(&self) -> &Matcher {
        self.body.get_or_init(self.build)
    }

    /// Attempt this rule at the cursor: consult the memo, run the body into a
    /// local scratchpad, then wrap (regular) or inline (silent) the collected
    /// children into the caller's scratchpad.
    pub(crate) fn attempt<'a>(
        &self,
        cur: &mut Cursor<'a>,
        out: &mut Vec<CSTNode<'a>>,
        ctx: &mut ParseCtx<'a>,
    ) -> bool {
        let entry = cur.pos();
        let key = self.key();

        if ctx.packrat {
            if let Some(hit) = ctx.memo.lookup(entry.offset(), key) {
                trace!(
                    rule = self.name,
                    offset = entry.offset(),
                    success = hit.success,
                    "memo hit"
                );
                let success = hit.success;
                let end = hit.end;
                let children = hit.children.clone();
                if success {
                    cur.jump(end);
                    out.extend(children);
                }
                return success;
            }
        }

        let mut local: Vec<CSTNode<'a>> = Vec::new();
        if self.body().attempt(cur, &mut local, ctx) {
            let mut produced = if self.silent {
                local
            } else {
                let span = CSTSpan {
                    text: cur.slice_from(entry),
                    start: entry.offset(),
                    line: entry.line(),
                    column: entry.column(),
                };
                vec![CSTNode::new(self.tag(), span, local)]
            };
            if ctx.packrat {
                out.extend(produced.iter().cloned());
                ctx.memo.record(
                    entry.offset(),
                    key,
                    MemoEntry {
                        success: true,
                        end: cur.pos(),
                        children: produced,
                    },
                );
            } else {
                out.append(&mut produced);
            }
            true
        } else {
            cur.jump(entry);
            if ctx.packrat {
                ctx.memo.record(
                    entry.offset(),
                    key,
                    MemoEntry {
                        success: false,
                        end: entry,
                        children: Vec::new(),
                    },
                );
            }
            false
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("silent", &self.silent)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Rules are statics; two rule references are the same rule iff they point at
/// the same static.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Rule {}

static SEPARATOR: RwLock<Option<&'static Rule>> = RwLock::new(None);

/// Designate `rule` as the ambient separator injected at every
/// [`IntoMatcher::and_sep`](crate::IntoMatcher::and_sep) position. Only one
/// separator is active at a time; designating again replaces the previous
/// one. Silent separators are the common case, since they contribute nothing
/// to the tree.
pub fn set_separator(rule: &'static Rule) {
    *SEPARATOR.write().expect("separator designation poisoned") = Some(rule);
}

/// Remove the ambient separator; `and_sep` degrades to plain sequencing.
pub fn clear_separator() {
    *SEPARATOR.write().expect("separator designation poisoned") = None;
}

/// The currently designated separator. Read once per parse, at driver entry.
pub(crate) fn current_separator() -> Option<&'static Rule> {
    *SEPARATOR.read().expect("separator designation poisoned")
}

/// Run the separator captured by this parse at a `Sep` injection point, or
/// match empty when none is designated. The separator rule is a normal rule
/// in every respect; this is exactly an explicit reference to it.
pub(crate) fn attempt_separator<'a>(
    cur: &mut Cursor<'a>,
    out: &mut Vec<CSTNode<'a>>,
    ctx: &mut ParseCtx<'a>,
) -> bool {
    match ctx.separator {
        Some(rule) => rule.attempt(cur, out, ctx),
        None => true,
    }
}

/// Declare a named rule, optionally defining its body in place.
///
/// ```
/// use sprig_parser::{define_rule, one, parse, rule, star};
///
/// rule! { expr }                                  // declare only
/// rule! { digits = star(one("0123456789")) }      // declare and define
/// rule! { silent ws = star(one(" \t")) }          // silent flavor
/// define_rule! { expr = &digits }                 // define the declaration
///
/// assert!(parse(&expr, "17").is_some());
/// ```
///
/// A declaration compiles only if a matching body exists in the same scope —
/// either inline or via [`define_rule!`] — and a second definition for the
/// same name is a duplicate-item compile error, so a rule is always defined
/// exactly once. Bodies may refer to rules declared later; resolution happens
/// through the rule statics, not at declaration time.
#[macro_export]
macro_rules! rule {
    ($(#[$meta:meta])* $vis:vis silent $name:ident = $body:expr) => {
        $crate::rule! { $(#[$meta])* $vis silent $name }
        $crate::define_rule! { $name = $body }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident = $body:expr) => {
        $crate::rule! { $(#[$meta])* $vis $name }
        $crate::define_rule! { $name = $body }
    };
    ($(#[$meta:meta])* $vis:vis silent $name:ident) => {
        $crate::__paste::paste! {
            $(#[$meta])*
            #[allow(non_upper_case_globals)]
            $vis static $name: $crate::Rule =
                $crate::Rule::new_silent(stringify!($name), [<__ $name _body>]);
        }
    };
    ($(#[$meta:meta])* $vis:vis $name:ident) => {
        $crate::__paste::paste! {
            $(#[$meta])*
            #[allow(non_upper_case_globals)]
            $vis static $name: $crate::Rule =
                $crate::Rule::new(stringify!($name), [<__ $name _body>]);
        }
    };
}

/// Define the body of a rule declared (without a body) by [`rule!`]. Must
/// live in the same scope as the declaration.
#[macro_export]
macro_rules! define_rule {
    ($name:ident = $body:expr) => {
        $crate::__paste::paste! {
            #[doc(hidden)]
            fn [<__ $name _body>]() -> $crate::Matcher {
                $crate::IntoMatcher::into_matcher($body)
            }
        }
    };
}
