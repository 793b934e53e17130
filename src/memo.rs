//! §4.E — the packrat memo layer: one mapping per grammar rule from
//! parser-position at rule entry to the cached result.
//!
//! Grounded on `examples/original_source/pkg/parser/parser.go`'s
//! `memoParseX` wrappers, which each keep a `map[int]*T`; this crate
//! factors the repeated wrapper shape into one generic type, and every
//! grammar/code-block rule owns one field of it (see `grammar::parser`,
//! `codeblock::parser`), matching the teacher's explicit struct-of-maps
//! layout rather than one global cache keyed by rule id.
//!
//! `get`/`insert` are kept as two separate calls rather than a single
//! `get_or_compute(pos, || ...)` — the rule body a miss would run still
//! needs `&mut self` on the owning parser to recurse into other rules,
//! which a closure capturing `self` while `self.some_memo_field` is
//! already borrowed cannot do. Each rule's memoizing wrapper (e.g.
//! `GrammarParser::memo_parse_rule`) therefore spells the two steps out.

use std::collections::HashMap;

/// `None` is the failure sentinel; a `HashMap` miss is "not yet attempted"
/// — the two are distinguishable because the map stores `Option<T>`, not
/// `T` (§3 "Memo table" invariant).
pub struct Memo<T> {
    table: HashMap<usize, Option<T>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<T: Clone> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(result)` if `pos` was already attempted (`result` itself may
    /// be `None`, the cached failure); `None` if never attempted.
    pub fn get(&self, pos: usize) -> Option<Option<T>> {
        self.table.get(&pos).cloned()
    }

    pub fn insert(&mut self, pos: usize, result: Option<T>) {
        self.table.insert(pos, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit_returns_the_same_value() {
        let mut memo: Memo<u32> = Memo::new();
        assert_eq!(memo.get(3), None);
        memo.insert(3, Some(42));
        assert_eq!(memo.get(3), Some(Some(42)));
    }

    #[test]
    fn a_cached_failure_is_distinct_from_never_attempted() {
        let mut memo: Memo<u32> = Memo::new();
        memo.insert(0, None);
        assert_eq!(memo.get(0), Some(None), "cached failure");
        assert_eq!(memo.get(1), None, "never attempted");
    }
}
