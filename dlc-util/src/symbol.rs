//! String interning.
//!
//! Variable names, function names, and dict string keys all flow through the
//! lexer and into the annotator's scope tables, so they are compared and
//! hashed far more often than they are printed. [`Symbol`] is a 4-byte
//! handle into a global, thread-safe string table: comparison and hashing
//! become index operations instead of byte-for-byte string comparisons.
//!
//! A `DashMap`-backed table keyed by an `AHasher` hash, with linear probing
//! on collision and a reserved block of pre-interned symbols so keywords
//! get stable indices.

use ahash::AHasher;
use dashmap::DashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.intern_reserved();
    table
});

/// Number of symbols reserved for this language's keywords and punctuation
/// names. Symbols below this index are pre-interned and have stable values
/// across runs.
const RESERVED_SYMBOLS_END: u32 = 64;

/// This language's reserved words (spec.md §4.1's keyword set, plus the
/// literal keywords `true`/`false`/`null` and the wildcard pattern `_`).
/// Order fixes each keyword's `Symbol` index, so it must not be reordered
/// once shipped.
const RESERVED_WORDS: &[&str] = &[
    "case", "of", "let", "in", "do", "end", "if", "then", "else", "and", "or", "not", "mod",
    "where", "true", "false", "null", "_",
];

struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next_index: AtomicU32::new(RESERVED_SYMBOLS_END),
        }
    }

    fn intern_reserved(&self) {
        for (idx, word) in RESERVED_WORDS.iter().enumerate() {
            assert!((idx as u32) < RESERVED_SYMBOLS_END, "reserved word table overflowed its index budget");
            let hash = Self::hash_str(word);
            let leaked: &'static str = Box::leak(word.to_string().into_boxed_str());
            self.map.insert(hash, (leaked, idx as u32));
        }
    }

    fn intern(&self, s: &str) -> Symbol {
        let hash = Self::hash_str(s);

        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == s {
                return Symbol(entry.value().1);
            }
        }

        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == s {
                    Symbol(entry.get().1)
                } else {
                    self.intern_with_probing(s, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                entry.insert((leaked, idx));
                Symbol(idx)
            }
        }
    }

    /// Linear probing with a golden-ratio-prime offset: two distinct strings
    /// that happen to share a hash get pushed to different slots instead of
    /// clobbering one another.
    fn intern_with_probing(&self, s: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_PRIME: u64 = 0x9e3779b97f4a7c15;

        for i in 1..=MAX_PROBES {
            let probe_hash = original_hash.wrapping_add(i.wrapping_mul(PROBE_PRIME));
            match self.map.entry(probe_hash) {
                dashmap::mapref::entry::Entry::Occupied(entry) => {
                    if entry.get().0 == s {
                        return Symbol(entry.get().1);
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let idx = self.next_index.fetch_add(1, Ordering::Relaxed);
                    let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                    entry.insert((leaked, idx));
                    return Symbol(idx);
                }
            }
        }

        unreachable!("symbol interner exhausted {MAX_PROBES} collision probes for {s:?}");
    }

    fn get(&self, symbol: Symbol) -> &'static str {
        self.map
            .iter()
            .find(|entry| entry.value().1 == symbol.0)
            .map(|entry| entry.value().0)
            .unwrap_or("<invalid symbol>")
    }

    fn hash_str(s: &str) -> u64 {
        let mut hasher = AHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }
}

/// An interned identifier.
///
/// Two symbols are equal iff the strings they were interned from are equal,
/// and that check is an index comparison rather than a string comparison.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        STRING_TABLE.intern(s)
    }

    pub fn as_str(self) -> &'static str {
        STRING_TABLE.get(self)
    }

    /// True if this symbol is one of this language's reserved words.
    pub fn is_reserved_word(self) -> bool {
        self.0 < RESERVED_SYMBOLS_END
    }
}

macro_rules! reserved_word_symbols {
    ($($const_name:ident => $word:literal),+ $(,)?) => {
        impl Symbol {
            $(
                pub const $const_name: Symbol = Symbol(
                    Self::reserved_index($word)
                );
            )+
        }

        impl Symbol {
            const fn reserved_index(word: &str) -> u32 {
                let mut i = 0;
                while i < RESERVED_WORDS.len() {
                    if const_str_eq(RESERVED_WORDS[i], word) {
                        return i as u32;
                    }
                    i += 1;
                }
                panic!("word not present in RESERVED_WORDS");
            }
        }
    };
}

const fn const_str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

reserved_word_symbols! {
    KW_CASE => "case",
    KW_OF => "of",
    KW_LET => "let",
    KW_IN => "in",
    KW_DO => "do",
    KW_END => "end",
    KW_IF => "if",
    KW_THEN => "then",
    KW_ELSE => "else",
    KW_AND => "and",
    KW_OR => "or",
    KW_NOT => "not",
    KW_MOD => "mod",
    KW_WHERE => "where",
    KW_TRUE => "true",
    KW_FALSE => "false",
    KW_NULL => "null",
    KW_UNDERSCORE => "_",
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_string_is_idempotent() {
        let a = Symbol::intern("frobnicate");
        let b = Symbol::intern("frobnicate");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "frobnicate");
    }

    #[test]
    fn distinct_strings_get_distinct_symbols() {
        let a = Symbol::intern("alpha_unique_marker");
        let b = Symbol::intern("beta_unique_marker");
        assert_ne!(a, b);
    }

    #[test]
    fn reserved_words_resolve_to_stable_constants() {
        assert_eq!(Symbol::intern("let"), Symbol::KW_LET);
        assert_eq!(Symbol::intern("case"), Symbol::KW_CASE);
        assert_eq!(Symbol::intern("_"), Symbol::KW_UNDERSCORE);
        assert!(Symbol::KW_LET.is_reserved_word());
    }

    #[test]
    fn ordinary_identifier_is_not_reserved() {
        let sym = Symbol::intern("my_variable_name");
        assert!(!sym.is_reserved_word());
    }

    #[test]
    fn display_and_debug_render_the_underlying_string() {
        let sym = Symbol::intern("display_test_symbol");
        assert_eq!(format!("{sym}"), "display_test_symbol");
        assert_eq!(format!("{sym:?}"), "Symbol(display_test_symbol)");
    }

    #[quickcheck_macros::quickcheck]
    fn interning_is_idempotent(s: String) -> bool {
        Symbol::intern(&s) == Symbol::intern(&s)
    }

    #[quickcheck_macros::quickcheck]
    fn round_trips_through_as_str(s: String) -> bool {
        Symbol::intern(&s).as_str() == s
    }
}
