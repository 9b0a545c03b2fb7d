// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expression text preparation and the compiled-expression cache.
//!
//! Function layers hold free-form text such as `y = 2x + 3`. Before it reaches an
//! [`ExpressionEvaluator`] the text is normalized (the `y =` prefix goes away) and softened
//! (implicit multiplication becomes explicit). The softened string is the cache key.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use gridplot_core::{CompileError, ExpressionEvaluator, SharedExpr};
use hashbrown::HashMap;

/// Strips surrounding whitespace and an optional, case-insensitive `y =` prefix.
///
/// Returns `None` when nothing is left.
pub fn normalize_expression(raw: &str) -> Option<&str> {
    let s = raw.trim();
    let body = strip_y_prefix(s).unwrap_or(s).trim();
    (!body.is_empty()).then_some(body)
}

fn strip_y_prefix(s: &str) -> Option<&str> {
    let rest = s.strip_prefix(['y', 'Y'])?;
    rest.trim_start().strip_prefix('=')
}

/// Inserts `*` where multiplication is implied.
///
/// Four adjacencies are rewritten, with any whitespace between the operands dropped:
///
/// - a number before `x` (`2x` becomes `2*x`),
/// - a number before `(` (`3(x+1)` becomes `3*(x+1)`),
/// - `)` before `x` (`(x+1)x` becomes `(x+1)*x`),
/// - `x` before `(` (`x(x+1)` becomes `x*(x+1)`).
///
/// `x` only counts when it stands alone, so `exp(`, `max(` and `log2(` are left untouched.
/// A standalone `X` is the same variable and is written out as `x`.
///
/// Other juxtapositions such as `2sin(x)` or `(x+1)(x-1)` are left as they are; the bundled
/// evaluator reads those as products itself.
///
/// ```
/// use gridplot_charts::soften_implicit_multiplication;
///
/// assert_eq!(soften_implicit_multiplication("2x + 3"), "2*x + 3");
/// assert_eq!(soften_implicit_multiplication("2 (x)x"), "2*(x)*x");
/// assert_eq!(soften_implicit_multiplication("exp(x)"), "exp(x)");
/// ```
pub fn soften_implicit_multiplication(expr: &str) -> String {
    let chars: Vec<char> = expr.chars().collect();
    let mut out = String::with_capacity(expr.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let var = is_variable(&chars, i);
        out.push(if var { 'x' } else { c });
        let left = if c.is_ascii_digit() && ends_number(&chars, i) {
            Operand::Number
        } else if c == ')' {
            Operand::Paren
        } else if var {
            Operand::X
        } else {
            i += 1;
            continue;
        };

        let mut j = i + 1;
        while chars.get(j).is_some_and(|c| c.is_whitespace()) {
            j += 1;
        }
        let implied = match chars.get(j) {
            Some('(') => matches!(left, Operand::Number | Operand::X),
            Some('x' | 'X') => {
                matches!(left, Operand::Number | Operand::Paren) && !before_identifier(&chars, j)
            }
            _ => false,
        };
        if implied {
            out.push('*');
            i = j;
        } else {
            i += 1;
        }
    }
    out
}

#[derive(Clone, Copy)]
enum Operand {
    Number,
    Paren,
    X,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether the digit at `i` belongs to a numeric literal rather than an identifier.
fn ends_number(chars: &[char], i: usize) -> bool {
    let mut k = i;
    while k > 0 && (chars[k - 1].is_ascii_digit() || chars[k - 1] == '.') {
        k -= 1;
    }
    !(k > 0 && is_word(chars[k - 1]))
}

/// Whether the char at `i` is the variable: an `x` or `X` that is not part of a longer name.
fn is_variable(chars: &[char], i: usize) -> bool {
    matches!(chars[i], 'x' | 'X') && !after_identifier(chars, i) && !before_identifier(chars, i)
}

fn after_identifier(chars: &[char], i: usize) -> bool {
    i > 0 && (chars[i - 1].is_alphabetic() || chars[i - 1] == '_')
}

fn before_identifier(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).copied().is_some_and(is_word)
}

/// Normalizes and softens `raw` in one step.
pub fn prepare_expression(raw: &str) -> Option<String> {
    normalize_expression(raw).map(soften_implicit_multiplication)
}

struct CacheEntry {
    expr: SharedExpr,
    last_used: u64,
}

/// Compiled expressions keyed by their softened text.
///
/// Only successful compilations are stored, so a typo is reported again on every render
/// until it is fixed. The cache is unbounded unless a capacity limit is set, in which case
/// the least recently used entry is evicted.
#[derive(Default)]
pub struct ExpressionCache {
    entries: HashMap<String, CacheEntry>,
    capacity_limit: Option<usize>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl fmt::Debug for ExpressionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionCache")
            .field("len", &self.entries.len())
            .field("capacity_limit", &self.capacity_limit)
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish_non_exhaustive()
    }
}

impl ExpressionCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the cache to `limit` entries (at least one).
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.capacity_limit = Some(limit.max(1));
        self
    }

    /// Returns the compiled form of `softened`, compiling it on a miss.
    pub fn get_or_compile<E>(
        &mut self,
        softened: &str,
        evaluator: &E,
    ) -> Result<SharedExpr, CompileError>
    where
        E: ExpressionEvaluator + ?Sized,
    {
        self.tick += 1;
        if let Some(entry) = self.entries.get_mut(softened) {
            entry.last_used = self.tick;
            self.hits += 1;
            tracing::trace!(expr = softened, "expression cache hit");
            return Ok(entry.expr.clone());
        }

        self.misses += 1;
        let expr = evaluator.compile(softened)?;
        tracing::debug!(expr = softened, "compiled expression");
        if let Some(limit) = self.capacity_limit
            && self.entries.len() >= limit
        {
            self.evict_lru();
        }
        self.entries.insert(
            String::from(softened),
            CacheEntry {
                expr: expr.clone(),
                last_used: self.tick,
            },
        );
        Ok(expr)
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone());
        if let Some(key) = oldest {
            tracing::trace!(expr = key.as_str(), "evicting cached expression");
            self.entries.remove(&key);
        }
    }

    /// Whether `softened` is cached.
    pub fn contains(&self, softened: &str) -> bool {
        self.entries.contains_key(softened)
    }

    /// Number of cached expressions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that required a compile (successful or not).
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc;
    use core::cell::Cell;

    use gridplot_core::{CompiledExpr, EvalError};

    use super::*;

    #[test]
    fn prefix_is_stripped_case_insensitively() {
        assert_eq!(normalize_expression("  y = 2x + 3 "), Some("2x + 3"));
        assert_eq!(normalize_expression("Y=x"), Some("x"));
        assert_eq!(normalize_expression("x^2"), Some("x^2"));
        assert_eq!(normalize_expression("y ="), None);
        assert_eq!(normalize_expression("   "), None);
        // No `=`, so the `y` is part of the expression.
        assert_eq!(normalize_expression("y"), Some("y"));
    }

    #[test]
    fn implicit_multiplication_rules() {
        assert_eq!(soften_implicit_multiplication("2x"), "2*x");
        assert_eq!(soften_implicit_multiplication("2 x"), "2*x");
        assert_eq!(soften_implicit_multiplication("2.5x^2"), "2.5*x^2");
        assert_eq!(soften_implicit_multiplication("3(x+1)"), "3*(x+1)");
        assert_eq!(soften_implicit_multiplication("(x+1)x"), "(x+1)*x");
        assert_eq!(soften_implicit_multiplication("x (x-1)"), "x*(x-1)");
        assert_eq!(soften_implicit_multiplication("x^2 - 4"), "x^2 - 4");
    }

    #[test]
    fn uppercase_x_is_the_variable() {
        assert_eq!(soften_implicit_multiplication("3X"), "3*x");
        assert_eq!(soften_implicit_multiplication("(X+1)X"), "(x+1)*x");
        assert_eq!(soften_implicit_multiplication("X (2)"), "x*(2)");
        assert_eq!(soften_implicit_multiplication("X^2 - 1"), "x^2 - 1");
        assert_eq!(soften_implicit_multiplication("maX(x, 1)"), "maX(x, 1)");
        assert_eq!(prepare_expression("Y = 3X").as_deref(), Some("3*x"));
    }

    #[test]
    fn identifiers_are_not_split() {
        assert_eq!(soften_implicit_multiplication("max(x, 1)"), "max(x, 1)");
        assert_eq!(soften_implicit_multiplication("log2(x)"), "log2(x)");
        assert_eq!(soften_implicit_multiplication("exp(2x)"), "exp(2*x)");
        assert_eq!(soften_implicit_multiplication("2xy"), "2xy");
    }

    fn counting_evaluator(
        calls: &Cell<u32>,
    ) -> impl Fn(&str) -> Result<SharedExpr, CompileError> + '_ {
        move |src: &str| -> Result<SharedExpr, CompileError> {
            calls.set(calls.get() + 1);
            if src.contains('?') {
                return Err(CompileError::new("unexpected character"));
            }
            Ok(Arc::new(|x: f64| -> Result<f64, EvalError> { Ok(x) }))
        }
    }

    #[test]
    fn second_lookup_is_a_hit() {
        let calls = Cell::new(0);
        let eval = counting_evaluator(&calls);
        let mut cache = ExpressionCache::new();

        let f = cache.get_or_compile("2*x", &eval).unwrap();
        assert_eq!(f.eval(4.0), Ok(4.0));
        cache.get_or_compile("2*x", &eval).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        assert!(cache.contains("2*x"));
    }

    #[test]
    fn failures_are_not_cached() {
        let calls = Cell::new(0);
        let eval = counting_evaluator(&calls);
        let mut cache = ExpressionCache::new();
        assert!(cache.get_or_compile("x?", &eval).is_err());
        assert!(cache.get_or_compile("x?", &eval).is_err());
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_limit_evicts_least_recently_used() {
        let calls = Cell::new(0);
        let eval = counting_evaluator(&calls);
        let mut cache = ExpressionCache::new().with_capacity_limit(2);
        cache.get_or_compile("a", &eval).unwrap();
        cache.get_or_compile("b", &eval).unwrap();
        cache.get_or_compile("a", &eval).unwrap();
        cache.get_or_compile("c", &eval).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
    }

    #[test]
    fn prepared_text_is_the_cache_key() {
        assert_eq!(prepare_expression("y = 2x + 3").as_deref(), Some("2*x + 3"));
        assert_eq!(prepare_expression("y = "), None);
    }
}
