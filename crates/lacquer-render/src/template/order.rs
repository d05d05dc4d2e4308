//! Substitution order for option keys.
//!
//! Substitution is a sequence of plain text replacements of `@key`, so the
//! order matters twice over:
//!
//! - A key that is a textual prefix of another (`color` / `color_active`) must
//!   be replaced after the longer one, or `@color_active` turns into
//!   `<color>_active`.
//! - A key whose value references other keys (`"@b_long"`) must be replaced
//!   before the keys it references, so the references it injects are still
//!   substituted.
//!
//! [`KeyOrder::Specificity`] (the default) partitions keys into three buckets
//! processed in order:
//!
//! 1. **dynamic** keys, whose value contains `@`, by descending
//!    `count('@') + key length`;
//! 2. **variant-qualified** keys, whose key or value contains `[` or `]`,
//!    by descending bracket count;
//! 3. all remaining keys.
//!
//! Ties within a bucket (and the whole of bucket 3) are broken by descending
//! key length, then alphabetically, so the order is deterministic and never
//! lets a shorter key run before a longer key it prefixes within the same
//! bucket.
//!
//! [`KeyOrder::LongestFirst`] ignores values and sorts every key by descending
//! length. It is immune to prefix collisions but does not order dynamic keys
//! before the keys they reference.

use std::cmp::Reverse;

use crate::value::Options;

/// Strategy for ordering keys before substitution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyOrder {
    /// Dynamic keys, then variant-qualified keys, then the rest.
    #[default]
    Specificity,
    /// Strictly by descending key length.
    LongestFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Bucket {
    Dynamic,
    Qualified,
    Plain,
}

fn bracket_count(s: &str) -> usize {
    s.chars().filter(|c| matches!(c, '[' | ']')).count()
}

fn classify(key: &str, raw: &str) -> (Bucket, usize) {
    let markers = raw.matches('@').count();
    if markers > 0 {
        return (Bucket::Dynamic, markers + key.len());
    }

    let brackets = bracket_count(key) + bracket_count(raw);
    if brackets > 0 {
        return (Bucket::Qualified, brackets);
    }

    (Bucket::Plain, 0)
}

impl KeyOrder {
    /// Returns the keys of `options` in substitution order.
    pub fn order<'a>(&self, options: &'a Options) -> Vec<&'a str> {
        let mut keys: Vec<&str> = options.keys().collect();

        match self {
            KeyOrder::LongestFirst => {
                keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            }
            KeyOrder::Specificity => {
                keys.sort_by_cached_key(|key| {
                    let raw = options.get(key).map(|v| v.to_string()).unwrap_or_default();
                    let (bucket, score) = classify(key, &raw);
                    (bucket, Reverse(score), Reverse(key.len()), key.to_string())
                });
            }
        }

        keys
    }
}
