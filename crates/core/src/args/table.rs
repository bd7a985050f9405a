use std::collections::BTreeMap;

use serde::Serialize;

use super::prefix::Prefix;
use crate::error::DuplicatePrefixError;
use recruitbook_diagnostics::Span;

/// One value recorded for a prefix, borrowed from the argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArgValue<'a> {
    /// The value text, trimmed of surrounding whitespace.
    pub value: &'a str,
    /// Span of the trimmed value (empty span at the value position when the
    /// value is empty).
    pub span: Span,
    /// Span of the prefix tag that introduced the value.
    pub prefix_span: Span,
}

/// The tokenizer's output: a preamble plus every value recorded per prefix.
///
/// Every declared prefix has an entry, so a prefix that never appeared maps
/// to an empty sequence rather than a missing key. Values for one prefix are
/// kept in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentTable<'a> {
    preamble: &'a str,
    preamble_span: Span,
    values: BTreeMap<Prefix, Vec<ArgValue<'a>>>,
}

impl<'a> ArgumentTable<'a> {
    /// Create a table with the given preamble and no prefixes.
    pub fn new(preamble: &'a str, preamble_span: Span) -> Self {
        Self {
            preamble,
            preamble_span,
            values: BTreeMap::new(),
        }
    }

    /// Register `prefix` with an empty value sequence, if not already present.
    pub fn declare(&mut self, prefix: Prefix) {
        self.values.entry(prefix).or_default();
    }

    /// Append a value for `prefix`, declaring it if needed.
    pub fn push(&mut self, prefix: Prefix, value: ArgValue<'a>) {
        self.values.entry(prefix).or_default().push(value);
    }

    /// The trimmed text before the first prefix occurrence.
    pub fn preamble(&self) -> &'a str {
        self.preamble
    }

    /// Span of the trimmed preamble.
    pub fn preamble_span(&self) -> Span {
        self.preamble_span
    }

    /// The last value recorded for `prefix`, if any.
    ///
    /// Later values override earlier ones when a single value is expected.
    pub fn value(&self, prefix: Prefix) -> Option<&'a str> {
        self.last_occurrence(prefix).map(|v| v.value)
    }

    /// Every value recorded for `prefix`, in input order.
    ///
    /// Returns an empty vector for prefixes that never appeared, including
    /// prefixes that were not declared.
    pub fn all_values(&self, prefix: Prefix) -> Vec<&'a str> {
        self.occurrences(prefix).iter().map(|v| v.value).collect()
    }

    /// Every recorded value for `prefix` with its spans, in input order.
    pub fn occurrences(&self, prefix: Prefix) -> &[ArgValue<'a>] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or_default()
    }

    /// The last recorded value for `prefix` with its spans.
    pub fn last_occurrence(&self, prefix: Prefix) -> Option<&ArgValue<'a>> {
        self.occurrences(prefix).last()
    }

    /// Whether `prefix` appeared at least once.
    pub fn is_present(&self, prefix: Prefix) -> bool {
        !self.occurrences(prefix).is_empty()
    }

    /// Declared prefixes in tag order.
    pub fn prefixes(&self) -> impl Iterator<Item = Prefix> + '_ {
        self.values.keys().copied()
    }

    /// Total number of recorded values across all prefixes.
    pub fn value_count(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    /// Fail if any of `candidates` has two or more recorded values.
    ///
    /// The error names every offending prefix once, in the order given by
    /// `candidates`, and carries the tag spans of all their occurrences.
    pub fn verify_no_duplicate_prefixes(
        &self,
        candidates: &[Prefix],
    ) -> Result<(), DuplicatePrefixError> {
        let mut prefixes: Vec<Prefix> = Vec::new();
        let mut spans = Vec::new();
        for &prefix in candidates {
            let occurrences = self.occurrences(prefix);
            if occurrences.len() > 1 && !prefixes.contains(&prefix) {
                prefixes.push(prefix);
                spans.extend(occurrences.iter().map(|v| v.prefix_span));
            }
        }

        if prefixes.is_empty() {
            Ok(())
        } else {
            Err(DuplicatePrefixError { prefixes, spans })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Prefix = Prefix::new("a/");
    const B: Prefix = Prefix::new("b/");
    const C: Prefix = Prefix::new("c/");

    fn arg(value: &str, at: usize) -> ArgValue<'_> {
        ArgValue {
            value,
            span: Span::new(at + 2, at + 2 + value.len()),
            prefix_span: Span::new(at, at + 2),
        }
    }

    fn sample() -> ArgumentTable<'static> {
        let mut table = ArgumentTable::new("7", Span::new(0, 1));
        table.declare(A);
        table.declare(B);
        table.declare(C);
        table.push(A, arg("first", 2));
        table.push(A, arg("second", 10));
        table.push(B, arg("only", 19));
        table
    }

    #[test]
    fn value_returns_last() {
        assert_eq!(sample().value(A), Some("second"));
        assert_eq!(sample().value(B), Some("only"));
        assert_eq!(sample().value(C), None);
    }

    #[test]
    fn all_values_in_input_order() {
        assert_eq!(sample().all_values(A), vec!["first", "second"]);
        assert!(sample().all_values(C).is_empty());
    }

    #[test]
    fn undeclared_prefix_reads_as_empty() {
        let table = sample();
        let undeclared = Prefix::new("zz/");
        assert!(table.all_values(undeclared).is_empty());
        assert_eq!(table.value(undeclared), None);
        assert!(!table.is_present(undeclared));
    }

    #[test]
    fn declare_keeps_existing_values() {
        let mut table = sample();
        table.declare(A);
        assert_eq!(table.all_values(A).len(), 2);
        assert_eq!(table.prefixes().collect::<Vec<_>>(), vec![A, B, C]);
        assert_eq!(table.value_count(), 3);
    }

    #[test]
    fn no_duplicates_among_candidates() {
        assert!(sample().verify_no_duplicate_prefixes(&[B, C]).is_ok());
    }

    #[test]
    fn duplicates_are_reported_once_in_candidate_order() {
        let mut table = sample();
        table.push(C, arg("x", 30));
        table.push(C, arg("y", 40));

        let err = table
            .verify_no_duplicate_prefixes(&[C, B, A, C])
            .unwrap_err();
        assert_eq!(err.prefixes, vec![C, A]);
        assert_eq!(err.spans.len(), 4);
        assert_eq!(err.spans[0], Span::new(30, 32));
    }

    #[test]
    fn preamble_accessors() {
        let table = sample();
        assert_eq!(table.preamble(), "7");
        assert_eq!(table.preamble_span(), Span::new(0, 1));
    }
}
