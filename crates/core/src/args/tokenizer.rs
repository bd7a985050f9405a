use tracing::{debug, trace};

use super::prefix::Prefix;
use super::table::{ArgValue, ArgumentTable};
use recruitbook_diagnostics::Span;

/// A located prefix tag in the argument string.
#[derive(Debug, Clone, Copy)]
struct Occurrence {
    prefix: Prefix,
    /// Byte offset of the first character of the tag.
    start: usize,
}

impl Occurrence {
    fn tag_end(&self) -> usize {
        self.start + self.prefix.len()
    }
}

/// Split `input` into a preamble and the values that follow each declared
/// prefix.
///
/// A prefix tag only counts when it sits at the start of the input or right
/// after a whitespace character, so `e/` inside `jo@e/x.com` is ordinary
/// text. Each value runs from the end of its tag to the next counted tag (or
/// the end of input) and is trimmed. Prefixes that are not in `prefixes` are
/// never searched for.
///
/// Never fails: input without any counted tag yields the trimmed input as
/// the preamble and an empty sequence for every declared prefix. Returned
/// values borrow from `input`.
pub fn tokenize<'a>(input: &'a str, prefixes: &[Prefix]) -> ArgumentTable<'a> {
    let mut declared: Vec<Prefix> = Vec::with_capacity(prefixes.len());
    for &p in prefixes {
        if !declared.contains(&p) {
            declared.push(p);
        }
    }

    let mut occurrences: Vec<Occurrence> = declared
        .iter()
        .flat_map(|&prefix| find_occurrences(input, prefix))
        .collect();
    // Stable: equal positions keep declaration order.
    occurrences.sort_by_key(|o| o.start);

    let preamble_end = occurrences.first().map_or(input.len(), |o| o.start);
    let (preamble, preamble_span) = trimmed(input, 0, preamble_end);

    let mut table = ArgumentTable::new(preamble, preamble_span);
    for &prefix in &declared {
        table.declare(prefix);
    }

    for (i, occ) in occurrences.iter().enumerate() {
        let value_start = occ.tag_end();
        let value_end = occurrences
            .get(i + 1)
            .map_or(input.len(), |next| next.start)
            .max(value_start);
        let (value, span) = trimmed(input, value_start, value_end);
        trace!(prefix = %occ.prefix, start = occ.start, value, "prefix occurrence");
        table.push(
            occ.prefix,
            ArgValue {
                value,
                span,
                prefix_span: Span::new(occ.start, value_start),
            },
        );
    }

    debug!(
        occurrences = occurrences.len(),
        preamble = table.preamble(),
        "tokenized arguments"
    );
    table
}

/// Positions of `prefix` that start the input or follow whitespace.
fn find_occurrences(input: &str, prefix: Prefix) -> impl Iterator<Item = Occurrence> + '_ {
    input
        .match_indices(prefix.tag())
        .map(|(start, _)| start)
        .filter(|&start| follows_whitespace_or_start(input, start))
        .map(move |start| Occurrence { prefix, start })
}

fn follows_whitespace_or_start(input: &str, pos: usize) -> bool {
    input[..pos].chars().next_back().is_none_or(char::is_whitespace)
}

/// Trim `input[start..end]`, returning the slice and its span.
fn trimmed(input: &str, start: usize, end: usize) -> (&str, Span) {
    let raw = &input[start..end];
    let leading = raw.len() - raw.trim_start().len();
    let text = raw.trim();
    let from = start + leading;
    (text, Span::new(from, from + text.len()))
}
