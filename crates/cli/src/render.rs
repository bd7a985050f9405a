//! Pretty diagnostic rendering using ariadne.
//!
//! The "source" of every report is the joined argument string, so labels
//! underline the exact preamble, prefix, or value a diagnostic refers to.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use recruitbook_diagnostics::{Diagnostic, Severity, codes};

/// Name shown in report headers in place of a file name.
pub(crate) const ARGS_SOURCE: &str = "<args>";

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty for a terminal and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics against the argument string to stderr.
///
/// Diagnostics without a span (e.g. "nothing to edit") are printed as a
/// single header line.
pub(crate) fn render_diagnostics_pretty(args: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let mut cache = (ARGS_SOURCE, Source::from(args));

    for diag in diagnostics {
        let Some(span) = &diag.span else {
            eprintln!("{}[{}]: {}", kind_label(&diag.severity), diag.id, diag.message);
            if let Some(explanation) = diag.explain() {
                eprintln!("  = help: {explanation}");
            }
            continue;
        };

        // Clamp so a stale span can never make ariadne panic.
        let start = span.start.min(args.len());
        let end = span.end.min(args.len()).max(start);

        let mut builder = Report::build(report_kind(&diag.severity), (ARGS_SOURCE, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((ARGS_SOURCE, start..end))
                    .with_message(label_message(diag))
                    .with_color(severity_color(&diag.severity)),
            );

        if let Some(ctx) = &diag.context {
            let note = ctx
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", ");
            builder = builder.with_note(note);
        }

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

fn kind_label(severity: &Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warn => "warning",
        Severity::Info => "info",
        _ => "diagnostic",
    }
}

/// Short label for the underlined text; the header already has the message.
fn label_message(diag: &Diagnostic) -> String {
    let field = diag
        .context
        .as_ref()
        .and_then(|ctx| ctx.get("field"))
        .map(String::as_str);

    match (&*diag.id, field) {
        (codes::INVALID_INDEX, _) => "expected a positive whole number".to_string(),
        (codes::INVALID_FIELD, Some(field)) => format!("invalid {field}"),
        (codes::DUPLICATE_PREFIX, _) => "given again here".to_string(),
        (codes::REPEATED_TAG, _) => "already listed".to_string(),
        _ => diag.message.clone(),
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured count line, e.g. `1 error, 2 warnings`.
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;
    if errors + warnings == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    eprintln!("{}", parts.join(", "));
}
