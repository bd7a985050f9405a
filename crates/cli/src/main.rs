mod render;

use std::fs;
use std::io::{self, IsTerminal};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use recruitbook_core::fields::Tag;
use recruitbook_core::{
    Candidate, CommandParser, Diagnostic, EDIT_PREFIXES, EditCommandParser, EditDescriptor,
    EditRequest, FieldKind, FieldRules, ParseError, tokenize,
};
use recruitbook_diagnostics as diag;
use recruitbook_rules::load_rules_from_str;

use crate::render::{Format, print_summary, render_diagnostics_pretty};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "rb",
    version,
    about = "recruitbook: parse and preview prefix-tagged candidate edit commands"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log more to stderr (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a field rules JSON file. Built-in defaults when omitted.
    #[arg(long, global = true)]
    rules: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse an edit command, e.g. `rb edit 1 n/John Doe p/91234567 t/`.
    ///
    /// Options must come before the arguments; everything from the first
    /// argument on is joined with spaces and parsed as one command.
    Edit {
        /// Candidate JSON file to apply the edit to.
        #[arg(long)]
        record: Option<String>,
        /// INDEX followed by prefix/value pairs.
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },

    /// Show how an argument string splits into a preamble and prefix values.
    Tokenize {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the prefixes the edit command understands.
    Prefixes,

    /// Explain a diagnostic ID (e.g. RB1202).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Edit { record, args } => {
            let rules = load_rules(cli.rules.as_deref())?;
            cmd_edit(&args.join(" "), rules, record.as_deref(), format)?
        }
        Cmd::Tokenize { args } => cmd_tokenize(&args.join(" "), format)?,
        Cmd::Prefixes => cmd_prefixes(format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

/// Install the stderr log subscriber; stdout carries command output.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn load_rules(path: Option<&str>) -> Result<FieldRules> {
    let Some(path) = path else {
        return Ok(FieldRules::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read rules file '{path}'"))?;
    let rules =
        load_rules_from_str(&text).with_context(|| format!("invalid rules file '{path}'"))?;
    debug!(path, "loaded field rules");
    Ok(rules)
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_edit(args: &str, rules: FieldRules, record: Option<&str>, format: Format) -> Result<()> {
    let request = match EditCommandParser::new(rules).parse(args) {
        Ok(request) => request,
        Err(err) => report_parse_error(args, &err, format)?,
    };

    let edited = match record {
        Some(path) => Some(request.descriptor.apply_to(&load_candidate(path)?)),
        None => None,
    };

    match format {
        Format::Json => {
            let mut out = serde_json::json!({
                "ok": true,
                "index": request.index,
                "edited_fields": request.descriptor.edited_fields(),
                "descriptor": request.descriptor,
                "warnings": request.warnings,
            });
            if let Some(candidate) = &edited {
                out["candidate"] = serde_json::to_value(candidate)?;
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            print_request(&request);
            if let Some(candidate) = &edited {
                println!("{}", serde_json::to_string_pretty(candidate)?);
            }
            render_diagnostics_pretty(args, &request.warnings);
            print_summary(&request.warnings);
        }
    }
    Ok(())
}

/// Print the failure in `format` and exit with status 1.
fn report_parse_error(args: &str, err: &ParseError, format: Format) -> Result<EditRequest> {
    let diagnostic = err.to_diagnostic();
    match format {
        Format::Json => {
            let mut out = serde_json::json!({
                "ok": false,
                "diagnostics": [diagnostic],
            });
            if let Some(usage) = err.usage() {
                out["usage"] = usage.into();
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            let diagnostics: [Diagnostic; 1] = [diagnostic];
            render_diagnostics_pretty(args, &diagnostics);
            if let Some(usage) = err.usage() {
                eprintln!("{usage}");
            }
            print_summary(&diagnostics);
        }
    }
    process::exit(1);
}

fn load_candidate(path: &str) -> Result<Candidate> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read record '{path}'"))?;
    let candidate =
        serde_json::from_str(&text).with_context(|| format!("invalid candidate record '{path}'"))?;
    Ok(candidate)
}

fn print_request(request: &EditRequest) {
    println!("Editing candidate {}", request.index);
    for field in request.descriptor.edited_fields() {
        let value = describe(&request.descriptor, field).unwrap_or_default();
        println!("  {:<13} {value}", format!("{}:", field.label()));
    }
}

/// Display text for an edited slot; empty notes and tag sets read as cleared.
fn describe(descriptor: &EditDescriptor, field: FieldKind) -> Option<String> {
    let cleared = |s: String| if s.is_empty() { "(cleared)".to_string() } else { s };
    match field {
        FieldKind::Name => descriptor.name().map(ToString::to_string),
        FieldKind::Phone => descriptor.phone().map(ToString::to_string),
        FieldKind::Email => descriptor.email().map(ToString::to_string),
        FieldKind::Address => descriptor.address().map(ToString::to_string),
        FieldKind::DesiredRole => descriptor.desired_role().map(ToString::to_string),
        FieldKind::Skills => descriptor.skills().map(ToString::to_string),
        FieldKind::Experience => descriptor.experience().map(|e| format!("{e} years")),
        FieldKind::Status => descriptor.status().map(ToString::to_string),
        FieldKind::Note => descriptor.note().map(|n| cleared(n.to_string())),
        FieldKind::Tags => descriptor.tags().map(|tags| {
            cleared(tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(", "))
        }),
    }
}

fn cmd_tokenize(args: &str, format: Format) -> Result<()> {
    let table = tokenize(args, &EDIT_PREFIXES);

    match format {
        Format::Json => {
            let values: serde_json::Map<String, serde_json::Value> = table
                .prefixes()
                .filter(|&p| table.is_present(p))
                .map(|p| (p.tag().to_string(), serde_json::Value::from(table.all_values(p))))
                .collect();
            let out = serde_json::json!({
                "preamble": table.preamble(),
                "values": values,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            println!("preamble: {:?}", table.preamble());
            for prefix in table.prefixes() {
                for value in table.all_values(prefix) {
                    println!("{:<6}{value:?}", prefix.tag());
                }
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct PrefixInfo {
    prefix: &'static str,
    field: FieldKind,
    repeatable: bool,
}

fn cmd_prefixes(format: Format) -> Result<()> {
    let infos: Vec<PrefixInfo> = FieldKind::ALL
        .into_iter()
        .map(|field| PrefixInfo {
            prefix: field.prefix().tag(),
            field,
            repeatable: field.is_multi_valued(),
        })
        .collect();

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        Format::Pretty => {
            for info in &infos {
                let note = if info.repeatable { " (repeatable)" } else { "" };
                println!("{:<6}{}{note}", info.prefix, info.field.label());
            }
        }
    }
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}
