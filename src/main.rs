//! Hidemark - inspect, edit and convert text carrying invisible markers.
//!
//! # Usage
//!
//! ```bash
//! hidemark markup notes.txt
//! hidemark segments --format json notes.txt
//! hidemark edit notes.txt bold --start 4 --end 9 --in-place
//! ```

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use hidemark::config::{
    ConfigFlags, OutputFormat, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use hidemark::document::{Document, Lexeme, Scanner, Segment, strip_bullet_echo};
use hidemark::editor::{
    EditAction, Selection, StyleState, close_style, insert_headline, insert_list_item, open_style,
};
use hidemark::format::{HeadlineLevel, MarkerKind};
use hidemark::markup::to_markup;

/// Inspect, edit and convert text carrying invisible markers
#[derive(Parser, Debug)]
#[command(name = "hidemark", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Read selection offsets as UTF-16 code units
    #[arg(long, global = true)]
    utf16: bool,

    /// Remove echoed bullet glyphs before processing
    #[arg(long, global = true)]
    strip_bullets: bool,

    /// Output format for segments, inspect and outline
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long, global = true)]
    save: bool,

    /// Clear saved defaults
    #[arg(long, global = true)]
    clear: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert tagged text to Markdown
    Markup {
        /// Tagged text file, or - for stdin
        file: PathBuf,
    },
    /// Show the renderable segments
    Segments {
        /// Tagged text file, or - for stdin
        file: PathBuf,
    },
    /// List every lexeme with its char offsets
    Inspect {
        /// Tagged text file, or - for stdin
        file: PathBuf,
    },
    /// List headlines
    Outline {
        /// Tagged text file, or - for stdin
        file: PathBuf,
    },
    /// Apply a toolbar action at a selection
    Edit {
        /// Tagged text file, or - for stdin
        file: PathBuf,
        /// One of h1, h2, h3, bold, italic, list
        action: EditAction,
        /// Selection start
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Selection end (defaults to start)
        #[arg(long)]
        end: Option<usize>,
        /// Insert the end marker of a style run opened earlier
        #[arg(long)]
        close: bool,
        /// Overwrite the file instead of printing
        #[arg(long)]
        in_place: bool,
    },
    /// Print the encoded marker for a kind
    Marker {
        /// One of h1, h2, h3, bold-start, bold-end, italic-start, italic-end, list
        kind: MarkerKind,
    },
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if let Some(path) = log_file {
        let file = fs::File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn read_input(path: &Path, strip_bullets: bool) -> Result<String> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    if strip_bullets {
        return Ok(strip_bullet_echo(&text).into_owned());
    }
    Ok(text)
}

fn segment_label(segment: &Segment<'_>) -> String {
    match segment {
        Segment::Text(_) => "text".to_string(),
        Segment::Token(token) => match token.closing {
            Some(closing) => format!("{}..{}", token.kind, closing),
            None => token.kind.to_string(),
        },
        Segment::List(items) => format!("list[{}]", items.len()),
    }
}

fn print_segments(doc: &Document, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let segments: Vec<_> = doc.segments().collect();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &segments)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for segment in &segments {
                let mut visible = String::new();
                segment.write_visible(&mut visible);
                writeln!(out, "{:<24} {visible:?}", segment_label(segment))?;
            }
        }
    }
    Ok(())
}

fn print_lexemes(text: &str, out: &mut impl Write) -> Result<()> {
    let mut chars_before = 0;
    for (span, lexeme) in Scanner::new(text).spanned() {
        let chars = text[span].chars().count();
        let label = match lexeme {
            Lexeme::Literal(s) => format!("literal {s:?}"),
            Lexeme::Marker(kind) => format!("marker {kind}"),
            Lexeme::Unknown(_) => "unknown marker".to_string(),
            Lexeme::Broken(_) => "broken marker (dropped)".to_string(),
        };
        writeln!(
            out,
            "{:>6}..{:<6} {label}",
            chars_before,
            chars_before + chars
        )?;
        chars_before += chars;
    }
    Ok(())
}

fn print_outline(doc: &Document, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let headlines = doc.headlines();
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &headlines)?;
        writeln!(out)?;
        return Ok(());
    }
    for headline in &headlines {
        let rule = match headline.level {
            HeadlineLevel::H1 => "=",
            HeadlineLevel::H2 => "-",
            HeadlineLevel::H3 => "~",
        };
        writeln!(out, "{:>4}  {}", headline.line + 1, headline.text)?;
        writeln!(out, "      {}", rule.repeat(headline.text.width()))?;
    }
    Ok(())
}

fn apply_edit(
    text: &str,
    action: EditAction,
    selection: Selection,
    close: bool,
) -> Result<String> {
    let edited = match (action, close) {
        (EditAction::Style(style), true) => {
            close_style(text, selection, StyleState::AwaitingEnd(style)).text
        }
        (_, true) => anyhow::bail!("--close only applies to bold and italic"),
        (EditAction::Headline(level), false) => insert_headline(level, text, selection),
        (EditAction::ListItem, false) => insert_list_item(text, selection),
        (EditAction::Style(style), false) => {
            let edit = open_style(text, selection, style);
            if let StyleState::AwaitingEnd(style) = edit.state {
                tracing::warn!(
                    ?style,
                    "run opened at a caret; finish it later with `edit --close`"
                );
            }
            edit.text
        }
    };
    Ok(edited)
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let format = effective.format.unwrap_or(OutputFormat::Text);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Markup { file } => {
            let text = read_input(&file, effective.strip_bullets)?;
            out.write_all(to_markup(&text).as_bytes())?;
        }
        Command::Segments { file } => {
            let doc = Document::new(read_input(&file, effective.strip_bullets)?);
            print_segments(&doc, format, &mut out)?;
        }
        Command::Inspect { file } => {
            let text = read_input(&file, effective.strip_bullets)?;
            print_lexemes(&text, &mut out)?;
        }
        Command::Outline { file } => {
            let doc = Document::new(read_input(&file, effective.strip_bullets)?);
            print_outline(&doc, format, &mut out)?;
        }
        Command::Edit {
            file,
            action,
            start,
            end,
            close,
            in_place,
        } => {
            let text = read_input(&file, effective.strip_bullets)?;
            let end = end.unwrap_or(start);
            let selection = if effective.utf16 {
                Selection::from_utf16(&text, start, end)
            } else {
                Selection::new(start, end)
            };
            let edited = apply_edit(&text, action, selection, close)?;
            if in_place {
                if file == Path::new("-") {
                    anyhow::bail!("--in-place needs a file, not stdin");
                }
                fs::write(&file, edited)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
            } else {
                out.write_all(edited.as_bytes())?;
            }
        }
        Command::Marker { kind } => {
            out.write_all(kind.encoded().as_bytes())?;
        }
    }
    out.flush().context("Failed to flush stdout")
}
