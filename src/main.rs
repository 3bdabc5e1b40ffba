/*!
Main binary for jsonhl.
*/

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::generate;
use clap_verbosity_flag::Verbosity;
use std::io::stdout;
use std::io::{self};
use std::{
    fs::{self},
    io::{IsTerminal, Read},
    path::PathBuf,
};

use jsonhl::tokenizer::LINE_SEPARATOR;
use jsonhl::{Color, Palette, Tokenizer, render};

/// Document highlighted by `--sample`.
const SAMPLE: &str = r#"{
    "title": "Person",
    "type": "object",
    "properties": {
        "firstName": {
            "type": "string"
        },
        "lastName": {
            "type": "string"
        },
        "age": {
            "description": "Age in years",
            "type": "integer",
            "minimum": 0
        }
    },
    "required": ["firstName", "lastName"]
}"#;

/// Highlight JSON keys, strings and numbers in a terminal.
#[derive(Parser)]
#[command(
    name = "jhl",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to a JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Highlight a built-in sample document instead of reading input
    #[arg(long, conflicts_with = "input")]
    sample: bool,
    /// Print the classified spans as JSON lines instead of highlighted text
    #[arg(long)]
    spans: bool,
    /// Classify `true`, `false` and `null` as literals instead of strings
    #[arg(long)]
    literals: bool,
    /// Also paint unclassified text and the background with the palette's
    /// foreground and background colors
    #[arg(long)]
    canvas: bool,
    /// JSON file with palette colors, e.g. {"key": "#7CDCFE"}
    #[arg(long, value_name = "FILE")]
    palette: Option<PathBuf>,
    /// Color of object keys
    #[arg(long, value_name = "HEX")]
    key_color: Option<Color>,
    /// Color of string values
    #[arg(long, value_name = "HEX")]
    string_color: Option<Color>,
    /// Color of numeric values
    #[arg(long, value_name = "HEX")]
    number_color: Option<Color>,
    /// Color of `true`/`false`/`null`, defaults to the string color
    #[arg(long, value_name = "HEX")]
    literal_color: Option<Color>,
    /// When to emit terminal colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    #[command(flatten)]
    verbosity: Verbosity,
}

/// Available subcommands for `jhl`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate shell completions
    Generate(GenerateCommand),
}

/// Generate shell completions
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
}

/// When to emit terminal colors.
#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    /// Only when STDOUT is a terminal
    Auto,
    Always,
    Never,
}

impl Args {
    /// Builds the palette from `--palette` and the per-category overrides.
    fn palette(&self) -> Result<Palette> {
        let mut palette = match &self.palette {
            Some(path) => Palette::load(path)?,
            None => Palette::default(),
        };

        if let Some(color) = self.key_color {
            palette.key = color;
        }
        if let Some(color) = self.string_color {
            palette.string = color;
        }
        if let Some(color) = self.number_color {
            palette.number = color;
        }
        if self.literal_color.is_some() {
            palette.literal = self.literal_color;
        }

        Ok(palette)
    }
}

/// Entry point for main binary.
///
/// Reads the input document (file, piped STDIN or the built-in sample),
/// classifies it and prints either the highlighted text or the span listing
/// to STDOUT.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    if let Some(Commands::Generate(GenerateCommand::Shell { shell })) =
        &args.command
    {
        let mut cmd = Args::command();
        generate(*shell, &mut cmd, "jhl", &mut stdout().lock());
        return Ok(());
    }

    let tokenizer = Tokenizer::new().with_literals(args.literals);

    // Read input content
    let text = if args.sample {
        SAMPLE.lines().collect::<Vec<_>>().join(LINE_SEPARATOR)
    } else if let Some(path) = &args.input {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?
    } else {
        if io::stdin().is_terminal() {
            // No piped input and no file specified
            let mut cmd = Args::command();
            return Ok(cmd.print_help()?);
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read STDIN")?;
        buffer
    };
    log::debug!("read {} bytes of input", text.len());

    let mut out = stdout().lock();
    if args.spans {
        return render::write_spans(&mut out, &text, tokenizer);
    }

    let palette = args.palette()?;
    let colorize = match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
            true
        }
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    };
    log::debug!("colorize: {colorize}, canvas: {}", args.canvas);

    render::write_highlighted(
        &mut out,
        &text,
        tokenizer,
        &palette,
        colorize,
        args.canvas,
    )
}
