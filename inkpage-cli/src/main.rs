use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inkpage::{
    Canvas, FontCatalog, FontSource, LayoutSettings, NoteRenderer, PageSize, PenColor,
    RenderRequest, Rgb, RuleStyle,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "inkpage",
    about = "Render plain text as a handwritten note on ruled paper",
    version,
    author
)]
struct Cli {
    /// Log layout and font loading details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render text into a PNG note
    Render {
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Note text; "\n" separates paragraphs
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        text: Option<String>,

        /// Read the note text from a file instead
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Page size (A4, A5, Letter)
        #[arg(short, long, default_value = "A4")]
        page: String,

        /// Pen color (black, red, blue, green)
        #[arg(long, default_value = "black")]
        pen: String,

        /// Font style; "block" needs no font file
        #[arg(short, long, default_value = "normal")]
        font: String,

        /// Directory holding the .ttf files of the font styles
        #[arg(long, env = "INKPAGE_FONT_DIR", default_value = "fonts")]
        font_dir: PathBuf,

        #[command(flatten)]
        ruling: RulingArgs,
    },

    /// Write an empty ruled page
    Blank {
        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Page size (A4, A5, Letter)
        #[arg(short, long, default_value = "A4")]
        page: String,

        #[command(flatten)]
        ruling: RulingArgs,
    },

    /// List page sizes, pen colors and font styles
    List {
        /// Directory holding the .ttf files of the font styles
        #[arg(long, env = "INKPAGE_FONT_DIR", default_value = "fonts")]
        font_dir: PathBuf,
    },
}

/// Page geometry and the look of the guide lines
#[derive(Args, Debug, Clone)]
struct RulingArgs {
    /// Distance between text lines and between guide lines
    #[arg(long)]
    line_spacing: Option<u32>,

    /// Y position of the first text line and guide line
    #[arg(long)]
    first_line: Option<u32>,

    /// Bare paper left and right of each guide line
    #[arg(long)]
    side_margin: Option<u32>,

    /// Guide line thickness in pixels
    #[arg(long)]
    rule_thickness: Option<u32>,

    /// Guide line color as R,G,B
    #[arg(long, value_parser = parse_rgb)]
    rule_color: Option<Rgb<u8>>,
}

impl RulingArgs {
    fn settings(&self) -> LayoutSettings {
        let defaults = LayoutSettings::default();
        LayoutSettings {
            top: self.first_line.unwrap_or(defaults.top),
            line_spacing: self.line_spacing.unwrap_or(defaults.line_spacing),
            ..defaults
        }
    }

    fn rule_style(&self) -> RuleStyle {
        let aligned = RuleStyle::aligned_with(&self.settings());
        RuleStyle {
            side_margin: self.side_margin.unwrap_or(aligned.side_margin),
            thickness: self.rule_thickness.unwrap_or(aligned.thickness),
            color: self.rule_color.unwrap_or(aligned.color),
            ..aligned
        }
    }
}

fn parse_rgb(value: &str) -> std::result::Result<Rgb<u8>, String> {
    let channels = value
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<std::result::Result<Vec<u8>, _>>()
        .map_err(|e| format!("invalid color channel: {e}"))?;
    match channels[..] {
        [r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(format!("expected R,G,B, got {value:?}")),
    }
}

fn catalog(font_dir: &Path) -> FontCatalog {
    FontCatalog::with_font_dir(font_dir).register("block", FontSource::Block)
}

fn read_note(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(text
        .replace("\r\n", "\n")
        .trim_end_matches('\n')
        .to_string())
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "inkpage=debug" } else { "inkpage=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render {
            output,
            text,
            input,
            page,
            pen,
            font,
            font_dir,
            ruling,
        } => {
            let text = match (text, input) {
                (Some(text), _) => text.replace("\\n", "\n"),
                (None, Some(path)) => read_note(&path)?,
                (None, None) => anyhow::bail!("Either --text or --input is required"),
            };

            let renderer = NoteRenderer::new(catalog(&font_dir))
                .with_settings(ruling.settings())
                .with_rule_style(ruling.rule_style());
            let request = RenderRequest::parse(&page, &pen, &font, text, renderer.catalog())?;
            let note = renderer.render(&request)?;
            note.save_png(&output)?;

            tracing::debug!(path = %output.display(), "note written");
            println!(
                "Note rendered successfully: {} ({}x{})",
                output.display(),
                note.width(),
                note.height()
            );
        }

        Commands::Blank {
            output,
            page,
            ruling,
        } => {
            let page = page.parse::<PageSize>()?;
            let canvas = Canvas::ruled(page.width(), page.height(), &ruling.rule_style());
            canvas.save_png(&output)?;

            println!("Blank {page} page written to {}", output.display());
        }

        Commands::List { font_dir } => {
            println!("Page sizes:");
            for page in PageSize::ALL {
                println!("  {:<8} {}x{}", page.name(), page.width(), page.height());
            }

            println!("Pen colors:");
            for pen in PenColor::ALL {
                let [r, g, b] = pen.rgb().0;
                println!("  {:<8} ({r}, {g}, {b})", pen.name());
            }

            println!("Font styles:");
            let catalog = catalog(&font_dir);
            for style in catalog.styles() {
                match catalog.resolve(style)? {
                    FontSource::File(path) if path.is_file() => {
                        println!("  {:<8} {}", style, path.display())
                    }
                    FontSource::File(path) => {
                        println!("  {:<8} {} (missing)", style, path.display())
                    }
                    FontSource::Block => println!("  {:<8} built-in", style),
                }
            }
        }
    }

    Ok(())
}
