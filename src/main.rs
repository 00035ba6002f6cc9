//! GRUB theme preview CLI
//!
//! Usage:
//!   grub-theme-preview [OPTIONS] <THEME>
//!
//! Options:
//!   --width <PX>           Screen width (default 1366)
//!   --height <PX>          Screen height (default 768)
//!   -o, --output <FILE>    Output file (default out.png)
//!   -f, --format <FORMAT>  png or svg, inferred from the output name when unset
//!   --outline              Outline every box and style box part
//!   --dump                 Print the parsed theme
//!   --no-draw              Parse and lay out only, write nothing
//!   --font <FILE>          TrueType font for text
//!   -c, --config <FILE>    Render configuration (TOML format)
//!   -d, --debug            Print the resolved box tree
//!   -h, --help             Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use grub_theme_preview::{
    display_list, parse, render_to_file, ImageCache, OutputFormat, RenderConfig, RenderError,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => OutputFormat::Png,
            FormatArg::Svg => OutputFormat::Svg,
        }
    }
}

#[derive(Parser)]
#[command(name = "grub-theme-preview")]
#[command(about = "Preview GRUB boot loader themes without rebooting")]
struct Cli {
    /// Theme description file (theme.txt)
    theme: PathBuf,

    /// Screen width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Screen height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Output file
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Output format, inferred from the output file name when unset
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Outline every box and style box part
    #[arg(long)]
    outline: bool,

    /// Print the parsed theme
    #[arg(long)]
    dump: bool,

    /// Parse and lay out the theme without writing output
    #[arg(long)]
    no_draw: bool,

    /// TrueType font used for text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug mode: print the resolved box tree
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match RenderConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };
    let config = apply_overrides(config, &cli);

    let source = match fs::read_to_string(&cli.theme) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.theme.display(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &config, &source) {
        if let RenderError::Parse(errors) = &e {
            let filename = cli.theme.display().to_string();
            for error in errors {
                eprint!("{}", error.format(&source, &filename));
            }
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn apply_overrides(mut config: RenderConfig, cli: &Cli) -> RenderConfig {
    if let Some(width) = cli.width {
        config.screen_width = width;
    }
    if let Some(height) = cli.height {
        config.screen_height = height;
    }
    if let Some(font) = &cli.font {
        config.font_file = Some(font.clone());
    }
    config.outline |= cli.outline;
    config.debug |= cli.debug;
    if config.theme_dir.is_none() {
        config.theme_dir = Some(theme_dir(&cli.theme));
    }
    config
}

fn theme_dir(theme: &Path) -> PathBuf {
    match theme.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn run(cli: &Cli, config: &RenderConfig, source: &str) -> Result<(), RenderError> {
    let theme = parse(source)?;

    if cli.dump {
        print!("{}", theme.dump());
    }

    if cli.no_draw {
        let mut images = ImageCache::new(config.resource_dir());
        display_list(&theme, config, &mut images)?;
        return Ok(());
    }

    let format = cli
        .format
        .map(OutputFormat::from)
        .unwrap_or_else(|| OutputFormat::from_path(&cli.output));
    render_to_file(&theme, config, &cli.output, format)?;
    log::info!("preview written to {}", cli.output.display());
    Ok(())
}
