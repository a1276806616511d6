//! undocx CLI - Word to Markdown conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use undocx::render::{to_json, DEFAULT_BASE_NAME};
use undocx::{
    ConvertOptions, ConverterRegistry, ExtractOptions, JsonFormat, ParseOptions, RenderOptions,
    Undocx,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "undocx")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert Word documents to Markdown with extracted media", long_about = None)]
struct Cli {
    /// Input Word file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    flags: Flags,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags shared by every conversion command.
#[derive(Args, Clone, Copy)]
struct Flags {
    /// Only detect headings from paragraph styles
    #[arg(long, global = true)]
    style_headings_only: bool,

    /// Name image files by their detected format instead of .png
    #[arg(long, global = true)]
    detect_image_format: bool,

    /// Include YAML frontmatter with document metadata
    #[arg(long, global = true)]
    frontmatter: bool,

    /// Fail on unreadable styles, relationships or properties
    #[arg(long, global = true)]
    strict: bool,
}

impl Flags {
    fn parse_options(&self) -> ParseOptions {
        if self.strict {
            ParseOptions::new().strict()
        } else {
            ParseOptions::new().lenient()
        }
    }

    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if self.style_headings_only {
            options = options.style_headings_only();
        }
        if self.detect_image_format {
            options = options.detect_image_format();
        }
        options
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_parse_options(self.parse_options())
            .with_extract_options(self.extract_options())
            .with_render_options(RenderOptions::new().with_frontmatter(self.frontmatter))
    }

    fn builder(&self) -> Undocx {
        let mut builder = Undocx::new();
        if self.strict {
            builder = builder.strict();
        }
        if self.style_headings_only {
            builder = builder.style_headings_only();
        }
        if self.detect_image_format {
            builder = builder.detect_image_format();
        }
        if self.frontmatter {
            builder = builder.with_frontmatter();
        }
        builder
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Word files to Markdown, a media folder and a ZIP bundle
    Convert {
        /// Input Word files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Skip the ZIP archive
        #[arg(long)]
        no_zip: bool,
    },

    /// Convert a Word file to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input Word file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified); images go next to it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a Word file to JSON
    Json {
        /// Input Word file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input Word file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Extract embedded images
    Images {
        /// Input Word file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let flags = cli.flags;

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            no_zip,
        }) => cmd_convert(&inputs, output.as_deref(), !no_zip, &flags),
        Some(Commands::Markdown { input, output }) => {
            cmd_markdown(&input, output.as_deref(), &flags)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &flags),
        Some(Commands::Info { input }) => cmd_info(&input, &flags),
        Some(Commands::Images { input, output }) => cmd_images(&input, output.as_deref(), &flags),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&[input], cli.output.as_deref(), true, &flags)
            } else {
                println!("{}", "Usage: undocx <FILE> [OUTPUT]".yellow());
                println!("       undocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn cmd_convert(
    inputs: &[PathBuf],
    output: Option<&Path>,
    zip: bool,
    flags: &Flags,
) -> CliResult {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Converting...");
    let registry = ConverterRegistry::with_defaults();
    let results = registry.convert_many(inputs, &flags.convert_options());

    let mut written = Vec::new();
    let mut failures = 0;
    for (input, result) in results {
        pb.set_message(input.display().to_string());
        match result {
            Ok(converted) => {
                let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| parent_dir(&input));
                let base_name = converted
                    .base_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| file_stem(&input));
                let bundle = converted.bundle(base_name.clone());

                written.push(bundle.write_dir(&output_dir)?);
                if zip {
                    let archive = output_dir.join(format!("{}.zip", base_name));
                    bundle.write_zip_file(&archive)?;
                    written.push(archive);
                }
            }
            Err(e) => {
                failures += 1;
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    if !written.is_empty() {
        println!("\n{}", "Output files:".green().bold());
        for (i, path) in written.iter().enumerate() {
            let branch = if i + 1 == written.len() { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path.display());
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn cmd_markdown(input: &Path, output: Option<&Path>, flags: &Flags) -> CliResult {
    match output {
        Some(path) => {
            let base_name = file_stem(path);
            let parsed = flags.builder().with_base_name(base_name).parse(input)?;
            let written = parsed.write_bundle(parent_dir(path))?;
            println!("{} {}", "Saved to".green(), written.display());
        }
        None => {
            let parsed = flags.builder().with_base_name(file_stem(input)).parse(input)?;
            print!("{}", parsed.to_markdown()?);
        }
    }

    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, flags: &Flags) -> CliResult {
    let parsed = flags.builder().parse(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = to_json(parsed.document(), format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, flags: &Flags) -> CliResult {
    let format = undocx::detect_format_from_path(input)?;
    let options = RenderOptions::new().with_base_name(file_stem(input));
    let parsed = flags.builder().parse(input)?;
    let rendered = undocx::render::to_markdown_with_stats(parsed.document(), &options)?;
    let metadata = &parsed.document().metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref subject) = metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref creator) = metadata.creator {
        println!("{}: {}", "Author".bold(), creator);
    }
    if let Some(ref last_modified_by) = metadata.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), last_modified_by);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &rendered.stats;
    println!("{}: {}", "Blocks".bold(), parsed.document().block_count());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_images(input: &Path, output: Option<&Path>, flags: &Flags) -> CliResult {
    let rendered = flags
        .builder()
        .with_base_name(file_stem(input))
        .parse(input)?
        .render()?;

    let output_dir = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&rendered.media_dir));
    fs::create_dir_all(&output_dir)?;

    for (name, content) in &rendered.images {
        fs::write(output_dir.join(name), content)?;
        println!("{} {}", "Extracted".green(), name);
    }

    println!(
        "\n{} {} images extracted",
        "Done!".green().bold(),
        rendered.image_count()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "undocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word to Markdown conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/undocx".dimmed());
    println!("License: MIT");
}
