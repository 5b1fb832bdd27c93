use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdftickle::{Document, Manifest, PageSize};

#[derive(Parser)]
#[command(name = "pdftickle")]
#[command(version, about = "Build simple text PDFs from the command line")]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging (RUST_LOG overrides)")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a one-page PDF, one text line per input line")]
    Create {
        #[arg(help = "Output PDF file")]
        output: String,
        #[arg(help = "Text content for the PDF")]
        text: String,
        #[arg(long, help = "Document title")]
        title: Option<String>,
        #[arg(long, help = "Document author")]
        author: Option<String>,
        #[arg(long, help = "Page size (A4, Letter, 400x600, ...)", default_value = "A4")]
        size: String,
        #[arg(long, help = "Use landscape orientation")]
        landscape: bool,
        #[arg(long, help = "X position of the first line", default_value = "72")]
        x: f64,
        #[arg(long, help = "Y position of the first line (default: one inch below the top)")]
        y: Option<f64>,
        #[arg(long, help = "Distance between lines", default_value = "16")]
        line_height: f64,
    },
    #[command(about = "Render a JSON document manifest to PDF")]
    Render {
        #[arg(help = "Manifest JSON file")]
        manifest: String,
        #[arg(help = "Output PDF file")]
        output: String,
    },
    #[command(about = "Describe the document a manifest would produce")]
    Info {
        #[arg(help = "Manifest JSON file")]
        manifest: String,
        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
    #[command(about = "List the standard page sizes")]
    Sizes,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Create {
            output,
            text,
            title,
            author,
            size,
            landscape,
            x,
            y,
            line_height,
        } => {
            let mut size: PageSize = size.parse().context("Invalid --size")?;
            if landscape && !size.is_landscape() {
                size = size.rotate();
            }

            let mut doc = match title {
                Some(title) => Document::with_title(title, author.as_deref()),
                None => {
                    let mut doc = Document::new();
                    doc.metadata_mut().author = author;
                    doc
                }
            };

            let top = y.unwrap_or(size.height() - 72.0);
            let page = doc.add_page_with_size(size)?;
            for (i, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                page.add_text(line, x, top - i as f64 * line_height)?;
            }

            doc.save(&output)
                .with_context(|| format!("Failed to write {}", output))?;
            println!("PDF created successfully: {}", output);
        }
        Commands::Render { manifest, output } => {
            let mut doc = Manifest::from_file(&manifest)
                .and_then(Manifest::into_document)
                .with_context(|| format!("Failed to load manifest {}", manifest))?;
            doc.save(&output)
                .with_context(|| format!("Failed to write {}", output))?;
            println!(
                "Successfully rendered {} ({} pages) to {}",
                manifest,
                doc.page_count(),
                output
            );
        }
        Commands::Info { manifest, json } => {
            let doc = Manifest::from_file(&manifest)
                .and_then(Manifest::into_document)
                .with_context(|| format!("Failed to load manifest {}", manifest))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.summary())?);
            } else {
                print_info(&doc);
            }
        }
        Commands::Sizes => {
            for size in PageSize::standard() {
                println!("{}", size);
            }
        }
    }
    Ok(())
}

fn print_info(doc: &Document) {
    let metadata = doc.metadata();
    println!("{}", doc);
    println!("Title: {}", metadata.title.as_deref().unwrap_or("(none)"));
    println!("Author: {}", metadata.author.as_deref().unwrap_or("(none)"));
    println!("Producer: {}", metadata.producer);
    for page in doc.pages() {
        println!("  {}", page);
    }
}
