use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use astra_index::indexer::keywords::{
    DEFAULT_CODE_KEYWORDS, DEFAULT_DOC_KEYWORDS, DEFAULT_DOC_SUMMARY_KEYWORDS,
};
use astra_index::indexer::util::human_size;
use astra_index::logging::init_logging;
use astra_index::{
    build_index, write_index, Capabilities, IndexMode, IndexOptions, KeywordLimits,
    NativeExtractor,
};
use clap::Parser;
use colored::*;

#[derive(Parser, Debug)]
#[command(
    name = "astra-index",
    version,
    about = "Build a searchable index of code symbols and document keywords"
)]
struct Cli {
    /// Folders to index
    #[arg(required = true, value_name = "FOLDER")]
    folders: Vec<PathBuf>,

    /// Output index file
    #[arg(short, long, value_name = "file", default_value = ".astra-index.json")]
    output: PathBuf,

    /// Show per-file progress
    #[arg(short, long)]
    verbose: bool,

    /// Do not process PDF, Excel or Word documents
    #[arg(long)]
    skip_docs: bool,

    /// Store only keywords for documents, not their full text
    #[arg(long)]
    docs_keywords_only: bool,

    /// Keywords kept per code file
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CODE_KEYWORDS)]
    max_code_keywords: usize,

    /// Keywords kept per document in full mode
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DOC_KEYWORDS)]
    max_doc_keywords: usize,

    /// Keywords kept per document with --docs-keywords-only
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DOC_SUMMARY_KEYWORDS)]
    max_doc_summary_keywords: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn options(&self) -> IndexOptions {
        IndexOptions {
            mode: if self.docs_keywords_only {
                IndexMode::Lightweight
            } else {
                IndexMode::Full
            },
            skip_docs: self.skip_docs,
            verbose: self.verbose,
            limits: KeywordLimits {
                code: self.max_code_keywords,
                document: self.max_doc_keywords,
                document_summary: self.max_doc_summary_keywords,
            },
        }
    }
}

fn parser_status(ready: bool, feature: &str) -> ColoredString {
    if ready {
        "✅ Ready".green()
    } else {
        format!("❌ not built (enable the `{}` feature)", feature).red()
    }
}

fn print_banner(cli: &Cli, caps: &Capabilities) {
    println!("\n{}", "🔍 AstraCode Index Builder".bold().blue());
    println!("{}", "=".repeat(50));

    if cli.skip_docs {
        println!("\n📦 Document parsers: {}", "skipped (--skip-docs)".yellow());
    } else {
        println!("\n📦 Document parsers:");
        println!("   PDF:   {}", parser_status(caps.pdf, "pdf"));
        println!("   Excel: {}", parser_status(caps.excel, "excel"));
        println!("   Word:  {}", parser_status(caps.word, "word"));
    }

    println!("\n📁 Scanning {} folder(s):", cli.folders.len());
    for folder in &cli.folders {
        println!("   - {}", folder.display());
    }
}

fn print_summary(index: &astra_index::Index, output: &Path, size: u64) {
    let stats = &index.stats;
    println!("\n{}", "✅ Index built successfully!".bold().green());
    println!("\n📊 Summary:");
    println!("   Mode:          {}", index.mode);
    println!(
        "   Files indexed: {} ({} code, {} documents)",
        stats.indexed_files(),
        stats.code_files,
        stats.doc_files
    );
    println!("   Total lines:   {}", stats.lines);
    println!("   Functions:     {}", stats.functions);
    let errors = format!("{}", stats.errors);
    println!(
        "   Errors:        {}",
        if stats.errors > 0 { errors.yellow() } else { errors.normal() }
    );
    if stats.skipped > 0 {
        println!("   Skipped:       {} (parser not available)", stats.skipped);
    }
    println!("   Index size:    {}", human_size(size));
    println!("\n📍 Index file: {}", output.display());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    let caps = Capabilities::probe();
    print_banner(&cli, &caps);

    let extractor = NativeExtractor::new(caps);
    let index = build_index(&cli.folders, &cli.options(), &extractor);

    println!("\n💾 Saving index to: {}", cli.output.display());
    let size = write_index(&index, &cli.output)
        .with_context(|| format!("Failed to save index to {}", cli.output.display()))?;

    print_summary(&index, &cli.output, size);
    Ok(())
}
