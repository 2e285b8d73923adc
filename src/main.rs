use clap::{Parser, Subcommand};
use spanindex::{
    index_exists, load_index, save_index, IndexConfig, IndexData, IndexError, InvertedIndex,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "spanindex")]
#[command(about = "Whitespace token index with exact and prefix lookup")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a text file, one document per line
    ///
    /// Lines of the form `identifier<TAB>text` use that identifier;
    /// other lines are identified as `line:<n>`.
    Index {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Output index file path
        #[arg(short, long, default_value = "index.spix")]
        output: PathBuf,

        /// Merge into the existing index at the output path
        #[arg(long)]
        append: bool,

        /// Build the batch on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Look up one token
    Lookup {
        /// Index file path
        #[arg(short, long, default_value = "index.spix")]
        index: PathBuf,

        /// Token to look up (case-insensitive)
        token: String,
    },

    /// List indexed tokens starting with a prefix
    Prefix {
        /// Index file path
        #[arg(short, long, default_value = "index.spix")]
        index: PathBuf,

        /// Prefix, at least two characters
        prefix: String,

        /// Maximum results to return
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show index statistics
    Stats {
        /// Index file path
        #[arg(short, long, default_value = "index.spix")]
        index: PathBuf,

        /// Number of tokens to show per ranking
        #[arg(long, default_value = "10")]
        top: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            append,
            sequential,
        } => cmd_index(input, output, append, sequential),

        Commands::Lookup { index, token } => cmd_lookup(index, token),

        Commands::Prefix {
            index,
            prefix,
            limit,
        } => cmd_prefix(index, prefix, limit),

        Commands::Stats { index, top } => cmd_stats(index, top),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Split an input line into `(text, identifier)`
fn parse_line(line_number: usize, line: &str) -> (String, String) {
    match line.split_once('\t') {
        Some((identifier, text)) if !identifier.is_empty() => {
            (text.to_string(), identifier.to_string())
        }
        _ => (line.to_string(), format!("line:{}", line_number)),
    }
}

fn open_index(path: &Path) -> spanindex::Result<InvertedIndex> {
    if !index_exists(path) {
        return Err(IndexError::IndexNotFound(path.display().to_string()));
    }

    let start = Instant::now();
    let data = load_index(path)?;
    info!(
        path = %path.display(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "loaded index"
    );
    Ok(InvertedIndex::from_data(data, IndexConfig::default()))
}

fn cmd_index(
    input: PathBuf,
    output: PathBuf,
    append: bool,
    sequential: bool,
) -> spanindex::Result<()> {
    let contents = std::fs::read_to_string(&input)
        .map_err(|e| IndexError::InvalidInput(format!("{}: {}", input.display(), e)))?;

    let pairs: Vec<(String, String)> = contents
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect();

    let base = if append && index_exists(&output) {
        load_index(&output)?
    } else {
        IndexData::new()
    };

    let config = if sequential {
        IndexConfig::sequential()
    } else {
        IndexConfig::default()
    };

    let start = Instant::now();
    let index = InvertedIndex::from_data(base, config);
    index.index_batch(&pairs);
    let index_time = start.elapsed();

    println!(
        "Indexed {} documents: {} unique tokens across {} identifiers in {:.2}s",
        pairs.len(),
        index.token_count(),
        index.identifier_count(),
        index_time.as_secs_f64()
    );

    save_index(&index.snapshot_data(), &output)?;
    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    println!(
        "Saved index to {} ({:.2} KB)",
        output.display(),
        file_size as f64 / 1024.0
    );

    Ok(())
}

fn cmd_lookup(index_path: PathBuf, token: String) -> spanindex::Result<()> {
    let index = open_index(&index_path)?;

    let Some(data) = index.lookup_exact(&token) else {
        println!("Token \"{}\" not found", token);
        return Ok(());
    };

    println!(
        "Token \"{}\": {} occurrences in {} identifiers",
        spanindex::normalize(&token),
        data.occurrence_count(),
        data.identifier_count()
    );
    for identifier in data.sorted_identifiers() {
        let ranges: Vec<String> = data
            .ranges(identifier)
            .map(|list| list.iter().map(|r| format!("{}..{}", r.start, r.end)).collect())
            .unwrap_or_default();
        println!("  {}: {}", identifier, ranges.join(", "));
    }

    Ok(())
}

fn cmd_prefix(index_path: PathBuf, prefix: String, limit: Option<usize>) -> spanindex::Result<()> {
    let index = open_index(&index_path)?;

    let start = Instant::now();
    let matches = index.prefix_search(&prefix)?;
    let query_time = start.elapsed();

    println!(
        "Prefix: \"{}\" - {} tokens in {:.3}ms",
        prefix,
        matches.len(),
        query_time.as_secs_f64() * 1000.0
    );
    println!();

    for m in matches.iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "{} ({} occurrences, {} identifiers)",
            m.token,
            m.data.occurrence_count(),
            m.data.identifier_count()
        );
    }

    Ok(())
}

fn cmd_stats(index_path: PathBuf, top: usize) -> spanindex::Result<()> {
    let index = open_index(&index_path)?;

    let file_size = std::fs::metadata(&index_path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Index Statistics");
    println!("================");
    println!("Unique tokens: {}", index.token_count());
    println!("Identifiers:   {}", index.identifier_count());
    println!("Index size:    {:.2} KB", file_size as f64 / 1024.0);

    println!();
    println!("Most frequent tokens");
    for entry in index.tokens_by_total_occurrences().iter().take(top) {
        println!("  {:>8}  {}", entry.count, entry.token);
    }

    println!();
    println!("Most widespread tokens");
    for entry in index.tokens_by_unique_identifier_count().iter().take(top) {
        println!("  {:>8}  {}", entry.count, entry.token);
    }

    Ok(())
}
