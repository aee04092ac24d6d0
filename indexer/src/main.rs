use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use guide_search_core::persist::{load_documents, load_snapshot, save_snapshot, IndexPaths};
use guide_search_core::{
    highlight, highlighted_excerpt, EngineConfig, FieldWeights, InvertedIndex, MatchMode, SearchEngine, SearchOptions,
    DEFAULT_EXCERPT_LEN, DEFAULT_LIMIT,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query the guide search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index snapshot from a JSON/JSONL corpus file or directory
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output snapshot directory
        #[arg(long)]
        output: String,
    },
    /// Run one query and print the ranked hits
    Query(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// Corpus to index in memory before querying
    #[arg(long, conflicts_with = "index", required_unless_present = "index")]
    input: Option<String>,
    /// Snapshot directory written by `build`
    #[arg(long)]
    index: Option<String>,
    /// Query text
    #[arg(long)]
    q: String,
    /// Matching mode: exact or substring
    #[arg(long, default_value = "exact")]
    mode: MatchMode,
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
    /// Characters of content shown per hit
    #[arg(long, default_value_t = DEFAULT_EXCERPT_LEN)]
    excerpt_len: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => build_index(&input, &output),
        Commands::Query(args) => run_query(&args),
    }
}

fn build_index(input: &str, output: &str) -> Result<()> {
    let docs = load_documents(input)?;
    let index = InvertedIndex::build(docs, &FieldWeights::default());
    tracing::info!(num_docs = index.document_count(), num_terms = index.term_count(), "indexed documents");
    save_snapshot(&IndexPaths::new(output), &index).with_context(|| format!("writing snapshot to {output}"))?;
    tracing::info!(output, "index build complete");
    Ok(())
}

fn run_query(args: &QueryArgs) -> Result<()> {
    let config = EngineConfig { mode: args.mode, limit: args.limit, ..EngineConfig::default() };
    let engine = match (&args.input, &args.index) {
        (Some(input), _) => SearchEngine::new(load_documents(input)?, config),
        (None, Some(dir)) => SearchEngine::from_index(load_snapshot(&IndexPaths::new(dir))?, config),
        (None, None) => anyhow::bail!("either --input or --index is required"),
    };

    let query = args.q.trim();
    if !engine.accepts(query) {
        println!("query too short (minimum {} characters)", engine.config().min_query_len);
        return Ok(());
    }
    let hits = engine.search_with(query, &SearchOptions { mode: args.mode, limit: args.limit });
    if hits.is_empty() {
        println!("no results for {query:?}");
        return Ok(());
    }
    for hit in hits {
        let Some(doc) = engine.document(hit.doc_id) else { continue };
        println!("{:>7.2}  [{}] {}  {}", hit.score, doc.id, highlight(&doc.title, query), doc.url);
        println!("         {}", highlighted_excerpt(&doc.content, query, args.excerpt_len));
    }
    Ok(())
}
