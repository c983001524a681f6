use anyhow::{Context, Result};
use clap::Parser;
use qa_core::{Answer, Corpus, QaEngine, RankConfig};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "questions")]
#[command(about = "Answer questions from a directory of text documents", long_about = None)]
struct Cli {
    /// Directory holding the corpus documents
    corpus: String,
    /// Number of top documents whose sentences are considered
    #[arg(long, default_value_t = 1)]
    files: usize,
    /// Number of sentences printed per answer
    #[arg(long, default_value_t = 1)]
    sentences: usize,
    /// Only load files with this extension (e.g. txt)
    #[arg(long)]
    ext: Option<String>,
    /// Answer a single query and exit
    #[arg(long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let corpus = match &cli.ext {
        Some(ext) => Corpus::load_with_extension(&cli.corpus, ext),
        None => Corpus::load(&cli.corpus),
    }
    .with_context(|| format!("loading corpus from {}", cli.corpus))?;
    let engine = QaEngine::new(corpus, RankConfig { file_matches: cli.files, sentence_matches: cli.sentences })?;
    tracing::info!(corpus = %cli.corpus, num_docs = engine.corpus().len(), num_terms = engine.idfs().len(), "ready for questions");

    let mut out = io::stdout().lock();
    if let Some(q) = &cli.query {
        let answer = engine.answer(q)?;
        return print_answer(&mut out, &answer);
    }
    ask_loop(&engine, io::stdin().lock(), &mut out)
}

/// Prompt, read one line, answer, repeat until end of input or `quit`.
fn ask_loop<R: BufRead, W: Write>(engine: &QaEngine, mut input: R, out: &mut W) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(out, "Query: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let q = line.trim();
        if q.is_empty() { continue; }
        if matches!(q, "quit" | "exit") { return Ok(()); }
        let answer = engine.answer(q)?;
        print_answer(out, &answer)?;
    }
}

fn print_answer<W: Write>(out: &mut W, answer: &Answer) -> Result<()> {
    if answer.is_empty() {
        writeln!(out, "No matching sentence.")?;
    }
    for s in &answer.sentences {
        writeln!(out, "{}", s.text)?;
    }
    Ok(())
}
