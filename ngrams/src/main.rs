use std::ffi::OsString;
use std::fs::File;
use std::io::{self, prelude::*, stdout, BufReader};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use vitgram::{NgramScorer, Sentence, SentenceScores, TrainingStats};

#[derive(Parser, Debug)]
#[command(
    name = "ngrams",
    about = "A program to score sentences with unigram and bigram language models.",
    override_usage = "ngrams <TRAIN> -test <TEST>"
)]
struct Args {
    /// A training corpus with one sentence per line
    train: PathBuf,

    /// Sentences to score, one per line
    #[arg(long)]
    test: PathBuf,

    /// Print debug messages
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Rewrites the single-dash `-test` marker into `--test`.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            if arg.to_str() == Some("-test") {
                OsString::from("--test")
            } else {
                arg
            }
        })
        .collect()
}

fn init_logger(verbose: u8) {
    let level = if verbose == 0 { "info" } else { "debug" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn write_scores<W>(out: &mut W, s: &Sentence, scores: &SentenceScores) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "S = {}", s.as_raw_text())?;
    writeln!(out)?;
    writeln!(out, "Unsmoothed Unigrams, logprob(S) = {}", scores.unigram)?;
    writeln!(out, "Unsmoothed Bigrams, logprob(S) = {}", scores.bigram)?;
    writeln!(out, "Smoothed Bigrams, logprob(S) = {}", scores.laplace)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse_from(normalize_args(std::env::args_os()));
    init_logger(args.verbose);

    let train_file = File::open(&args.train)?;
    let test_file = File::open(&args.test)?;

    log::info!("Loading {:?} ...", args.train);
    let mut stats = TrainingStats::new();
    for line in BufReader::new(train_file).lines() {
        let s = Sentence::from_raw(line?);
        stats.record_sentence(s.tokens());
    }
    log::info!(
        "# of sentences: {}, # of tokens: {}, # of types: {}",
        stats.phi_count(),
        stats.total_unigram_token_count(),
        stats.vocabulary_size(),
    );
    let scorer = NgramScorer::new(&stats)?;

    log::info!("Scoring {:?} ...", args.test);
    let mut out = stdout().lock();
    for (i, line) in BufReader::new(test_file).lines().enumerate() {
        let s = Sentence::from_raw(line?);
        if s.is_empty() {
            log::warn!("skipping blank line {}", i + 1);
            continue;
        }
        write_scores(&mut out, &s, &scorer.score(s.tokens()))?;
    }

    Ok(())
}
