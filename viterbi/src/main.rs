use std::fs::File;
use std::io::{self, prelude::*, stdout, BufReader};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use vitgram::{Decoder, Lattice, ProbabilityTables, Sentence, Tag};

#[derive(Parser, Debug)]
#[command(
    name = "viterbi",
    about = "A program to find the most probable part-of-speech tags of sentences."
)]
struct Args {
    /// The probability file containing transition and emission probabilities
    probabilities: PathBuf,

    /// Sentences to tag, one per line
    sentences: PathBuf,

    /// Print debug messages
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = if verbose == 0 { "info" } else { "debug" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn write_lattice<W>(out: &mut W, s: &Sentence, lattice: &Lattice) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "FINAL VITERBI NETWORK")?;
    for (pos, word) in s.surfaces().iter().enumerate() {
        for tag in Tag::REAL {
            writeln!(out, "P({}={}) = {:.4}", word, tag, lattice.log_score(tag, pos))?;
        }
    }
    writeln!(out)?;
    writeln!(out, "FINAL BACKPTR NETWORK")?;
    for (pos, word) in s.surfaces().iter().enumerate().skip(1) {
        for tag in Tag::REAL {
            writeln!(
                out,
                "Backptr({}={}) = {}",
                word,
                tag,
                lattice.back_pointer(tag, pos)
            )?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "BEST TAG SEQUENCE HAS LOG PROBABILITY = {:.4}",
        lattice.path_score()
    )?;
    for (word, tag) in s.surfaces().iter().zip(lattice.tags()).rev() {
        writeln!(out, "{} -> {}", word, tag)?;
    }
    Ok(())
}

/// Decodes every line of `rdr` and writes one report per sentence.
///
/// A sentence that cannot be decoded is logged and skipped.
fn tag_sentences<R, W>(decoder: &Decoder, rdr: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for (i, line) in rdr.lines().enumerate() {
        let s = Sentence::from_raw(line?);
        if s.is_empty() {
            log::warn!("skipping blank line {}", i + 1);
            continue;
        }
        writeln!(out, "PROCESSING SENTENCE: {}", s.as_raw_text())?;
        writeln!(out)?;
        match decoder.decode(s.tokens()) {
            Ok(lattice) => write_lattice(out, &s, &lattice)?,
            Err(e) => log::error!("line {}: {}", i + 1, e),
        }
        writeln!(out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(args.verbose);

    let prob_file = File::open(&args.probabilities)?;
    let sent_file = File::open(&args.sentences)?;

    log::info!("Loading {:?} ...", args.probabilities);
    let tables = ProbabilityTables::read(BufReader::new(prob_file))?;
    log::info!("# of words: {}", tables.n_words());
    let decoder = Decoder::new(&tables);

    let mut out = stdout().lock();
    tag_sentences(&decoder, BufReader::new(sent_file), &mut out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lattice() {
        let tables = ProbabilityTables::from_lines([
            "noun phi 0.5",
            "verb noun 0.5",
            "fish noun 0.5",
            "swim verb 0.25",
        ])
        .unwrap();
        let s = Sentence::from_raw("Fish swim");
        let lattice = Decoder::new(&tables).decode(s.tokens()).unwrap();

        let mut buf = vec![];
        write_lattice(&mut buf, &s, &lattice).unwrap();
        let report = String::from_utf8(buf).unwrap();

        assert!(report.starts_with("FINAL VITERBI NETWORK\nP(Fish=noun) = -2.0000\n"));
        assert!(report.contains("Backptr(swim=verb) = noun\n"));
        assert!(report.contains("BEST TAG SEQUENCE HAS LOG PROBABILITY = -5.0000\n"));
        assert!(report.ends_with("swim -> verb\nFish -> noun\n"));
    }

    #[test]
    fn test_tag_sentences_continues_after_failure() {
        let tables = ProbabilityTables::from_lines([
            "noun phi 0.6",
            "verb phi 0.4",
            "noun verb 0.9",
            "x noun 0.5",
            "x verb 0.5",
            "y noun 0.8",
            "y verb 0.2",
        ])
        .unwrap();
        let decoder = Decoder::new(&tables);

        let mut buf = vec![];
        tag_sentences(&decoder, "zzz x\n\n  \nx Y\n".as_bytes(), &mut buf).unwrap();
        let report = String::from_utf8(buf).unwrap();

        assert_eq!(2, report.matches("PROCESSING SENTENCE: ").count());
        assert_eq!(1, report.matches("FINAL VITERBI NETWORK").count());
        let failed = report.find("PROCESSING SENTENCE: zzz x\n").unwrap();
        let decoded = report.find("PROCESSING SENTENCE: x Y\n").unwrap();
        assert!(failed < decoded);
        // the failed sentence only gets its header
        assert_eq!(
            "PROCESSING SENTENCE: zzz x\n\n\n\n",
            &report[failed..decoded]
        );
        assert!(report[decoded..].contains("FINAL VITERBI NETWORK\nP(x=noun) = "));
        assert!(report.ends_with("Y -> noun\nx -> verb\n\n\n"));
    }
}
