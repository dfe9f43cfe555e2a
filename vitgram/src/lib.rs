//! # Vitgram
//!
//! Vitgram is a small statistical NLP toolkit with two independent analyses:
//!
//! * scoring sentences with n-gram language models estimated from a training corpus
//!   (unsmoothed unigram, unsmoothed bigram and add-one smoothed bigram), and
//! * decoding the most probable part-of-speech tag sequence of a sentence with the Viterbi
//!   algorithm.
//!
//! ## Examples
//!
//! ```
//! use vitgram::{NgramScorer, Sentence, TrainingStats};
//!
//! let mut stats = TrainingStats::new();
//! for line in ["The dog barks", "The cat runs"] {
//!     stats.record_sentence(Sentence::from_raw(line).tokens());
//! }
//!
//! let scorer = NgramScorer::new(&stats).unwrap();
//! let s = Sentence::from_raw("the dog");
//! let scores = scorer.score(s.tokens());
//! assert_eq!("-4.1699", scores.unigram.to_string());
//! ```
//!
//! ```
//! use vitgram::{Decoder, ProbabilityTables, Sentence, Tag};
//!
//! let tables = ProbabilityTables::from_lines([
//!     "noun phi 0.7",
//!     "verb noun 0.6",
//!     "fish noun 0.4",
//!     "swim verb 0.3",
//! ])
//! .unwrap();
//! let decoder = Decoder::new(&tables);
//!
//! let s = Sentence::from_raw("Fish swim");
//! let lattice = decoder.decode(s.tokens()).unwrap();
//! assert_eq!(&[Tag::Noun, Tag::Verb], lattice.tags());
//! ```

pub mod errors;

mod estimator;
mod frequency;
mod logprob;
mod sentence;
mod table;
mod tag;
mod viterbi;

pub use estimator::{NgramScorer, SentenceScores};
pub use frequency::{bigrams, Context, TrainingStats};
pub use logprob::{log2, round_half_down, LogProb};
pub use sentence::Sentence;
pub use table::{ProbabilityTables, FALLBACK_PROBABILITY};
pub use tag::{Tag, N_SOURCE_TAGS, N_TAGS};
pub use viterbi::{Decoder, Lattice};
