use crate::errors::{Result, VitgramError};
use crate::frequency::{bigrams, Context, TrainingStats};
use crate::logprob::{log2, LogProb};

/// Sentence log-probabilities under the three estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceScores {
    /// Unsmoothed unigram model.
    pub unigram: LogProb,

    /// Unsmoothed bigram model.
    pub bigram: LogProb,

    /// Add-one (Laplace) smoothed bigram model. Always defined.
    pub laplace: LogProb,
}

/// Scorer estimating probabilities from [`TrainingStats`].
pub struct NgramScorer<'a> {
    stats: &'a TrainingStats,
    n_tokens: f64,
    vocab_size: f64,
}

impl<'a> NgramScorer<'a> {
    /// Creates a new scorer.
    ///
    /// # Arguments
    ///
    /// * `stats` - Statistics of a training corpus.
    ///
    /// # Returns
    ///
    /// A new scorer.
    ///
    /// # Errors
    ///
    /// If `stats` contains no tokens, an error variant will be returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::{LogProb, NgramScorer, TrainingStats};
    ///
    /// let mut stats = TrainingStats::new();
    /// stats.record_sentence(&["the", "dog", "barks"]);
    /// stats.record_sentence(&["the", "cat", "runs"]);
    ///
    /// let scorer = NgramScorer::new(&stats).unwrap();
    /// let scores = scorer.score(&["the", "fish", "swims"]);
    /// assert_eq!(LogProb::Undefined, scores.bigram);
    /// assert!(scores.laplace.is_defined());
    /// ```
    pub fn new(stats: &'a TrainingStats) -> Result<Self> {
        if stats.vocabulary_size() == 0 {
            return Err(VitgramError::invalid_argument(
                "stats",
                "the training corpus contains no tokens",
            ));
        }
        Ok(Self {
            stats,
            n_tokens: stats.total_unigram_token_count() as f64,
            vocab_size: stats.vocabulary_size() as f64,
        })
    }

    /// Computes `P(w) = freq(w) / N`, or 0 for an unseen word.
    pub fn unigram_probability(&self, token: &str) -> f64 {
        let freq = self.stats.unigram_frequency(token);
        if freq == 0 {
            0.0
        } else {
            f64::from(freq) / self.n_tokens
        }
    }

    /// Computes the unsmoothed `P(cur | ctx)`.
    ///
    /// # Returns
    ///
    /// `None` if the bigram was never observed.
    pub fn bigram_probability(&self, ctx: Context, cur: &str) -> Option<f64> {
        let freq = self.stats.bigram_frequency(ctx, cur);
        if freq == 0 {
            return None;
        }
        Some(f64::from(freq) / f64::from(self.stats.context_frequency(ctx)))
    }

    /// Computes the add-one smoothed `P(cur | ctx) = (freq + 1) / (context + V)`.
    ///
    /// The result is always in `(0, 1]`.
    pub fn laplace_probability(&self, ctx: Context, cur: &str) -> f64 {
        let freq = f64::from(self.stats.bigram_frequency(ctx, cur));
        let context = f64::from(self.stats.context_frequency(ctx));
        (freq + 1.0) / (context + self.vocab_size)
    }

    /// Sums `log2 P(w)` over the sentence.
    ///
    /// The result is undefined if any word was never observed.
    pub fn unigram_log_prob<S>(&self, tokens: &[S]) -> LogProb
    where
        S: AsRef<str>,
    {
        tokens
            .iter()
            .map(|w| LogProb::from_probability(self.unigram_probability(w.as_ref())))
            .sum()
    }

    /// Sums `log2 P(cur | prev)` over the sentence.
    ///
    /// The result is undefined as soon as one bigram, including the sentence-initial one, was
    /// never observed.
    pub fn bigram_log_prob<S>(&self, tokens: &[S]) -> LogProb
    where
        S: AsRef<str>,
    {
        let mut total = 0.0;
        for (ctx, cur) in bigrams(tokens) {
            match self.bigram_probability(ctx, cur) {
                Some(p) => total += log2(p),
                None => return LogProb::Undefined,
            }
        }
        LogProb::Defined(total)
    }

    /// Sums the add-one smoothed `log2 P(cur | prev)` over the sentence.
    pub fn laplace_log_prob<S>(&self, tokens: &[S]) -> LogProb
    where
        S: AsRef<str>,
    {
        LogProb::Defined(
            bigrams(tokens)
                .map(|(ctx, cur)| log2(self.laplace_probability(ctx, cur)))
                .sum(),
        )
    }

    /// Scores a sentence under all three estimators.
    pub fn score<S>(&self, tokens: &[S]) -> SentenceScores
    where
        S: AsRef<str>,
    {
        SentenceScores {
            unigram: self.unigram_log_prob(tokens),
            bigram: self.bigram_log_prob(tokens),
            laplace: self.laplace_log_prob(tokens),
        }
    }
}
