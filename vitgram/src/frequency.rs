use hashbrown::HashMap;

/// Conditioning context of a bigram.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Context<'a> {
    /// Sentence start, written `phi`.
    Start,

    /// The preceding token.
    Word(&'a str),
}

/// Decomposes a sentence into its bigrams, in sentence order.
///
/// The first token is paired with [`Context::Start`].
///
/// # Examples
///
/// ```
/// use vitgram::{bigrams, Context};
///
/// let pairs: Vec<_> = bigrams(&["the", "dog"]).collect();
/// assert_eq!(vec![(Context::Start, "the"), (Context::Word("the"), "dog")], pairs);
/// ```
pub fn bigrams<S>(tokens: &[S]) -> impl Iterator<Item = (Context<'_>, &str)>
where
    S: AsRef<str>,
{
    tokens.iter().enumerate().map(move |(i, cur)| {
        let ctx = if i == 0 {
            Context::Start
        } else {
            Context::Word(tokens[i - 1].as_ref())
        };
        (ctx, cur.as_ref())
    })
}

/// Unigram and bigram counts collected from a training corpus.
///
/// Counts only grow while sentences are recorded; scoring borrows the
/// statistics immutably.
#[derive(Debug, Default, Clone)]
pub struct TrainingStats {
    unigrams: HashMap<String, u32>,
    // Keyed by the preceding token; sentence starts live in `start_bigrams`.
    bigrams: HashMap<String, HashMap<String, u32>>,
    start_bigrams: HashMap<String, u32>,
    phi_count: u32,
    n_tokens: u64,
}

fn increment(map: &mut HashMap<String, u32>, key: &str) {
    if let Some(count) = map.get_mut(key) {
        *count += 1;
    } else {
        map.insert(key.to_string(), 1);
    }
}

impl TrainingStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one training sentence.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Case-folded tokens of the sentence. An empty slice still counts as a
    ///              sentence.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::{Context, TrainingStats};
    ///
    /// let mut stats = TrainingStats::new();
    /// stats.record_sentence(&["the", "dog", "barks"]);
    /// stats.record_sentence(&["the", "cat", "runs"]);
    ///
    /// assert_eq!(2, stats.unigram_frequency("the"));
    /// assert_eq!(2, stats.bigram_frequency(Context::Start, "the"));
    /// assert_eq!(6, stats.total_unigram_token_count());
    /// assert_eq!(5, stats.vocabulary_size());
    /// ```
    pub fn record_sentence<S>(&mut self, tokens: &[S])
    where
        S: AsRef<str>,
    {
        self.phi_count += 1;
        for token in tokens {
            increment(&mut self.unigrams, token.as_ref());
            self.n_tokens += 1;
        }
        for (ctx, cur) in bigrams(tokens) {
            match ctx {
                Context::Start => increment(&mut self.start_bigrams, cur),
                Context::Word(prev) => {
                    if let Some(row) = self.bigrams.get_mut(prev) {
                        increment(row, cur);
                    } else {
                        let mut row = HashMap::new();
                        row.insert(cur.to_string(), 1);
                        self.bigrams.insert(prev.to_string(), row);
                    }
                }
            }
        }
    }

    /// Gets the number of occurrences of `token`, or 0 if it was never seen.
    pub fn unigram_frequency(&self, token: &str) -> u32 {
        self.unigrams.get(token).copied().unwrap_or(0)
    }

    /// Gets the number of occurrences of `cur` following `ctx`, or 0 if never seen.
    pub fn bigram_frequency(&self, ctx: Context, cur: &str) -> u32 {
        match ctx {
            Context::Start => self.start_bigrams.get(cur).copied(),
            Context::Word(prev) => self.bigrams.get(prev).and_then(|row| row.get(cur).copied()),
        }
        .unwrap_or(0)
    }

    /// Gets the count used as the denominator of `P(cur | ctx)`.
    ///
    /// This is the number of recorded sentences for [`Context::Start`] and the unigram
    /// frequency of the preceding token otherwise.
    pub fn context_frequency(&self, ctx: Context) -> u32 {
        match ctx {
            Context::Start => self.phi_count,
            Context::Word(prev) => self.unigram_frequency(prev),
        }
    }

    /// Gets the number of distinct tokens.
    pub fn vocabulary_size(&self) -> usize {
        self.unigrams.len()
    }

    /// Gets the total number of token occurrences.
    pub fn total_unigram_token_count(&self) -> u64 {
        self.n_tokens
    }

    /// Gets the number of recorded sentences.
    pub const fn phi_count(&self) -> u32 {
        self.phi_count
    }
}
