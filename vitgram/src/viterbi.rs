use crate::errors::{Result, VitgramError};
use crate::logprob::log2;
use crate::table::{ProbabilityTables, FALLBACK_PROBABILITY};
use crate::tag::{Tag, N_TAGS};

/// Viterbi lattice of one sentence.
///
/// Holds the best-path score and the back pointer of every (tag, position) cell, together with
/// the decoded tag sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    // scores[pos][tag]
    scores: Vec<[f64; N_TAGS]>,
    back_pointers: Vec<[Tag; N_TAGS]>,
    tags: Vec<Tag>,
}

impl Lattice {
    /// Gets the number of positions.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if the lattice has no positions.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Gets the probability of the best path ending with `tag` at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is [`Tag::Phi`] or `pos` is out of range.
    pub fn score(&self, tag: Tag, pos: usize) -> f64 {
        self.scores[pos][tag.index()]
    }

    /// Gets the base-2 logarithm of [`Lattice::score()`]. A zero score gives negative infinity.
    pub fn log_score(&self, tag: Tag, pos: usize) -> f64 {
        log2(self.score(tag, pos))
    }

    /// Gets the tag at `pos - 1` on the best path ending with `tag` at `pos`.
    ///
    /// Position 0 always points to [`Tag::Noun`].
    pub fn back_pointer(&self, tag: Tag, pos: usize) -> Tag {
        self.back_pointers[pos][tag.index()]
    }

    /// Gets the decoded tag of each position.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Gets the reported score of the decoded path.
    ///
    /// This is the minimum of the per-position log scores along the path, starting from 0. It is
    /// not the joint log-probability of the path.
    pub fn path_score(&self) -> f64 {
        self.tags
            .iter()
            .enumerate()
            .map(|(pos, &tag)| self.log_score(tag, pos))
            .fold(0.0, f64::min)
    }
}

/// Decoder finding the most probable tag sequence of a sentence.
pub struct Decoder<'a> {
    tables: &'a ProbabilityTables,
}

impl<'a> Decoder<'a> {
    /// Creates a new decoder.
    ///
    /// # Arguments
    ///
    /// * `tables` - Transition and emission probabilities.
    ///
    /// # Returns
    ///
    /// A new decoder.
    pub const fn new(tables: &'a ProbabilityTables) -> Self {
        Self { tables }
    }

    /// Decodes a sentence.
    ///
    /// Ties between candidate tags are broken toward the lowest tag index. A word missing from
    /// the tables is emitted with [`FALLBACK_PROBABILITY`], except at the beginning of the
    /// sentence.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Lower-cased tokens of the sentence.
    ///
    /// # Returns
    ///
    /// The filled lattice.
    ///
    /// # Errors
    ///
    /// If `tokens` is empty, or if its first word is not in the tables, an error variant will
    /// be returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::{Decoder, ProbabilityTables, Tag};
    ///
    /// let tables = ProbabilityTables::from_lines([
    ///     "noun phi 0.6",
    ///     "verb phi 0.4",
    ///     "runs noun 0.1",
    ///     "runs verb 0.9",
    /// ])
    /// .unwrap();
    /// let decoder = Decoder::new(&tables);
    ///
    /// let lattice = decoder.decode(&["runs"]).unwrap();
    /// assert_eq!(&[Tag::Verb], lattice.tags());
    ///
    /// assert!(decoder.decode(&["walks"]).is_err());
    /// ```
    pub fn decode<S>(&self, tokens: &[S]) -> Result<Lattice>
    where
        S: AsRef<str>,
    {
        let first = tokens
            .first()
            .ok_or_else(|| VitgramError::invalid_argument("tokens", "the sentence is empty"))?
            .as_ref();
        let first_id = self
            .tables
            .word_id(first)
            .ok_or_else(|| VitgramError::unknown_word(first))?;

        let mut scores = Vec::with_capacity(tokens.len());
        let mut back_pointers = Vec::with_capacity(tokens.len());

        let emissions = self.tables.emissions_of(first_id);
        let mut col = [0.0; N_TAGS];
        for tag in Tag::REAL {
            col[tag.index()] = emissions[tag.index()] * self.tables.transition(Tag::Phi, tag);
        }
        scores.push(col);
        back_pointers.push([Tag::Noun; N_TAGS]);

        for token in &tokens[1..] {
            let token = token.as_ref();
            let prev_col = col;
            let emissions = match self.tables.word_id(token) {
                Some(word_id) => *self.tables.emissions_of(word_id),
                None => {
                    log::debug!("unknown word: {token}");
                    [FALLBACK_PROBABILITY; N_TAGS]
                }
            };
            let mut ptrs = [Tag::Noun; N_TAGS];
            for tag in Tag::REAL {
                let mut best = 0.0;
                let mut best_prev = Tag::Noun;
                for prev in Tag::REAL {
                    let s = prev_col[prev.index()] * self.tables.transition(prev, tag);
                    if s > best {
                        best = s;
                        best_prev = prev;
                    }
                }
                col[tag.index()] = emissions[tag.index()] * best;
                ptrs[tag.index()] = best_prev;
            }
            scores.push(col);
            back_pointers.push(ptrs);
        }

        // Falls back to the first tag when no path has a positive score.
        let mut best = 0.0;
        let mut best_tag = Tag::Noun;
        for tag in Tag::REAL {
            if col[tag.index()] > best {
                best = col[tag.index()];
                best_tag = tag;
            }
        }

        let mut tags = vec![best_tag; tokens.len()];
        for pos in (0..tokens.len() - 1).rev() {
            tags[pos] = back_pointers[pos + 1][tags[pos + 1].index()];
        }

        Ok(Lattice {
            scores,
            back_pointers,
            tags,
        })
    }
}
