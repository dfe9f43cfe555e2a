use std::io::BufRead;

use hashbrown::HashMap;

use crate::errors::{Result, VitgramError};
use crate::tag::{Tag, N_SOURCE_TAGS, N_TAGS};

/// Probability assigned to every cell the table file does not mention, and to the emission of
/// an unknown word.
pub const FALLBACK_PROBABILITY: f64 = 0.0001;

#[derive(Debug, PartialEq)]
enum TableEntry<'a> {
    Transition { from: Tag, to: Tag, prob: f64 },
    Emission { word: &'a str, tag: Tag, prob: f64 },
}

fn parse_entry(line_no: usize, line: &str) -> Result<Option<TableEntry>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if fields.len() != 3 {
        return Err(VitgramError::invalid_table(
            line_no,
            format!("expected 3 fields, found {}", fields.len()),
        ));
    }
    let prob: f64 = fields[2].parse().map_err(|_| {
        VitgramError::invalid_table(line_no, format!("invalid probability `{}`", fields[2]))
    })?;
    if !(0.0..=1.0).contains(&prob) {
        return Err(VitgramError::invalid_table(
            line_no,
            format!("probability out of range: {prob}"),
        ));
    }
    // `A B p` reads P(A | B): the conditioning tag comes second.
    match (Tag::from_name(fields[0]), Tag::from_name(fields[1])) {
        (Some(Tag::Phi), Some(_)) => Err(VitgramError::invalid_table(
            line_no,
            "`phi` cannot be a transition destination",
        )),
        (Some(to), Some(from)) => Ok(Some(TableEntry::Transition { from, to, prob })),
        (None, Some(Tag::Phi)) => Err(VitgramError::invalid_table(
            line_no,
            "`phi` cannot emit a word",
        )),
        (None, Some(tag)) => Ok(Some(TableEntry::Emission {
            word: fields[0],
            tag,
            prob,
        })),
        (_, None) => Err(VitgramError::invalid_table(
            line_no,
            format!("unknown tag `{}`", fields[1]),
        )),
    }
}

// The emission matrix is stored word-major:
//
//        noun verb inf prep
//
// word1   0    1    2    3
// word2   4    5    6    7
// ...
//
// so that the decoder reads the scores of all tags for one word at once.

/// Transition and emission probabilities of the tagger.
#[derive(Debug, Clone)]
pub struct ProbabilityTables {
    transitions: [[f64; N_TAGS]; N_SOURCE_TAGS],
    emissions: Vec<[f64; N_TAGS]>,
    words: Vec<String>,
    word_ids: HashMap<String, usize>,
}

impl Default for ProbabilityTables {
    fn default() -> Self {
        Self {
            transitions: [[FALLBACK_PROBABILITY; N_TAGS]; N_SOURCE_TAGS],
            emissions: vec![],
            words: vec![],
            word_ids: HashMap::new(),
        }
    }
}

impl ProbabilityTables {
    /// Creates tables from the lines of a probability file.
    ///
    /// Each non-blank line has the form `A B p`. If both `A` and `B` are tag names, the line
    /// gives the transition probability `P(A | B)`; otherwise `A` is a word and the line gives
    /// the emission probability `P(A | B)`. Lines are case-insensitive.
    ///
    /// # Arguments
    ///
    /// * `lines` - Lines of the probability file.
    ///
    /// # Returns
    ///
    /// New tables. Cells not given by `lines` hold [`FALLBACK_PROBABILITY`].
    ///
    /// # Errors
    ///
    /// If a line is malformed, an error variant holding its 1-based line number will be
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::{ProbabilityTables, Tag};
    ///
    /// let tables = ProbabilityTables::from_lines(["noun phi 0.6", "runs noun 0.1"]).unwrap();
    /// assert_eq!(0.6, tables.transition(Tag::Phi, Tag::Noun));
    /// assert_eq!(Some(0), tables.word_id("runs"));
    /// assert_eq!(0.1, tables.emission(Tag::Noun, 0));
    /// assert_eq!(0.0001, tables.emission(Tag::Verb, 0));
    /// ```
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tables = Self::default();
        let mut n_transitions = 0;
        let mut n_emissions = 0;
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().to_lowercase();
            match parse_entry(i + 1, &line)? {
                Some(TableEntry::Transition { from, to, prob }) => {
                    tables.transitions[from.index()][to.index()] = prob;
                    n_transitions += 1;
                }
                Some(TableEntry::Emission { word, tag, prob }) => {
                    let word_id = tables.get_or_insert_word(word);
                    tables.emissions[word_id][tag.index()] = prob;
                    n_emissions += 1;
                }
                None => log::debug!("skipping blank line {}", i + 1),
            }
        }
        log::debug!(
            "loaded {} transitions and {} emissions over {} words",
            n_transitions,
            n_emissions,
            tables.n_words(),
        );
        Ok(tables)
    }

    /// Reads tables from a probability file.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is. Malformed lines are reported
    /// as in [`ProbabilityTables::from_lines()`].
    pub fn read<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let lines = rdr.lines().collect::<std::io::Result<Vec<_>>>()?;
        Self::from_lines(lines)
    }

    fn get_or_insert_word(&mut self, word: &str) -> usize {
        if let Some(&word_id) = self.word_ids.get(word) {
            return word_id;
        }
        let word_id = self.words.len();
        self.words.push(word.to_string());
        self.word_ids.insert(word.to_string(), word_id);
        self.emissions.push([FALLBACK_PROBABILITY; N_TAGS]);
        word_id
    }

    /// Gets `P(to | from)`.
    ///
    /// # Panics
    ///
    /// Panics if `to` is [`Tag::Phi`].
    #[inline(always)]
    pub fn transition(&self, from: Tag, to: Tag) -> f64 {
        self.transitions[from.index()][to.index()]
    }

    /// Gets `P(word | tag)`.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is [`Tag::Phi`] or `word_id` is out of range.
    #[inline(always)]
    pub fn emission(&self, tag: Tag, word_id: usize) -> f64 {
        self.emissions[word_id][tag.index()]
    }

    /// Gets the emission probabilities of a word for every tag in [`Tag::REAL`] order.
    ///
    /// # Panics
    ///
    /// Panics if `word_id` is out of range.
    #[inline(always)]
    pub fn emissions_of(&self, word_id: usize) -> &[f64; N_TAGS] {
        &self.emissions[word_id]
    }

    /// Gets the index of a lower-cased word.
    pub fn word_id(&self, word: &str) -> Option<usize> {
        self.word_ids.get(word).copied()
    }

    /// Gets the number of distinct words in the table.
    pub fn n_words(&self) -> usize {
        self.words.len()
    }

    /// Gets the words in index order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
noun phi 0.8
verb phi 0.1
noun noun 0.1
verb noun 0.5
prep verb 0.4
inf verb 0.3
verb inf 0.9
time noun 0.1
flies noun 0.05
flies verb 0.2
like prep 0.5
like verb 0.4
an noun 0.01
arrow noun 0.3
";

    #[test]
    fn test_parse_entry_transition() {
        assert_eq!(
            Some(TableEntry::Transition {
                from: Tag::Phi,
                to: Tag::Noun,
                prob: 0.8,
            }),
            parse_entry(1, "noun phi 0.8").unwrap()
        );
    }

    #[test]
    fn test_parse_entry_emission() {
        assert_eq!(
            Some(TableEntry::Emission {
                word: "flies",
                tag: Tag::Verb,
                prob: 0.2,
            }),
            parse_entry(1, "flies\tverb   0.2").unwrap()
        );
    }

    #[test]
    fn test_parse_entry_blank() {
        assert_eq!(None, parse_entry(1, "").unwrap());
        assert_eq!(None, parse_entry(1, "  \t ").unwrap());
    }

    #[test]
    fn test_parse_entry_errors() {
        assert_eq!(
            "InvalidTableError: line 3: expected 3 fields, found 2",
            &parse_entry(3, "noun phi").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidTableError: line 4: invalid probability `high`",
            &parse_entry(4, "noun phi high").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidTableError: line 5: probability out of range: 1.5",
            &parse_entry(5, "noun phi 1.5").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidTableError: line 6: `phi` cannot be a transition destination",
            &parse_entry(6, "phi noun 0.5").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidTableError: line 7: `phi` cannot emit a word",
            &parse_entry(7, "dog phi 0.5").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidTableError: line 8: unknown tag `adj`",
            &parse_entry(8, "dog adj 0.5").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_from_lines() {
        let tables = ProbabilityTables::from_lines(TABLE.lines()).unwrap();

        assert_eq!(0.8, tables.transition(Tag::Phi, Tag::Noun));
        assert_eq!(0.1, tables.transition(Tag::Phi, Tag::Verb));
        assert_eq!(0.5, tables.transition(Tag::Noun, Tag::Verb));
        assert_eq!(0.9, tables.transition(Tag::Inf, Tag::Verb));
        assert_eq!(
            FALLBACK_PROBABILITY,
            tables.transition(Tag::Prep, Tag::Prep)
        );

        assert_eq!(
            &["time", "flies", "like", "an", "arrow"],
            tables.words()
        );
        assert_eq!(5, tables.n_words());
        assert_eq!(Some(1), tables.word_id("flies"));
        assert_eq!(None, tables.word_id("banana"));

        let flies = tables.word_id("flies").unwrap();
        assert_eq!(0.05, tables.emission(Tag::Noun, flies));
        assert_eq!(0.2, tables.emission(Tag::Verb, flies));
        assert_eq!(FALLBACK_PROBABILITY, tables.emission(Tag::Inf, flies));
        assert_eq!(
            &[0.05, 0.2, FALLBACK_PROBABILITY, FALLBACK_PROBABILITY],
            tables.emissions_of(flies)
        );
    }

    #[test]
    fn test_from_lines_every_cell_filled() {
        let tables = ProbabilityTables::from_lines(TABLE.lines()).unwrap();

        for from in Tag::REAL.iter().chain(&[Tag::Phi]) {
            for &to in &Tag::REAL {
                assert!(tables.transition(*from, to) > 0.0);
            }
        }
        for word_id in 0..tables.n_words() {
            for &p in tables.emissions_of(word_id) {
                assert!(p > 0.0);
            }
        }
    }

    #[test]
    fn test_from_lines_case_insensitive() {
        let tables = ProbabilityTables::from_lines(["NOUN Phi 0.7", "Dog NOUN 0.2"]).unwrap();

        assert_eq!(0.7, tables.transition(Tag::Phi, Tag::Noun));
        assert_eq!(Some(0), tables.word_id("dog"));
        assert_eq!(0.2, tables.emission(Tag::Noun, 0));
    }

    #[test]
    fn test_from_lines_later_value_wins() {
        let tables =
            ProbabilityTables::from_lines(["dog noun 0.2", "", "dog noun 0.3"]).unwrap();

        assert_eq!(1, tables.n_words());
        assert_eq!(0.3, tables.emission(Tag::Noun, 0));
    }

    #[test]
    fn test_from_lines_error_line_number() {
        let err = ProbabilityTables::from_lines(["noun phi 0.8", "", "dog noun"]).unwrap_err();

        match err {
            VitgramError::InvalidTable(e) => assert_eq!(3, e.line()),
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_read() {
        let tables = ProbabilityTables::read(TABLE.as_bytes()).unwrap();

        assert_eq!(5, tables.n_words());
        assert_eq!(0.4, tables.transition(Tag::Verb, Tag::Prep));
    }

    #[test]
    fn test_empty_table() {
        let tables = ProbabilityTables::from_lines(Vec::<String>::new()).unwrap();

        assert_eq!(0, tables.n_words());
        assert_eq!(
            FALLBACK_PROBABILITY,
            tables.transition(Tag::Phi, Tag::Noun)
        );
    }
}
