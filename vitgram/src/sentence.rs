/// Sentence split into whitespace-delimited tokens.
///
/// The raw line and the original-cased surfaces are kept for display, while
/// [`Sentence::tokens()`] holds the case-folded forms used for every lookup.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Sentence {
    pub(crate) text: String,
    pub(crate) surfaces: Vec<String>,
    pub(crate) tokens: Vec<String>,
}

impl Sentence {
    /// Creates a new [`Sentence`] from a given line.
    ///
    /// # Arguments
    ///
    /// * `text` - A raw line. Tokens are separated by one or more whitespace characters.
    ///
    /// # Returns
    ///
    /// A new [`Sentence`]. A blank line results in an empty sentence.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::Sentence;
    ///
    /// let s = Sentence::from_raw("The  Dog barks");
    /// assert_eq!(&["the", "dog", "barks"], s.tokens());
    /// assert_eq!(&["The", "Dog", "barks"], s.surfaces());
    ///
    /// let s = Sentence::from_raw("   ");
    /// assert!(s.is_empty());
    /// ```
    pub fn from_raw<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        let text = text.into();
        let surfaces: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let tokens = surfaces.iter().map(|s| s.to_lowercase()).collect();
        Self {
            text,
            surfaces,
            tokens,
        }
    }

    /// Gets the line this sentence was created from.
    pub fn as_raw_text(&self) -> &str {
        &self.text
    }

    /// Gets the lower-cased tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Gets the tokens with their original casing.
    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }

    /// Gets the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the line holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_from_raw_empty() {
        let s = Sentence::from_raw("");

        assert!(s.is_empty());
        assert_eq!(0, s.len());
        assert_eq!("", s.as_raw_text());
    }

    #[test]
    fn test_sentence_from_raw_whitespace_only() {
        let s = Sentence::from_raw(" \t  ");

        assert!(s.is_empty());
        assert_eq!(" \t  ", s.as_raw_text());
    }

    #[test]
    fn test_sentence_from_raw() {
        let s = Sentence::from_raw("  Time flies\tLIKE an  arrow ");

        let expected = Sentence {
            text: "  Time flies\tLIKE an  arrow ".to_string(),
            surfaces: vec![
                "Time".to_string(),
                "flies".to_string(),
                "LIKE".to_string(),
                "an".to_string(),
                "arrow".to_string(),
            ],
            tokens: vec![
                "time".to_string(),
                "flies".to_string(),
                "like".to_string(),
                "an".to_string(),
                "arrow".to_string(),
            ],
        };
        assert_eq!(expected, s);
        assert_eq!(5, s.len());
    }

    #[test]
    fn test_sentence_from_raw_non_ascii() {
        let s = Sentence::from_raw("ÉCOLE Straße");

        assert_eq!(&["école", "straße"], s.tokens());
        assert_eq!(&["ÉCOLE", "Straße"], s.surfaces());
    }
}
