use std::fmt;

/// Number of tags a word can be assigned.
pub const N_TAGS: usize = 4;

/// Number of transition sources, i.e. [`N_TAGS`] plus the sentence-start tag.
pub const N_SOURCE_TAGS: usize = N_TAGS + 1;

/// Part-of-speech tag.
///
/// The discriminants are the row/column indices of the probability matrices.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    /// Noun. (e.g. dog, time)
    Noun = 0,

    /// Verb. (e.g. barks, flies)
    Verb = 1,

    /// Infinitive marker. (e.g. to)
    Inf = 2,

    /// Preposition. (e.g. like, in)
    Prep = 3,

    /// Sentence start. Only used as a transition source.
    Phi = 4,
}

impl Tag {
    /// Tags the decoder assigns, in index order.
    pub const REAL: [Self; N_TAGS] = [Self::Noun, Self::Verb, Self::Inf, Self::Prep];

    /// Gets a tag from its lower-case name.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitgram::Tag;
    ///
    /// assert_eq!(Some(Tag::Inf), Tag::from_name("inf"));
    /// assert_eq!(Some(Tag::Phi), Tag::from_name("phi"));
    /// assert_eq!(None, Tag::from_name("adj"));
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "noun" => Some(Self::Noun),
            "verb" => Some(Self::Verb),
            "inf" => Some(Self::Inf),
            "prep" => Some(Self::Prep),
            "phi" => Some(Self::Phi),
            _ => None,
        }
    }

    /// Gets the lower-case name used in probability files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Inf => "inf",
            Self::Prep => "prep",
            Self::Phi => "phi",
        }
    }

    /// Gets the row/column index in the probability matrices.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        for tag in Tag::REAL.iter().chain(&[Tag::Phi]) {
            assert_eq!(Some(*tag), Tag::from_name(tag.name()));
        }
        assert_eq!(None, Tag::from_name("Verb"));
        assert_eq!("verb", Tag::Verb.to_string());
    }

    #[test]
    fn test_indices() {
        assert_eq!(0, Tag::Noun.index());
        assert_eq!(1, Tag::Verb.index());
        assert_eq!(2, Tag::Inf.index());
        assert_eq!(3, Tag::Prep.index());
        assert_eq!(4, Tag::Phi.index());
    }

    #[test]
    fn test_real_tags() {
        for (i, tag) in Tag::REAL.iter().enumerate() {
            assert_eq!(i, tag.index());
        }
        assert_eq!(N_SOURCE_TAGS - 1, Tag::Phi.index());
    }
}
