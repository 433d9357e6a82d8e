//! Stop words excluded from the vocabulary.
//!
//! The English list is the one used by common count vectorizers, so vocabularies
//! built here line up with what those tools produce for the same corpus.

use std::collections::HashSet;

/// Which stop words the vectorizer drops
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StopWords {
    /// The standard English list
    #[default]
    English,
    /// Keep every token
    None,
    /// A caller-supplied list
    Custom(Vec<String>),
}

impl StopWords {
    /// Parse the `STOP_WORDS` setting.
    ///
    /// `english` (any case) and an empty value select the English list, `none`
    /// disables filtering, anything else is read as a comma-separated word list.
    pub fn from_config_str(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("english") {
            return StopWords::English;
        }
        if trimmed.eq_ignore_ascii_case("none") {
            return StopWords::None;
        }

        let words = trimmed
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        StopWords::Custom(words)
    }

    /// Build the lookup set for this choice
    pub fn filter(&self) -> StopWordsFilter {
        match self {
            StopWords::English => StopWordsFilter::new(ENGLISH_STOP_WORDS),
            StopWords::None => StopWordsFilter::new(Vec::<String>::new()),
            StopWords::Custom(words) => StopWordsFilter::new(words),
        }
    }
}

/// Case-insensitive stop word lookup
#[derive(Debug, Clone)]
pub struct StopWordsFilter {
    /// Stored lowercased
    stop_words: HashSet<String>,
}

impl StopWordsFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();

        Self { stop_words }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

/// Standard English stop words
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
    "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_str_english() {
        assert_eq!(StopWords::from_config_str("english"), StopWords::English);
        assert_eq!(StopWords::from_config_str("  English "), StopWords::English);
        assert_eq!(StopWords::from_config_str(""), StopWords::English);
    }

    #[test]
    fn test_from_config_str_none() {
        assert_eq!(StopWords::from_config_str("NONE"), StopWords::None);
        assert!(StopWords::None.filter().is_empty());
    }

    #[test]
    fn test_from_config_str_custom_list() {
        let parsed = StopWords::from_config_str("foo, bar,,baz ");
        assert_eq!(
            parsed,
            StopWords::Custom(vec!["foo".into(), "bar".into(), "baz".into()])
        );
        assert_eq!(parsed.filter().len(), 3);
    }

    #[test]
    fn test_english_filter_is_case_insensitive() {
        let filter = StopWords::English.filter();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("THE"));
        assert!(!filter.is_stop_word("space"));
        assert!(!filter.is_stop_word("sciencefiction"));
    }

    #[test]
    fn test_english_list_has_no_duplicates() {
        let filter = StopWords::English.filter();
        assert_eq!(filter.len(), ENGLISH_STOP_WORDS.len());
    }
}
