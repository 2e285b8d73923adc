use crate::range::TokenRange;

/// Minimum normalized prefix length (in characters) that prefix search accepts
pub const MIN_PREFIX_LENGTH: usize = 2;

/// The only token separator
const SEPARATOR: u8 = b' ';

/// Normalize a token or query for use as an index key
///
/// Applied at every insertion and lookup boundary so stored keys are always
/// in this form. Lowercasing only: punctuation and accents are kept.
#[inline]
pub fn normalize(token: &str) -> String {
    token.to_lowercase()
}

/// One token occurrence: the normalized key and where it sits in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub range: TokenRange,
}

/// Split `content` on spaces, yielding normalized tokens with their ranges
pub fn tokenize(content: &str) -> TokenIterator<'_> {
    TokenIterator::new(content)
}

/// Tokenize a query string into normalized keys
pub fn tokenize_query(query: &str) -> Vec<String> {
    tokenize(query).map(|token| token.text).collect()
}

/// Iterator over the space-delimited tokens of a string
///
/// Ranges are byte offsets. The separator is ASCII, so every boundary lands
/// on a char boundary and `&content[range]` is always valid.
pub struct TokenIterator<'a> {
    content: &'a str,
    position: usize,
}

impl<'a> TokenIterator<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
        }
    }

    /// Skip runs of separators
    #[inline]
    fn skip_delimiters(&mut self) {
        let bytes = self.content.as_bytes();
        while self.position < bytes.len() && bytes[self.position] == SEPARATOR {
            self.position += 1;
        }
    }

    /// Read the next maximal run of non-separator bytes
    #[inline]
    fn read_token(&mut self) -> Option<TokenRange> {
        let bytes = self.content.as_bytes();
        let start = self.position;

        while self.position < bytes.len() && bytes[self.position] != SEPARATOR {
            self.position += 1;
        }

        if self.position > start {
            Some(TokenRange::new(start, self.position))
        } else {
            None
        }
    }
}

impl<'a> Iterator for TokenIterator<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_delimiters();

        if self.position >= self.content.len() {
            return None;
        }

        let range = self.read_token()?;
        Some(Token {
            text: normalize(&self.content[range.start..range.end]),
            range,
        })
    }
}
