use std::fmt::{Display, Formatter};

use crate::ValidationError;

/// Longest ticker forwarded upstream.
const MAX_SYMBOL_LEN: usize = 15;

/// Ticker as the cache keys it: trimmed and uppercased.
///
/// The ticker is otherwise opaque. Exchange-suffixed codes such as
/// `600104.SHH` are passed through unchanged, and deciding whether a ticker
/// exists is left to the upstream. Only input that could not travel as a
/// single query value is refused here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        match normalized.len() {
            0 => return Err(ValidationError::EmptySymbol),
            len if len > MAX_SYMBOL_LEN => {
                return Err(ValidationError::SymbolTooLong {
                    len,
                    max: MAX_SYMBOL_LEN,
                })
            }
            _ => {}
        }

        if let Some((index, ch)) = normalized
            .char_indices()
            .find(|(_, ch)| !is_ticker_char(*ch))
        {
            return Err(ValidationError::SymbolInvalidChar { ch, index });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_ticker_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || matches!(ch, '.' | '-')
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
