//! The token cursor shared by the options and params phases.

use std::collections::VecDeque;

/// An owned queue of command-line tokens, consumed from the front.
///
/// Both parse phases advance the same `Args` through `&mut`, so whatever the
/// options phase leaves behind is exactly what the params phase sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    tokens: VecDeque<String>,
}

impl Args {
    /// Build a cursor over the given tokens.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a cursor over the process arguments, skipping the program name.
    pub fn from_env() -> Self {
        Self::new(std::env::args().skip(1))
    }

    /// Look at the next token without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.front().map(String::as_str)
    }

    /// Remove and return the next token.
    pub fn shift(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }

    /// Remove and return every remaining token.
    pub fn take_rest(&mut self) -> Vec<String> {
        self.tokens.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consume the cursor, returning what is left.
    pub fn into_vec(self) -> Vec<String> {
        self.tokens.into()
    }
}

impl From<Vec<String>> for Args {
    fn from(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Args {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
