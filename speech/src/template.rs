//! Command line templates.

use std::fmt;
use std::str::FromStr;

use crate::SpeechError;

/// Placeholder replaced by an argument when a template is expanded.
pub const PLACEHOLDER: &str = "%s";

/// A command line split into arguments, one of which takes the placeholder.
///
/// The line is split on single spaces, so consecutive spaces produce empty
/// arguments. The first argument containing [`PLACEHOLDER`] is the variable
/// one; if none does, a bare placeholder argument is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    tokens: Vec<String>,
    variable: usize,
}

impl CommandTemplate {
    /// Parses a command line.
    pub fn parse(line: &str) -> Result<Self, SpeechError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(SpeechError::InvalidTemplate("empty command line".to_string()));
        }

        let mut tokens: Vec<String> = line.split(' ').map(str::to_string).collect();
        let variable = match tokens.iter().position(|t| t.contains(PLACEHOLDER)) {
            Some(idx) => idx,
            None => {
                tokens.push(PLACEHOLDER.to_string());
                tokens.len() - 1
            }
        };

        Ok(Self { tokens, variable })
    }

    /// Returns the program, the first argument of the line.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Returns the index of the argument holding the placeholder.
    pub fn variable_index(&self) -> usize {
        self.variable
    }

    /// Builds an argument vector, expanding the variable argument once per
    /// value in `args`.
    pub fn expand<I, S>(&self, args: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let token = &self.tokens[self.variable];
        let mut argv = Vec::with_capacity(self.tokens.len());
        argv.extend_from_slice(&self.tokens[..self.variable]);
        argv.extend(
            args.into_iter()
                .map(|arg| token.replacen(PLACEHOLDER, arg.as_ref(), 1)),
        );
        argv.extend_from_slice(&self.tokens[self.variable + 1..]);
        argv
    }
}

impl FromStr for CommandTemplate {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
