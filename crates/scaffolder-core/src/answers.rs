//! The answer set collected from the user before anything is written

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// CSS preprocessor choices offered by the generator
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CssPreprocessor {
    /// Regular 'ol CSS
    #[default]
    Css,
    /// SCSS/SASS
    Scss,
    /// LESS
    Less,
}

impl CssPreprocessor {
    pub const ALL: [CssPreprocessor; 3] = [
        CssPreprocessor::Css,
        CssPreprocessor::Scss,
        CssPreprocessor::Less,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CssPreprocessor::Css => "Regular 'ol CSS",
            CssPreprocessor::Scss => "SCSS/SASS",
            CssPreprocessor::Less => "LESS",
        }
    }

    /// Tag used in answers files and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            CssPreprocessor::Css => "css",
            CssPreprocessor::Scss => "scss",
            CssPreprocessor::Less => "less",
        }
    }
}

impl fmt::Display for CssPreprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Finalized user choices for one invocation
///
/// Built once by the prompt layer and only read afterwards. Every field is
/// always populated; optional answers fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub repo_name: String,
    pub description: String,
    pub author_name: String,
    pub author_email: String,
    pub github_username: String,
    pub css_preprocessor: CssPreprocessor,
    pub stylelint: bool,
}

/// Placeholder tokens recognized in template files
///
/// Only the answers that end up in file contents are exposed; the
/// preprocessor and stylelint choices drive selection, not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    RepoName,
    Description,
    AuthorName,
    AuthorEmail,
}

impl Token {
    pub const ALL: [Token; 4] = [
        Token::RepoName,
        Token::Description,
        Token::AuthorName,
        Token::AuthorEmail,
    ];

    /// Marker as it appears in template text
    pub fn marker(&self) -> &'static str {
        match self {
            Token::RepoName => "<%= repoName %>",
            Token::Description => "<%= description %>",
            Token::AuthorName => "<%= name %>",
            Token::AuthorEmail => "<%= email %>",
        }
    }
}

impl AnswerSet {
    /// Value substituted for a placeholder token
    pub fn token_value(&self, token: Token) -> &str {
        match token {
            Token::RepoName => &self.repo_name,
            Token::Description => &self.description,
            Token::AuthorName => &self.author_name,
            Token::AuthorEmail => &self.author_email,
        }
    }

    /// Substitute every recognized token in `text`
    pub fn substitute(&self, text: &str) -> String {
        self.substitute_with(text, verbatim)
    }

    /// Substitute tokens, passing each inserted value through `escape`
    ///
    /// The text is scanned once, so markers that appear inside an inserted
    /// value are written as-is and never expanded.
    pub fn substitute_with<F>(&self, text: &str, escape: F) -> String
    where
        F: Fn(&str) -> Cow<'_, str>,
    {
        const OPEN: &str = "<%=";

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match Token::ALL.iter().find(|t| tail.starts_with(t.marker())) {
                Some(token) => {
                    out.push_str(&escape(self.token_value(*token)));
                    rest = &tail[token.marker().len()..];
                }
                None => {
                    out.push_str(OPEN);
                    rest = &tail[OPEN.len()..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

fn verbatim(value: &str) -> Cow<'_, str> {
    Cow::Borrowed(value)
}
