//! Error types for header value parsing.

use std::fmt;

/// Reason a header value could not be split into tokens.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerFailure {
	/// The header value starts with the delimiter.
	LeadingDelimiter,
	/// The header value starts with whitespace.
	LeadingWhitespace,
	/// Whitespace follows the last token.
	TrailingWhitespace,
	/// A delimiter is not followed by any token.
	DanglingBlock,
	/// Two delimiters follow each other.
	EmptyBlock,
	/// Two delimiters are separated by whitespace only.
	WhitespaceBlock,
	/// Two tokens are separated by something other than the delimiter.
	NoDelimiterFound,
	/// The header value is empty.
	NoTokenFound,
	/// A quoted string is not closed before the end of the header value.
	UnterminatedQuotedString,
}

impl fmt::Display for TokenizerFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let message = match self {
			Self::LeadingDelimiter => "Leading delimiter found",
			Self::LeadingWhitespace => "Leading whitespace found",
			Self::TrailingWhitespace => "Trailing whitespace found",
			Self::DanglingBlock => "Dangling block found",
			Self::EmptyBlock => "Empty block found",
			Self::WhitespaceBlock => "Whitespace block found",
			Self::NoDelimiterFound => "No delimiter found",
			Self::NoTokenFound => "No token found",
			Self::UnterminatedQuotedString => "Unterminated quoted string found",
		};
		f.write_str(message)
	}
}

/// Errors raised while parsing Accept-* header values and the entities they carry
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
	#[error("{kind} in '{header}' (position {position})")]
	Tokenizer {
		kind: TokenizerFailure,
		header: String,
		position: usize,
	},

	#[error("Invalid quality value '{0}'")]
	InvalidQuality(String),

	#[error("Multiple quality definitions found in '{0}'")]
	MultipleQualities(String),

	#[error("Content after quality definition not allowed: '{0}'")]
	ContentAfterQuality(String),

	#[error("Invalid accept extension '{0}'")]
	InvalidExtension(String),

	#[error("Invalid parameter '{value}': {reason}")]
	InvalidParameter { value: String, reason: &'static str },

	#[error("Invalid media type '{value}': {reason}")]
	InvalidMediaType { value: String, reason: &'static str },

	#[error("Invalid charset '{value}': {reason}")]
	InvalidCharset { value: String, reason: &'static str },

	#[error("Invalid language-range '{value}': {reason}")]
	InvalidLanguage { value: String, reason: &'static str },
}

impl HeaderError {
	/// Returns the tokenizer failure kind, if this error was raised by the tokenizer.
	pub fn tokenizer_failure(&self) -> Option<TokenizerFailure> {
		match self {
			Self::Tokenizer { kind, .. } => Some(*kind),
			_ => None,
		}
	}
}

/// Result type alias for header parsing.
pub type HeaderResult<T> = Result<T, HeaderError>;
