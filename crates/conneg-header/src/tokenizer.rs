//! Strict tokenizer for delimited header values
//!
//! Splits a header value such as `text/html;level=1;charset=utf-8` into its
//! tokens. Horizontal whitespace is only allowed around delimiters; every
//! other deviation from the grammar stops the iteration and is recorded as a
//! [`TokenizerFailure`]. Tokens already yielded before a failure stay valid.

use crate::error::{HeaderError, HeaderResult, TokenizerFailure};

/// Default delimiter between header parts.
pub const DEFAULT_DELIMITER: u8 = b';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	/// Nothing consumed yet.
	Initial,
	/// A token was just yielded; whitespace and then a delimiter are expected.
	BeforeDelimiter,
	/// Iteration completed, successfully or not.
	Finished,
}

/// Lazy, non-restartable iterator over the tokens of a header value.
///
/// # Examples
///
/// ```
/// use conneg_header::HeaderTokenizer;
///
/// let tokens: Vec<&str> = HeaderTokenizer::new("a; b ;c").collect();
/// assert_eq!(tokens, vec!["a", "b", "c"]);
///
/// let mut tokenizer = HeaderTokenizer::new("a;;b");
/// assert_eq!(tokenizer.next(), Some("a"));
/// assert_eq!(tokenizer.next(), None);
/// assert!(tokenizer.has_failure());
/// ```
#[derive(Debug, Clone)]
pub struct HeaderTokenizer<'a> {
	header: &'a str,
	delimiter: u8,
	position: usize,
	state: State,
	failure: Option<TokenizerFailure>,
}

impl<'a> HeaderTokenizer<'a> {
	/// Creates a tokenizer splitting at `;`.
	pub fn new(header: &'a str) -> Self {
		Self::with_delimiter(header, DEFAULT_DELIMITER)
	}

	/// Creates a tokenizer splitting at the given ASCII delimiter.
	pub fn with_delimiter(header: &'a str, delimiter: u8) -> Self {
		debug_assert!(delimiter.is_ascii() && !is_whitespace(delimiter) && delimiter != b'"');
		Self {
			header,
			delimiter,
			position: 0,
			state: State::Initial,
			failure: None,
		}
	}

	/// Returns `true` if the iteration stopped because of a grammar violation.
	pub fn has_failure(&self) -> bool {
		self.failure.is_some()
	}

	/// Returns the grammar violation that stopped the iteration, if any.
	pub fn failure(&self) -> Option<TokenizerFailure> {
		self.failure
	}

	/// Byte offset where the tokenizer currently stands (or where it failed).
	pub fn position(&self) -> usize {
		self.position
	}

	/// Converts the recorded failure into a [`HeaderError`].
	pub fn error(&self) -> Option<HeaderError> {
		self.failure.map(|kind| HeaderError::Tokenizer {
			kind,
			header: self.header.to_string(),
			position: self.position,
		})
	}

	fn fail(&mut self, kind: TokenizerFailure) -> Option<&'a str> {
		self.failure = Some(kind);
		self.state = State::Finished;
		None
	}

	fn peek(&self) -> Option<u8> {
		self.header.as_bytes().get(self.position).copied()
	}

	fn skip_whitespace(&mut self) -> usize {
		let start = self.position;
		while self.peek().is_some_and(is_whitespace) {
			self.position += 1;
		}
		self.position - start
	}

	fn read_token(&mut self) -> Option<&'a str> {
		let bytes = self.header.as_bytes();
		let start = self.position;
		let mut quoted = false;

		while self.position < bytes.len() {
			let current = bytes[self.position];
			if quoted {
				match current {
					b'\\' => self.position += 2,
					b'"' => {
						quoted = false;
						self.position += 1;
					}
					_ => self.position += 1,
				}
				continue;
			}
			if current == b'"' {
				quoted = true;
			} else if is_whitespace(current) || current == self.delimiter {
				break;
			}
			self.position += 1;
		}

		if quoted {
			self.position = self.position.min(bytes.len());
			return self.fail(TokenizerFailure::UnterminatedQuotedString);
		}

		self.state = State::BeforeDelimiter;
		Some(&self.header[start..self.position])
	}
}

impl<'a> Iterator for HeaderTokenizer<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		match self.state {
			State::Finished => None,
			State::Initial => match self.peek() {
				None => self.fail(TokenizerFailure::NoTokenFound),
				Some(b) if is_whitespace(b) => self.fail(TokenizerFailure::LeadingWhitespace),
				Some(b) if b == self.delimiter => self.fail(TokenizerFailure::LeadingDelimiter),
				Some(_) => self.read_token(),
			},
			State::BeforeDelimiter => {
				let leading = self.skip_whitespace();
				match self.peek() {
					None if leading > 0 => return self.fail(TokenizerFailure::TrailingWhitespace),
					None => {
						self.state = State::Finished;
						return None;
					}
					Some(b) if b != self.delimiter => {
						return self.fail(TokenizerFailure::NoDelimiterFound);
					}
					Some(_) => self.position += 1,
				}

				// After the delimiter
				let trailing = self.skip_whitespace();
				match self.peek() {
					None => self.fail(TokenizerFailure::DanglingBlock),
					Some(b) if b == self.delimiter && trailing > 0 => {
						self.fail(TokenizerFailure::WhitespaceBlock)
					}
					Some(b) if b == self.delimiter => self.fail(TokenizerFailure::EmptyBlock),
					Some(_) => self.read_token(),
				}
			}
		}
	}
}

impl std::iter::FusedIterator for HeaderTokenizer<'_> {}

/// Splits a header value at `;`, failing on the first grammar violation.
///
/// # Examples
///
/// ```
/// use conneg_header::{tokenize, TokenizerFailure};
///
/// assert_eq!(tokenize("a;b;c").unwrap(), vec!["a", "b", "c"]);
///
/// let err = tokenize(";a").unwrap_err();
/// assert_eq!(err.tokenizer_failure(), Some(TokenizerFailure::LeadingDelimiter));
/// ```
pub fn tokenize(header: &str) -> HeaderResult<Vec<&str>> {
	tokenize_with(header, DEFAULT_DELIMITER)
}

/// Splits a header value at the given delimiter, failing on the first grammar violation.
pub fn tokenize_with(header: &str, delimiter: u8) -> HeaderResult<Vec<&str>> {
	let mut tokenizer = HeaderTokenizer::with_delimiter(header, delimiter);
	let tokens: Vec<&str> = tokenizer.by_ref().collect();
	match tokenizer.error() {
		Some(err) => Err(err),
		None => Ok(tokens),
	}
}

pub(crate) fn is_whitespace(b: u8) -> bool {
	b == b' ' || b == b'\t'
}

/// Whether the byte at `offset` lies inside a quoted string of `header`.
pub(crate) fn is_inside_quotes(header: &str, offset: usize) -> bool {
	let mut quoted = false;
	let mut escaped = false;
	for &b in header.as_bytes().iter().take(offset) {
		if !quoted {
			quoted = b == b'"';
		} else if escaped {
			escaped = false;
		} else if b == b'\\' {
			escaped = true;
		} else if b == b'"' {
			quoted = false;
		}
	}
	quoted
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("a", vec!["a"])]
	#[case("a;b;c", vec!["a", "b", "c"])]
	#[case("a ; b\t;\tc", vec!["a", "b", "c"])]
	#[case("text/html;charset=\"a;b c\"", vec!["text/html", "charset=\"a;b c\""])]
	#[case("x=\"esc\\\"aped\";y", vec!["x=\"esc\\\"aped\"", "y"])]
	fn test_valid_headers(#[case] header: &str, #[case] expected: Vec<&str>) {
		let mut tokenizer = HeaderTokenizer::new(header);
		let tokens: Vec<&str> = tokenizer.by_ref().collect();
		assert_eq!(tokens, expected);
		assert!(!tokenizer.has_failure());
	}

	#[rstest]
	#[case(";a", TokenizerFailure::LeadingDelimiter, vec![])]
	#[case(" a", TokenizerFailure::LeadingWhitespace, vec![])]
	#[case("a ", TokenizerFailure::TrailingWhitespace, vec!["a"])]
	#[case("a;", TokenizerFailure::DanglingBlock, vec!["a"])]
	#[case("a; ", TokenizerFailure::DanglingBlock, vec!["a"])]
	#[case("a;;b", TokenizerFailure::EmptyBlock, vec!["a"])]
	#[case("a; ;b", TokenizerFailure::WhitespaceBlock, vec!["a"])]
	#[case("a b", TokenizerFailure::NoDelimiterFound, vec!["a"])]
	#[case("", TokenizerFailure::NoTokenFound, vec![])]
	#[case("a;b=\"open", TokenizerFailure::UnterminatedQuotedString, vec!["a"])]
	fn test_invalid_headers(
		#[case] header: &str,
		#[case] failure: TokenizerFailure,
		#[case] yielded: Vec<&str>,
	) {
		let mut tokenizer = HeaderTokenizer::new(header);
		let tokens: Vec<&str> = tokenizer.by_ref().collect();
		assert_eq!(tokens, yielded);
		assert_eq!(tokenizer.failure(), Some(failure));
	}

	#[rstest]
	fn test_iteration_stops_after_failure() {
		let mut tokenizer = HeaderTokenizer::new("a;;b");
		assert_eq!(tokenizer.next(), Some("a"));
		assert_eq!(tokenizer.next(), None);
		assert_eq!(tokenizer.next(), None);
		assert_eq!(tokenizer.failure(), Some(TokenizerFailure::EmptyBlock));
	}

	#[rstest]
	#[case("a;x=\"b;q=1\"", 6, true)]
	#[case("a;x=\"b;q=1\";q=1", 11, false)]
	#[case("a;x=\"b\\\";q=1\"", 8, true)]
	#[case("a;q=1", 1, false)]
	fn test_is_inside_quotes(#[case] header: &str, #[case] offset: usize, #[case] expected: bool) {
		assert_eq!(is_inside_quotes(header, offset), expected);
	}

	#[rstest]
	fn test_custom_delimiter() {
		assert_eq!(tokenize_with("a,b", b',').unwrap(), vec!["a", "b"]);
		assert_eq!(tokenize_with("a;b", b',').unwrap(), vec!["a;b"]);
	}

	#[rstest]
	fn test_error_reports_position() {
		let err = tokenize("abc;;d").unwrap_err();
		match err {
			HeaderError::Tokenizer { kind, header, position } => {
				assert_eq!(kind, TokenizerFailure::EmptyBlock);
				assert_eq!(header, "abc;;d");
				assert_eq!(position, 4);
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}
}
