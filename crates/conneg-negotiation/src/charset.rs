//! Character encodings (`Accept-Charset`, RFC 7231 section 5.3.3)

use crate::comparator::compare_charsets;
use crate::negotiable::{Dimension, Negotiable};
use conneg_header::{HeaderError, HeaderResult, HeaderValue};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Maximum length of a registered charset name (RFC 2978).
const MAX_CHARSET_LENGTH: usize = 40;

/// A character encoding, or the `*` wildcard.
///
/// Names are case-insensitive and kept lower-cased.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::CharacterEncoding;
///
/// let charset: CharacterEncoding = "UTF-8".parse().unwrap();
/// assert_eq!(charset, CharacterEncoding::UTF_8);
/// assert_eq!(charset.to_string(), "utf-8");
/// assert!("utf 8".parse::<CharacterEncoding>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterEncoding {
	name: Cow<'static, str>,
}

impl CharacterEncoding {
	/// Matches any character encoding.
	pub const WILDCARD: Self = Self::from_static("*");
	/// UTF-8 (RFC 3629).
	pub const UTF_8: Self = Self::from_static("utf-8");
	/// US-ASCII.
	pub const US_ASCII: Self = Self::from_static("us-ascii");
	/// ISO-8859-1 (Latin-1).
	pub const ISO_8859_1: Self = Self::from_static("iso-8859-1");

	const fn from_static(name: &'static str) -> Self {
		Self {
			name: Cow::Borrowed(name),
		}
	}

	/// Parses a charset name or `*`.
	///
	/// # Errors
	///
	/// Returns [`HeaderError::InvalidCharset`] if the name is empty, too long or
	/// contains characters outside the RFC 2978 `mime-charset` alphabet.
	pub fn parse(value: &str) -> HeaderResult<Self> {
		if value == "*" {
			return Ok(Self::WILDCARD);
		}
		if value.is_empty() {
			return Err(invalid(value, "charset name must not be empty"));
		}
		if value.len() > MAX_CHARSET_LENGTH {
			return Err(invalid(value, "charset name must be at most 40 characters"));
		}
		if !value.chars().all(is_charset_char) {
			return Err(invalid(value, "charset name contains an invalid character"));
		}
		Ok(Self {
			name: Cow::Owned(value.to_ascii_lowercase()),
		})
	}

	/// The lower-cased charset name.
	pub fn name(&self) -> &str {
		&self.name
	}
}

fn invalid(value: &str, reason: &'static str) -> HeaderError {
	HeaderError::InvalidCharset {
		value: value.to_string(),
		reason,
	}
}

// RFC 2978 mime-charset-chars
fn is_charset_char(c: char) -> bool {
	c.is_ascii_alphanumeric()
		|| matches!(
			c,
			'!' | '#' | '$' | '%' | '&' | '\'' | '+' | '-' | '^' | '_' | '`' | '{' | '}' | '~'
		)
}

impl Negotiable for CharacterEncoding {
	const DIMENSION: Dimension = Dimension::Charset;

	fn is_wildcard(&self) -> bool {
		self.name == "*"
	}

	fn to_header(&self) -> String {
		self.name.to_string()
	}

	fn includes(&self, other: &Self) -> bool {
		self.is_wildcard() || self == other
	}

	fn compare_specificity(&self, other: &Self) -> Ordering {
		compare_charsets(self, other)
	}
}

impl HeaderValue for CharacterEncoding {
	const HEADER_NAME: &'static str = "Accept-Charset";

	fn parse_header_value(value: &str) -> HeaderResult<Self> {
		Self::parse(value)
	}
}

impl fmt::Display for CharacterEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

impl FromStr for CharacterEncoding {
	type Err = HeaderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for CharacterEncoding {
	type Error = HeaderError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<CharacterEncoding> for String {
	fn from(value: CharacterEncoding) -> Self {
		value.name.into_owned()
	}
}
