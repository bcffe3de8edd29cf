//! Languages (`Accept-Language`, RFC 7231 section 5.3.5)
//!
//! Language ranges follow the basic filtering scheme of RFC 4647: a range
//! matches a tag when the primary tags are equal and the range sub-tag is
//! either absent or a `-` bounded prefix of the tag's sub-tags.

use crate::comparator::compare_languages;
use crate::negotiable::{Dimension, Negotiable};
use conneg_header::{HeaderError, HeaderResult, HeaderValue};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Maximum length of a single language sub-tag.
const MAX_SUBTAG_LENGTH: usize = 8;

/// A language tag or range, or the `*` wildcard.
///
/// Tags are case-insensitive and kept lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
	primary: Cow<'static, str>,
	sub_tag: Option<Cow<'static, str>>,
}

impl Language {
	/// Matches any language.
	pub const WILDCARD: Self = Self::from_static("*");
	/// English.
	pub const ENGLISH: Self = Self::from_static("en");

	const fn from_static(primary: &'static str) -> Self {
		Self {
			primary: Cow::Borrowed(primary),
			sub_tag: None,
		}
	}

	/// Parses a language range such as `en`, `en-US`, `zh-Hant-TW` or `*`.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::Language;
	///
	/// let en_us = Language::parse("en-US").unwrap();
	/// assert_eq!(en_us.primary_tag(), "en");
	/// assert_eq!(en_us.sub_tag(), Some("us"));
	/// assert_eq!(en_us.to_string(), "en-us");
	///
	/// let err = Language::parse("e1").unwrap_err();
	/// assert_eq!(
	///     err.to_string(),
	///     "Invalid language-range 'e1': primary tag must be alphabetical"
	/// );
	/// ```
	///
	/// # Errors
	///
	/// Returns [`HeaderError::InvalidLanguage`] if the value is not a valid range.
	pub fn parse(value: &str) -> HeaderResult<Self> {
		if value == "*" {
			return Ok(Self::WILDCARD);
		}

		let (primary, sub_tag) = match value.split_once('-') {
			Some((primary, rest)) => (primary, Some(rest)),
			None => (value, None),
		};

		validate_length(value, primary, "primary tag must have 1 to 8 characters")?;
		if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
			return Err(invalid(value, "primary tag must be alphabetical"));
		}

		if let Some(sub_tag) = sub_tag {
			for part in sub_tag.split('-') {
				validate_length(value, part, "sub-tag must have 1 to 8 characters")?;
				if !part.chars().all(|c| c.is_ascii_alphanumeric()) {
					return Err(invalid(value, "sub-tag must be alphanumeric"));
				}
			}
		}

		Ok(Self {
			primary: Cow::Owned(primary.to_ascii_lowercase()),
			sub_tag: sub_tag.map(|s| Cow::Owned(s.to_ascii_lowercase())),
		})
	}

	/// Creates a language from a primary tag, e.g. `Language::new("fr")`.
	///
	/// # Errors
	///
	/// Returns [`HeaderError::InvalidLanguage`] if the tag is not alphabetical
	/// or longer than eight characters.
	pub fn new(primary: &str) -> HeaderResult<Self> {
		if primary.contains('-') {
			return Err(invalid(primary, "primary tag must be alphabetical"));
		}
		Self::parse(primary)
	}

	/// Creates a language with a sub-tag, e.g. `Language::with_sub_tag("en", "GB")`.
	///
	/// # Errors
	///
	/// Returns [`HeaderError::InvalidLanguage`] if either tag is invalid.
	pub fn with_sub_tag(primary: &str, sub_tag: &str) -> HeaderResult<Self> {
		if primary.contains('-') || primary == "*" {
			return Err(invalid(primary, "primary tag must be alphabetical"));
		}
		Self::parse(&format!("{primary}-{sub_tag}"))
	}

	/// The lower-cased primary tag (`*` for the wildcard).
	pub fn primary_tag(&self) -> &str {
		&self.primary
	}

	/// The lower-cased sub-tag(s) following the primary tag, if any.
	pub fn sub_tag(&self) -> Option<&str> {
		self.sub_tag.as_deref()
	}

	/// Converts the language into a locale identifier.
	///
	/// Returns `None` for the wildcard and for ranges that are not valid
	/// BCP 47 identifiers.
	pub fn to_language_identifier(&self) -> Option<LanguageIdentifier> {
		if self.is_wildcard() {
			return None;
		}
		self.to_header().parse().ok()
	}
}

fn invalid(value: &str, reason: &'static str) -> HeaderError {
	HeaderError::InvalidLanguage {
		value: value.to_string(),
		reason,
	}
}

fn validate_length(value: &str, part: &str, reason: &'static str) -> HeaderResult<()> {
	if part.is_empty() || part.len() > MAX_SUBTAG_LENGTH {
		return Err(invalid(value, reason));
	}
	Ok(())
}

impl Negotiable for Language {
	const DIMENSION: Dimension = Dimension::Language;

	fn is_wildcard(&self) -> bool {
		self.primary == "*"
	}

	fn to_header(&self) -> String {
		match &self.sub_tag {
			Some(sub_tag) => format!("{}-{}", self.primary, sub_tag),
			None => self.primary.to_string(),
		}
	}

	fn includes(&self, other: &Self) -> bool {
		if self.is_wildcard() {
			return true;
		}
		if other.is_wildcard() || self.primary != other.primary {
			return false;
		}
		match (&self.sub_tag, &other.sub_tag) {
			(None, _) => true,
			(Some(_), None) => false,
			(Some(range), Some(tag)) => {
				tag == range
					|| tag
						.strip_prefix(&**range)
						.is_some_and(|rest| rest.starts_with('-'))
			}
		}
	}

	fn compare_specificity(&self, other: &Self) -> Ordering {
		compare_languages(self, other)
	}
}

impl HeaderValue for Language {
	const HEADER_NAME: &'static str = "Accept-Language";

	fn parse_header_value(value: &str) -> HeaderResult<Self> {
		Self::parse(value)
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_header())
	}
}

impl FromStr for Language {
	type Err = HeaderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for Language {
	type Error = HeaderError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<Language> for String {
	fn from(value: Language) -> Self {
		value.to_header()
	}
}

impl TryFrom<&LanguageIdentifier> for Language {
	type Error = HeaderError;

	fn try_from(value: &LanguageIdentifier) -> Result<Self, Self::Error> {
		Self::parse(&value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("en", "en", None)]
	#[case("en-US", "en", Some("us"))]
	#[case("zh-Hant-TW", "zh", Some("hant-tw"))]
	#[case("de-1996", "de", Some("1996"))]
	#[case("*", "*", None)]
	fn test_parse(#[case] value: &str, #[case] primary: &str, #[case] sub_tag: Option<&str>) {
		let language = Language::parse(value).unwrap();
		assert_eq!(language.primary_tag(), primary);
		assert_eq!(language.sub_tag(), sub_tag);
	}

	#[rstest]
	#[case("", "primary tag must have 1 to 8 characters")]
	#[case("e1", "primary tag must be alphabetical")]
	#[case("abcdefghi", "primary tag must have 1 to 8 characters")]
	#[case("en-", "sub-tag must have 1 to 8 characters")]
	#[case("en--us", "sub-tag must have 1 to 8 characters")]
	#[case("en-u_s", "sub-tag must be alphanumeric")]
	#[case("*-us", "primary tag must be alphabetical")]
	fn test_parse_rejects(#[case] value: &str, #[case] expected_reason: &str) {
		match Language::parse(value) {
			Err(HeaderError::InvalidLanguage { reason, .. }) => assert_eq!(reason, expected_reason),
			other => panic!("unexpected result for {value:?}: {other:?}"),
		}
	}

	#[rstest]
	#[case("en", "en", true)]
	#[case("en", "en-us", true)]
	#[case("en-us", "en-us", true)]
	#[case("en-us", "en", false)]
	#[case("en-us", "en-gb", false)]
	#[case("zh-hant", "zh-hant-tw", true)]
	#[case("zh-han", "zh-hant", false)]
	#[case("en", "fr", false)]
	#[case("*", "fr-ca", true)]
	#[case("en", "*", false)]
	fn test_includes(#[case] range: &str, #[case] tag: &str, #[case] expected: bool) {
		let range = Language::parse(range).unwrap();
		let tag = Language::parse(tag).unwrap();
		assert_eq!(range.includes(&tag), expected);
	}

	#[rstest]
	fn test_constructors() {
		assert_eq!(Language::new("FR").unwrap().to_header(), "fr");
		assert_eq!(
			Language::with_sub_tag("en", "GB").unwrap().to_header(),
			"en-gb"
		);
		assert!(Language::new("en-gb").is_err());
		assert!(Language::with_sub_tag("*", "gb").is_err());
	}

	#[rstest]
	fn test_language_identifier_conversion() {
		let identifier: LanguageIdentifier = "en-US".parse().unwrap();
		let language = Language::try_from(&identifier).unwrap();
		assert_eq!(language.to_header(), "en-us");

		let back = language.to_language_identifier().unwrap();
		assert_eq!(back.language.as_str(), "en");
		assert_eq!(back.region.map(|r| r.to_string()), Some("US".to_string()));

		assert!(Language::WILDCARD.to_language_identifier().is_none());
	}
}
