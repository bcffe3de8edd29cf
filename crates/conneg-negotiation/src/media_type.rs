//! Media types (`Accept`, RFC 7231 section 5.3.2)
//!
//! A media type is `type/subtype[+suffix]` followed by `;name=value`
//! parameters. Type and subtype follow the RFC 6838 `restricted-name`
//! grammar; the structured syntax suffix (RFC 6839) is split off at the last
//! `+` of the subtype.

use crate::charset::CharacterEncoding;
use crate::comparator::compare_media_types;
use crate::negotiable::{Dimension, Negotiable};
use conneg_header::util::{parse_parameter, quote_if_needed};
use conneg_header::{HeaderError, HeaderResult, HeaderValue, tokenize};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;

/// Name of the charset parameter.
pub const CHARSET_PARAMETER: &str = "charset";

/// Maximum length of a type or subtype name (RFC 6838 section 4.2).
const MAX_RESTRICTED_NAME_LENGTH: usize = 127;

const WILDCARD: &str = "*";

/// An immutable media type or media range.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{MediaType, Negotiable};
///
/// let media_type: MediaType = "Text/HTML; level=1; Charset=\"UTF-8\"".parse().unwrap();
/// assert_eq!(media_type.main_type(), "text");
/// assert_eq!(media_type.subtype(), "html");
/// assert_eq!(media_type.to_header(), "text/html; charset=utf-8; level=1");
///
/// let range: MediaType = "text/*".parse().unwrap();
/// assert!(range.is_wildcard());
/// assert!(range.includes(&media_type));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaType {
	main_type: Cow<'static, str>,
	subtype: Cow<'static, str>,
	suffix: Option<Cow<'static, str>>,
	parameters: BTreeMap<String, String>,
}

impl MediaType {
	/// `*/*`
	pub const WILDCARD: Self = Self::from_static(WILDCARD, WILDCARD);
	/// `text/plain`
	pub const TEXT_PLAIN: Self = Self::from_static("text", "plain");
	/// `text/html`
	pub const TEXT_HTML: Self = Self::from_static("text", "html");
	/// `text/turtle`
	pub const TEXT_TURTLE: Self = Self::from_static("text", "turtle");
	/// `application/json`
	pub const APPLICATION_JSON: Self = Self::from_static("application", "json");
	/// `application/ld+json`
	pub const APPLICATION_LD_JSON: Self = Self {
		main_type: Cow::Borrowed("application"),
		subtype: Cow::Borrowed("ld"),
		suffix: Some(Cow::Borrowed("json")),
		parameters: BTreeMap::new(),
	};
	/// `application/rdf+xml`
	pub const APPLICATION_RDF_XML: Self = Self {
		main_type: Cow::Borrowed("application"),
		subtype: Cow::Borrowed("rdf"),
		suffix: Some(Cow::Borrowed("xml")),
		parameters: BTreeMap::new(),
	};

	const fn from_static(main_type: &'static str, subtype: &'static str) -> Self {
		Self {
			main_type: Cow::Borrowed(main_type),
			subtype: Cow::Borrowed(subtype),
			suffix: None,
			parameters: BTreeMap::new(),
		}
	}

	/// Parses a media type or media range.
	///
	/// # Errors
	///
	/// Returns a tokenizer error when the `;` structure is malformed and
	/// [`HeaderError::InvalidMediaType`], [`HeaderError::InvalidParameter`] or
	/// [`HeaderError::InvalidCharset`] for invalid components.
	pub fn parse(value: &str) -> HeaderResult<Self> {
		let parts = tokenize(value)?;
		let Some((range, parameters)) = parts.split_first() else {
			return Err(invalid(value, "media type must not be empty"));
		};

		let Some((main_type, subtype)) = range.split_once('/') else {
			return Err(invalid(value, "media type must have the form type/subtype"));
		};
		let (subtype, suffix) = match subtype.rsplit_once('+') {
			Some((subtype, suffix)) => (subtype, Some(suffix)),
			None => (subtype, None),
		};

		if main_type != WILDCARD && !is_restricted_name(main_type) {
			return Err(invalid(value, "type must be a valid restricted name"));
		}
		if subtype != WILDCARD && !is_restricted_name(subtype) {
			return Err(invalid(value, "subtype must be a valid restricted name"));
		}
		if let Some(suffix) = suffix
			&& !is_restricted_name(suffix)
		{
			return Err(invalid(value, "suffix must be a valid restricted name"));
		}
		if main_type == WILDCARD && (subtype != WILDCARD || suffix.is_some()) {
			return Err(invalid(value, "wildcard type requires a plain wildcard subtype"));
		}

		let mut media_type = Self {
			main_type: Cow::Owned(main_type.to_ascii_lowercase()),
			subtype: Cow::Owned(subtype.to_ascii_lowercase()),
			suffix: suffix.map(|s| Cow::Owned(s.to_ascii_lowercase())),
			parameters: BTreeMap::new(),
		};
		for part in parameters {
			let (name, value) = parse_parameter(part)?;
			media_type.insert_parameter(name, value, part)?;
		}
		Ok(media_type)
	}

	fn insert_parameter(&mut self, name: String, value: String, raw: &str) -> HeaderResult<()> {
		if name == "q" {
			return Err(HeaderError::InvalidParameter {
				value: raw.to_string(),
				reason: "quality is not a media type parameter",
			});
		}
		let value = if name == CHARSET_PARAMETER {
			let charset = CharacterEncoding::parse(&value)?;
			if charset.is_wildcard() {
				return Err(HeaderError::InvalidParameter {
					value: raw.to_string(),
					reason: "charset parameter cannot be a wildcard",
				});
			}
			charset.to_header()
		} else {
			value
		};

		match self.parameters.entry(name) {
			Entry::Occupied(_) => Err(HeaderError::InvalidParameter {
				value: raw.to_string(),
				reason: "duplicate parameter",
			}),
			Entry::Vacant(entry) => {
				entry.insert(value);
				Ok(())
			}
		}
	}

	/// The lower-cased top-level type, `*` for the wildcard.
	pub fn main_type(&self) -> &str {
		&self.main_type
	}

	/// The lower-cased subtype without its suffix, `*` for the wildcard.
	pub fn subtype(&self) -> &str {
		&self.subtype
	}

	/// The structured syntax suffix, e.g. `json` for `application/ld+json`.
	pub fn suffix(&self) -> Option<&str> {
		self.suffix.as_deref()
	}

	/// Parameters by lower-cased name.
	pub fn parameters(&self) -> &BTreeMap<String, String> {
		&self.parameters
	}

	/// Value of a parameter, looked up case-insensitively.
	pub fn parameter(&self, name: &str) -> Option<&str> {
		self.parameters
			.get(&name.to_ascii_lowercase())
			.map(String::as_str)
	}

	/// The `type/subtype[+suffix]` part without parameters.
	pub fn essence(&self) -> String {
		match &self.suffix {
			Some(suffix) => format!("{}/{}+{}", self.main_type, self.subtype, suffix),
			None => format!("{}/{}", self.main_type, self.subtype),
		}
	}

	/// Whether the top-level type is `*`.
	pub fn is_wildcard_type(&self) -> bool {
		self.main_type == WILDCARD
	}

	/// Whether the subtype is `*`.
	pub fn is_wildcard_subtype(&self) -> bool {
		self.subtype == WILDCARD
	}

	/// The charset carried as parameter, if any.
	pub fn charset(&self) -> Option<CharacterEncoding> {
		self.parameters
			.get(CHARSET_PARAMETER)
			.and_then(|value| CharacterEncoding::parse(value).ok())
	}

	/// Returns a copy carrying the given charset parameter.
	///
	/// Passing the wildcard removes the parameter instead.
	pub fn with_charset(&self, charset: &CharacterEncoding) -> Self {
		let mut copy = self.without_charset();
		if !charset.is_wildcard() {
			copy.parameters
				.insert(CHARSET_PARAMETER.to_string(), charset.to_header());
		}
		copy
	}

	/// Returns a copy without the charset parameter.
	pub fn without_charset(&self) -> Self {
		let mut copy = self.clone();
		copy.parameters.remove(CHARSET_PARAMETER);
		copy
	}

	/// Returns a copy with an additional parameter.
	///
	/// # Errors
	///
	/// Fails if the name is not a token, is `q`, is already present, or if a
	/// `charset` value is not a valid charset name.
	pub fn with_parameter(&self, name: &str, value: &str) -> HeaderResult<Self> {
		let raw = format!("{name}={}", quote_if_needed(value));
		let (name, value) = parse_parameter(&raw)?;
		let mut copy = self.clone();
		copy.insert_parameter(name, value, &raw)?;
		Ok(copy)
	}
}

fn invalid(value: &str, reason: &'static str) -> HeaderError {
	HeaderError::InvalidMediaType {
		value: value.to_string(),
		reason,
	}
}

// RFC 6838 restricted-name
fn is_restricted_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	name.len() <= MAX_RESTRICTED_NAME_LENGTH
		&& first.is_ascii_alphanumeric()
		&& chars.all(|c| {
			c.is_ascii_alphanumeric()
				|| matches!(c, '!' | '#' | '$' | '&' | '-' | '^' | '_' | '.' | '+')
		})
}

impl Negotiable for MediaType {
	const DIMENSION: Dimension = Dimension::MediaType;

	fn is_wildcard(&self) -> bool {
		self.is_wildcard_type() || self.is_wildcard_subtype()
	}

	fn to_header(&self) -> String {
		let mut header = self.essence();
		for (name, value) in &self.parameters {
			header.push_str("; ");
			header.push_str(name);
			header.push('=');
			header.push_str(&quote_if_needed(value));
		}
		header
	}

	fn includes(&self, other: &Self) -> bool {
		if self.suffix != other.suffix {
			return false;
		}
		self.is_wildcard_type()
			|| (self.main_type == other.main_type
				&& (self.is_wildcard_subtype() || self.subtype == other.subtype))
	}

	fn compare_specificity(&self, other: &Self) -> Ordering {
		compare_media_types(self, other)
	}
}

impl HeaderValue for MediaType {
	const HEADER_NAME: &'static str = "Accept";
	const ALLOWS_EXTENSION: bool = true;

	fn parse_header_value(value: &str) -> HeaderResult<Self> {
		Self::parse(value)
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_header())
	}
}

impl FromStr for MediaType {
	type Err = HeaderError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for MediaType {
	type Error = HeaderError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<MediaType> for String {
	fn from(value: MediaType) -> Self {
		value.to_header()
	}
}
