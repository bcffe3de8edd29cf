//! Variants: concrete combinations of media type, charset and language

use crate::charset::CharacterEncoding;
use crate::error::{NegotiationError, Result};
use crate::language::Language;
use crate::media_type::MediaType;
use crate::negotiable::Negotiable;
use std::fmt;

/// Media type of generated variants the client left open.
pub const DEFAULT_MEDIA_TYPE: MediaType = MediaType::TEXT_PLAIN;
/// Charset of generated variants the client left open.
pub const DEFAULT_CHARSET: CharacterEncoding = CharacterEncoding::UTF_8;
/// Language of generated variants the client left open.
pub const DEFAULT_LANGUAGE: Language = Language::ENGLISH;

/// A representation described by up to three dimension values.
///
/// None of the values is ever a wildcard, and the media type never carries a
/// `charset` parameter: it lives in [`Variant::charset`].
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{CharacterEncoding, MediaType, Variant};
///
/// let variant = Variant::new()
///     .with_type("text/html; charset=UTF-8".parse().unwrap())
///     .unwrap();
/// assert_eq!(variant.media_type(), Some(&MediaType::TEXT_HTML));
/// assert_eq!(variant.charset(), Some(&CharacterEncoding::UTF_8));
///
/// assert!(Variant::new().with_type(MediaType::WILDCARD).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Variant {
	media_type: Option<MediaType>,
	charset: Option<CharacterEncoding>,
	language: Option<Language>,
}

impl Variant {
	/// An empty variant.
	pub fn new() -> Self {
		Self::default()
	}

	/// The variant used for error responses unless configured otherwise:
	/// `text/plain`, `utf-8`, `en`.
	pub fn default_error() -> Self {
		Self {
			media_type: Some(DEFAULT_MEDIA_TYPE),
			charset: Some(DEFAULT_CHARSET),
			language: Some(DEFAULT_LANGUAGE),
		}
	}

	pub(crate) fn from_parts(
		media_type: Option<MediaType>,
		charset: Option<CharacterEncoding>,
		language: Option<Language>,
	) -> Self {
		Self {
			media_type,
			charset,
			language,
		}
	}

	/// Returns a copy with the given media type.
	///
	/// A `charset` parameter of the media type moves into the charset field,
	/// replacing any charset set before.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidVariant`] for a media range.
	pub fn with_type(mut self, media_type: MediaType) -> Result<Self> {
		reject_wildcard(&media_type)?;
		if let Some(charset) = media_type.charset() {
			self.charset = Some(charset);
		}
		self.media_type = Some(media_type.without_charset());
		Ok(self)
	}

	/// Returns a copy with the given charset.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidVariant`] for the wildcard.
	pub fn with_charset(mut self, charset: CharacterEncoding) -> Result<Self> {
		reject_wildcard(&charset)?;
		self.charset = Some(charset);
		Ok(self)
	}

	/// Returns a copy with the given language.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidVariant`] for the wildcard.
	pub fn with_language(mut self, language: Language) -> Result<Self> {
		reject_wildcard(&language)?;
		self.language = Some(language);
		Ok(self)
	}

	/// The media type, never carrying a `charset` parameter.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{CharacterEncoding, MediaType, Variant};
	///
	/// let variant = Variant::new()
	///     .with_type(MediaType::parse("text/html; charset=UTF-8").unwrap())
	///     .unwrap();
	/// assert_eq!(variant.media_type(), Some(&MediaType::TEXT_HTML));
	/// assert_eq!(variant.charset(), Some(&CharacterEncoding::UTF_8));
	/// assert_eq!(variant.language(), None);
	/// ```
	pub fn media_type(&self) -> Option<&MediaType> {
		self.media_type.as_ref()
	}

	/// The character encoding, if set.
	pub fn charset(&self) -> Option<&CharacterEncoding> {
		self.charset.as_ref()
	}

	/// The language, if set.
	pub fn language(&self) -> Option<&Language> {
		self.language.as_ref()
	}

	/// Whether no dimension is set.
	pub fn is_empty(&self) -> bool {
		self.media_type.is_none() && self.charset.is_none() && self.language.is_none()
	}

	/// The `Content-Type` value: the media type with the charset merged in.
	pub fn content_type(&self) -> Option<MediaType> {
		let media_type = self.media_type.as_ref()?;
		Some(match &self.charset {
			Some(charset) => media_type.with_charset(charset),
			None => media_type.clone(),
		})
	}

	/// Fills the unset dimensions with the default media type, charset and language.
	pub(crate) fn with_defaults(self) -> Self {
		Self {
			media_type: self.media_type.or(Some(DEFAULT_MEDIA_TYPE)),
			charset: self.charset.or(Some(DEFAULT_CHARSET)),
			language: self.language.or(Some(DEFAULT_LANGUAGE)),
		}
	}
}

fn reject_wildcard<T: Negotiable>(value: &T) -> Result<()> {
	if value.is_wildcard() {
		return Err(NegotiationError::InvalidVariant(format!(
			"{} cannot be the wildcard '{}'",
			T::DIMENSION,
			value
		)));
	}
	Ok(())
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let unset = || "-".to_string();
		write!(
			f,
			"{{type: {}, charset: {}, language: {}}}",
			self.media_type.as_ref().map_or_else(unset, Negotiable::to_header),
			self.charset.as_ref().map_or_else(unset, Negotiable::to_header),
			self.language.as_ref().map_or_else(unset, Negotiable::to_header),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_with_type_splits_charset() {
		let variant = Variant::new()
			.with_charset(CharacterEncoding::US_ASCII)
			.unwrap()
			.with_type(MediaType::parse("text/plain;charset=ISO-8859-1;format=flowed").unwrap())
			.unwrap();

		assert_eq!(variant.charset(), Some(&CharacterEncoding::ISO_8859_1));
		assert_eq!(
			variant.media_type().map(Negotiable::to_header).as_deref(),
			Some("text/plain; format=flowed")
		);
	}

	#[rstest]
	fn test_wildcards_rejected() {
		let err = Variant::new().with_type(MediaType::parse("text/*").unwrap()).unwrap_err();
		assert_eq!(
			err.to_string(),
			"Invalid variant: media type cannot be the wildcard 'text/*'"
		);
		assert!(Variant::new().with_charset(CharacterEncoding::WILDCARD).is_err());
		assert!(Variant::new().with_language(Language::WILDCARD).is_err());
	}

	#[rstest]
	fn test_content_type_merges_charset() {
		let variant = Variant::default_error();
		assert_eq!(
			variant.content_type().map(|m| m.to_header()).as_deref(),
			Some("text/plain; charset=utf-8")
		);
		assert_eq!(Variant::new().content_type(), None);
	}

	#[rstest]
	fn test_with_defaults_fills_unset_dimensions() {
		let variant = Variant::new()
			.with_language(Language::parse("fr").unwrap())
			.unwrap()
			.with_defaults();
		assert_eq!(variant.media_type(), Some(&DEFAULT_MEDIA_TYPE));
		assert_eq!(variant.charset(), Some(&DEFAULT_CHARSET));
		assert_eq!(variant.language().map(Language::primary_tag), Some("fr"));
	}

	#[rstest]
	fn test_display() {
		let variant = Variant::new().with_charset(CharacterEncoding::UTF_8).unwrap();
		assert_eq!(variant.to_string(), "{type: -, charset: utf-8, language: -}");
		assert!(!variant.is_empty());
		assert!(Variant::new().is_empty());
	}
}
