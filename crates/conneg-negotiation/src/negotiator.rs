//! The content negotiator facade

use crate::algorithm::{NegotiationAlgorithm, NegotiationInput};
use crate::alternative::Alternative;
use crate::charset::CharacterEncoding;
use crate::error::{NegotiationError, Result};
use crate::evaluation::ClientPreferences;
use crate::language::Language;
use crate::media_type::MediaType;
use crate::negotiable::Negotiable;
use crate::result::NegotiationResult;
use crate::variant::Variant;
use conneg_header::{HeaderValue, Weighted, parse_weighted_list};
use http::header::{ACCEPT, ACCEPT_CHARSET, ACCEPT_LANGUAGE, HeaderMap};

/// Collects what the server offers and what the client accepts, then
/// negotiates.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{ContentNegotiator, Language, MediaType, QualityKind};
///
/// let result = ContentNegotiator::new()
///     .support_media_type(MediaType::TEXT_HTML)
///     .support_media_type(MediaType::APPLICATION_JSON)
///     .support_language(Language::ENGLISH)
///     .accept("application/json;q=0.9, text/*;q=0.5")?
///     .accept_language("en-GB, en;q=0.8")?
///     .negotiate()?;
///
/// assert!(result.is_acceptable());
/// let variant = result.variant().unwrap();
/// assert_eq!(variant.media_type(), Some(&MediaType::APPLICATION_JSON));
/// assert_eq!(result.quality().unwrap().kind(), QualityKind::Definite);
/// # Ok::<(), conneg_negotiation::NegotiationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContentNegotiator {
	media_types: Vec<MediaType>,
	charsets: Vec<CharacterEncoding>,
	languages: Vec<Language>,
	alternatives: Vec<Alternative>,
	preferences: ClientPreferences,
	error_variant: Option<Variant>,
}

impl ContentNegotiator {
	/// A negotiator supporting nothing, with no client preferences.
	pub fn new() -> Self {
		Self::default()
	}

	/// Offers a media type. A `charset` parameter restricts the media type to
	/// that charset.
	pub fn support_media_type(mut self, media_type: impl Into<Option<MediaType>>) -> Self {
		support(&mut self.media_types, media_type.into());
		self
	}

	/// Offers a character encoding.
	pub fn support_charset(mut self, charset: impl Into<Option<CharacterEncoding>>) -> Self {
		support(&mut self.charsets, charset.into());
		self
	}

	/// Offers a language.
	pub fn support_language(mut self, language: impl Into<Option<Language>>) -> Self {
		support(&mut self.languages, language.into());
		self
	}

	/// Offers a predefined alternative.
	///
	/// An alternative describing the same variant as one offered before is
	/// dropped.
	pub fn support_alternative(mut self, alternative: impl Into<Option<Alternative>>) -> Self {
		let Some(alternative) = alternative.into() else {
			return self;
		};
		if let Some(existing) = self
			.alternatives
			.iter()
			.find(|existing| existing.variant() == alternative.variant())
		{
			tracing::warn!(
				offered = %alternative,
				kept = %existing,
				"ignoring alternative for an already supported variant"
			);
			return self;
		}
		self.alternatives.push(alternative);
		self
	}

	/// Adds the entries of an `Accept` header value.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::MalformedHeader`] if the value is malformed.
	pub fn accept(mut self, header: &str) -> Result<Self> {
		self.preferences.media_types.extend(parse_header::<MediaType>(header)?);
		Ok(self)
	}

	/// Adds the entries of an `Accept-Charset` header value.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::MalformedHeader`] if the value is malformed.
	pub fn accept_charset(mut self, header: &str) -> Result<Self> {
		self.preferences
			.charsets
			.extend(parse_header::<CharacterEncoding>(header)?);
		Ok(self)
	}

	/// Adds the entries of an `Accept-Language` header value.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::MalformedHeader`] if the value is malformed.
	pub fn accept_language(mut self, header: &str) -> Result<Self> {
		self.preferences
			.languages
			.extend(parse_header::<Language>(header)?);
		Ok(self)
	}

	/// Adds every `Accept`, `Accept-Charset` and `Accept-Language` value of a
	/// request.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::UnreadableHeader`] for values that are not
	/// visible ASCII and [`NegotiationError::MalformedHeader`] for malformed ones.
	pub fn accept_request_headers(mut self, headers: &HeaderMap) -> Result<Self> {
		for value in headers.get_all(ACCEPT) {
			let value = value
				.to_str()
				.map_err(|_| NegotiationError::UnreadableHeader(MediaType::HEADER_NAME))?;
			self = self.accept(value)?;
		}
		for value in headers.get_all(ACCEPT_CHARSET) {
			let value = value
				.to_str()
				.map_err(|_| NegotiationError::UnreadableHeader(CharacterEncoding::HEADER_NAME))?;
			self = self.accept_charset(value)?;
		}
		for value in headers.get_all(ACCEPT_LANGUAGE) {
			let value = value
				.to_str()
				.map_err(|_| NegotiationError::UnreadableHeader(Language::HEADER_NAME))?;
			self = self.accept_language(value)?;
		}
		Ok(self)
	}

	/// Sets the variant describing error responses, `text/plain; charset=utf-8`
	/// in English by default.
	pub fn on_error(mut self, variant: Variant) -> Self {
		self.error_variant = Some(variant);
		self
	}

	/// The client preferences collected so far.
	pub fn preferences(&self) -> &ClientPreferences {
		&self.preferences
	}

	/// Runs a negotiation over the current configuration.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::NoAlternatives`] when nothing is offered.
	pub fn negotiate(&self) -> Result<NegotiationResult> {
		NegotiationAlgorithm::new(NegotiationInput {
			media_types: self.media_types.clone(),
			charsets: self.charsets.clone(),
			languages: self.languages.clone(),
			alternatives: self.alternatives.clone(),
			preferences: self.preferences.clone(),
			error_variant: self.error_variant.clone(),
		})
		.execute()
	}
}

fn support<T: Negotiable>(supported: &mut Vec<T>, value: Option<T>) {
	let Some(value) = value else {
		return;
	};
	if value.is_wildcard() {
		tracing::debug!(value = %value, dimension = %T::DIMENSION, "ignoring wildcard offered as supported value");
		return;
	}
	if supported.contains(&value) {
		tracing::debug!(value = %value, dimension = %T::DIMENSION, "ignoring duplicate supported value");
		return;
	}
	supported.push(value);
}

fn parse_header<T: HeaderValue>(header: &str) -> Result<Vec<Weighted<T>>> {
	parse_weighted_list(header).map_err(|source| NegotiationError::malformed(T::HEADER_NAME, source))
}
