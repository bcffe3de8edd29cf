//! Negotiation outcome and response headers

use crate::alternative::Alternatives;
use crate::error::{NegotiationError, Result};
use crate::negotiable::{Dimension, Negotiable};
use crate::quality::Quality;
use crate::variant::Variant;
use http::header::{HeaderMap, HeaderName, HeaderValue};

/// `Vary` response header name.
pub const VARY: &str = "Vary";
/// `Content-Type` response header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Content-Language` response header name.
pub const CONTENT_LANGUAGE: &str = "Content-Language";

/// The outcome of a negotiation.
///
/// When the client accepts none of the alternatives the result is not
/// acceptable; the caller typically answers `406 Not Acceptable`, describing
/// the body with [`NegotiationResult::error_variant`].
#[derive(Debug, Clone)]
pub struct NegotiationResult {
	selection: Option<(Variant, Quality)>,
	alternatives: Alternatives,
	error_variant: Variant,
}

impl NegotiationResult {
	pub(crate) fn new(selection: Option<(Variant, Quality)>, alternatives: Alternatives, error_variant: Variant) -> Self {
		Self {
			selection,
			alternatives,
			error_variant,
		}
	}

	/// Whether a variant was selected.
	pub fn is_acceptable(&self) -> bool {
		self.selection.is_some()
	}

	/// The selected variant.
	pub fn variant(&self) -> Option<&Variant> {
		self.selection.as_ref().map(|(variant, _)| variant)
	}

	/// The quality of the selected variant.
	pub fn quality(&self) -> Option<Quality> {
		self.selection.as_ref().map(|(_, quality)| *quality)
	}

	/// Every alternative considered, with its quality.
	pub fn alternatives(&self) -> &Alternatives {
		&self.alternatives
	}

	/// The variant describing error responses.
	pub fn error_variant(&self) -> &Variant {
		&self.error_variant
	}

	/// Builds the response headers.
	///
	/// `Vary` and the echoed `Accept-*` headers list the dimensions (and their
	/// distinct values) the alternatives differ in. `Content-Type` and
	/// `Content-Language` describe the selected variant when `accepted` is
	/// `true` and a variant was selected, and the error variant otherwise.
	pub fn response_headers(&self, accepted: bool) -> ResponseHeaders {
		let mut media_types = Vec::new();
		let mut charsets = Vec::new();
		let mut languages = Vec::new();
		for (_, alternative) in &self.alternatives {
			let variant = alternative.variant();
			push_distinct(&mut media_types, variant.media_type());
			push_distinct(&mut charsets, variant.charset());
			push_distinct(&mut languages, variant.language());
		}

		let echoed = [
			(Dimension::MediaType, media_types),
			(Dimension::Charset, charsets),
			(Dimension::Language, languages),
		];

		let mut headers = ResponseHeaders::default();
		for (dimension, values) in &echoed {
			if !values.is_empty() {
				headers.append(VARY, dimension.accept_header());
			}
		}
		for (dimension, values) in &echoed {
			if !values.is_empty() {
				headers.append(dimension.accept_header(), values.join(", "));
			}
		}

		let variant = match self.variant() {
			Some(variant) if accepted => variant,
			_ => &self.error_variant,
		};
		if let Some(content_type) = variant.content_type() {
			headers.append(CONTENT_TYPE, content_type.to_header());
		}
		if let Some(language) = variant.language() {
			headers.append(CONTENT_LANGUAGE, language.to_header());
		}
		headers
	}
}

fn push_distinct<T: Negotiable>(values: &mut Vec<String>, value: Option<&T>) {
	if let Some(value) = value {
		let header = value.to_header();
		if !values.contains(&header) {
			values.push(header);
		}
	}
}

/// An ordered multimap of response header names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
	entries: Vec<(String, String)>,
}

impl ResponseHeaders {
	fn append(&mut self, name: &str, value: impl Into<String>) {
		self.entries.push((name.to_string(), value.into()));
	}

	/// The first value of a header; names are case-insensitive.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.get_all(name).next()
	}

	/// Every value of a header in insertion order.
	pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
		self.entries
			.iter()
			.filter(move |(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Whether at least one value is present for `name`, compared case-insensitively.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// All `(name, value)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Number of header lines.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Converts into an [`http::HeaderMap`], keeping repeated headers.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidResponseHeader`] for a value that
	/// cannot be carried by an HTTP header.
	pub fn to_header_map(&self) -> Result<HeaderMap> {
		let mut map = HeaderMap::with_capacity(self.entries.len());
		for (name, value) in &self.entries {
			let invalid = || NegotiationError::InvalidResponseHeader {
				name: name.clone(),
				value: value.clone(),
			};
			let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
			let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
			map.append(header_name, header_value);
		}
		Ok(map)
	}
}

impl<'a> IntoIterator for &'a ResponseHeaders {
	type Item = &'a (String, String);
	type IntoIter = std::slice::Iter<'a, (String, String)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
