//! Declarative negotiation settings
//!
//! The server side of a negotiation can be described in TOML:
//!
//! ```toml
//! media_types = ["text/html", "application/json"]
//! charsets = ["utf-8"]
//! languages = ["en", "fr"]
//!
//! [[alternatives]]
//! quality = 0.8
//! type = "text/turtle"
//! language = "en"
//!
//! [error_variant]
//! type = "text/plain"
//! charset = "utf-8"
//! ```

use crate::alternative::Alternative;
use crate::charset::CharacterEncoding;
use crate::error::Result;
use crate::language::Language;
use crate::media_type::MediaType;
use crate::negotiator::ContentNegotiator;
use crate::variant::Variant;
use serde::{Deserialize, Serialize};

/// A variant as written in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantSettings {
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub media_type: Option<MediaType>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub charset: Option<CharacterEncoding>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<Language>,
}

impl VariantSettings {
	/// Builds the variant.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidVariant`](crate::NegotiationError::InvalidVariant)
	/// if a value is a wildcard.
	pub fn to_variant(&self) -> Result<Variant> {
		let mut variant = Variant::new();
		if let Some(charset) = &self.charset {
			variant = variant.with_charset(charset.clone())?;
		}
		if let Some(media_type) = &self.media_type {
			variant = variant.with_type(media_type.clone())?;
		}
		if let Some(language) = &self.language {
			variant = variant.with_language(language.clone())?;
		}
		Ok(variant)
	}
}

impl From<&Variant> for VariantSettings {
	fn from(variant: &Variant) -> Self {
		Self {
			media_type: variant.media_type().cloned(),
			charset: variant.charset().cloned(),
			language: variant.language().cloned(),
		}
	}
}

/// A predefined alternative as written in settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSettings {
	/// Source quality in `[0, 1]`.
	pub quality: f64,
	#[serde(flatten)]
	pub variant: VariantSettings,
}

impl AlternativeSettings {
	/// Builds the alternative.
	///
	/// # Errors
	///
	/// Fails on an invalid quality or a wildcard value.
	pub fn to_alternative(&self) -> Result<Alternative> {
		Alternative::new(self.quality, self.variant.to_variant()?)
	}
}

/// What a server offers, in declarative form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationSettings {
	/// Supported media types.
	pub media_types: Vec<MediaType>,
	/// Supported charsets.
	pub charsets: Vec<CharacterEncoding>,
	/// Supported languages.
	pub languages: Vec<Language>,
	/// Predefined alternatives, each a `quality` plus variant keys.
	pub alternatives: Vec<AlternativeSettings>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_variant: Option<VariantSettings>,
}

impl NegotiationSettings {
	/// Reads settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::NegotiationSettings;
	///
	/// let settings = NegotiationSettings::from_toml_str(r#"
	///     media_types = ["text/html"]
	///     languages = ["en", "fr"]
	/// "#).unwrap();
	///
	/// let result = settings
	///     .negotiator()
	///     .unwrap()
	///     .accept_language("fr")
	///     .unwrap()
	///     .negotiate()
	///     .unwrap();
	/// assert_eq!(result.variant().unwrap().language().unwrap().primary_tag(), "fr");
	/// ```
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::Settings`](crate::NegotiationError::Settings)
	/// for invalid TOML or invalid values.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Writes the settings as a TOML document.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::SettingsSerialization`](crate::NegotiationError::SettingsSerialization)
	/// if the settings cannot be represented in TOML.
	pub fn to_toml_string(&self) -> Result<String> {
		Ok(toml::to_string(self)?)
	}

	/// Creates a negotiator offering everything these settings describe.
	///
	/// # Errors
	///
	/// Fails if an alternative or the error variant is invalid.
	pub fn negotiator(&self) -> Result<ContentNegotiator> {
		let mut negotiator = ContentNegotiator::new();
		for media_type in &self.media_types {
			negotiator = negotiator.support_media_type(media_type.clone());
		}
		for charset in &self.charsets {
			negotiator = negotiator.support_charset(charset.clone());
		}
		for language in &self.languages {
			negotiator = negotiator.support_language(language.clone());
		}
		for alternative in &self.alternatives {
			negotiator = negotiator.support_alternative(alternative.to_alternative()?);
		}
		if let Some(error_variant) = &self.error_variant {
			negotiator = negotiator.on_error(error_variant.to_variant()?);
		}
		Ok(negotiator)
	}
}
