//! Error types for content negotiation.
//!
//! A request whose preferences cannot be satisfied is not an error: it yields
//! a [`NegotiationResult`](crate::NegotiationResult) that is not acceptable.

use conneg_header::HeaderError;
use thiserror::Error;

/// Errors raised while configuring or running a negotiation.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NegotiationError {
	/// Nothing can be offered: no supported dimension and no predefined alternative.
	#[error(
		"No alternatives available: support at least one media type, charset, language or alternative"
	)]
	NoAlternatives,

	/// An Accept-* request header value is malformed.
	#[error("Malformed {header} header: {source}")]
	MalformedHeader {
		header: &'static str,
		#[source]
		source: HeaderError,
	},

	/// A request header value contains characters other than visible ASCII.
	#[error("Unreadable {0} header: value is not visible ASCII")]
	UnreadableHeader(&'static str),

	/// An entity could not be parsed.
	#[error(transparent)]
	Header(#[from] HeaderError),

	/// A variant was given a wildcard value.
	#[error("Invalid variant: {0}")]
	InvalidVariant(String),

	/// An alternative quality is outside `[0, 1]` or has more than three decimals.
	#[error("Invalid alternative quality {0}: must be within [0, 1] with at most 3 decimals")]
	InvalidQuality(f64),

	/// A response header value cannot be represented in an HTTP header map.
	#[error("Invalid response header {name}: '{value}'")]
	InvalidResponseHeader { name: String, value: String },

	/// The declarative settings could not be read.
	#[cfg(feature = "settings")]
	#[error("Invalid settings: {0}")]
	Settings(#[from] toml::de::Error),

	/// The declarative settings could not be written.
	#[cfg(feature = "settings")]
	#[error("Cannot serialize settings: {0}")]
	SettingsSerialization(#[from] toml::ser::Error),
}

impl NegotiationError {
	/// Returns `true` for configuration errors, as opposed to malformed input.
	pub fn is_configuration_error(&self) -> bool {
		matches!(self, Self::NoAlternatives)
	}

	pub(crate) fn malformed(header: &'static str, source: HeaderError) -> Self {
		Self::MalformedHeader { header, source }
	}
}

/// Result type alias for negotiation operations.
pub type Result<T, E = NegotiationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
	use super::*;
	use conneg_header::TokenizerFailure;
	use rstest::rstest;

	#[rstest]
	fn test_malformed_header_message_names_rule() {
		let source = HeaderError::Tokenizer {
			kind: TokenizerFailure::LeadingDelimiter,
			header: ";charset=utf-8".to_string(),
			position: 0,
		};
		let err = NegotiationError::malformed("Accept", source);
		assert_eq!(
			err.to_string(),
			"Malformed Accept header: Leading delimiter found in ';charset=utf-8' (position 0)"
		);
		assert!(!err.is_configuration_error());
	}

	#[rstest]
	fn test_no_alternatives_is_configuration_error() {
		assert!(NegotiationError::NoAlternatives.is_configuration_error());
	}
}
