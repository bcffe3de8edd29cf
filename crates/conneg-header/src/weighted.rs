//! Weighted header values
//!
//! Every element of an Accept-* header may carry a `q` parameter expressing
//! the relative preference of the client for that element:
//!
//! ```text
//! weight = OWS ";" OWS "q=" qvalue
//! qvalue = ( "0" [ "." 0*3DIGIT ] ) / ( "1" [ "." 0*3("0") ] )
//! ```
//!
//! The weight is extracted here; the rest of the element is handed over to
//! the parser of the negotiated entity through [`HeaderValue`].

use crate::error::{HeaderError, HeaderResult};
use crate::list::split_list;
use crate::tokenizer::{is_inside_quotes, tokenize};
use crate::util::parse_parameter;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

// Any quality definition, valid or not, so that bad values are reported
// instead of being mistaken for entity parameters.
static QUALITY_DEFINITION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r";[ \t]*[qQ]=([^;,\s]*)")
		.expect("QUALITY_DEFINITION_REGEX: invalid regex pattern")
});

static QUALITY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(?:1(?:\.0{0,3})?|0(?:\.[0-9]{0,3})?)$")
		.expect("QUALITY_VALUE_REGEX: invalid regex pattern")
});

/// Weight assumed for values that do not declare one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Entity that can appear as the value of an Accept-* header element.
pub trait HeaderValue: Sized {
	/// Name of the header carrying the values, used in diagnostics.
	const HEADER_NAME: &'static str;

	/// Whether one `;name=value` extension may follow the quality definition.
	const ALLOWS_EXTENSION: bool = false;

	/// Parses the element once the quality definition has been removed.
	fn parse_header_value(value: &str) -> HeaderResult<Self>;
}

/// Parses a qvalue, enforcing the `[0, 1]` range and at most three decimals.
///
/// # Examples
///
/// ```
/// use conneg_header::parse_weight;
///
/// assert_eq!(parse_weight("0.8").unwrap(), 0.8);
/// assert_eq!(parse_weight("1").unwrap(), 1.0);
/// assert!(parse_weight("0.8001").is_err());
/// assert!(parse_weight("1.5").is_err());
/// ```
pub fn parse_weight(value: &str) -> HeaderResult<f64> {
	if !QUALITY_VALUE_REGEX.is_match(value) {
		return Err(HeaderError::InvalidQuality(value.to_string()));
	}
	value
		.parse::<f64>()
		.map_err(|_| HeaderError::InvalidQuality(value.to_string()))
}

/// Returns `true` if `weight` lies in `[0, 1]` and has at most three decimals.
pub fn is_valid_weight(weight: f64) -> bool {
	(0.0..=1.0).contains(&weight) && ((weight * 1000.0).round() / 1000.0 - weight).abs() < 1e-9
}

/// An entity paired with the optional weight the client assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Weighted<T> {
	entity: T,
	weight: Option<f64>,
}

impl<T> Weighted<T> {
	/// Wraps an entity without an explicit weight.
	pub fn new(entity: T) -> Self {
		Self {
			entity,
			weight: None,
		}
	}

	/// Sets an explicit weight.
	///
	/// # Errors
	///
	/// Returns [`HeaderError::InvalidQuality`] if the weight is outside `[0, 1]`
	/// or has more than three decimals.
	pub fn with_weight(mut self, weight: f64) -> HeaderResult<Self> {
		if !is_valid_weight(weight) {
			return Err(HeaderError::InvalidQuality(weight.to_string()));
		}
		self.weight = Some(weight);
		Ok(self)
	}

	/// The weighted entity.
	pub fn entity(&self) -> &T {
		&self.entity
	}

	/// Consumes the wrapper, returning the entity.
	pub fn into_entity(self) -> T {
		self.entity
	}

	/// The effective weight, `1.0` when none was declared.
	pub fn weight(&self) -> f64 {
		self.weight.unwrap_or(DEFAULT_WEIGHT)
	}

	/// Whether an explicit weight was declared.
	pub fn has_weight(&self) -> bool {
		self.weight.is_some()
	}

	/// Transforms the entity, keeping the weight.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Weighted<U> {
		Weighted {
			entity: f(self.entity),
			weight: self.weight,
		}
	}
}

impl<T: HeaderValue> Weighted<T> {
	/// Parses one header element such as `text/html;level=1;q=0.8`.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_header::{HeaderResult, HeaderValue, Weighted};
	///
	/// #[derive(Debug, PartialEq)]
	/// struct Token(String);
	///
	/// impl HeaderValue for Token {
	///     const HEADER_NAME: &'static str = "X-Token";
	///     fn parse_header_value(value: &str) -> HeaderResult<Self> {
	///         Ok(Token(value.to_string()))
	///     }
	/// }
	///
	/// let weighted = Weighted::<Token>::parse("abc ; q=0.25").unwrap();
	/// assert_eq!(weighted.entity(), &Token("abc".to_string()));
	/// assert_eq!(weighted.weight(), 0.25);
	/// ```
	pub fn parse(element: &str) -> HeaderResult<Self> {
		let mut definitions = QUALITY_DEFINITION_REGEX
			.captures_iter(element)
			.filter(|c| c.get(0).is_some_and(|m| !is_inside_quotes(element, m.start())));
		let Some(definition) = definitions.next() else {
			return Ok(Self::new(T::parse_header_value(element.trim())?));
		};
		if definitions.next().is_some() {
			return Err(HeaderError::MultipleQualities(element.to_string()));
		}

		let (Some(whole), Some(value)) = (definition.get(0), definition.get(1)) else {
			return Ok(Self::new(T::parse_header_value(element.trim())?));
		};
		let weight = parse_weight(value.as_str())?;

		let tail = element[whole.end()..].trim();
		if !tail.is_empty() {
			if !T::ALLOWS_EXTENSION {
				return Err(HeaderError::ContentAfterQuality(tail.to_string()));
			}
			validate_extension(tail)?;
			tracing::trace!(
				header = T::HEADER_NAME,
				extension = tail,
				"Discarding accept extension"
			);
		}

		let entity = T::parse_header_value(element[..whole.start()].trim())?;
		Ok(Self {
			entity,
			weight: Some(weight),
		})
	}
}

impl<T: fmt::Display> fmt::Display for Weighted<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.weight {
			Some(weight) => write!(f, "{};q={}", self.entity, weight),
			None => write!(f, "{}", self.entity),
		}
	}
}

/// Validates the single `;name=value` extension tolerated after a quality definition.
fn validate_extension(tail: &str) -> HeaderResult<()> {
	let invalid = || HeaderError::InvalidExtension(tail.to_string());

	let extension = tail
		.strip_prefix(';')
		.ok_or_else(invalid)?
		.trim_start_matches([' ', '\t']);
	let parts = tokenize(extension).map_err(|_| invalid())?;
	match parts.as_slice() {
		[single] => parse_parameter(single).map(|_| ()).map_err(|_| invalid()),
		[_, rest @ ..] => Err(HeaderError::InvalidExtension(rest.join(";"))),
		[] => Err(invalid()),
	}
}

/// Parses a complete Accept-* header value into weighted entities, in header order.
///
/// # Errors
///
/// Fails on the first malformed element.
pub fn parse_weighted_list<T: HeaderValue>(header: &str) -> HeaderResult<Vec<Weighted<T>>> {
	split_list(header)
		.into_iter()
		.map(Weighted::<T>::parse)
		.collect()
}
