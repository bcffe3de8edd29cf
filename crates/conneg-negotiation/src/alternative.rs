//! Alternatives: candidate representations with their own quality

use crate::error::{NegotiationError, Result};
use crate::quality::Quality;
use crate::variant::Variant;
use conneg_header::is_valid_weight;
use std::fmt;

/// Where an alternative comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlternativeOrigin {
	/// Supplied by the server author; used verbatim.
	Predefined,
	/// Synthesized from the supported dimension values.
	Generated,
}

/// A candidate representation.
///
/// The quality is the source quality of RFC 2296: how well the variant
/// represents the resource, independently of any client preference.
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
	quality: f64,
	variant: Variant,
	origin: AlternativeOrigin,
}

impl Alternative {
	/// Creates a predefined alternative.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::InvalidQuality`] if the quality is outside
	/// `[0, 1]` or has more than three decimals.
	pub fn new(quality: f64, variant: Variant) -> Result<Self> {
		if !is_valid_weight(quality) {
			return Err(NegotiationError::InvalidQuality(quality));
		}
		Ok(Self {
			quality,
			variant,
			origin: AlternativeOrigin::Predefined,
		})
	}

	pub(crate) fn generated(quality: f64, variant: Variant) -> Self {
		Self {
			quality,
			variant,
			origin: AlternativeOrigin::Generated,
		}
	}

	/// The source quality: the author's weight for predefined alternatives,
	/// the position-derived weight for generated ones.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{Alternative, Variant};
	///
	/// let alternative = Alternative::new(0.8, Variant::default_error()).unwrap();
	/// assert_eq!(alternative.quality(), 0.8);
	/// assert!(!alternative.is_generated());
	/// ```
	pub fn quality(&self) -> f64 {
		self.quality
	}

	/// The variant this alternative would produce.
	pub fn variant(&self) -> &Variant {
		&self.variant
	}

	/// Whether the alternative was supplied or synthesized.
	pub fn origin(&self) -> AlternativeOrigin {
		self.origin
	}

	/// Shorthand for `origin() == AlternativeOrigin::Generated`.
	pub fn is_generated(&self) -> bool {
		self.origin == AlternativeOrigin::Generated
	}

	/// Returns a copy describing another variant, keeping quality and origin.
	pub(crate) fn with_variant(&self, variant: Variant) -> Self {
		Self {
			quality: self.quality,
			variant,
			origin: self.origin,
		}
	}
}

impl fmt::Display for Alternative {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} qs={}", self.variant, self.quality)
	}
}

/// Every alternative considered by a negotiation, in candidate order, with
/// the quality it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alternatives {
	entries: Vec<(Quality, Alternative)>,
}

impl Alternatives {
	pub(crate) fn push(&mut self, quality: Quality, alternative: Alternative) {
		self.entries.push((quality, alternative));
	}

	/// Number of candidates considered.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no candidate was considered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The candidate at `index`, in candidate order.
	pub fn get(&self, index: usize) -> Option<&(Quality, Alternative)> {
		self.entries.get(index)
	}

	/// Iterates over `(quality, resolved alternative)` pairs in candidate order.
	pub fn iter(&self) -> std::slice::Iter<'_, (Quality, Alternative)> {
		self.entries.iter()
	}

	/// The alternatives the client accepts, i.e. with a non-zero quality.
	pub fn acceptable(&self) -> impl Iterator<Item = &(Quality, Alternative)> {
		self.entries.iter().filter(|(quality, _)| quality.is_positive())
	}
}

impl<'a> IntoIterator for &'a Alternatives {
	type Item = &'a (Quality, Alternative);
	type IntoIter = std::slice::Iter<'a, (Quality, Alternative)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl IntoIterator for Alternatives {
	type Item = (Quality, Alternative);
	type IntoIter = std::vec::IntoIter<(Quality, Alternative)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
