//! Negotiation quality
//!
//! A quality pairs a weight in `[0, 1]` with the confidence of the match it
//! was derived from. Definite qualities always outrank speculative ones,
//! whatever their weights.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How a quality was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityKind {
	/// Derived from explicit, non-wildcard matches only.
	Definite,
	/// Derived, at least partly, from a wildcard acceptance.
	Speculative,
}

impl QualityKind {
	fn rank(self) -> u8 {
		match self {
			Self::Definite => 1,
			Self::Speculative => 0,
		}
	}
}

impl fmt::Display for QualityKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Definite => f.write_str("definite"),
			Self::Speculative => f.write_str("speculative"),
		}
	}
}

/// A typed quality value.
///
/// Ordering compares the kind first and the weight second, so that
/// `Quality::definite(0.1) > Quality::speculative(1.0)`.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{Quality, QualityKind};
///
/// let combined = Quality::definite(0.5).product(&Quality::speculative(0.5));
/// assert_eq!(combined.weight(), 0.25);
/// assert_eq!(combined.kind(), QualityKind::Speculative);
/// assert!(Quality::definite(0.1) > Quality::speculative(1.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quality {
	weight: f64,
	kind: QualityKind,
}

impl Quality {
	/// The neutral element of [`Quality::product`].
	pub const ONE: Self = Self::definite(1.0);
	/// The quality of a value the client does not accept.
	pub const ZERO: Self = Self::definite(0.0);

	/// A definite quality.
	pub const fn definite(weight: f64) -> Self {
		Self {
			weight,
			kind: QualityKind::Definite,
		}
	}

	/// A speculative quality.
	pub const fn speculative(weight: f64) -> Self {
		Self {
			weight,
			kind: QualityKind::Speculative,
		}
	}

	/// The weight in `[0, 1]`.
	///
	/// # Examples
	///
	/// ```
	/// use conneg_negotiation::{Quality, QualityKind};
	///
	/// let quality = Quality::speculative(0.5);
	/// assert_eq!(quality.weight(), 0.5);
	/// assert_eq!(quality.kind(), QualityKind::Speculative);
	/// assert!(!quality.is_definite());
	/// ```
	pub fn weight(&self) -> f64 {
		self.weight
	}

	/// How confidently the weight was derived.
	pub fn kind(&self) -> QualityKind {
		self.kind
	}

	/// Whether the weight comes from explicit, non-wildcard matches only.
	pub fn is_definite(&self) -> bool {
		self.kind == QualityKind::Definite
	}

	/// Whether the weight is above zero.
	pub fn is_positive(&self) -> bool {
		self.weight > 0.0
	}

	/// Multiplies two qualities.
	///
	/// The weight is the exact product of both weights. The kind is the one of
	/// `self` unless `self` is definite, in which case it is the kind of
	/// `other`: the first non-definite factor decides.
	pub fn product(&self, other: &Self) -> Self {
		let kind = if self.is_definite() { other.kind } else { self.kind };
		Self {
			weight: self.weight * other.weight,
			kind,
		}
	}
}

impl Default for Quality {
	fn default() -> Self {
		Self::ONE
	}
}

impl PartialEq for Quality {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Quality {}

impl PartialOrd for Quality {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Quality {
	fn cmp(&self, other: &Self) -> Ordering {
		self.kind
			.rank()
			.cmp(&other.kind.rank())
			.then_with(|| self.weight.total_cmp(&other.weight))
	}
}

impl fmt::Display for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.weight, self.kind)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Quality::definite(0.1), Quality::speculative(1.0))]
	#[case(Quality::definite(0.9), Quality::definite(0.5))]
	#[case(Quality::speculative(0.9), Quality::speculative(0.5))]
	fn test_ordering(#[case] higher: Quality, #[case] lower: Quality) {
		assert!(higher > lower);
		assert_eq!(lower.cmp(&higher), Ordering::Less);
	}

	#[rstest]
	#[case(Quality::definite(0.5), Quality::definite(0.5), Quality::definite(0.25))]
	#[case(Quality::definite(1.0), Quality::speculative(0.8), Quality::speculative(0.8))]
	#[case(Quality::speculative(0.8), Quality::definite(0.5), Quality::speculative(0.4))]
	#[case(Quality::definite(0.7), Quality::ZERO, Quality::definite(0.0))]
	fn test_product(#[case] a: Quality, #[case] b: Quality, #[case] expected: Quality) {
		assert_eq!(a.product(&b), expected);
	}

	#[rstest]
	fn test_product_keeps_first_non_definite_kind() {
		let q = Quality::ONE
			.product(&Quality::speculative(1.0))
			.product(&Quality::definite(1.0));
		assert_eq!(q.kind(), QualityKind::Speculative);
	}

	#[rstest]
	fn test_product_is_exact() {
		let q = Quality::definite(0.875).product(&Quality::definite(0.3));
		assert_eq!(q.weight(), 0.875 * 0.3);
	}

	#[rstest]
	fn test_display() {
		assert_eq!(Quality::speculative(0.8).to_string(), "0.8 (speculative)");
	}
}
