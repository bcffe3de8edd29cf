//! Common behaviour of the negotiation dimensions

use std::cmp::Ordering;
use std::fmt;

/// The dimensions a representation can be negotiated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
	MediaType,
	Charset,
	Language,
}

impl Dimension {
	/// Name of the request header carrying the client preferences for this dimension.
	pub const fn accept_header(self) -> &'static str {
		match self {
			Self::MediaType => "Accept",
			Self::Charset => "Accept-Charset",
			Self::Language => "Accept-Language",
		}
	}
}

impl fmt::Display for Dimension {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::MediaType => "media type",
			Self::Charset => "charset",
			Self::Language => "language",
		};
		f.write_str(name)
	}
}

/// A value of one negotiation dimension: media type, character encoding or language.
pub trait Negotiable: Clone + PartialEq + fmt::Debug + fmt::Display {
	/// The dimension this value belongs to.
	const DIMENSION: Dimension;

	/// Whether the value stands for "any" value (fully or partially).
	fn is_wildcard(&self) -> bool;

	/// Canonical, lower-cased header rendering.
	fn to_header(&self) -> String;

	/// Whether this accepted or offered value covers `other`.
	///
	/// The relation is not symmetric: `text/*` includes `text/html`, not the
	/// other way around.
	fn includes(&self, other: &Self) -> bool;

	/// Preference order within the dimension: [`Ordering::Less`] means `self`
	/// is preferred (more specific). Wildcards always come last.
	fn compare_specificity(&self, other: &Self) -> Ordering;
}
