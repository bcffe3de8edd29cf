//! # Conneg
//!
//! Proactive HTTP content negotiation for Rust.
//!
//! Conneg decides which representation of a resource best satisfies a client,
//! given what the server can produce and the client's `Accept`,
//! `Accept-Charset` and `Accept-Language` request headers. It implements a
//! simplified RFC 2296 remote variant selection algorithm on top of the
//! RFC 7231 Accept-family semantics.
//!
//! ## Core Principles
//!
//! - **Strict parsing**: malformed headers are rejected with the violated rule
//! - **Definite before speculative**: explicit matches beat wildcard matches
//! - **No hidden state**: every negotiation is a synchronous, self-contained run
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `settings` - TOML configuration through `NegotiationSettings`
//!
//! ## Quick Example
//!
//! ```rust
//! use conneg::prelude::*;
//!
//! let result = ContentNegotiator::new()
//!     .support_media_type(MediaType::TEXT_HTML)
//!     .support_media_type(MediaType::APPLICATION_JSON)
//!     .support_language(Language::ENGLISH)
//!     .support_language(Language::parse("fr")?)
//!     .accept("text/html;q=1.0, */*;q=0.8")?
//!     .accept_language("fr;q=0.9, en;q=0.5")?
//!     .negotiate()?;
//!
//! let variant = result.variant().expect("text/html is acceptable");
//! assert_eq!(variant.media_type(), Some(&MediaType::TEXT_HTML));
//! assert_eq!(variant.language().map(Language::primary_tag), Some("fr"));
//!
//! let headers = result.response_headers(true);
//! assert_eq!(headers.get("Content-Language"), Some("fr"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Module re-exports following the workspace structure
pub mod header;
pub mod negotiation;

pub use conneg_header::{
	HeaderError, HeaderResult, HeaderTokenizer, HeaderValue, TokenizerFailure, Weighted, parse_weight,
	parse_weighted_list, split_list, tokenize,
};
pub use conneg_negotiation::{
	Alternative, AlternativeProvider, Alternatives, CharacterEncoding, ContentNegotiator, Dimension,
	Language, MediaType, Negotiable, NegotiationError, NegotiationResult, Quality, QualityKind,
	ResponseHeaders, Result, Variant,
};

#[cfg(feature = "settings")]
pub use conneg_negotiation::NegotiationSettings;

/// Convenience re-exports of commonly used types.
pub mod prelude {
	// Entities
	pub use crate::{CharacterEncoding, Language, MediaType, Negotiable, Variant};

	// Negotiation
	pub use crate::{
		Alternative, ContentNegotiator, NegotiationError, NegotiationResult, Quality, QualityKind,
		ResponseHeaders,
	};

	// Settings feature
	#[cfg(feature = "settings")]
	pub use crate::NegotiationSettings;
}
