//! # conneg-negotiation
//!
//! HTTP proactive content negotiation: a simplified RFC 2296 remote variant
//! selection algorithm over the RFC 7231 `Accept`, `Accept-Charset` and
//! `Accept-Language` request headers.
//!
//! A server describes what it can produce, either as supported media types,
//! charsets and languages (whose combinations are generated) or as
//! predefined [`Alternative`]s. The [`ContentNegotiator`] evaluates every
//! candidate against the client preferences and selects the best one,
//! preferring [definite](QualityKind::Definite) matches over
//! [speculative](QualityKind::Speculative) ones that rely on wildcards.
//!
//! ## Example
//!
//! ```
//! use conneg_negotiation::{CharacterEncoding, ContentNegotiator};
//!
//! let result = ContentNegotiator::new()
//!     .support_charset(CharacterEncoding::UTF_8)
//!     .support_charset(CharacterEncoding::ISO_8859_1)
//!     .accept_charset("utf-8;q=0.3, iso-8859-1;q=0.5, *;q=0.8")?
//!     .negotiate()?;
//!
//! let headers = result.response_headers(result.is_acceptable());
//! assert_eq!(headers.get("Content-Type"), Some("text/plain; charset=iso-8859-1"));
//! assert_eq!(headers.get("Vary"), Some("Accept"));
//! # Ok::<(), conneg_negotiation::NegotiationError>(())
//! ```
//!
//! ## Feature flags
//!
//! - `settings` (default): [`NegotiationSettings`], TOML configuration.

pub mod algorithm;
pub mod alternative;
pub mod charset;
pub mod comparator;
pub mod error;
pub mod evaluation;
pub mod language;
pub mod media_type;
pub mod negotiable;
pub mod negotiator;
pub mod provider;
pub mod quality;
pub mod result;
#[cfg(feature = "settings")]
pub mod settings;
pub mod variant;

pub use algorithm::{NegotiationAlgorithm, NegotiationInput};
pub use alternative::{Alternative, AlternativeOrigin, Alternatives};
pub use charset::CharacterEncoding;
pub use comparator::{
	compare_alternatives, compare_charsets, compare_languages, compare_media_types, compare_optional,
	compare_weighted,
};
pub use error::{NegotiationError, Result};
pub use evaluation::{AlternativeEvaluation, ClientPreferences, DimensionOutcome, evaluate_dimension};
pub use language::Language;
pub use media_type::MediaType;
pub use negotiable::{Dimension, Negotiable};
pub use negotiator::ContentNegotiator;
pub use provider::AlternativeProvider;
pub use quality::{Quality, QualityKind};
pub use result::{NegotiationResult, ResponseHeaders};
#[cfg(feature = "settings")]
pub use settings::{AlternativeSettings, NegotiationSettings, VariantSettings};
pub use variant::{DEFAULT_CHARSET, DEFAULT_LANGUAGE, DEFAULT_MEDIA_TYPE, Variant};
