//! Content negotiation engine.
//!
//! This module provides access to the entity model, comparators, the
//! alternative generator and evaluator, and the negotiator facade.
//!
//! # Examples
//!
//! ```rust
//! use conneg::negotiation::{ContentNegotiator, MediaType};
//!
//! let result = ContentNegotiator::new()
//!     .support_media_type(MediaType::TEXT_HTML)
//!     .accept("application/json")
//!     .unwrap()
//!     .negotiate()
//!     .unwrap();
//! assert!(!result.is_acceptable());
//! ```

pub use conneg_negotiation::*;
