//! # conneg-header
//!
//! Parsing primitives for the Accept-family request headers
//! (RFC 7231 sections 5.3.1 to 5.3.5).
//!
//! - [`HeaderTokenizer`] splits a value at top-level delimiters and reports
//!   grammar violations precisely.
//! - [`split_list`] breaks a header into its comma-separated elements.
//! - [`Weighted`] extracts the `q` weight of an element and hands the rest
//!   over to a [`HeaderValue`] parser.
//!
//! ## Example
//!
//! ```
//! use conneg_header::{parse_weight, tokenize};
//!
//! assert_eq!(tokenize("text/html;level=1").unwrap(), vec!["text/html", "level=1"]);
//! assert_eq!(parse_weight("0.5").unwrap(), 0.5);
//! ```

pub mod error;
pub mod list;
pub mod tokenizer;
pub mod util;
pub mod weighted;

pub use error::{HeaderError, HeaderResult, TokenizerFailure};
pub use list::split_list;
pub use tokenizer::{HeaderTokenizer, tokenize, tokenize_with};
pub use weighted::{
	DEFAULT_WEIGHT, HeaderValue, Weighted, is_valid_weight, parse_weight, parse_weighted_list,
};
