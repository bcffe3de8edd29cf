//! Accept-* header grammar.
//!
//! This module provides access to the strict `;` tokenizer, list splitting
//! and the weighted-value parser.
//!
//! # Examples
//!
//! ```rust
//! use conneg::header::{tokenize, split_list};
//!
//! assert_eq!(split_list("text/html, */*;q=0.1"), vec!["text/html", "*/*;q=0.1"]);
//! assert_eq!(tokenize("*/*;q=0.1").unwrap(), vec!["*/*", "q=0.1"]);
//! ```

pub use conneg_header::*;
