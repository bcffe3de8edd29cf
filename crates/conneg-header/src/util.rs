//! RFC 7230 token and quoted-string helpers

use crate::error::{HeaderError, HeaderResult};

/// Returns `true` for RFC 7230 `tchar` characters.
pub fn is_tchar(c: char) -> bool {
	c.is_ascii_alphanumeric()
		|| matches!(
			c,
			'!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
		)
}

/// Returns `true` if `s` is a non-empty RFC 7230 token.
///
/// # Examples
///
/// ```
/// use conneg_header::util::is_token;
///
/// assert!(is_token("utf-8"));
/// assert!(!is_token("a b"));
/// assert!(!is_token(""));
/// ```
pub fn is_token(s: &str) -> bool {
	!s.is_empty() && s.chars().all(is_tchar)
}

/// Returns `true` if `s` is a double-quoted string.
pub fn is_quoted(s: &str) -> bool {
	s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Quotes a parameter value unless it is already a valid token.
///
/// # Examples
///
/// ```
/// use conneg_header::util::quote_if_needed;
///
/// assert_eq!(quote_if_needed("html"), "html");
/// assert_eq!(quote_if_needed("a b"), "\"a b\"");
/// assert_eq!(quote_if_needed("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn quote_if_needed(value: &str) -> String {
	if is_token(value) {
		return value.to_string();
	}
	let mut quoted = String::with_capacity(value.len() + 2);
	quoted.push('"');
	for c in value.chars() {
		if c == '"' || c == '\\' {
			quoted.push('\\');
		}
		quoted.push(c);
	}
	quoted.push('"');
	quoted
}

/// Removes the quotes and escapes from an RFC 7230 quoted-string.
pub fn unquote(value: &str) -> HeaderResult<String> {
	if !is_quoted(value) {
		return Err(HeaderError::InvalidParameter {
			value: value.to_string(),
			reason: "quoted string must be enclosed in double quotes",
		});
	}

	let inner = &value[1..value.len() - 1];
	let mut result = String::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(c) = chars.next() {
		match c {
			'\\' => match chars.next() {
				Some(escaped) => result.push(escaped),
				None => {
					return Err(HeaderError::InvalidParameter {
						value: value.to_string(),
						reason: "quoted string ends with an escape character",
					});
				}
			},
			'"' => {
				return Err(HeaderError::InvalidParameter {
					value: value.to_string(),
					reason: "quoted string contains an unescaped quote",
				});
			}
			c if c.is_control() && c != '\t' => {
				return Err(HeaderError::InvalidParameter {
					value: value.to_string(),
					reason: "quoted string contains a control character",
				});
			}
			c => result.push(c),
		}
	}
	Ok(result)
}

/// Parses a `name=value` parameter where value is a token or a quoted string.
///
/// The name is returned lower-cased, the value unquoted.
pub fn parse_parameter(part: &str) -> HeaderResult<(String, String)> {
	let Some((name, value)) = part.split_once('=') else {
		return Err(HeaderError::InvalidParameter {
			value: part.to_string(),
			reason: "parameter must have the form name=value",
		});
	};

	if !is_token(name) {
		return Err(HeaderError::InvalidParameter {
			value: part.to_string(),
			reason: "parameter name must be a token",
		});
	}

	let value = if value.starts_with('"') {
		unquote(value)?
	} else if is_token(value) {
		value.to_string()
	} else {
		return Err(HeaderError::InvalidParameter {
			value: part.to_string(),
			reason: "parameter value must be a token or a quoted string",
		});
	};

	Ok((name.to_ascii_lowercase(), value))
}
