//! Comma-separated list splitting (RFC 7230 section 7)

/// Splits a header value into its list elements.
///
/// Commas inside quoted strings do not split, whitespace around elements is
/// removed and empty elements are skipped.
///
/// # Examples
///
/// ```
/// use conneg_header::split_list;
///
/// assert_eq!(
///     split_list("text/html, , application/json;q=0.8"),
///     vec!["text/html", "application/json;q=0.8"]
/// );
/// assert_eq!(split_list("a;x=\"1,2\", b"), vec!["a;x=\"1,2\"", "b"]);
/// assert!(split_list("  ").is_empty());
/// ```
pub fn split_list(header: &str) -> Vec<&str> {
	let bytes = header.as_bytes();
	let mut elements = Vec::new();
	let mut start = 0;
	let mut quoted = false;
	let mut escaped = false;

	for (index, &b) in bytes.iter().enumerate() {
		if quoted {
			if escaped {
				escaped = false;
			} else if b == b'\\' {
				escaped = true;
			} else if b == b'"' {
				quoted = false;
			}
			continue;
		}
		match b {
			b'"' => quoted = true,
			b',' => {
				push_element(&mut elements, &header[start..index]);
				start = index + 1;
			}
			_ => {}
		}
	}
	push_element(&mut elements, &header[start..]);
	elements
}

fn push_element<'a>(elements: &mut Vec<&'a str>, raw: &'a str) {
	let element = raw.trim_matches(|c| c == ' ' || c == '\t');
	if !element.is_empty() {
		elements.push(element);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", vec![])]
	#[case(",,", vec![])]
	#[case("en", vec!["en"])]
	#[case("en;q=1.0, fr;q=0.5", vec!["en;q=1.0", "fr;q=0.5"])]
	#[case("\ttext/html ,text/plain\t", vec!["text/html", "text/plain"])]
	#[case("a;t=\"x\\\",y\",b", vec!["a;t=\"x\\\",y\"", "b"])]
	fn test_split_list(#[case] header: &str, #[case] expected: Vec<&str>) {
		assert_eq!(split_list(header), expected);
	}
}
