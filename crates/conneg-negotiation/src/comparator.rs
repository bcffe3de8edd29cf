//! Preference orders
//!
//! Every comparator returns [`Ordering::Less`] when its first argument is the
//! preferred one, so the best value of a list is its minimum. The media type
//! order is not total (unrelated types compare equal), which is why callers
//! pick minima with [`Iterator::min_by`] and never hand these functions to
//! `sort_by`.

use crate::alternative::Alternative;
use crate::charset::CharacterEncoding;
use crate::language::Language;
use crate::media_type::{CHARSET_PARAMETER, MediaType};
use crate::negotiable::Negotiable;
use conneg_header::Weighted;
use std::cmp::Ordering;

fn wildcards_last(a: bool, b: bool) -> Option<Ordering> {
	match (a, b) {
		(false, true) => Some(Ordering::Less),
		(true, false) => Some(Ordering::Greater),
		_ => None,
	}
}

/// Orders media types from most to least specific.
///
/// A wildcard type ranks after a concrete one, and within a type a wildcard
/// subtype ranks after a concrete one. Different types, subtypes or suffixes
/// are not comparable and yield [`Ordering::Equal`]. Members of the same
/// family are ordered structurally: fewer parameters first, then by sorted
/// parameter names, sorted non-charset values and finally the charset.
pub fn compare_media_types(a: &MediaType, b: &MediaType) -> Ordering {
	if let Some(order) = wildcards_last(a.is_wildcard_type(), b.is_wildcard_type()) {
		return order;
	}
	if a.main_type() != b.main_type() {
		return Ordering::Equal;
	}
	if let Some(order) = wildcards_last(a.is_wildcard_subtype(), b.is_wildcard_subtype()) {
		return order;
	}
	if a.subtype() != b.subtype() || a.suffix() != b.suffix() {
		return Ordering::Equal;
	}

	let (a_params, b_params) = (a.parameters(), b.parameters());
	a_params
		.len()
		.cmp(&b_params.len())
		.then_with(|| a_params.keys().cmp(b_params.keys()))
		.then_with(|| plain_parameter_values(a).cmp(&plain_parameter_values(b)))
		.then_with(|| a.parameter(CHARSET_PARAMETER).cmp(&b.parameter(CHARSET_PARAMETER)))
}

fn plain_parameter_values(media_type: &MediaType) -> Vec<&str> {
	let mut values: Vec<&str> = media_type
		.parameters()
		.iter()
		.filter(|(name, _)| name.as_str() != CHARSET_PARAMETER)
		.map(|(_, value)| value.as_str())
		.collect();
	values.sort_unstable();
	values
}

/// Orders character encodings by name, the wildcard last.
pub fn compare_charsets(a: &CharacterEncoding, b: &CharacterEncoding) -> Ordering {
	wildcards_last(a.is_wildcard(), b.is_wildcard()).unwrap_or_else(|| a.name().cmp(b.name()))
}

/// Orders languages by primary tag then sub-tag, the wildcard last.
///
/// For equal primary tags a language with a sub-tag ranks before one without.
pub fn compare_languages(a: &Language, b: &Language) -> Ordering {
	if let Some(order) = wildcards_last(a.is_wildcard(), b.is_wildcard()) {
		return order;
	}
	a.primary_tag()
		.cmp(b.primary_tag())
		.then_with(|| compare_optional_by(a.sub_tag(), b.sub_tag(), |a, b| a.cmp(b)))
}

/// Orders weighted values by their entity first and by descending weight second.
pub fn compare_weighted<T: Negotiable>(a: &Weighted<T>, b: &Weighted<T>) -> Ordering {
	a.entity()
		.compare_specificity(b.entity())
		.then_with(|| b.weight().total_cmp(&a.weight()))
}

/// Orders optional dimension values, an absent value ranking after any present one.
pub fn compare_optional<T: Negotiable>(a: Option<&T>, b: Option<&T>) -> Ordering {
	compare_optional_by(a, b, T::compare_specificity)
}

fn compare_optional_by<T>(a: Option<T>, b: Option<T>, f: impl FnOnce(T, T) -> Ordering) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => f(a, b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

/// Orders alternatives by descending source quality, then by the specificity
/// of their media type, charset and language.
pub fn compare_alternatives(a: &Alternative, b: &Alternative) -> Ordering {
	let (va, vb) = (a.variant(), b.variant());
	b.quality()
		.total_cmp(&a.quality())
		.then_with(|| compare_optional(va.media_type(), vb.media_type()))
		.then_with(|| compare_optional(va.charset(), vb.charset()))
		.then_with(|| compare_optional(va.language(), vb.language()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::variant::Variant;
	use rstest::rstest;

	fn media(value: &str) -> MediaType {
		MediaType::parse(value).unwrap()
	}

	#[rstest]
	#[case("text/html", "text/*", Ordering::Less)]
	#[case("text/*", "*/*", Ordering::Less)]
	#[case("*/*", "text/html", Ordering::Greater)]
	#[case("text/html", "application/json", Ordering::Equal)]
	#[case("text/html", "text/plain", Ordering::Equal)]
	#[case("application/ld+json", "application/ld", Ordering::Equal)]
	#[case("text/html", "text/html;level=1", Ordering::Less)]
	#[case("text/html;a=1", "text/html;b=1", Ordering::Less)]
	#[case("text/html;a=1", "text/html;a=2", Ordering::Less)]
	#[case("text/html;charset=iso-8859-1", "text/html;charset=utf-8", Ordering::Less)]
	#[case("text/html;level=1", "text/html;level=1", Ordering::Equal)]
	fn test_compare_media_types(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
		assert_eq!(compare_media_types(&media(a), &media(b)), expected);
		assert_eq!(compare_media_types(&media(b), &media(a)), expected.reverse());
	}

	#[rstest]
	fn test_compare_charsets() {
		assert_eq!(
			compare_charsets(&CharacterEncoding::UTF_8, &CharacterEncoding::WILDCARD),
			Ordering::Less
		);
		assert_eq!(
			compare_charsets(&CharacterEncoding::ISO_8859_1, &CharacterEncoding::UTF_8),
			Ordering::Less
		);
		assert_eq!(
			compare_charsets(&CharacterEncoding::WILDCARD, &CharacterEncoding::WILDCARD),
			Ordering::Equal
		);
	}

	#[rstest]
	#[case("en-us", "en", Ordering::Less)]
	#[case("en", "*", Ordering::Less)]
	#[case("de", "en", Ordering::Less)]
	#[case("en-gb", "en-us", Ordering::Less)]
	#[case("fr", "fr", Ordering::Equal)]
	fn test_compare_languages(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
		let (a, b) = (Language::parse(a).unwrap(), Language::parse(b).unwrap());
		assert_eq!(compare_languages(&a, &b), expected);
		assert_eq!(compare_languages(&b, &a), expected.reverse());
	}

	#[rstest]
	fn test_compare_weighted_prefers_entity_then_weight() {
		let heavy = Weighted::new(CharacterEncoding::UTF_8).with_weight(0.9).unwrap();
		let light = Weighted::new(CharacterEncoding::UTF_8).with_weight(0.2).unwrap();
		let wildcard = Weighted::new(CharacterEncoding::WILDCARD);

		assert_eq!(compare_weighted(&heavy, &light), Ordering::Less);
		assert_eq!(compare_weighted(&light, &wildcard), Ordering::Less);
	}

	#[rstest]
	fn test_compare_optional_ranks_absent_last() {
		let en = Language::ENGLISH;
		assert_eq!(compare_optional(Some(&en), None), Ordering::Less);
		assert_eq!(compare_optional::<Language>(None, Some(&en)), Ordering::Greater);
		assert_eq!(compare_optional::<Language>(None, None), Ordering::Equal);
	}

	#[rstest]
	fn test_compare_alternatives() {
		let html = Variant::new().with_type(MediaType::TEXT_HTML).unwrap();
		let html_en = html.clone().with_language(Language::ENGLISH).unwrap();

		let high = Alternative::new(0.9, html.clone()).unwrap();
		let low = Alternative::new(0.5, html_en.clone()).unwrap();
		assert_eq!(compare_alternatives(&high, &low), Ordering::Less);

		let plain = Alternative::new(0.5, html).unwrap();
		assert_eq!(compare_alternatives(&low, &plain), Ordering::Less);
	}
}
