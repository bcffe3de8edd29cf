//! Property-based tests for alternative generation and entity rendering

use conneg_negotiation::{AlternativeProvider, CharacterEncoding, Language, MediaType, Negotiable};
use proptest::prelude::*;

fn media_types() -> impl Strategy<Value = Vec<MediaType>> {
	prop::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}", any::<bool>()), 0..5).prop_map(|specs| {
		specs
			.into_iter()
			.map(|(main_type, subtype, with_charset)| {
				let value = if with_charset {
					format!("{main_type}/{subtype};charset=utf-8")
				} else {
					format!("{main_type}/{subtype}")
				};
				MediaType::parse(&value).unwrap()
			})
			.collect()
	})
}

fn charsets() -> impl Strategy<Value = Vec<CharacterEncoding>> {
	prop::collection::vec("[a-z0-9]{1,6}(-[a-z0-9]{1,4})?", 0..4)
		.prop_map(|names| names.iter().map(|n| CharacterEncoding::parse(n).unwrap()).collect())
}

fn languages() -> impl Strategy<Value = Vec<Language>> {
	prop::collection::vec("[a-z]{2,3}(-[a-z]{2})?", 0..4)
		.prop_map(|tags| tags.iter().map(|t| Language::parse(t).unwrap()).collect())
}

/// Positions the generator must hand out, in order.
fn expected_positions(media_types: &[MediaType], charsets: usize, languages: usize) -> Vec<usize> {
	let charsets = charsets.max(1);
	let languages = languages.max(1);
	let media_types: Vec<bool> = if media_types.is_empty() {
		vec![false]
	} else {
		media_types.iter().map(|m| m.charset().is_some()).collect()
	};

	let mut positions = Vec::new();
	let mut position = 0;
	for owns_charset in media_types {
		let emitted = if owns_charset { languages } else { charsets * languages };
		positions.extend(position..position + emitted);
		position += charsets * languages;
	}
	positions
}

fn bucket_quality(position: usize, bucket_size: usize) -> f64 {
	let bucket = (position as f64 / bucket_size as f64 + 0.5).floor();
	((1.0 - bucket * 0.125) * 1000.0).round() / 1000.0
}

proptest! {
	/// Property: generated qualities never increase
	#[test]
	fn prop_qualities_non_increasing(
		media_types in media_types(),
		charsets in charsets(),
		languages in languages()
	) {
		let qualities: Vec<f64> = AlternativeProvider::new(&media_types, &charsets, &languages)
			.map(|alternative| alternative.quality())
			.collect();
		for pair in qualities.windows(2) {
			prop_assert!(pair[0] >= pair[1], "{:?}", qualities);
		}
	}

	/// Property: the cartesian product counts every absent dimension once
	#[test]
	fn prop_product_cardinality(
		media_types in prop::collection::vec("[a-z]{1,8}/[a-z]{1,8}", 0..5),
		charsets in charsets(),
		languages in languages()
	) {
		let media_types: Vec<MediaType> = media_types.iter().map(|m| MediaType::parse(m).unwrap()).collect();
		let provider = AlternativeProvider::new(&media_types, &charsets, &languages);
		let expected = if media_types.is_empty() && charsets.is_empty() && languages.is_empty() {
			0
		} else {
			media_types.len().max(1) * charsets.len().max(1) * languages.len().max(1)
		};
		prop_assert_eq!(provider.total(), expected);
		prop_assert_eq!(provider.count(), expected);
	}

	/// Property: media types owning a charset skip the positions of the other charsets
	#[test]
	fn prop_skipped_positions_keep_buckets(
		media_types in media_types(),
		charsets in charsets(),
		languages in languages()
	) {
		prop_assume!(!(media_types.is_empty() && charsets.is_empty() && languages.is_empty()));
		let provider = AlternativeProvider::new(&media_types, &charsets, &languages);
		let bucket_size = provider.bucket_size();
		let qualities: Vec<f64> = provider.map(|alternative| alternative.quality()).collect();
		let expected: Vec<f64> = expected_positions(&media_types, charsets.len(), languages.len())
			.into_iter()
			.map(|position| bucket_quality(position, bucket_size))
			.collect();
		prop_assert_eq!(qualities, expected);
	}

	/// Property: generated variants never carry a charset inside the media type
	#[test]
	fn prop_generated_variants_split_charset(
		media_types in media_types(),
		charsets in charsets(),
		languages in languages()
	) {
		for alternative in AlternativeProvider::new(&media_types, &charsets, &languages) {
			let variant = alternative.variant();
			prop_assert!(variant.media_type().is_none_or(|m| m.charset().is_none()));
		}
	}

	/// Property: the canonical rendering is stable and case-insensitive
	#[test]
	fn prop_media_type_canonical_form(
		main_type in "[a-zA-Z]{1,8}",
		subtype in "[a-zA-Z]{1,8}",
		parameters in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,6}", 0..4),
		charset in prop::option::of("(UTF-8|utf-8|ISO-8859-1|us-ascii)")
	) {
		let mut parts: Vec<String> = parameters
			.iter()
			.filter(|(name, _)| !matches!(name.as_str(), "charset" | "q"))
			.map(|(name, value)| format!("{}={value}", name.to_uppercase()))
			.collect();
		if let Some(charset) = &charset {
			parts.push(format!("charset=\"{charset}\""));
		}
		parts.reverse();
		let header = std::iter::once(format!("{main_type}/{subtype}"))
			.chain(parts)
			.collect::<Vec<_>>()
			.join(" ; ");

		let parsed = MediaType::parse(&header).unwrap();
		let canonical = parsed.to_header();
		prop_assert_eq!(&canonical, &canonical.to_ascii_lowercase());
		prop_assert_eq!(MediaType::parse(&canonical).unwrap(), parsed.clone());
		prop_assert_eq!(MediaType::parse(&canonical).unwrap().to_header(), canonical);
	}
}
