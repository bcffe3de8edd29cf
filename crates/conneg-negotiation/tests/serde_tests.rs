//! Serialization of entities and qualities

use conneg_negotiation::{CharacterEncoding, Language, MediaType, Quality, QualityKind};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_entities_serialize_as_canonical_headers() {
	let media_type = MediaType::parse("Text/HTML; Level=1; charset=UTF-8").unwrap();
	let value = json!({
		"type": media_type,
		"charset": CharacterEncoding::ISO_8859_1,
		"language": Language::parse("en-GB").unwrap(),
	});

	assert_eq!(
		value,
		json!({
			"type": "text/html; charset=utf-8; level=1",
			"charset": "iso-8859-1",
			"language": "en-gb",
		})
	);
}

#[rstest]
fn test_entities_deserialize_through_parsers() {
	let media_type: MediaType = serde_json::from_str("\"application/LD+JSON\"").unwrap();
	assert_eq!(media_type, MediaType::APPLICATION_LD_JSON);

	let languages: Vec<Language> = serde_json::from_str(r#"["fr", "*"]"#).unwrap();
	assert_eq!(languages[1], Language::WILDCARD);
}

#[rstest]
#[case::media_type("\"text\"")]
#[case::charset_parameter("\"text/html;charset=*\"")]
fn test_invalid_media_type_rejected(#[case] source: &str) {
	let err = serde_json::from_str::<MediaType>(source).unwrap_err();
	assert!(err.to_string().starts_with("Invalid"), "{err}");
}

#[rstest]
fn test_invalid_language_rejected() {
	let err = serde_json::from_str::<Language>("\"e1\"").unwrap_err();
	assert!(err.to_string().contains("primary tag must be alphabetical"));
}

#[rstest]
fn test_quality_serialization() {
	let value = serde_json::to_value(Quality::speculative(0.5)).unwrap();
	assert_eq!(value, json!({ "weight": 0.5, "kind": "speculative" }));

	let quality: Quality = serde_json::from_value(json!({ "weight": 1.0, "kind": "definite" })).unwrap();
	assert_eq!(quality.kind(), QualityKind::Definite);
}
