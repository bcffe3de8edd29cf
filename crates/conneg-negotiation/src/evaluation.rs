//! Scoring of one alternative against the client preferences

use crate::alternative::Alternative;
use crate::charset::CharacterEncoding;
use crate::comparator::compare_weighted;
use crate::language::Language;
use crate::media_type::MediaType;
use crate::negotiable::Negotiable;
use crate::quality::Quality;
use crate::variant::Variant;
use conneg_header::Weighted;

/// The weighted `Accept`, `Accept-Charset` and `Accept-Language` entries of a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPreferences {
	pub(crate) media_types: Vec<Weighted<MediaType>>,
	pub(crate) charsets: Vec<Weighted<CharacterEncoding>>,
	pub(crate) languages: Vec<Weighted<Language>>,
}

impl ClientPreferences {
	/// Entries of the `Accept` header, in header order.
	pub fn media_types(&self) -> &[Weighted<MediaType>] {
		&self.media_types
	}

	/// Entries of the `Accept-Charset` header, in header order.
	pub fn charsets(&self) -> &[Weighted<CharacterEncoding>] {
		&self.charsets
	}

	/// Entries of the `Accept-Language` header, in header order.
	pub fn languages(&self) -> &[Weighted<Language>] {
		&self.languages
	}

	/// Whether the client stated no preference at all.
	pub fn is_empty(&self) -> bool {
		self.media_types.is_empty() && self.charsets.is_empty() && self.languages.is_empty()
	}
}

/// Quality of one dimension and the value it resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionOutcome<T> {
	/// Contribution of the dimension to the overall quality.
	pub quality: Quality,
	/// The evaluated value, or the one picked from the preferences for an unset dimension.
	pub value: Option<T>,
}

/// Scores a single value (or the lack of one) against the accepted entries of its dimension.
///
/// * An unset value is resolved from the most preferred accepted entry with a
///   non-zero weight, unless that entry is a wildcard. Either way the
///   dimension scores a definite `1.0`.
/// * A set value scores the weight of the most specific accepted entry that
///   includes it: speculative when that entry is a wildcard, definite
///   otherwise, and `0.0` when no entry includes it.
/// * Without any accepted entry the client accepts anything: a definite `1.0`.
pub fn evaluate_dimension<T: Negotiable>(value: Option<&T>, accepted: &[Weighted<T>]) -> DimensionOutcome<T> {
	let Some(value) = value else {
		let preferred = accepted
			.iter()
			.filter(|entry| entry.weight() > 0.0)
			.min_by(|a, b| compare_weighted(a, b))
			.map(Weighted::entity)
			.filter(|entity| !entity.is_wildcard())
			.cloned();
		return DimensionOutcome {
			quality: Quality::ONE,
			value: preferred,
		};
	};

	if accepted.is_empty() {
		return DimensionOutcome {
			quality: Quality::ONE,
			value: Some(value.clone()),
		};
	}

	let quality = match accepted
		.iter()
		.filter(|entry| entry.entity().includes(value))
		.min_by(|a, b| compare_weighted(a, b))
	{
		Some(entry) if entry.entity().is_wildcard() => Quality::speculative(entry.weight()),
		Some(entry) => Quality::definite(entry.weight()),
		None => Quality::ZERO,
	};
	DimensionOutcome {
		quality,
		value: Some(value.clone()),
	}
}

/// Evaluates alternatives against one set of client preferences.
#[derive(Debug, Clone, Copy)]
pub struct AlternativeEvaluation<'a> {
	preferences: &'a ClientPreferences,
}

impl<'a> AlternativeEvaluation<'a> {
	/// Evaluates against the given preferences.
	pub fn new(preferences: &'a ClientPreferences) -> Self {
		Self { preferences }
	}

	/// Computes the overall quality of an alternative and its resolved form.
	///
	/// The quality is the product of the source quality (`1.0` for generated
	/// alternatives) and the three dimension qualities. Generated alternatives
	/// get their open dimensions filled from the client preferences and then
	/// from the defaults; predefined alternatives are returned unchanged.
	pub fn evaluate(&self, alternative: &Alternative) -> (Quality, Alternative) {
		let variant = alternative.variant();
		let media_type = evaluate_dimension(variant.media_type(), &self.preferences.media_types);
		// A charset parameter on the chosen media range fills an open charset.
		let embedded = match variant.charset() {
			Some(_) => None,
			None => media_type.value.as_ref().and_then(MediaType::charset),
		};
		let charset = evaluate_dimension(
			variant.charset().or(embedded.as_ref()),
			&self.preferences.charsets,
		);
		let language = evaluate_dimension(variant.language(), &self.preferences.languages);

		let source = if alternative.is_generated() { 1.0 } else { alternative.quality() };
		let quality = Quality::definite(source)
			.product(&media_type.quality)
			.product(&charset.quality)
			.product(&language.quality);

		let resolved = if alternative.is_generated() {
			let variant = Variant::from_parts(
				media_type.value.map(|m| m.without_charset()),
				charset.value,
				language.value,
			);
			alternative.with_variant(variant.with_defaults())
		} else {
			alternative.clone()
		};

		tracing::trace!(
			alternative = %alternative,
			resolved = %resolved.variant(),
			quality = %quality,
			"evaluated alternative"
		);
		(quality, resolved)
	}
}
