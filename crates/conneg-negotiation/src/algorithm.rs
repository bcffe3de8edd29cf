//! The remote variant selection algorithm
//!
//! A simplified form of RFC 2296: candidates are evaluated against the
//! client preferences, ranked, and the best definite candidate is selected,
//! falling back to the best speculative one.

use crate::alternative::{Alternative, Alternatives};
use crate::charset::CharacterEncoding;
use crate::comparator::compare_alternatives;
use crate::error::{NegotiationError, Result};
use crate::evaluation::{AlternativeEvaluation, ClientPreferences};
use crate::language::Language;
use crate::media_type::MediaType;
use crate::provider::AlternativeProvider;
use crate::quality::Quality;
use crate::result::NegotiationResult;
use crate::variant::Variant;
use std::cmp::Ordering;

/// Everything one negotiation runs on.
#[derive(Debug, Clone, Default)]
pub struct NegotiationInput {
	/// Supported media types, combined into generated alternatives.
	pub media_types: Vec<MediaType>,
	/// Supported charsets, combined into generated alternatives.
	pub charsets: Vec<CharacterEncoding>,
	/// Supported languages, combined into generated alternatives.
	pub languages: Vec<Language>,
	/// Predefined alternatives, considered before generated ones.
	pub alternatives: Vec<Alternative>,
	pub preferences: ClientPreferences,
	/// Variant to respond with when nothing is acceptable; [`Variant::default_error`] if unset.
	pub error_variant: Option<Variant>,
}

/// One negotiation run.
#[derive(Debug)]
pub struct NegotiationAlgorithm {
	input: NegotiationInput,
}

impl NegotiationAlgorithm {
	/// Prepares a run over `input`.
	pub fn new(input: NegotiationInput) -> Self {
		Self { input }
	}

	/// Runs the negotiation.
	///
	/// # Errors
	///
	/// Returns [`NegotiationError::NoAlternatives`] when there is nothing to
	/// offer. A request no alternative satisfies is not an error: the result
	/// is simply not acceptable.
	pub fn execute(self) -> Result<NegotiationResult> {
		let NegotiationInput {
			media_types,
			charsets,
			languages,
			alternatives,
			preferences,
			error_variant,
		} = self.input;
		let evaluation = AlternativeEvaluation::new(&preferences);

		let mut candidates = alternatives;
		let predefined = candidates.len();
		for generated in AlternativeProvider::new(&media_types, &charsets, &languages) {
			let (_, resolved) = evaluation.evaluate(&generated);
			let shadowed = candidates[..predefined]
				.iter()
				.any(|alternative| alternative.variant() == resolved.variant());
			if shadowed {
				tracing::debug!(
					variant = %resolved.variant(),
					"generated alternative shadowed by a predefined one"
				);
				continue;
			}
			candidates.push(generated);
		}
		if candidates.is_empty() {
			return Err(NegotiationError::NoAlternatives);
		}

		let mut diagnostics = Alternatives::default();
		let mut ranking: Vec<(Quality, Alternative)> = Vec::with_capacity(candidates.len());
		for candidate in &candidates {
			let (quality, resolved) = evaluation.evaluate(candidate);
			diagnostics.push(quality, resolved.clone());
			if quality.is_positive() {
				insert_ranked(&mut ranking, quality, resolved);
			}
		}

		let selection = select(&ranking);
		match &selection {
			Some((quality, alternative)) => tracing::debug!(
				candidates = candidates.len(),
				variant = %alternative.variant(),
				quality = %quality,
				"negotiation selected a variant"
			),
			None => tracing::debug!(
				candidates = candidates.len(),
				"negotiation found no acceptable variant"
			),
		}

		Ok(NegotiationResult::new(
			selection.map(|(quality, alternative)| (alternative.variant().clone(), quality)),
			diagnostics,
			error_variant.unwrap_or_else(Variant::default_error),
		))
	}
}

/// Order of the ranking: higher quality first, then the alternative the
/// comparator prefers.
fn rank_order(a: &(Quality, Alternative), b: &(Quality, Alternative)) -> Ordering {
	b.0.cmp(&a.0).then_with(|| compare_alternatives(&a.1, &b.1))
}

/// Inserts after every entry that ranks before or equal to the new one, so
/// ties keep candidate order.
fn insert_ranked(ranking: &mut Vec<(Quality, Alternative)>, quality: Quality, alternative: Alternative) {
	let entry = (quality, alternative);
	let index = ranking
		.iter()
		.position(|ranked| rank_order(&entry, ranked) == Ordering::Less)
		.unwrap_or(ranking.len());
	ranking.insert(index, entry);
}

/// The first definite entry of the ranking, otherwise its first speculative one.
fn select(ranking: &[(Quality, Alternative)]) -> Option<(Quality, Alternative)> {
	let mut speculative = None;
	for entry in ranking {
		if entry.0.is_definite() {
			return Some(entry.clone());
		}
		if speculative.is_none() {
			speculative = Some(entry);
		}
	}
	speculative.cloned()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::quality::QualityKind;
	use conneg_header::parse_weighted_list;
	use rstest::rstest;

	fn variant(media_type: &str) -> Variant {
		Variant::new().with_type(MediaType::parse(media_type).unwrap()).unwrap()
	}

	#[rstest]
	fn test_nothing_to_offer_is_an_error() {
		let result = NegotiationAlgorithm::new(NegotiationInput::default()).execute();
		assert!(matches!(result, Err(NegotiationError::NoAlternatives)));
	}

	#[rstest]
	fn test_definite_beats_heavier_speculative() {
		let input = NegotiationInput {
			alternatives: vec![
				Alternative::new(1.0, variant("image/png")).unwrap(),
				Alternative::new(0.5, variant("text/html")).unwrap(),
			],
			preferences: ClientPreferences {
				media_types: parse_weighted_list("text/html;q=0.2, */*").unwrap(),
				..ClientPreferences::default()
			},
			..NegotiationInput::default()
		};
		let result = NegotiationAlgorithm::new(input).execute().unwrap();

		assert!(result.is_acceptable());
		assert_eq!(result.variant(), Some(&variant("text/html")));
		let quality = result.quality().unwrap();
		assert_eq!(quality.kind(), QualityKind::Definite);
		assert_eq!(quality.weight(), 0.5 * 0.2);
	}

	#[rstest]
	fn test_speculative_selected_without_definite() {
		let input = NegotiationInput {
			alternatives: vec![Alternative::new(1.0, variant("image/png")).unwrap()],
			preferences: ClientPreferences {
				media_types: parse_weighted_list("text/html, */*;q=0.1").unwrap(),
				..ClientPreferences::default()
			},
			..NegotiationInput::default()
		};
		let result = NegotiationAlgorithm::new(input).execute().unwrap();
		assert_eq!(result.quality(), Some(Quality::speculative(0.1)));
	}

	#[rstest]
	fn test_not_acceptable() {
		let input = NegotiationInput {
			media_types: vec![MediaType::TEXT_HTML],
			preferences: ClientPreferences {
				media_types: parse_weighted_list("application/json").unwrap(),
				..ClientPreferences::default()
			},
			..NegotiationInput::default()
		};
		let result = NegotiationAlgorithm::new(input).execute().unwrap();
		assert!(!result.is_acceptable());
		assert_eq!(result.variant(), None);
		assert_eq!(result.alternatives().len(), 1);
	}

	#[rstest]
	fn test_predefined_shadows_generated_duplicate() {
		let predefined = Variant::default_error().with_type(MediaType::TEXT_HTML).unwrap();
		let input = NegotiationInput {
			media_types: vec![MediaType::TEXT_HTML, MediaType::APPLICATION_JSON],
			alternatives: vec![Alternative::new(0.3, predefined.clone()).unwrap()],
			..NegotiationInput::default()
		};
		let result = NegotiationAlgorithm::new(input).execute().unwrap();

		assert_eq!(result.alternatives().len(), 2);
		let (quality, first) = result.alternatives().get(0).unwrap();
		assert!(!first.is_generated());
		assert_eq!(first.variant(), &predefined);
		assert_eq!(quality, &Quality::definite(0.3));
		assert_eq!(
			result.variant().and_then(Variant::media_type),
			Some(&MediaType::APPLICATION_JSON)
		);
	}

	#[rstest]
	fn test_ties_prefer_specific_then_candidate_order() {
		let html = variant("text/html");
		let html_en = html.clone().with_language(Language::ENGLISH).unwrap();
		let input = NegotiationInput {
			alternatives: vec![
				Alternative::new(1.0, html.clone()).unwrap(),
				Alternative::new(1.0, html_en.clone()).unwrap(),
				Alternative::new(1.0, html.clone()).unwrap(),
			],
			..NegotiationInput::default()
		};
		let result = NegotiationAlgorithm::new(input).execute().unwrap();
		assert_eq!(result.variant(), Some(&html_en));
	}

	#[rstest]
	fn test_insert_ranked_is_stable() {
		let mut ranking = Vec::new();
		let first = Alternative::new(1.0, variant("text/html")).unwrap();
		let second = Alternative::new(1.0, variant("application/json")).unwrap();
		insert_ranked(&mut ranking, Quality::definite(0.5), first.clone());
		insert_ranked(&mut ranking, Quality::definite(0.5), second.clone());
		insert_ranked(&mut ranking, Quality::definite(0.9), second.clone());

		let order: Vec<_> = ranking.iter().map(|(q, a)| (q.weight(), a.clone())).collect();
		assert_eq!(order, vec![(0.9, second.clone()), (0.5, first), (0.5, second)]);
	}
}
