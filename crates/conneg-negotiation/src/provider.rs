//! Generation of alternatives from the supported dimension values
//!
//! The provider walks the cartesian product of media types, charsets and
//! languages (media type outermost, language innermost) and hands out a
//! generated [`Alternative`] per combination. Source qualities degrade over
//! eight equal buckets so that earlier combinations are preferred.

use crate::alternative::Alternative;
use crate::charset::CharacterEncoding;
use crate::language::Language;
use crate::media_type::MediaType;
use crate::variant::Variant;
use std::iter::FusedIterator;

/// Number of quality buckets.
const BUCKETS: usize = 8;

/// Quality step between two buckets.
const BUCKET_STEP: f64 = 1.0 / BUCKETS as f64;

/// A supported media type with its charset parameter split off.
type SplitMediaType = (Option<MediaType>, Option<CharacterEncoding>);

/// Iterator over generated alternatives.
///
/// An empty dimension counts as a single absent value, so it does not
/// multiply the product; when all three are empty nothing is generated.
///
/// A media type carrying its own `charset` parameter is only combined with
/// the languages: the charset dimension is skipped for it, together with the
/// positions those combinations would have taken.
///
/// # Examples
///
/// ```
/// use conneg_negotiation::{AlternativeProvider, Language, MediaType};
///
/// let provider = AlternativeProvider::new(
///     &[MediaType::TEXT_HTML, MediaType::TEXT_PLAIN],
///     &[],
///     &[Language::ENGLISH],
/// );
/// let qualities: Vec<f64> = provider.map(|a| a.quality()).collect();
/// assert_eq!(qualities, vec![1.0, 0.875]);
/// ```
#[derive(Debug, Clone)]
pub struct AlternativeProvider {
	media_types: Vec<SplitMediaType>,
	charsets: Vec<Option<CharacterEncoding>>,
	languages: Vec<Option<Language>>,
	total: usize,
	bucket_size: usize,
	position: usize,
	media_index: usize,
	charset_index: usize,
	language_index: usize,
}

impl AlternativeProvider {
	/// Prepares the combinations of the given supported values.
	pub fn new(media_types: &[MediaType], charsets: &[CharacterEncoding], languages: &[Language]) -> Self {
		let nothing_supported = media_types.is_empty() && charsets.is_empty() && languages.is_empty();

		let media_types: Vec<SplitMediaType> = if nothing_supported {
			Vec::new()
		} else if media_types.is_empty() {
			vec![(None, None)]
		} else {
			media_types
				.iter()
				.map(|media_type| (Some(media_type.without_charset()), media_type.charset()))
				.collect()
		};
		let charsets = or_absent(charsets);
		let languages = or_absent(languages);

		let total = media_types.len() * charsets.len() * languages.len();
		let bucket_size = total.div_ceil(BUCKETS).max(1);
		tracing::trace!(total, bucket_size, "generating alternatives");

		Self {
			media_types,
			charsets,
			languages,
			total,
			bucket_size,
			position: 0,
			media_index: 0,
			charset_index: 0,
			language_index: 0,
		}
	}

	/// Size of the full cartesian product, skipped combinations included.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of consecutive positions sharing one quality.
	pub fn bucket_size(&self) -> usize {
		self.bucket_size
	}

	fn quality_at(&self, position: usize) -> f64 {
		let bucket = (position as f64 / self.bucket_size as f64 + 0.5).floor();
		round3(1.0 - bucket * BUCKET_STEP)
	}
}

fn or_absent<T: Clone>(values: &[T]) -> Vec<Option<T>> {
	if values.is_empty() {
		vec![None]
	} else {
		values.iter().cloned().map(Some).collect()
	}
}

fn round3(value: f64) -> f64 {
	(value * 1000.0).round() / 1000.0
}

impl Iterator for AlternativeProvider {
	type Item = Alternative;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let (media_type, own_charset) = self.media_types.get(self.media_index)?;

			let Some(language) = self.languages.get(self.language_index) else {
				self.language_index = 0;
				if own_charset.is_some() {
					self.position += (self.charsets.len() - 1) * self.languages.len();
					self.media_index += 1;
				} else if self.charset_index + 1 < self.charsets.len() {
					self.charset_index += 1;
				} else {
					self.charset_index = 0;
					self.media_index += 1;
				}
				continue;
			};

			let charset = match own_charset {
				Some(charset) => Some(charset.clone()),
				None => self.charsets.get(self.charset_index).cloned().flatten(),
			};
			let variant = Variant::from_parts(media_type.clone(), charset, language.clone());
			let quality = self.quality_at(self.position);

			self.language_index += 1;
			self.position += 1;
			return Some(Alternative::generated(quality, variant));
		}
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.media_index >= self.media_types.len() {
			return (0, Some(0));
		}
		(0, Some(self.total.saturating_sub(self.position)))
	}
}

impl FusedIterator for AlternativeProvider {}
