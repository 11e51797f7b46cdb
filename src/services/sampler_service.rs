use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub use crate::models::chart::DISPLAY_POINTS;
use crate::models::{DisplaySeries, PricePoint};

/// One hour in milliseconds
pub const HOUR_MS: i64 = 3_600_000;

/// Which way a series was malformed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("series is empty")]
    Empty,
    #[error("sample {index} is malformed: {reason}")]
    MalformedSample { index: usize, reason: String },
    #[error("sample {index} is older than the sample before it")]
    OutOfOrder { index: usize },
}

/// Sampler errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplerError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl PricePoint {
    /// Build a sample from a wire `[timestamp_ms, price]` pair. Elements are
    /// raw JSON so a `null` or string reports its index instead of failing
    /// the whole response.
    pub fn try_from_pair(index: usize, pair: &[Value]) -> Result<Self, SamplerError> {
        let malformed = |reason: &str| {
            SamplerError::from(InvalidInput::MalformedSample {
                index,
                reason: reason.to_string(),
            })
        };

        let [timestamp, price] = pair else {
            return Err(malformed(&format!("expected 2 values, got {}", pair.len())));
        };

        let timestamp_ms = match timestamp.as_i64() {
            Some(t) => t,
            None => match timestamp.as_f64() {
                Some(t) if t.fract() == 0.0 && t >= i64::MIN as f64 && t < i64::MAX as f64 => t as i64,
                Some(_) => return Err(malformed("timestamp is not an integer in range")),
                None => return Err(malformed("timestamp is not a number")),
            },
        };
        let price = price
            .as_f64()
            .filter(|p| p.is_finite())
            .ok_or_else(|| malformed("price is not a finite number"))?;

        Ok(PricePoint::new(timestamp_ms, price))
    }
}

/// Convert wire pairs into ordered samples
pub fn samples_from_pairs(pairs: &[Vec<Value>]) -> Result<Vec<PricePoint>, SamplerError> {
    pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| PricePoint::try_from_pair(index, pair))
        .collect()
}

/// Keep the first sample, then every sample at least an hour after the last
/// one kept. The reference moves with each kept sample, so hour boundaries
/// are measured from the first sample rather than a fixed clock grid.
/// Once the next boundary would pass `i64::MAX`, nothing more is kept.
pub fn bucket_by_hour(samples: &[PricePoint]) -> Result<Vec<PricePoint>, SamplerError> {
    let (first, rest) = samples.split_first().ok_or(InvalidInput::Empty)?;

    let mut hourly = vec![*first];
    let mut previous = first.timestamp_ms;
    let mut reference = first.timestamp_ms;

    for (offset, sample) in rest.iter().enumerate() {
        if sample.timestamp_ms < previous {
            return Err(InvalidInput::OutOfOrder { index: offset + 1 }.into());
        }
        previous = sample.timestamp_ms;

        if reference
            .checked_add(HOUR_MS)
            .is_some_and(|next| sample.timestamp_ms >= next)
        {
            hourly.push(*sample);
            reference = sample.timestamp_ms;
        }
    }

    Ok(hourly)
}

/// Pick at most [`DISPLAY_POINTS`] samples evenly spaced by index.
/// `step = len / 10`, clamped to 1 for short series so they pass through whole.
pub fn downsample(samples: &[PricePoint]) -> Result<Vec<PricePoint>, SamplerError> {
    if samples.is_empty() {
        return Err(InvalidInput::Empty.into());
    }

    let step = (samples.len() / DISPLAY_POINTS).max(1);

    Ok(samples
        .iter()
        .step_by(step)
        .take(DISPLAY_POINTS)
        .copied()
        .collect())
}

/// Parse, bucket and downsample one historical series
pub fn sample_for_display(label: &str, pairs: &[Vec<Value>]) -> Result<DisplaySeries, SamplerError> {
    let raw = samples_from_pairs(pairs)?;
    let hourly = bucket_by_hour(&raw)?;
    let points = downsample(&hourly)?;

    let series = DisplaySeries {
        label: label.to_string(),
        points,
        raw_len: raw.len(),
        hourly_len: hourly.len(),
    };

    if series.is_short() {
        debug!(
            "{}: only {} hourly sample(s) from {} raw, display series has {} point(s)",
            label,
            series.hourly_len,
            series.raw_len,
            series.points.len()
        );
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn points(raw: &[(i64, f64)]) -> Vec<PricePoint> {
        raw.iter().map(|&(t, p)| PricePoint::new(t, p)).collect()
    }

    fn hourly(n: usize) -> Vec<PricePoint> {
        (0..n).map(|i| PricePoint::new(i as i64 * HOUR_MS, i as f64)).collect()
    }

    #[test]
    fn test_bucket_skips_samples_inside_the_first_hour() {
        let input = points(&[
            (0, 100.0),
            (1000, 101.0),
            (3_600_000, 110.0),
            (7_200_001, 120.0),
            (10_800_005, 130.0),
        ]);

        let result = bucket_by_hour(&input).unwrap();

        assert_eq!(
            result,
            points(&[
                (0, 100.0),
                (3_600_000, 110.0),
                (7_200_001, 120.0),
                (10_800_005, 130.0),
            ])
        );
    }

    #[test]
    fn test_bucket_reference_shifts_with_each_kept_sample() {
        // 5400000 is kept, so the next boundary is 9000000, not 7200000
        let input = points(&[(0, 1.0), (5_400_000, 2.0), (7_200_000, 3.0), (9_000_000, 4.0)]);

        let result = bucket_by_hour(&input).unwrap();

        assert_eq!(result, points(&[(0, 1.0), (5_400_000, 2.0), (9_000_000, 4.0)]));
    }

    #[test]
    fn test_bucket_within_one_hour_keeps_only_first() {
        let input = points(&[(10, 1.0), (20, 2.0), (3_600_009, 3.0)]);

        assert_eq!(bucket_by_hour(&input).unwrap(), points(&[(10, 1.0)]));
    }

    #[test]
    fn test_bucket_single_sample() {
        let input = points(&[(42, 7.0)]);
        assert_eq!(bucket_by_hour(&input).unwrap(), input);
    }

    #[test]
    fn test_bucket_rejects_empty() {
        assert_eq!(
            bucket_by_hour(&[]),
            Err(SamplerError::InvalidInput(InvalidInput::Empty))
        );
    }

    #[test]
    fn test_bucket_rejects_descending_timestamps() {
        let input = points(&[(0, 1.0), (HOUR_MS, 2.0), (HOUR_MS - 1, 3.0)]);

        assert_eq!(
            bucket_by_hour(&input),
            Err(SamplerError::InvalidInput(InvalidInput::OutOfOrder { index: 2 }))
        );
    }

    #[test]
    fn test_bucket_near_i64_max_does_not_overflow() {
        let input = points(&[(i64::MAX - 10, 1.0), (i64::MAX, 2.0)]);
        assert_eq!(bucket_by_hour(&input).unwrap(), points(&[(i64::MAX - 10, 1.0)]));
    }

    #[test]
    fn test_bucket_keeps_last_boundary_before_i64_max() {
        let start = i64::MAX - 2 * HOUR_MS;
        let input = points(&[(start, 1.0), (start + HOUR_MS, 2.0), (i64::MAX, 3.0)]);

        let result = bucket_by_hour(&input).unwrap();

        assert_eq!(result, points(&[(start, 1.0), (start + HOUR_MS, 2.0)]));
    }

    #[test]
    fn test_pairs_at_i64_max_keep_hour_spacing() {
        let pairs = vec![
            vec![json!(i64::MAX - 10), json!(1.0)],
            vec![json!(i64::MAX), json!(2.0)],
        ];

        let series = sample_for_display("BTC", &pairs).unwrap();

        assert_eq!(series.hourly_len, 1);
        assert_eq!(series.points[0].timestamp_ms, i64::MAX - 10);
    }

    #[test]
    fn test_downsample_25_takes_every_second() {
        let input = hourly(25);

        let result = downsample(&input).unwrap();

        let indices: Vec<i64> = result.iter().map(|p| p.timestamp_ms / HOUR_MS).collect();
        assert_eq!(indices, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_downsample_short_series_passes_through() {
        let input = hourly(5);
        assert_eq!(downsample(&input).unwrap(), input);
    }

    #[test]
    fn test_downsample_exactly_ten() {
        let input = hourly(10);
        assert_eq!(downsample(&input).unwrap(), input);
    }

    #[test]
    fn test_downsample_168_hours() {
        // a 7 day window
        let result = downsample(&hourly(168)).unwrap();
        assert_eq!(result.len(), 10);
        assert_eq!(result[1].timestamp_ms, 16 * HOUR_MS);
        assert_eq!(result[9].timestamp_ms, 144 * HOUR_MS);
    }

    #[test]
    fn test_downsample_rejects_empty() {
        assert_eq!(
            downsample(&[]),
            Err(SamplerError::InvalidInput(InvalidInput::Empty))
        );
    }

    #[test]
    fn test_pair_conversion() {
        assert_eq!(
            PricePoint::try_from_pair(0, &[json!(1_700_000_000_000i64), json!(37_000.5)]).unwrap(),
            PricePoint::new(1_700_000_000_000, 37_000.5)
        );
        // whole-number floats are accepted as timestamps
        assert_eq!(
            PricePoint::try_from_pair(0, &[json!(3_600_000.0), json!(2)]).unwrap(),
            PricePoint::new(3_600_000, 2.0)
        );
    }

    #[test]
    fn test_pair_conversion_rejects_malformed() {
        let bad: Vec<Vec<Value>> = vec![
            vec![json!(1)],
            vec![json!(1), json!(2.0), json!(3.0)],
            vec![json!(1.5), json!(2.0)],
            vec![json!(null), json!(2.0)],
            vec![json!("1700000000000"), json!(2.0)],
            vec![json!(1), json!(null)],
            vec![json!(1), json!("37000.5")],
            vec![json!(u64::MAX), json!(2.0)],
        ];

        for pair in &bad {
            let err = PricePoint::try_from_pair(3, pair).unwrap_err();
            assert!(
                matches!(
                    err,
                    SamplerError::InvalidInput(InvalidInput::MalformedSample { index: 3, .. })
                ),
                "pair {:?} gave {:?}",
                pair,
                err
            );
        }
    }

    #[test]
    fn test_samples_from_pairs_reports_index() {
        let pairs = vec![vec![json!(0), json!(1.0)], vec![json!(1000), json!(null)]];

        let err = samples_from_pairs(&pairs).unwrap_err();

        assert!(matches!(
            err,
            SamplerError::InvalidInput(InvalidInput::MalformedSample { index: 1, .. })
        ));
    }

    #[test]
    fn test_sample_for_display_records_stage_lengths() {
        // one sample every 30 minutes for 30 hours
        let pairs: Vec<Vec<Value>> = (0..60)
            .map(|i| vec![json!(i * HOUR_MS / 2), json!(100.0 + i as f64)])
            .collect();

        let series = sample_for_display("BTC", &pairs).unwrap();

        assert_eq!(series.label, "BTC");
        assert_eq!(series.raw_len, 60);
        assert_eq!(series.hourly_len, 30);
        assert_eq!(series.points.len(), 10);
        assert_eq!(series.points[1].timestamp_ms, 3 * HOUR_MS);
        assert!(!series.is_short());
    }

    #[test]
    fn test_sample_for_display_flags_short_series() {
        let pairs = vec![vec![json!(0), json!(1.0)], vec![json!(HOUR_MS), json!(2.0)]];

        let series = sample_for_display("LTC", &pairs).unwrap();

        assert_eq!(series.points.len(), 2);
        assert!(series.is_short());
    }

    #[test]
    fn test_sample_for_display_rejects_empty() {
        assert_eq!(
            sample_for_display("ETH", &[]),
            Err(SamplerError::InvalidInput(InvalidInput::Empty))
        );
    }

    fn ascending_series() -> impl Strategy<Value = Vec<PricePoint>> {
        (
            0i64..1_000_000_000,
            prop::collection::vec((0i64..2 * HOUR_MS, 0.0f64..100_000.0), 1..300),
        )
            .prop_map(|(start, gaps)| {
                let mut t = start;
                gaps.into_iter()
                    .map(|(gap, price)| {
                        t += gap;
                        PricePoint::new(t, price)
                    })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn bucket_output_is_ascending_subsequence_starting_at_first(input in ascending_series()) {
            let output = bucket_by_hour(&input).unwrap();

            prop_assert_eq!(output[0], input[0]);

            let mut cursor = input.iter();
            for kept in &output {
                prop_assert!(cursor.any(|p| p == kept));
            }

            for pair in output.windows(2) {
                prop_assert!(pair[1].timestamp_ms > pair[0].timestamp_ms);
                prop_assert!(pair[1].timestamp_ms - pair[0].timestamp_ms >= HOUR_MS);
            }
        }

        #[test]
        fn downsample_length_is_min_ten(input in ascending_series()) {
            let output = downsample(&input).unwrap();
            prop_assert_eq!(output.len(), input.len().min(DISPLAY_POINTS));
        }

        #[test]
        fn downsample_is_idempotent(input in ascending_series()) {
            let once = downsample(&input).unwrap();
            let twice = downsample(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
