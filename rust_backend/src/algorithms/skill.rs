//! Skill estimation over independent resamples.
//!
//! For every resample the observed number of hits is compared with what the
//! asserted probabilities alone would produce, by Monte Carlo. The report is
//! the mean over resamples of the information ratio, the significance, the
//! average asserted probability and the observed hit rate.

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::conflicts::OverlapGraph;
use super::independent_sets::{sample_independent_set, sample_rng};
use crate::core::domain::{Outcome, Prediction};
use crate::error::{SkillError, SkillResult};

/// Decimal places kept for the information ratio, APP, HR and mean sample size.
pub const RATIO_DECIMALS: i32 = 3;
/// Decimal places kept for the significance percentage.
pub const SIGNIFICANCE_DECIMALS: i32 = 1;

pub const DEFAULT_RESAMPLE_COUNT: usize = 500;
pub const DEFAULT_MONTE_CARLO_DRAWS: usize = 500;
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Resampling and Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOptions {
    #[serde(default = "default_resample_count")]
    pub resample_count: usize,
    #[serde(default = "default_monte_carlo_draws")]
    pub monte_carlo_draws: usize,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
}

fn default_resample_count() -> usize {
    DEFAULT_RESAMPLE_COUNT
}

fn default_monte_carlo_draws() -> usize {
    DEFAULT_MONTE_CARLO_DRAWS
}

fn default_random_seed() -> u64 {
    DEFAULT_RANDOM_SEED
}

impl Default for SkillOptions {
    fn default() -> Self {
        Self {
            resample_count: default_resample_count(),
            monte_carlo_draws: default_monte_carlo_draws(),
            random_seed: default_random_seed(),
        }
    }
}

impl SkillOptions {
    pub fn validate(&self) -> SkillResult<()> {
        if self.resample_count == 0 {
            return Err(SkillError::invalid("resample_count must be at least 1"));
        }
        if self.monte_carlo_draws == 0 {
            return Err(SkillError::invalid("monte_carlo_draws must be at least 1"));
        }
        Ok(())
    }
}

/// Skill measured on one independent resample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSkill {
    pub size: usize,
    pub observed_hits: usize,
    /// Mean asserted probability of the members (APP of this resample).
    pub expected_hit_rate: f64,
    pub observed_hit_rate: f64,
    pub information_ratio: f64,
    /// Fraction of Monte Carlo trials with at least `observed_hits` successes.
    pub p_value: f64,
    /// `1 - p_value`, in `[0, 1]`.
    pub significance: f64,
}

/// Aggregate skill of a prediction set, rounded for reporting.
///
/// `information_ratio`, `average_probability`, `hit_rate` and
/// `mean_sample_size` keep [`RATIO_DECIMALS`] decimals; `significance_pct` is a
/// percentage with [`SIGNIFICANCE_DECIMALS`] decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillReport {
    pub num_predictions: usize,
    pub information_ratio: f64,
    pub significance_pct: f64,
    pub average_probability: f64,
    pub hit_rate: f64,
    pub mean_sample_size: f64,
    pub num_resamples: usize,
    pub monte_carlo_draws: usize,
    pub random_seed: u64,
}

impl SkillReport {
    /// Averages per-resample values into a report.
    ///
    /// `samples` must be non-empty.
    pub fn from_samples(
        num_predictions: usize,
        samples: &[SampleSkill],
        options: &SkillOptions,
    ) -> Self {
        let mean = |f: fn(&SampleSkill) -> f64| -> f64 {
            samples.iter().map(f).sum::<f64>() / samples.len() as f64
        };

        Self {
            num_predictions,
            information_ratio: round_to(mean(|s| s.information_ratio), RATIO_DECIMALS),
            significance_pct: round_to(100.0 * mean(|s| s.significance), SIGNIFICANCE_DECIMALS),
            average_probability: round_to(mean(|s| s.expected_hit_rate), RATIO_DECIMALS),
            hit_rate: round_to(mean(|s| s.observed_hit_rate), RATIO_DECIMALS),
            mean_sample_size: round_to(mean(|s| s.size as f64), RATIO_DECIMALS),
            num_resamples: samples.len(),
            monte_carlo_draws: options.monte_carlo_draws,
            random_seed: options.random_seed,
        }
    }
}

/// Computes the skill of tested predictions.
///
/// # Arguments
/// * `predictions` - Predictions with a defined outcome and an asserted
///   probability, e.g. the output of [`super::hit_test::test_predictions`]
/// * `options` - Resample count, Monte Carlo draws and seed
///
/// # Errors
/// * [`SkillError::InvalidInput`] for zero resamples or draws
/// * [`SkillError::Precondition`] for an empty set, an untested prediction
///   or a missing probability; raised before any sampling
/// * [`SkillError::DegenerateInput`] when a resample's probabilities are all
///   zero, which leaves its information ratio undefined
///
/// # Example
///
/// ```
/// use quake_skill::algorithms::{calculate_skill, SkillOptions};
/// use quake_skill::core::{Outcome, Prediction};
///
/// let predictions = vec![
///     Prediction::new(0.0, 5.0, 0.0, 0.0, 50.0, 5.0).unwrap()
///         .with_probability(0.16).unwrap()
///         .with_outcome(Outcome::Miss),
///     Prediction::new(0.0, 5.0, 45.0, 90.0, 50.0, 5.0).unwrap()
///         .with_probability(0.5).unwrap()
///         .with_outcome(Outcome::Hit),
/// ];
/// let report = calculate_skill(&predictions, &SkillOptions::default()).unwrap();
/// assert_eq!(report.hit_rate, 0.5);
/// assert_eq!(report.average_probability, 0.33);
/// ```
pub fn calculate_skill(predictions: &[Prediction], options: &SkillOptions) -> SkillResult<SkillReport> {
    let samples = estimate_samples(predictions, options)?;
    let report = SkillReport::from_samples(predictions.len(), &samples, options);

    info!(
        "Skill of {} predictions: IR {}, significance {}%, APP {}, HR {}",
        report.num_predictions,
        report.information_ratio,
        report.significance_pct,
        report.average_probability,
        report.hit_rate
    );
    Ok(report)
}

/// Per-resample skill values, in resample order.
///
/// Same checks and errors as [`calculate_skill`].
pub fn estimate_samples(predictions: &[Prediction], options: &SkillOptions) -> SkillResult<Vec<SampleSkill>> {
    options.validate()?;
    let probabilities = check_ready(predictions)?;

    let graph = OverlapGraph::build(predictions);
    debug!(
        "Drawing {} resamples with {} Monte Carlo draws each (seed {})",
        options.resample_count, options.monte_carlo_draws, options.random_seed
    );

    let evaluate = |k: usize| {
        let mut rng = sample_rng(options.random_seed, k);
        let members = sample_independent_set(&graph, &mut rng);
        evaluate_sample(k, &members, predictions, &probabilities, options.monte_carlo_draws, &mut rng)
    };

    #[cfg(feature = "parallel")]
    let samples = {
        use rayon::prelude::*;
        (0..options.resample_count)
            .into_par_iter()
            .map(evaluate)
            .collect::<SkillResult<Vec<_>>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let samples = (0..options.resample_count)
        .map(evaluate)
        .collect::<SkillResult<Vec<_>>>()?;

    Ok(samples)
}

/// Skill of one resample given its members.
///
/// `probabilities[i]` is the asserted probability of `predictions[i]`.
pub fn evaluate_sample<R: Rng + ?Sized>(
    index: usize,
    members: &[usize],
    predictions: &[Prediction],
    probabilities: &[f64],
    monte_carlo_draws: usize,
    rng: &mut R,
) -> SkillResult<SampleSkill> {
    if members.is_empty() {
        return Err(SkillError::DegenerateInput {
            sample: index,
            reason: "resample has no members".to_string(),
        });
    }

    let member_probabilities: Vec<f64> = members.iter().map(|&i| probabilities[i]).collect();
    let observed_hits = members.iter().filter(|&&i| predictions[i].is_hit()).count();

    let size = members.len() as f64;
    let expected_hit_rate = member_probabilities.iter().sum::<f64>() / size;
    if expected_hit_rate <= 0.0 {
        return Err(SkillError::DegenerateInput {
            sample: index,
            reason: format!(
                "all {} members assert zero probability, information ratio is undefined",
                members.len()
            ),
        });
    }
    let observed_hit_rate = observed_hits as f64 / size;

    let p_value = monte_carlo_p_value(&member_probabilities, observed_hits, monte_carlo_draws, rng);

    Ok(SampleSkill {
        size: members.len(),
        observed_hits,
        expected_hit_rate,
        observed_hit_rate,
        information_ratio: observed_hit_rate / expected_hit_rate,
        p_value,
        significance: 1.0 - p_value,
    })
}

/// Fraction of `draws` simulated trials in which at least `observed_hits`
/// members succeed, each member succeeding with its own probability.
pub fn monte_carlo_p_value<R: Rng + ?Sized>(
    probabilities: &[f64],
    observed_hits: usize,
    draws: usize,
    rng: &mut R,
) -> f64 {
    if draws == 0 {
        return 1.0;
    }

    let at_least_observed = (0..draws)
        .filter(|_| {
            let successes = probabilities
                .iter()
                .filter(|&&p| rng.gen::<f64>() <= p)
                .count();
            successes >= observed_hits
        })
        .count();

    at_least_observed as f64 / draws as f64
}

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Checks that the set can be scored and returns its probabilities.
fn check_ready(predictions: &[Prediction]) -> SkillResult<Vec<f64>> {
    if predictions.is_empty() {
        return Err(SkillError::Precondition(
            "no predictions to evaluate".to_string(),
        ));
    }

    let untested = predictions
        .iter()
        .filter(|p| p.outcome() == Outcome::Undefined)
        .count();
    if untested > 0 {
        return Err(SkillError::Precondition(format!(
            "{} of {} predictions have not been tested",
            untested,
            predictions.len()
        )));
    }

    predictions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.probability().ok_or_else(|| {
                SkillError::Precondition(format!("prediction {} has no probability assigned", i))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::independent_sets::draw_independent_sets;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tested(lat: f64, lon: f64, p: f64, outcome: Outcome) -> Prediction {
        Prediction::new(0.0, 10.0, lat, lon, 100.0, 5.0)
            .unwrap()
            .with_probability(p)
            .unwrap()
            .with_outcome(outcome)
    }

    fn small_options() -> SkillOptions {
        SkillOptions {
            resample_count: 50,
            monte_carlo_draws: 200,
            random_seed: 9,
        }
    }

    #[test]
    fn two_disjoint_predictions() {
        let predictions = vec![
            tested(0.0, 0.0, 0.16, Outcome::Miss),
            tested(0.0, 90.0, 0.50, Outcome::Hit),
        ];
        let report = calculate_skill(&predictions, &SkillOptions::default()).unwrap();

        assert_eq!(report.num_predictions, 2);
        assert_eq!(report.average_probability, 0.33);
        assert_eq!(report.hit_rate, 0.5);
        assert_eq!(report.information_ratio, 1.515);
        assert_eq!(report.mean_sample_size, 2.0);
        assert_eq!(report.num_resamples, 500);
        // P(at least one success) = 1 - 0.84 * 0.5 = 0.58
        assert_eq!(report.significance_pct, 41.9);
    }

    #[test]
    fn parallel_and_sequential_samples_agree() {
        let predictions: Vec<Prediction> = (0..40)
            .map(|i| {
                let outcome = if i % 4 == 1 { Outcome::Hit } else { Outcome::Miss };
                tested((i % 4) as f64, (i / 4) as f64, 0.1 + 0.01 * i as f64, outcome)
            })
            .collect();
        let options = small_options();
        let probabilities: Vec<f64> = predictions.iter().filter_map(Prediction::probability).collect();
        let graph = OverlapGraph::build(&predictions);

        let sequential: Vec<SampleSkill> = (0..options.resample_count)
            .map(|k| {
                let mut rng = sample_rng(options.random_seed, k);
                let members = sample_independent_set(&graph, &mut rng);
                evaluate_sample(
                    k,
                    &members,
                    &predictions,
                    &probabilities,
                    options.monte_carlo_draws,
                    &mut rng,
                )
                .unwrap()
            })
            .collect();

        assert_eq!(estimate_samples(&predictions, &options).unwrap(), sequential);

        let sets = draw_independent_sets(&graph, options.resample_count, options.random_seed);
        let sizes: Vec<usize> = sets.iter().map(Vec::len).collect();
        let sampled: Vec<usize> = sequential.iter().map(|s| s.size).collect();
        assert_eq!(sizes, sampled);
    }

    #[test]
    fn fixed_seed_gives_identical_reports() {
        let predictions: Vec<Prediction> = (0..30)
            .map(|i| {
                let outcome = if i % 3 == 0 { Outcome::Hit } else { Outcome::Miss };
                tested((i % 5) as f64, (i / 5) as f64, 0.05 + 0.01 * i as f64, outcome)
            })
            .collect();

        let a = calculate_skill(&predictions, &small_options()).unwrap();
        let b = calculate_skill(&predictions, &small_options()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.information_ratio.to_bits(), b.information_ratio.to_bits());
        assert_eq!(a.significance_pct.to_bits(), b.significance_pct.to_bits());

        let sa = estimate_samples(&predictions, &small_options()).unwrap();
        let sb = estimate_samples(&predictions, &small_options()).unwrap();
        assert_eq!(sa, sb);
    }

    #[test]
    fn overlapping_predictions_are_not_double_counted() {
        // three identical windows: every resample keeps exactly one
        let predictions = vec![
            tested(10.0, 10.0, 0.2, Outcome::Hit),
            tested(10.0, 10.0, 0.2, Outcome::Hit),
            tested(10.0, 10.0, 0.2, Outcome::Hit),
        ];
        let samples = estimate_samples(&predictions, &small_options()).unwrap();
        assert!(samples.iter().all(|s| s.size == 1 && s.observed_hits == 1));
        let report = SkillReport::from_samples(3, &samples, &small_options());
        assert_eq!(report.information_ratio, 5.0);
        assert_eq!(report.mean_sample_size, 1.0);
    }

    #[test]
    fn significance_and_ratio_bounds() {
        let predictions = vec![
            tested(0.0, 0.0, 0.3, Outcome::Hit),
            tested(0.0, 0.5, 0.4, Outcome::Miss),
            tested(30.0, 30.0, 0.1, Outcome::Miss),
            tested(-30.0, 60.0, 0.9, Outcome::Hit),
        ];
        for s in estimate_samples(&predictions, &small_options()).unwrap() {
            assert!((0.0..=1.0).contains(&s.significance));
            assert!((0.0..=1.0).contains(&s.p_value));
            assert!(s.information_ratio >= 0.0);
        }
    }

    #[test]
    fn untested_predictions_fail_fast() {
        let predictions = vec![
            tested(0.0, 0.0, 0.3, Outcome::Hit),
            tested(20.0, 0.0, 0.3, Outcome::Undefined),
        ];
        let err = calculate_skill(&predictions, &small_options()).unwrap_err();
        assert!(matches!(err, SkillError::Precondition(_)));
    }

    #[test]
    fn missing_probability_fails_fast() {
        let bare = Prediction::new(0.0, 1.0, 0.0, 0.0, 1.0, 5.0)
            .unwrap()
            .with_outcome(Outcome::Miss);
        let err = calculate_skill(&[bare], &small_options()).unwrap_err();
        assert!(matches!(err, SkillError::Precondition(_)));
    }

    #[test]
    fn empty_input_fails_fast() {
        let err = calculate_skill(&[], &small_options()).unwrap_err();
        assert!(matches!(err, SkillError::Precondition(_)));
    }

    #[test]
    fn zero_options_are_rejected() {
        let predictions = vec![tested(0.0, 0.0, 0.3, Outcome::Hit)];
        let mut options = small_options();
        options.resample_count = 0;
        assert!(matches!(
            calculate_skill(&predictions, &options),
            Err(SkillError::InvalidInput(_))
        ));
        options.resample_count = 1;
        options.monte_carlo_draws = 0;
        assert!(matches!(
            calculate_skill(&predictions, &options),
            Err(SkillError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_probability_resample_is_degenerate() {
        let predictions = vec![
            tested(0.0, 0.0, 0.0, Outcome::Miss),
            tested(40.0, 40.0, 0.0, Outcome::Hit),
        ];
        let err = calculate_skill(&predictions, &small_options()).unwrap_err();
        assert!(matches!(err, SkillError::DegenerateInput { .. }));

        let mut rng = StdRng::seed_from_u64(0);
        let direct = evaluate_sample(4, &[0, 1], &predictions, &[0.0, 0.0], 10, &mut rng);
        assert!(matches!(direct, Err(SkillError::DegenerateInput { sample: 4, .. })));
    }

    #[test]
    fn p_value_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        // certain successes always reach the observed count
        assert_eq!(monte_carlo_p_value(&[1.0, 1.0], 2, 100, &mut rng), 1.0);
        // impossible successes never reach one hit
        assert_eq!(monte_carlo_p_value(&[0.0, 0.0], 1, 100, &mut rng), 0.0);
        // zero observed hits is always matched
        assert_eq!(monte_carlo_p_value(&[0.3], 0, 100, &mut rng), 1.0);
    }

    #[test]
    fn p_value_tracks_binomial_tail() {
        let mut rng = StdRng::seed_from_u64(5);
        // P(X >= 1) for one trial with p = 0.25
        let p = monte_carlo_p_value(&[0.25], 1, 20_000, &mut rng);
        assert!((p - 0.25).abs() < 0.02, "got {}", p);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(1.51515, 3), 1.515);
        assert_eq!(round_to(0.3300000001, 3), 0.33);
        assert_eq!(round_to(97.25, 1), 97.3);
    }
}
