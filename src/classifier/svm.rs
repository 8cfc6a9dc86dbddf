// Kernel classifier — an RBF-kernel support vector machine trained with
// simplified SMO, with Platt-scaled probability output.
//
// The training sets this runs on are tiny (tens of samples), so the
// implementation favors clarity and determinism over throughput: the kernel
// matrix is materialized, the SMO working-pair partner is drawn from a seeded
// RNG, and the sigmoid fit is the standard Newton iteration with backtracking.

use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-feature standardization fitted on the training split.
///
/// The raw stylometric features live on wildly different scales (character
/// counts vs. densities in [0,1]); an RBF kernel over unscaled inputs would
/// be dominated by the count features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl Scaler {
    pub fn fit(samples: &[Vec<f64>]) -> Self {
        let n = samples.len().max(1) as f64;
        let dims = samples.first().map(Vec::len).unwrap_or(0);

        let mut means = vec![0.0; dims];
        for sample in samples {
            for (m, v) in means.iter_mut().zip(sample) {
                *m += v / n;
            }
        }

        let mut stds = vec![0.0; dims];
        for sample in samples {
            for (s, (v, m)) in stds.iter_mut().zip(sample.iter().zip(&means)) {
                *s += (v - m) * (v - m) / n;
            }
        }
        for s in &mut stds {
            *s = s.sqrt();
            // Constant features pass through unscaled
            if *s < 1e-12 {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.means.iter().zip(&self.stds))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

/// SMO training knobs. The defaults match the fixed design constants used
/// for the bootstrap model.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub c: f64,
    pub tolerance: f64,
    pub max_passes: usize,
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-3,
            max_passes: 5,
            seed: 42,
        }
    }
}

/// A trained RBF-kernel SVM with Platt-scaled probabilities.
///
/// Immutable once trained; the model store owns the only copy between
/// training runs. Fully serializable so the artifact round-trips losslessly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelClassifier {
    scaler: Scaler,
    /// Support vectors in standardized feature space
    support_vectors: Vec<Vec<f64>>,
    /// alpha_i * y_i for each support vector
    coefficients: Vec<f64>,
    bias: f64,
    gamma: f64,
    /// Platt sigmoid: P(class 1 | f) = 1 / (1 + exp(a*f + b))
    sigmoid_a: f64,
    sigmoid_b: f64,
}

fn rbf(a: &[f64], b: &[f64], gamma: f64) -> f64 {
    let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (-gamma * dist).exp()
}

impl KernelClassifier {
    /// Train on labeled feature vectors. `true` labels the "plagiarized"
    /// class. Deterministic for a fixed `config.seed`.
    pub fn train(samples: &[Vec<f64>], labels: &[bool], config: &TrainConfig) -> Result<Self> {
        ensure!(
            samples.len() == labels.len(),
            "sample/label length mismatch: {} vs {}",
            samples.len(),
            labels.len()
        );
        ensure!(samples.len() >= 2, "need at least two training samples");
        let dims = samples[0].len();
        ensure!(dims > 0, "empty feature vectors");
        ensure!(
            samples.iter().all(|s| s.iter().all(|v| v.is_finite())),
            "non-finite value in training features"
        );

        let scaler = Scaler::fit(samples);
        let standardized: Vec<Vec<f64>> =
            samples.iter().map(|s| scaler.transform(s)).collect();
        let gamma = 1.0 / dims as f64;

        let y: Vec<f64> = labels.iter().map(|l| if *l { 1.0 } else { -1.0 }).collect();
        let (alphas, bias) = smo(&standardized, &y, gamma, config);

        // Keep only the support vectors
        let mut support_vectors = Vec::new();
        let mut coefficients = Vec::new();
        for (i, alpha) in alphas.iter().enumerate() {
            if *alpha > 1e-8 {
                support_vectors.push(standardized[i].clone());
                coefficients.push(alpha * y[i]);
            }
        }
        debug!(
            support_vectors = support_vectors.len(),
            total = samples.len(),
            "SMO converged"
        );

        let mut model = Self {
            scaler,
            support_vectors,
            coefficients,
            bias,
            gamma,
            sigmoid_a: 0.0,
            sigmoid_b: 0.0,
        };

        // Calibrate the sigmoid on the training decision values
        let decisions: Vec<f64> = standardized
            .iter()
            .map(|x| model.decision_standardized(x))
            .collect();
        let (a, b) = fit_sigmoid(&decisions, labels);
        model.sigmoid_a = a;
        model.sigmoid_b = b;

        Ok(model)
    }

    fn decision_standardized(&self, x: &[f64]) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.coefficients)
            .map(|(sv, coef)| coef * rbf(sv, x, self.gamma))
            .sum::<f64>()
            + self.bias
    }

    /// Raw decision value; positive means the "plagiarized" side of the
    /// boundary. Non-finite inputs yield 0.0.
    pub fn decision(&self, features: &[f64]) -> f64 {
        if features.len() != self.scaler.means.len()
            || features.iter().any(|v| !v.is_finite())
        {
            return 0.0;
        }
        self.decision_standardized(&self.scaler.transform(features))
    }

    /// Calibrated probability of the "plagiarized" class, in [0, 1].
    ///
    /// A malformed feature vector (wrong length, NaN/Inf) is a degraded but
    /// non-fatal condition and yields 0.0 rather than an error.
    pub fn predict_probability(&self, features: &[f64]) -> f64 {
        if features.len() != self.scaler.means.len()
            || features.iter().any(|v| !v.is_finite())
        {
            return 0.0;
        }
        let f = self.decision_standardized(&self.scaler.transform(features));
        let z = (self.sigmoid_a * f + self.sigmoid_b).clamp(-500.0, 500.0);
        (1.0 / (1.0 + z.exp())).clamp(0.0, 1.0)
    }

    /// Hard class prediction, used for the holdout accuracy check.
    pub fn predict(&self, features: &[f64]) -> bool {
        self.decision(features) >= 0.0
    }
}

/// Simplified SMO: iterate over multipliers, pick the partner from a seeded
/// RNG, and update pairs until no multiplier moves for `max_passes` sweeps.
/// A hard iteration cap guarantees termination.
fn smo(x: &[Vec<f64>], y: &[f64], gamma: f64, config: &TrainConfig) -> (Vec<f64>, f64) {
    let m = x.len();
    let kernel: Vec<Vec<f64>> = (0..m)
        .map(|i| (0..m).map(|j| rbf(&x[i], &x[j], gamma)).collect())
        .collect();

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut alpha = vec![0.0f64; m];
    let mut b = 0.0f64;

    let decision = |alpha: &[f64], b: f64, i: usize| -> f64 {
        (0..m).map(|j| alpha[j] * y[j] * kernel[j][i]).sum::<f64>() + b
    };

    let c = config.c;
    let tol = config.tolerance;
    let mut passes = 0;
    let mut iterations = 0;
    while passes < config.max_passes && iterations < 1000 {
        iterations += 1;
        let mut changed = 0;

        for i in 0..m {
            let e_i = decision(&alpha, b, i) - y[i];
            let violates = (y[i] * e_i < -tol && alpha[i] < c)
                || (y[i] * e_i > tol && alpha[i] > 0.0);
            if !violates {
                continue;
            }

            let mut j = rng.random_range(0..m - 1);
            if j >= i {
                j += 1;
            }
            let e_j = decision(&alpha, b, j) - y[j];

            let (ai_old, aj_old) = (alpha[i], alpha[j]);
            let (lo, hi) = if y[i] * y[j] < 0.0 {
                ((aj_old - ai_old).max(0.0), (c + aj_old - ai_old).min(c))
            } else {
                ((ai_old + aj_old - c).max(0.0), (ai_old + aj_old).min(c))
            };
            if hi - lo < 1e-12 {
                continue;
            }

            let eta = 2.0 * kernel[i][j] - kernel[i][i] - kernel[j][j];
            if eta >= 0.0 {
                continue;
            }

            let aj = (aj_old - y[j] * (e_i - e_j) / eta).clamp(lo, hi);
            if (aj - aj_old).abs() < 1e-5 {
                continue;
            }
            let ai = ai_old + y[i] * y[j] * (aj_old - aj);
            alpha[i] = ai;
            alpha[j] = aj;

            let b1 = b - e_i
                - y[i] * (ai - ai_old) * kernel[i][i]
                - y[j] * (aj - aj_old) * kernel[i][j];
            let b2 = b - e_j
                - y[i] * (ai - ai_old) * kernel[i][j]
                - y[j] * (aj - aj_old) * kernel[j][j];
            b = if ai > 0.0 && ai < c {
                b1
            } else if aj > 0.0 && aj < c {
                b2
            } else {
                (b1 + b2) / 2.0
            };
            changed += 1;
        }

        if changed == 0 {
            passes += 1;
        } else {
            passes = 0;
        }
    }

    (alpha, b)
}

/// Fit Platt's sigmoid P(y=1|f) = 1/(1+exp(a*f + b)) on decision values.
///
/// Newton iteration with backtracking line search; targets are the usual
/// smoothed frequencies so the fit stays sane on tiny datasets.
fn fit_sigmoid(decisions: &[f64], labels: &[bool]) -> (f64, f64) {
    let prior1 = labels.iter().filter(|l| **l).count() as f64;
    let prior0 = labels.len() as f64 - prior1;
    let hi_target = (prior1 + 1.0) / (prior1 + 2.0);
    let lo_target = 1.0 / (prior0 + 2.0);
    let targets: Vec<f64> = labels
        .iter()
        .map(|l| if *l { hi_target } else { lo_target })
        .collect();

    let nll = |a: f64, b: f64| -> f64 {
        decisions
            .iter()
            .zip(&targets)
            .map(|(f, t)| {
                let z = a * f + b;
                if z >= 0.0 {
                    t * z + (1.0 + (-z).exp()).ln()
                } else {
                    (t - 1.0) * z + (1.0 + z.exp()).ln()
                }
            })
            .sum()
    };

    let mut a = 0.0;
    let mut b = ((prior0 + 1.0) / (prior1 + 1.0)).ln();
    let mut best = nll(a, b);
    let sigma = 1e-12;

    for _ in 0..100 {
        let (mut h11, mut h22, mut h21) = (sigma, sigma, 0.0);
        let (mut g1, mut g2) = (0.0, 0.0);
        for (f, t) in decisions.iter().zip(&targets) {
            let z = a * f + b;
            let (p, q) = if z >= 0.0 {
                let e = (-z).exp();
                (e / (1.0 + e), 1.0 / (1.0 + e))
            } else {
                let e = z.exp();
                (1.0 / (1.0 + e), e / (1.0 + e))
            };
            let d1 = t - p;
            let d2 = p * q;
            g1 += f * d1;
            g2 += d1;
            h11 += f * f * d2;
            h22 += d2;
            h21 += f * d2;
        }
        if g1.abs() < 1e-5 && g2.abs() < 1e-5 {
            break;
        }

        let det = h11 * h22 - h21 * h21;
        let da = -(h22 * g1 - h21 * g2) / det;
        let db = -(-h21 * g1 + h11 * g2) / det;
        let descent = g1 * da + g2 * db;

        let mut step = 1.0;
        let mut improved = false;
        while step >= 1e-10 {
            let (na, nb) = (a + step * da, b + step * db);
            let value = nll(na, nb);
            if value < best + 1e-4 * step * descent {
                a = na;
                b = nb;
                best = value;
                improved = true;
                break;
            }
            step /= 2.0;
        }
        if !improved {
            break;
        }
    }

    (a, b)
}
