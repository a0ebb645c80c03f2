//! Normality tests - Shapiro-Wilk and a two-sample Kolmogorov-Smirnov check
//!
//! Test A is a Shapiro-Wilk goodness-of-fit test on the observed values.
//! Test B draws a synthetic sample from Normal(mean, sd) of the same size and
//! runs a two-sample Kolmogorov-Smirnov test against it. Test B depends on the
//! random source passed in, so it is only reproducible with a seeded RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::stats;

/// Which normality test produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalityTest {
    ShapiroWilk,
    KolmogorovSmirnov,
}

impl std::fmt::Display for NormalityTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalityTest::ShapiroWilk => write!(f, "Shapiro-Wilk"),
            NormalityTest::KolmogorovSmirnov => write!(f, "Kolmogorov-Smirnov"),
        }
    }
}

/// Interpretation of a p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalityVerdict {
    /// p >= alpha: fail to reject normality
    AppearsNormal,
    /// p < alpha: reject normality
    NotNormal,
    /// The test could not be computed
    Inconclusive,
}

impl NormalityVerdict {
    /// Map a p-value to a verdict at significance level `alpha`
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value.is_nan() {
            NormalityVerdict::Inconclusive
        } else if p_value < alpha {
            NormalityVerdict::NotNormal
        } else {
            NormalityVerdict::AppearsNormal
        }
    }
}

impl std::fmt::Display for NormalityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalityVerdict::AppearsNormal => write!(f, "appears normal"),
            NormalityVerdict::NotNormal => write!(f, "NOT normal"),
            NormalityVerdict::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

/// Outcome of one normality test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub test: NormalityTest,

    /// W for Shapiro-Wilk, D for Kolmogorov-Smirnov; `NaN` when undefined
    pub statistic: f64,

    /// `NaN` when undefined
    pub p_value: f64,

    pub verdict: NormalityVerdict,
}

impl NormalityResult {
    fn new(test: NormalityTest, outcome: Option<(f64, f64)>, alpha: f64) -> Self {
        let (statistic, p_value) = outcome.unwrap_or((f64::NAN, f64::NAN));
        Self {
            test,
            statistic,
            p_value,
            verdict: NormalityVerdict::from_p_value(p_value, alpha),
        }
    }

    /// True when the test could be computed
    pub fn is_defined(&self) -> bool {
        !self.p_value.is_nan()
    }
}

/// Run both normality tests on the non-missing values
///
/// Returns (Shapiro-Wilk, Kolmogorov-Smirnov). The synthetic sample for the
/// second test uses the sample mean and sample standard deviation of
/// `values` and is drawn from `rng`.
pub fn test_normality<R: Rng + ?Sized>(
    values: &[f64],
    rng: &mut R,
    alpha: f64,
) -> (NormalityResult, NormalityResult) {
    let shapiro = shapiro_wilk(values);
    if shapiro.is_none() {
        tracing::warn!(n = values.len(), "Shapiro-Wilk test undefined for this sample");
    }

    let mean = stats::mean(values);
    let sd = stats::sample_std_dev(values);
    let ks = if mean.is_finite() && sd.is_finite() {
        let synthetic = normal_sample(rng, values.len(), mean, sd);
        ks_two_sample(values, &synthetic)
    } else {
        tracing::warn!(n = values.len(), "Kolmogorov-Smirnov test undefined for this sample");
        None
    };

    (
        NormalityResult::new(NormalityTest::ShapiroWilk, shapiro, alpha),
        NormalityResult::new(NormalityTest::KolmogorovSmirnov, ks, alpha),
    )
}

/// Draw `n` values from Normal(mean, sd) using the Box-Muller transform
pub fn normal_sample<R: Rng + ?Sized>(rng: &mut R, n: usize, mean: f64, sd: f64) -> Vec<f64> {
    (0..n)
        .map(|_| {
            // 1 - u keeps the logarithm argument in (0, 1]
            let u1: f64 = 1.0 - rng.random::<f64>();
            let u2: f64 = rng.random();
            let z = (-2.0_f64 * u1.ln()).sqrt() * (2.0_f64 * PI * u2).cos();
            mean + sd * z
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Shapiro-Wilk
// ---------------------------------------------------------------------------

/// Shapiro-Wilk test: returns (W, p-value)
///
/// Royston (1992, 1995) approximation, AS R94. Supports 3 ≤ n ≤ 5000.
/// `None` outside that range, for non-finite input, or when every value is
/// identical.
pub fn shapiro_wilk(data: &[f64]) -> Option<(f64, f64)> {
    let n = data.len();
    if !(3..=5000).contains(&n) || data.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let x = stats::sorted(data);
    if x[n - 1] - x[0] < 1e-300 {
        return None;
    }

    if n == 3 {
        return shapiro_wilk_n3(&x);
    }

    let nn2 = n / 2;
    let a = sw_coefficients(n, nn2)?;

    let mut sa = 0.0;
    for i in 0..nn2 {
        sa += a[i] * (x[n - 1 - i] - x[i]);
    }
    let mean = stats::mean(&x);
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return None;
    }

    let w = (sa * sa) / ss;
    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return None;
    }
    let w = w.min(1.0);

    Some((w, sw_p_value(w, n).clamp(0.0, 1.0)))
}

// n = 3 has an exact distribution
fn shapiro_wilk_n3(x: &[f64]) -> Option<(f64, f64)> {
    let a1 = std::f64::consts::FRAC_1_SQRT_2;
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return None;
    }
    let numerator = a1 * (x[2] - x[0]);
    let w = ((numerator * numerator) / ss).clamp(0.75, 1.0);
    let p = 1.0 - (6.0 / PI) * w.sqrt().acos();
    Some((w, p.clamp(0.0, 1.0)))
}

// Royston polynomial coefficients (AS R94)
const SW_C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const SW_C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const SW_C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const SW_C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const SW_C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const SW_C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const SW_G: [f64; 2] = [-2.273, 0.459];

// c[0] + c[1]*x + c[2]*x^2 + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

fn sw_coefficients(n: usize, nn2: usize) -> Option<Vec<f64>> {
    // Blom approximation of expected normal order statistics (lower half)
    let m: Vec<f64> = (0..nn2)
        .map(|i| stats::inverse_normal_cdf((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let mut a = vec![0.0; nn2];
    a[0] = poly(&SW_C1, rsn) - m[0] / ssumm2;

    let (corrected, fac_sq, one_minus) = if n <= 5 {
        (
            1,
            summ2 - 2.0 * m[0] * m[0],
            1.0 - 2.0 * a[0] * a[0],
        )
    } else {
        a[1] = -m[1] / ssumm2 + poly(&SW_C2, rsn);
        (
            2,
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a[0] * a[0] - 2.0 * a[1] * a[1],
        )
    };
    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return None;
    }
    let fac = (fac_sq / one_minus).sqrt();
    for i in corrected..nn2 {
        a[i] = -m[i] / fac;
    }

    Some(a)
}

fn sw_p_value(w: f64, n: usize) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    if n <= 11 {
        let gamma = poly(&SW_G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let m = poly(&SW_C3, nf);
        let s = poly(&SW_C4, nf).exp();
        1.0 - stats::normal_cdf((y2 - m) / s)
    } else {
        let ln_n = nf.ln();
        let m = poly(&SW_C5, ln_n);
        let s = poly(&SW_C6, ln_n).exp();
        1.0 - stats::normal_cdf((y - m) / s)
    }
}

// ---------------------------------------------------------------------------
// Two-sample Kolmogorov-Smirnov
// ---------------------------------------------------------------------------

/// Two-sample Kolmogorov-Smirnov test: returns (D, p-value)
///
/// D is the largest vertical distance between the two empirical CDFs. The
/// p-value uses the asymptotic Kolmogorov distribution with Stephens'
/// small-sample correction. `None` if either sample is empty or contains
/// non-finite values.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return None;
    }

    let a = stats::sorted(a);
    let b = stats::sorted(b);
    let (n, m) = (a.len(), b.len());
    let (nf, mf) = (n as f64, m as f64);

    let (mut i, mut j) = (0, 0);
    let mut d = 0.0_f64;
    while i < n && j < m {
        let x = a[i].min(b[j]);
        while i < n && a[i] <= x {
            i += 1;
        }
        while j < m && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / nf - j as f64 / mf).abs());
    }

    let en = (nf * mf / (nf + mf)).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * d;
    Some((d, kolmogorov_survival(lambda)))
}

/// P(K > z) for the Kolmogorov distribution
fn kolmogorov_survival(z: f64) -> f64 {
    if z < 0.042 {
        return 1.0;
    }
    let q = if z < 1.18 {
        // Small z: series in exp(-π²/(8z²))
        let y = (-PI * PI / (8.0 * z * z)).exp();
        let cdf = (2.0 * PI).sqrt() / z * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * z * z).exp();
        2.0 * (x - x.powi(4) + x.powi(9))
    };
    q.clamp(0.0, 1.0)
}
