use anyhow::{Result, bail};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Ordinary least squares
// ---------------------------------------------------------------------------

/// Straight-line fit `y = slope * x + intercept` with its Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient, clamped to [-1, 1].
    pub r_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// Number of points in the fit.
    pub n: usize,
}

impl LinearFit {
    /// Fit paired samples. Needs at least two points and some spread in `x`.
    /// A constant `y` gives a flat line with `r_value == 0`.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            bail!("x has {} values but y has {}", x.len(), y.len());
        }
        let n = x.len();
        if n < 2 {
            bail!("need at least two points for a linear regression, got {n}");
        }

        let nf = n as f64;
        let x_mean = x.iter().sum::<f64>() / nf;
        let y_mean = y.iter().sum::<f64>() / nf;

        // Biased (1/n) second moments
        let (mut ssxm, mut ssym, mut ssxym) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - x_mean;
            let dy = yi - y_mean;
            ssxm += dx * dx;
            ssym += dy * dy;
            ssxym += dx * dy;
        }
        ssxm /= nf;
        ssym /= nf;
        ssxym /= nf;

        if ssxm == 0.0 {
            bail!("cannot fit a line when all x values are identical");
        }

        let r_value = if ssym == 0.0 {
            0.0
        } else {
            (ssxym / (ssxm * ssym).sqrt()).clamp(-1.0, 1.0)
        };
        let slope = ssxym / ssxm;
        let intercept = y_mean - slope * x_mean;

        let std_err = if n > 2 {
            let df = (n - 2) as f64;
            ((1.0 - r_value * r_value).max(0.0) * ssym / ssxm / df).sqrt()
        } else {
            0.0
        };

        Ok(LinearFit {
            slope,
            intercept,
            r_value,
            std_err,
            n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}
