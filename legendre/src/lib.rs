use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LegendreErrors {
    #[error("degree {degree} exceeds the maximum degree {max}")]
    DegreeOutOfRange { degree: usize, max: usize },
}

/// Returns `[P_0(x), ..., P_n(x)]` by Bonnet's recurrence.
pub fn legendre_polynomials(n: usize, x: f64) -> Vec<f64> {
    let mut legendre = Legendre::new(n);
    legendre.calculate(x);
    legendre.p
}

/// Calculates Legendre polynomials up to a fixed degree, reusing its buffers
/// between evaluations.
#[derive(Debug, Clone)]
pub struct Legendre {
    pub p: Vec<f64>,
    pub dp: Option<Vec<f64>>,
    degree: usize,
}

impl Default for Legendre {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Legendre {
    pub fn new(degree: usize) -> Self {
        let mut p = vec![0.0; degree + 1];
        p[0] = 1.0;
        Self {
            p,
            dp: None,
            degree,
        }
    }

    /// just preallocates at construction
    pub fn with_derivatives(mut self) -> Self {
        self.dp = Some(vec![0.0; self.degree + 1]);
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn calculate(&mut self, x: f64) {
        let p = &mut self.p;
        p[0] = 1.0;
        if self.degree >= 1 {
            p[1] = x;
        }
        for n in 2..=self.degree {
            let nf = n as f64;
            p[n] = ((2.0 * nf - 1.0) * x * p[n - 1] - (nf - 1.0) * p[n - 2]) / nf;
        }

        // P'_n = P'_{n-2} + (2n - 1) P_{n-1}, exact at the endpoints too
        if let Some(dp) = &mut self.dp {
            dp[0] = 0.0;
            if self.degree >= 1 {
                dp[1] = 1.0;
            }
            for n in 2..=self.degree {
                dp[n] = dp[n - 2] + (2.0 * n as f64 - 1.0) * p[n - 1];
            }
        }
    }

    /// `P_n` from the last call to [`Legendre::calculate`].
    pub fn value(&self, n: usize) -> Result<f64, LegendreErrors> {
        self.p
            .get(n)
            .copied()
            .ok_or(LegendreErrors::DegreeOutOfRange {
                degree: n,
                max: self.degree,
            })
    }

    /// `P'_n`, or `None` when derivatives were not requested.
    pub fn derivative(&self, n: usize) -> Result<Option<f64>, LegendreErrors> {
        if n > self.degree {
            return Err(LegendreErrors::DegreeOutOfRange {
                degree: n,
                max: self.degree,
            });
        }
        Ok(self.dp.as_ref().map(|dp| dp[n]))
    }
}
