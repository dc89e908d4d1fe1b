use num_rational::BigRational;
use thiserror::Error;

use crate::coefficient::Coefficient;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableauError {
    #[error("{field} has length {found} but the tableau has {expected} stages")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("stage matrix entry ({row}, {column}) is on or above the diagonal but is nonzero")]
    NotStrictlyLowerTriangular { row: usize, column: usize },
    #[error("the first abscissa must be zero")]
    NonZeroFirstAbscissa,
    #[error("row {row} of the stage matrix does not sum to its abscissa")]
    RowSumMismatch { row: usize },
    #[error("embedded weights have length {found} but the tableau has {expected} stages")]
    ErrorWeightsMismatch { expected: usize, found: usize },
    #[error("'{0}' is not a valid decimal coefficient")]
    InvalidLiteral(String),
}

/// How the stages of a tableau depend on each other.
#[derive(Debug, Clone, PartialEq)]
pub enum Coupling<T> {
    /// Every stage may read every earlier stage.
    General,
    /// Stage inputs follow a two-register recurrence and the stage history
    /// is never kept.
    LowStorage(LowStorage<T>),
}

/// The two published two-register families.
#[derive(Debug, Clone, PartialEq)]
pub enum LowStorage<T> {
    /// 2N storage (Williamson). With `q_{-1} = 0` and `u_{-1} = x`,
    /// stage `i` is evaluated at `u_{i-1}` and then
    /// `q_i = a_i q_{i-1} + dt k_i`, `u_i = u_{i-1} + b_i q_i`.
    Williamson { a: Vec<T>, b: Vec<T> },
    /// 2R storage (van der Houwen). Row `i` of the stage matrix repeats the
    /// weights `b[j]` for `j < i - 1` and holds `subdiagonal[i]` at `i - 1`.
    VanDerHouwen { subdiagonal: Vec<T> },
}

impl<T> Coupling<T> {
    fn map<U>(&self, f: &impl Fn(&T) -> U) -> Coupling<U> {
        match self {
            Coupling::General => Coupling::General,
            Coupling::LowStorage(LowStorage::Williamson { a, b }) => {
                Coupling::LowStorage(LowStorage::Williamson {
                    a: a.iter().map(f).collect(),
                    b: b.iter().map(f).collect(),
                })
            }
            Coupling::LowStorage(LowStorage::VanDerHouwen { subdiagonal }) => {
                Coupling::LowStorage(LowStorage::VanDerHouwen {
                    subdiagonal: subdiagonal.iter().map(f).collect(),
                })
            }
        }
    }
}

/// An explicit Runge-Kutta method.
///
/// `a` is strictly lower triangular, `c[i]` is the sum of row `i`, `b_high`
/// advances the state and `d = b_high - b_low` estimates the local error.
/// Without embedded weights `b_low` is empty and `d` is all zero. Low-storage
/// tableaus also carry their full stage matrix, derived when they are built.
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau<T> {
    c: Vec<T>,
    a: Vec<Vec<T>>,
    b_high: Vec<T>,
    b_low: Vec<T>,
    d: Vec<T>,
    coupling: Coupling<T>,
    order: u32,
}

impl<T> Default for ButcherTableau<T> {
    fn default() -> Self {
        Self {
            c: Vec::new(),
            a: Vec::new(),
            b_high: Vec::new(),
            b_low: Vec::new(),
            d: Vec::new(),
            coupling: Coupling::General,
            order: 0,
        }
    }
}

impl<T> ButcherTableau<T> {
    /// A tableau with no stages. Stepping with it returns the state unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> usize {
        self.b_high.len()
    }

    pub fn c(&self) -> &[T] {
        &self.c
    }

    pub fn a(&self) -> &[Vec<T>] {
        &self.a
    }

    pub fn b_high(&self) -> &[T] {
        &self.b_high
    }

    pub fn b_low(&self) -> &[T] {
        &self.b_low
    }

    /// `d = b_high - b_low`.
    pub fn error_weights(&self) -> &[T] {
        &self.d
    }

    pub fn coupling(&self) -> &Coupling<T> {
        &self.coupling
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    pub fn is_supported(&self) -> bool {
        self.stages() > 0
    }

    pub fn is_low_storage(&self) -> bool {
        matches!(self.coupling, Coupling::LowStorage(_))
    }

    /// Converts every coefficient, keeping the structure.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> ButcherTableau<U> {
        ButcherTableau {
            c: self.c.iter().map(&f).collect(),
            a: self
                .a
                .iter()
                .map(|row| row.iter().map(&f).collect())
                .collect(),
            b_high: self.b_high.iter().map(&f).collect(),
            b_low: self.b_low.iter().map(&f).collect(),
            d: self.d.iter().map(&f).collect(),
            coupling: self.coupling.map(&f),
            order: self.order,
        }
    }
}

impl<T: Coefficient> ButcherTableau<T> {
    /// Builds a general tableau from its abscissae, stage matrix and weights.
    /// Pass an empty `b_low` when the method has no embedded pair.
    pub fn general(
        c: Vec<T>,
        a: Vec<Vec<T>>,
        b_high: Vec<T>,
        b_low: Vec<T>,
        order: u32,
    ) -> Result<Self, TableauError> {
        Self::assemble(c, a, b_high, b_low, Coupling::General, order)
    }

    /// Builds a 2N-storage tableau from its register coefficients and derives
    /// the equivalent stage matrix, weights and abscissae.
    pub fn williamson(a: Vec<T>, b: Vec<T>, order: u32) -> Result<Self, TableauError> {
        let stages = b.len();
        check_length("low-storage a", stages, a.len())?;

        // k_j reaches register u_l with weight b_l * a_{j+1} * ... * a_l
        let mut matrix = vec![vec![T::zero(); stages]; stages];
        let mut weights = vec![T::zero(); stages];
        for j in 0..stages {
            let mut product = T::one();
            let mut sum = T::zero();
            for l in j..stages {
                if l > j {
                    product = product * a[l].clone();
                }
                sum = sum + b[l].clone() * product.clone();
                if l + 1 < stages {
                    matrix[l + 1][j] = sum.clone();
                }
            }
            weights[j] = sum;
        }
        let c = row_sums(&matrix);

        Self::assemble(
            c,
            matrix,
            weights,
            Vec::new(),
            Coupling::LowStorage(LowStorage::Williamson { a, b }),
            order,
        )
    }

    /// Builds a 2R-storage tableau. `subdiagonal[0]` is unused.
    pub fn van_der_houwen(
        subdiagonal: Vec<T>,
        b_high: Vec<T>,
        b_low: Vec<T>,
        order: u32,
    ) -> Result<Self, TableauError> {
        let stages = b_high.len();
        check_length("subdiagonal", stages, subdiagonal.len())?;

        let mut matrix = vec![vec![T::zero(); stages]; stages];
        for i in 1..stages {
            for j in 0..i - 1 {
                matrix[i][j] = b_high[j].clone();
            }
            matrix[i][i - 1] = subdiagonal[i].clone();
        }
        let c = row_sums(&matrix);

        Self::assemble(
            c,
            matrix,
            b_high,
            b_low,
            Coupling::LowStorage(LowStorage::VanDerHouwen { subdiagonal }),
            order,
        )
    }

    fn assemble(
        c: Vec<T>,
        a: Vec<Vec<T>>,
        b_high: Vec<T>,
        b_low: Vec<T>,
        coupling: Coupling<T>,
        order: u32,
    ) -> Result<Self, TableauError> {
        let stages = b_high.len();
        let d = if b_low.is_empty() {
            vec![T::zero(); stages]
        } else if b_low.len() != stages {
            return Err(TableauError::ErrorWeightsMismatch {
                expected: stages,
                found: b_low.len(),
            });
        } else {
            b_high
                .iter()
                .zip(&b_low)
                .map(|(high, low)| high.clone() - low.clone())
                .collect()
        };

        let tableau = Self {
            c,
            a,
            b_high,
            b_low,
            d,
            coupling,
            order,
        };
        tableau.validate()?;
        Ok(tableau)
    }

    /// Checks the structural invariants. Row sums are compared with
    /// [`Coefficient::matches`], which is exact equality for rationals.
    pub fn validate(&self) -> Result<(), TableauError> {
        let stages = self.stages();
        check_length("c", stages, self.c.len())?;
        check_length("a", stages, self.a.len())?;
        check_length("d", stages, self.d.len())?;
        for row in &self.a {
            check_length("stage matrix row", stages, row.len())?;
        }

        for (i, row) in self.a.iter().enumerate() {
            for (j, value) in row.iter().enumerate().skip(i) {
                if !value.is_zero() {
                    return Err(TableauError::NotStrictlyLowerTriangular { row: i, column: j });
                }
            }
        }

        if let Some(first) = self.c.first() {
            if !first.is_zero() {
                return Err(TableauError::NonZeroFirstAbscissa);
            }
        }

        for (i, (row, c)) in self.a.iter().zip(&self.c).enumerate() {
            let sum = row.iter().fold(T::zero(), |acc, value| acc + value.clone());
            if !sum.matches(c) {
                return Err(TableauError::RowSumMismatch { row: i });
            }
        }

        match &self.coupling {
            Coupling::General => {}
            Coupling::LowStorage(LowStorage::Williamson { a, b }) => {
                check_length("low-storage a", stages, a.len())?;
                check_length("low-storage b", stages, b.len())?;
            }
            Coupling::LowStorage(LowStorage::VanDerHouwen { subdiagonal }) => {
                check_length("subdiagonal", stages, subdiagonal.len())?;
            }
        }
        Ok(())
    }

    /// True when the tableau carries a nonzero error estimate.
    pub fn is_embedded(&self) -> bool {
        self.d.iter().any(|value| !value.is_zero())
    }
}

fn check_length(field: &'static str, expected: usize, found: usize) -> Result<(), TableauError> {
    if expected == found {
        Ok(())
    } else {
        Err(TableauError::LengthMismatch {
            field,
            expected,
            found,
        })
    }
}

fn row_sums<T: Coefficient>(matrix: &[Vec<T>]) -> Vec<T> {
    matrix
        .iter()
        .map(|row| row.iter().fold(T::zero(), |acc, value| acc + value.clone()))
        .collect()
}

/// A tableau in both of its numeric forms, built once per selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DualTableau {
    exact: ButcherTableau<BigRational>,
    fast: ButcherTableau<f64>,
}

impl DualTableau {
    /// Rounds every exact coefficient to `f64` exactly once.
    pub fn new(exact: ButcherTableau<BigRational>) -> Self {
        let fast = exact.map(f64::from_exact);
        Self { exact, fast }
    }

    pub fn exact(&self) -> &ButcherTableau<BigRational> {
        &self.exact
    }

    pub fn fast(&self) -> &ButcherTableau<f64> {
        &self.fast
    }

    pub fn stages(&self) -> usize {
        self.exact.stages()
    }

    pub fn is_supported(&self) -> bool {
        self.exact.is_supported()
    }
}

impl From<ButcherTableau<BigRational>> for DualTableau {
    fn from(exact: ButcherTableau<BigRational>) -> Self {
        Self::new(exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficient::ratio;

    fn heun() -> ButcherTableau<BigRational> {
        ButcherTableau::general(
            vec![ratio(0, 1), ratio(1, 1)],
            vec![vec![ratio(0, 1), ratio(0, 1)], vec![ratio(1, 1), ratio(0, 1)]],
            vec![ratio(1, 2), ratio(1, 2)],
            vec![ratio(1, 1), ratio(0, 1)],
            2,
        )
        .unwrap()
    }

    #[test]
    fn error_weights_are_the_weight_difference() {
        let tableau = heun();
        assert!(tableau.is_embedded());
        assert!(!tableau.is_low_storage());
        assert_eq!(tableau.error_weights(), &[ratio(-1, 2), ratio(1, 2)]);
    }

    #[test]
    fn missing_low_weights_mean_no_error_estimate() {
        let tableau = ButcherTableau::general(
            vec![ratio(0, 1), ratio(1, 2)],
            vec![vec![ratio(0, 1), ratio(0, 1)], vec![ratio(1, 2), ratio(0, 1)]],
            vec![ratio(0, 1), ratio(1, 1)],
            Vec::new(),
            2,
        )
        .unwrap();
        assert!(!tableau.is_embedded());
        assert_eq!(tableau.error_weights(), &[ratio(0, 1), ratio(0, 1)]);
    }

    #[test]
    fn row_sum_is_checked_exactly() {
        let result = ButcherTableau::general(
            vec![ratio(0, 1), ratio(1, 2)],
            vec![vec![ratio(0, 1), ratio(0, 1)], vec![ratio(1, 3), ratio(0, 1)]],
            vec![ratio(0, 1), ratio(1, 1)],
            Vec::new(),
            2,
        );
        assert_eq!(result, Err(TableauError::RowSumMismatch { row: 1 }));
    }

    #[test]
    fn upper_entries_are_rejected() {
        let result = ButcherTableau::general(
            vec![ratio(0, 1), ratio(1, 1)],
            vec![vec![ratio(0, 1), ratio(1, 1)], vec![ratio(1, 1), ratio(0, 1)]],
            vec![ratio(1, 2), ratio(1, 2)],
            Vec::new(),
            2,
        );
        assert_eq!(
            result,
            Err(TableauError::NotStrictlyLowerTriangular { row: 0, column: 1 })
        );
    }

    #[test]
    fn first_abscissa_must_be_zero() {
        let result = ButcherTableau::general(
            vec![ratio(1, 2)],
            vec![vec![ratio(0, 1)]],
            vec![ratio(1, 1)],
            Vec::new(),
            1,
        );
        assert_eq!(result, Err(TableauError::NonZeroFirstAbscissa));
    }

    #[test]
    fn lengths_must_agree() {
        let result = ButcherTableau::general(
            vec![ratio(0, 1)],
            vec![vec![ratio(0, 1), ratio(0, 1)], vec![ratio(1, 1), ratio(0, 1)]],
            vec![ratio(1, 2), ratio(1, 2)],
            Vec::new(),
            2,
        );
        assert_eq!(
            result,
            Err(TableauError::LengthMismatch {
                field: "c",
                expected: 2,
                found: 1
            })
        );

        let result = ButcherTableau::general(
            vec![ratio(0, 1), ratio(1, 1)],
            vec![vec![ratio(0, 1), ratio(0, 1)], vec![ratio(1, 1), ratio(0, 1)]],
            vec![ratio(1, 2), ratio(1, 2)],
            vec![ratio(1, 1)],
            2,
        );
        assert_eq!(
            result,
            Err(TableauError::ErrorWeightsMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn williamson_registers_expand_to_heun() {
        // 2N form of Heun's method
        let tableau =
            ButcherTableau::williamson(vec![ratio(0, 1), ratio(-1, 1)], vec![ratio(1, 1), ratio(1, 2)], 2)
                .unwrap();
        assert!(tableau.is_low_storage());
        assert!(!tableau.is_embedded());
        assert_eq!(tableau.a()[1][0], ratio(1, 1));
        assert_eq!(tableau.b_high(), &[ratio(1, 2), ratio(1, 2)]);
        assert_eq!(tableau.c(), &[ratio(0, 1), ratio(1, 1)]);
    }

    #[test]
    fn williamson_lengths_must_agree() {
        let result = ButcherTableau::williamson(vec![ratio(0, 1)], vec![ratio(1, 2), ratio(1, 2)], 2);
        assert_eq!(
            result,
            Err(TableauError::LengthMismatch {
                field: "low-storage a",
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn van_der_houwen_rows_repeat_the_weights() {
        let tableau = ButcherTableau::van_der_houwen(
            vec![ratio(0, 1), ratio(1, 2), ratio(1, 2), ratio(1, 1)],
            vec![ratio(1, 6), ratio(1, 3), ratio(1, 3), ratio(1, 6)],
            Vec::new(),
            1,
        )
        .unwrap();
        let a = tableau.a();
        assert_eq!(a[2][0], ratio(1, 6));
        assert_eq!(a[2][1], ratio(1, 2));
        assert_eq!(a[3][0], ratio(1, 6));
        assert_eq!(a[3][1], ratio(1, 3));
        assert_eq!(a[3][2], ratio(1, 1));
        assert_eq!(tableau.c()[3], ratio(3, 2));
    }

    #[test]
    fn fast_form_mirrors_exact_form() {
        let dual = DualTableau::new(heun());
        let fast = dual.fast();
        assert_eq!(fast.stages(), 2);
        assert_eq!(fast.b_high(), &[0.5, 0.5]);
        assert_eq!(fast.error_weights(), &[-0.5, 0.5]);
        assert_eq!(fast.order(), 2);
        assert!(fast.is_embedded());
    }

    #[test]
    fn empty_tableau_is_unsupported() {
        let dual = DualTableau::new(ButcherTableau::empty());
        assert!(!dual.is_supported());
        assert_eq!(dual.stages(), 0);
        assert!(!dual.fast().is_embedded());
        assert_eq!(dual.exact().validate(), Ok(()));
    }
}
