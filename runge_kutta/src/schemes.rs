use std::fmt::{Display, Formatter};

use num_rational::BigRational;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    coefficient::{decimal, ratio},
    tableau::{ButcherTableau, DualTableau, TableauError},
};

/// The published explicit methods that can be selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    /// Classical 4-stage, order 4.
    RungeKutta4,
    /// 7-stage embedded pair. The state advances with the order 5 weights
    /// and the order 4 weights give the error estimate.
    DormandPrince56,
    /// Cash-Karp 6-stage 5(4) pair, advancing with the order 5 weights.
    CashKarp45,
    /// Carpenter-Kennedy 5-stage order 4, 2N storage.
    LowStorage54,
    /// 7-stage order 4, 2N storage.
    LowStorage74,
    /// 13-stage order 4, 2N storage.
    LowStorage134,
    /// Kennedy-Carpenter-Lewis 4-stage 3(2) pair, 2R storage.
    LowStorage32,
    /// Reserved. Builds an empty tableau and stepping is a no-op.
    Verner56,
}

impl Scheme {
    pub const ALL: [Scheme; 8] = [
        Scheme::RungeKutta4,
        Scheme::DormandPrince56,
        Scheme::CashKarp45,
        Scheme::LowStorage54,
        Scheme::LowStorage74,
        Scheme::LowStorage134,
        Scheme::LowStorage32,
        Scheme::Verner56,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::RungeKutta4 => "Runge-Kutta 4",
            Scheme::DormandPrince56 => "Dormand-Prince 5(4)",
            Scheme::CashKarp45 => "Cash-Karp 5(4)",
            Scheme::LowStorage54 => "low-storage 5-stage 4",
            Scheme::LowStorage74 => "low-storage 7-stage 4",
            Scheme::LowStorage134 => "low-storage 13-stage 4",
            Scheme::LowStorage32 => "low-storage 4-stage 3(2)",
            Scheme::Verner56 => "Verner 6(5) (reserved)",
        }
    }

    /// Order of the propagating weights. Zero for the reserved slot.
    pub fn order(&self) -> u32 {
        match self {
            Scheme::RungeKutta4 => 4,
            Scheme::DormandPrince56 => 5,
            Scheme::CashKarp45 => 5,
            Scheme::LowStorage54 => 4,
            Scheme::LowStorage74 => 4,
            Scheme::LowStorage134 => 4,
            Scheme::LowStorage32 => 3,
            Scheme::Verner56 => 0,
        }
    }

    /// Builds the exact tableau, validates it and mirrors it into `f64`.
    pub fn build(&self) -> Result<DualTableau, TableauError> {
        let order = self.order();
        let exact = match self {
            Scheme::RungeKutta4 => runge_kutta_4(order)?,
            Scheme::DormandPrince56 => dormand_prince(order)?,
            Scheme::CashKarp45 => cash_karp(order)?,
            Scheme::LowStorage54 => ButcherTableau::williamson(
                ratios(&[
                    (0, 1),
                    (-567301805773, 1357537059087),
                    (-2404267990393, 2016746695238),
                    (-3550918686646, 2091501179385),
                    (-1275806237668, 842570457699),
                ]),
                ratios(&[
                    (1432997174477, 9575080441755),
                    (5161836677717, 13612068292357),
                    (1720146321549, 2090206949498),
                    (3134564353537, 4481467310338),
                    (2277821191437, 14882151754819),
                ]),
                order,
            )?,
            Scheme::LowStorage74 => ButcherTableau::williamson(
                decimals(&[
                    "0",
                    "-0.647900745934",
                    "-2.704760863204",
                    "-0.460080550118",
                    "-0.500581787785",
                    "-1.906532255913",
                    "-1.450000000000",
                ])?,
                decimals(&[
                    "0.117322146869",
                    "0.503270262127",
                    "0.233663281658",
                    "0.283419634625",
                    "0.540367414023",
                    "0.371499414620",
                    "0.136670099385",
                ])?,
                order,
            )?,
            Scheme::LowStorage134 => ButcherTableau::williamson(
                decimals(&[
                    "0",
                    "-0.6160178650170565",
                    "-0.4449487060774118",
                    "-1.0952033345276178",
                    "-1.2256030785959187",
                    "-0.2740182222332805",
                    "-0.0411952089052647",
                    "-0.1797084899153560",
                    "-1.1771530652064288",
                    "-0.4078831463120878",
                    "-0.8295636426191777",
                    "-4.7895970584252288",
                    "-0.6606671432964504",
                ])?,
                decimals(&[
                    "0.0271990297818803",
                    "0.1772488819905108",
                    "0.0378528418949694",
                    "0.6086431830142991",
                    "0.2154313974316100",
                    "0.2066152563885843",
                    "0.0415864076069797",
                    "0.0219891884310925",
                    "0.9893081222650993",
                    "0.0063199019859826",
                    "0.3749640721105318",
                    "1.6080235151003195",
                    "0.0961209123818189",
                ])?,
                order,
            )?,
            Scheme::LowStorage32 => ButcherTableau::van_der_houwen(
                ratios(&[
                    (0, 1),
                    (11847461282814, 36547543011857),
                    (3943225443063, 7078155732230),
                    (-346793006927, 4029903576067),
                ]),
                ratios(&[
                    (1017324711453, 9774461848756),
                    (8237718856693, 13685301971492),
                    (57731312506979, 19404895981398),
                    (-101169746363290, 37734290219643),
                ]),
                ratios(&[
                    (15763415370699, 46270243929542),
                    (514528521746, 5659431552419),
                    (27030193851939, 9429696342944),
                    (-69544964788955, 30262026368149),
                ]),
                order,
            )?,
            Scheme::Verner56 => {
                warn!(scheme = %self, "scheme has no coefficients, steps will not advance the state");
                ButcherTableau::empty()
            }
        };

        debug!(
            scheme = %self,
            stages = exact.stages(),
            embedded = exact.is_embedded(),
            low_storage = exact.is_low_storage(),
            "built tableau"
        );
        Ok(DualTableau::new(exact))
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn ratios(values: &[(i64, i64)]) -> Vec<BigRational> {
    values.iter().map(|&(n, d)| ratio(n, d)).collect()
}

fn decimals(values: &[&str]) -> Result<Vec<BigRational>, TableauError> {
    values.iter().map(|value| decimal(value)).collect()
}

/// Pads the rows below the diagonal into a full square matrix.
fn lower_triangular(rows: &[&[(i64, i64)]]) -> Vec<Vec<BigRational>> {
    let stages = rows.len();
    rows.iter()
        .map(|row| {
            let mut full = ratios(row);
            full.resize(stages, ratio(0, 1));
            full
        })
        .collect()
}

fn runge_kutta_4(order: u32) -> Result<ButcherTableau<BigRational>, TableauError> {
    ButcherTableau::general(
        ratios(&[(0, 1), (1, 2), (1, 2), (1, 1)]),
        lower_triangular(&[&[], &[(1, 2)], &[(0, 1), (1, 2)], &[(0, 1), (0, 1), (1, 1)]]),
        ratios(&[(1, 6), (1, 3), (1, 3), (1, 6)]),
        Vec::new(),
        order,
    )
}

fn dormand_prince(order: u32) -> Result<ButcherTableau<BigRational>, TableauError> {
    ButcherTableau::general(
        ratios(&[(0, 1), (2, 9), (1, 3), (5, 9), (2, 3), (1, 1), (1, 1)]),
        lower_triangular(&[
            &[],
            &[(2, 9)],
            &[(1, 12), (1, 4)],
            &[(55, 324), (-25, 108), (50, 81)],
            &[(83, 330), (-13, 22), (61, 66), (9, 110)],
            &[(-19, 28), (9, 4), (1, 7), (-27, 7), (22, 7)],
            &[(19, 200), (0, 1), (3, 5), (-243, 400), (33, 40), (7, 80)],
        ]),
        ratios(&[
            (19, 200),
            (0, 1),
            (3, 5),
            (-243, 400),
            (33, 40),
            (7, 80),
            (0, 1),
        ]),
        ratios(&[
            (431, 5000),
            (0, 1),
            (333, 500),
            (-7857, 10000),
            (957, 1000),
            (193, 2000),
            (-1, 50),
        ]),
        order,
    )
}

fn cash_karp(order: u32) -> Result<ButcherTableau<BigRational>, TableauError> {
    ButcherTableau::general(
        ratios(&[(0, 1), (1, 5), (3, 10), (3, 5), (1, 1), (7, 8)]),
        lower_triangular(&[
            &[],
            &[(1, 5)],
            &[(3, 40), (9, 40)],
            &[(3, 10), (-9, 10), (6, 5)],
            &[(-11, 54), (5, 2), (-70, 27), (35, 27)],
            &[
                (1631, 55296),
                (175, 512),
                (575, 13824),
                (44275, 110592),
                (253, 4096),
            ],
        ]),
        ratios(&[
            (37, 378),
            (0, 1),
            (250, 621),
            (125, 594),
            (0, 1),
            (512, 1771),
        ]),
        ratios(&[
            (2825, 27648),
            (0, 1),
            (18575, 48384),
            (13525, 55296),
            (277, 14336),
            (1, 4),
        ]),
        order,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{Signed, Zero};

    /// Residuals of the order conditions up to order four, in the order
    /// `1, c, c^2, Ac, c^3, cAc, Ac^2, AAc`.
    fn order_residuals(tableau: &ButcherTableau<BigRational>, b: &[BigRational]) -> Vec<BigRational> {
        let s = tableau.stages();
        let a = tableau.a();
        let c = tableau.c();
        let sum = |f: &dyn Fn(usize) -> BigRational| (0..s).fold(BigRational::zero(), |acc, i| acc + f(i));
        let ac: Vec<BigRational> = (0..s).map(|i| sum(&|j| &a[i][j] * &c[j])).collect();
        let ac2: Vec<BigRational> = (0..s).map(|i| sum(&|j| &a[i][j] * &c[j] * &c[j])).collect();
        let aac: Vec<BigRational> = (0..s).map(|i| sum(&|j| &a[i][j] * &ac[j])).collect();
        vec![
            sum(&|i| b[i].clone()) - ratio(1, 1),
            sum(&|i| &b[i] * &c[i]) - ratio(1, 2),
            sum(&|i| &b[i] * &c[i] * &c[i]) - ratio(1, 3),
            sum(&|i| &b[i] * &ac[i]) - ratio(1, 6),
            sum(&|i| &b[i] * &c[i] * &c[i] * &c[i]) - ratio(1, 4),
            sum(&|i| &b[i] * &c[i] * &ac[i]) - ratio(1, 8),
            sum(&|i| &b[i] * &ac2[i]) - ratio(1, 12),
            sum(&|i| &b[i] * &aac[i]) - ratio(1, 24),
        ]
    }

    fn assert_order(tableau: &ButcherTableau<BigRational>, b: &[BigRational], order: usize, tolerance: &BigRational) {
        let conditions = match order {
            1 => 1,
            2 => 2,
            3 => 4,
            _ => 8,
        };
        for (index, residual) in order_residuals(tableau, b).iter().take(conditions).enumerate() {
            assert!(
                residual.abs() <= *tolerance,
                "condition {index} residual {residual}"
            );
        }
    }

    #[test]
    fn every_scheme_builds_consistently() {
        for scheme in Scheme::ALL {
            let dual = scheme.build().unwrap();
            let exact = dual.exact();
            assert_eq!(exact.validate(), Ok(()), "{scheme}");
            assert_eq!(exact.order(), scheme.order());
            if exact.is_supported() {
                assert!(exact.c()[0].is_zero());
            }
            assert_eq!(dual.fast().stages(), exact.stages());
        }
    }

    #[test]
    fn stage_counts() {
        let stages: Vec<usize> = Scheme::ALL
            .iter()
            .map(|scheme| scheme.build().unwrap().stages())
            .collect();
        assert_eq!(stages, vec![4, 7, 6, 5, 7, 13, 4, 0]);
    }

    #[test]
    fn embedded_and_low_storage_flags() {
        for scheme in Scheme::ALL {
            let dual = scheme.build().unwrap();
            let embedded = matches!(
                scheme,
                Scheme::DormandPrince56 | Scheme::CashKarp45 | Scheme::LowStorage32
            );
            let low_storage = matches!(
                scheme,
                Scheme::LowStorage54 | Scheme::LowStorage74 | Scheme::LowStorage134 | Scheme::LowStorage32
            );
            assert_eq!(dual.exact().is_embedded(), embedded, "{scheme}");
            assert_eq!(dual.fast().is_embedded(), embedded, "{scheme}");
            assert_eq!(dual.exact().is_low_storage(), low_storage, "{scheme}");
        }
    }

    #[test]
    fn reserved_scheme_is_empty() {
        let dual = Scheme::Verner56.build().unwrap();
        assert!(!dual.is_supported());
        assert!(!dual.exact().is_embedded());
    }

    #[test]
    fn rational_schemes_satisfy_order_conditions_exactly() {
        let zero = BigRational::zero();
        let rk4 = Scheme::RungeKutta4.build().unwrap();
        assert_order(rk4.exact(), rk4.exact().b_high(), 4, &zero);

        for scheme in [Scheme::CashKarp45, Scheme::DormandPrince56] {
            let dual = scheme.build().unwrap();
            let tableau = dual.exact();
            assert_order(tableau, tableau.b_high(), 4, &zero);
            assert_order(tableau, tableau.b_low(), 4, &zero);
        }
    }

    #[test]
    fn propagating_weights_are_the_higher_order_pair() {
        // sum b_i c_i^4 = 1/5 separates order five from order four
        for scheme in [Scheme::CashKarp45, Scheme::DormandPrince56] {
            let dual = scheme.build().unwrap();
            let tableau = dual.exact();
            let fifth = |b: &[BigRational]| {
                (0..tableau.stages()).fold(BigRational::zero(), |acc, i| {
                    let c = &tableau.c()[i];
                    acc + &b[i] * c * c * c * c
                })
            };
            assert_eq!(fifth(tableau.b_high()), ratio(1, 5), "{scheme}");
            assert_ne!(fifth(tableau.b_low()), ratio(1, 5), "{scheme}");
        }
    }

    #[test]
    fn published_rational_approximations_are_accurate() {
        let tolerance = ratio(1, 100_000_000_000_000_000);
        let dual = Scheme::LowStorage54.build().unwrap();
        assert_order(dual.exact(), dual.exact().b_high(), 4, &tolerance);

        let dual = Scheme::LowStorage32.build().unwrap();
        assert_order(dual.exact(), dual.exact().b_high(), 3, &tolerance);
        assert_order(dual.exact(), dual.exact().b_low(), 2, &tolerance);
    }

    #[test]
    fn decimal_schemes_are_accurate_to_their_digits() {
        let dual = Scheme::LowStorage74.build().unwrap();
        assert_order(dual.exact(), dual.exact().b_high(), 4, &ratio(1, 1_000_000_000_000));

        let dual = Scheme::LowStorage134.build().unwrap();
        assert_order(dual.exact(), dual.exact().b_high(), 4, &ratio(1, 1_000_000_000_000_000));
    }

    #[test]
    fn williamson_abscissae() {
        let dual = Scheme::LowStorage54.build().unwrap();
        let expected = [
            0.0,
            0.14965902199922912,
            0.37040095736420475,
            0.6222557631344432,
            0.9582821306746903,
        ];
        for (c, expected) in dual.fast().c().iter().zip(expected) {
            assert!((c - expected).abs() < 1e-15);
        }

        let dual = Scheme::LowStorage134.build().unwrap();
        assert!((dual.fast().c()[12] - 0.9126827615920841).abs() < 1e-15);
    }

    #[test]
    fn van_der_houwen_abscissae() {
        let dual = Scheme::LowStorage32.build().unwrap();
        let expected = [
            0.0,
            0.32416573882874605,
            0.6611777337806453,
            0.6199640918446359,
        ];
        for (c, expected) in dual.fast().c().iter().zip(expected) {
            assert!((c - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn misprinted_cash_karp_row_is_rejected() {
        // 3/104 in place of 3/10 breaks the row sum of stage 3
        let result = ButcherTableau::general(
            ratios(&[(0, 1), (1, 5), (3, 10), (3, 5)]),
            lower_triangular(&[
                &[],
                &[(1, 5)],
                &[(3, 40), (9, 40)],
                &[(3, 104), (-9, 10), (6, 5)],
            ]),
            ratios(&[(1, 4), (1, 4), (1, 4), (1, 4)]),
            Vec::new(),
            1,
        );
        assert_eq!(result, Err(TableauError::RowSumMismatch { row: 3 }));
    }

    #[test]
    fn truncated_subdiagonal_breaks_second_order() {
        let truncated = ButcherTableau::van_der_houwen(
            ratios(&[
                (0, 1),
                (11847461282814, 36547543011857),
                (3943225443063, 7078155732230),
                (-346793006927, 402990357606),
            ]),
            ratios(&[
                (1017324711453, 9774461848756),
                (8237718856693, 13685301971492),
                (57731312506979, 19404895981398),
                (-101169746363290, 37734290219643),
            ]),
            Vec::new(),
            3,
        )
        .unwrap();
        let residuals = order_residuals(&truncated, truncated.b_high());
        assert!(residuals[1].abs() > ratio(1, 1));
    }
}
