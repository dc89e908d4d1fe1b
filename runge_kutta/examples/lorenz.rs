use runge_kutta::{IntegratorConfig, Scheme};
use tracing::Level;

struct Lorenz {
    sigma: f64,
    rho: f64,
    beta: f64,
}

impl Lorenz {
    fn f(&self, x: &[f64; 3]) -> [f64; 3] {
        [
            self.sigma * (x[1] - x[0]),
            x[0] * (self.rho - x[2]) - x[1],
            x[0] * x[1] - self.beta * x[2],
        ]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let model = Lorenz {
        sigma: 10.,
        rho: 28.,
        beta: 8. / 3.,
    };

    // pass a RON file such as `(scheme: LowStorage54)` to pick the scheme
    let config = match std::env::args().nth(1) {
        Some(path) => IntegratorConfig::load(path.as_ref())?,
        None => IntegratorConfig::new(Scheme::CashKarp45),
    };
    let integrator = config.build()?;

    let dt = 0.001;
    let mut t = 0.0;
    let mut x = [1.0, 0.0, 0.0]; // Initial conditions for x, y, z
    let mut worst = 0.0_f64;

    while t < 30.0 {
        x = integrator.step_with_error(
            |x: &[f64; 3], _t| model.f(x),
            &x,
            t,
            dt,
            |error: &[f64; 3]| {
                worst = error.iter().fold(worst, |worst, e| worst.max(e.abs()));
            },
        );
        t += dt;
        if t - t.floor() < dt {
            println!(
                "{:10.6}     {:10.6}     {:10.6}     {:10.6}", // 10 chars wide, 6 decimal places
                t, x[0], x[1], x[2]
            );
        }
    }
    println!("{}: largest relative error estimate {:e}", integrator.scheme(), worst);
    Ok(())
}
