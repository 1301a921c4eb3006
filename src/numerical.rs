/// Example#1
/// ```
/// use RustedQuad::numerical::quadrature::quadrature_task::IntegrationTask;
/// // integrate x^2 + 3x + 2 from 0 to 2 with step 0.5; the rule is picked from n = 4
/// let task = IntegrationTask::from_document(
///     "equal_interval equation: \"x**2 + 3*x + 2\" x0: 0 xn: 2 h: 0.5 settings loglevel: off",
/// )
/// .unwrap();
/// let report = task.solve().unwrap();
/// println!("{}", report);
/// ```
/// Example#2
/// ```
/// use RustedQuad::numerical::quadrature::integrand::ClosureIntegrand;
/// use RustedQuad::numerical::quadrature::quadrature_rules::simpson_three_eighth;
/// // any Rust function can be integrated, not only parsed expressions
/// let f = ClosureIntegrand::new(|x: f64| Ok(x.powi(3)), "x^3");
/// let value = simpson_three_eighth(&f, 0.0, 1.0, 3).unwrap();
/// assert!((value - 0.25).abs() < 1e-12);
/// ```
pub mod quadrature;
