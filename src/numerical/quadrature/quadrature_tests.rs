use crate::numerical::quadrature::integrand::{ClosureIntegrand, ExpressionIntegrand};
use crate::numerical::quadrature::quadrature_api::{
    compute_equal_interval, compute_unequal_interval, integrate_equal_interval,
};
use crate::numerical::quadrature::quadrature_errors::QuadratureError;
use crate::numerical::quadrature::quadrature_rules::{simpson_one_third, trapezoidal};
use crate::numerical::quadrature::rule_selection::QuadratureRule;
use crate::symbolic::symbolic_errors::{EvaluationError, ParseError, SampleEvaluationError};
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_with_simpson_one_third() {
        let outcome = compute_equal_interval("x**2+3*x+2", 0.0, 2.0, 0.5, None).unwrap();
        assert_eq!(outcome.intervals, 4);
        assert_eq!(outcome.rule, QuadratureRule::SimpsonOneThird);
        assert_relative_eq!(outcome.value, 38.0 / 3.0, epsilon = 1e-6);
        assert_eq!(outcome.grid.x().len(), 5);
        assert_eq!(outcome.grid.y()[4], 12.0);
        assert_relative_eq!(outcome.step(), 0.5);
    }

    #[test]
    fn test_unequal_interval_table() {
        let value =
            compute_unequal_interval(&[0.0, 1.0, 1.5, 2.0], &[0.0, 1.0, 2.25, 4.0]).unwrap();
        assert_relative_eq!(value, 2.875, epsilon = 1e-12);
    }

    #[test]
    fn test_odd_n_divisible_by_three_is_trapezoidal() {
        let outcome = compute_equal_interval("x^2", 0.0, 3.0, 1.0, None).unwrap();
        assert_eq!(outcome.intervals, 3);
        assert_eq!(outcome.rule, QuadratureRule::Trapezoidal);
        // 1 * ((0 + 9)/2 + 1 + 4)
        assert_relative_eq!(outcome.value, 9.5, epsilon = 1e-12);
        assert_eq!(
            outcome.reason(),
            "Using Trapezoidal Rule because the number of intervals (n = 3) is odd."
        );
    }

    #[test]
    fn test_even_multiple_of_three_uses_three_eighth() {
        let outcome = compute_equal_interval("x^3 - x", -1.0, 2.0, 0.5, None).unwrap();
        assert_eq!(outcome.intervals, 6);
        assert_eq!(outcome.rule, QuadratureRule::SimpsonThreeEighth);
        // [x^4/4 - x^2/2] from -1 to 2 = (4 - 2) - (0.25 - 0.5)
        assert_relative_eq!(outcome.value, 2.25, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_y() {
        let outcome = compute_equal_interval("x*y + y", 0.0, 1.0, 0.25, Some(2.0)).unwrap();
        assert_relative_eq!(outcome.value, 3.0, epsilon = 1e-12);
        let err = compute_equal_interval("x*y", 0.0, 1.0, 0.25, None).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::Parse(ParseError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_transcendental() {
        let outcome = compute_equal_interval("sin(x)", 0.0, std::f64::consts::PI, 0.01, None)
            .unwrap();
        assert_eq!(outcome.intervals, 314);
        assert_relative_eq!(outcome.value, 2.0, epsilon = 1e-5);
        let outcome = compute_equal_interval("exp(x)", 0.0, 1.0, 0.1, None).unwrap();
        assert_eq!(outcome.intervals, 10);
        assert_relative_eq!(outcome.value, 1f64.exp() - 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_step_not_dividing_range() {
        // floor(1 / 0.3) = 3, the grid still ends at 1
        let outcome = compute_equal_interval("2*x", 0.0, 1.0, 0.3, None).unwrap();
        assert_eq!(outcome.intervals, 3);
        assert_eq!(outcome.grid.b(), 1.0);
        assert_relative_eq!(outcome.value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_interval() {
        let forward = compute_equal_interval("x**2+3*x+2", 0.0, 2.0, 0.5, None).unwrap();
        let backward = compute_equal_interval("x**2+3*x+2", 2.0, 0.0, 0.5, None).unwrap();
        assert_eq!(backward.rule, forward.rule);
        assert!(backward.step() < 0.0);
        assert_relative_eq!(backward.value, -forward.value, epsilon = 1e-12);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let first = compute_equal_interval("sin(x)*exp(-x)+x^2", -1.0, 3.0, 0.05, None).unwrap();
        let second = compute_equal_interval("sin(x)*exp(-x)+x^2", -1.0, 3.0, 0.05, None).unwrap();
        assert_eq!(first.value.to_bits(), second.value.to_bits());
        let x = [0.0, 0.4, 1.1, 2.0];
        let y = [1.0, 0.3, -2.0, 5.0];
        assert_eq!(
            compute_unequal_interval(&x, &y).unwrap().to_bits(),
            compute_unequal_interval(&x, &y).unwrap().to_bits()
        );
    }

    #[test]
    fn test_single_sub_interval() {
        let outcome = compute_equal_interval("x", 0.0, 1.0, 1.0, None).unwrap();
        assert_eq!(outcome.intervals, 1);
        assert_eq!(outcome.rule, QuadratureRule::Trapezoidal);
        assert_eq!(outcome.value, 0.5);
    }

    #[test]
    fn test_direct_rule_call_with_wrong_n() {
        let f = ExpressionIntegrand::from_text("x", None).unwrap();
        assert_eq!(
            simpson_one_third(&f, 0.0, 1.0, 5),
            Err(QuadratureError::RuleContract {
                rule: QuadratureRule::SimpsonOneThird,
                n: 5
            })
        );
        assert_relative_eq!(trapezoidal(&f, 0.0, 1.0, 5).unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(
            compute_equal_interval("x", 0.0, 1.0, 0.0, None).unwrap_err(),
            QuadratureError::InvalidStep { h: 0.0 }
        );
        assert_eq!(
            compute_equal_interval("x", 0.0, 1.0, -1.0, None).unwrap_err(),
            QuadratureError::InvalidStep { h: -1.0 }
        );
        assert!(matches!(
            compute_equal_interval("x", 2.0, 2.0, 0.1, None),
            Err(QuadratureError::DegenerateInterval { .. })
        ));
        assert!(matches!(
            compute_equal_interval("x", 0.0, 1.0, 5.0, None),
            Err(QuadratureError::DegenerateInterval { .. })
        ));
    }

    #[test]
    fn test_parse_failure_is_reported() {
        assert!(matches!(
            compute_equal_interval("x +* 2", 0.0, 1.0, 0.1, None),
            Err(QuadratureError::Parse(_))
        ));
        assert!(matches!(
            compute_equal_interval("foo(x)", 0.0, 1.0, 0.1, None),
            Err(QuadratureError::Parse(ParseError::UnknownFunction { .. }))
        ));
    }

    #[test]
    fn test_evaluation_failure_stops_integration() {
        let err = compute_equal_interval("1/x", 0.0, 1.0, 0.25, None).unwrap_err();
        assert_eq!(
            err,
            QuadratureError::Evaluation(SampleEvaluationError {
                index: 0,
                x: 0.0,
                source: EvaluationError::DivisionByZero
            })
        );
        let err = compute_equal_interval("ln(x - 0.5)", 0.0, 1.0, 0.25, None).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::Evaluation(SampleEvaluationError {
                index: 0,
                source: EvaluationError::Domain { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_ordinate_stops_integration() {
        // exp(900) overflows at the last point x = 30
        let err = compute_equal_interval("exp(x^2)", 0.0, 30.0, 10.0, None).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::Evaluation(SampleEvaluationError {
                index: 3,
                source: EvaluationError::NonFinite {
                    operation: "exp",
                    ..
                },
                ..
            })
        ));
        let err = compute_equal_interval("y", 0.0, 1.0, 0.25, Some(f64::INFINITY)).unwrap_err();
        assert_eq!(
            err,
            QuadratureError::Evaluation(SampleEvaluationError {
                index: 0,
                x: 0.0,
                source: EvaluationError::NonFinite {
                    operation: "argument",
                    value: f64::INFINITY
                }
            })
        );
        // tan(pi/2) is about 1.6e16 in floating point, its 40th power overflows
        let (pi, half_pi) = (std::f64::consts::PI, std::f64::consts::FRAC_PI_2);
        let err = compute_equal_interval("tan(x)^40", 0.0, pi, half_pi, None).unwrap_err();
        assert!(matches!(
            err,
            QuadratureError::Evaluation(SampleEvaluationError {
                index: 1,
                source: EvaluationError::NonFinite { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_closure_integrand() {
        let f = ClosureIntegrand::new(|x: f64| Ok(1.0 / (1.0 + x * x)), "1/(1+x^2)");
        let outcome = integrate_equal_interval(&f, 0.0, 1.0, 0.05).unwrap();
        assert_eq!(outcome.intervals, 20);
        assert_relative_eq!(outcome.value, std::f64::consts::FRAC_PI_4, epsilon = 1e-7);
    }

    #[test]
    fn test_unequal_interval_shape_errors() {
        assert_eq!(
            compute_unequal_interval(&[0.0, 1.0], &[1.0]),
            Err(QuadratureError::InputShape { x_len: 2, y_len: 1 })
        );
        assert_eq!(
            compute_unequal_interval(&[0.0], &[1.0]),
            Err(QuadratureError::TooFewPoints { len: 1 })
        );
    }
}
