use crate::numerical::quadrature::quadrature_task::{IntegrationTask, TaskError, TaskReport};

/// number of built-in examples
pub const NUMBER_OF_EXAMPLES: usize = 5;

pub fn quadrature_examples(example: usize) -> Result<TaskReport, TaskError> {
    let task = match example {
        0 => {
            // n = (2 - 0)/0.5 = 4: even, not divisible by 3 -> Simpson's 1/3 rule, exact for a quadratic
            IntegrationTask::equal_interval("x**2 + 3*x + 2", 0.0, 2.0, 0.5, None)
        }
        1 => {
            // tabulated data with unequal intervals, always the trapezoidal rule
            IntegrationTask::unequal_interval(vec![0.0, 1.0, 1.5, 2.0], vec![0.0, 1.0, 2.25, 4.0])
        }
        2 => {
            // n = 3 is odd, so the trapezoidal rule is used although 3 is divisible by 3
            IntegrationTask::equal_interval("x^2", 0.0, 3.0, 1.0, None)
        }
        3 => {
            // n = 6 -> Simpson's 3/8 rule
            IntegrationTask::equal_interval("sin(x)*exp(-x)", 0.0, 3.0, 0.5, None)
        }
        4 => {
            // y is held constant
            IntegrationTask::equal_interval("x*y + y^2", 0.0, 1.0, 0.1, Some(2.0))
        }
        _ => IntegrationTask::equal_interval("x", 0.0, 1.0, 0.25, None),
    };
    task.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature::rule_selection::QuadratureRule;
    use approx::assert_relative_eq;

    #[test]
    fn test_examples_run() {
        for example in 0..NUMBER_OF_EXAMPLES {
            assert!(quadrature_examples(example).is_ok(), "example {}", example);
        }
        let report = quadrature_examples(0).unwrap();
        assert_relative_eq!(report.value, 38.0 / 3.0, epsilon = 1e-9);
        assert_eq!(
            quadrature_examples(3).unwrap().rule,
            QuadratureRule::SimpsonThreeEighth
        );
        // 2x + 4 over [0, 1]
        assert_relative_eq!(quadrature_examples(4).unwrap().value, 5.0, epsilon = 1e-12);
    }
}
