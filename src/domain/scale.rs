// Value scale transforms applied ahead of normalisation
use crate::domain::errors::RenderError;

/// Monotonic remapping of measured values before extent computation and
/// coordinate mapping. Applied uniformly to every y value of a snapshot,
/// and to the highlight threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueScale {
    #[default]
    Linear,
    Logarithmic,
}

impl ValueScale {
    pub fn apply(self, value: f64) -> Result<f64, RenderError> {
        match self {
            ValueScale::Linear => Ok(value),
            ValueScale::Logarithmic => {
                // ln of a zero or negative power reading is undefined;
                // callers must pre-filter such samples
                if value <= 0.0 {
                    Err(RenderError::NonPositiveLogValue { value })
                } else {
                    Ok(value.ln())
                }
            }
        }
    }

    /// Y-axis caption; names the active scale so logarithmic charts read
    /// correctly on the panel.
    pub fn axis_caption(self, highlight_watts: f64) -> String {
        match self {
            ValueScale::Linear => {
                format!("Power (Higher region {highlight_watts}W)")
            }
            ValueScale::Logarithmic => {
                format!("Power (Logarithmic. Higher region {highlight_watts}W)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        assert_eq!(ValueScale::Linear.apply(42.5).unwrap(), 42.5);
        assert_eq!(ValueScale::Linear.apply(-3.0).unwrap(), -3.0);
    }

    #[test]
    fn test_logarithmic_applies_natural_log() {
        let scaled = ValueScale::Logarithmic.apply(100.0).unwrap();
        assert!((scaled - 100.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_logarithmic_rejects_non_positive() {
        assert_eq!(
            ValueScale::Logarithmic.apply(0.0).unwrap_err(),
            RenderError::NonPositiveLogValue { value: 0.0 }
        );
        assert!(ValueScale::Logarithmic.apply(-5.0).is_err());
    }

    #[test]
    fn test_axis_captions_differ_by_scale() {
        let linear = ValueScale::Linear.axis_caption(1000.0);
        let log = ValueScale::Logarithmic.axis_caption(1000.0);
        assert_eq!(linear, "Power (Higher region 1000W)");
        assert_eq!(log, "Power (Logarithmic. Higher region 1000W)");
    }
}
