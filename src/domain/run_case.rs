//! Run-case selector.

use std::fmt;

use crate::error::AppError;

/// Which branch of the dispatcher executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCase {
    /// `0`: fetch the pretrained model and sample LR/HR sequences.
    Download,
    /// `1`: run inference on a directory of LR frames.
    Inference,
    /// `2`: compute metrics of results against HR ground truth.
    Metrics,
    /// `3`: train TecoGAN.
    TrainTecoGan,
    /// `4`: train FRVSR.
    TrainFrvsr,
    /// Any other number.
    Unsupported(i64),
}

impl RunCase {
    pub fn from_number(n: i64) -> Self {
        match n {
            0 => Self::Download,
            1 => Self::Inference,
            2 => Self::Metrics,
            3 => Self::TrainTecoGan,
            4 => Self::TrainFrvsr,
            other => Self::Unsupported(other),
        }
    }

    /// Parse the raw command-line token.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.trim()
            .parse::<i64>()
            .map(Self::from_number)
            .map_err(|_| AppError::failure(format!("Invalid run case '{raw}': expected an integer.")))
    }

    pub fn number(self) -> i64 {
        match self {
            Self::Download => 0,
            Self::Inference => 1,
            Self::Metrics => 2,
            Self::TrainTecoGan => 3,
            Self::TrainFrvsr => 4,
            Self::Unsupported(n) => n,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Download => "download assets",
            Self::Inference => "inference",
            Self::Metrics => "calculate metrics",
            Self::TrainTecoGan => "train TecoGAN",
            Self::TrainFrvsr => "train FRVSR",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Display for RunCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_numbers_map_to_cases() {
        assert_eq!(RunCase::from_number(0), RunCase::Download);
        assert_eq!(RunCase::from_number(1), RunCase::Inference);
        assert_eq!(RunCase::from_number(2), RunCase::Metrics);
        assert_eq!(RunCase::from_number(3), RunCase::TrainTecoGan);
        assert_eq!(RunCase::from_number(4), RunCase::TrainFrvsr);
        assert_eq!(RunCase::from_number(9), RunCase::Unsupported(9));
        assert_eq!(RunCase::from_number(-1), RunCase::Unsupported(-1));
    }

    #[test]
    fn number_round_trips_for_unsupported() {
        assert_eq!(RunCase::Unsupported(42).number(), 42);
        assert_eq!(RunCase::Metrics.to_string(), "2");
    }

    #[test]
    fn parse_rejects_non_integers() {
        assert_eq!(RunCase::parse(" 1 ").unwrap(), RunCase::Inference);
        let err = RunCase::parse("one").unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.message().contains("one"));
    }
}
