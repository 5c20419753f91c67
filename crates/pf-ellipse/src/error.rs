use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    TooFewPoints { needed: usize, got: usize },
    /// The points do not determine a real, bounded ellipse.
    NotAnEllipse,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints { needed, got } => {
                write!(f, "too few points for ellipse fit: need {needed}, got {got}")
            }
            Self::NotAnEllipse => write!(f, "points do not determine a proper ellipse"),
        }
    }
}

impl std::error::Error for FitError {}
