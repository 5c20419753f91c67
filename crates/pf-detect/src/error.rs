use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// Frame size differs from the configured expectation.
    UnexpectedDimensions {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Rejected by an image primitive: empty frame, bad kernel size and the like.
    Image(pf_core::Error),
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedDimensions { expected, actual } => write!(
                f,
                "unexpected frame size: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::Image(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(err) => Some(err),
            Self::UnexpectedDimensions { .. } => None,
        }
    }
}

impl From<pf_core::Error> for DetectError {
    fn from(err: pf_core::Error) -> Self {
        Self::Image(err)
    }
}
