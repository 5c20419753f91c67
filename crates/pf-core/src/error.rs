use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    ChannelMismatch {
        expected: usize,
        actual: usize,
    },
    EmptyImage,
    InvalidKernel {
        name: &'static str,
        size: usize,
    },
    OutOfBounds,
    InvalidStride,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "frame dimensions mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::ChannelMismatch { expected, actual } => {
                write!(
                    f,
                    "channel count mismatch: expected {expected}, got {actual}"
                )
            }
            Self::EmptyImage => write!(f, "empty image"),
            Self::InvalidKernel { name, size } => {
                write!(f, "invalid {name} kernel size {size}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
        }
    }
}

impl std::error::Error for Error {}
