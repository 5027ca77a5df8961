#[derive(Debug, Clone)]
pub enum HarrisError {
    InvalidImageSize { width: usize, height: usize },
    InvalidImageData { expected_len: usize, actual_len: usize },
    InvalidThreshold(f32),
}

impl std::fmt::Display for HarrisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarrisError::InvalidImageSize { width, height } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", width, height)
            }
            HarrisError::InvalidImageData { expected_len, actual_len } => {
                write!(f, "Image data length mismatch: expected {}, got {}", expected_len, actual_len)
            }
            HarrisError::InvalidThreshold(t) => {
                write!(f, "Invalid threshold: {} (must be finite and > 0)", t)
            }
        }
    }
}

impl std::error::Error for HarrisError {}

pub type HarrisResult<T> = Result<T, HarrisError>;
