use thiserror::Error;

#[derive(Debug, Error)]
pub enum CutLayError {
    #[error("invalid part at index {index}: {reason}")]
    InvalidPart { index: usize, reason: String },

    #[error("invalid sheet dimensions {width}x{height}: width and height must be greater than 0")]
    InvalidSheet { width: i64, height: i64 },

    #[error("nothing to pack: input part list is empty")]
    Empty,

    #[error("underpopulated {param}: got {value}, must be at least 1")]
    Underpopulated { param: &'static str, value: i64 },
}

pub type Result<T> = std::result::Result<T, CutLayError>;
