use crate::domain::BatchSize;
use crate::error::{AppError, AppResult};

pub(super) fn parse_batch_size(s: &str) -> AppResult<BatchSize> {
    s.parse::<BatchSize>().map_err(AppError::from)
}
