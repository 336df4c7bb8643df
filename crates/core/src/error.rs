use thiserror::Error;

use crate::week::WeekKeyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    WeekKey(#[from] WeekKeyError),
}
