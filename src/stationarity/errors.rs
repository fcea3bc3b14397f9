//! stationarity::errors — failures while testing or transforming series.
use crate::{data::errors::TableError, statistical_tests::TestError};
use thiserror::Error;

pub type StationarityResult<T> = Result<T, StationarityError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationarityError {
    /// The unit-root test could not run on a series.
    #[error("ADF test failed for '{series}': {source}")]
    Test {
        series: String,
        #[source]
        source: TestError,
    },

    /// The dependent series is not a column of the table.
    #[error("Dependent series '{0}' is not in the table.")]
    MissingDependent(String),

    #[error(transparent)]
    Table(#[from] TableError),

    /// Alignment after transforming left no complete rows.
    #[error("No complete rows remain after stationarity transforms.")]
    EmptyPanel,
}

impl StationarityError {
    pub(crate) fn test(series: &str) -> impl FnOnce(TestError) -> StationarityError + '_ {
        move |source| StationarityError::Test { series: series.to_string(), source }
    }
}
