//! Error types for the page cache.

use thiserror::Error;

use crate::common::{PageNo, SlotId};
use crate::storage::StoreError;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by the buffer pool.
#[derive(Debug, Error)]
pub enum Error {
    /// The target page is not resident in the pool.
    ///
    /// Returned by fix/unfix/update/write, which never load implicitly.
    #[error("{0} is not buffered")]
    PageNotBuffered(PageNo),

    /// Eviction is needed but every occupied frame is fixed.
    ///
    /// This is an expected condition under full pinning: unfix pages or
    /// grow the pool.
    #[error("no victim available: every frame is fixed")]
    NoVictimAvailable,

    /// The named replacement policy has no selection algorithm.
    #[error("unsupported replacement policy: {0:?}")]
    UnsupportedPolicy(String),

    /// Failure reported by the backing block store, passed through unchanged.
    #[error("backing store error: {0}")]
    BackingStore(#[from] StoreError),

    /// Page table invariant violation: the page is already mapped elsewhere.
    #[error("{page} is already mapped to {existing}, cannot map to {requested}")]
    DuplicateMapping {
        page: PageNo,
        existing: SlotId,
        requested: SlotId,
    },

    /// A buffer pool needs at least one frame.
    #[error("buffer pool size must be greater than zero")]
    EmptyPool,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::BackingStore(StoreError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotBuffered(PageNo::new(42));
        assert_eq!(format!("{}", err), "Page(42) is not buffered");

        let err = Error::NoVictimAvailable;
        assert_eq!(format!("{}", err), "no victim available: every frame is fixed");

        let err = Error::UnsupportedPolicy("clock".to_string());
        assert_eq!(format!("{}", err), "unsupported replacement policy: \"clock\"");
    }

    #[test]
    fn test_duplicate_mapping_display() {
        let err = Error::DuplicateMapping {
            page: PageNo::new(3),
            existing: SlotId::new(0),
            requested: SlotId::new(2),
        };
        assert_eq!(
            format!("{}", err),
            "Page(3) is already mapped to Slot(0), cannot map to Slot(2)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        match err {
            Error::BackingStore(StoreError::Io(_)) => {}
            other => panic!("Expected BackingStore(Io), got {other:?}"),
        }
    }

    #[test]
    fn test_store_error_passes_through() {
        let err: Error = StoreError::FileNotOpen.into();
        assert!(matches!(err, Error::BackingStore(StoreError::FileNotOpen)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
