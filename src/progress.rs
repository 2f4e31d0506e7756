//! Progress reporting for directory listings.

use tracing::info;

/// Progress information reported after every fetched page.
#[derive(Debug, Clone)]
pub struct ListProgress {
    /// Absolute path of the directory being listed
    pub directory: String,
    /// Pages fetched so far
    pub page: usize,
    /// Entries collected so far, after de-duplication
    pub listed: usize,
    /// Total children reported by the API
    pub total: u64,
}

impl ListProgress {
    /// Create a new progress report.
    pub fn new(directory: impl Into<String>, page: usize, listed: usize, total: u64) -> Self {
        Self {
            directory: directory.into(),
            page,
            listed,
            total,
        }
    }

    /// Get progress as a percentage (0.0 to 100.0).
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        ((self.listed as f64 / self.total as f64) * 100.0).min(100.0)
    }

    /// Check if every reported child has been collected.
    pub fn is_complete(&self) -> bool {
        self.listed as u64 >= self.total
    }
}

/// Type alias for progress callback function.
///
/// The callback receives progress information and can return `false` to cancel the listing.
pub type ListProgressCallback = Box<dyn FnMut(&ListProgress) -> bool + Send>;

/// Create a progress callback that logs every page at info level.
///
/// # Example
/// ```no_run
/// use deepboxlib::progress::make_progress_logger;
///
/// let callback = make_progress_logger();
/// ```
pub fn make_progress_logger() -> ListProgressCallback {
    Box::new(|progress: &ListProgress| {
        info!(
            directory = %progress.directory,
            page = progress.page,
            listed = progress.listed,
            total = progress.total,
            "listing {:.1}%",
            progress.percent()
        );
        true
    })
}
