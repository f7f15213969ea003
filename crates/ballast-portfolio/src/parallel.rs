//! Conditional parallel iteration.
//!
//! Uses rayon when the `parallel` feature is enabled and the configuration
//! asks for it; otherwise falls back to a plain sequential iterator. Output
//! order always matches input order.

use crate::types::AnalysisConfig;

/// Filters and maps items, conditionally using parallel iteration.
///
/// Runs on rayon only when the `parallel` feature is enabled and
/// `config.should_parallelize(items.len())` holds. Dropped items leave no
/// gap; kept items stay in input order.
#[allow(unused_variables)]
pub fn maybe_parallel_filter_map<T, U, F>(items: &[T], config: &AnalysisConfig, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Option<U> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.should_parallelize(items.len()) {
            return items.par_iter().filter_map(f).collect();
        }
    }

    items.iter().filter_map(f).collect()
}
