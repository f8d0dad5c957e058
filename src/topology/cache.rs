//! Cache invalidation shared by structures holding derived topology.

/// Anything that caches data derived from the beta tables (cell
/// enumerations, orbit summaries, ...) should implement this.
pub trait InvalidateCache {
    /// Drop every cached value so later queries recompute from the tables.
    fn invalidate_cache(&mut self);
}
