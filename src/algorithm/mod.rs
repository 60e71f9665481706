/// Hooks for watching a synthesis run
pub mod observer;
/// Exhaustive best match search over the exemplar, optionally split across workers
pub mod search;
/// Level by level synthesis driver
pub mod synthesizer;
