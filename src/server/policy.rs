/// Scheduling strategy selected per call.
///
/// Both strategies run the same algorithm and produce the same result;
/// `Parallel` spreads independent per-word work over the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}
