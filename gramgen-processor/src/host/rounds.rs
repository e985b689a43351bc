use tracing::debug;

use crate::{ArtifactStore, DiagnosticSink, Processor, Reporter};

/// Round limit used when the caller has no preference.
pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// Outcome of [`run_rounds`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// Rounds run, including the final one.
    pub rounds: usize,
    /// Artifacts created, in creation order.
    pub created: Vec<String>,
}

/// Drive `processor` the way a compiler does.
///
/// Rounds repeat while the previous one created new artifacts, up to
/// `max_rounds`, and are followed by one final round. Hitting the limit is
/// reported as a warning.
pub fn run_rounds<S, A>(processor: &mut Processor<S, A>, max_rounds: usize) -> RoundSummary
where
    S: DiagnosticSink,
    A: ArtifactStore,
{
    let max_rounds = max_rounds.max(1);
    let mut summary = RoundSummary::default();

    loop {
        processor.run_round();
        summary.rounds += 1;

        let fresh = processor.store_mut().take_created();
        debug!(round = summary.rounds, created = fresh.len(), "round finished");
        if fresh.is_empty() {
            break;
        }
        summary.created.extend(fresh);

        if summary.rounds >= max_rounds {
            Reporter::new(processor.sink_mut()).report_warning(&format!(
                "round limit of {max_rounds} reached while artifacts were still being created"
            ));
            break;
        }
    }

    processor.run_round();
    summary.rounds += 1;
    summary.created.extend(processor.store_mut().take_created());
    summary
}
