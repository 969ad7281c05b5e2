use std::thread;

use crossbeam_channel::unbounded;

use crate::algorithms::error::CheckError;
use crate::algorithms::local::ModelChecker;
use crate::atl::Phi;
use crate::game_structure::{GameStructure, StateIdx};

/// Stack reserved per level of recursion depth on a worker thread.
const STACK_BYTES_PER_LEVEL: usize = 4 * 1024;
/// Stack reserved on a worker thread regardless of the depth limit.
const STACK_BYTES_BASE: usize = 1024 * 1024;

/// Stack size for a worker that may recurse up to `depth_limit` levels.
fn worker_stack_size(depth_limit: usize) -> usize {
    depth_limit
        .saturating_mul(STACK_BYTES_PER_LEVEL)
        .saturating_add(STACK_BYTES_BASE)
}

impl<'a, G: GameStructure + Sync> ModelChecker<'a, G> {
    /// Like [ModelChecker::check_all], but spreads the states over `threads` workers.
    /// Workers take states from a shared queue, so results may be computed in any
    /// order, but they are returned in the order of `states`.
    ///
    /// Each worker gets a stack large enough for the depth limit, so deep checks
    /// end in [CheckError::DepthLimitExceeded] rather than a stack overflow.
    pub fn check_all_parallel(
        &self,
        formula: &Phi,
        states: &[StateIdx],
        threads: usize,
    ) -> Result<Vec<bool>, CheckError> {
        let worker_count = threads.clamp(1, states.len().max(1));
        let stack_size = worker_stack_size(self.depth_limit());

        let (task_sender, task_receiver) = unbounded::<(usize, StateIdx)>();
        let (result_sender, result_receiver) = unbounded::<(usize, Result<bool, CheckError>)>();
        for task in states.iter().copied().enumerate() {
            task_sender
                .send(task)
                .expect("task queue is open while its receiver is alive");
        }
        drop(task_sender);

        let spawned = thread::scope(|scope| -> Result<(), CheckError> {
            for worker_id in 0..worker_count {
                let tasks = task_receiver.clone();
                let results = result_sender.clone();
                thread::Builder::new()
                    .name(format!("check-worker-{}", worker_id))
                    .stack_size(stack_size)
                    .spawn_scoped(scope, move || {
                        trace!(worker_id, "worker start");
                        for (i, state) in tasks.iter() {
                            let result = self.check(formula, state);
                            let failed = result.is_err();
                            if results.send((i, result)).is_err() || failed {
                                break;
                            }
                        }
                        trace!(worker_id, "worker done");
                    })
                    .map_err(|err| CheckError::WorkerSpawn(err.to_string()))?;
            }
            Ok(())
        });
        drop(result_sender);
        spawned?;

        let mut outcome = vec![false; states.len()];
        for (i, result) in result_receiver.iter() {
            outcome[i] = result?;
        }
        Ok(outcome)
    }
}
