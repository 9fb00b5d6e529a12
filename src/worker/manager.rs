use crate::LvoxError;

/// A step of a computation, run by a [`WorkersManager`].
///
/// `C` is the context shared by all the workers of a manager (the grids they
/// fill). A worker only receives it for the duration of [`Worker::compute`].
pub trait Worker<C> {
    /// A short name identifying this worker in logs and errors.
    fn name(&self) -> &'static str;

    /// Runs this worker.
    ///
    /// On failure, the worker must leave the context unchanged.
    fn compute(&mut self, context: &mut C) -> Result<(), LvoxError>;
}

/// An ordered list of workers, run one after the other on the same context.
///
/// The manager owns its workers: they are all dropped when
/// [`WorkersManager::compute`] returns, whether it succeeded or not.
pub struct WorkersManager<'a, C> {
    workers: Vec<(usize, Box<dyn Worker<C> + 'a>)>,
}

impl<C> Default for WorkersManager<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> WorkersManager<'a, C> {
    /// A manager without any worker.
    pub fn new() -> Self {
        Self { workers: vec![] }
    }

    /// Appends a worker, identified by `id` in logs and errors.
    pub fn add_worker(&mut self, id: usize, worker: Box<dyn Worker<C> + 'a>) {
        self.workers.push((id, worker));
    }

    /// The number of workers waiting to be run.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Does this manager have no worker to run?
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Runs every worker, in the order they were added.
    ///
    /// The first failure stops the computation: the remaining workers are
    /// not run, and the error is returned as [`LvoxError::WorkerFailed`].
    pub fn compute(&mut self, context: &mut C) -> Result<(), LvoxError> {
        let workers = std::mem::take(&mut self.workers);
        let num_workers = workers.len();

        for (id, mut worker) in workers {
            let name = worker.name();
            log::debug!("running worker {} ({}) of {}", id, name, num_workers);

            worker.compute(context).map_err(|source| {
                log::debug!("worker {} ({}) failed: {}", id, name, source);
                LvoxError::WorkerFailed {
                    id,
                    name,
                    source: Box::new(source),
                }
            })?;
        }

        Ok(())
    }
}
