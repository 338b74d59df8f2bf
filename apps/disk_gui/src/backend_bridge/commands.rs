//! Commands queued from the UI to the asset cache worker.

pub enum WorkerCommand {
    /// Precache every manifest path into the current generation.
    Install,
    /// Tear down stale generations. Only valid once install completed.
    Activate,
    /// Serve one asset cache-first, reporting where it came from.
    Probe { path: String },
}
