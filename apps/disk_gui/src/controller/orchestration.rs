//! Command orchestration helpers from UI actions to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::WorkerCommand;

pub fn dispatch_worker_command(
    cmd_tx: &Sender<WorkerCommand>,
    cmd: WorkerCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        WorkerCommand::Install => "install",
        WorkerCommand::Activate => "activate",
        WorkerCommand::Probe { .. } => "probe",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->worker command"),
        Err(TrySendError::Full(_)) => {
            *status = "Worker command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Asset cache worker disconnected (possible startup failure)".to_string();
        }
    }
}
