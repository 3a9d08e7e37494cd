//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::{command_name, BackendCommand};
use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), UiError> {
    let name = command_name(&cmd);
    let context = match cmd {
        BackendCommand::InjectChaos => UiErrorContext::InjectChaos,
        BackendCommand::Shutdown => UiErrorContext::General,
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::from_message(
            context,
            "Simulation command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(UiError::from_message(
            context,
            "Simulation backend disconnected; restart the dashboard",
        )),
    }
}
