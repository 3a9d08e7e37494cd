//! Backend commands queued from UI to backend worker.

pub use shared::protocol::ControllerCommand as BackendCommand;

pub fn command_name(cmd: &BackendCommand) -> &'static str {
    match cmd {
        BackendCommand::InjectChaos => "inject_chaos",
        BackendCommand::Shutdown => "shutdown",
    }
}
