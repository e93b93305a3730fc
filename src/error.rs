// Errors that can stop the visualizer.
// Every variant states *where* things went wrong.
// Per-line coordinate failures are not here: they never leave the block handler.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing the framebuffer (or pumping events) failed
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// `adb` could not be started or waited on
    #[error("failed to run `{command}`: {source}")]
    BridgeSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `adb logcat -c` ran but reported failure
    #[error("`{command}` exited with {status}")]
    BridgeStatus {
        command: String,
        status: std::process::ExitStatus,
    },

    /// The spawned `adb` has no stdout pipe to read
    #[error("adb stdout was not captured")]
    BridgeStdout,
}
