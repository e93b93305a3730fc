// Talks to the device through `adb`.
// Clears the device log once, then streams `logcat` for the JNIpart tag,
// raw format, on a reader thread. Lines reach the main loop over a channel.

use crate::error::Error;
use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// logcat filter: JNIpart at debug level, everything else silenced.
const LOG_FILTER: [&str; 2] = ["JNIpart:D", "*:S"];

pub struct LogBridge {
    child: Child,
    lines: Receiver<String>,
    reader: Option<JoinHandle<()>>,
}

impl LogBridge {
    /// Clear the device log, then start `adb logcat` and its reader thread.
    pub fn open(serial: &str) -> Result<Self, Error> {
        clear_log(serial)?;

        let mut cmd = adb(serial);
        cmd.args(["logcat", "-v", "raw"])
            .args(LOG_FILTER)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());
        let mut child = cmd
            .spawn()
            .map_err(|source| Error::BridgeSpawn { command: describe(&cmd), source })?;
        log::info!("adb logcat running (PID {})", child.id());

        let Some(stdout) = child.stdout.take() else {
            // Do not leave the process behind.
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::BridgeStdout);
        };

        let (tx, rx) = mpsc::channel();
        let reader = thread::spawn(move || forward_lines(BufReader::new(stdout), &tx));

        Ok(Self { child, lines: rx, reader: Some(reader) })
    }

    /// Decoded log lines. Disconnects once adb's stdout closes.
    pub fn lines(&self) -> &Receiver<String> {
        &self.lines
    }
}

impl Drop for LogBridge {
    fn drop(&mut self) {
        // Killing adb closes its stdout, which ends the reader thread.
        if let Err(e) = self.child.kill() {
            log::debug!("adb already gone: {e}");
        }
        match self.child.wait() {
            Ok(status) => log::info!("adb logcat exited: {status}"),
            Err(e) => log::warn!("failed to reap adb: {e}"),
        }
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                log::warn!("adb reader thread panicked");
            }
        }
    }
}

fn adb(serial: &str) -> Command {
    let mut cmd = Command::new("adb");
    cmd.args(["-s", serial]);
    cmd
}

fn describe(cmd: &Command) -> String {
    let mut s = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        s.push(' ');
        s.push_str(&arg.to_string_lossy());
    }
    s
}

/// `adb -s SERIAL logcat -c`, waited for to completion.
fn clear_log(serial: &str) -> Result<(), Error> {
    let mut cmd = adb(serial);
    cmd.args(["logcat", "-c"]);
    let status = cmd
        .status()
        .map_err(|source| Error::BridgeSpawn { command: describe(&cmd), source })?;
    if !status.success() {
        return Err(Error::BridgeStatus { command: describe(&cmd), status });
    }
    log::debug!("cleared device log for {serial}");
    Ok(())
}

/// Read until EOF, sending every line (invalid UTF-8 replaced) without its
/// trailing newline. Stops early when the receiver is gone.
fn forward_lines<R: BufRead>(mut reader: R, tx: &Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_owned();
                if tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::warn!("reading adb output failed: {e}");
                break;
            }
        }
    }
    log::debug!("adb output closed");
}
