//! Diagnostic sink: records `(operation, code)` pairs for failed (or notable)
//! operations and forwards them to `tracing` and, optionally, a log file.
//!
//! Model
//! - `Logger` is a cheap cloneable handle over shared sink state. It is created
//!   explicitly and passed to every factory that may need it; there is no
//!   global instance.
//! - Objects that hold on to a sink register as clients (`SinkClient`, RAII).
//!   When the last registered client detaches the sink is torn down: the file
//!   is flushed and closed, later `log` calls are ignored, and `set_log_file`
//!   fails until someone registers again.
//! - Logging is best-effort. Write failures are swallowed, never escalated.

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ErrorCode, GeomError, GeomResult};

/// One journal entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub operation: String,
    pub code: ErrorCode,
}

/// Registration id handed out by `Logger::register`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(u64);

#[derive(Debug, Default)]
struct SinkState {
    clients: BTreeSet<ClientId>,
    next_id: u64,
    torn_down: bool,
    file: Option<BufWriter<File>>,
    // once redirected, later redirections append instead of truncating
    redirected: bool,
    records: Vec<LogRecord>,
}

impl SinkState {
    fn teardown(&mut self) {
        if let Some(mut f) = self.file.take() {
            let _ = f.flush();
        }
        self.torn_down = true;
    }
}

/// Shared diagnostic sink handle.
#[derive(Clone, Debug, Default)]
pub struct Logger {
    state: Arc<Mutex<SinkState>>,
}

impl Logger {
    /// Fresh sink writing only to `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new client. Re-activates a torn-down sink with fresh state.
    pub fn register(&self) -> SinkClient {
        let id = {
            let mut st = self.lock();
            if st.torn_down {
                let next_id = st.next_id;
                *st = SinkState {
                    next_id,
                    ..SinkState::default()
                };
            }
            let id = ClientId(st.next_id);
            st.next_id += 1;
            st.clients.insert(id);
            id
        };
        tracing::trace!(client = id.0, "sink client registered");
        SinkClient {
            logger: self.clone(),
            id,
        }
    }

    /// Deregister `client`; tears the sink down when no client remains.
    pub fn release(&self, client: ClientId) {
        let mut st = self.lock();
        if st.torn_down || !st.clients.remove(&client) {
            return;
        }
        if st.clients.is_empty() {
            st.teardown();
            tracing::debug!("diagnostic sink torn down");
        }
    }

    /// Record `(operation, code)`. Ignored once the sink is torn down.
    pub fn log(&self, operation: &str, code: ErrorCode) {
        let mut st = self.lock();
        if st.torn_down {
            return;
        }
        st.records.push(LogRecord {
            operation: operation.to_string(),
            code,
        });
        if code == ErrorCode::Success {
            tracing::debug!(op = operation, code = code.as_u8(), "{code}");
        } else {
            tracing::warn!(op = operation, code = code.as_u8(), "{code}");
        }
        if let Some(f) = st.file.as_mut() {
            let _ = writeln!(
                f,
                "op={operation} code={} message={code}",
                code.as_u8()
            );
        }
    }

    /// Redirect file output to `path`. The first redirection truncates, later
    /// ones append. On failure the previous destination stays in effect.
    pub fn set_log_file(&self, path: impl AsRef<Path>) -> GeomResult<()> {
        let path = path.as_ref();
        let mut st = self.lock();
        if st.torn_down {
            return Err(GeomError::SinkDetached);
        }
        let mut opts = OpenOptions::new();
        if st.redirected {
            opts.create(true).append(true);
        } else {
            opts.create(true).write(true).truncate(true);
        }
        let file = opts.open(path).map_err(|source| GeomError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(mut old) = st.file.replace(BufWriter::new(file)) {
            let _ = old.flush();
        }
        st.redirected = true;
        Ok(())
    }

    /// Flush the log file, if any.
    pub fn flush(&self) {
        if let Some(f) = self.lock().file.as_mut() {
            let _ = f.flush();
        }
    }

    /// Snapshot of the journal.
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().records.clone()
    }

    /// Drain the journal.
    pub fn take_records(&self) -> Vec<LogRecord> {
        std::mem::take(&mut self.lock().records)
    }

    pub fn client_count(&self) -> usize {
        self.lock().clients.len()
    }

    /// False once the last client detached (until the next `register`).
    pub fn is_active(&self) -> bool {
        !self.lock().torn_down
    }
}

/// RAII registration with a `Logger`. Cloning registers a new client;
/// dropping releases this one.
#[derive(Debug)]
pub struct SinkClient {
    logger: Logger,
    id: ClientId,
}

impl SinkClient {
    #[inline]
    pub fn id(&self) -> ClientId {
        self.id
    }

    #[inline]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    #[inline]
    pub fn log(&self, operation: &str, code: ErrorCode) {
        self.logger.log(operation, code);
    }
}

impl Clone for SinkClient {
    fn clone(&self) -> Self {
        self.logger.register()
    }
}

impl Drop for SinkClient {
    fn drop(&mut self) {
        self.logger.release(self.id);
    }
}

/// Log `err` under `operation` if a sink is present.
#[inline]
pub(crate) fn report(sink: Option<&Logger>, operation: &str, err: &GeomError) {
    if let Some(l) = sink {
        l.log(operation, err.code());
    }
}

/// Pass `result` through, logging its error (if any) under `operation`.
#[inline]
pub(crate) fn logged<T>(
    sink: Option<&Logger>,
    operation: &str,
    result: GeomResult<T>,
) -> GeomResult<T> {
    if let Err(e) = &result {
        report(sink, operation, e);
    }
    result
}
