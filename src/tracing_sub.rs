use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Where log lines go.
///
/// The terminal UI owns stdout and stderr while it runs, so interactive
/// sessions log to a file or nowhere; headless runs use stderr.
#[derive(Clone, Debug)]
pub enum LogTarget {
    Stderr,
    File(Arc<Mutex<File>>),
    Discard,
}

impl LogTarget {
    pub fn file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogTarget::File(Arc::new(Mutex::new(file))))
    }
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
    Discard,
}

impl DelegatingWriter {
    fn new(target: &LogTarget) -> Self {
        let inner = match target {
            LogTarget::File(file) => DelegatingInner::File(Arc::clone(file)),
            LogTarget::Stderr => DelegatingInner::Stderr(io::stderr()),
            LogTarget::Discard => DelegatingInner::Discard,
        };
        DelegatingWriter { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => match f.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Ok(buf.len()),
            },
            DelegatingInner::Stderr(s) => s.write(buf),
            DelegatingInner::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => match f.lock() {
                Ok(mut file) => file.flush(),
                Err(_) => Ok(()),
            },
            DelegatingInner::Stderr(s) => s.flush(),
            DelegatingInner::Discard => Ok(()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubscriberMakeWriter {
    target: LogTarget,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new(&self.target)
    }
}

/// Initialize the global tracing subscriber. Safe to call multiple times;
/// subsequent calls are no-ops.
pub fn init(level: Level, target: LogTarget) {
    let ansi = matches!(target, LogTarget::Stderr);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter { target })
        .with_ansi(ansi)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn file_target_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip-format.log");
        let target = LogTarget::file(&path).unwrap();
        let mut w = DelegatingWriter::new(&target);
        w.write_all(b"one\n").unwrap();
        let mut w2 = DelegatingWriter::new(&target);
        w2.write_all(b"two\n").unwrap();
        w2.flush().unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn discard_swallows_everything() {
        let mut w = DelegatingWriter::new(&LogTarget::Discard);
        assert_eq!(w.write(b"ignored").unwrap(), 7);
        w.flush().unwrap();
    }
}
