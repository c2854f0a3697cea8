//! Terminal input that Ctrl-C can cancel.
//!
//! A blocking `read_line` on stdin is retried after SIGINT, so the signal
//! alone never wakes the prompt. Lines are read on a helper thread instead
//! and handed over a channel that the Ctrl-C handler also writes to; an
//! interrupt shows up to the reader as end of input.

use std::io::{self, BufRead, Read};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Exit status for a Ctrl-C that arrives when nobody is reading input.
pub const SIGINT_EXIT_CODE: i32 = 130;

/// What the input thread or the signal handler reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// One line, terminator included when present.
    Line(Vec<u8>),
    Eof,
    Interrupted,
}

/// `BufRead` over [`InputEvent`]s. `Eof`, `Interrupted` and a closed
/// channel all end the stream.
pub struct InterruptibleInput {
    events: Option<Receiver<InputEvent>>,
    buf: Vec<u8>,
    pos: usize,
    interrupted: bool,
}

impl InterruptibleInput {
    pub fn new(events: Receiver<InputEvent>) -> Self {
        Self {
            events: Some(events),
            buf: Vec::new(),
            pos: 0,
            interrupted: false,
        }
    }

    /// An input fed by hand through the returned sender.
    pub fn channel() -> (Sender<InputEvent>, Self) {
        let (tx, rx) = channel();
        (tx, Self::new(rx))
    }

    /// Process stdin plus a Ctrl-C handler.
    ///
    /// Once the stream has ended the receiver is dropped, and a later Ctrl-C
    /// exits the process with [`SIGINT_EXIT_CODE`].
    pub fn stdin() -> Result<Self> {
        let (tx, input) = Self::channel();

        let interrupt_tx = tx.clone();
        ctrlc::set_handler(move || {
            if interrupt_tx.send(InputEvent::Interrupted).is_err() {
                std::process::exit(SIGINT_EXIT_CODE);
            }
        })
        .context("Failed to install Ctrl-C handler")?;

        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || forward_lines(io::stdin().lock(), tx))
            .context("Failed to spawn stdin reader")?;

        Ok(input)
    }

    /// Whether the stream was ended by an interrupt.
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    fn finish(&mut self) {
        self.events = None;
        self.buf.clear();
        self.pos = 0;
    }
}

/// Send each line of `reader` until end of input or the receiver goes away.
fn forward_lines(mut reader: impl BufRead, tx: Sender<InputEvent>) {
    loop {
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                let _ = tx.send(InputEvent::Eof);
                return;
            }
            Ok(_) => {
                if tx.send(InputEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                let _ = tx.send(InputEvent::Eof);
                return;
            }
        }
    }
}

impl BufRead for InterruptibleInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        while self.pos >= self.buf.len() {
            let Some(events) = &self.events else {
                return Ok(&[]);
            };
            match events.recv() {
                Ok(InputEvent::Line(line)) => {
                    self.buf = line;
                    self.pos = 0;
                }
                Ok(InputEvent::Interrupted) => {
                    debug!("Input interrupted");
                    self.interrupted = true;
                    self.finish();
                }
                Ok(InputEvent::Eof) | Err(_) => self.finish(),
            }
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

impl Read for InterruptibleInput {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}
