//! The scanning state machine.
//!
//! One pass, one cursor, four states. Each decoded character is classified
//! and fed to the current state, which either absorbs it into the open run
//! or closes the run and opens a new one:
//!
//! | State   | Breaker          | Latin            | CJK              |
//! |---------|------------------|------------------|------------------|
//! | Begin   | open breaker run | open Latin run   | open CJK run     |
//! | Breaker | absorb           | close, open      | close, open      |
//! | Latin   | close, open      | absorb           | close, open      |
//! | CJK     | close, open      | absorb           | absorb           |
//!
//! A CJK run absorbs Latin characters but a Latin run is broken by a CJK
//! character. After the last byte a synthetic space at `input.len()` flushes
//! whatever run is still open.
//!
//! Production is pull-based. A single step can yield several tokens (a Latin
//! word and a marker, or every window of a CJK run), so the tokenizer holds
//! at most one pending marker and one partially drained n-gram run, and
//! hands them out before scanning further.

use std::iter::FusedIterator;
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::class::RuneClass;
use crate::cursor::{Cursor, Decoded};
use crate::latin;
use crate::markers::PositionClock;
use crate::ngram::NgramWindows;
use crate::token::{PayloadBuf, Token};

/// Kind of the run currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Nothing scanned yet.
    Begin,
    Breaker,
    Latin,
    Cjk,
}

/// How a [`Tokenizer::drive`] call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The whole input was scanned and flushed.
    Finished,
    /// The consumer stopped production early.
    Stopped,
}

/// Lazy tokenizer over one input buffer.
///
/// Iterate it to pull tokens. Dropping it, calling [`stop`](Self::stop), or
/// breaking out of [`drive`](Self::drive) ends the scan: nothing further is
/// classified, built, or flushed. One instance covers one input, once; build
/// a new one to start over.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    state: State,
    /// Byte offset where the open run started.
    run_start: usize,
    clock: PositionClock,
    /// Marker produced by the last advance, handed out next.
    pending_marker: Option<Token>,
    /// Windows of a closed CJK run still being handed out.
    ngrams: Option<NgramWindows<'a>>,
    /// The synthetic trailing breaker has been fed.
    flushed: bool,
    /// Input exhausted and every run flushed.
    done: bool,
    /// The consumer asked to stop.
    stopped: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    ///
    /// The input is expected to be UTF-8. Bytes that do not decode are
    /// treated as breakers, one byte at a time.
    pub fn new<T: AsRef<[u8]> + ?Sized>(input: &'a T) -> Self {
        Self {
            cursor: Cursor::new(input.as_ref()),
            state: State::Begin,
            run_start: 0,
            clock: PositionClock::new(),
            pending_marker: None,
            ngrams: None,
            flushed: false,
            done: false,
            stopped: false,
        }
    }

    /// Byte offset of the scan cursor.
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    /// The logical position the next content token would carry.
    pub fn position(&self) -> i64 {
        self.clock.current()
    }

    /// Stop production. Every later call to `next` returns `None`.
    pub fn stop(&mut self) {
        if !self.stopped && !self.done {
            debug!(offset = self.offset(), "tokenizer stopped by consumer");
        }
        self.stopped = true;
    }

    /// Returns `true` once no further tokens will be produced.
    pub fn is_done(&self) -> bool {
        self.done || self.stopped
    }

    /// Push every token to `f` until the input ends or `f` breaks.
    ///
    /// Breaking stops the tokenizer exactly like [`stop`](Self::stop).
    pub fn drive(&mut self, mut f: impl FnMut(Token) -> ControlFlow<()>) -> Completion {
        while let Some(token) = self.next() {
            if f(token).is_break() {
                self.stop();
            }
        }
        if self.stopped {
            Completion::Stopped
        } else {
            Completion::Finished
        }
    }

    // ─── Dispatch ──────────────────────────────────────────────────────

    /// Feed one classified character at `offset` to the current state.
    ///
    /// Returns the Latin token if one was closed. Markers and n-grams are
    /// queued on `self`.
    fn step(&mut self, offset: usize, class: RuneClass) -> Option<Token> {
        match self.state {
            State::Begin => {
                self.open_run(offset, class);
                None
            }
            State::Breaker => {
                if !class.is_breaker() {
                    self.close_breaker_run(offset);
                    self.open_run(offset, class);
                }
                None
            }
            State::Latin => {
                if class == RuneClass::Latin {
                    return None;
                }
                let token = self.close_latin_run(offset);
                self.open_run(offset, class);
                token
            }
            State::Cjk => {
                if class.is_breaker() {
                    self.close_cjk_run(offset);
                    self.open_run(offset, class);
                }
                None
            }
        }
    }

    fn open_run(&mut self, offset: usize, class: RuneClass) {
        self.run_start = offset;
        self.state = match class {
            RuneClass::Breaker => State::Breaker,
            RuneClass::Latin => State::Latin,
            RuneClass::Cjk => State::Cjk,
        };
    }

    // ─── Run Handlers ──────────────────────────────────────────────────

    /// A lone ASCII space is free; any other breaker run costs one slot.
    fn close_breaker_run(&mut self, offset: usize) {
        let lone_space =
            offset == self.run_start + 1 && self.cursor.byte_at(self.run_start) == Some(b' ');
        if !lone_space {
            self.pending_marker = self.clock.advance(offset);
        }
    }

    /// Normalize the run; emit it if more than one byte survives. The slot is
    /// consumed either way.
    fn close_latin_run(&mut self, offset: usize) -> Option<Token> {
        let raw = self.cursor.slice(self.run_start, offset);
        let token = latin::normalize(raw).map(|payload| payload.into_token(self.clock.current()));
        if token.is_none() {
            trace!(start = self.run_start, offset, "latin run too short, slot skipped");
        }
        self.pending_marker = self.clock.advance(offset);
        token
    }

    fn close_cjk_run(&mut self, offset: usize) {
        trace!(start = self.run_start, offset, "cjk run closed");
        let run = self.cursor.slice(self.run_start, offset);
        self.ngrams = Some(NgramWindows::new(run, self.run_start));
    }

    /// Hand out the next window of the open n-gram run, one slot each.
    fn next_ngram(&mut self) -> Option<Token> {
        let windows = self.ngrams.as_mut()?;
        let Some(gram) = windows.next() else {
            self.ngrams = None;
            return None;
        };
        let mut payload = PayloadBuf::new();
        let fits = payload.push_slice(gram.bytes);
        debug_assert!(fits, "n-gram of {} bytes exceeds token size", gram.bytes.len());
        let token = payload.into_token(self.clock.current());
        self.pending_marker = self.clock.advance(gram.offset);
        Some(token)
    }

    // ─── End of Input ──────────────────────────────────────────────────

    /// Feed the synthetic trailing space once, then finish.
    fn flush(&mut self) -> Option<Token> {
        let end = self.cursor.source_len();
        if self.flushed || end == 0 {
            self.done = true;
            trace!(
                bytes = end,
                positions = self.clock.current(),
                "scan complete"
            );
            return None;
        }
        self.flushed = true;
        self.step(end, RuneClass::Breaker)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.stopped || self.done {
                return None;
            }
            if let Some(marker) = self.pending_marker.take() {
                return Some(marker);
            }
            if let Some(token) = self.next_ngram() {
                return Some(token);
            }

            let token = if self.cursor.is_eof() {
                self.flush()
            } else {
                self.cursor
                    .bump()
                    .and_then(|Decoded { offset, ch }| self.step(offset, RuneClass::of(ch)))
            };
            if token.is_some() {
                return token;
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Tokenize `input` to completion.
pub fn tokenize<T: AsRef<[u8]> + ?Sized>(input: &T) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
