/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines progress reporting messages, sinks, and helper functions for solver events.
//
// Created on: 18 Oct 2026     Author: Daniel Owen
//
// Copyright (c) 2026, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License.
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Progress reporting primitives for setup, solve and fitting.
//!
//! The library never prints. Attach a [`ProgressSink`] to a solver or an
//! interpolant to receive [`ProgressMsg`] events, for example via
//! [`closure_sink`], which runs a handler on a listener thread.

use crate::linalg::FactorisationKind;
use std::fmt::Debug;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Progress events emitted by the direct solver and the interpolant.
#[derive(Debug, Clone)]
pub enum ProgressMsg {
    /// The polynomial reference points were chosen.
    ///
    /// `fallback` is `true` when the first points of the random permutation
    /// were not unisolvent and a pivoted QR selection was used instead.
    ReferencePointsSelected { num_reference_points: usize, fallback: bool },

    /// The system matrix was factored.
    Factorised {
        method: FactorisationKind,
        size: usize,
        precision: &'static str,
        elapsed: Duration,
    },

    /// Back-substitution finished for `num_columns` value columns.
    Solved { num_columns: usize, elapsed: Duration },

    /// Arbitrary informational message.
    Message { message: String },
}

/// Sink that consumes progress messages.
pub trait ProgressSink: Send + Sync + Debug {
    fn emit(&self, msg: ProgressMsg);
}

/// Progress sink that forwards messages over a channel.
#[derive(Debug)]
pub struct ClosureSink {
    tx: mpsc::SyncSender<ProgressMsg>,
}

impl ProgressSink for ClosureSink {
    #[inline]
    fn emit(&self, msg: ProgressMsg) {
        let _ = self.tx.try_send(msg);
    }
}

/// Spawns a listener thread that runs a handler closure for each progress message.
///
/// The listener exits once every clone of the returned sink has been dropped.
/// Messages are dropped rather than blocking the solver when `buffer` is full.
pub fn closure_sink<F>(
    buffer: usize,
    mut handler: F,
) -> (Arc<dyn ProgressSink>, thread::JoinHandle<()>)
where
    F: FnMut(ProgressMsg) + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<ProgressMsg>(buffer.max(1));
    let sink: Arc<dyn ProgressSink> = Arc::new(ClosureSink { tx });

    let handle = thread::spawn(move || {
        while let Ok(msg) = rx.recv() {
            handler(msg);
        }
    });

    (sink, handle)
}

/// Emits `msg` if a sink is attached; builds the message lazily.
#[inline]
pub(crate) fn emit_with<F>(sink: &Option<Arc<dyn ProgressSink>>, msg: F)
where
    F: FnOnce() -> ProgressMsg,
{
    if let Some(sink) = sink {
        sink.emit(msg());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSink {
        messages: Mutex<Vec<ProgressMsg>>,
    }

    impl ProgressSink for RecordingSink {
        fn emit(&self, msg: ProgressMsg) {
            self.messages.lock().unwrap().push(msg);
        }
    }

    #[test]
    fn closure_sink_forwards_messages() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();

        let (sink, handle) = closure_sink(8, move |msg| {
            if let ProgressMsg::Message { message } = msg {
                received_clone.lock().unwrap().push(message);
            }
        });

        sink.emit(ProgressMsg::Message {
            message: "first".to_string(),
        });
        sink.emit(ProgressMsg::Message {
            message: "second".to_string(),
        });

        drop(sink);
        handle.join().unwrap();

        assert_eq!(*received.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn emit_with_is_lazy_without_sink() {
        let none: Option<Arc<dyn ProgressSink>> = None;
        emit_with(&none, || panic!("message built without a sink"));

        let recording = Arc::new(RecordingSink::default());
        let some: Option<Arc<dyn ProgressSink>> = Some(recording.clone());
        emit_with(&some, || ProgressMsg::Solved {
            num_columns: 2,
            elapsed: Duration::from_millis(1),
        });

        assert_eq!(recording.messages.lock().unwrap().len(), 1);
    }
}
