use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::Receiver;

use crate::transcription::domain::transcription_invoker::{
    TranscriptionError, TranscriptionInvoker,
};

/// Messages sent from the worker thread to the waiting pipeline.
#[derive(Debug)]
pub enum WorkerMessage {
    Complete,
    Error(TranscriptionError),
    Cancelled,
}

/// Spawn a background transcription worker. Setting `cancelled` asks the
/// invoker to stop (and kill its child process).
pub fn spawn(
    invoker: Arc<dyn TranscriptionInvoker>,
    audio_path: PathBuf,
    cancelled: Arc<AtomicBool>,
) -> Receiver<WorkerMessage> {
    let (tx, rx) = crossbeam_channel::bounded::<WorkerMessage>(1);

    thread::spawn(move || {
        let message = match invoker.invoke(&audio_path, &cancelled) {
            Ok(()) => WorkerMessage::Complete,
            Err(TranscriptionError::Cancelled) => WorkerMessage::Cancelled,
            Err(e) => WorkerMessage::Error(e),
        };
        let _ = tx.send(message);
    });

    rx
}

/// Blocks until the worker reports. A worker that dies without reporting
/// (e.g. a panicking invoker) yields `WorkerLost`.
pub fn wait(rx: &Receiver<WorkerMessage>) -> Result<(), TranscriptionError> {
    match rx.recv() {
        Ok(WorkerMessage::Complete) => Ok(()),
        Ok(WorkerMessage::Cancelled) => Err(TranscriptionError::Cancelled),
        Ok(WorkerMessage::Error(e)) => Err(e),
        Err(_) => Err(TranscriptionError::WorkerLost),
    }
}

/// Runs `invoker` on a worker thread and waits for it.
pub fn run(
    invoker: Arc<dyn TranscriptionInvoker>,
    audio_path: PathBuf,
    cancelled: Arc<AtomicBool>,
) -> Result<(), TranscriptionError> {
    wait(&spawn(invoker, audio_path, cancelled))
}
