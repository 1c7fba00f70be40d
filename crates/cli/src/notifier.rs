use notescribe_core::pipeline::notifier::Notifier;

/// Prints notices to stderr and mirrors them to the log. Stage timings go
/// to the log only.
pub struct TerminalNotifier {
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for TerminalNotifier {
    fn notice(&mut self, message: &str) {
        log::info!("{message}");
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        log::debug!("{stage:12}: {duration_ms:8.1}ms");
    }
}
