use super::signal::HostSignal;

/// Trait for systems that react to host lifecycle signals.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &HostSignal);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[HostSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
