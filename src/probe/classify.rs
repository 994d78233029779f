use crate::catalog::{ErrorSignal, ErrorStrategy};

/// Decide whether a response means the account exists.
///
/// `body` is only consulted for the message strategy. An error phrase in the
/// body means the account is absent; no phrase means it exists.
pub fn classify(strategy: &ErrorStrategy, signal: Option<&ErrorSignal>, status: u16, body: Option<&str>) -> bool {
    match strategy {
        ErrorStrategy::StatusCode => status == 200,
        ErrorStrategy::Message => match (signal, body) {
            (Some(signal), Some(body)) => !signal.matches(body),
            _ => false,
        },
        ErrorStrategy::Unknown(_) => false,
    }
}
