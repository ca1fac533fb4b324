//! Text shown to the user for a failed call.

use outcome_core::ErrorInfo;

pub fn describe(err: &ErrorInfo) -> String {
    match err {
        ErrorInfo::Service(err) => format!("{} : {}", err.code, err.message),
        ErrorInfo::Transport(err) => format!("network error : {}", err.message),
    }
}
