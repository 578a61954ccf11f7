use std::fmt;

/// Stages a REGISTER passes through.
///
/// The path is linear. A rejection jumps straight to `Responding`, and a
/// failed store call does not change the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineState {
    Received,
    /// Transaction identifier (Via branch)
    Extracting,
    /// Identity, contact, CSeq, Call-ID and From tag
    Validating,
    Persisting,
    Responding,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Received => "received",
            PipelineState::Extracting => "extracting",
            PipelineState::Validating => "validating",
            PipelineState::Persisting => "persisting",
            PipelineState::Responding => "responding",
            PipelineState::Done => "done",
        };
        f.write_str(name)
    }
}
