//! Result carriers for the context-threading kinds.
//!
//! Each carrier pairs the produced value with the context a run produced:
//! accumulated output for Writer, the next state for State, both for RWS.

/// What a State effect produces: the state after the run and the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateResult<S, T> {
    /// State after the run.
    pub state: S,
    /// Produced value.
    pub value: T,
}

impl<S, T> StateResult<S, T> {
    /// Pair a next state with a value.
    pub fn new(state: S, value: T) -> Self {
        StateResult { state, value }
    }

    /// Split into `(state, value)`.
    pub fn into_parts(self) -> (S, T) {
        (self.state, self.value)
    }
}

/// What a Writer effect produces: the value and the output accumulated on
/// the way, in append order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriterResult<W, T> {
    /// Produced value.
    pub value: T,
    /// Accumulated output.
    pub output: W,
}

impl<W, T> WriterResult<W, T> {
    /// Pair a value with its output.
    pub fn new(value: T, output: W) -> Self {
        WriterResult { value, output }
    }

    /// Split into `(value, output)`.
    pub fn into_parts(self) -> (T, W) {
        (self.value, self.output)
    }
}

/// What an RWS effect produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RwsResult<W, S, T> {
    /// Produced value.
    pub value: T,
    /// Accumulated output.
    pub output: W,
    /// State after the run.
    pub state: S,
}

impl<W, S, T> RwsResult<W, S, T> {
    /// Build from all three parts.
    pub fn new(value: T, output: W, state: S) -> Self {
        RwsResult {
            value,
            output,
            state,
        }
    }

    /// Split into `(value, output, state)`.
    pub fn into_parts(self) -> (T, W, S) {
        (self.value, self.output, self.state)
    }
}
