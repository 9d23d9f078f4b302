/// Which prompt an interactive consumer should show next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    StartExpression,
    ContinueExpression,
}

impl ReadyState {
    /// State after a fragment has been framed.
    ///
    /// | state    | partial | blank | next     |
    /// |----------|---------|-------|----------|
    /// | Start    | false   | false | Start    |
    /// | Start    | false   | true  | invalid  |
    /// | Start    | true    | false | Continue |
    /// | Start    | true    | true  | Start    |
    /// | Continue | false   | any   | Start    |
    /// | Continue | true    | any   | Continue |
    pub fn next(self, is_partial: bool, is_blank: bool) -> ReadyState {
        match self {
            ReadyState::StartExpression => {
                debug_assert!(
                    is_partial || !is_blank,
                    "a complete statement always holds its terminator"
                );
                if is_partial && !is_blank {
                    ReadyState::ContinueExpression
                } else {
                    ReadyState::StartExpression
                }
            }
            ReadyState::ContinueExpression => {
                if is_partial {
                    ReadyState::ContinueExpression
                } else {
                    ReadyState::StartExpression
                }
            }
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            ReadyState::StartExpression => "Ready>",
            ReadyState::ContinueExpression => ">",
        }
    }
}
