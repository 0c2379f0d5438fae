/// The answer to a confirmation prompt for a destructive action.
///
/// Callers ask the user first and pass the answer in, so the mutation itself never prompts.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn from_bool(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// What a confirmation gated action ended up doing.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Outcome {
    Applied,
    /// The user declined, nothing was changed.
    Declined,
}
