//! Request lifecycle state shared by every panel

/// State of a read query held by a component
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState<T> {
    /// Not yet requested
    #[default]
    Idle,
    /// First fetch in flight, nothing to show yet
    Loading,
    /// Last fetch succeeded
    Ready(T),
    /// Last fetch failed; the data is from an earlier success
    Stale { data: T, error: String },
    /// Last fetch failed and there was no earlier data
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) | QueryState::Stale { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Error of the last fetch, if it failed
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(error) | QueryState::Stale { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Idle | QueryState::Loading)
    }

    /// Enter loading unless data is already on screen
    pub fn begin(&mut self) {
        if self.data().is_none() {
            *self = QueryState::Loading;
        }
    }

    /// Apply a completed fetch; a failed refetch keeps earlier data next to the error
    pub fn settle(&mut self, result: Result<T, String>) {
        let error = match result {
            Ok(data) => {
                *self = QueryState::Ready(data);
                return;
            }
            Err(error) => error,
        };
        *self = match std::mem::replace(self, QueryState::Idle) {
            QueryState::Ready(data) | QueryState::Stale { data, .. } => {
                QueryState::Stale { data, error }
            }
            _ => QueryState::Failed(error),
        };
    }
}

/// In-flight status of one mutation kind
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }
}
