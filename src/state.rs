use crate::stroke::StrokeSession;

/// Whether a pointer interaction is in progress
#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Stroking {
        session: StrokeSession,
    },
}

impl EditorState {
    /// Enters the stroking state, returning any session that was still open
    pub fn begin(&mut self, session: StrokeSession) -> Option<StrokeSession> {
        let previous = self.end();
        *self = Self::Stroking { session };
        previous
    }

    /// Returns to idle, handing back the session that was open
    pub fn end(&mut self) -> Option<StrokeSession> {
        match std::mem::take(self) {
            Self::Stroking { session } => Some(session),
            Self::Idle => None,
        }
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        match self {
            Self::Stroking { session } => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut StrokeSession> {
        match self {
            Self::Stroking { session } => Some(session),
            _ => None,
        }
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self, Self::Stroking { .. })
    }
}
