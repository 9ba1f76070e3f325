use std::fmt;

/// A user-visible message produced by the store.
///
/// The store never shows anything itself; the CLI prints these and the TUI
/// shows them as a transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TaskAdded { text: String },
    LoadError { reason: String },
    SaveError { reason: String },
    ImageError { reason: String },
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::TaskAdded { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TaskAdded { text } => write!(f, "Task added: {}", text),
            Notice::LoadError { reason } => write!(f, "Could not load tasks: {}", reason),
            Notice::SaveError { reason } => write!(f, "Could not save tasks: {}", reason),
            Notice::ImageError { reason } => write!(f, "Could not attach image: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let added = Notice::TaskAdded {
            text: "Buy milk".into(),
        };
        assert_eq!(added.to_string(), "Task added: Buy milk");
        assert!(!added.is_error());

        let failed = Notice::SaveError {
            reason: "disk full".into(),
        };
        assert_eq!(failed.to_string(), "Could not save tasks: disk full");
        assert!(failed.is_error());
    }
}
