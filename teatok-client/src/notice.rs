#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message for the user, shown as a toast by the web app
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub description: String,
}

impl Notice {
    pub fn success(description: impl Into<String>) -> Notice {
        Notice {
            kind: NoticeKind::Success,
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Notice {
        Notice {
            kind: NoticeKind::Error,
            description: description.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
