#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn title(&self) -> &str {
        match self {
            NoticeLevel::Info => "Success",
            NoticeLevel::Warning => "Warning",
            NoticeLevel::Error => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Non-blocking messages waiting for the user to dismiss them.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice { id, level, message: message.into() });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn dismiss_all(&mut self) {
        self.notices.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_keep_arrival_order() {
        let mut board = NoticeBoard::new();
        board.warning("a.txt is not a HEIC file.");
        board.error("Failed to convert b.heic");
        board.info("Done");

        let levels: Vec<NoticeLevel> = board.iter().map(|n| n.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Warning, NoticeLevel::Error, NoticeLevel::Info]);
    }

    #[test]
    fn dismiss_removes_only_that_notice() {
        let mut board = NoticeBoard::new();
        board.warning("first");
        board.warning("second");
        let first = board.iter().next().unwrap().id;

        board.dismiss(first);

        assert_eq!(board.len(), 1);
        assert_eq!(board.iter().next().unwrap().message, "second");
    }

    #[test]
    fn ids_are_not_reused_after_dismiss() {
        let mut board = NoticeBoard::new();
        board.info("one");
        let id = board.iter().next().unwrap().id;
        board.dismiss_all();
        board.info("two");

        assert!(board.iter().all(|n| n.id != id));
    }
}
