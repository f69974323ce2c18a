use std::path::{Path, PathBuf};

/// The user's download folder, or the closest thing to it this platform has.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Holds the folder converted files are written to.
///
/// Cancelling the folder picker does not keep a previously chosen folder; it
/// falls back to the default download folder.
#[derive(Debug, Clone)]
pub struct DestinationResolver {
    current: PathBuf,
    default: PathBuf,
}

impl DestinationResolver {
    pub fn new() -> Self {
        Self::with_default(default_output_dir())
    }

    pub fn with_default(default: PathBuf) -> Self {
        Self { current: default.clone(), default }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    pub fn is_default(&self) -> bool {
        self.current == self.default
    }

    pub fn apply_selection(&mut self, selection: Option<PathBuf>) {
        match selection {
            Some(dir) if !dir.as_os_str().is_empty() => {
                log::info!("Output directory set to {}", dir.display());
                self.current = dir;
            }
            _ => {
                log::info!("Folder selection cancelled, using {}", self.default.display());
                self.current = self.default.clone();
            }
        }
    }

    pub fn choose(&mut self) {
        let selection = rfd::FileDialog::new()
            .set_title("Choose output folder")
            .set_directory(&self.current)
            .pick_folder();
        self.apply_selection(selection);
    }

    pub fn label(&self) -> String {
        format!("Output Directory: {}", self.current.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default() {
        let resolver = DestinationResolver::with_default(PathBuf::from("/home/me/Downloads"));
        assert_eq!(resolver.current(), Path::new("/home/me/Downloads"));
        assert!(resolver.is_default());
    }

    #[test]
    fn selection_replaces_destination() {
        let mut resolver = DestinationResolver::with_default(PathBuf::from("/dl"));
        resolver.apply_selection(Some(PathBuf::from("/photos/out")));

        assert_eq!(resolver.current(), Path::new("/photos/out"));
        assert!(!resolver.is_default());
        assert_eq!(resolver.label(), "Output Directory: /photos/out");
    }

    #[test]
    fn cancel_discards_custom_folder() {
        let mut resolver = DestinationResolver::with_default(PathBuf::from("/dl"));
        resolver.apply_selection(Some(PathBuf::from("/custom")));
        resolver.apply_selection(None);

        assert_eq!(resolver.current(), Path::new("/dl"));
        assert!(resolver.is_default());
    }

    #[test]
    fn empty_selection_counts_as_cancel() {
        let mut resolver = DestinationResolver::with_default(PathBuf::from("/dl"));
        resolver.apply_selection(Some(PathBuf::from("/custom")));
        resolver.apply_selection(Some(PathBuf::new()));

        assert_eq!(resolver.current(), Path::new("/dl"));
    }

    #[test]
    fn default_dir_is_never_empty() {
        assert!(!default_output_dir().as_os_str().is_empty());
    }
}
