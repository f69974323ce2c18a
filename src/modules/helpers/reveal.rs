use std::io;
use std::path::Path;
use std::process::Command;
use std::thread;

pub trait FolderRevealer: Send + Sync {
    fn reveal(&self, path: &Path);
}

/// Opens a folder in the platform file manager. The caller never waits on the
/// child; a detached thread reaps it. A failed launch is only logged.
pub struct SystemRevealer;

impl SystemRevealer {
    fn command(path: &Path) -> Command {
        #[cfg(target_os = "windows")]
        let program = "explorer";
        #[cfg(target_os = "macos")]
        let program = "open";
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        let program = "xdg-open";

        let mut cmd = Command::new(program);
        cmd.arg(path);
        cmd
    }

    fn launch(mut cmd: Command) -> io::Result<()> {
        let mut child = cmd.spawn()?;
        thread::spawn(move || {
            if let Err(e) = child.wait() {
                log::debug!("File manager process was not reaped: {}", e);
            }
        });
        Ok(())
    }
}

impl FolderRevealer for SystemRevealer {
    fn reveal(&self, path: &Path) {
        match Self::launch(Self::command(path)) {
            Ok(()) => log::debug!("Opened {} in file manager", path.display()),
            Err(e) => log::warn!("Could not open {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_targets_the_folder() {
        let cmd = SystemRevealer::command(Path::new("/tmp/out"));
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("/tmp/out")]);
    }

    #[test]
    fn missing_program_is_reported_not_raised() {
        let result = SystemRevealer::launch(Command::new("definitely-not-a-file-manager-binary"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn launch_returns_without_waiting_on_the_child() {
        assert!(SystemRevealer::launch(Command::new("true")).is_ok());
    }
}
