//! Opening saved files in the platform's default viewer.
//!
//! This is a fire-and-forget side effect kept behind the [`Viewer`] trait so
//! the store itself never spawns processes.

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use classkv_format::TextValue;
use tracing::{debug, warn};

use crate::error::Result;
use crate::persist::SaveOptions;
use crate::store::ClassStore;

/// Something that can show a file to the user.
///
/// Opening is best-effort: implementations report nothing back.
pub trait Viewer {
    /// Ask for `path` to be opened.
    fn open(&self, path: &Path);
}

/// Opens files with the operating system's default handler.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemViewer;

impl SystemViewer {
    /// The launcher command for the current platform.
    pub fn command(path: &Path) -> Command {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // The empty argument is the window title `start` expects first.
            cmd.args(["/C", "start", ""]);
            cmd
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(path);
        cmd
    }
}

impl Viewer for SystemViewer {
    fn open(&self, path: &Path) {
        let spawned = Self::command(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to launch viewer");
                return;
            }
        };
        debug!(pid = child.id(), path = %path.display(), "launched viewer");

        // Reap the launcher off the caller's thread so it does not linger as
        // a zombie.
        thread::spawn(move || match child.wait() {
            Ok(status) => debug!(%status, "viewer launcher exited"),
            Err(e) => warn!(error = %e, "failed to wait for viewer launcher"),
        });
    }
}

/// Open `path` with the system viewer.
pub fn open_file(path: impl AsRef<Path>) {
    SystemViewer.open(path.as_ref());
}

/// Save one class to `path`, then show the file with `viewer`.
///
/// The viewer is only asked to open the file once the save succeeded.
pub fn save_and_view<T: TextValue>(
    store: &ClassStore<T>,
    class: &str,
    path: impl AsRef<Path>,
    options: &SaveOptions,
    viewer: &dyn Viewer,
) -> Result<()> {
    let path = path.as_ref();
    store.save_class(class, path, options)?;
    viewer.open(path);
    Ok(())
}
