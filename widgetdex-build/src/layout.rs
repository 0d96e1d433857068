//! Makepad checkout layout and discovery of the widgets source directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Environment variable pointing at the root of a Makepad checkout.
pub const MAKEPAD_PATH_ENV: &str = "MAKEPAD_PATH";

/// Relative locations inside a Makepad checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MakepadLayout {
    root: PathBuf,
    widgets_src: PathBuf,
}

impl MakepadLayout {
    /// Layout for a checkout rooted at `root` (widgets in `root/widgets/src`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let widgets_src = root.join("widgets").join("src");
        Self { root, widgets_src }
    }

    /// Layout for a known widgets source directory.
    ///
    /// The checkout root is taken to be two levels up (`<root>/widgets/src`).
    pub fn from_widgets_src(widgets_src: impl Into<PathBuf>) -> Self {
        let widgets_src = widgets_src.into();
        let root = widgets_src
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| widgets_src.clone());
        Self { root, widgets_src }
    }

    /// `$MAKEPAD_PATH` when set and non-empty, otherwise `~/makepad`.
    pub fn from_env() -> Self {
        match std::env::var(MAKEPAD_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::new(path),
            _ => Self::new(default_root()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn widgets_src(&self) -> PathBuf {
        self.widgets_src.clone()
    }

    /// `view.rs`, where most shared `#[live]` properties are declared.
    pub fn view_file(&self) -> PathBuf {
        self.widgets_src.join("view.rs")
    }

    /// `draw/src/cx_2d.rs`, which declares the `Walk` struct.
    pub fn walk_file(&self) -> PathBuf {
        self.root.join("draw").join("src").join("cx_2d.rs")
    }
}

fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("makepad")
}

/// Where a widgets directory was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RootSource {
    Explicit,
    Environment,
    Workspace,
    CargoRegistry,
    CargoGit,
    CommonPath,
    /// Nothing was found; `~/makepad` is assumed.
    Default,
}

impl fmt::Display for RootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "explicit path",
            Self::Environment => MAKEPAD_PATH_ENV,
            Self::Workspace => "workspace",
            Self::CargoRegistry => "cargo registry",
            Self::CargoGit => "cargo git checkout",
            Self::CommonPath => "common development path",
            Self::Default => "default location",
        };
        f.write_str(label)
    }
}

/// Result of [`locate_widgets_src`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located {
    pub layout: MakepadLayout,
    pub source: RootSource,
}

/// Inputs for [`locate_widgets_src`].
#[derive(Debug, Clone, Default)]
pub struct LocateHints {
    /// A checkout root given on the command line or in config.
    pub explicit: Option<PathBuf>,
    /// Value of `MAKEPAD_PATH`.
    pub environment: Option<PathBuf>,
    /// Project directories that may sit next to, or inside, a checkout.
    pub workspaces: Vec<PathBuf>,
    /// Home directory used for Cargo caches and common paths.
    pub home: Option<PathBuf>,
}

impl LocateHints {
    /// Hints from the process environment: `MAKEPAD_PATH`, the current
    /// directory and the user's home directory.
    pub fn from_env() -> Self {
        Self {
            explicit: None,
            environment: std::env::var_os(MAKEPAD_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            workspaces: std::env::current_dir().into_iter().collect(),
            home: dirs::home_dir(),
        }
    }
}

const COMMON_DIRS: &[&str] = &["", "projects", "dev", "code", "Work", "src"];

/// Find a widgets source directory, trying each source in turn.
///
/// Order: explicit path, `MAKEPAD_PATH`, workspace siblings or checkouts,
/// the Cargo registry, Cargo git checkouts, then common development paths.
pub fn locate_widgets_src(hints: &LocateHints) -> Option<Located> {
    let found = |layout: MakepadLayout, source: RootSource| {
        log::debug!("found widgets source via {source}: {}", layout.widgets_src().display());
        Some(Located { layout, source })
    };

    if let Some(root) = &hints.explicit {
        let layout = MakepadLayout::new(root);
        if layout.widgets_src().is_dir() {
            return found(layout, RootSource::Explicit);
        }
    }

    if let Some(root) = &hints.environment {
        let layout = MakepadLayout::new(root);
        if layout.widgets_src().is_dir() {
            return found(layout, RootSource::Environment);
        }
    }

    for workspace in &hints.workspaces {
        if let Some(parent) = workspace.parent() {
            let sibling = MakepadLayout::new(parent.join("makepad"));
            if sibling.widgets_src().is_dir() {
                return found(sibling, RootSource::Workspace);
            }
        }
        let inside = MakepadLayout::new(workspace);
        if inside.widgets_src().is_dir() {
            return found(inside, RootSource::Workspace);
        }
    }

    let home = hints.home.as_deref()?;

    if let Some(widgets_src) = find_in_registry(&home.join(".cargo").join("registry").join("src")) {
        return found(MakepadLayout::from_widgets_src(widgets_src), RootSource::CargoRegistry);
    }

    if let Some(widgets_src) = find_in_git_checkouts(&home.join(".cargo").join("git").join("checkouts")) {
        return found(MakepadLayout::from_widgets_src(widgets_src), RootSource::CargoGit);
    }

    for dir in COMMON_DIRS {
        let layout = MakepadLayout::new(home.join(dir).join("makepad"));
        if layout.widgets_src().is_dir() {
            return found(layout, RootSource::CommonPath);
        }
    }

    log::debug!("no Makepad widgets source found");
    None
}

/// Like [`locate_widgets_src`], but never fails.
///
/// When no checkout exists the layout points at `MAKEPAD_PATH` if given,
/// otherwise `<home>/makepad`. Scanning it then yields an empty catalog.
pub fn locate_or_default(hints: &LocateHints) -> Located {
    if let Some(located) = locate_widgets_src(hints) {
        return located;
    }

    let root = hints
        .explicit
        .clone()
        .or_else(|| hints.environment.clone())
        .or_else(|| hints.home.as_ref().map(|home| home.join("makepad")))
        .unwrap_or_else(default_root);
    log::warn!("no Makepad checkout found, assuming {}", root.display());
    Located {
        layout: MakepadLayout::new(root),
        source: RootSource::Default,
    }
}

/// Sorted subdirectories of `dir`; unreadable or missing directories are empty.
fn subdirs(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<registry>/<index>/makepad-widgets-<version>/src`, newest version name per index.
fn find_in_registry(registry_src: &Path) -> Option<PathBuf> {
    subdirs(registry_src).into_iter().find_map(|index_dir| {
        let newest = subdirs(&index_dir)
            .into_iter()
            .filter(|c| dir_name(c).starts_with("makepad-widgets-"))
            .max_by_key(|c| dir_name(c))?;
        let src = newest.join("src");
        src.is_dir().then_some(src)
    })
}

/// `<checkouts>/*makepad*/<rev>/widgets/src`.
fn find_in_git_checkouts(checkouts: &Path) -> Option<PathBuf> {
    subdirs(checkouts)
        .into_iter()
        .filter(|c| dir_name(c).to_lowercase().contains("makepad"))
        .flat_map(|checkout| subdirs(&checkout))
        .map(|rev| rev.join("widgets").join("src"))
        .find(|src| src.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdirs(path: &Path) {
        fs::create_dir_all(path).unwrap();
    }

    #[test]
    fn test_layout_paths() {
        let layout = MakepadLayout::new("/opt/makepad");
        assert_eq!(layout.widgets_src(), PathBuf::from("/opt/makepad/widgets/src"));
        assert_eq!(layout.view_file(), PathBuf::from("/opt/makepad/widgets/src/view.rs"));
        assert_eq!(layout.walk_file(), PathBuf::from("/opt/makepad/draw/src/cx_2d.rs"));
    }

    #[test]
    fn test_from_widgets_src() {
        let layout = MakepadLayout::from_widgets_src("/opt/makepad/widgets/src");
        assert_eq!(layout.root(), Path::new("/opt/makepad"));
        assert_eq!(layout.widgets_src(), PathBuf::from("/opt/makepad/widgets/src"));
    }

    #[test]
    fn test_locate_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let hints = LocateHints {
            home: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(locate_widgets_src(&hints).is_none());
    }

    #[test]
    fn test_locate_explicit_wins_over_common_path() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        let explicit = temp_dir.path().join("checkout");
        mkdirs(&home.join("makepad/widgets/src"));
        mkdirs(&explicit.join("widgets/src"));

        let hints = LocateHints {
            explicit: Some(explicit.clone()),
            home: Some(home),
            ..Default::default()
        };
        let located = locate_widgets_src(&hints).unwrap();
        assert_eq!(located.source, RootSource::Explicit);
        assert_eq!(located.layout.root(), explicit.as_path());
    }

    #[test]
    fn test_locate_workspace_sibling() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("my_app");
        mkdirs(&project);
        mkdirs(&temp_dir.path().join("makepad/widgets/src"));

        let hints = LocateHints {
            workspaces: vec![project],
            ..Default::default()
        };
        let located = locate_widgets_src(&hints).unwrap();
        assert_eq!(located.source, RootSource::Workspace);
        assert_eq!(located.layout.root(), temp_dir.path().join("makepad").as_path());
    }

    #[test]
    fn test_locate_registry_picks_newest_version() {
        let temp_dir = TempDir::new().unwrap();
        let index = temp_dir.path().join(".cargo/registry/src/index.crates.io-abc");
        mkdirs(&index.join("makepad-widgets-0.6.0/src"));
        mkdirs(&index.join("makepad-widgets-1.0.0/src"));
        mkdirs(&index.join("serde-1.0.0/src"));

        let hints = LocateHints {
            home: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let located = locate_widgets_src(&hints).unwrap();
        assert_eq!(located.source, RootSource::CargoRegistry);
        assert_eq!(located.layout.widgets_src(), index.join("makepad-widgets-1.0.0/src"));
    }

    #[test]
    fn test_locate_git_checkout() {
        let temp_dir = TempDir::new().unwrap();
        let rev = temp_dir.path().join(".cargo/git/checkouts/Makepad-1a2b/abc123");
        mkdirs(&rev.join("widgets/src"));

        let hints = LocateHints {
            home: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let located = locate_widgets_src(&hints).unwrap();
        assert_eq!(located.source, RootSource::CargoGit);
        assert_eq!(located.layout.root(), rev.as_path());
    }

    #[test]
    fn test_locate_or_default_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let hints = LocateHints {
            home: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let located = locate_or_default(&hints);
        assert_eq!(located.source, RootSource::Default);
        assert_eq!(located.layout.root(), temp_dir.path().join("makepad").as_path());

        let hints = LocateHints {
            environment: Some(PathBuf::from("/nowhere/makepad")),
            ..hints
        };
        assert_eq!(locate_or_default(&hints).layout.root(), Path::new("/nowhere/makepad"));
    }

    #[test]
    fn test_locate_common_path() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(&temp_dir.path().join("code/makepad/widgets/src"));

        let hints = LocateHints {
            home: Some(temp_dir.path().to_path_buf()),
            ..Default::default()
        };
        let located = locate_widgets_src(&hints).unwrap();
        assert_eq!(located.source, RootSource::CommonPath);
    }
}
