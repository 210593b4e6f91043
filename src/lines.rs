use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use regex::Regex;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{HostnameError, Result};

const FILE_MODE: u32 = 0o644;

/// `FileOwner` is the numeric owner and group applied to every rewritten file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOwner {
    pub uid: u32,
    pub gid: u32,
}

#[cfg(unix)]
impl FileOwner {
    /// `root` resolves the owner `root:<group>`. An unknown group falls back
    /// to gid 0.
    pub fn root(group: &str) -> io::Result<Self> {
        let gid = nix::unistd::Group::from_name(group)?
            .map(|group| group.gid.as_raw())
            .unwrap_or(0);
        Ok(FileOwner { uid: 0, gid })
    }
}

/// `ensure_line` makes `desired` the only line of `path` matching `pattern`.
///
/// Lines matching `pattern` are dropped and `desired` is appended; every other
/// line keeps its position and content. When the file already holds `desired`
/// as its single matching line nothing is written. A missing file is treated
/// as empty. Returns whether the file was rewritten.
///
/// `desired` is expected to match `pattern` itself, otherwise the call only
/// guarantees that `desired` is present.
pub fn ensure_line(
    path: &Path,
    pattern: &str,
    desired: &str,
    owner: Option<&FileOwner>,
) -> Result<bool> {
    let regex = Regex::new(pattern).map_err(|source| HostnameError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let line_replace_error = |source| HostnameError::LineReplace {
        path: path.to_path_buf(),
        pattern: pattern.to_string(),
        source: Box::new(source),
    };

    let current = read_optional(path)
        .map_err(line_replace_error)?
        .unwrap_or_default();
    let lines: Vec<&str> = current.lines().collect();

    let converged = if regex.is_match(desired) {
        let matching: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| regex.is_match(line))
            .collect();
        matching == [desired]
    } else {
        lines.contains(&desired)
    };
    if converged {
        debug!("{} already contains `{}`", path.display(), desired);
        return Ok(false);
    }

    let mut content: Vec<&str> = lines
        .into_iter()
        .filter(|line| !regex.is_match(line))
        .collect();
    content.push(desired);
    let content = content.join("\n") + "\n";

    write_atomic(path, &content, owner).map_err(line_replace_error)?;
    info!("replaced lines matching `{}` in {} with `{}`", pattern, path.display(), desired);
    Ok(true)
}

/// `ensure_content` overwrites `path` with `content` unless it already holds
/// exactly that content. Returns whether the file was rewritten.
pub fn ensure_content(path: &Path, content: &str, owner: Option<&FileOwner>) -> Result<bool> {
    if read_optional(path)?.as_deref() == Some(content) {
        debug!("{} is up to date", path.display());
        return Ok(false);
    }

    write_atomic(path, content, owner)?;
    info!("wrote {}", path.display());
    Ok(true)
}

/// `write_atomic` writes `content` to a temporary file next to `path`, applies
/// mode `0644` and the optional owner, and renames it over `path`, so readers
/// observe either the old or the new file.
pub fn write_atomic(path: &Path, content: &str, owner: Option<&FileOwner>) -> Result<()> {
    let write_error = |source: io::Error| HostnameError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(write_error)?;
    temp_file.as_file().sync_all().map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(FILE_MODE))
            .map_err(write_error)?;

        if let Some(owner) = owner {
            nix::unistd::chown(
                temp_file.path(),
                Some(nix::unistd::Uid::from_raw(owner.uid)),
                Some(nix::unistd::Gid::from_raw(owner.gid)),
            )
            .map_err(|errno| write_error(io::Error::from(errno)))?;
        }
    }
    #[cfg(not(unix))]
    let _ = (owner, FILE_MODE);

    temp_file
        .persist(path)
        .map_err(|err| write_error(err.error))?;
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(HostnameError::FileRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}
