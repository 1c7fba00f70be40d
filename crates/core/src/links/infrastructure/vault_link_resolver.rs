use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::links::domain::file_ref::FileRef;
use crate::links::domain::link_resolver::LinkResolver;

/// Resolves note links against a vault directory on the local filesystem.
///
/// Resolution order:
/// 1. `./` and `../` references relative to the linking note's folder
/// 2. Vault-relative path, then a path relative to the note's folder
/// 3. Shortest-path match: any vault file whose path ends with the reference.
///    A file in the note's own folder wins, otherwise the one with the
///    fewest path segments.
///
/// References never resolve outside the vault root. Hidden entries
/// (dot-files and dot-folders) are not searched.
#[derive(Debug)]
pub struct VaultLinkResolver {
    root: PathBuf,
}

impl VaultLinkResolver {
    pub fn new(root: &Path) -> io::Result<Self> {
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Vault root is not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vault-relative, `/`-separated path of `path`, or `None` if it lies
    /// outside the vault.
    pub fn vault_relative(&self, path: &Path) -> Option<String> {
        let absolute = path.canonicalize().ok()?;
        let relative = absolute.strip_prefix(&self.root).ok()?;
        let segments: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }

    fn existing_file(&self, relative: &str) -> Option<FileRef> {
        let absolute = self.root.join(relative);
        if absolute.is_file() {
            Some(FileRef::local(relative, absolute))
        } else {
            None
        }
    }

    fn shortest_path_match(&self, reference: &str, note_dir: &str) -> Option<FileRef> {
        let wanted = reference.to_lowercase();
        let suffix = format!("/{wanted}");

        let mut candidates: Vec<String> = Vec::new();
        collect_files(&self.root, "", &mut candidates);
        candidates.retain(|path| {
            let lower = path.to_lowercase();
            lower == wanted || lower.ends_with(&suffix)
        });

        if let Some(local) = candidates.iter().find(|p| parent_of(p) == note_dir) {
            return self.existing_file(local);
        }

        candidates.sort_by(|a, b| {
            segment_count(a)
                .cmp(&segment_count(b))
                .then_with(|| a.cmp(b))
        });
        if candidates.len() > 1 {
            log::debug!(
                "Link '{reference}' matches {} files, using {}",
                candidates.len(),
                candidates[0]
            );
        }
        candidates.first().and_then(|p| self.existing_file(p))
    }
}

impl LinkResolver for VaultLinkResolver {
    fn resolve_reference(&self, reference: &str, relative_to: &str) -> Option<FileRef> {
        let reference = reference.trim().replace("%20", " ");
        if reference.is_empty() {
            return None;
        }
        let note_dir = parent_of(relative_to);

        if reference.starts_with("./") || reference.starts_with("../") {
            return normalize(&join(note_dir, &reference)).and_then(|p| self.existing_file(&p));
        }

        let vault_path = reference.trim_start_matches('/');
        if let Some(file) = normalize(vault_path).and_then(|p| self.existing_file(&p)) {
            return Some(file);
        }
        if let Some(file) = normalize(&join(note_dir, vault_path)).and_then(|p| self.existing_file(&p))
        {
            return Some(file);
        }

        let normalized = normalize(vault_path)?;
        self.shortest_path_match(&normalized, note_dir)
    }
}

fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Skipping unreadable folder {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let relative = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        match entry.file_type() {
            Ok(t) if t.is_dir() => collect_files(&entry.path(), &relative, out),
            Ok(t) if t.is_file() => out.push(relative),
            _ => {}
        }
    }
}

/// Folder part of a `/`-separated vault path (`""` for the vault root).
fn parent_of(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

fn join(dir: &str, reference: &str) -> String {
    if dir.is_empty() {
        reference.to_string()
    } else {
        format!("{dir}/{reference}")
    }
}

fn segment_count(path: &str) -> usize {
    path.split('/').count()
}

/// Lexically resolves `.` and `..` segments. Returns `None` if the path
/// climbs above the vault root or is empty.
fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
