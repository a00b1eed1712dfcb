//! Split bundler module ids into folder segments and a file name.
//!
//! Module ids use `/` regardless of platform, so this is plain string
//! splitting rather than `std::path` handling.

use crate::utils::config::PATH_SEPARATOR;

/// Lexed form of a module id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegments<'a> {
    /// Folder names, outermost first
    pub folders: Vec<&'a str>,

    /// Trailing file name (the whole id when there is no separator)
    pub file_name: &'a str,
}

impl PathSegments<'_> {
    /// True when the id had no separator and lives directly under the root
    pub fn is_top_level(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Lex a module id into folders and file name
///
/// **Public** - used by the tree builder
///
/// Empty segments produced by repeated separators are kept as-is.
///
/// # Example
/// ```ignore
/// let segments = lex("src/server/shared.ts");
/// assert_eq!(segments.folders, vec!["src", "server"]);
/// assert_eq!(segments.file_name, "shared.ts");
/// ```
pub fn lex(path: &str) -> PathSegments<'_> {
    let mut folders: Vec<&str> = path.split(PATH_SEPARATOR).collect();

    // split always yields at least one element
    let file_name = folders.pop().unwrap_or(path);

    PathSegments { folders, file_name }
}

/// Check whether the last component of `id` carries a file extension
///
/// **Public** - the collapse heuristic for "this node is a file"
///
/// Mirrors `path.extname` semantics: a dot at position 0 of the final
/// component (dotfiles) or the `..` component do not count as extensions.
/// Dotted directory names such as `v1.0` are reported as files.
pub fn has_extension(id: &str) -> bool {
    let base = id.rsplit(PATH_SEPARATOR).next().unwrap_or(id);

    if base == ".." {
        return false;
    }

    matches!(base.rfind('.'), Some(index) if index > 0)
}
