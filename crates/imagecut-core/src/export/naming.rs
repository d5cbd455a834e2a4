//! Output file names for exported cuts.

use std::collections::HashSet;

/// Name of the `position`-th cut (1-based) of `source`.
///
/// `"photo.jpg"`, 2 becomes `"photo.jpg (cut 2).png"`.
pub fn cut_file_name(source: &str, position: usize) -> String {
    format!("{source} (cut {position}).png")
}

/// Hands out names that have not been used yet in one export.
///
/// Two source files may share a name when they come from different
/// folders. The second `"a.jpg (cut 1).png"` becomes
/// `"a.jpg (cut 1) (2).png"`, the third `"... (3).png"`, and so on.
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, or the first free numbered variant of it.
    pub fn claim(&mut self, name: &str) -> String {
        if self.used.insert(name.to_string()) {
            return name.to_string();
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (name, None),
        };

        let mut n = 2usize;
        loop {
            let candidate = match ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
