use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use arfs_core::{ArchiveSrc, Entry};

use crate::{wrap_io_err, EntryReader, Error, FileSrc};

/// A parsed archive: the byte source plus the member table built from one
/// front-to-back scan at construction time.
///
/// The table never changes after the scan. Dropping (or [`close`]ing) the
/// archive releases the source; readers borrow the archive, so the borrow
/// checker keeps them from outliving it.
///
/// [`close`]: Archive::close
#[derive(Debug)]
pub struct Archive<R: ArchiveSrc> {
    src: R,
    entries: BTreeMap<String, Entry>,
}

impl Archive<FileSrc> {
    /// Open and scan an archive file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Archive<FileSrc>, Error> {
        Archive::new(FileSrc::open(path)?)
    }
}

impl<R: ArchiveSrc> Archive<R>
where
    Error: From<R::Err>,
{
    /// Scan `src` and build the member table. Any structural problem in the
    /// stream fails the whole construction; there is no partial archive.
    pub fn new(src: R) -> Result<Archive<R>, Error> {
        let entries = src.entries()?;
        Ok(Archive { src, entries })
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&Entry, Error> {
        self.entries
            .get(normalize(name).as_str())
            .ok_or_else(|| Error::NotExist {
                name: name.to_string(),
            })
    }

    /// Open one member for reading. `"/x"`, `"./x"` and `"x"` name the same
    /// member.
    pub fn open(&self, name: &str) -> Result<EntryReader<'_, R>, Error> {
        let entry = self.entry(name)?.clone();
        Ok(EntryReader::new(&self.src, entry))
    }

    /// Whole contents of one member: open and drain to the end.
    pub fn read_file(&self, name: &str) -> Result<Vec<u8>, Error> {
        let mut member = self.open(name)?;
        let mut data = Vec::with_capacity(member.entry().size() as usize);
        member
            .read_to_end(&mut data)
            .map_err(wrap_io_err!("Read to end"))?;
        Ok(data)
    }

    /// Metadata for one member, without opening it.
    pub fn stat(&self, name: &str) -> Result<&Entry, Error> {
        self.entry(name)
    }

    /// Every member's metadata. Only the archive root (`"/"` or `"."`)
    /// lists; the format has no subdirectories, so any other path does not
    /// exist. The order is the table's and callers should treat it as
    /// unspecified.
    pub fn list_dir(&self, path: &str) -> Result<Vec<&Entry>, Error> {
        if path != "/" && path != "." {
            return Err(Error::NotExist {
                name: path.to_string(),
            });
        }
        Ok(self.entries.values().collect())
    }

    /// Member names matching a shell-style pattern: `*`, `?` and `[..]`
    /// classes, with `*` and `?` stopping at `/`. Matching is against the
    /// exact table names; a malformed pattern is an error even on an empty
    /// archive.
    pub fn glob(&self, pattern: &str) -> Result<Vec<&str>, Error> {
        let pattern = glob::Pattern::new(pattern)?;
        let options = glob::MatchOptions {
            // One pattern segment matches one name segment.
            require_literal_separator: true,
            ..glob::MatchOptions::new()
        };
        Ok(self
            .entries
            .keys()
            .filter(|name| pattern.matches_with(name, options))
            .map(String::as_str)
            .collect())
    }

    /// Consume the archive, dropping (and for owned sources, closing) the
    /// underlying byte source. Anything still borrowing the archive, an
    /// [`EntryReader`] included, refuses to compile past this call.
    pub fn close(self) {}

    /// Consume the archive and hand the source back unclosed.
    pub fn into_inner(self) -> R {
        self.src
    }
}

/// Normalize a lookup path the way table keys are stored: collapse `.`,
/// `..` and repeated separators, then drop the leading root.
fn normalize(name: &str) -> String {
    let rooted = name.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for part in name.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            part => parts.push(part),
        }
    }
    if parts.is_empty() {
        if rooted {
            String::new()
        } else {
            String::from(".")
        }
    } else {
        parts.join("/")
    }
}
