use crate::core::{BrewError, BrewResult};
use flate2::read::GzDecoder;
use std::io::Read;
use tar::{Archive, EntryType};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Symlink/hard-link hops followed before giving up
const MAX_LINK_DEPTH: usize = 8;

const MAX_PREALLOC: u64 = 1 << 20;

/// Path of the binary inside a bottle: `{package_id}/{version}/bin/{name}`
pub fn member_path(package_id: &str, version: &str, name: &str) -> String {
    format!("{}/{}/bin/{}", package_id, version, name)
}

/// An in-memory bottle (tar, optionally gzip-compressed)
///
/// The archive is re-read from the start for every lookup, so lookups never
/// unpack anything to disk.
pub struct BottleArchive<'a> {
    bytes: &'a [u8],
    compressed: bool,
}

enum Member {
    File(Vec<u8>),
    Symlink(String),
    HardLink(String),
    NotFile,
}

impl<'a> BottleArchive<'a> {
    /// Open an archive, rejecting byte streams that are not tar or tar.gz
    pub fn open(bytes: &'a [u8]) -> BrewResult<Self> {
        if bytes.is_empty() {
            return Err(BrewError::Extraction(
                "Unable to open archive: no data".to_string(),
            ));
        }

        let archive = Self {
            bytes,
            compressed: bytes.starts_with(&GZIP_MAGIC),
        };

        // Read the first header so garbage fails here rather than on lookup
        let mut first = archive.archive();
        first
            .entries()
            .and_then(|mut entries| entries.next().transpose().map(|_| ()))
            .map_err(|e| BrewError::Extraction(format!("Unable to open archive: {}", e)))?;

        Ok(archive)
    }

    /// Whether the stream was gzip-compressed
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Read the contents of the regular file at `path`, following links
    pub fn read_file(&self, path: &str) -> BrewResult<Vec<u8>> {
        let mut wanted = normalize_member(path)
            .ok_or_else(|| BrewError::Extraction(format!("Invalid member path: {}", path)))?;

        for _ in 0..=MAX_LINK_DEPTH {
            match self.find(&wanted)? {
                Member::File(data) => return Ok(data),
                Member::NotFile => {
                    return Err(BrewError::Extraction(format!(
                        "{} is not a regular file",
                        wanted
                    )))
                }
                Member::HardLink(target) => {
                    wanted = normalize_member(&target).ok_or_else(|| escaped(&wanted, &target))?;
                }
                Member::Symlink(target) => {
                    if target.starts_with('/') {
                        return Err(escaped(&wanted, &target));
                    }
                    let joined = match wanted.rsplit_once('/') {
                        Some((dir, _)) => format!("{}/{}", dir, target),
                        None => target.clone(),
                    };
                    wanted = normalize_member(&joined).ok_or_else(|| escaped(&wanted, &target))?;
                }
            }
        }

        Err(BrewError::Extraction(format!(
            "Too many links while resolving {}",
            path
        )))
    }

    fn archive(&self) -> Archive<Box<dyn Read + 'a>> {
        let reader: Box<dyn Read + 'a> = if self.compressed {
            Box::new(GzDecoder::new(self.bytes))
        } else {
            Box::new(self.bytes)
        };
        Archive::new(reader)
    }

    /// Scan the whole archive; a later member with the same name wins
    fn find(&self, wanted: &str) -> BrewResult<Member> {
        let mut archive = self.archive();
        let entries = archive.entries().map_err(corrupt)?;

        let mut found = None;
        for entry in entries {
            let mut entry = entry.map_err(corrupt)?;

            let matches = {
                let entry_path = entry.path().map_err(corrupt)?;
                normalize_member(&entry_path.to_string_lossy()).as_deref() == Some(wanted)
            };
            if !matches {
                continue;
            }

            let kind = entry.header().entry_type();
            found = Some(match kind {
                EntryType::Symlink | EntryType::Link => {
                    let target = entry
                        .link_name()
                        .map_err(corrupt)?
                        .ok_or_else(|| {
                            BrewError::Extraction(format!("Link {} has no target", wanted))
                        })?
                        .to_string_lossy()
                        .into_owned();
                    if kind == EntryType::Symlink {
                        Member::Symlink(target)
                    } else {
                        Member::HardLink(target)
                    }
                }
                kind if kind.is_file() => {
                    // The header size is untrusted, so it only bounds the read
                    let declared = entry.size();
                    let mut data = Vec::with_capacity(declared.min(MAX_PREALLOC) as usize);
                    entry.read_to_end(&mut data).map_err(corrupt)?;
                    if data.len() as u64 != declared {
                        return Err(BrewError::Extraction(format!(
                            "Corrupt archive: {} truncated ({} of {} bytes)",
                            wanted,
                            data.len(),
                            declared
                        )));
                    }
                    Member::File(data)
                }
                _ => Member::NotFile,
            });
        }

        found.ok_or_else(|| BrewError::Extraction(format!("{} not found in archive", wanted)))
    }
}

/// Canonical member name: no `./`, empty or trailing segments, `..` applied.
/// `None` if the path is empty or climbs above the archive root.
fn normalize_member(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            part => parts.push(part),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn corrupt(e: std::io::Error) -> BrewError {
    BrewError::Extraction(format!("Corrupt archive: {}", e))
}

fn escaped(member: &str, target: &str) -> BrewError {
    BrewError::Extraction(format!(
        "Link {} -> {} points outside the archive",
        member, target
    ))
}
