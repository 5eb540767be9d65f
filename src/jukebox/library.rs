use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;
use thiserror::Error;

/// Where the jukebox finds files: directories holding MIDI files
pub trait Library {
    /// Why a listing or read failed
    type Error: fmt::Display;

    /// Directory identifiers, in a stable order
    fn directories(&self) -> Result<Vec<String>, Self::Error>;

    /// Playable files in `directory`, in a stable order
    fn files(&self, directory: &str) -> Result<Vec<String>, Self::Error>;

    /// The whole contents of one file
    fn read(&self, directory: &str, file: &str) -> Result<Vec<u8>, Self::Error>;
}

/// A [`MemoryLibrary`] lookup that found nothing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MissingEntry {
    /// No such directory
    #[error("No directory {0:?}")]
    Directory(String),
    /// No such file in the directory
    #[error("No file {file:?} in {directory:?}")]
    File {
        /// The directory searched
        directory: String,
        /// The file asked for
        file: String,
    },
}

#[doc = r#"
A library held in memory, e.g. files compiled into flash with `include_bytes!`.
"#]
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    directories: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
}

impl MemoryLibrary {
    /// An empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces `file` in `directory`
    pub fn insert(
        &mut self,
        directory: impl Into<String>,
        file: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.directories
            .entry(directory.into())
            .or_default()
            .insert(file.into(), bytes.into());
        self
    }
}

impl Library for MemoryLibrary {
    type Error = MissingEntry;

    fn directories(&self) -> Result<Vec<String>, Self::Error> {
        Ok(self.directories.keys().cloned().collect())
    }

    fn files(&self, directory: &str) -> Result<Vec<String>, Self::Error> {
        self.directories
            .get(directory)
            .map(|files| files.keys().cloned().collect())
            .ok_or_else(|| MissingEntry::Directory(directory.into()))
    }

    fn read(&self, directory: &str, file: &str) -> Result<Vec<u8>, Self::Error> {
        self.directories
            .get(directory)
            .and_then(|files| files.get(file))
            .cloned()
            .ok_or_else(|| MissingEntry::File {
                directory: directory.into(),
                file: file.into(),
            })
    }
}

#[cfg(feature = "std")]
pub use fs::FsLibrary;

#[cfg(feature = "std")]
mod fs {
    use super::Library;
    use alloc::{string::String, vec::Vec};
    use std::{
        fs, io,
        path::{Path, PathBuf},
    };

    /// Files ending in one of these are playable, ignoring case
    const EXTENSIONS: [&str; 2] = ["mid", "midi"];

    /// A library on the filesystem.
    ///
    /// Each subdirectory of the root holding at least one MIDI file is a
    /// directory of the library. MIDI files directly under the root form a
    /// directory named `""`.
    #[derive(Debug, Clone)]
    pub struct FsLibrary {
        root: PathBuf,
    }

    impl FsLibrary {
        /// A library rooted at `root`
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        /// The root path
        pub fn root(&self) -> &Path {
            &self.root
        }

        fn is_midi(path: &Path) -> bool {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        }
    }

    impl Library for FsLibrary {
        type Error = io::Error;

        fn directories(&self) -> io::Result<Vec<String>> {
            let mut directories = Vec::new();
            for entry in fs::read_dir(&self.root)? {
                let entry = entry?;
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                if !self.files(&name)?.is_empty() {
                    directories.push(name);
                }
            }
            directories.sort();
            if !self.files("")?.is_empty() {
                directories.insert(0, String::new());
            }
            Ok(directories)
        }

        fn files(&self, directory: &str) -> io::Result<Vec<String>> {
            let mut files = Vec::new();
            for entry in fs::read_dir(self.root.join(directory))? {
                let entry = entry?;
                if entry.file_type()?.is_file() && Self::is_midi(&entry.path()) {
                    files.push(entry.file_name().to_string_lossy().into_owned());
                }
            }
            files.sort();
            Ok(files)
        }

        fn read(&self, directory: &str, file: &str) -> io::Result<Vec<u8>> {
            fs::read(self.root.join(directory).join(file))
        }
    }

    #[test]
    fn lists_midi_files_by_directory() {
        use pretty_assertions::assert_eq;
        let root = std::env::temp_dir().join(format!("midinoid-library-{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(root.join("slow")).unwrap();
        fs::create_dir_all(root.join("a_empty")).unwrap();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("docs").join("readme.txt"), b"").unwrap();
        fs::write(root.join("top.MID"), b"MThd").unwrap();
        fs::write(root.join("slow").join("b.mid"), b"b").unwrap();
        fs::write(root.join("slow").join("a.midi"), b"a").unwrap();
        fs::write(root.join("slow").join("notes.txt"), b"").unwrap();

        let library = FsLibrary::new(&root);
        assert_eq!(library.directories().unwrap(), ["", "slow"]);
        assert_eq!(library.files("slow").unwrap(), ["a.midi", "b.mid"]);
        assert_eq!(library.read("slow", "b.mid").unwrap(), b"b");
        assert!(library.read("slow", "c.mid").is_err());

        fs::remove_dir_all(&root).unwrap();
    }
}
