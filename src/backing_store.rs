use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::constants::PAGE_SIZE;
use crate::error::{Error, Result};

/// Source of ground-truth page contents.
pub trait BackingStore {
    /// Read the page-sized block for `page`.
    ///
    /// Must fail rather than return a partially filled page.
    fn load(&mut self, page: u8) -> Result<[u8; PAGE_SIZE]>;
}

impl<T: BackingStore + ?Sized> BackingStore for Box<T> {
    fn load(&mut self, page: u8) -> Result<[u8; PAGE_SIZE]> {
        (**self).load(page)
    }
}

/// Fill `buf` from `reader`, returning how many bytes were available
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Flat binary backing store kept open for the whole run
#[derive(Debug)]
pub struct FileBackingStore {
    path: PathBuf,
    file: File,
}

impl FileBackingStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::BackingStoreUnavailable {
            path: path.clone(),
            source,
        })?;
        info!("opened backing store {}", path.display());
        Ok(FileBackingStore { path, file })
    }

    fn unavailable(&self, source: io::Error) -> Error {
        Error::BackingStoreUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl BackingStore for FileBackingStore {
    fn load(&mut self, page: u8) -> Result<[u8; PAGE_SIZE]> {
        let offset = page as u64 * PAGE_SIZE as u64;
        debug!("loading page {} from offset {}", page, offset);

        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| self.unavailable(e))?;

        let mut buf = [0u8; PAGE_SIZE];
        let read = read_full(&mut self.file, &mut buf).map_err(|e| self.unavailable(e))?;
        if read < PAGE_SIZE {
            return Err(Error::ShortRead { page, read });
        }
        Ok(buf)
    }
}

/// Backing store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBackingStore {
    data: Vec<u8>,
}

impl MemoryBackingStore {
    pub fn new(data: Vec<u8>) -> Self {
        MemoryBackingStore { data }
    }
}

impl BackingStore for MemoryBackingStore {
    fn load(&mut self, page: u8) -> Result<[u8; PAGE_SIZE]> {
        let start = page as usize * PAGE_SIZE;
        let available = self.data.len().saturating_sub(start).min(PAGE_SIZE);
        if available < PAGE_SIZE {
            return Err(Error::ShortRead {
                page,
                read: available,
            });
        }

        let mut buf = [0u8; PAGE_SIZE];
        buf.copy_from_slice(&self.data[start..start + PAGE_SIZE]);
        Ok(buf)
    }
}
