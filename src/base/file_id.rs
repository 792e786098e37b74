/// Interned identifier of a source file.
///
/// Handed out by [`FileCache::intern_path`](crate::hir::FileCache::intern_path);
/// two ids compare equal exactly when they were interned from the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}
