// firmware/edit.rs from fwpatch (c) 2026 fwpatch Contributors
//
// Implements the atomic byte edit that patch groups are built from.

/// A single verifiable modification to a firmware image: the bytes expected at
/// an offset before patching, and the equal-length bytes written in their place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteEdit {
    offset: usize,
    original: Vec<u8>,
    replacement: Vec<u8>,
}

impl ByteEdit {
    /// Creates a new ByteEdit. Edits are in-place and never resize the image,
    /// so the original and replacement byte sequences must be the same length;
    /// a mismatch means the catalog entry itself is malformed and aborts.
    pub fn new(offset: usize, original: &[u8], replacement: &[u8]) -> ByteEdit {
        assert_eq!(
            original.len(),
            replacement.len(),
            "byte edit at offset {:#x} resizes the image",
            offset
        );
        ByteEdit {
            offset,
            original: original.to_vec(),
            replacement: replacement.to_vec(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn original(&self) -> &[u8] {
        &self.original
    }

    pub fn replacement(&self) -> &[u8] {
        &self.replacement
    }

    /// The number of bytes this edit overwrites.
    pub fn len(&self) -> usize {
        self.replacement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacement.is_empty()
    }

    /// One past the last image offset this edit touches.
    pub fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.replacement.len())
    }

    /// Checks whether the image still contains the expected original bytes at
    /// this edit's offset. An edit whose range falls outside the image cannot
    /// match either.
    pub fn matches(&self, image: &[u8]) -> bool {
        match self.end() {
            Some(end) => image.get(self.offset..end) == Some(self.original.as_slice()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_expected_bytes() {
        let image = [0x00, 0x11, 0x22, 0x33, 0x44];
        let edit = ByteEdit::new(1, &[0x11, 0x22], &[0xaa, 0xbb]);
        assert!(edit.matches(&image));
    }

    #[test]
    fn test_mismatched_bytes_do_not_match() {
        let image = [0x00, 0x11, 0x22, 0x33, 0x44];
        let edit = ByteEdit::new(1, &[0x11, 0x23], &[0xaa, 0xbb]);
        assert!(!edit.matches(&image));
    }

    #[test]
    fn test_out_of_range_edit_does_not_match() {
        let image = [0x00, 0x11];
        let edit = ByteEdit::new(1, &[0x11, 0x22], &[0xaa, 0xbb]);
        assert!(!edit.matches(&image));
    }

    #[test]
    #[should_panic]
    fn test_resizing_edit_is_rejected() {
        ByteEdit::new(0, &[0x00], &[0x01, 0x02]);
    }
}
