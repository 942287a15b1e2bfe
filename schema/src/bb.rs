use crate::error::ProtoError;

/// A byte buffer meant for reading length-prefixed field records.
///
/// Example usage:
///
/// ```
/// let mut reader = titanium_proto_schema::ByteReader::new(&[2, 7, 0]);
/// assert_eq!(reader.read_byte(), Some(2));
/// assert_eq!(reader.read_bytes(2), Some(&[7u8, 0u8][..]));
/// assert_eq!(reader.read_byte(), None);
/// ```
pub struct ByteReader<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a new ByteReader that wraps the provided byte slice. The
    /// lifetime of the returned ByteReader must not outlive the lifetime of
    /// the byte slice.
    pub fn new(data: &[u8]) -> ByteReader {
        ByteReader { data, index: 0 }
    }

    /// Retrieves the underlying byte slice.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Retrieves the current index into the underlying byte slice. This
    /// starts off as 0 and ends up as `self.data().len()` when everything
    /// has been read.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of bytes that have not been read yet.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.index
    }

    /// Try to read a single byte starting at the current index.
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.index >= self.data.len() {
            None
        } else {
            let value = self.data[self.index];
            self.index += 1;
            Some(value)
        }
    }

    /// Try to read `len` bytes starting at the current index. Returns a
    /// slice aliasing the underlying memory.
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.index + len > self.data.len() {
            None
        } else {
            let value = &self.data[self.index..self.index + len];
            self.index += len;
            Some(value)
        }
    }
}

/// A byte buffer meant for writing into caller-owned, fixed-capacity
/// storage. Nothing is allocated; a write past the end of the backing
/// slice fails with `BufferTooSmall` and leaves the cursor unchanged.
///
/// Example usage:
///
/// ```
/// let mut storage = [0u8; 4];
/// let mut writer = titanium_proto_schema::ByteWriter::new(&mut storage);
/// writer.write_byte(2).unwrap();
/// writer.write_bytes(&[7, 0]).unwrap();
/// assert_eq!(writer.len(), 3);
/// assert_eq!(&storage[..3], &[2, 7, 0]);
/// ```
pub struct ByteWriter<'a> {
    data: &'a mut [u8],
    index: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a ByteWriter over the provided backing slice, ready for
    /// writing at index 0.
    pub fn new(data: &mut [u8]) -> ByteWriter {
        ByteWriter { data, index: 0 }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.index
    }

    /// Returns true if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// The capacity left in the backing slice.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.index
    }

    /// Write a single byte at the current index.
    pub fn write_byte(&mut self, value: u8) -> Result<(), ProtoError> {
        if self.index >= self.data.len() {
            return Err(ProtoError::BufferTooSmall {
                needed: self.index + 1,
                available: self.data.len(),
            });
        }
        self.data[self.index] = value;
        self.index += 1;
        Ok(())
    }

    /// Write a raw byte slice at the current index.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), ProtoError> {
        if self.index + value.len() > self.data.len() {
            return Err(ProtoError::BufferTooSmall {
                needed: self.index + value.len(),
                available: self.data.len(),
            });
        }
        self.data[self.index..self.index + value.len()].copy_from_slice(value);
        self.index += value.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_byte() {
        let read = |bytes| ByteReader::new(bytes).read_byte();
        assert_eq!(read(&[]), None);
        assert_eq!(read(&[0]), Some(0));
        assert_eq!(read(&[254]), Some(254));
        assert_eq!(read(&[255]), Some(255));
    }

    #[test]
    fn read_bytes() {
        let read = |bytes, len| ByteReader::new(bytes).read_bytes(len);
        assert_eq!(read(&[], 0), Some(&[][..]));
        assert_eq!(read(&[], 1), None);
        assert_eq!(read(&[0], 1), Some(&[0u8][..]));
        assert_eq!(read(&[0], 2), None);

        let mut reader = ByteReader::new(&[1, 2, 3, 4, 5]);
        assert_eq!(reader.read_bytes(3), Some(&[1u8, 2, 3][..]));
        assert_eq!(reader.remaining(), 2);
        assert_eq!(reader.read_bytes(2), Some(&[4u8, 5][..]));
        assert_eq!(reader.read_bytes(1), None);
        assert_eq!(reader.index(), 5);
    }

    #[test]
    fn read_sequence_of_records() {
        // Two records: [1][42] and [2][7, 0].
        let mut reader = ByteReader::new(&[1, 42, 2, 7, 0]);
        let len = reader.read_byte().unwrap() as usize;
        assert_eq!(reader.read_bytes(len), Some(&[42u8][..]));
        let len = reader.read_byte().unwrap() as usize;
        assert_eq!(reader.read_bytes(len), Some(&[7u8, 0][..]));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn write_byte() {
        let mut storage = [0u8; 2];
        let mut writer = ByteWriter::new(&mut storage);
        assert!(writer.write_byte(9).is_ok());
        assert!(writer.write_byte(255).is_ok());
        assert!(matches!(
            writer.write_byte(1),
            Err(ProtoError::BufferTooSmall {
                needed: 3,
                available: 2
            })
        ));
        assert_eq!(storage, [9, 255]);
    }

    #[test]
    fn write_bytes() {
        let mut storage = [0u8; 5];
        let mut writer = ByteWriter::new(&mut storage);
        assert!(writer.write_bytes(&[1, 2, 3]).is_ok());
        assert!(writer.write_bytes(&[]).is_ok());
        assert!(writer.write_bytes(&[4, 5]).is_ok());
        assert_eq!(writer.remaining(), 0);
        assert!(matches!(
            writer.write_bytes(&[6]),
            Err(ProtoError::BufferTooSmall { .. })
        ));
        assert_eq!(storage, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn failed_write_leaves_cursor_unchanged() {
        let mut storage = [0u8; 3];
        let mut writer = ByteWriter::new(&mut storage);
        writer.write_byte(1).unwrap();
        assert!(writer.write_bytes(&[2, 3, 4]).is_err());
        assert_eq!(writer.len(), 1);
        assert_eq!(storage, [1, 0, 0]);
    }
}
