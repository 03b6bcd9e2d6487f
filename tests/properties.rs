use proptest::prelude::*;
use rawread::{ChunkReader, ReadConfig};
use std::io::Cursor;

proptest! {
    #[test]
    fn chunks_cover_exactly_the_requested_range(
        data in proptest::collection::vec(any::<u8>(), 0..2048),
        buffer_size in 1usize..300,
        start_offset in 0i64..2500,
        max_length in proptest::option::of(1i64..3000),
    ) {
        let config = ReadConfig::new(buffer_size, start_offset, max_length).unwrap();
        let mut reader = ChunkReader::new(Cursor::new(data.clone()), config).unwrap();

        let start = start_offset as u64;
        let mut expected_offset = start;
        let mut collected = Vec::new();
        while let Some(chunk) = reader.next_chunk().unwrap() {
            prop_assert!(!chunk.is_empty());
            prop_assert!(chunk.len() <= buffer_size);
            prop_assert_eq!(chunk.offset, expected_offset);
            expected_offset = chunk.end();
            collected.extend_from_slice(chunk.data);
        }

        let available = (data.len() as u64).saturating_sub(start);
        let want = match max_length {
            Some(max) => available.min(max as u64),
            None => available,
        };
        prop_assert_eq!(collected.len() as u64, want);
        prop_assert_eq!(reader.consumed(), want);
        if want > 0 {
            let from = start as usize;
            prop_assert_eq!(&collected[..], &data[from..from + want as usize]);
        }
    }
}
