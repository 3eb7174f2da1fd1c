// Chunk codec: wire layout, round trips, clean end vs truncation, header width.

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use proptest::prelude::*;
    use rand::Rng;
    use wreck::chunk::{decode_chunk, encode_chunk, ChunkHeader, ChunkRef};
    use wreck::constants::{HEADER_LEN, MAX_SEGMENT_LEN};
    use wreck::{Field, WreckError};

    const SIZES: [usize; 6] = [0, 1, 3, 16, 256, 1024];

    fn random_bytes(n: usize) -> Vec<u8> {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen()).collect()
    }

    /// Sink that accepts `budget` bytes, then fails.
    struct FailingSink {
        budget: usize,
        written: Vec<u8>,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

// # 1. Every combination of segment sizes round trips

    #[test]
    fn roundtrip_all_size_combinations() {
        for sz_vector in SIZES {
            for sz_unique_key in SIZES {
                for sz_sort_key in SIZES {
                    let uk = random_bytes(sz_unique_key);
                    let sk = random_bytes(sz_sort_key);
                    let vec = random_bytes(sz_vector);

                    let mut wire = Vec::new();
                    let n = encode_chunk(&mut wire, &ChunkRef::new(&uk, &sk, &vec)).unwrap();
                    assert_eq!(n, wire.len());

                    let chunk = decode_chunk(&mut Cursor::new(&wire)).unwrap().unwrap();
                    assert_eq!(chunk.unique_key, uk, "unique key is corrupted");
                    assert_eq!(chunk.sort_key, sk, "sort key is corrupted");
                    assert_eq!(chunk.vector, vec, "vector is corrupted");
                }
            }
        }
    }

// # 2. Byte-exact layout: header then vector, sortKey, uniqueKey

    #[test]
    fn wire_layout_is_exact() {
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::new(b"UK", b"S", b"vvv")).unwrap();

        assert_eq!(
            wire,
            vec![
                6, 0, 0, 0, // total
                3, 0,       // vector
                1, 0,       // sortKey
                b'v', b'v', b'v', b'S', b'U', b'K',
            ]
        );
    }

    #[test]
    fn header_bytes_roundtrip() {
        let h = ChunkHeader { total_len: 0x0102_0304, vector_len: 0xAABB, sort_key_len: 7 };
        let bytes = h.to_bytes();
        assert_eq!(bytes, [0x04, 0x03, 0x02, 0x01, 0xBB, 0xAA, 0x07, 0x00]);
        assert_eq!(ChunkHeader::parse(&bytes), h);
    }

// # 3. Clean end of stream is not an error

    #[test]
    fn empty_source_is_clean_end() {
        let mut src = Cursor::new(Vec::<u8>::new());
        assert!(decode_chunk(&mut src).unwrap().is_none());
    }

    #[test]
    fn consecutive_chunks_then_clean_end() {
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::new(b"a", b"", b"1")).unwrap();
        encode_chunk(&mut wire, &ChunkRef::new(b"b", b"", b"2")).unwrap();

        let mut src = Cursor::new(wire);
        assert_eq!(&decode_chunk(&mut src).unwrap().unwrap().unique_key[..], b"a");
        assert_eq!(&decode_chunk(&mut src).unwrap().unwrap().unique_key[..], b"b");
        assert!(decode_chunk(&mut src).unwrap().is_none());
    }

// # 4. Partial header or payload is TruncatedRecord

    #[test]
    fn partial_header_is_truncated() {
        let mut src = Cursor::new(vec![1u8, 0, 0]);
        assert!(matches!(
            decode_chunk(&mut src),
            Err(WreckError::TruncatedRecord { expected: HEADER_LEN, actual: 3 })
        ));
    }

    #[test]
    fn partial_payload_is_truncated() {
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::new(b"key", b"sort", b"vector")).unwrap();
        wire.truncate(wire.len() - 2);

        assert!(matches!(
            decode_chunk(&mut Cursor::new(wire)),
            Err(WreckError::TruncatedRecord { expected: 13, actual: 11 })
        ));
    }

// # 5. Zero-length segments decode as empty

    #[test]
    fn zero_length_segments_are_empty() {
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::default()).unwrap();
        assert_eq!(wire, vec![0u8; HEADER_LEN]);

        let chunk = decode_chunk(&mut Cursor::new(wire)).unwrap().unwrap();
        assert!(chunk.unique_key.is_empty());
        assert!(chunk.sort_key.is_empty());
        assert!(chunk.vector.is_empty());
    }

// # 6. Segments over 65535 bytes are rejected before any write

    #[test]
    fn max_segment_len_is_accepted() {
        let vec = vec![7u8; MAX_SEGMENT_LEN];
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::new(b"", b"", &vec)).unwrap();

        let chunk = decode_chunk(&mut Cursor::new(wire)).unwrap().unwrap();
        assert_eq!(chunk.vector.len(), MAX_SEGMENT_LEN);
    }

    #[test]
    fn oversized_vector_is_rejected() {
        let vec = vec![0u8; MAX_SEGMENT_LEN + 1];
        let mut wire = Vec::new();

        match encode_chunk(&mut wire, &ChunkRef::new(b"k", b"", &vec)) {
            Err(WreckError::SegmentTooLarge { field, len, max }) => {
                assert_eq!(field, Field::Vector);
                assert_eq!(len, 65536);
                assert_eq!(max, 65535);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(wire.is_empty());
    }

    #[test]
    fn oversized_sort_key_is_rejected() {
        let sk = vec![0u8; 70_000];
        let mut wire = Vec::new();

        assert!(matches!(
            encode_chunk(&mut wire, &ChunkRef::new(b"", &sk, b"")),
            Err(WreckError::SegmentTooLarge { field: Field::SortKey, .. })
        ));
        assert!(wire.is_empty());
    }

    #[test]
    fn large_unique_key_is_allowed() {
        let uk = vec![1u8; 100_000];
        let mut wire = Vec::new();
        encode_chunk(&mut wire, &ChunkRef::new(&uk, b"", b"")).unwrap();

        let chunk = decode_chunk(&mut Cursor::new(wire)).unwrap().unwrap();
        assert_eq!(chunk.unique_key.len(), 100_000);
    }

// # 7. Corrupt header never panics

    #[test]
    fn header_overrunning_total_is_corrupt() {
        let h = ChunkHeader { total_len: 4, vector_len: 3, sort_key_len: 3 };
        let mut wire = h.to_bytes().to_vec();
        wire.extend_from_slice(&[0u8; 4]);

        assert!(matches!(
            decode_chunk(&mut Cursor::new(wire)),
            Err(WreckError::CorruptHeader { total: 4, vector: 3, sort_key: 3 })
        ));
    }

// # 8. Transport failures propagate unchanged

    #[test]
    fn write_failure_propagates() {
        let mut sink = FailingSink { budget: 10, written: Vec::new() };
        let err = encode_chunk(&mut sink, &ChunkRef::new(b"unique", b"sort", b"vector")).unwrap_err();

        match err {
            WreckError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {:?}", other),
        }
        // no rollback
        assert_eq!(sink.written.len(), 10);
    }

    proptest! {
        #[test]
        fn prop_chunk_roundtrip(
            uk in proptest::collection::vec(any::<u8>(), 0..512),
            sk in proptest::collection::vec(any::<u8>(), 0..512),
            vec in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let mut wire = Vec::new();
            encode_chunk(&mut wire, &ChunkRef::new(&uk, &sk, &vec)).unwrap();
            prop_assert_eq!(wire.len(), HEADER_LEN + uk.len() + sk.len() + vec.len());

            let chunk = decode_chunk(&mut Cursor::new(wire)).unwrap().unwrap();
            prop_assert_eq!(&chunk.unique_key[..], &uk[..]);
            prop_assert_eq!(&chunk.sort_key[..], &sk[..]);
            prop_assert_eq!(&chunk.vector[..], &vec[..]);
        }
    }
}
