use rawread::{ChunkReader, OutputMode, ReadConfig, SessionTotals, hex_dump, run};
use std::io::Cursor;

#[test]
fn three_ascii_bytes() {
    let dump = hex_dump(&[0x41, 0x42, 0x43], 0);
    let expected = format!("00000000  41 42 43 {} |ABC|\n", " ".repeat(13 * 3 + 1));
    assert_eq!(dump, expected);
}

#[test]
fn full_line_has_group_split() {
    let data: Vec<u8> = (0x30u8..0x40).collect();
    let dump = hex_dump(&data, 0x20);
    assert_eq!(
        dump,
        "00000020  30 31 32 33 34 35 36 37  38 39 3a 3b 3c 3d 3e 3f  |0123456789:;<=>?|\n"
    );
}

#[test]
fn non_printables_become_dots() {
    let dump = hex_dump(&[0x00, 0x1f, 0x20, 0x7e, 0x7f, 0xff], 0);
    assert!(dump.ends_with(" |.. ~..|\n"));
    assert!(dump.starts_with("00000000  00 1f 20 7e 7f ff "));
}

#[test]
fn second_line_offset_advances_by_sixteen() {
    let data = vec![b'a'; 17];
    let dump = hex_dump(&data, 0x100);
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("00000100  "));
    assert!(lines[1].starts_with("00000110  61 "));
    assert!(lines[1].ends_with(" |a|"));
}

#[test]
fn multi_chunk_dump_is_continuous() {
    // 16-byte aligned buffer: chunk boundaries coincide with line boundaries
    let data: Vec<u8> = (0..=255u8).cycle().take(300).collect();

    let dump_with = |buffer: usize| {
        let config = ReadConfig::new(buffer, 0, None).unwrap();
        let mut reader = ChunkReader::new(Cursor::new(data.clone()), config).unwrap();
        let mut out = Vec::new();
        let mut totals = SessionTotals::default();
        run(&mut reader, OutputMode::HexDump, &mut out, &mut totals).unwrap();
        String::from_utf8(out).unwrap()
    };

    let single = dump_with(4096);
    assert_eq!(single, hex_dump(&data, 0));
    assert_eq!(dump_with(32), single);
    assert_eq!(dump_with(16), single);
}

#[test]
fn unaligned_chunks_keep_absolute_offsets() {
    let data = vec![0u8; 30];
    let config = ReadConfig::new(10, 5, None).unwrap();
    let mut reader = ChunkReader::new(Cursor::new(data), config).unwrap();
    let mut out = Vec::new();
    let mut totals = SessionTotals::default();
    run(&mut reader, OutputMode::HexDump, &mut out, &mut totals).unwrap();

    let text = String::from_utf8(out).unwrap();
    let offsets: Vec<&str> = text.lines().map(|l| &l[..8]).collect();
    assert_eq!(offsets, vec!["00000005", "0000000f", "00000019"]);
    assert_eq!(totals.total_bytes, 25);
}
