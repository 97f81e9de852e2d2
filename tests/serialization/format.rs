//! On-Disk Format Tests
//!
//! The file is headers and payloads back to back: `type: u32 LE`,
//! `size: u32 LE`, payload. No magic, count or footer.

use crate::common::*;
use flatsave::{Record, RecordHeader, SerializationAgent, SerializationManager};

#[test]
fn test_hello_scenario_exact_bytes() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "bytes.sav");

    let mut x = Fixed::new(*b"Hello 123");
    let mut y = Message::new(b"Hello World!\0");
    let mut mgr = SerializationManager::new().unwrap();
    mgr.register(&mut x).unwrap();
    mgr.register(&mut y).unwrap();
    mgr.save_all(&path).unwrap();

    let mut expected = vec![0x01, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x00];
    expected.extend_from_slice(b"Hello 123");
    expected.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x0D, 0x00, 0x00, 0x00]);
    expected.extend_from_slice(b"Hello World!\0");

    let actual = std::fs::read(&path).unwrap();
    assert_eq!(actual.len(), 8 + 9 + 8 + 13);
    assert_eq!(actual, expected);
}

#[test]
fn test_empty_registration_writes_empty_file() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "nothing.sav");
    std::fs::write(&path, b"previous contents").unwrap();

    let mgr = SerializationManager::new().unwrap();
    mgr.save_all(&path).unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_zero_length_record_is_header_only() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "header_only.sav");

    let mut agent = SerializationAgent::new();
    agent.set_target(&path).unwrap();
    agent.prepare_write().unwrap();
    agent.append_record(&Record::empty(42)).unwrap();
    agent.finalize_write().unwrap();
    assert_eq!(agent.bytes_written(), RecordHeader::SIZE as u64);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, RecordHeader::new(42, 0).encode());
}

#[test]
fn test_record_type_is_opaque() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "opaque.sav");

    let mut agent = SerializationAgent::new();
    agent.set_target(&path).unwrap();
    agent.prepare_write().unwrap();
    agent
        .append_record(&Record::borrowed(u32::MAX, b"\xFF"))
        .unwrap();
    agent.finalize_write().unwrap();

    agent.load_all().unwrap();
    let record = agent.next_record().unwrap();
    assert_eq!(record.record_type(), u32::MAX);
    assert_eq!(record.payload(), b"\xFF");

    // The manager ignores the tag entirely
    let mut sink = Message::default();
    let mut mgr = SerializationManager::new().unwrap();
    mgr.register(&mut sink).unwrap();
    mgr.load_all(&path).unwrap();
    drop(mgr);
    assert_eq!(sink.data, b"\xFF");
}

#[test]
fn test_hand_written_file_loads() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "hand.sav");

    let mut bytes = Vec::new();
    RecordHeader::new(9, 3).write_to(&mut bytes).unwrap();
    bytes.extend_from_slice(b"abc");
    std::fs::write(&path, &bytes).unwrap();

    let mut sink = Fixed::<3>::zeroed();
    let mut mgr = SerializationManager::new().unwrap();
    mgr.register(&mut sink).unwrap();
    mgr.load_all(&path).unwrap();
    drop(mgr);
    assert_eq!(&sink.bytes, b"abc");
}
