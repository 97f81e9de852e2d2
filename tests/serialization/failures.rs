//! Failure Handling Tests
//!
//! Every load failure aborts at the first bad record, leaves the objects
//! before it updated and the ones after it untouched, and releases the
//! load buffer.

use crate::common::*;
use flatsave::{
    Error, ErrorKind, ImportError, ManagerOptions, SerializationManager, DEFAULT_CAPACITY,
};

#[test]
fn test_capacity_allows_capacity_minus_one() {
    let mut objects: Vec<Message> = (0..DEFAULT_CAPACITY).map(|_| Message::default()).collect();
    let mut mgr = SerializationManager::new().unwrap();
    assert_eq!(mgr.max_registrations(), DEFAULT_CAPACITY - 1);

    let mut iter = objects.iter_mut();
    for _ in 0..DEFAULT_CAPACITY - 1 {
        mgr.register(iter.next().unwrap()).unwrap();
    }
    let err = mgr.register(iter.next().unwrap()).unwrap_err();
    assert!(err.is_capacity_exceeded());
    assert_eq!(mgr.len(), DEFAULT_CAPACITY - 1);
}

#[test]
fn test_rejected_registration_is_not_saved() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "cap.sav");

    let mut kept = Message::new(b"in");
    let mut rejected = Message::new(b"out");
    let mut mgr =
        SerializationManager::with_options(ManagerOptions::default().with_capacity(2)).unwrap();
    mgr.register(&mut kept).unwrap();
    assert!(mgr.register(&mut rejected).is_err());
    mgr.save_all(&path).unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), 8 + 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = create_test_dir();
    let mut obj = Message::new(b"unchanged");
    let mut mgr = SerializationManager::new().unwrap();
    mgr.register(&mut obj).unwrap();

    let err = mgr.load_all(save_path(&temp_dir, "absent.sav")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    drop(mgr);
    assert_eq!(obj.data, b"unchanged");
}

#[test]
fn test_empty_path_is_configuration_error() {
    let mgr = SerializationManager::new().unwrap();
    let err = mgr.save_all("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_truncated_file_partial_update() {
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "short.sav");

    let mut a = Message::new(b"one");
    let mut b = Message::new(b"two");
    {
        let mut mgr = SerializationManager::new().unwrap();
        mgr.register(&mut a).unwrap();
        mgr.register(&mut b).unwrap();
        mgr.save_all(&path).unwrap();
    }
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();

    let mut a2 = Message::default();
    let mut b2 = Message::new(b"before");
    {
        let mut mgr = SerializationManager::new().unwrap();
        mgr.register(&mut a2).unwrap();
        mgr.register(&mut b2).unwrap();
        let err = mgr.load_all(&path).unwrap_err();
        assert!(err.is_truncated());
    }

    assert_eq!(a2.data, b"one");
    assert_eq!(b2.data, b"before");
}

#[test]
fn test_size_mismatch_then_successful_load() {
    let temp_dir = create_test_dir();
    let wrong = save_path(&temp_dir, "wrong.sav");
    let right = save_path(&temp_dir, "right.sav");

    let mut five = Fixed::new([1u8, 2, 3, 4, 5]);
    let mut four = Fixed::new([9u8, 8, 7, 6]);
    {
        let mut mgr = SerializationManager::new().unwrap();
        mgr.register(&mut five).unwrap();
        mgr.save_all(&wrong).unwrap();
    }
    {
        let mut mgr = SerializationManager::new().unwrap();
        mgr.register(&mut four).unwrap();
        mgr.save_all(&right).unwrap();
    }

    let mut sink = Fixed::<4>::zeroed();
    let mut mgr = SerializationManager::new().unwrap();
    mgr.register(&mut sink).unwrap();

    match mgr.load_all(&wrong).unwrap_err() {
        Error::Import {
            index,
            record_type,
            source,
        } => {
            assert_eq!(index, 0);
            assert_eq!(record_type, FIXED_TYPE);
            assert_eq!(
                source,
                ImportError::SizeMismatch {
                    expected: 4,
                    actual: 5
                }
            );
        }
        other => panic!("Expected Import error, got {:?}", other),
    }

    mgr.load_all(&right).unwrap();
    drop(mgr);
    assert_eq!(sink.bytes, [9, 8, 7, 6]);
}

#[test]
fn test_failed_load_with_diagnostics() {
    init_tracing();
    let temp_dir = create_test_dir();
    let path = save_path(&temp_dir, "diag.sav");
    std::fs::write(&path, [2u8, 0, 0, 0]).unwrap();

    let mut obj = Message::default();
    let mut mgr = SerializationManager::with_options(ManagerOptions::verbose()).unwrap();
    mgr.register(&mut obj).unwrap();
    assert!(mgr.load_all(&path).unwrap_err().is_truncated());
}
