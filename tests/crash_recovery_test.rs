//! Crash Recovery Tests
//!
//! Saves replace the archive atomically: a reader sees the old archive or the
//! new one, never a mix, and a failed save leaves the old archive in place.

use std::fs;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;
use traineddata_rs::{ComponentKind, TrainedData};

/// Helper: Archive whose every component is filled with `fill`
fn archive_filled_with(fill: u8) -> TrainedData {
    let mut data = TrainedData::new();
    data.overwrite_entry(ComponentKind::Unicharset, vec![fill; 4096]);
    data.overwrite_entry(ComponentKind::Lstm, vec![fill; 64 * 1024]);
    data.set_version_string(&format!("gen-{}", fill));
    data
}

#[test]
fn test_interrupted_write_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eng.traineddata");
    let bytes = archive_filled_with(1).to_bytes().unwrap();

    // Simulate a non-atomic writer that died halfway.
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(TrainedData::open(&path).is_err());
}

#[test]
fn test_stale_temp_files_do_not_interfere() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eng.traineddata");
    fs::write(dir.path().join(".tmpABCDEF"), b"left over from a crash").unwrap();

    archive_filled_with(2).save_file(&path).unwrap();
    assert_eq!(TrainedData::open(&path).unwrap(), archive_filled_with(2));
}

#[test]
fn test_readers_never_see_partial_archive() {
    let dir = TempDir::new().unwrap();
    let path = Arc::new(dir.path().join("eng.traineddata"));
    archive_filled_with(0).save_file(path.as_ref()).unwrap();

    // Callers serialize load/modify/save sequences themselves.
    let writer_lock = Arc::new(Mutex::new(()));

    let writer = {
        let path = Arc::clone(&path);
        let lock = Arc::clone(&writer_lock);
        thread::spawn(move || {
            for generation in 1..=20u8 {
                let _guard = lock.lock().unwrap();
                archive_filled_with(generation).save_file(path.as_ref()).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let path = Arc::clone(&path);
            thread::spawn(move || {
                for _ in 0..50 {
                    let data = TrainedData::open(path.as_ref()).unwrap();
                    let fill = data.component(ComponentKind::Unicharset).unwrap()[0];
                    assert_eq!(data, archive_filled_with(fill));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(TrainedData::open(path.as_ref()).unwrap(), archive_filled_with(20));
}

#[test]
fn test_overwrite_failure_keeps_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eng.traineddata");
    archive_filled_with(3).save_file(&path).unwrap();
    let before = fs::read(&path).unwrap();

    // Second input does not exist: nothing may be written.
    let good = dir.path().join("eng.config");
    fs::write(&good, b"x 1\n").unwrap();
    let missing = dir.path().join("eng.inttemp");
    assert!(TrainedData::new()
        .overwrite_components(&path, &[&good, &missing])
        .is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[cfg(unix)]
fn mode_of(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).unwrap().permissions().mode() & 0o777
}

#[cfg(unix)]
#[test]
fn test_replaced_archive_keeps_its_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eng.traineddata");
    archive_filled_with(4).save_file(&path).unwrap();

    for mode in [0o644, 0o640] {
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();

        let replacement = dir.path().join("eng.config");
        fs::write(&replacement, b"load_system_dawg 0\n").unwrap();
        TrainedData::new()
            .overwrite_components(&path, &[&replacement])
            .unwrap();

        assert_eq!(mode_of(&path), mode);
    }
}

#[cfg(unix)]
#[test]
fn test_new_archive_gets_default_create_mode() {
    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("reference");
    fs::write(&reference, b"x").unwrap();

    fs::write(dir.path().join("eng.unicharset"), b"1\nNULL 0 Common 0\n").unwrap();
    let output = dir.path().join("eng.traineddata");
    TrainedData::new()
        .combine_data_files(dir.path().join("eng."), &output)
        .unwrap();

    assert_eq!(mode_of(&output), mode_of(&reference));
}
