mod common;
use common::*;
use pow4th::lang::ErrorCode;
use pow4th::mach::{Image, Runtime};

#[test]
fn test_short_image_is_padded() {
    let bytes = [1, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
    let memory = Image::from_bytes(&bytes, 100).unwrap();
    assert_eq!(memory.len(), 100);
    assert_eq!(memory.get(0).unwrap(), 1);
    assert_eq!(memory.get(1).unwrap(), -1);
    assert!(memory.cells()[2..].iter().all(|c| *c == 0));
    assert_eq!(memory.cells()[2..].len(), 98);
}

#[test]
fn test_malformed_images() {
    let e = Image::from_bytes(&[1, 2, 3], 100).unwrap_err();
    assert!(e.is(ErrorCode::MalformedImage));
    let e = Image::from_bytes(&[0; 12], 2).unwrap_err();
    assert!(e.is(ErrorCode::MalformedImage));
}

#[test]
fn test_missing_image() {
    let mut r = Runtime::default();
    let e = r
        .load_image("/nonexistent/pow4th/ngaImage")
        .unwrap_err();
    assert!(e.is(ErrorCode::FileNotFound));
}

#[test]
fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("pow4th-{}.img", std::process::id()));
    let r = forth();
    r.save_image(&path).unwrap();
    let mut loaded = Runtime::new(r.config().clone());
    loaded.load_image(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(r.memory().mismatches(loaded.memory()).is_empty());
    assert_eq!(r.memory().checksum(), loaded.memory().checksum());
    loaded.enter("ok").unwrap();
    assert_eq!(loaded.take_output(), "ok");
}
