//! Output sink: file naming and persistence

use std::fs;
use suitegen::{persist, render, Framework, RenderOptions, TestSpecification};
use tempfile::TempDir;

#[test]
fn test_auth_service_jest_path_is_stable() {
    let spec = TestSpecification::builder("Auth Service")
        .methods(["login", "logout"])
        .build()
        .unwrap();
    let tmp = TempDir::new().unwrap();

    for _ in 0..2 {
        let suite = render(&spec, Framework::Jest, &RenderOptions::default());
        let path = persist(&suite, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("authservice.test.js"));
    }
    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_batch_written_to_one_directory() {
    let spec = TestSpecification::builder("Auth Service")
        .methods(["login"])
        .build()
        .unwrap();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("generated");

    let mut written: Vec<String> = Framework::ALL
        .iter()
        .filter(|&&fw| fw != Framework::Unittest)
        .map(|&fw| {
            let suite = render(&spec, fw, &RenderOptions::default());
            let path = persist(&suite, &out).unwrap();
            path.file_name().unwrap().to_string_lossy().into_owned()
        })
        .collect();
    written.sort();
    assert_eq!(
        written,
        vec!["AuthServiceTest.java", "authservice.test.js", "test_auth_service.py"]
    );
}
