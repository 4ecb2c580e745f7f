mod common;

use std::fs;
use std::io::Read;
use std::path::Path;

use common::{ZipBuilder, gzip, quiet_bridge};
use fsbridge::{UnsafeEntryPath, ZipExtractor};

fn tree(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    fn walk(root: &Path, dir: &Path, found: &mut Vec<String>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            if path.is_dir() {
                found.push(format!("{rel}/"));
                walk(root, &path, found);
            } else {
                found.push(rel);
            }
        }
    }
    walk(root, root, &mut found);
    found.sort();
    found
}

#[test]
fn extracts_well_formed_entries() {
    let dir = tempfile::tempdir().unwrap();
    ZipBuilder::new()
        .dir("a/")
        .file("a/b.txt", b"hello zip")
        .write_to(&dir.path().join("in.zip"));

    let bridge = quiet_bridge(dir.path());
    let result = bridge.unzip_zip_file("in.zip", "out");
    assert!(result.ok, "{}", result.message);
    assert_eq!(result.message, "Success");

    let out = dir.path().join("out");
    assert_eq!(tree(&out), vec!["a/", "a/b.txt"]);
    assert_eq!(fs::read(out.join("a/b.txt")).unwrap(), b"hello zip");
}

#[test]
fn refuses_entries_escaping_the_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("x/y");
    fs::create_dir_all(&nested).unwrap();
    ZipBuilder::new()
        .file("../../evil.txt", b"pwned")
        .write_to(&nested.join("evil.zip"));

    let bridge = quiet_bridge(&nested);
    let result = bridge.unzip_zip_file("evil.zip", "out");
    assert!(!result.ok);
    assert!(result.message.contains("invalid file path"), "{}", result.message);

    assert!(!dir.path().join("x/evil.txt").exists());
    assert!(!nested.join("evil.txt").exists());
    assert!(!dir.path().join("evil.txt").exists());
}

#[test]
fn stops_at_first_unsafe_entry_without_rollback() {
    let dir = tempfile::tempdir().unwrap();
    ZipBuilder::new()
        .file("first.txt", b"1")
        .file("sub/../../escape.txt", b"2")
        .file("third.txt", b"3")
        .write_to(&dir.path().join("mixed.zip"));

    let bridge = quiet_bridge(dir.path());
    let result = bridge.unzip_zip_file("mixed.zip", "out");
    assert!(!result.ok);

    let out = dir.path().join("out");
    assert_eq!(fs::read(out.join("first.txt")).unwrap(), b"1");
    assert!(!out.join("third.txt").exists());
    assert!(!dir.path().join("escape.txt").exists());
}

#[test]
fn refuses_absolute_entry_names() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("abs-target.txt");
    let name = target.to_string_lossy().replace('\\', "/");
    ZipBuilder::new()
        .file(&name, b"nope")
        .write_to(&dir.path().join("abs.zip"));

    let result = quiet_bridge(dir.path()).unzip_zip_file("abs.zip", "out");
    assert!(!result.ok);
    assert!(!target.exists());
}

#[test]
fn extracts_deflated_entries_and_implicit_parents() {
    let dir = tempfile::tempdir().unwrap();
    let big: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
    ZipBuilder::new()
        .deflated("deep/nested/data.bin", &big)
        .file("deep/empty.txt", b"")
        .write_to(&dir.path().join("d.zip"));

    let result = quiet_bridge(dir.path()).unzip_zip_file("d.zip", "out");
    assert!(result.ok, "{}", result.message);

    let out = dir.path().join("out");
    assert_eq!(fs::read(out.join("deep/nested/data.bin")).unwrap(), big);
    assert_eq!(fs::metadata(out.join("deep/empty.txt")).unwrap().len(), 0);
}

#[test]
fn overwrites_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("f.txt"), "a much longer previous content").unwrap();
    ZipBuilder::new()
        .file("f.txt", b"new")
        .write_to(&dir.path().join("o.zip"));

    let result = quiet_bridge(dir.path()).unzip_zip_file("o.zip", "out");
    assert!(result.ok, "{}", result.message);
    assert_eq!(fs::read(out.join("f.txt")).unwrap(), b"new");
}

#[test]
#[cfg(unix)]
fn applies_stored_unix_modes() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    ZipBuilder::new()
        .file("secret.txt", b"s")
        .mode(0o100600)
        .file("run.sh", b"#!/bin/sh\n")
        .mode(0o100700)
        .write_to(&dir.path().join("m.zip"));

    let result = quiet_bridge(dir.path()).unzip_zip_file("m.zip", "out");
    assert!(result.ok, "{}", result.message);

    let mode = |name: &str| {
        fs::metadata(dir.path().join("out").join(name))
            .unwrap()
            .permissions()
            .mode()
            & 0o777
    };
    assert_eq!(mode("secret.txt"), 0o600);
    assert_eq!(mode("run.sh"), 0o700);
}

#[test]
fn corrupt_entry_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    ZipBuilder::new()
        .file("ok.txt", b"fine")
        .file("bad.txt", b"damaged")
        .bad_crc()
        .write_to(&dir.path().join("c.zip"));

    let result = quiet_bridge(dir.path()).unzip_zip_file("c.zip", "out");
    assert!(!result.ok);
    assert!(result.message.contains("checksum"), "{}", result.message);
    assert!(dir.path().join("out/ok.txt").exists());
}

#[test]
fn malformed_or_missing_archives_fail() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("junk.zip"), "this is not a zip archive at all").unwrap();
    let bridge = quiet_bridge(dir.path());

    let result = bridge.unzip_zip_file("junk.zip", "out");
    assert!(!result.ok);
    assert!(result.message.contains("not a valid zip file"), "{}", result.message);

    let result = bridge.unzip_zip_file("missing.zip", "out");
    assert!(!result.ok);
    assert!(result.message.contains("missing.zip"), "{}", result.message);
}

#[test]
fn extractor_reports_unsafe_entries_as_typed_error() {
    let dir = tempfile::tempdir().unwrap();
    let archive = ZipBuilder::new().file("../up.txt", b"x").build();

    let err = ZipExtractor::new(archive)
        .extract_all(&dir.path().join("out"))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<UnsafeEntryPath>(),
        Some(&UnsafeEntryPath {
            name: "../up.txt".into()
        })
    );
}

#[test]
fn extractor_keeps_archive_order() {
    let archive = ZipBuilder::new()
        .file("z.txt", b"z")
        .file("a.txt", b"a")
        .dir("m/")
        .build();

    let extractor = ZipExtractor::new(archive);
    let names: Vec<_> = extractor
        .list_files()
        .unwrap()
        .into_iter()
        .map(|e| e.file_name)
        .collect();
    assert_eq!(names, ["z.txt", "a.txt", "m/"]);

    let entries = extractor.list_files().unwrap();
    let mut data = Vec::new();
    extractor
        .open_entry(&entries[1])
        .unwrap()
        .read_to_end(&mut data)
        .unwrap();
    assert_eq!(data, b"a");
}

#[test]
fn gunzip_restores_plaintext() {
    let dir = tempfile::tempdir().unwrap();
    let plain = "line one\nline two\n".repeat(500);
    fs::write(dir.path().join("log.gz"), gzip(plain.as_bytes())).unwrap();

    let bridge = quiet_bridge(dir.path());
    let result = bridge.unzip_gz_file("log.gz", "log.txt");
    assert!(result.ok, "{}", result.message);
    assert_eq!(result.message, "Success");
    assert_eq!(fs::read_to_string(dir.path().join("log.txt")).unwrap(), plain);
}

#[test]
fn gunzip_joins_concatenated_members() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = gzip(b"first");
    data.extend(gzip(b"second"));
    fs::write(dir.path().join("multi.gz"), data).unwrap();

    let result = quiet_bridge(dir.path()).unzip_gz_file("multi.gz", "multi.txt");
    assert!(result.ok, "{}", result.message);
    assert_eq!(
        fs::read_to_string(dir.path().join("multi.txt")).unwrap(),
        "firstsecond"
    );
}

#[test]
fn gunzip_rejects_non_gzip_tail() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = gzip(b"first");
    data.extend_from_slice(b"GARBAGE-NOT-GZIP");
    fs::write(dir.path().join("tail.gz"), data).unwrap();

    let result = quiet_bridge(dir.path()).unzip_gz_file("tail.gz", "tail.txt");
    assert!(!result.ok);
    assert!(result.message.contains("tail.gz"), "{}", result.message);
}

#[test]
fn gunzip_failures_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("plain.gz"), "not compressed").unwrap();
    let bridge = quiet_bridge(dir.path());

    let result = bridge.unzip_gz_file("plain.gz", "out.txt");
    assert!(!result.ok);

    let result = bridge.unzip_gz_file("absent.gz", "out2.txt");
    assert!(!result.ok);
    assert!(result.message.contains("absent.gz"), "{}", result.message);
    assert!(!dir.path().join("out2.txt").exists());

    fs::write(dir.path().join("fine.gz"), gzip(b"x")).unwrap();
    let result = bridge.unzip_gz_file("fine.gz", "no/such/dir/out.txt");
    assert!(!result.ok);
}
