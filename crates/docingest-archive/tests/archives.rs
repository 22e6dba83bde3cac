use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use docingest_archive::{Archive, ArchiveKind, EntryKind, Error, TarCompress};
use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
    }
    writer.finish().unwrap();
}

fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Collect (name, kind, content) for every entry.
fn collect(archive: Archive) -> Vec<(String, EntryKind, String)> {
    let mut seen = Vec::new();
    archive.for_each_entry(|entry| {
        let mut entry = entry.unwrap();
        let mut content = String::new();
        entry.reader().read_to_string(&mut content).unwrap();
        seen.push((entry.name().to_string(), entry.kind(), content));
    });
    seen
}

fn fixture(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

#[test]
fn zip_entries_in_native_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.zip");
    write_zip(
        &path,
        &[
            ("docs/", b""),
            ("docs/a.txt", b"alpha"),
            ("b.bin", b"\x00\x01"),
            ("c.txt", b"gamma"),
        ],
    );

    let archive = Archive::open(&path, ArchiveKind::Zip).unwrap();
    let seen = collect(archive);
    let names: Vec<_> = seen.iter().map(|(n, _, _)| n.as_str()).collect();
    assert_eq!(names, ["docs/", "docs/a.txt", "b.bin", "c.txt"]);
    assert_eq!(seen[0].1, EntryKind::Directory);
    assert_eq!(seen[1].2, "alpha");
}

#[test]
fn corrupt_zip_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "broken.zip");
    std::fs::write(&path, b"this is definitely not a zip archive").unwrap();

    let err = Archive::open(&path, ArchiveKind::Zip).err().unwrap();
    assert!(err.is_open_failure());
    assert!(matches!(err, Error::Open { kind: ArchiveKind::Zip, .. }));
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let err = Archive::open(fixture(&dir, "absent.zip"), ArchiveKind::Zip)
        .err()
        .unwrap();
    assert!(err.is_open_failure());
}

#[test]
fn plain_tar() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.tar");
    std::fs::write(&path, tar_bytes(&[("a.txt", b"one"), ("sub/b.txt", b"two")])).unwrap();

    let seen = collect(Archive::open(&path, ArchiveKind::Tar(TarCompress::None)).unwrap());
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].0, "sub/b.txt");
    assert_eq!(seen[1].2, "two");
}

#[test]
fn gzipped_tar() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.tar.gz");
    std::fs::write(&path, gzip(&tar_bytes(&[("a.txt", b"one")]))).unwrap();

    let archive = Archive::open(&path, ArchiveKind::Tar(TarCompress::Gzip)).unwrap();
    assert_eq!(archive.kind(), ArchiveKind::Tar(TarCompress::Gzip));
    let seen = collect(archive);
    assert_eq!(seen, [("a.txt".to_string(), EntryKind::File, "one".to_string())]);
}

#[test]
fn corrupt_tar_gz_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "broken.tar.gz");
    std::fs::write(&path, b"no gzip magic here at all").unwrap();

    let err = Archive::open(&path, ArchiveKind::Tar(TarCompress::Gzip))
        .err()
        .unwrap();
    assert!(err.is_open_failure());
}

fn truncated(mut data: Vec<u8>) -> Vec<u8> {
    data.truncate(data.len() / 2);
    data
}

fn three_entry_tar() -> Vec<u8> {
    let big = vec![b'x'; 4000];
    tar_bytes(&[("a.txt", b"first"), ("b.txt", &big), ("c.txt", b"third")])
}

#[test]
fn truncated_tar_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "trunc.tar");
    std::fs::write(&path, truncated(three_entry_tar())).unwrap();

    let err = Archive::open(&path, ArchiveKind::Tar(TarCompress::None))
        .err()
        .unwrap();
    assert!(matches!(err, Error::Open { kind: ArchiveKind::Tar(TarCompress::None), .. }));
}

#[test]
fn truncated_tar_gz_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "trunc.tar.gz");
    std::fs::write(&path, truncated(gzip(&three_entry_tar()))).unwrap();

    let err = Archive::open(&path, ArchiveKind::Tar(TarCompress::Gzip))
        .err()
        .unwrap();
    assert!(err.is_open_failure());
}

#[test]
fn empty_tar_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "empty.tar");
    std::fs::write(&path, b"").unwrap();

    let err = Archive::open(&path, ArchiveKind::Tar(TarCompress::None))
        .err()
        .unwrap();
    assert!(err.is_open_failure());
    assert!(err.to_string().contains("no entries"));
}

#[test]
fn tar_entries_report_recorded_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "sized.tar");
    std::fs::write(&path, three_entry_tar()).unwrap();

    let mut sizes = Vec::new();
    Archive::open(&path, ArchiveKind::Tar(TarCompress::None))
        .unwrap()
        .for_each_entry(|entry| sizes.push(entry.unwrap().size()));
    assert_eq!(sizes, [Some(5), Some(4000), Some(5)]);
}

#[test]
fn zip_symlink_is_a_link() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "links.zip");
    let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
    writer
        .add_symlink("shortcut.txt", "/etc/passwd", SimpleFileOptions::default())
        .unwrap();
    writer
        .start_file("real.txt", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"content").unwrap();
    writer.finish().unwrap();

    let mut kinds = Vec::new();
    Archive::open(&path, ArchiveKind::Zip)
        .unwrap()
        .for_each_entry(|entry| {
            let entry = entry.unwrap();
            kinds.push((entry.name().to_string(), entry.kind()));
        });
    assert_eq!(
        kinds,
        [
            ("shortcut.txt".to_string(), EntryKind::Link),
            ("real.txt".to_string(), EntryKind::File),
        ]
    );
}

#[test]
fn bare_gz_is_single_entry_named_after_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "notes.txt.gz");
    std::fs::write(&path, gzip(b"plain notes")).unwrap();

    let archive = Archive::open(&path, ArchiveKind::Gzip).unwrap();
    assert_eq!(archive.kind(), ArchiveKind::Gzip);
    let seen = collect(archive);
    assert_eq!(
        seen,
        [("notes.txt".to_string(), EntryKind::File, "plain notes".to_string())]
    );
}

#[test]
fn gz_wrapping_tar_is_read_as_tar() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.gz");
    let tarball = {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_ustar();
        header.set_size(3);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, "x.txt", &b"xyz"[..]).unwrap();
        builder.into_inner().unwrap()
    };
    std::fs::write(&path, gzip(&tarball)).unwrap();

    let archive = Archive::open(&path, ArchiveKind::Gzip).unwrap();
    assert_eq!(archive.kind(), ArchiveKind::Tar(TarCompress::Gzip));
    assert_eq!(collect(archive)[0].0, "x.txt");
}

#[test]
fn for_each_entry_counts_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.zip");
    write_zip(&path, &[("a.txt", b"alpha"), ("b.txt", b"beta")]);

    let archive = Archive::open(&path, ArchiveKind::Zip).unwrap();
    let mut names = Vec::new();
    let count = archive.for_each_entry(|entry| match entry {
        Ok(entry) => names.push(entry.name().to_string()),
        Err(e) => panic!("unexpected entry error: {e}"),
    });
    assert_eq!(count, 2);
    assert_eq!(names, ["a.txt", "b.txt"]);
}

#[cfg(not(feature = "sevenz"))]
#[test]
fn sevenz_without_feature_is_not_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture(&dir, "bundle.7z");
    std::fs::write(&path, b"7z").unwrap();

    let err = Archive::open(&path, ArchiveKind::SevenZip).err().unwrap();
    assert!(matches!(err, Error::NotCompiled { kind: ArchiveKind::SevenZip }));
}

#[cfg(not(feature = "rar"))]
#[test]
fn rar_without_feature_is_not_compiled() {
    let dir = tempfile::tempdir().unwrap();
    let err = Archive::open(fixture(&dir, "bundle.rar"), ArchiveKind::Rar)
        .err()
        .unwrap();
    assert!(matches!(err, Error::NotCompiled { kind: ArchiveKind::Rar }));
}
