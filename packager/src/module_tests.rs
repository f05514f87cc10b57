//! Behavioural tests for module packaging.

use super::*;
use std::io::Read;

fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp path")
}

fn write_file(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(path, contents).expect("write file");
}

/// Create `modules/{name}` under the app root with a metadata file.
fn write_module(app_root: &Utf8Path, name: &str, version: &str, extra_metadata: &str) {
    let module_root = app_root.join("modules").join(name);
    fs::create_dir_all(&module_root).expect("create module root");
    let metadata = format!(r#"{{"version": "{version}"{extra_metadata}}}"#);
    write_file(&module_root.join("package.json"), metadata.as_bytes());
}

fn archive_names(path: &Utf8Path) -> Vec<String> {
    let archive =
        zip::ZipArchive::new(fs::File::open(path).expect("open archive")).expect("read zip");
    archive.file_names().map(ToOwned::to_owned).collect()
}

fn read_member(path: &Utf8Path, member: &str) -> String {
    let mut archive =
        zip::ZipArchive::new(fs::File::open(path).expect("open archive")).expect("read zip");
    let mut contents = String::new();
    archive
        .by_name(member)
        .expect("member present")
        .read_to_string(&mut contents)
        .expect("read member");
    contents
}

fn manifest_in(path: &Utf8Path) -> serde_json::Value {
    serde_json::from_str(&read_member(path, MANIFEST_FILE_NAME)).expect("parse manifest")
}

fn demo_name() -> ModuleName {
    ModuleName::try_from("Demo").expect("valid module name")
}

#[test]
fn packages_a_module_with_exclusions_and_manifest() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(&app_root, "Demo", "1.4.2", "");
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join("foo.php"), b"A");
    write_file(&module_root.join(".git/config"), b"[core]");
    write_file(&module_root.join("node_modules/x.js"), b"x");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let archive = package_module(&layout, &demo_name()).expect("package module");

    assert!(archive.is_absolute());
    assert_eq!(archive, layout.dist_dir().join("Demo-1.4.2.zip"));

    let names = archive_names(&archive);
    assert!(names.contains(&"foo.php".to_owned()));
    assert!(names.contains(&MANIFEST_FILE_NAME.to_owned()));
    assert!(
        names.iter().all(|n| !n.contains(".git") && !n.contains("node_modules")),
        "excluded paths must not be archived: {names:?}"
    );

    let manifest = manifest_in(&archive);
    assert_eq!(manifest["foo.php"], "d3d99e8b");
    assert!(manifest.get(".git/config").is_none());
    assert!(manifest.get(MANIFEST_FILE_NAME).is_none());
}

#[test]
fn synthesises_ancestor_directories_for_kept_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(&app_root, "Demo", "0.1.0", "");
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join("a/b/c.txt"), b"nested content");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let archive = package_module(&layout, &demo_name()).expect("package module");

    let manifest = manifest_in(&archive);
    assert_eq!(manifest["a"], serde_json::Value::Null);
    assert_eq!(manifest["a/b"], serde_json::Value::Null);
    assert_eq!(manifest["a/b/c.txt"], "34902a4b");

    let names = archive_names(&archive);
    assert!(names.contains(&"a/".to_owned()));
    assert!(names.contains(&"a/b/".to_owned()));
    assert!(names.contains(&"a/b/c.txt".to_owned()));
}

#[test]
fn manifest_and_archive_members_are_consistent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(&app_root, "Demo", "0.1.0", "");
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join("src/view.php"), b"<?php echo 1;");
    write_file(&module_root.join("lang"), b"");
    fs::create_dir_all(module_root.join("public")).expect("empty dir");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let archive = package_module(&layout, &demo_name()).expect("package module");

    let mut member_keys: Vec<String> = archive_names(&archive)
        .into_iter()
        .filter(|name| name != MANIFEST_FILE_NAME)
        .map(|name| name.trim_end_matches('/').to_owned())
        .collect();
    member_keys.sort();

    let manifest = manifest_in(&archive);
    let mut manifest_keys: Vec<String> = manifest
        .as_object()
        .expect("manifest is an object")
        .keys()
        .cloned()
        .collect();
    manifest_keys.sort();

    assert_eq!(member_keys, manifest_keys);
}

#[test]
fn repackaging_an_unchanged_tree_is_byte_identical() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(&app_root, "Demo", "0.1.0", "");
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join("src/view.php"), b"<?php echo 1;");
    write_file(&module_root.join("readme.txt"), b"demo file");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let first_path = package_module(&layout, &demo_name()).expect("first run");
    let first_bytes = fs::read(&first_path).expect("read first archive");
    let first_manifest = read_member(&first_path, MANIFEST_FILE_NAME);

    let second_path = package_module(&layout, &demo_name()).expect("second run");
    let second_bytes = fs::read(&second_path).expect("read second archive");

    assert_eq!(first_path, second_path);
    assert_eq!(first_manifest, read_member(&second_path, MANIFEST_FILE_NAME));
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn module_override_patterns_extend_the_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(
        &app_root,
        "Demo",
        "0.1.0",
        r#", "framelix": {"release": {"exclude": ["\\.md$"]}}"#,
    );
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join("notes.md"), b"drop me");
    write_file(&module_root.join("keep.php"), b"A");
    write_file(&module_root.join("node_modules/x.js"), b"x");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let archive = package_module(&layout, &demo_name()).expect("package module");

    let names = archive_names(&archive);
    assert!(names.contains(&"keep.php".to_owned()));
    assert!(!names.contains(&"notes.md".to_owned()));
    assert!(!names.contains(&"node_modules/x.js".to_owned()));
}

#[test]
fn gitignore_survives_every_pattern() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(&app_root, "Demo", "0.1.0", "");
    let module_root = app_root.join("modules/Demo");
    write_file(&module_root.join(".gitignore"), b"tmp/");
    write_file(&module_root.join(".git/config"), b"[core]");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let archive = package_module(&layout, &demo_name()).expect("package module");

    let names = archive_names(&archive);
    assert!(names.contains(&".gitignore".to_owned()));
    assert!(!names.contains(&".git/".to_owned()));
}

#[test]
fn missing_module_directory_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    fs::create_dir_all(app_root.join("modules")).expect("modules dir");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let err = package_module(&layout, &demo_name()).expect_err("expected missing module");
    assert!(matches!(err, PackagerError::ModuleNotFound { .. }));
}

#[test]
fn missing_metadata_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    fs::create_dir_all(app_root.join("modules/Demo")).expect("module dir");

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let err = package_module(&layout, &demo_name()).expect_err("expected metadata failure");
    assert!(matches!(err, PackagerError::Metadata(_)));
}

#[test]
fn malformed_override_pattern_aborts_the_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let app_root = utf8_root(&dir);
    write_module(
        &app_root,
        "Demo",
        "0.1.0",
        r#", "framelix": {"release": {"exclude": ["[unclosed"]}}"#,
    );

    let layout = AppLayout::discover(&app_root).expect("discover layout");
    let err = package_module(&layout, &demo_name()).expect_err("expected pattern failure");
    assert!(matches!(err, PackagerError::InvalidExclusionPattern { .. }));
    assert!(!layout.dist_dir().join("Demo-0.1.0.zip").exists());
}
