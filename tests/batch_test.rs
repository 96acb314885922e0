use std::fs;
use std::path::Path;

use dprender::batch::{find_config_files, run_batch, InputKind, Settings};
use dprender::error::Error;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    settings: Settings,
    products: std::path::PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("template");
        fs::create_dir_all(templates.join("modules")).unwrap();
        fs::write(
            templates.join("main.tf.jinja"),
            "module \"{{ data_product_name_standardised }}\" {}\n",
        )
        .unwrap();
        fs::write(templates.join("modules/versions.tf"), "terraform {}\n").unwrap();

        let products = dir.path().join("data-products");
        fs::create_dir_all(&products).unwrap();

        let settings = Settings {
            template_root: templates,
            output_root: dir.path().join("output"),
            fail_fast: false,
            strict: false,
            check_names: false,
        };
        Self { _dir: dir, settings, products }
    }

    fn product(&self, file: &str, content: &str) -> std::path::PathBuf {
        let path = self.products.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    fn rendered(&self, name: &str) -> String {
        fs::read_to_string(self.settings.output_root.join(name).join("main.tf")).unwrap()
    }

    fn output_count(&self) -> usize {
        match fs::read_dir(&self.settings.output_root) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }
}

#[test_log::test]
fn test_single_file() {
    let ws = Workspace::new();
    let config = ws.product("c360.yaml", "name: Customer 360\nowner:\n  division: Sales\n");

    let report = run_batch("prod", &config, &ws.settings).unwrap();

    assert_eq!(report.input, InputKind::File);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(ws.rendered("c360"), "module \"customer-360\" {}\n");
    assert_eq!(
        fs::read_to_string(ws.settings.output_root.join("c360/modules/versions.tf")).unwrap(),
        "terraform {}\n"
    );
}

#[test_log::test]
fn test_non_yaml_file_is_skipped() {
    let ws = Workspace::new();
    let config = ws.product("notes.txt", "name: nope\n");

    let report = run_batch("prod", &config, &ws.settings).unwrap();

    assert_eq!(report.input, InputKind::Skipped);
    assert!(report.outcomes.is_empty());
    assert_eq!(ws.output_count(), 0);
}

#[test_log::test]
fn test_missing_path_is_reported_not_raised() {
    let ws = Workspace::new();

    let report = run_batch("prod", ws.products.join("missing.yaml"), &ws.settings).unwrap();

    assert_eq!(report.input, InputKind::Missing);
    assert!(report.into_result().is_ok());
}

#[test_log::test]
fn test_directory_without_configs() {
    let ws = Workspace::new();
    ws.product("README.md", "# products\n");

    let report = run_batch("prod", &ws.products, &ws.settings).unwrap();

    assert_eq!(report.input, InputKind::Directory);
    assert!(report.outcomes.is_empty());
    assert_eq!(ws.output_count(), 0);
}

#[test_log::test]
fn test_directory_renders_every_config() {
    let ws = Workspace::new();
    ws.product("a.yaml", "name: Shared\nowner: {}\n");
    ws.product("b.yml", "name: Shared\nowner: {}\n");
    ws.product("ignored.json", "{}");
    fs::create_dir_all(ws.products.join("nested.yaml")).unwrap();

    let report = run_batch("prod", &ws.products, &ws.settings).unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(ws.rendered("a"), "module \"shared\" {}\n");
    assert_eq!(ws.rendered("b"), "module \"shared\" {}\n");
    assert_eq!(ws.output_count(), 2);
}

#[test_log::test]
fn test_failures_do_not_stop_the_batch() {
    let ws = Workspace::new();
    ws.product("a_broken.yaml", "name: [unclosed\n");
    ws.product("b_good.yaml", "name: Good\n");

    let report = run_batch("prod", &ws.products, &ws.settings).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert!(matches!(
        report.outcomes[0].output,
        Err(Error::ConfigParseError { .. })
    ));
    assert_eq!(ws.rendered("b_good"), "module \"good\" {}\n");
    assert!(matches!(
        report.into_result(),
        Err(Error::BatchError { failed: 1, total: 2 })
    ));
}

#[test_log::test]
fn test_fail_fast_halts_on_first_error() {
    let mut ws = Workspace::new();
    ws.settings.fail_fast = true;
    ws.product("a_broken.yaml", "name: [unclosed\n");
    ws.product("b_good.yaml", "name: Good\n");

    let err = run_batch("prod", &ws.products, &ws.settings).unwrap_err();

    assert!(matches!(err, Error::ConfigParseError { .. }));
    assert!(!ws.settings.output_root.join("b_good").exists());
}

#[test_log::test]
fn test_name_check_blocks_duplicates() {
    let mut ws = Workspace::new();
    ws.settings.check_names = true;
    ws.product("a.yaml", "name: Customer 360\n");
    ws.product("b.yaml", "name: customer 360\n");

    let err = run_batch("prod", &ws.products, &ws.settings).unwrap_err();

    match err {
        Error::NameValidationError(report) => {
            assert!(report.contains("Names that resolve to 'customer 360' appear 2 times"))
        }
        other => panic!("Expected NameValidationError, got {other:?}"),
    }
    assert_eq!(ws.output_count(), 0);
}

#[test_log::test]
fn test_name_check_skips_empty_files() {
    let mut ws = Workspace::new();
    ws.settings.check_names = true;
    ws.product("a.yaml", "name: Customer 360\n");
    ws.product("blank.yaml", "");

    let report = run_batch("prod", &ws.products, &ws.settings).unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(ws.rendered("blank"), "module \"demo-data-product\" {}\n");
}

#[test]
fn test_find_config_files_is_sorted_and_shallow() {
    let dir = TempDir::new().unwrap();
    for name in ["b.yml", "a.yaml", "c.txt"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/d.yaml"), "").unwrap();

    let files = find_config_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names, vec!["a.yaml", "b.yml"]);
    assert!(files.iter().all(|p| p.parent() == Some(Path::new(dir.path()))));
}
