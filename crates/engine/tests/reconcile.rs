//! Integration tests for the reconciler and consistency checks
//!
//! Each test builds a registry mirror and an empty project inside a temporary
//! directory and drives the engine through the filesystem registry client.

#![allow(clippy::unwrap_used, clippy::panic)]

use hookshelf_config::{Project, ProjectConfig};
use hookshelf_engine::{
    Error, FileAction, InstallOptions, IssueKind, Reconciler, RealSystem, doctor, header,
    inventory, migrate, outdated, search,
};
use hookshelf_registry::{Registry, Remote};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    _temp: TempDir,
    registry_dir: PathBuf,
    project_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let registry_dir = temp.path().join("registry");
        let project_dir = temp.path().join("app");
        fs::create_dir_all(&registry_dir).unwrap();
        fs::create_dir_all(&project_dir).unwrap();

        let fixture = Self {
            _temp: temp,
            registry_dir,
            project_dir,
        };
        fixture.hook(
            "use-debounce",
            "1.2.0",
            "export function useDebounce<T>(value: T, delay: number): T {\n  return value;\n}\n",
        );
        fixture.hook(
            "use-toggle",
            "0.3.0",
            "\"use client\";\nimport { cn } from \"@/lib/utils\";\nexport function useToggle() {}\n",
        );
        fixture.index(&["use-debounce", "use-toggle"]);
        fixture
    }

    fn index(&self, ids: &[&str]) {
        let hooks: Vec<_> = ids
            .iter()
            .map(|id| json!({ "id": id, "path": format!("hooks/{id}"), "description": format!("The {id} hook") }))
            .collect();
        let registry = json!({
            "name": "test",
            "version": "2.0.0",
            "hooks": hooks,
            "presets": { "starter": ids }
        });
        fs::write(
            self.registry_dir.join("registry.json"),
            serde_json::to_string_pretty(&registry).unwrap(),
        )
        .unwrap();
    }

    fn hook(&self, id: &str, version: &str, source: &str) {
        let dir = self.registry_dir.join("hooks").join(id);
        fs::create_dir_all(&dir).unwrap();
        let meta = json!({
            "name": id,
            "version": version,
            "description": "",
            "tags": ["test"],
            "files": [{ "src": format!("{id}.ts"), "dest": format!("hooks/{id}.ts") }]
        });
        fs::write(dir.join("meta.json"), meta.to_string()).unwrap();
        fs::write(dir.join(format!("{id}.ts")), source).unwrap();
    }

    fn remote(&self) -> Remote {
        Remote::open(self.registry_dir.to_str().unwrap()).unwrap()
    }

    fn project(&self, config: ProjectConfig) -> Project {
        Project::new(&self.project_dir, config)
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.project_dir.join(rel)
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_install_writes_header_and_index() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);

    let report = reconciler
        .install("use-debounce", &InstallOptions::default())
        .unwrap();

    assert_eq!(report.version, "1.2.0");
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].action, FileAction::Created);

    let installed = read(&fx.path("src/hooks/use-debounce.ts"));
    let first_line = installed.lines().next().unwrap();
    assert!(first_line.contains("hook:use-debounce@1.2.0"));
    assert!(first_line.contains("registry:2.0.0"));
    assert!(installed.contains("export function useDebounce"));

    let index = read(&fx.path("src/hooks/index.ts"));
    assert_eq!(index, "export * from \"./use-debounce\";\n");
}

#[test]
fn test_reinstall_keeps_single_index_line() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);
    let force = InstallOptions {
        force: true,
        ..Default::default()
    };

    reconciler.install("use-debounce", &force).unwrap();
    let report = reconciler.install("use-debounce", &force).unwrap();

    assert!(report.index.is_none());
    let index = read(&fx.path("src/hooks/index.ts"));
    assert_eq!(index.matches("use-debounce").count(), 1);

    let installed = read(&fx.path("src/hooks/use-debounce.ts"));
    assert_eq!(installed.matches("@hookshelf").count(), 1);
}

#[test]
fn test_install_without_index() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig {
        add_index: false,
        ..Default::default()
    });
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    Reconciler::new(&project, &remote, &registry)
        .install("use-debounce", &InstallOptions::default())
        .unwrap();

    assert!(fx.path("src/hooks/use-debounce.ts").is_file());
    assert!(!fx.path("src/hooks/index.ts").exists());
}

#[test]
fn test_install_rewrites_aliases_and_strips_directive() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig {
        alias_prefix: Some("@/".to_string()),
        alias_target: Some(PathBuf::from("src")),
        ..Default::default()
    });
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let options = InstallOptions {
        strip_directive: true,
        ..Default::default()
    };

    Reconciler::new(&project, &remote, &registry)
        .install("use-toggle", &options)
        .unwrap();

    let installed = read(&fx.path("src/hooks/use-toggle.ts"));
    assert!(installed.contains("from \"../lib/utils\""));
    assert!(!installed.contains("use client"));
    assert_eq!(header::decode(&installed).unwrap().id, "use-toggle");
}

#[test]
fn test_directive_kept_by_default() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    Reconciler::new(&project, &remote, &registry)
        .install("use-toggle", &InstallOptions::default())
        .unwrap();

    let installed = read(&fx.path("src/hooks/use-toggle.ts"));
    assert_eq!(installed.lines().nth(1), Some("\"use client\";"));
    // No alias configured: the import is left as published
    assert!(installed.contains("from \"@/lib/utils\""));
}

#[test]
fn test_update_backs_up_unless_forced() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);
    let file = fx.path("src/hooks/use-debounce.ts");
    let backup = fx.path("src/hooks/use-debounce.ts.bak");

    reconciler
        .install("use-debounce", &InstallOptions::default())
        .unwrap();
    fs::write(&file, "// local edits\n").unwrap();

    let report = reconciler
        .update("use-debounce", &InstallOptions::default())
        .unwrap();
    assert!(matches!(
        report.files[0].action,
        FileAction::Replaced { backup: Some(_) }
    ));
    assert_eq!(read(&backup), "// local edits\n");
    assert!(read(&file).contains("hook:use-debounce@1.2.0"));

    fs::remove_file(&backup).unwrap();
    let force = InstallOptions {
        force: true,
        ..Default::default()
    };
    let report = reconciler.update("use-debounce", &force).unwrap();
    assert_eq!(
        report.files[0].action,
        FileAction::Replaced { backup: None }
    );
    assert!(!backup.exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let options = InstallOptions {
        dry_run: true,
        ..Default::default()
    };

    let report = Reconciler::new(&project, &remote, &registry)
        .install("use-debounce", &options)
        .unwrap();

    assert_eq!(report.files[0].action, FileAction::Planned);
    assert_eq!(
        report.files[0].path.as_path(),
        fx.path("src/hooks/use-debounce.ts")
    );
    assert!(report.index.is_none());
    assert!(!fx.path("src/hooks").exists());
}

#[test]
fn test_unknown_hook_fails_before_io() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    let err = Reconciler::new(&project, &remote, &registry)
        .install("use-ghost", &InstallOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::UnknownHook { ref id } if id == "use-ghost"));
    assert!(!fx.path("src/hooks").exists());
}

#[test]
fn test_install_then_remove() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);

    reconciler
        .install("use-debounce", &InstallOptions::default())
        .unwrap();
    reconciler
        .install("use-toggle", &InstallOptions::default())
        .unwrap();

    let report = reconciler.remove("use-debounce").unwrap();
    assert_eq!(report.removed.len(), 1);
    assert_eq!(report.index_updated.len(), 1);

    assert!(!fx.path("src/hooks/use-debounce.ts").exists());
    let index = read(&fx.path("src/hooks/index.ts"));
    assert!(!index.contains("use-debounce"));
    assert_eq!(index, "export * from \"./use-toggle\";\n");

    // Removing again is harmless
    let report = reconciler.remove("use-debounce").unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(report.missing.len(), 1);
}

#[test]
fn test_remove_prunes_both_index_files() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);

    reconciler
        .install("use-debounce", &InstallOptions::default())
        .unwrap();
    fs::write(
        fx.path("src/hooks/index.ts"),
        "export * from \"./use-debounce\";\nexport * from \"./use-debouncer\";\n",
    )
    .unwrap();
    fs::write(
        fx.path("src/hooks/index.js"),
        "export * from './use-debounce'\nexport * from './use-debouncer'\n",
    )
    .unwrap();

    let report = reconciler.remove("use-debounce").unwrap();
    assert_eq!(report.index_updated.len(), 2);

    assert_eq!(
        read(&fx.path("src/hooks/index.ts")),
        "export * from \"./use-debouncer\";\n"
    );
    assert_eq!(
        read(&fx.path("src/hooks/index.js")),
        "export * from './use-debouncer'\n"
    );
}

#[test]
fn test_install_preset() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let reconciler = Reconciler::new(&project, &remote, &registry);

    let reports = reconciler
        .install_preset("starter", &InstallOptions::default())
        .unwrap();
    assert_eq!(reports.len(), 2);

    let ids: Vec<_> = inventory::list(&project.install_root().unwrap())
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec!["use-debounce", "use-toggle"]);

    let err = reconciler
        .install_preset("missing", &InstallOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPreset { .. }));
}

#[test]
fn test_preset_with_unknown_hook_writes_nothing() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let mut registry = remote.registry().unwrap();
    registry.presets.insert(
        "broken".to_string(),
        vec!["use-debounce".to_string(), "use-ghost".to_string()],
    );
    let reconciler = Reconciler::new(&project, &remote, &registry);

    let err = reconciler.preset_ids("broken").unwrap_err();
    assert!(matches!(err, Error::UnknownHook { ref id } if id == "use-ghost"));

    let err = reconciler
        .install_preset("broken", &InstallOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownHook { .. }));
    assert!(!fx.path("src/hooks").exists());

    assert_eq!(
        reconciler.preset_ids("starter").unwrap(),
        ["use-debounce", "use-toggle"]
    );
}

#[test]
fn test_doctor_detects_id_mismatch() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig {
        add_index: false,
        ..Default::default()
    });
    let remote = fx.remote();
    let registry = remote.registry().unwrap();
    let root = project.install_root().unwrap();

    fs::create_dir_all(root.as_path()).unwrap();
    fs::write(
        root.as_path().join("use-debounce.ts"),
        format!("{}\nexport {{}};\n", header::encode("use-toggle", "0.3.0", "2.0.0")),
    )
    .unwrap();

    let items = inventory::list(&root).unwrap();
    let report = doctor(&registry, &items);

    assert!(!report.is_healthy());
    assert_eq!(report.issues.len(), 1);
    assert_eq!(
        report.issues[0].kind,
        IssueKind::IdMismatch {
            header_id: "use-toggle".to_string()
        }
    );
    assert!(report.issues[0].kind.to_string().contains("id mismatch"));
}

#[test]
fn test_doctor_after_clean_install_is_healthy() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    Reconciler::new(&project, &remote, &registry)
        .install_preset("starter", &InstallOptions::default())
        .unwrap();

    let items = inventory::list(&project.install_root().unwrap()).unwrap();
    let report = doctor(&registry, &items);
    assert!(report.is_healthy(), "{:?}", report.issues);
    assert_eq!(report.items_checked, 2);
}

#[test]
fn test_outdated_reports_newer_registry_versions() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    Reconciler::new(&project, &remote, &registry)
        .install_preset("starter", &InstallOptions::default())
        .unwrap();

    // Publish a newer use-debounce
    fx.hook("use-debounce", "1.3.0", "export function useDebounce() {}\n");

    let items = inventory::list(&project.install_root().unwrap()).unwrap();
    let report = outdated(&remote, &registry, &items).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].id, "use-debounce");
    assert_eq!(report[0].local, "1.2.0");
    assert_eq!(report[0].remote, "1.3.0");
}

#[test]
fn test_outdated_skips_hooks_unknown_to_registry() {
    let fx = Fixture::new();
    let project = fx.project(ProjectConfig::default());
    let root = project.install_root().unwrap();
    fs::create_dir_all(root.as_path()).unwrap();
    fs::write(root.as_path().join("use-local.ts"), "export {};\n").unwrap();

    let remote = fx.remote();
    let registry: Registry = remote.registry().unwrap();
    let items = inventory::list(&root).unwrap();

    assert!(outdated(&remote, &registry, &items).unwrap().is_empty());
}

#[test]
fn test_migrate_copies_and_updates_config() {
    let fx = Fixture::new();
    let mut project = fx.project(ProjectConfig::default());
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    Reconciler::new(&project, &remote, &registry)
        .install_preset("starter", &InstallOptions::default())
        .unwrap();
    fs::write(fx.path("src/hooks/notes.md"), "not a source file").unwrap();

    let report = migrate(&RealSystem, &mut project, Path::new("src/shared/hooks")).unwrap();

    assert!(!report.unchanged);
    assert_eq!(report.copied.len(), 3);
    for name in ["use-debounce.ts", "use-toggle.ts", "index.ts"] {
        assert_eq!(
            read(&fx.path(&format!("src/shared/hooks/{name}"))),
            read(&fx.path(&format!("src/hooks/{name}"))),
        );
    }
    assert!(!fx.path("src/shared/hooks/notes.md").exists());
    assert!(fx.path("src/hooks/use-debounce.ts").is_file());

    let saved = ProjectConfig::load(fx.path("hookshelf.json")).unwrap();
    assert_eq!(saved.base_dir, PathBuf::from("src/shared/hooks"));
    assert_eq!(project.config().base_dir, PathBuf::from("src/shared/hooks"));
}

#[test]
fn test_migrate_to_same_root_is_noop() {
    let fx = Fixture::new();
    let mut project = fx.project(ProjectConfig::default());

    let report = migrate(&RealSystem, &mut project, Path::new("./src/hooks/")).unwrap();

    assert!(report.unchanged);
    assert!(!fx.path("hookshelf.json").exists());
}

#[test]
fn test_search_matches_metadata() {
    let fx = Fixture::new();
    let remote = fx.remote();
    let registry = remote.registry().unwrap();

    let hits = search(&remote, &registry, "TOGGLE");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "use-toggle");
    assert_eq!(hits[0].version.as_deref(), Some("0.3.0"));

    let hits = search(&remote, &registry, "test");
    assert_eq!(hits.len(), 2);
}
