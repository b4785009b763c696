/// Graph-mode pipeline tests: walk a temporary tree, build the reference graph and
/// read the written snapshot back.

use std::fs;
use std::path::Path;

use refscan::application::{DependencyGraphUsecase, ScanConfig};
use refscan::domain::graph::{AccumulationPolicy, DependencyGraph};
use refscan::domain::language::Language;
use refscan::domain::source_file::ScannedFile;
use refscan::error::{Result, ScanError};
use refscan::infrastructure::{FileScanner, JsonExporter};
use refscan::ports::ReferenceSource;
use serde_json::Value;
use tempfile::tempdir;

fn config(root: &Path, output: &Path, language: Language, workers: usize) -> ScanConfig {
    let mut config = ScanConfig::new(root, language);
    config.output = output.to_path_buf();
    config.workers = workers;
    config
}

fn run_graph(config: &ScanConfig, policy: AccumulationPolicy) -> anyhow::Result<DependencyGraph> {
    let scanner = FileScanner::for_language(config.language)?;
    let usecase = DependencyGraphUsecase {
        source: &scanner,
        exporter: &JsonExporter,
        policy,
    };
    Ok(usecase.run(config)?.graph)
}

#[test]
fn helper_called_twice_from_mod1() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(
        src.path().join("mod1.py"),
        "import helper\n\ndef main():\n    helper.run()\n    helper.run()\n",
    )
    .unwrap();
    fs::write(src.path().join("mod2.py"), "x = 1\n").unwrap();

    let output = out.path().join("data.json");
    let graph = run_graph(
        &config(src.path(), &output, Language::Python, 4),
        AccumulationPolicy::Preserve,
    )
    .unwrap();

    let helper = graph.edges("helper").expect("helper node");
    assert_eq!(helper.len(), 1);
    assert_eq!(helper[0].to, "mod1");
    assert_eq!(helper[0].weight, 2.0);
    assert_eq!(graph.edges("mod2").expect("mod2 node").len(), 0);

    let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);

    let find = |name: &str| {
        records
            .iter()
            .find(|r| r["Package"] == name)
            .unwrap_or_else(|| panic!("missing record {}", name))
    };
    assert_eq!(find("helper")["CalledBy"]["mod1"], 2.0);
    assert!(find("mod2")["CalledBy"].as_object().unwrap().is_empty());
    assert_eq!(find("mod1")["NumberOfLines"], 5);
    assert_eq!(find("helper")["NumberOfLines"], 0);
}

#[test]
fn weights_accumulate_across_files() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::create_dir_all(src.path().join("pkg")).unwrap();
    fs::write(src.path().join("a.py"), "db.query()\nlog.info()\n").unwrap();
    fs::write(src.path().join("pkg/b.py"), "db.query()\ndb.commit()\n").unwrap();
    fs::write(src.path().join("pkg/c.py"), "log.warn()\n").unwrap();

    let graph = run_graph(
        &config(src.path(), &out.path().join("data.json"), Language::Python, 2),
        AccumulationPolicy::Preserve,
    )
    .unwrap();

    assert_eq!(graph.weight("db", "a"), Some(1.0));
    assert_eq!(graph.weight("db", "b"), Some(2.0));
    assert_eq!(graph.weight("log", "a"), Some(1.0));
    assert_eq!(graph.weight("log", "c"), Some(1.0));
}

#[test]
fn plsql_package_bodies() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(
        src.path().join("orders.pkb"),
        "BEGIN\n  billing.charge(p_id);\n  billing.charge(p_id);\nEND;\n",
    )
    .unwrap();
    fs::write(src.path().join("ignored.py"), "billing.charge()\n").unwrap();

    let graph = run_graph(
        &config(src.path(), &out.path().join("data.json"), Language::Plsql, 2),
        AccumulationPolicy::Preserve,
    )
    .unwrap();

    assert_eq!(graph.weight("billing", "orders"), Some(2.0));
    assert!(!graph.contains("ignored"));
}

#[test]
fn sibling_weight_under_each_policy() {
    let sequence = [("a", "b"), ("a", "c"), ("a", "b")];

    let mut preserve = DependencyGraph::with_policy(AccumulationPolicy::Preserve);
    let mut reset = DependencyGraph::with_policy(AccumulationPolicy::ResetOnScan);
    for (from, to) in sequence {
        preserve.add_edge(from, to, 1.0);
        reset.add_edge(from, to, 1.0);
    }

    assert_eq!(preserve.weight("a", "b"), Some(2.0));
    assert_eq!(preserve.weight("a", "c"), Some(1.0));

    // The reset walks past a->b while appending a->c; the last call matches a->b first.
    assert_eq!(reset.weight("a", "b"), Some(1.0));
    assert_eq!(reset.weight("a", "c"), Some(1.0));
}

#[test]
fn reset_policy_loses_weight_in_pipeline() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(src.path().join("a.py"), "util.x()\nutil.x()\n").unwrap();
    fs::write(src.path().join("b.py"), "util.y()\n").unwrap();
    fs::write(src.path().join("c.py"), "util.z()\n").unwrap();

    let cfg = config(src.path(), &out.path().join("data.json"), Language::Python, 1);
    let preserved = run_graph(&cfg, AccumulationPolicy::Preserve).unwrap();
    let reset = run_graph(&cfg, AccumulationPolicy::ResetOnScan).unwrap();

    assert_eq!(preserved.weight("util", "a"), Some(2.0));
    assert_eq!(preserved.weight("util", "b"), Some(1.0));
    assert_eq!(reset.weight("util", "a"), Some(0.0));
    assert_eq!(reset.weight("util", "b"), Some(0.0));
    assert_eq!(reset.weight("util", "c"), Some(1.0));
}

/// Wraps the real scanner and fails on files whose name contains "broken".
struct FlakySource(FileScanner);

impl ReferenceSource for FlakySource {
    fn scan(&self, path: &Path) -> Result<ScannedFile> {
        if path.to_string_lossy().contains("broken") {
            return Err(ScanError::read(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ));
        }
        self.0.scan(path)
    }
}

#[test]
fn unreadable_file_aborts_graph_run() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    fs::write(src.path().join("ok.py"), "a.b()\n").unwrap();
    fs::write(src.path().join("broken.py"), "a.b()\n").unwrap();
    let output = out.path().join("data.json");

    let source = FlakySource(FileScanner::for_language(Language::Python).unwrap());
    let usecase = DependencyGraphUsecase {
        source: &source,
        exporter: &JsonExporter,
        policy: AccumulationPolicy::Preserve,
    };

    assert!(usecase.run(&config(src.path(), &output, Language::Python, 2)).is_err());
    assert!(!output.exists(), "no snapshot is written after an abort");
}

#[test]
fn missing_root_is_fatal() {
    let out = tempdir().unwrap();
    let missing = out.path().join("nope");
    let result = run_graph(
        &config(&missing, &out.path().join("data.json"), Language::Python, 1),
        AccumulationPolicy::Preserve,
    );
    assert!(result.is_err());
}

#[test]
fn empty_tree_writes_empty_list() {
    let src = tempdir().unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("data.json");

    let graph = run_graph(
        &config(src.path(), &output, Language::Python, 3),
        AccumulationPolicy::Preserve,
    )
    .unwrap();
    assert!(graph.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}
