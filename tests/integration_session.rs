// tests/integration_session.rs - Whole runs driven by a scripted invoker
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tidyfan_core::aggregate::ResultAggregator;
use tidyfan_core::config::RunConfig;
use tidyfan_core::exit::TidyExit;
use tidyfan_core::fixes::{FixDocument, FixExportDir};
use tidyfan_core::invocation::{Invoker, TidyInvocation};
use tidyfan_core::session;
use tidyfan_core::types::CommandResult;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Canned output per file name; writes a one-replacement fix document when
/// the invocation asks for an export. Panics on `crash.c`.
struct Scripted {
    outputs: HashMap<String, (i32, String, String)>,
}

impl Scripted {
    fn new(outputs: &[(&str, i32, &str, &str)]) -> Self {
        Self {
            outputs: outputs
                .iter()
                .map(|&(name, code, out, err)| {
                    (name.to_string(), (code, out.into(), err.into()))
                })
                .collect(),
        }
    }
}

impl Invoker for Scripted {
    fn invoke(&self, invocation: &TidyInvocation) -> CommandResult {
        let args = invocation.args();
        let file = args.last().cloned().unwrap_or_default();
        let name = Path::new(&file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        assert_ne!(name, "crash.c", "invoker crashed");

        if let Some(pos) = args.iter().position(|a| a == "-export-fixes") {
            let doc = format!(
                "MainSourceFile: {file}\nDiagnostics:\n  - DiagnosticName: check-{name}\n"
            );
            fs::write(&args[pos + 1], doc).unwrap();
        }

        let (code, out, err) = self.outputs.get(name).cloned().unwrap_or_default();
        CommandResult::new(invocation.display(), code, out, err, 1)
    }
}

const HEADER_WARN: &str =
    "/inc/common.h:3:1: warning: shared header issue [misc-x]\n  int g;\n  ^\n";
const A_ONLY: &str = "/src/a.c:9:9: warning: local issue [misc-y]\n";

fn files(names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|n| PathBuf::from(format!("/src/{n}")))
        .collect()
}

fn config(jobs: usize) -> RunConfig {
    RunConfig {
        jobs,
        ..RunConfig::default()
    }
}

#[test]
fn test_shared_header_reported_once() {
    let out = Buffer::default();
    let a_output = format!("{HEADER_WARN}{A_ONLY}");
    let invoker = Scripted::new(&[
        ("a.c", 0, &a_output, ""),
        ("b.c", 0, HEADER_WARN, ""),
        ("c.c", 0, HEADER_WARN, ""),
    ]);
    let cfg = RunConfig {
        deduplicate: true,
        ..config(1)
    };
    let agg = ResultAggregator::new(true, out.clone(), io::sink());

    let summary = session::run(
        &cfg,
        Path::new("/build"),
        &files(&["a.c", "b.c", "c.c"]),
        None,
        &invoker,
        agg,
    )
    .unwrap();

    assert_eq!(summary.files_processed, 3);
    assert_eq!(summary.unique_diagnostics, 2);
    assert_eq!(out.contents().matches("shared header issue").count(), 1);
    assert_eq!(summary.exit(), TidyExit::Success);
}

#[test]
fn test_without_dedup_every_block_is_raw() {
    let out = Buffer::default();
    let invoker = Scripted::new(&[("a.c", 0, HEADER_WARN, ""), ("b.c", 0, HEADER_WARN, "")]);
    let agg = ResultAggregator::new(false, out.clone(), io::sink());

    let summary = session::run(
        &config(2),
        Path::new("/build"),
        &files(&["a.c", "b.c"]),
        None,
        &invoker,
        agg,
    )
    .unwrap();

    assert_eq!(summary.unique_diagnostics, 0);
    assert_eq!(out.contents().matches("shared header issue").count(), 2);
}

#[test]
fn test_blocks_are_never_interleaved() {
    let out = Buffer::default();
    let names: Vec<String> = (0..40).map(|i| format!("f{i}.c")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let invoker = Scripted::new(&[]);
    let agg = ResultAggregator::new(false, out.clone(), io::sink());

    session::run(
        &config(8),
        Path::new("/build"),
        &files(&name_refs),
        None,
        &invoker,
        agg,
    )
    .unwrap();

    let text = out.contents();
    assert_eq!(text.lines().count(), 40);
    for line in text.lines() {
        assert!(line.starts_with("clang-tidy "), "{line}");
        assert!(line.ends_with(".c"), "{line}");
    }
}

#[test]
fn test_failures_are_collected_and_exit_one() {
    let err = Buffer::default();
    let invoker = Scripted::new(&[
        ("a.c", 0, "", "5 warnings generated.\n"),
        ("b.c", 1, "", "error: unable to handle compilation\n"),
        ("c.c", 0, "", ""),
    ]);
    let agg = ResultAggregator::new(false, io::sink(), err.clone());

    let summary = session::run(
        &config(3),
        Path::new("/build"),
        &files(&["a.c", "b.c", "c.c"]),
        None,
        &invoker,
        agg,
    )
    .unwrap();

    assert_eq!(summary.failed_files, vec![PathBuf::from("/src/b.c")]);
    assert_eq!(summary.exit(), TidyExit::Failure);
    assert_eq!(err.contents(), "error: unable to handle compilation\n");
}

#[test]
fn test_exported_fixes_are_merged() {
    let scratch = tempfile::tempdir().unwrap();
    let mergefile = scratch.path().join("fixes.yaml");
    let out = Buffer::default();
    let cfg = RunConfig {
        export_fixes: Some(mergefile.clone()),
        ..config(2)
    };
    let export_dir = FixExportDir::create().unwrap();
    let export_path = export_dir.path().to_path_buf();
    let agg = ResultAggregator::new(false, out.clone(), io::sink());

    let summary = session::run(
        &cfg,
        Path::new("/build"),
        &files(&["a.c", "b.c"]),
        Some(export_dir),
        &Scripted::new(&[]),
        agg,
    )
    .unwrap();

    assert!(!summary.has_failures());
    assert!(!export_path.exists());
    assert!(out
        .contents()
        .ends_with(&format!("Writing fixes to {} ...\n", mergefile.display())));

    let merged: FixDocument =
        serde_yaml::from_str(&fs::read_to_string(&mergefile).unwrap()).unwrap();
    assert_eq!(merged.main_source_file, "");
    assert_eq!(merged.diagnostics.len(), 2);
}

#[test]
fn test_merge_failure_marks_run_failed() {
    let scratch = tempfile::tempdir().unwrap();
    let cfg = RunConfig {
        // A directory cannot be written as the merged file.
        export_fixes: Some(scratch.path().to_path_buf()),
        ..config(1)
    };
    let err = Buffer::default();
    let agg = ResultAggregator::new(false, io::sink(), err.clone());

    let summary = session::run(
        &cfg,
        Path::new("/build"),
        &files(&["a.c"]),
        Some(FixExportDir::create().unwrap()),
        &Scripted::new(&[]),
        agg,
    )
    .unwrap();

    assert!(summary.failed_files.is_empty());
    assert!(summary.fix_step_failed);
    assert_eq!(summary.exit(), TidyExit::Failure);
    assert!(err.contents().starts_with("Error exporting fixes"));
}

#[test]
fn test_crashed_worker_fails_run() {
    let agg = ResultAggregator::new(false, io::sink(), io::sink());

    let summary = session::run(
        &config(2),
        Path::new("/build"),
        &files(&["a.c", "crash.c", "c.c"]),
        None,
        &Scripted::new(&[]),
        agg,
    )
    .unwrap();

    assert!(summary.failed_files.is_empty());
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_unfinished, 1);
    assert_eq!(summary.exit(), TidyExit::Failure);
}
