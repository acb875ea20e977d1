//! Integration test: config load, CSV source, transform, CSV sink, error paths.

use beth_features::{
    config::PreprocessConfig,
    dataset::Value,
    features::{output_columns, ErrorMode, FeaturePipeline, FeatureTransformer, TransformOptions},
    io::{CsvSink, CsvSource},
    Dataset, PreprocessError, TracingDiagnostics,
};
use std::path::Path;

const RAW_WITH_TARGET: &str = "\
timestamp,processId,threadId,parentProcessId,userId,mountNamespace,processName,hostName,eventId,eventName,stackAddresses,argsNum,returnValue,args,sus,evil,target
1,1,1,0,0,4026531840,systemd,host,1,close,[],3,-5,[],0,0,1
2,7342,7342,1,1000,4026532231,sshd,host,157,prctl,[],5,0,[],1,0,0
3,2,2,0,999,4026531839,kthreadd,host,3,close,[],1,7,[],0,0,0
";

const RAW_NO_TARGET: &str = "\
eventId,argsNum,processId,parentProcessId,userId,mountNamespace,returnValue
62,2,5,1,1001,4026531840,-2
";

#[test]
fn config_load_default() {
    let c = PreprocessConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.diagnostics.sample_rows, 5);
    assert_eq!(c.transform.error_mode, ErrorMode::FailFast);
    assert!(!c.transform.parallel);
}

#[test]
fn end_to_end_file_with_target() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("labelled_training_data.csv");
    let output = dir.path().join("out").join("processed.csv");
    std::fs::write(&input, RAW_WITH_TARGET).unwrap();

    let pipeline = FeaturePipeline::default().with_diagnostics(Box::new(TracingDiagnostics::default()));
    let outcome = pipeline.run(&input, &output).unwrap();
    assert_eq!(outcome.rows, 3);
    assert_eq!(outcome.columns, 8);

    let written = std::fs::read_to_string(&output).unwrap();
    let expected = "\
eventId,argsNum,processId_is_os,parentProcessId_is_os,userId_is_os,mountNamespace_is_default,returnValue_mapped,target
1,3,1,1,1,1,-1,1
157,5,0,1,0,0,0,0
3,1,1,1,1,0,1,0
";
    assert_eq!(written, expected);
}

#[test]
fn end_to_end_without_target() {
    let raw = CsvSource::from_reader(RAW_NO_TARGET.as_bytes()).unwrap();
    let out = FeatureTransformer::default().transform(&raw).unwrap();
    assert_eq!(out.columns(), output_columns(false).as_slice());
    let mut buf = Vec::new();
    CsvSink::to_writer(&mut buf, &out).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "eventId,argsNum,processId_is_os,parentProcessId_is_os,userId_is_os,mountNamespace_is_default,returnValue_mapped\n\
         62,2,0,1,0,1,-1\n"
    );
}

#[test]
fn missing_input_is_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.csv");
    let err = FeaturePipeline::default()
        .run(&dir.path().join("absent.csv"), &output)
        .unwrap_err();
    assert!(matches!(err, PreprocessError::SourceNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn missing_column_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "eventId,argsNum,processId,parentProcessId,mountNamespace,returnValue\n1,1,1,1,1,1\n").unwrap();

    let err = FeaturePipeline::default().run(&input, &output).unwrap_err();
    match err {
        PreprocessError::Schema { missing } => assert_eq!(missing, vec!["userId".to_string()]),
        other => panic!("expected schema error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn malformed_row_is_reported_with_position() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(
        &input,
        "eventId,argsNum,processId,parentProcessId,userId,mountNamespace,returnValue\n1,1,1,1,1,1,1\n2,2,x,1,1,1,1\n",
    )
    .unwrap();

    let err = FeaturePipeline::default().run(&input, &output).unwrap_err();
    match err {
        PreprocessError::RowType { column, row, .. } => {
            assert_eq!(column, "processId");
            assert_eq!(row, 1);
        }
        other => panic!("expected row type error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn sink_failure_leaves_result_intact() {
    let dir = tempfile::tempdir().unwrap();
    // a regular file where a parent directory is expected
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let raw = CsvSource::from_reader(RAW_NO_TARGET.as_bytes()).unwrap();
    let features = FeatureTransformer::default().transform(&raw).unwrap();
    let err = CsvSink::write(&blocker.join("out.csv"), &features).unwrap_err();
    assert_eq!(err.kind(), "sink_write");
    assert_eq!(features.len(), 1);
    assert_eq!(features.get(0, "returnValue_mapped"), Some(&Value::Int(-1)));
}

#[test]
fn parallel_collect_mode_matches_sequential_on_clean_data() {
    let rows: Vec<Vec<Value>> = (0..1000i64)
        .map(|i| vec![i, i % 6, i % 5, i % 3, 990 + i % 20, 4026531840 - i % 2, i % 7 - 3, i % 2])
        .map(|r| r.into_iter().map(Value::Int).collect::<Vec<_>>())
        .collect();
    let mut cols: Vec<&str> = beth_features::features::REQUIRED_COLUMNS.to_vec();
    cols.push("target");
    let raw = Dataset::with_rows(cols, rows).unwrap();

    let seq = FeatureTransformer::default().transform(&raw).unwrap();
    let par = FeatureTransformer::new(TransformOptions {
        parallel: true,
        error_mode: ErrorMode::CollectErrors,
    })
    .transform(&raw)
    .unwrap();
    assert_eq!(seq, par);
    assert_eq!(par.len(), raw.len());
    for row in par.rows() {
        let mapped = row[6].as_int().unwrap();
        assert!((-1..=1).contains(&mapped));
    }
}

#[test]
fn directory_input_is_source_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvSource::read(dir.path()).unwrap_err();
    assert_eq!(err.kind(), "source_not_found");

    let output = dir.path().join("out.csv");
    let err = FeaturePipeline::default().run(dir.path(), &output).unwrap_err();
    assert!(matches!(err, PreprocessError::SourceNotFound { .. }));
    assert!(!output.exists());
}

#[test]
fn target_labels_are_written_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("raw.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(
        &input,
        "eventId,argsNum,processId,parentProcessId,userId,mountNamespace,returnValue,target\n\
         1,1,1,1,1,1,1,1.0\n\
         2,2,1,1,1,1,1,007\n\
         3,3,1,1,1,1,1,nan\n\
         4,4,1,1,1,1,1,1e3\n\
         5,5,1,1,1,1,1,\n\
         006,5,1,1,1,1,-01,evil\n",
    )
    .unwrap();

    FeaturePipeline::default().run(&input, &output).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    let targets: Vec<&str> = written
        .lines()
        .skip(1)
        .map(|l| l.rsplit(',').next().unwrap())
        .collect();
    assert_eq!(targets, vec!["1.0", "007", "nan", "1e3", "", "evil"]);
    // required columns with non-canonical integer text are still read as integers
    assert_eq!(written.lines().last().unwrap(), "6,5,1,1,1,0,-1,evil");
}
