// エラーハンドリング統合テスト
use crate::fixtures::ScriptedEntropyProvider;
use batch_pipeline::services::{MemoryReportSink, NoOpReportSink};
use batch_pipeline::{EntropyError, Parameters, Pipeline, PipelineConfig, PipelineError};
use tokio::time::{timeout, Duration};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_entropy_exhaustion_aborts_run() {
    // Producer 0は2タスク分、Producer 1は1タスク分の値しか持たない
    let provider = ScriptedEntropyProvider::shared(vec![1, 2, 3, 4]).with_script(1, vec![5, 6]);
    let config = PipelineConfig::new(Parameters::new(2, 2, 2).unwrap());
    let pipeline = Pipeline::new(config, provider, MemoryReportSink::new());

    let result = timeout(Duration::from_secs(5), pipeline.run())
        .await
        .expect("pipeline must not hang on entropy failure");

    match result {
        Err(PipelineError::Entropy(EntropyError::Exhausted { produced })) => {
            assert_eq!(produced, 2)
        }
        other => panic!("unexpected result: {other:?}"),
    }
    // 失敗した実行では完了報告を出さない
    assert!(pipeline.sink().completed().is_none());
}

#[tokio::test]
async fn test_entropy_failure_on_first_value() {
    let provider = ScriptedEntropyProvider::shared(vec![]);
    let config = PipelineConfig::new(Parameters::new(3, 3, 5).unwrap());
    let pipeline = Pipeline::new(config, provider, NoOpReportSink::new());

    let result = timeout(Duration::from_secs(5), pipeline.run()).await.unwrap();
    assert!(matches!(result, Err(PipelineError::Entropy(_))));
}

#[tokio::test]
async fn test_zero_value_bound_is_entropy_error() {
    let config = PipelineConfig::new(Parameters::new(3, 1, 1).unwrap()).with_value_bound(0);
    let pipeline = Pipeline::new(
        config,
        batch_pipeline::generator::SeededEntropyProvider::new(1),
        NoOpReportSink::new(),
    );

    let result = pipeline.run().await;
    assert!(matches!(
        result,
        Err(PipelineError::Entropy(EntropyError::ZeroBound))
    ));
}

#[test]
fn test_invalid_parameters_never_start() {
    for (arr_size, writers, iterations) in [(-1, 1, 1), (1, -3, 1), (1, 1, -1)] {
        let error = Parameters::new(arr_size, writers, iterations).unwrap_err();
        assert!(matches!(error, PipelineError::InvalidParameters { .. }));
        assert!(!error.is_recoverable());
    }
}
