use autokit::{CleanConfig, CleanTask, LocalStorage, TaskEngine};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn find_output(dir: &TempDir, prefix: &str) -> Option<std::path::PathBuf> {
    std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(prefix))
                .unwrap_or(false)
        })
}

#[tokio::test]
async fn test_end_to_end_clean_removes_duplicates_and_blank_rows() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "name,company,city").unwrap();
    writeln!(input, "Sarah Johnson,Acme Corp,Berlin").unwrap();
    writeln!(input, ",,").unwrap();
    writeln!(input, "Sarah Johnson,Acme Corp,Berlin").unwrap();
    writeln!(input, "  Mark Lee ,TechStart,  Lisbon").unwrap();

    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let task = CleanTask::new(
        LocalStorage::new(output_dir.clone()),
        CleanConfig {
            input: input.path().to_str().unwrap().to_string(),
            output_dir,
        },
    );

    let report = TaskEngine::new(task).run().await.unwrap();

    assert_eq!(report.processed, 4);
    assert_eq!(report.succeeded, 2);

    let output = find_output(&temp_dir, "clean_data_").expect("no cleaned CSV written");
    let content = std::fs::read_to_string(output).unwrap();

    assert_eq!(
        content,
        "name,company,city\nSarah Johnson,Acme Corp,Berlin\nMark Lee,TechStart,Lisbon\n"
    );
}

#[tokio::test]
async fn test_end_to_end_clean_missing_input_aborts() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().to_str().unwrap().to_string();

    let task = CleanTask::new(
        LocalStorage::new(output_dir.clone()),
        CleanConfig {
            input: "definitely_not_here.csv".to_string(),
            output_dir,
        },
    );

    let result = TaskEngine::new(task).run().await;

    assert!(result.is_err());
    assert!(find_output(&temp_dir, "clean_data_").is_none());
}
