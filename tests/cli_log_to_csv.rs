use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const LOG: &str = "发送方\n\
\t2024-01-01 10:00:00:000 CST\tDATA_seq: 1\tACKed\n\
\t2024-01-01 10:00:00:300 CST\tDATA_seq: 2\tWRONG\tNO_ACK\n\
\t2024-01-01 10:00:00:xyz CST\tDATA_seq: 3\tACKed\n\
接收方\n\
\t2024-01-01 10:00:00:100 CST\tACK_ack: 1\n";

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "tcplab-replay-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn log_to_csv_prints_sorted_rows_to_stdout() {
    let dir = unique_temp_dir("log-to-csv-stdout");
    let log = write_file(&dir, "tcp.log", LOG);

    let output = Command::new(env!("CARGO_BIN_EXE_log_to_csv"))
        .args(["--log", log.to_str().unwrap()])
        .output()
        .expect("run log_to_csv");
    assert!(
        output.status.success(),
        "log_to_csv failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "timestamp,seq_num,event_type,status,error_type",
            "2024-01-01 10:00:00:000,1,SEND,ACKed,",
            "2024-01-01 10:00:00:100,1,ACK,ACK,",
            "2024-01-01 10:00:00:300,2,SEND,NO_ACK,WRONG",
        ]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn log_to_csv_writes_normalized_lines_to_file() {
    let dir = unique_temp_dir("log-to-csv-normalized");
    let log = write_file(&dir, "tcp.log", LOG);
    let out = dir.join("sorted.log");

    let output = Command::new(env!("CARGO_BIN_EXE_log_to_csv"))
        .args([
            "--log",
            log.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--normalized",
        ])
        .output()
        .expect("run log_to_csv");
    assert!(
        output.status.success(),
        "log_to_csv failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out).expect("read sorted.log");
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "\t2024-01-01 10:00:00:100 CST\tACK_ack: 1");
    assert_eq!(lines[2], "\t2024-01-01 10:00:00:300 CST\tDATA_seq: 2\tWRONG\tNO_ACK");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn log_to_csv_fails_on_empty_log() {
    let dir = unique_temp_dir("log-to-csv-empty");
    let log = write_file(&dir, "empty.log", "\n\n");

    let output = Command::new(env!("CARGO_BIN_EXE_log_to_csv"))
        .args(["--log", log.to_str().unwrap()])
        .output()
        .expect("run log_to_csv");
    assert!(!output.status.success(), "empty log should fail");
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("upload is empty"),
        "stderr should mention the decode error"
    );

    let _ = fs::remove_dir_all(&dir);
}
