/// Runs the compiled reporter binary against a mocked PayPal endpoint
use std::io::Write;
use tokio::process::Command;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BIN: &str = env!("CARGO_BIN_EXE_paypal-reporter");

const SEARCH_RESPONSE: &str = "L_TIMESTAMP0=2013-01-16T08%3A00%3A00Z\
&L_TIMESTAMP1=2013-01-15T10%3A30%3A00Z\
&L_TRANSACTIONID0=9XY&L_TRANSACTIONID1=8AB\
&L_AMT0=10.00&L_AMT1=20.00\
&L_EMAIL0=jane%40example.com\
&ACK=Success";

fn credentials_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temporary file");
    file.write_all(br#"{"USER": "api_user", "PWD": "api_pwd", "SIGNATURE": "api_sig"}"#)
        .expect("Failed to write to temporary file");
    file
}

fn reporter(nvp_url: &str, credentials: &tempfile::NamedTempFile) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.arg(credentials.path())
        .env("PAYPAL_NVP_URL", nvp_url)
        .env_remove("REPORTER_TABLE_FORMAT")
        .env_remove("REPORTER_COLUMNS")
        .env("RUST_LOG", "paypal_reporter=debug");
    cmd
}

#[tokio::test]
async fn test_prints_transaction_table() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("USER", "api_user"))
        .and(query_param("METHOD", "TransactionSearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_RESPONSE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let credentials = credentials_file();
    let output = reporter(&mock_server.uri(), &credentials)
        .output()
        .await
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "Binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "unexpected table:\n{}", stdout);
    assert!(lines[0].trim_start().starts_with("TIMESTAMP"));
    assert!(lines[0].contains("CURRENCYCODE"));
    assert!(lines[1].starts_with("---"));
    assert!(lines[2].trim_start().starts_with("2013-01-15 10:30:00"));
    assert!(lines[2].contains("8AB"));
    assert!(lines[3].trim_start().starts_with("2013-01-16 08:00:00"));
    assert!(lines[3].contains("9XY"));

    // Logs stay on stderr and never include credential values
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stdout.contains("Searching PayPal"));
    assert!(!stderr.contains("api_pwd"));
}

#[tokio::test]
async fn test_custom_columns_and_format() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_RESPONSE))
        .mount(&mock_server)
        .await;

    let credentials = credentials_file();
    let output = reporter(&mock_server.uri(), &credentials)
        .env("REPORTER_TABLE_FORMAT", "pipe")
        .env("REPORTER_COLUMNS", "TRANSACTIONID EMAIL")
        .output()
        .await
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 4, "unexpected table:\n{}", stdout);
    assert!(lines.iter().all(|l| l.starts_with('|')));
    assert!(lines[0].find("TRANSACTIONID") < lines[0].find("EMAIL"));
    assert!(lines[1].chars().all(|c| matches!(c, '|' | '-' | ':')));
    assert!(lines[2].contains("8AB"));
    assert!(lines[3].contains("9XY") && lines[3].contains("jane@example.com"));
    assert!(!stdout.contains("TIMESTAMP"));
}

#[tokio::test]
async fn test_remote_error_exits_non_zero() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "ACK=Failure&L_ERRORCODE0=10002&L_SHORTMESSAGE0=Security%20error\
             &L_LONGMESSAGE0=Security%20header%20is%20not%20valid",
        ))
        .mount(&mock_server)
        .await;

    let credentials = credentials_file();
    let output = reporter(&mock_server.uri(), &credentials)
        .output()
        .await
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[10002] Security error Security header is not valid"));
}

#[tokio::test]
async fn test_missing_argument_exits_non_zero() {
    let output = Command::new(BIN)
        .output()
        .await
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[tokio::test]
async fn test_malformed_credentials_exits_non_zero() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not json").unwrap();

    let output = Command::new(BIN)
        .arg(file.path())
        .env("PAYPAL_NVP_URL", "http://127.0.0.1:9/nvp")
        .output()
        .await
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid credentials file"));
}
