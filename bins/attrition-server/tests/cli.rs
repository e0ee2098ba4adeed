use serde_json::{json, Value};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn data_file(name: &str) -> PathBuf {
    workspace_root().join("data").join(name)
}

fn bin_path() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_attrition-server"))
}

/// A running server on an ephemeral port, killed on drop.
struct Server {
    child: Child,
    base_url: String,
}

impl Server {
    fn start() -> Self {
        let mut child = Command::new(bin_path())
            .env("ATTRITION_MODEL_PATH", data_file("attrition.model"))
            .env("ATTRITION_SCALER_PATH", data_file("attrition.range"))
            .env("ATTRITION_BIND", "127.0.0.1:0")
            .env_remove("PORT")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();

        let stdout = child.stdout.take().unwrap();
        let mut line = String::new();
        BufReader::new(stdout).read_line(&mut line).unwrap();
        let base_url = line
            .trim()
            .split_once("listening on ")
            .map(|(_, url)| url.to_string())
            .unwrap_or_else(|| panic!("unexpected startup line: {:?}", line));

        Server { child, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn example_payload() -> Value {
    json!({
        "Age": 30, "DailyRate": 800, "DistanceFromHome": 5, "Education": 3,
        "EnvironmentSatisfaction": 3, "JobInvolvement": 2, "JobLevel": 3,
        "JobSatisfaction": 3, "MonthlyIncome": 5000, "NumCompaniesWorked": 1,
        "PercentSalaryHike": 13, "PerformanceRating": 2, "TotalWorkingYears": 8,
        "WorkLifeBalance": 3, "YearsAtCompany": 5
    })
}

fn at_risk_payload() -> Value {
    json!({
        "Age": 20, "DailyRate": 200, "DistanceFromHome": 45, "Education": 2,
        "EnvironmentSatisfaction": 1, "JobInvolvement": 1, "JobLevel": 1,
        "JobSatisfaction": 1, "MonthlyIncome": 1500, "NumCompaniesWorked": 8,
        "PercentSalaryHike": 11, "PerformanceRating": 3, "TotalWorkingYears": 1,
        "WorkLifeBalance": 1, "YearsAtCompany": 1
    })
}

#[test]
fn root_and_health_respond() {
    let server = Server::start();
    let client = reqwest::blocking::Client::new();

    let root: Value = client.get(server.url("/")).send().unwrap().json().unwrap();
    assert_eq!(root, json!({ "message": "Employee Attrition API Running" }));

    let health: Value = client.get(server.url("/health")).send().unwrap().json().unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["kernel"], "linear");
    assert_eq!(health["support_vectors"], 2);
}

#[test]
fn predict_returns_both_labels() {
    let server = Server::start();
    let client = reqwest::blocking::Client::new();

    for (payload, expected) in [(example_payload(), "No"), (at_risk_payload(), "Yes")] {
        let response = client.post(server.url("/predict")).json(&payload).send().unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().unwrap();
        assert_eq!(body, json!({ "Attrition": expected }));
    }
}

#[test]
fn numeric_strings_are_accepted() {
    let server = Server::start();
    let mut payload = example_payload();
    for value in payload.as_object_mut().unwrap().values_mut() {
        *value = Value::String(value.to_string());
    }

    let response = reqwest::blocking::Client::new()
        .post(server.url("/predict"))
        .json(&payload)
        .send()
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().unwrap();
    assert_eq!(body["Attrition"], "No");
}

#[test]
fn invalid_records_are_rejected_with_422() {
    let server = Server::start();
    let client = reqwest::blocking::Client::new();

    let mut missing = example_payload();
    missing.as_object_mut().unwrap().remove("Age");
    let response = client.post(server.url("/predict")).json(&missing).send().unwrap();
    assert_eq!(response.status(), 422);
    let body: Value = response.json().unwrap();
    assert_eq!(body["field"], "Age");

    let mut bad_type = example_payload();
    bad_type["YearsAtCompany"] = json!("ten");
    let response = client.post(server.url("/predict")).json(&bad_type).send().unwrap();
    assert_eq!(response.status(), 422);
    let body: Value = response.json().unwrap();
    assert_eq!(body["field"], "YearsAtCompany");

    let response = client.post(server.url("/predict")).json(&json!("Age")).send().unwrap();
    assert_eq!(response.status(), 422);
}

#[test]
fn malformed_json_is_a_bad_request() {
    let server = Server::start();
    let response = reqwest::blocking::Client::new()
        .post(server.url("/predict"))
        .header("content-type", "application/json")
        .body("{\"Age\": ")
        .send()
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[test]
fn concurrent_requests_agree() {
    let server = Server::start();
    let url = server.url("/predict");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let url = url.clone();
            std::thread::spawn(move || {
                let payload = if i % 2 == 0 { example_payload() } else { at_risk_payload() };
                let body: Value = reqwest::blocking::Client::new()
                    .post(&url)
                    .json(&payload)
                    .send()
                    .unwrap()
                    .json()
                    .unwrap();
                (i, body["Attrition"].as_str().unwrap().to_string())
            })
        })
        .collect();

    for handle in handles {
        let (i, label) = handle.join().unwrap();
        assert_eq!(label, if i % 2 == 0 { "No" } else { "Yes" });
    }
}

#[test]
fn missing_artifact_exits_nonzero() {
    let output = Command::new(bin_path())
        .env("ATTRITION_MODEL_PATH", data_file("no-such.model"))
        .env("ATTRITION_SCALER_PATH", data_file("attrition.range"))
        .env("ATTRITION_BIND", "127.0.0.1:0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("listening on"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no-such.model"), "stderr: {}", stderr);
}

#[test]
fn corrupt_scaler_exits_nonzero() {
    let output = Command::new(bin_path())
        .env("ATTRITION_MODEL_PATH", data_file("attrition.model"))
        .env("ATTRITION_SCALER_PATH", data_file("attrition.model"))
        .env("ATTRITION_BIND", "127.0.0.1:0")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("scaler format error"), "stderr: {}", stderr);
}
