use std::{
    fs::{
        self,
        File,
    },
    io::{
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
    time::Duration,
};

use reqwest::{
    blocking::Client,
    header::{
        ACCEPT_ENCODING,
        USER_AGENT,
    },
    StatusCode,
};

use crate::core::YomireiError;

pub fn http_client() -> Result<Client, YomireiError> {
    Client::builder()
        .timeout(Duration::from_secs(120))
        .build()
        .map_err(|e| YomireiError::Custom(format!("HTTP client build failed: {e}")))
}

/// How often and how patiently a download is retried. The wait before retry `n`
/// is `n * backoff`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3, backoff: Duration::from_secs(2) }
    }
}

/// Outcome of a single failed attempt.
#[derive(Debug)]
enum AttemptError {
    Transient(String),
    Fatal(YomireiError),
}

/// Server-side and throttling statuses are worth another try; other client
/// errors will not change.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

pub fn download_to_file(client: &Client, url: &str, path: &Path) -> Result<(), YomireiError> {
    download_with_policy(client, url, path, RetryPolicy::default())
}

/// Streams `url` into `path`. The body lands in a `.part` sibling first and is
/// renamed only once complete, so `path` never holds a truncated archive.
pub fn download_with_policy(
    client: &Client,
    url: &str,
    path: &Path,
    policy: RetryPolicy,
) -> Result<(), YomireiError> {
    let part_path = partial_path(path);
    let mut last_error = String::new();

    for attempt in 1..=policy.attempts.max(1) {
        match fetch_once(client, url, &part_path) {
            Ok(bytes) => {
                fs::rename(&part_path, path)?;
                tracing::debug!(bytes, attempt, "downloaded {} to {:?}", url, path);
                return Ok(());
            }
            Err(AttemptError::Fatal(e)) => {
                fs::remove_file(&part_path).ok();
                return Err(e);
            }
            Err(AttemptError::Transient(reason)) => {
                tracing::warn!(attempt, "GET {} failed: {}", url, reason);
                last_error = reason;
                if attempt < policy.attempts {
                    std::thread::sleep(policy.backoff * attempt as u32);
                }
            }
        }
    }

    fs::remove_file(&part_path).ok();
    Err(YomireiError::Custom(format!(
        "Failed HTTP GET {} after {} attempts: {}",
        url, policy.attempts, last_error
    )))
}

fn fetch_once(client: &Client, url: &str, part_path: &Path) -> Result<u64, AttemptError> {
    let mut resp = client
        .get(url)
        .header(USER_AGENT, "yomirei/0.1 (+reqwest)")
        .header(ACCEPT_ENCODING, "identity")
        .send()
        .map_err(|e| AttemptError::Transient(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let message = format!("HTTP error {} from {}", status, resp.url());
        return Err(if is_retryable_status(status) {
            AttemptError::Transient(message)
        } else {
            AttemptError::Fatal(YomireiError::Custom(message))
        });
    }

    let file = File::create(part_path).map_err(|e| {
        AttemptError::Fatal(YomireiError::Custom(format!(
            "Create download file {:?} failed: {}",
            part_path, e
        )))
    })?;
    let mut writer = BufWriter::new(file);

    let bytes = resp
        .copy_to(&mut writer)
        .map_err(|e| AttemptError::Transient(format!("reading body: {e}")))?;
    writer.flush().map_err(|e| AttemptError::Fatal(e.into()))?;

    if bytes == 0 {
        return Err(AttemptError::Transient("empty response body".to_string()));
    }
    Ok(bytes)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
