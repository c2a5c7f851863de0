//! Locating and launching Chrome with remote debugging enabled.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use buildport_config::{BrowserConfig, buildport_dir};
use tokio::process::{Child, Command};
use tracing::{info, warn};

use crate::cdp::CdpError;

const READY_POLL: Duration = Duration::from_millis(200);

/// Chrome executable: the configured path, else the first well-known
/// install location that exists.
pub fn find_chrome(config: &BrowserConfig) -> Option<PathBuf> {
    if let Some(path) = &config.chrome_path {
        return path.exists().then(|| path.clone());
    }

    #[cfg(target_os = "macos")]
    let paths: &[&str] = &[
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    ];

    #[cfg(target_os = "linux")]
    let paths: &[&str] = &[
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
    ];

    #[cfg(target_os = "windows")]
    let paths: &[&str] = &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let paths: &[&str] = &[];

    paths.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Profile directory for a launched Chrome.
pub fn profile_dir(config: &BrowserConfig) -> PathBuf {
    config
        .user_data_dir
        .clone()
        .unwrap_or_else(|| buildport_dir().join("chrome-profile"))
}

/// Command-line flags for a launched Chrome.
pub fn launch_args(config: &BrowserConfig) -> Vec<String> {
    let mut args = vec![
        format!("--remote-debugging-port={}", config.debug_port),
        format!("--user-data-dir={}", profile_dir(config).display()),
        format!("--window-size={},{}", config.window_width, config.window_height),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--disable-gpu".to_string(),
        "--disable-extensions".to_string(),
        "--disable-popup-blocking".to_string(),
        "--disable-notifications".to_string(),
        "--dns-prefetch-disable".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--no-sandbox".to_string(),
    ];
    if config.headless {
        args.push("--headless=new".to_string());
    }
    args
}

/// Whether something answers on the debugging endpoint.
pub async fn is_running(config: &BrowserConfig) -> bool {
    reqwest::get(format!("{}/json/version", config.endpoint()))
        .await
        .is_ok()
}

/// Start Chrome and wait until its debugging endpoint answers.
///
/// The child is killed when dropped.
pub async fn launch(config: &BrowserConfig) -> Result<Child, CdpError> {
    let chrome_path = find_chrome(config).ok_or(CdpError::ChromeNotFound)?;

    let profile = profile_dir(config);
    if let Err(e) = std::fs::create_dir_all(&profile) {
        warn!("Failed to create profile directory: {}", e);
    }

    info!("Launching {} with profile at {}", chrome_path.display(), profile.display());

    let mut child = Command::new(&chrome_path)
        .args(launch_args(config))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CdpError::LaunchFailed(e.to_string()))?;

    info!("Chrome launched with PID: {:?}", child.id());

    let deadline = tokio::time::Instant::now() + Duration::from_secs(config.startup_timeout_secs);
    while tokio::time::Instant::now() < deadline {
        tokio::time::sleep(READY_POLL).await;
        if is_running(config).await {
            return Ok(child);
        }
        if let Ok(Some(status)) = child.try_wait() {
            return Err(CdpError::LaunchFailed(format!("Chrome exited early: {}", status)));
        }
    }

    let _ = child.kill().await;
    Err(CdpError::LaunchFailed(format!(
        "Chrome did not open port {} within {}s",
        config.debug_port, config.startup_timeout_secs
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_args_headless() {
        let config = BrowserConfig {
            debug_port: 9333,
            user_data_dir: Some(PathBuf::from("/tmp/profile")),
            ..Default::default()
        };
        let args = launch_args(&config);

        assert!(args.contains(&"--remote-debugging-port=9333".to_string()));
        assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
        assert!(args.contains(&"--window-size=1600,900".to_string()));
        assert!(args.contains(&"--headless=new".to_string()));
        assert!(args.contains(&"--no-sandbox".to_string()));
        assert!(args.contains(&"--disable-popup-blocking".to_string()));
    }

    #[test]
    fn test_launch_args_headed() {
        let config = BrowserConfig {
            headless: false,
            ..Default::default()
        };
        assert!(!launch_args(&config).iter().any(|a| a.starts_with("--headless")));
    }

    #[test]
    fn test_profile_dir_default() {
        let config = BrowserConfig::default();
        assert!(profile_dir(&config).ends_with("chrome-profile"));
    }

    #[test]
    fn test_find_chrome_configured_path() {
        let missing = BrowserConfig {
            chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
            ..Default::default()
        };
        assert_eq!(find_chrome(&missing), None);

        let exe = std::env::current_exe().unwrap();
        let present = BrowserConfig {
            chrome_path: Some(exe.clone()),
            ..Default::default()
        };
        assert_eq!(find_chrome(&present), Some(exe));
    }

    #[tokio::test]
    async fn test_launch_missing_chrome() {
        let config = BrowserConfig {
            chrome_path: Some(PathBuf::from("/nonexistent/chrome")),
            ..Default::default()
        };
        assert!(matches!(launch(&config).await, Err(CdpError::ChromeNotFound)));
    }
}
