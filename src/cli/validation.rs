//! CLI argument validation functions
//!
//! Value parsers for clap arguments that need more than a type conversion.

use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Longest DNS name accepted for `--host`
const MAX_HOST_LEN: usize = 253;

/// Validate port number is within valid range (1-65535)
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    match port_str.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )),
    }
}

/// Validate that a configuration file exists, is a regular file and can be opened
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Validate host address format
///
/// Dotted-numeric input must be a real IPv4 address; anything else is
/// treated as a hostname and only checked for spaces and length.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host.len() > MAX_HOST_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOST_LEN
        ));
    }

    let dotted_numeric = host.chars().all(|c| c.is_ascii_digit() || c == '.');
    if dotted_numeric && host.parse::<Ipv4Addr>().is_err() {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }

    Ok(host.to_string())
}
