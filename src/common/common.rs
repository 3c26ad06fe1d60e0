use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;
use fern::colors::{Color, ColoredLevelConfig};
use log::{error, info};

pub fn parse_log_level(level: &str) -> Option<log::LevelFilter> {
    match level {
        "off" => Some(log::LevelFilter::Off),
        "trace" => Some(log::LevelFilter::Trace),
        "debug" => Some(log::LevelFilter::Debug),
        "info" => Some(log::LevelFilter::Info),
        "warn" => Some(log::LevelFilter::Warn),
        "error" => Some(log::LevelFilter::Error),
        _ => None,
    }
}

pub fn setup_logging(config: &Configuration) -> Result<(), CustomError> {
    let level = parse_log_level(config.log_level.as_str()).ok_or_else(|| {
        CustomError::new(&format!("Unknown log level encountered: '{}'", config.log_level))
    })?;

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .level_for("rustls", log::LevelFilter::Warn)
        .level_for("actix_server", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()
        .map_err(|e| CustomError::new(&format!("Failed to initialize logging: {}", e)))?;
    info!("logging initialized.");
    Ok(())
}

/// Hides all but the last four characters of a secret for log output.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if secret.chars().count() <= 4 {
        return "*".repeat(secret.chars().count());
    }
    format!("****{}", visible)
}

/// Writes a self-signed certificate for `localhost` plus `domain` and its key
/// as PEM files. Development use only.
pub fn cert_gen(domain: &str, certfile: &str, keyfile: &str) -> Result<(), CustomError> {
    info!("[CERTGEN] Requesting to generate a self-signed key and certificate file");

    let mut subject_alt_names = vec![String::from("localhost")];
    if domain != "localhost" {
        subject_alt_names.push(domain.to_string());
    }

    let key_pair = rcgen::KeyPair::generate().map_err(|e| CustomError::new(&format!("[CERTGEN] {}", e)))?;
    let cert = rcgen::CertificateParams::new(subject_alt_names)
        .and_then(|params| params.self_signed(&key_pair))
        .map_err(|e| CustomError::new(&format!("[CERTGEN] {}", e)))?;

    std::fs::write(keyfile, key_pair.serialize_pem()).map_err(|e| {
        error!("[CERTGEN] The key file {} could not be generated!", keyfile);
        CustomError::new(&format!("[CERTGEN] {}", e))
    })?;
    info!("[CERTGEN] The key file {} has been generated", keyfile);

    std::fs::write(certfile, cert.pem()).map_err(|e| {
        error!("[CERTGEN] The cert file {} could not be generated!", certfile);
        CustomError::new(&format!("[CERTGEN] {}", e))
    })?;
    info!("[CERTGEN] The cert file {} has been generated", certfile);

    info!(
        "[CERTGEN] The files {} and {} have been generated, use them only for development reasons",
        keyfile, certfile
    );
    Ok(())
}
