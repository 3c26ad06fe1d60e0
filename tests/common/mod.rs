#![allow(dead_code)]
use sni_cert_store::ssl::structs::cert_entity::CertEntity;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestCert {
    pub cert_pem: String,
    pub cert_der: Vec<u8>,
    pub key_pem: String,
    pub key_der: Vec<u8>,
}

pub fn generate_cert(names: &[&str]) -> TestCert {
    let key = rcgen::KeyPair::generate().unwrap();
    let cert = rcgen::CertificateParams::new(names.iter().map(|name| name.to_string()).collect::<Vec<_>>())
        .unwrap()
        .self_signed(&key)
        .unwrap();
    TestCert {
        cert_pem: cert.pem(),
        cert_der: cert.der().to_vec(),
        key_pem: key.serialize_pem(),
        key_der: key.serialize_der(),
    }
}

/// Writes `<stem>.pem` and `<stem>.key` and returns their paths.
pub fn write_pem_pair(dir: &Path, stem: &str, names: &[&str]) -> (PathBuf, PathBuf) {
    let cert = generate_cert(names);
    write_files(dir, stem, &cert)
}

pub fn write_files(dir: &Path, stem: &str, cert: &TestCert) -> (PathBuf, PathBuf) {
    let cert_path = dir.join(format!("{}.pem", stem));
    let key_path = dir.join(format!("{}.key", stem));
    std::fs::write(&cert_path, &cert.cert_pem).unwrap();
    std::fs::write(&key_path, &cert.key_pem).unwrap();
    (cert_path, key_path)
}

/// Leaf, one extra certificate and the leaf key in a single PEM file.
pub fn write_pem_bundle(dir: &Path, stem: &str, domain: &str) -> (PathBuf, TestCert, TestCert) {
    let leaf = generate_cert(&[domain]);
    let intermediate = generate_cert(&["intermediate.invalid"]);
    let path = dir.join(format!("{}.pem", stem));
    let mut data = String::from("# bundle\n");
    data.push_str(&leaf.cert_pem);
    data.push_str(&intermediate.cert_pem);
    data.push_str(&leaf.key_pem);
    std::fs::write(&path, data).unwrap();
    (path, leaf, intermediate)
}

/// PKCS12 archive with the keyed leaf and one CA entry.
pub fn write_pkcs12(dir: &Path, stem: &str, domain: &str, passphrase: &str) -> (PathBuf, TestCert, TestCert) {
    let leaf = generate_cert(&[domain]);
    let ca = generate_cert(&["ca.invalid"]);
    let pfx = p12::PFX::new(&leaf.cert_der, &leaf.key_der, Some(&ca.cert_der), passphrase, domain).unwrap();
    let path = dir.join(format!("{}.p12", stem));
    std::fs::write(&path, pfx.to_der()).unwrap();
    (path, leaf, ca)
}

pub fn pem_entity(dir: &TempDir, domain: &str) -> CertEntity {
    let (cert_path, key_path) = write_pem_pair(dir.path(), domain, &[domain]);
    CertEntity::pem(domain, cert_path, key_path)
}

pub fn config_toml(certs_path: &Path, domains: &[&str], aliases: &[(&str, &[&str])]) -> String {
    let mut data = format!(
        "log_level = \"info\"\n\n[tls_server]\nenabled = true\nbind_address = \"127.0.0.1:0\"\ncerts_path = \"{}\"\n\n",
        certs_path.display()
    );
    for domain in domains {
        data.push_str(&format!(
            "[certificates.\"{d}\"]\nformat = \"Pem\"\nprimary_path = \"{d}.pem\"\nsecondary_path = \"{d}.key\"\n\n",
            d = domain
        ));
    }
    if !aliases.is_empty() {
        data.push_str("[aliases]\n");
        for (primary, names) in aliases {
            let list: Vec<String> = names.iter().map(|name| format!("\"{}\"", name)).collect();
            data.push_str(&format!("\"{}\" = [{}]\n", primary, list.join(", ")));
        }
    }
    data
}
