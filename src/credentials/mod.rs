//! Loading the client certificate and key that authenticate us to the gateway.
//!
//! Only PEM input is understood. The same material feeds both transports: a
//! rustls `ClientConfig` for the legacy socket and a `reqwest::Identity` for
//! HTTP/2.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rustls_pemfile::{certs, private_key};
use tokio_rustls::rustls::crypto::ring;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::{ClientConfig, RootCertStore};

use crate::utils::ApnsError;

pub struct Credentials {
    cert_chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    pem: Vec<u8>,
}

impl Credentials {
    pub fn from_pem_files(cert_path: &Path, key_path: &Path) -> Result<Self, ApnsError> {
        let cert_pem = fs::read(cert_path).map_err(|e| {
            ApnsError::Credentials(format!("cannot read {}: {e}", cert_path.display()))
        })?;
        let key_pem = fs::read(key_path).map_err(|e| {
            ApnsError::Credentials(format!("cannot read {}: {e}", key_path.display()))
        })?;
        Self::from_pem(&cert_pem, &key_pem)
    }

    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self, ApnsError> {
        let cert_chain = certs(&mut &cert_pem[..])
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApnsError::Credentials(format!("bad certificate chain: {e}")))?;
        if cert_chain.is_empty() {
            return Err(ApnsError::Credentials("no certificate found".to_string()));
        }

        let key = private_key(&mut &key_pem[..])
            .map_err(|e| ApnsError::Credentials(format!("bad private key: {e}")))?
            .ok_or_else(|| ApnsError::Credentials("no private key found".to_string()))?;

        let mut pem = cert_pem.to_vec();
        if !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend_from_slice(key_pem);

        Ok(Self {
            cert_chain,
            key,
            pem,
        })
    }

    /// TLS configuration for the legacy gateway: webpki roots plus our
    /// certificate as the client identity.
    pub fn client_config(&self) -> Result<Arc<ClientConfig>, ApnsError> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
            .with_safe_default_protocol_versions()
            .map_err(|e| ApnsError::Credentials(e.to_string()))?
            .with_root_certificates(roots)
            .with_client_auth_cert(self.cert_chain.clone(), self.key.clone_key())
            .map_err(|e| ApnsError::Credentials(e.to_string()))?;

        Ok(Arc::new(config))
    }

    pub fn identity(&self) -> Result<reqwest::Identity, ApnsError> {
        reqwest::Identity::from_pem(&self.pem).map_err(|e| ApnsError::Credentials(e.to_string()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("certificates", &self.cert_chain.len())
            .field("key", &"<redacted>")
            .finish()
    }
}
