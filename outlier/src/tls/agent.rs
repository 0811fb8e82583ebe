// SPDX-License-Identifier: Apache-2.0

//! Globally defined agent containing system TLS Certs.

use rustls::{
	crypto::{ring::default_provider, CryptoProvider},
	ClientConfig,
};
use rustls_platform_verifier::ConfigVerifierExt;
use std::sync::{Arc, OnceLock};
use ureq::{Agent, AgentBuilder};

/// Global static holding the agent with the appropriate TLS certs.
static AGENT: OnceLock<Agent> = OnceLock::new();

/// Get or initialize the global static agent used in making http(s) requests.
pub fn agent() -> &'static Agent {
	AGENT.get_or_init(|| {
		// Rustls needs a process-wide crypto provider before a client config can
		// be built. Another caller may have installed one first, which is fine.
		if CryptoProvider::get_default().is_none() {
			let _ = CryptoProvider::install_default(default_provider());
		}

		// Create connection configuration with system certs retrieved by rustls platform verifier
		let tls_config = ClientConfig::with_platform_verifier();

		log::debug!("built HTTP agent with platform TLS verifier");

		AgentBuilder::new().tls_config(Arc::new(tls_config)).build()
	})
}
