// src/net.rs
use std::error::Error;
use std::thread;
use std::time::Duration;

use crate::params::USER_AGENT;

/// Sequential, rate-limited page fetching. Everything downstream of this
/// takes plain document text, so this is the only place that touches the
/// network.
pub struct Fetcher {
    agent: ureq::Agent,
    delay: Duration,
}

impl Fetcher {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// GET one page as text. Sleeps before every request; the results
    /// site is small and doesn't deserve a hammering.
    pub fn get(&self, url: &str) -> Result<String, Box<dyn Error>> {
        thread::sleep(self.delay);
        logd!("GET {url}");
        let mut resp = self.agent.get(url).header("User-Agent", USER_AGENT).call()?;
        let body = resp.body_mut().read_to_string()?;
        Ok(body)
    }
}
