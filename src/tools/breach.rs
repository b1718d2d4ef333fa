// src/tools/breach.rs
use rand::Rng;
use serde::Serialize;

const KNOWN_BREACHES: [&str; 3] = ["Adobe", "LinkedIn", "Dropbox"];

#[derive(Debug, Clone, Serialize)]
pub struct BreachReport {
    pub email: String,
    pub breached: bool,
    pub count: usize,
    pub services: Vec<&'static str>,
}

/// Mock breach lookup: the result is random, not a real query against
/// any breach database. Kept as a stand-in until a real service is
/// wired up.
pub fn mock_breach_check(email: &str) -> BreachReport {
    let mut rng = rand::thread_rng();

    if rng.gen_bool(0.5) {
        let count = rng.gen_range(1..=10);
        let services = KNOWN_BREACHES[..rng.gen_range(1..=KNOWN_BREACHES.len())].to_vec();
        BreachReport { email: email.to_string(), breached: true, count, services }
    } else {
        BreachReport { email: email.to_string(), breached: false, count: 0, services: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_internally_consistent() {
        for _ in 0..100 {
            let report = mock_breach_check("user@example.com");
            if report.breached {
                assert!((1..=10).contains(&report.count));
                assert!(!report.services.is_empty());
            } else {
                assert_eq!(report.count, 0);
                assert!(report.services.is_empty());
            }
        }
    }
}
