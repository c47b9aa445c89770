//! Terminal stand-ins for the platform pieces: the consent prompt backing
//! the permission gate, and locale-region detection for the unit suffix.

use async_trait::async_trait;

use skycast_core::{Config, Consent, PermissionGate, PermissionOutcome};

const ALLOW: &str = "Allow";
const NOT_NOW: &str = "Not now";
const NEVER: &str = "Never";

/// Permission gate backed by the consent recorded in the config file.
///
/// An unset consent triggers an interactive prompt; "Never" is persisted and
/// treated as a permanent denial on every later run, matching a
/// "don't ask again" denial.
pub struct ConsentGate {
    config: Config,
}

impl ConsentGate {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn persist(&self) {
        if let Err(err) = self.config.save() {
            tracing::warn!(%err, "failed to persist consent");
        }
    }
}

#[async_trait]
impl PermissionGate for ConsentGate {
    fn already_granted(&self) -> bool {
        self.config.location_consent == Consent::Granted
    }

    async fn request(&mut self) -> PermissionOutcome {
        match self.config.location_consent {
            Consent::Granted => PermissionOutcome::Granted,
            Consent::Denied => PermissionOutcome::Denied { permanent: true },
            Consent::Unset => {
                let prompt = inquire::Select::new(
                    "Allow skycast to use your approximate location?",
                    vec![ALLOW, NOT_NOW, NEVER],
                );

                match prompt.prompt() {
                    Ok(ALLOW) => {
                        self.config.location_consent = Consent::Granted;
                        self.persist();
                        PermissionOutcome::Granted
                    }
                    Ok(NEVER) => {
                        self.config.location_consent = Consent::Denied;
                        self.persist();
                        PermissionOutcome::Denied { permanent: true }
                    }
                    Ok(_) => PermissionOutcome::RationaleNeeded,
                    Err(_) => PermissionOutcome::Denied { permanent: false },
                }
            }
        }
    }
}

/// Region code of the configured locale, e.g. `US` from `en_US.UTF-8`.
/// Empty when no locale variable names a region.
pub fn locale_region() -> String {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(region) = region_of(&value) {
                return region;
            }
        }
    }
    String::new()
}

fn region_of(locale: &str) -> Option<String> {
    let tag = locale.split('.').next()?;
    let region = tag.split('_').nth(1)?;
    if region.is_empty() {
        return None;
    }
    Some(region.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_is_extracted_from_posix_locales() {
        assert_eq!(region_of("en_US.UTF-8"), Some("US".to_string()));
        assert_eq!(region_of("fr_FR"), Some("FR".to_string()));
        assert_eq!(region_of("de_at.ISO8859-1"), Some("AT".to_string()));
    }

    #[test]
    fn locales_without_region_yield_none() {
        assert_eq!(region_of("C"), None);
        assert_eq!(region_of("POSIX"), None);
        assert_eq!(region_of(""), None);
    }
}
