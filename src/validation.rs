//! Email validation for the profile form.
//!
//! Validation is a pure verdict: the same input always produces the same
//! result and nothing is looked up over the network.

use regex::Regex;
use std::sync::OnceLock;

/// Message shown when the address does not look like `local@domain.tld`.
pub const INVALID_FORMAT_MESSAGE: &str = "Enter a valid email (example@domain.com).";
/// Message shown when the domain is not on the allow-list.
pub const DOMAIN_NOT_ALLOWED_MESSAGE: &str = "Domain not allowed. Use a common provider (Gmail, Outlook, iCloud, Yahoo, Proton) or your school/work email.";

/// Consumer, provider and education domains accepted out of the box.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    "yahoo.com",
    "icloud.com",
    "me.com",
    "mac.com",
    "aol.com",
    "proton.me",
    "protonmail.com",
    "gmx.com",
    "zoho.com",
    "fastmail.com",
    "mit.edu",
];

/// Outcome of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid,
    Invalid(String),
}

impl ValidationVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Message to render inline, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

fn email_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email shape regex must compile")
    })
}

/// True when `domain` is dot-separated non-empty labels without whitespace or `@`.
pub(crate) fn is_well_formed_domain(domain: &str) -> bool {
    domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty() && !label.chars().any(|ch| ch == '@' || ch.is_whitespace())
        })
}

/// Validate against the default allow-list.
pub fn validate_email(raw: &str) -> ValidationVerdict {
    EmailValidator::default().validate(raw)
}

/// Email validator carrying its domain allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailValidator {
    allowed_domains: Vec<String>,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self {
            allowed_domains: DEFAULT_ALLOWED_DOMAINS
                .iter()
                .map(|domain| domain.to_string())
                .collect(),
        }
    }
}

impl EmailValidator {
    /// Default allow-list extended with extra domains (compared lower-cased).
    ///
    /// Entries that could never match an address, such as `.edu` or
    /// `school..org`, are skipped.
    pub fn with_extra_domains<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validator = Self::default();
        for domain in extra {
            let domain = domain.as_ref().trim().to_ascii_lowercase();
            if is_well_formed_domain(&domain) && !validator.allowed_domains.contains(&domain) {
                validator.allowed_domains.push(domain);
            }
        }
        validator
    }

    pub fn allowed_domains(&self) -> &[String] {
        &self.allowed_domains
    }

    pub fn is_allowed_domain(&self, domain: &str) -> bool {
        let domain = domain.to_ascii_lowercase();
        self.allowed_domains.iter().any(|allowed| *allowed == domain)
    }

    pub fn validate(&self, raw: &str) -> ValidationVerdict {
        let email = raw.trim();
        if email.is_empty() {
            return ValidationVerdict::Valid;
        }
        if !email_shape().is_match(email) {
            return ValidationVerdict::Invalid(INVALID_FORMAT_MESSAGE.to_string());
        }
        let Some((_, domain)) = email.split_once('@') else {
            return ValidationVerdict::Invalid(INVALID_FORMAT_MESSAGE.to_string());
        };
        if !self.is_allowed_domain(domain) {
            return ValidationVerdict::Invalid(DOMAIN_NOT_ALLOWED_MESSAGE.to_string());
        }
        ValidationVerdict::Valid
    }
}
