//! Configuration for a decomposition run.
//!
//! The only knob this core carries is the password policy: the host supplies
//! it as configuration, never parsed from any serialized format here. It is a
//! tagged variant rather than duck typing — a fixed string, nothing, or a
//! resolver closure that sees the descriptor and decides. The policy is
//! evaluated exactly once per decomposition attempt, before the native open.

use crate::input::InputDescriptor;
use std::fmt;
use std::sync::Arc;

/// How to obtain the password for an encrypted document.
#[derive(Clone, Default)]
pub enum PasswordPolicy {
    /// No password; encrypted documents fail with
    /// [`crate::DecomposeError::Encrypted`].
    #[default]
    None,
    /// The same password for every document.
    Fixed(String),
    /// A per-document resolver. Receives the descriptor; returning `None`
    /// means "no password for this one".
    Resolver(Arc<dyn Fn(&InputDescriptor) -> Option<String> + Send + Sync>),
}

impl PasswordPolicy {
    /// Evaluate the policy for one descriptor. Called once per attempt.
    pub(crate) fn resolve(&self, data: &InputDescriptor) -> Option<String> {
        match self {
            PasswordPolicy::None => None,
            PasswordPolicy::Fixed(password) => Some(password.clone()),
            PasswordPolicy::Resolver(resolve) => resolve(data),
        }
    }
}

impl fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordPolicy::None => f.write_str("None"),
            PasswordPolicy::Fixed(_) => f.write_str("Fixed(<redacted>)"),
            PasswordPolicy::Resolver(_) => f.write_str("Resolver(<fn>)"),
        }
    }
}

/// Configuration for the decomposer.
///
/// # Example
/// ```rust
/// use pdf_decomposer::DecomposerConfig;
///
/// let config = DecomposerConfig::builder()
///     .password("hunter2")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecomposerConfig {
    /// Password policy applied when a document turns out to be encrypted.
    pub password: PasswordPolicy,
}

impl DecomposerConfig {
    pub fn builder() -> DecomposerConfigBuilder {
        DecomposerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DecomposerConfig`].
#[derive(Debug)]
pub struct DecomposerConfigBuilder {
    config: DecomposerConfig,
}

impl DecomposerConfigBuilder {
    /// Use the same password for every document.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = PasswordPolicy::Fixed(password.into());
        self
    }

    /// Resolve the password per document from the descriptor.
    pub fn password_resolver(
        mut self,
        resolver: impl Fn(&InputDescriptor) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.config.password = PasswordPolicy::Resolver(Arc::new(resolver));
        self
    }

    pub fn build(self) -> DecomposerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn default_policy_resolves_to_none() {
        let data = InputDescriptor::from_bytes("a.pdf", vec![]);
        assert_eq!(PasswordPolicy::None.resolve(&data), None);
    }

    #[test]
    fn fixed_policy_resolves_to_the_value() {
        let data = InputDescriptor::from_bytes("a.pdf", vec![]);
        let config = DecomposerConfig::builder().password("secret").build();
        assert_eq!(config.password.resolve(&data), Some("secret".to_string()));
    }

    #[test]
    fn resolver_receives_the_descriptor() {
        let data = InputDescriptor::from_bytes("vault/report.pdf", vec![]);
        let config = DecomposerConfig::builder()
            .password_resolver(|d| d.uri().starts_with("vault/").then(|| "s3cr3t".to_string()))
            .build();
        assert_eq!(config.password.resolve(&data), Some("s3cr3t".to_string()));

        let open = InputDescriptor::from_bytes("public/report.pdf", vec![]);
        assert_eq!(config.password.resolve(&open), None);
    }

    #[test]
    fn resolver_is_invoked_once_per_resolve() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let config = DecomposerConfigBuilder {
            config: DecomposerConfig::default(),
        }
        .password_resolver(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            None
        })
        .build();

        let data = InputDescriptor::from_bytes("a.pdf", vec![]);
        config.password.resolve(&data);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_never_prints_the_password() {
        let config = DecomposerConfig::builder().password("hunter2").build();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"), "got: {rendered}");
    }
}
