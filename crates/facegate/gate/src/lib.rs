//! Facegate re-authentication core.
//!
//! The gate decides, per feature access, whether a fresh biometric check is
//! required. The decision short-circuits in order:
//!
//! 1. an active exclusion session (navigation, recording, interpretation)
//!    defers trust to explicit session boundaries;
//! 2. a recent successful verification inside the trust TTL is honored;
//! 3. otherwise a live embedding is captured and compared against the
//!    enrolled credential, and the trust cache is updated on success only.
//!
//! Every internal failure (missing credential, extraction error, store
//! outage) collapses to a denial at the public boundary. The gate is a
//! decision function from its caller's perspective: it returns `bool` and
//! never panics or propagates errors. Underlying causes are still emitted as
//! tracing events, distinguishing infrastructure failures from legitimate
//! non-matches.
//!
//! Launch-time verification ([`LaunchAuthenticator`]) is the one path that
//! never short-circuits: app foregrounding is precisely the moment trust
//! must be re-established.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod error;
mod gate;
mod launch;
mod matcher;
mod session;
mod traits;
mod trust;

pub use error::{DenialReason, EnrollError, ExtractionError, GateOutcome, GrantBasis};
pub use gate::ReauthGate;
pub use launch::LaunchAuthenticator;
pub use matcher::{cosine_similarity, MatchPolicy};
pub use session::SessionRegistry;
pub use traits::{EmbeddingProvider, StaticEmbeddingProvider};
pub use trust::TrustCache;
