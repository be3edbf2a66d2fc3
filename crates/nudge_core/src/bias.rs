//! Bias requests, mappings and the compiler that joins them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use nudge_constant::{DEFAULT_BIAS, MAX_BIAS, MIN_BIAS};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::encoder::{Encoder, TokenId};
use crate::error::{BiasError, Result};

/// Whole values go out as JSON integers (`-100`, not `-100.0`); the
/// Chat Completions schema types `logit_bias` values as integers.
fn serialize_bias<S: Serializer>(value: f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&value) {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

struct WireBias(f64);

impl Serialize for WireBias {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_bias(self.0, serializer)
    }
}

/// A bias value in `[-100, 100]`.
///
/// Negative values discourage a token, `-100` effectively bans it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(try_from = "f64")]
pub struct BiasMagnitude(f64);

impl Serialize for BiasMagnitude {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_bias(self.0, serializer)
    }
}

impl BiasMagnitude {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(MIN_BIAS..=MAX_BIAS).contains(&value) {
            return Err(BiasError::MagnitudeOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for BiasMagnitude {
    fn default() -> Self {
        Self(DEFAULT_BIAS)
    }
}

impl TryFrom<f64> for BiasMagnitude {
    type Error = BiasError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<BiasMagnitude> for f64 {
    fn from(magnitude: BiasMagnitude) -> Self {
        magnitude.0
    }
}

impl std::fmt::Display for BiasMagnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller wants biased, and how strongly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BiasRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<BiasMagnitude>,
}

impl BiasRequest {
    pub fn new(target_text: impl Into<String>) -> Self {
        Self {
            target_text: Some(target_text.into()),
            magnitude: None,
        }
    }

    pub fn with_magnitude(mut self, magnitude: BiasMagnitude) -> Self {
        self.magnitude = Some(magnitude);
        self
    }
}

/// Token id → bias, the shape of a chat-completion `logit_bias` parameter.
///
/// Serializes as a JSON object keyed by the decimal token id, with whole
/// values written as integers: `{"2437": -100}`. Every entry
/// carries the same value. Key order has no meaning; a sorted map keeps logs stable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BiasMapping(BTreeMap<TokenId, f64>);

impl Serialize for BiasMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, value) in &self.0 {
            map.serialize_entry(id, &WireBias(*value))?;
        }
        map.end()
    }
}

impl BiasMapping {
    /// Assign `value` to every id in `ids`.
    pub fn uniform(ids: impl IntoIterator<Item = TokenId>, value: f64) -> Self {
        Self(ids.into_iter().map(|id| (id, value)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty mapping means "no effective bias", not an error.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: TokenId) -> Option<f64> {
        self.0.get(&id).copied()
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.0.contains_key(&id)
    }

    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, f64)> + '_ {
        self.0.iter().map(|(id, v)| (*id, *v))
    }
}

/// Compiles bias requests against a fixed encoding.
///
/// Stateless apart from the shared encoder, so one instance can serve every request.
#[derive(Clone)]
pub struct BiasCompiler {
    encoder: Arc<dyn Encoder>,
}

impl BiasCompiler {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self { encoder }
    }

    pub fn encoding(&self) -> &str {
        self.encoder.name()
    }

    /// Compute the per-token bias for `target`.
    ///
    /// Returns `None` when `target` is absent or empty, whatever the magnitude.
    /// Otherwise the keys are the ids of `target` plus, unless `target` already
    /// starts with a space, the ids of `" " + target`. An unset magnitude means -100.
    pub fn compute(
        &self,
        target: Option<&str>,
        magnitude: Option<BiasMagnitude>,
    ) -> Option<BiasMapping> {
        let text = target.filter(|t| !t.is_empty())?;

        let mut ids: BTreeSet<TokenId> = self.encoder.encode(text).into_iter().collect();
        if !text.starts_with(' ') {
            ids.extend(self.encoder.encode(&format!(" {text}")));
        }

        let magnitude = magnitude.unwrap_or_default();
        tracing::debug!(
            encoding = self.encoder.name(),
            tokens = ids.len(),
            bias = magnitude.value(),
            "Compiled logit bias"
        );

        Some(BiasMapping::uniform(ids, magnitude.value()))
    }

    pub fn compile(&self, request: &BiasRequest) -> Option<BiasMapping> {
        self.compute(request.target_text.as_deref(), request.magnitude)
    }
}

impl std::fmt::Debug for BiasCompiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiasCompiler")
            .field("encoding", &self.encoder.name())
            .finish()
    }
}
