// Sound manifest handling: which logical sound maps to which file, and how a
// key gets picked. Fetching and playback are in `audio.rs`.

use crate::constants::{JSON_CONTENT_TYPE, SOUND_ASSET_DIR, SOUND_MANIFEST_URL};
use crate::core::timing::random_int_clamp_with;
use fnv::FnvHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("sound manifest is not JSON (content-type: {0:?})")]
    NotJson(Option<String>),
    #[error("sound manifest could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no sound registered for key {0:?}")]
    MissingKey(String),
    #[error("sound manifest has no entries")]
    EmptyManifest,
}

/// Sounds shipped with the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKey {
    Chirp1,
    Chirp2,
    Chirp3,
    Chirp4,
    Chirp5,
    Chirp6,
    Chirp7,
    Chirp8,
    Chirp9,
    Babble1,
}

impl SoundKey {
    pub const ALL: [SoundKey; 10] = [
        SoundKey::Chirp1,
        SoundKey::Chirp2,
        SoundKey::Chirp3,
        SoundKey::Chirp4,
        SoundKey::Chirp5,
        SoundKey::Chirp6,
        SoundKey::Chirp7,
        SoundKey::Chirp8,
        SoundKey::Chirp9,
        SoundKey::Babble1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundKey::Chirp1 => "chirp-1",
            SoundKey::Chirp2 => "chirp-2", // quieter
            SoundKey::Chirp3 => "chirp-3", // longer
            SoundKey::Chirp4 => "chirp-4", // high pitch
            SoundKey::Chirp5 => "chirp-5", // extra long
            SoundKey::Chirp6 => "chirp-6", // excited
            SoundKey::Chirp7 => "chirp-7",
            SoundKey::Chirp8 => "chirp-8", // alarmed
            SoundKey::Chirp9 => "chirp-9", // wow
            SoundKey::Babble1 => "babble-1",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Where the manifest and the sound files are served from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundConfig {
    pub manifest_url: String,
    pub asset_dir: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            manifest_url: SOUND_MANIFEST_URL.to_string(),
            asset_dir: SOUND_ASSET_DIR.to_string(),
        }
    }
}

impl SoundConfig {
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}{}", self.asset_dir, file)
    }
}

/// Logical sound key -> file name, as served in the manifest JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundManifest {
    entries: FnvHashMap<String, String>,
}

impl SoundManifest {
    pub fn from_json(body: &str) -> Result<Self, SoundError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn resolve(&self, key: &str) -> Result<&str, SoundError> {
        self.entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SoundError::MissingKey(key.to_string()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Uniformly random key among all entries.
    pub fn pick_random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str, SoundError> {
        if self.is_empty() {
            return Err(SoundError::EmptyManifest);
        }
        let max = self.len() as i32 - 1;
        let i = random_int_clamp_with(rng, 0, max) as usize;
        self.keys().nth(i).ok_or(SoundError::EmptyManifest)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SoundManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Uniformly pick one of the caller's keys.
pub fn pick_one<'k, S, R>(rng: &mut R, keys: &'k [S]) -> Option<&'k S>
where
    R: Rng + ?Sized,
{
    if keys.is_empty() {
        return None;
    }
    let i = random_int_clamp_with(rng, 0, keys.len() as i32 - 1) as usize;
    keys.get(i)
}

#[inline]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.contains(JSON_CONTENT_TYPE))
        .unwrap_or(false)
}
