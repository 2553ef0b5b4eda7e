use crate::core::{
    is_json_content_type, pick_one, SoundConfig, SoundError, SoundKey, SoundManifest,
};
use crate::dom::{self, js_err};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetch the sound manifest. Failures are logged here and turn into an empty
/// manifest, so a later lookup reports the key as missing.
pub async fn fetch_sound_manifest(config: &SoundConfig) -> SoundManifest {
    match try_fetch_manifest(config).await {
        Ok(manifest) => manifest,
        Err(e) => {
            log::error!("[sound] manifest {} unavailable: {:#}", config.manifest_url, e);
            SoundManifest::default()
        }
    }
}

async fn try_fetch_manifest(config: &SoundConfig) -> anyhow::Result<SoundManifest> {
    let window = dom::window()?;
    let request = web::Request::new_with_str(&config.manifest_url).map_err(js_err)?;
    let response: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;

    let content_type = response.headers().get("content-type").map_err(js_err)?;
    if !is_json_content_type(content_type.as_deref()) {
        return Err(SoundError::NotJson(content_type).into());
    }

    let body = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("manifest body is not text"))?;
    Ok(SoundManifest::from_json(&body)?)
}

/// Play the sound registered under `key`. The manifest is fetched on every call.
pub async fn play_sound(config: &SoundConfig, key: &str) -> anyhow::Result<()> {
    if SoundKey::from_key(key).is_none() {
        log::debug!("[sound] {} is not a shipped sound", key);
    }
    let manifest = fetch_sound_manifest(config).await;
    let file = manifest.resolve(key)?;
    play_asset(&config.asset_url(file))
}

/// Play one of `keys` at random, or any sound in the manifest when `keys` is empty.
pub async fn play_random_sound(config: &SoundConfig, keys: &[String]) -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let key = match pick_one(&mut rng, keys) {
        Some(key) => key.clone(),
        None => {
            let manifest = fetch_sound_manifest(config).await;
            log::debug!("[sound] picking from {} manifest entries", manifest.len());
            manifest.pick_random_key(&mut rng)?.to_string()
        }
    };
    log::debug!("[sound] random pick {}", key);
    play_sound(config, &key).await
}

fn play_asset(url: &str) -> anyhow::Result<()> {
    let audio = web::HtmlAudioElement::new_with_src(url).map_err(js_err)?;
    // the returned promise is not awaited; playback errors surface in the console
    if let Err(e) = audio.play() {
        log::warn!("[sound] play {} failed: {:?}", url, e);
    }
    Ok(())
}
