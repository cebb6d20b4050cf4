//! Fire-and-forget sound playback. Every sound is optional: nothing is spawned
//! unless the clip actually finished loading.

use bevy::audio::Volume;
use bevy::prelude::*;
use game_config::AudioConfig;

/// Marks the looping background music entity.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MusicTrack;

fn available(sources: Option<&Assets<AudioSource>>, audio: &AudioConfig, handle: &Handle<AudioSource>) -> bool {
    audio.enabled && sources.is_some_and(|s| s.contains(handle))
}

/// One-shot effect that despawns itself when done.
pub fn sfx_bundle(
    sources: Option<&Assets<AudioSource>>,
    audio: &AudioConfig,
    handle: &Handle<AudioSource>,
    volume: f32,
) -> Option<(AudioPlayer, PlaybackSettings)> {
    available(sources, audio, handle).then(|| {
        (
            AudioPlayer::new(handle.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
        )
    })
}

pub fn music_bundle(
    sources: Option<&Assets<AudioSource>>,
    audio: &AudioConfig,
    handle: &Handle<AudioSource>,
) -> Option<(AudioPlayer, PlaybackSettings, MusicTrack)> {
    available(sources, audio, handle).then(|| {
        (
            AudioPlayer::new(handle.clone()),
            PlaybackSettings::LOOP.with_volume(Volume::Linear(audio.music_volume)),
            MusicTrack,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn clip(assets: &mut Assets<AudioSource>) -> Handle<AudioSource> {
        assets.add(AudioSource {
            bytes: Arc::from(vec![0u8; 4]),
        })
    }

    #[test]
    fn missing_audio_backend_plays_nothing() {
        let cfg = AudioConfig::default();
        assert!(sfx_bundle(None, &cfg, &Handle::default(), 0.5).is_none());
    }

    #[test]
    fn unloaded_clip_is_skipped() {
        let cfg = AudioConfig::default();
        let assets = Assets::<AudioSource>::default();
        let mut other = Assets::<AudioSource>::default();
        let handle = clip(&mut other);
        assert!(sfx_bundle(Some(&assets), &cfg, &handle, 0.5).is_none());
    }

    #[test]
    fn loaded_clip_plays_with_volume() {
        let cfg = AudioConfig::default();
        let mut assets = Assets::<AudioSource>::default();
        let handle = clip(&mut assets);
        let (_, settings) = sfx_bundle(Some(&assets), &cfg, &handle, 0.4).expect("bundle");
        assert_eq!(settings.volume.to_linear(), 0.4);
        let (_, music, _) = music_bundle(Some(&assets), &cfg, &handle).expect("music");
        assert_eq!(music.volume.to_linear(), 0.25);
    }

    #[test]
    fn muted_config_plays_nothing() {
        let cfg = AudioConfig {
            enabled: false,
            ..AudioConfig::default()
        };
        let mut assets = Assets::<AudioSource>::default();
        let handle = clip(&mut assets);
        assert!(music_bundle(Some(&assets), &cfg, &handle).is_none());
    }
}
