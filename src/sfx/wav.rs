//! Tiny WAV synthesis.
//!
//! Cues are short sine tones rendered as 8 kHz, 8-bit unsigned, mono PCM
//! with a linear fade-out, wrapped in a canonical 44-byte RIFF header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::f64::consts::PI;

pub const SAMPLE_RATE: u32 = 8000;

/// Size of the RIFF/WAVE header written by [`wav_bytes`].
pub const HEADER_LEN: usize = 44;

/// Render `seconds` of a `freq` Hz sine that fades linearly to silence.
pub fn tone(freq: f64, seconds: f64) -> Vec<u8> {
    let len = (f64::from(SAMPLE_RATE) * seconds).floor() as usize;
    (0..len)
        .map(|i| {
            let t = i as f64 / f64::from(SAMPLE_RATE);
            let fade = 1.0 - i as f64 / len as f64;
            let val = (2.0 * PI * freq * t).sin() * fade;
            ((val * 0.5 + 0.5) * 255.0).floor().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Scale unsigned 8-bit samples around the 128 midpoint.
pub fn apply_volume(pcm: &mut [u8], volume: f64) {
    let volume = volume.clamp(0.0, 1.0);
    for sample in pcm.iter_mut() {
        let centered = f64::from(*sample) - 128.0;
        *sample = (128.0 + centered * volume).round().clamp(0.0, 255.0) as u8;
    }
}

/// Wrap 8-bit mono PCM in a WAV container.
pub fn wav_bytes(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits_per_sample: u16 = 8;
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = pcm.len() as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    out
}

/// `data:audio/wav;base64,...` URL for embedding a WAV.
pub fn wav_data_url(wav: &[u8]) -> String {
    format!("data:audio/wav;base64,{}", STANDARD.encode(wav))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn u32_at(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn test_tone_length_and_shape() {
        let pcm = tone(880.0, 0.04);
        assert_eq!(pcm.len(), 320);
        // sin(0) = 0 sits on the midpoint
        assert_eq!(pcm[0], 127);
        // faded tail hugs the midpoint
        let last = *pcm.last().unwrap();
        assert!((120..=135).contains(&last), "tail sample {last}");
    }

    #[test]
    fn test_zero_duration_tone_is_empty() {
        assert!(tone(440.0, 0.0).is_empty());
    }

    #[test]
    fn test_wav_header() {
        let pcm = vec![128u8; 100];
        let wav = wav_bytes(&pcm, SAMPLE_RATE);

        assert_eq!(wav.len(), HEADER_LEN + 100);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 136);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1);
        assert_eq!(u32_at(&wav, 24), 8000);
        assert_eq!(u32_at(&wav, 28), 8000);
        assert_eq!(u16_at(&wav, 32), 1);
        assert_eq!(u16_at(&wav, 34), 8);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 100);
        assert!(wav[44..].iter().all(|&b| b == 128));
    }

    #[test]
    fn test_apply_volume() {
        let mut pcm = vec![0u8, 128, 255];
        apply_volume(&mut pcm, 0.25);
        assert_eq!(pcm, vec![96, 128, 160]);
    }

    #[test]
    fn test_data_url_prefix() {
        let url = wav_data_url(&wav_bytes(&[], SAMPLE_RATE));
        assert!(url.starts_with("data:audio/wav;base64,UklGR"));
    }
}
