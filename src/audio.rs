//! WAV playback through the SDL audio queue.
//!
//! Audio is strictly optional: any failure degrades to silence with one
//! stderr line, and effects treat a missing player as "mute". Chunks are
//! signed 16-bit PCM, the format every embedded payload uses.

use sdl2::audio::{AudioFormat, AudioQueue, AudioSpecDesired, AudioSpecWAV};
use sdl2::rwops::RWops;
use sdl2::AudioSubsystem;

use crate::error::{Error, Result};

/// A decoded audio chunk
pub struct Chunk {
    pub samples: Vec<i16>,
    pub freq: i32,
    pub channels: u8,
}

impl Chunk {
    /// Decode embedded WAV bytes (16-bit little-endian PCM only)
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let mut rwops = RWops::from_bytes(bytes).map_err(Error::AssetDecode)?;
        let wav = AudioSpecWAV::load_wav_rw(&mut rwops).map_err(Error::AssetDecode)?;

        if wav.format != AudioFormat::S16LSB {
            return Err(Error::AssetDecode(format!(
                "unsupported wav format {:?}",
                wav.format
            )));
        }

        let samples = wav
            .buffer()
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();

        Ok(Self {
            samples,
            freq: wav.freq,
            channels: wav.channels,
        })
    }
}

pub struct AudioPlayer {
    queue: AudioQueue<i16>,
}

impl AudioPlayer {
    /// Open an audio device matching the chunk's format
    pub fn open(audio: &AudioSubsystem, chunk: &Chunk) -> Result<Self> {
        let desired = AudioSpecDesired {
            freq: Some(chunk.freq),
            channels: Some(chunk.channels),
            samples: None,
        };
        let queue = audio
            .open_queue::<i16, _>(None, &desired)
            .map_err(Error::InitFailure)?;
        queue.resume();
        Ok(Self { queue })
    }

    /// Queue a chunk for playback. Queue errors drop the sound rather
    /// than interrupting the frame loop.
    pub fn play(&self, chunk: &Chunk) {
        let _ = self.queue.queue_audio(&chunk.samples);
    }
}
