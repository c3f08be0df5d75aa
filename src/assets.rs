//! Central asset registry.
//!
//! Text payloads (constellation catalog, fallback quotes) are compiled
//! into the binary. Sprite sheets and the collision blip are built
//! procedurally at init: every texture in the suite is generated, so
//! there are no binary blobs to ship, and the byte-decode paths are
//! still exercised by screen captures and the synthesized WAV.

use serde::Deserialize;

use crate::audio::Chunk;
use crate::error::{Error, Result};
use crate::geometry::Vec2;
use crate::sprite::SpriteSheet;
use crate::texture::Texture;

const CONSTELLATIONS_JSON: &str = include_str!("../assets/constellations.json");
const QUOTES: &str = include_str!("../assets/quotes.txt");

// ============================================================================
// Constellation templates
// ============================================================================

/// Immutable morph target: vertex positions in local space plus the edge
/// list. Instances hold only running state and borrow these.
#[derive(Debug, Deserialize)]
pub struct ConstellationTemplate {
    pub name: String,
    vertices: Vec<[f32; 2]>,
    pub edges: Vec<[usize; 2]>,
}

impl ConstellationTemplate {
    pub fn vertices(&self) -> Vec<Vec2> {
        self.vertices.iter().map(|v| Vec2::new(v[0], v[1])).collect()
    }
}

/// Parse the embedded constellation catalog
pub fn constellations() -> Result<Vec<ConstellationTemplate>> {
    serde_json::from_str(CONSTELLATIONS_JSON).map_err(|e| Error::AssetDecode(e.to_string()))
}

/// Embedded fallback quotes for the marquee
pub fn quotes() -> Vec<&'static str> {
    QUOTES.lines().filter(|l| !l.trim().is_empty()).collect()
}

// ============================================================================
// Procedural sprite sheets
// ============================================================================

const TOASTER_FRAME: u32 = 48;

/// Chrome toaster with four wing positions (ping-pong flap)
pub fn toaster_sheet() -> SpriteSheet {
    let mut tex = Texture::new(TOASTER_FRAME * 4, TOASTER_FRAME);

    for frame in 0..4u32 {
        let ox = frame * TOASTER_FRAME;

        // Body: rounded chrome box
        tex.fill_rect(ox + 8, 18, 32, 20, 196, 200, 210, 255);
        tex.fill_rect(ox + 10, 16, 28, 2, 170, 174, 186, 255);
        tex.fill_rect(ox + 8, 36, 32, 2, 120, 124, 136, 255);
        // Slot
        tex.fill_rect(ox + 14, 18, 20, 3, 60, 60, 66, 255);
        // Lever
        tex.fill_rect(ox + 40, 24, 3, 6, 150, 150, 160, 255);
        // Feet
        tex.fill_rect(ox + 10, 38, 6, 3, 90, 92, 100, 255);
        tex.fill_rect(ox + 32, 38, 6, 3, 90, 92, 100, 255);

        // Wing: raised positions by frame, hinged at the top-left of body
        let lift = [14u32, 9, 4, 0][frame as usize];
        for i in 0..12u32 {
            let wy = 4 + lift + i / 2;
            tex.fill_rect(ox + 6 + i, wy, 2, 10 - i / 2, 240, 240, 248, 255);
        }
    }

    SpriteSheet::new(tex, TOASTER_FRAME, TOASTER_FRAME, 4)
}

/// A browned slice of toast
pub fn toast_texture() -> Texture {
    let mut tex = Texture::new(28, 28);
    tex.fill_rect(2, 4, 24, 22, 210, 160, 90, 255);
    tex.fill_rect(4, 2, 20, 4, 222, 178, 110, 255);
    // Crust
    tex.fill_rect(2, 4, 2, 22, 160, 110, 54, 255);
    tex.fill_rect(24, 4, 2, 22, 160, 110, 54, 255);
    tex.fill_rect(2, 24, 24, 2, 150, 100, 48, 255);
    tex
}

const FISH_FRAME: u32 = 36;

/// Per-species fish body colors
const FISH_COLORS: [(u8, u8, u8); 3] = [(240, 150, 50), (90, 170, 240), (230, 210, 80)];

/// Two-frame swimming fish. Frame 1 folds the tail for the flap.
/// Sprites face left; the blitter flips for rightward swimmers.
pub fn fish_sheet(species: usize) -> SpriteSheet {
    let (r, g, b) = FISH_COLORS[species % FISH_COLORS.len()];
    let mut tex = Texture::new(FISH_FRAME * 2, FISH_FRAME);

    for frame in 0..2u32 {
        let ox = frame * FISH_FRAME;

        // Body: fat ellipse drawn as stacked spans
        for row in 0..14u32 {
            let half = if row < 7 { row } else { 13 - row };
            let w = 6 + half * 2;
            tex.fill_rect(ox + 4 + (18 - w) / 2, 11 + row, w, 1, r, g, b, 255);
        }
        // Eye
        tex.fill_rect(ox + 8, 15, 2, 2, 10, 10, 10, 255);
        // Tail: wide when open (frame 0), folded when flapped (frame 1)
        let spread = if frame == 0 { 10 } else { 4 };
        for i in 0..6u32 {
            tex.fill_rect(
                ox + 24 + i,
                18 - (spread * i / 6) / 2,
                1,
                2 + spread * i / 6,
                r.saturating_sub(30),
                g.saturating_sub(30),
                b.saturating_sub(30),
                255,
            );
        }
    }

    SpriteSheet::new(tex, FISH_FRAME, FISH_FRAME, 2)
}

/// A rising bubble with a highlight
pub fn bubble_texture() -> Texture {
    let mut tex = Texture::new(10, 10);
    for y in 0..10i32 {
        for x in 0..10i32 {
            let dx = x - 5;
            let dy = y - 5;
            let d2 = dx * dx + dy * dy;
            if (12..=24).contains(&d2) {
                tex.set_pixel(x as u32, y as u32, 180, 220, 255, 200);
            }
        }
    }
    tex.set_pixel(3, 3, 240, 250, 255, 230);
    tex
}

/// The bouncing logo plate
pub fn logo_texture() -> Texture {
    use crate::display::{render_text, GLYPH_HEIGHT};

    let label = "OMARCHY";
    let scale = 5u32;
    let text = render_text(label, 235, 235, 245, scale);
    let pad = 12u32;
    let w = text.width() + pad * 2;
    let h = GLYPH_HEIGHT * scale + pad * 2;

    let mut tex = Texture::new(w, h);
    tex.fill_rect(0, 0, w, h, 18, 18, 28, 255);
    // Border
    tex.fill_rect(0, 0, w, 2, 120, 160, 255, 255);
    tex.fill_rect(0, h - 2, w, 2, 120, 160, 255, 255);
    tex.fill_rect(0, 0, 2, h, 120, 160, 255, 255);
    tex.fill_rect(w - 2, 0, 2, h, 120, 160, 255, 255);

    // Stamp the rendered text into the plate
    for y in 0..text.height() {
        for x in 0..text.width() {
            let (r, g, b, a) = text.sample_clamped(x as i32, y as i32);
            if a > 0 {
                tex.set_pixel(pad + x, pad + y, r, g, b, a);
            }
        }
    }

    tex
}

// ============================================================================
// Synthesized audio
// ============================================================================

/// Build a short collision blip as a complete WAV payload. The bytes go
/// through the normal `Chunk::from_wav_bytes` decode path.
pub fn collision_wav() -> Vec<u8> {
    const RATE: u32 = 22050;
    const DUR_MS: u32 = 90;
    let samples = RATE * DUR_MS / 1000;

    let mut pcm = Vec::with_capacity(samples as usize * 2);
    for i in 0..samples {
        let t = i as f32 / RATE as f32;
        // Descending pitch, fast decay
        let freq = 660.0 - 300.0 * (t / 0.09);
        let env = (1.0 - t / 0.09).max(0.0);
        let v = (t * freq * std::f32::consts::TAU).sin() * env * 0.4;
        let s = (v * i16::MAX as f32) as i16;
        pcm.extend_from_slice(&s.to_le_bytes());
    }

    let data_len = pcm.len() as u32;
    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&RATE.to_le_bytes());
    wav.extend_from_slice(&(RATE * 2).to_le_bytes()); // byte rate
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(&pcm);
    wav
}

/// Decode the synthesized blip; None if SDL can't parse it (mute fallback)
pub fn collision_chunk() -> Option<Chunk> {
    Chunk::from_wav_bytes(&collision_wav()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constellation_catalog_parses() {
        let cat = constellations().unwrap();
        assert!(cat.len() >= 3);
        for c in &cat {
            let verts = c.vertices();
            for e in &c.edges {
                assert!(e[0] < verts.len() && e[1] < verts.len(), "{}", c.name);
            }
        }
    }

    #[test]
    fn test_bear_shape() {
        let cat = constellations().unwrap();
        let bear = cat.iter().find(|c| c.name == "bear").unwrap();
        assert_eq!(bear.vertices().len(), 11);
        assert_eq!(bear.edges.len(), 14);
    }

    #[test]
    fn test_quotes_nonempty() {
        assert!(!quotes().is_empty());
    }

    #[test]
    fn test_sheets_have_expected_frames() {
        assert_eq!(toaster_sheet().frames, 4);
        assert_eq!(fish_sheet(0).frames, 2);
        assert_eq!(fish_sheet(7).frames, 2); // species index wraps
    }

    #[test]
    fn test_wav_header() {
        let wav = collision_wav();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len() % 2, 0);
    }
}
