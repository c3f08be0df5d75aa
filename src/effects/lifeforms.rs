//! Constellation life-forms. Star groups morph through a four-phase
//! cycle: SCATTER pulls stars onto a constellation's vertices, CONNECT
//! reveals its edges one by one, HOLD keeps the figure lit, DISSOLVE
//! recedes the edges and scatters the stars before the next figure.
//!
//! Runs with one group or three; three-group placements are found by
//! rejection sampling so the rotated bounding boxes never overlap.

use crate::assets::{self, ConstellationTemplate};
use crate::display::PixelBuffer;
use crate::geometry::{Aabb, Vec2};
use crate::runtime::Effect;
use crate::util::Rng;

/// Nominal phase duration in seconds
const PHASE_SECS: f32 = 3.0;
/// Dissolve progress accumulated per second; the phase ends when progress
/// reaches `edges * 0.1` (the original's heuristic, kept as-is)
const DISSOLVE_RATE: f32 = 0.3111;
/// Viewport margin and inter-group gap for placement
const PLACE_MARGIN: f32 = 20.0;
const GROUP_GAP: f32 = 20.0;
const PLACE_ATTEMPTS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scatter,
    Connect,
    Hold,
    Dissolve,
    Done,
}

/// Dissolve runs until the heuristic threshold, so its wall-clock length
/// scales with the figure's edge count.
pub fn dissolve_duration(edges: usize) -> f32 {
    edges as f32 * 0.1 / DISSOLVE_RATE
}

/// Edge reveal during CONNECT: edge `i` of `count` fades in over its own
/// slice of the phase.
pub fn edge_progress(phase_t: f32, edge_count: usize, i: usize) -> f32 {
    (phase_t / PHASE_SECS * edge_count as f32 - i as f32).clamp(0.0, 1.0)
}

struct StarState {
    pos: Vec2,
    target: Vec2,
}

struct Group {
    template_idx: usize,
    phase: Phase,
    phase_t: f32,
    dissolve_progress: f32,
    stars: Vec<StarState>,
}

pub struct Lifeforms {
    templates: Vec<ConstellationTemplate>,
    groups: Vec<Group>,
    group_count: usize,
    hold_secs: f32,
    speed: f32,
    rng: Rng,
    placed: bool,
}

/// Find non-overlapping placements for the chosen templates. Returns the
/// placements and whether every one satisfied the constraints (the last
/// candidate is kept regardless once the attempt budget is spent).
fn place_groups(
    rng: &mut Rng,
    templates: &[ConstellationTemplate],
    chosen: &[usize],
    scale: f32,
    width: f32,
    height: f32,
) -> (Vec<(f32, Vec2, f32)>, bool) {
    let mut placements: Vec<(f32, Vec2, f32)> = Vec::with_capacity(chosen.len());
    let mut boxes: Vec<Aabb> = Vec::new();
    let mut all_ok = true;

    for &idx in chosen {
        let verts: Vec<Vec2> = templates[idx]
            .vertices()
            .iter()
            .map(|&v| v * scale)
            .collect();
        let rotation = rng.range_f32(0.0, std::f32::consts::TAU);
        let local_box = Aabb::of_rotated(&verts, rotation);

        let mut candidate = Vec2::new(width / 2.0, height / 2.0);
        let mut ok = false;
        for _ in 0..PLACE_ATTEMPTS {
            candidate = Vec2::new(
                rng.range_f32(0.0, width),
                rng.range_f32(0.0, height),
            );
            let placed_box = local_box.offset(candidate);
            if !placed_box.fits(width, height, PLACE_MARGIN) {
                continue;
            }
            if boxes.iter().any(|b| placed_box.intersects_with_gap(b, GROUP_GAP)) {
                continue;
            }
            ok = true;
            break;
        }

        all_ok &= ok;
        boxes.push(local_box.offset(candidate));
        placements.push((rotation, candidate, scale));
    }

    (placements, all_ok)
}

impl Lifeforms {
    pub fn new(group_count: u32, speed: f32, seed: u64) -> Self {
        let group_count = if group_count >= 2 { 3 } else { 1 };
        let templates = assets::constellations().unwrap_or_default();
        let hold_secs = if group_count == 1 {
            2.0 * PHASE_SECS
        } else {
            4.0 * PHASE_SECS
        };

        Self {
            templates,
            groups: Vec::new(),
            group_count,
            hold_secs,
            speed,
            rng: Rng::new(seed),
            placed: false,
        }
    }

    fn group_scale(&self, width: f32, height: f32) -> f32 {
        let base = width.min(height);
        if self.group_count == 1 {
            base / 550.0
        } else {
            base / 950.0
        }
    }

    /// Choose templates without replacement and place fresh groups
    fn seed_groups(&mut self, width: f32, height: f32) {
        if self.templates.is_empty() {
            return;
        }

        let previous: Vec<usize> = self.groups.iter().map(|g| g.template_idx).collect();
        let mut chosen = Vec::with_capacity(self.group_count);
        while chosen.len() < self.group_count.min(self.templates.len()) {
            let idx = self.rng.index(self.templates.len());
            if chosen.contains(&idx) {
                continue;
            }
            // Avoid repeating the figure a group just showed
            if self.templates.len() > self.group_count && previous.contains(&idx) {
                continue;
            }
            chosen.push(idx);
        }

        let scale = self.group_scale(width, height);
        let (placements, _ok) =
            place_groups(&mut self.rng, &self.templates, &chosen, scale, width, height);

        self.groups.clear();
        for (&template_idx, &(rotation, offset, scale)) in chosen.iter().zip(&placements) {
            let verts = self.templates[template_idx].vertices();
            let stars = verts
                .iter()
                .map(|&v| {
                    let target = v * scale;
                    let target = target.rotated(rotation) + offset;
                    StarState {
                        // Scatter in from random positions near the placement
                        pos: Vec2::new(
                            target.x + self.rng.range_f32(-180.0, 180.0),
                            target.y + self.rng.range_f32(-180.0, 180.0),
                        ),
                        target,
                    }
                })
                .collect();

            self.groups.push(Group {
                template_idx,
                phase: Phase::Scatter,
                phase_t: 0.0,
                dissolve_progress: 0.0,
                stars,
            });
        }
    }
}

impl Effect for Lifeforms {
    fn update(&mut self, dt: f32, _elapsed: f32, width: u32, height: u32) {
        let w = width as f32;
        let h = height as f32;

        if !self.placed {
            self.placed = true;
            self.seed_groups(w, h);
        }
        if self.groups.is_empty() {
            return;
        }

        let step = dt * self.speed;
        let hold_secs = self.hold_secs;
        let Self {
            ref mut groups,
            ref templates,
            ref mut rng,
            ..
        } = *self;

        for g in groups.iter_mut() {
            g.phase_t += step;
            let edges = templates[g.template_idx].edges.len();

            match g.phase {
                Phase::Scatter => {
                    let pull = (g.phase_t / PHASE_SECS).clamp(0.0, 1.0) * 0.1;
                    for s in &mut g.stars {
                        s.pos = s.pos + (s.target - s.pos) * pull;
                    }
                    if g.phase_t >= PHASE_SECS {
                        // Snap: connect draws between exact vertices
                        for s in &mut g.stars {
                            s.pos = s.target;
                        }
                        g.phase = Phase::Connect;
                        g.phase_t = 0.0;
                    }
                },
                Phase::Connect => {
                    if g.phase_t >= PHASE_SECS {
                        g.phase = Phase::Hold;
                        g.phase_t = 0.0;
                    }
                },
                Phase::Hold => {
                    if g.phase_t >= hold_secs {
                        g.phase = Phase::Dissolve;
                        g.phase_t = 0.0;
                        g.dissolve_progress = 0.0;
                    }
                },
                Phase::Dissolve => {
                    g.dissolve_progress += step * DISSOLVE_RATE;
                    let frac =
                        (g.dissolve_progress / (edges as f32 * 0.1)).clamp(0.0, 1.0);
                    for s in &mut g.stars {
                        s.pos.x += rng.range_f32(-1.0, 1.0) * frac * 90.0 * step;
                        s.pos.y += rng.range_f32(-1.0, 1.0) * frac * 90.0 * step;
                    }
                    if g.dissolve_progress >= edges as f32 * 0.1 {
                        g.phase = Phase::Done;
                    }
                },
                Phase::Done => {},
            }
        }

        if self.groups.iter().all(|g| g.phase == Phase::Done) {
            self.seed_groups(w, h);
        }
    }

    fn render(&self, buffer: &mut PixelBuffer, elapsed: f32) {
        buffer.clear(1, 2, 8);

        for g in &self.groups {
            let template = &self.templates[g.template_idx];
            let edges = template.edges.len();

            // Edges: partial during connect, full during hold, receding
            // in reverse order during dissolve
            let draw_edges = match g.phase {
                Phase::Connect | Phase::Hold | Phase::Dissolve => true,
                Phase::Scatter | Phase::Done => false,
            };
            if draw_edges {
                for (i, e) in template.edges.iter().enumerate() {
                    let progress = match g.phase {
                        Phase::Connect => edge_progress(g.phase_t, edges, i),
                        Phase::Hold => 1.0,
                        Phase::Dissolve => {
                            let frac = (g.dissolve_progress / (edges as f32 * 0.1))
                                .clamp(0.0, 1.0);
                            (1.0 - (frac * edges as f32 - i as f32)).clamp(0.0, 1.0)
                        },
                        _ => 0.0,
                    };
                    if progress <= 0.0 {
                        continue;
                    }

                    let a = g.stars[e[0]].pos;
                    let b = g.stars[e[1]].pos;
                    let tip = a + (b - a) * progress;
                    buffer.line(
                        a.x as i32,
                        a.y as i32,
                        tip.x as i32,
                        tip.y as i32,
                        90,
                        140,
                        220,
                    );
                }
            }

            // Stars on top, twinkling gently while held
            for (i, s) in g.stars.iter().enumerate() {
                let tw = ((elapsed * 2.1 + i as f32 * 1.7).sin() * 40.0) as i32;
                let v = (215 + tw).clamp(120, 255) as u8;
                let x = s.pos.x as i32;
                let y = s.pos.y as i32;
                buffer.set_pixel(x, y, v, v, v);
                buffer.set_pixel(x - 1, y, v / 2, v / 2, v / 2);
                buffer.set_pixel(x + 1, y, v / 2, v / 2, v / 2);
                buffer.set_pixel(x, y - 1, v / 2, v / 2, v / 2);
                buffer.set_pixel(x, y + 1, v / 2, v / 2, v / 2);
            }
        }
    }

    fn name(&self) -> &str {
        "Life Forms"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bear_dissolve_duration() {
        // 14 edges: threshold 1.4 at 0.3111/s is the original 4.5 s
        assert!((dissolve_duration(14) - 4.5).abs() < 0.01);
    }

    #[test]
    fn test_single_group_phase_timeline() {
        let mut e = Lifeforms::new(1, 1.0, 42);
        let dt = 0.01;
        let mut t = 0.0f32;

        let phase_at = |e: &Lifeforms| e.groups[0].phase;
        let template_at = |e: &Lifeforms| e.groups[0].template_idx;

        // Drive to just before each boundary and just after
        let step_until = |e: &mut Lifeforms, until: f32, t: &mut f32| {
            while *t < until {
                e.update(dt, *t, 800, 600);
                *t += dt;
            }
        };

        step_until(&mut e, 2.9, &mut t);
        assert_eq!(phase_at(&e), Phase::Scatter);
        let first_template = template_at(&e);

        step_until(&mut e, 3.1, &mut t);
        assert_eq!(phase_at(&e), Phase::Connect);

        step_until(&mut e, 6.1, &mut t);
        assert_eq!(phase_at(&e), Phase::Hold);

        // Hold runs 2 phases for the single-group variant
        step_until(&mut e, 11.9, &mut t);
        assert_eq!(phase_at(&e), Phase::Hold);
        step_until(&mut e, 12.1, &mut t);
        assert_eq!(phase_at(&e), Phase::Dissolve);

        // Next figure begins after the edge-count-scaled dissolve
        let edges = e.templates[first_template].edges.len();
        let next_at = 12.0 + dissolve_duration(edges);
        step_until(&mut e, next_at + 0.2, &mut t);
        assert_eq!(phase_at(&e), Phase::Scatter);
        assert_ne!(template_at(&e), first_template);
    }

    #[test]
    fn test_connect_reveals_all_edges_by_phase_end() {
        assert_eq!(edge_progress(0.0, 14, 0), 0.0);
        assert_eq!(edge_progress(PHASE_SECS, 14, 13), 1.0);
        // Mid-phase: early edges done, late edges pending
        let mid = edge_progress(PHASE_SECS / 2.0, 14, 0);
        assert_eq!(mid, 1.0);
        assert_eq!(edge_progress(PHASE_SECS / 2.0, 14, 13), 0.0);
    }

    #[test]
    fn test_three_group_placement_disjoint() {
        let mut rng = Rng::new(9);
        let templates = assets::constellations().unwrap();
        let chosen = [0usize, 1, 2];
        let (placements, ok) =
            place_groups(&mut rng, &templates, &chosen, 0.6, 1920.0, 1080.0);
        assert_eq!(placements.len(), 3);

        if ok {
            let boxes: Vec<Aabb> = chosen
                .iter()
                .zip(&placements)
                .map(|(&idx, &(rot, off, scale))| {
                    let verts: Vec<Vec2> =
                        templates[idx].vertices().iter().map(|&v| v * scale).collect();
                    Aabb::of_rotated(&verts, rot).offset(off)
                })
                .collect();
            for i in 0..boxes.len() {
                for j in (i + 1)..boxes.len() {
                    assert!(
                        !boxes[i].intersects_with_gap(&boxes[j], GROUP_GAP),
                        "groups {} and {} overlap",
                        i,
                        j
                    );
                }
            }
        }
        // !ok means all 200 attempts were consumed and the last
        // candidate was kept; overlap is tolerated in that case
    }

    #[test]
    fn test_three_group_hold_is_longer() {
        let single = Lifeforms::new(1, 1.0, 1);
        let triple = Lifeforms::new(3, 1.0, 1);
        assert_eq!(single.hold_secs, 6.0);
        assert_eq!(triple.hold_secs, 12.0);
    }
}
