/// Generic bounded pool of point particles, shared by rain and snow.
/// Only the spawn parameters (velocity distribution, glyphs, colors,
/// lifetime) differ per caller.

use crossterm::style::Color;

use crate::ui::grid::Grid;

#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub ch: char,
    pub fg: Color,
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, ch: char, fg: Color, max_life: u32) -> Self {
        Particle {
            x,
            y,
            vx,
            vy,
            ch,
            fg,
            life: max_life,
            max_life,
        }
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        ParticleSystem {
            particles: Vec::with_capacity(max_particles),
            max_particles,
        }
    }

    /// Add a particle. Silently dropped when the pool is at capacity.
    pub fn spawn(&mut self, p: Particle) {
        if self.particles.len() >= self.max_particles {
            return;
        }
        self.particles.push(p);
    }

    /// Advance every particle, cull expired ones and any that drifted
    /// more than 5 cells beyond an edge.
    pub fn update(&mut self, cols: i32, rows: i32) {
        let (w, h) = (cols as f32, rows as f32);
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.life = p.life.saturating_sub(1);
        }
        self.particles
            .retain(|p| p.life > 0 && p.x > -5.0 && p.x < w + 5.0 && p.y > -5.0 && p.y < h + 5.0);
    }

    pub fn draw(&self, grid: &mut Grid) {
        for p in &self.particles {
            grid.set(p.x.floor() as i32, p.y.floor() as i32, p.ch, p.fg);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(max_life: u32) -> Particle {
        Particle::new(10.0, 10.0, 0.0, 0.0, '*', Color::White, max_life)
    }

    #[test]
    fn particle_expires_after_exactly_max_life_updates() {
        let mut pool = ParticleSystem::new(10);
        pool.spawn(still(7));
        for i in 0..6 {
            pool.update(40, 40);
            assert_eq!(pool.len(), 1, "still alive after {} updates", i + 1);
        }
        pool.update(40, 40);
        assert_eq!(pool.len(), 0, "gone after max_life updates");
    }

    #[test]
    fn capacity_drops_newest_spawns() {
        let mut pool = ParticleSystem::new(2);
        pool.spawn(still(5));
        pool.spawn(still(5));
        pool.spawn(still(5));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn off_screen_margin_cull() {
        let mut pool = ParticleSystem::new(4);
        // Fast mover exits the 5-cell margin on the first update.
        pool.spawn(Particle::new(0.0, 0.0, -20.0, 0.0, '*', Color::White, 100));
        // Slow drifter just inside the margin survives.
        pool.spawn(Particle::new(-4.0, 0.0, 0.0, 0.0, '.', Color::White, 100));
        pool.update(40, 40);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn draw_floors_positions() {
        let mut pool = ParticleSystem::new(4);
        pool.spawn(Particle::new(3.9, 2.2, 0.0, 0.0, 'o', Color::White, 5));
        let mut grid = Grid::new(10, 10);
        pool.draw(&mut grid);
        assert_eq!(grid.get(3, 2).unwrap().ch, 'o');
    }
}
