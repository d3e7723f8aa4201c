//! The player controller.
//!
//! `update` runs a fixed sequence each frame and later steps read what earlier
//! ones wrote: walk, ladders, gravity, platform landing, jump, screen bounds,
//! hitbox resync, shooting. Movement is direct (no acceleration); the only
//! velocity is vertical.

use dk_core::geometry::{edges_touch, Aabb, EDGE_EPSILON};
use dk_core::input::{InputState, Key};

use crate::collision::Transition;
use crate::config::{SpriteSize, SpriteSizes};
use crate::entity::{Entity, EntityKind, Equipment, Facing, SimContext};
use crate::physics::TERMINAL_VELOCITY;
use crate::projectile::{Projectile, ProjectileKind};
use crate::props::{Barrel, Ladder, Platform};

pub const MOVE_SPEED: f32 = 3.5;
pub const CLIMB_SPEED: f32 = 2.0;
pub const JUMP_STRENGTH: f32 = -5.0;
pub const PLAYER_GRAVITY: f32 = 0.2;
/// Rounds granted by each blaster pickup.
pub const BLASTER_BATCH: u32 = 5;
/// How far apart horizontally the player and a barrel may be and still count
/// as "directly above" it.
pub const JUMP_OVER_TOLERANCE: f32 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump_pressed: bool,
    pub fire_pressed: bool,
}

impl PlayerInput {
    pub fn from_state(input: &InputState) -> Self {
        Self {
            left: input.is_held(Key::Left),
            right: input.is_held(Key::Right),
            up: input.is_held(Key::Up),
            down: input.is_held(Key::Down),
            jump_pressed: input.is_just_pressed(Key::Jump),
            fire_pressed: input.is_just_pressed(Key::Fire),
        }
    }
}

/// Sprite sizes the player switches between, plus the bullet it fires.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSprites {
    pub unarmed: SpriteSize,
    pub hammer: SpriteSize,
    pub blaster: SpriteSize,
    pub bullet: SpriteSize,
}

impl From<&SpriteSizes> for PlayerSprites {
    fn from(sizes: &SpriteSizes) -> Self {
        Self {
            unarmed: sizes.mario,
            hammer: sizes.mario_hammer,
            blaster: sizes.mario_blaster,
            bullet: sizes.bullet,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub aabb: Aabb,
    pub velocity_y: f32,
    pub facing: Facing,
    jumping: bool,
    jump_scored: bool,
    on_ladder: bool,
    on_platform: bool,
    equipment: Equipment,
    ammo: u32,
    defeated: bool,
    sprites: PlayerSprites,
}

impl Player {
    pub fn new(x: f32, y: f32, sprites: PlayerSprites) -> Self {
        Self {
            aabb: Aabb::new(x, y, sprites.unarmed.width, sprites.unarmed.height),
            velocity_y: 0.0,
            facing: Facing::Right,
            jumping: false,
            jump_scored: false,
            on_ladder: false,
            on_platform: false,
            equipment: Equipment::None,
            ammo: 0,
            defeated: false,
            sprites,
        }
    }

    pub fn equipment(&self) -> Equipment {
        self.equipment
    }

    pub fn has_hammer(&self) -> bool {
        self.equipment == Equipment::Hammer
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    #[allow(dead_code)]
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    #[allow(dead_code)]
    pub fn is_on_ladder(&self) -> bool {
        self.on_ladder
    }

    #[allow(dead_code)]
    pub fn is_on_platform(&self) -> bool {
        self.on_platform
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    /// Advance one frame. Returns a bullet if one was fired.
    pub fn update(
        &mut self,
        input: &PlayerInput,
        ladders: &[Ladder],
        platforms: &[Platform],
        ctx: &SimContext,
    ) -> Option<Projectile> {
        self.walk(input);
        self.on_ladder = self.climb(input, ladders);

        if !self.on_ladder {
            self.velocity_y = (self.velocity_y + PLAYER_GRAVITY).min(TERMINAL_VELOCITY);
            self.aabb.center_y += self.velocity_y;
        }

        self.on_platform = self.land(platforms);
        if self.on_platform && input.jump_pressed {
            self.velocity_y = JUMP_STRENGTH;
            self.jumping = true;
            self.jump_scored = false;
            log::debug!("Jump");
        }

        self.enforce_bounds(ctx);
        self.sync_hitbox();
        self.shoot(input)
    }

    fn walk(&mut self, input: &PlayerInput) {
        if input.left {
            self.aabb.center_x -= MOVE_SPEED;
            self.facing = Facing::Left;
        } else if input.right {
            self.aabb.center_x += MOVE_SPEED;
            self.facing = Facing::Right;
        }
    }

    /// Ladder handling. Returns true while the player is on a ladder, which
    /// suspends gravity for the frame.
    fn climb(&mut self, input: &PlayerInput, ladders: &[Ladder]) -> bool {
        let mut on_ladder = false;
        for ladder in ladders {
            let rungs = ladder.bounds();
            let bottom = self.aabb.bottom();
            let centered = self.aabb.center_within_x(&rungs);

            if self.aabb.intersects(&rungs) {
                if !centered {
                    continue;
                }
                on_ladder = true;

                if !input.up && !input.down {
                    self.velocity_y = 0.0;
                }
                if input.up {
                    self.aabb.center_y -= CLIMB_SPEED;
                    self.velocity_y = 0.0;
                }
                if input.down {
                    let next_bottom = self.aabb.bottom() + CLIMB_SPEED;
                    if bottom > rungs.top() && next_bottom <= rungs.bottom() {
                        self.aabb.center_y += CLIMB_SPEED;
                        self.velocity_y = 0.0;
                    } else if edges_touch(bottom, rungs.bottom()) {
                        self.velocity_y = 0.0;
                    } else if rungs.bottom() - bottom < CLIMB_SPEED {
                        self.aabb.center_y += rungs.bottom() - bottom;
                        self.velocity_y = 0.0;
                    }
                }
            } else if centered && input.down && edges_touch(bottom, rungs.top()) {
                // Standing exactly on top of a ladder does not overlap it;
                // step onto the first rung.
                self.aabb.center_y += CLIMB_SPEED;
                self.velocity_y = 0.0;
            } else if centered && input.down && edges_touch(bottom, rungs.bottom()) {
                self.velocity_y = 0.0;
            }
        }
        on_ladder
    }

    /// Snap onto the first platform reached while moving down.
    fn land(&mut self, platforms: &[Platform]) -> bool {
        if self.velocity_y < 0.0 {
            return false;
        }
        for platform in platforms {
            let surface = platform.bounds();
            if self.aabb.intersects(&surface)
                && self.aabb.bottom() <= surface.top() + self.velocity_y + EDGE_EPSILON
            {
                self.aabb.set_bottom(surface.top());
                self.velocity_y = 0.0;
                self.jumping = false;
                return true;
            }
        }
        false
    }

    fn enforce_bounds(&mut self, ctx: &SimContext) {
        let half_w = self.aabb.half_w;
        self.aabb.center_x = self
            .aabb
            .center_x
            .clamp(half_w, (ctx.screen_width - half_w).max(half_w));

        if self.aabb.bottom() > ctx.screen_height {
            self.aabb.set_bottom(ctx.screen_height);
            self.velocity_y = 0.0;
            self.jumping = false;
        }
    }

    fn sprite_for(&self, equipment: Equipment) -> SpriteSize {
        match equipment {
            Equipment::None => self.sprites.unarmed,
            Equipment::Hammer => self.sprites.hammer,
            Equipment::Blaster => self.sprites.blaster,
        }
    }

    /// Resize the hitbox to the current sprite, keeping the feet in place.
    fn sync_hitbox(&mut self) {
        let size = self.sprite_for(self.equipment);
        if self.aabb.width() != size.width || self.aabb.height() != size.height {
            self.aabb.resize_keep_bottom(size.width, size.height);
        }
    }

    fn set_equipment(&mut self, equipment: Equipment) {
        self.equipment = equipment;
        self.sync_hitbox();
    }

    fn shoot(&mut self, input: &PlayerInput) -> Option<Projectile> {
        if self.equipment != Equipment::Blaster || !input.fire_pressed || self.ammo == 0 {
            return None;
        }
        let center = self.aabb.center();
        let bullet = Projectile::new(
            ProjectileKind::Bullet,
            center.x,
            center.y,
            self.facing,
            self.sprites.bullet,
        );
        self.ammo -= 1;
        if self.ammo == 0 {
            log::debug!("Blaster empty");
            self.set_equipment(Equipment::None);
        }
        Some(bullet)
    }

    /// Whether the player is currently sailing over `barrel`: airborne,
    /// horizontally aligned, above it, and with enough jump height left to
    /// clear its top.
    pub fn jump_over(&self, barrel: &Barrel) -> bool {
        let target = barrel.bounds();
        let apex = (JUMP_STRENGTH * JUMP_STRENGTH) / (2.0 * PLAYER_GRAVITY);
        self.jumping
            && (self.aabb.center_x - target.center_x).abs() <= JUMP_OVER_TOLERANCE
            && self.aabb.center_y < target.center_y
            && self.aabb.bottom() >= target.bottom() - apex - self.aabb.half_h
    }

    /// Claim the one jump-over bonus allowed per jump.
    pub fn claim_jump_bonus(&mut self) -> bool {
        if self.jumping && !self.jump_scored {
            self.jump_scored = true;
            true
        } else {
            false
        }
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn bounds(&self) -> Aabb {
        self.aabb
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Equip(Equipment::Hammer) => {
                self.ammo = 0;
                self.set_equipment(Equipment::Hammer);
                log::debug!("Hammer equipped");
            }
            Transition::Equip(Equipment::Blaster) => {
                self.ammo += BLASTER_BATCH;
                self.set_equipment(Equipment::Blaster);
                log::debug!("Blaster equipped, ammo {}", self.ammo);
            }
            Transition::Equip(Equipment::None) => self.set_equipment(Equipment::None),
            Transition::Kill => {
                if !self.defeated {
                    self.defeated = true;
                    log::debug!("Player killed");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpriteSizes;

    const CTX: SimContext = SimContext {
        screen_width: 1024.0,
        screen_height: 768.0,
    };

    fn player(x: f32, y: f32) -> Player {
        Player::new(x, y, PlayerSprites::from(&SpriteSizes::default()))
    }

    fn floor() -> Platform {
        // top edge at y = 490
        Platform::new(300.0, 500.0, SpriteSize::new(256.0, 20.0))
    }

    fn idle() -> PlayerInput {
        PlayerInput::default()
    }

    #[test]
    fn walking_moves_and_turns() {
        let mut p = player(300.0, 100.0);
        let input = PlayerInput {
            left: true,
            ..idle()
        };
        p.update(&input, &[], &[], &CTX);
        assert_eq!(p.aabb.center_x, 300.0 - MOVE_SPEED);
        assert_eq!(p.facing, Facing::Left);
    }

    #[test]
    fn falls_onto_platform_and_stays() {
        let platforms = [floor()];
        let mut p = player(300.0, 400.0);
        for _ in 0..100 {
            p.update(&idle(), &[], &platforms, &CTX);
        }
        assert!(p.is_on_platform());
        assert_eq!(p.aabb.bottom(), 490.0);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn jump_only_from_platform() {
        let platforms = [floor()];
        let jump = PlayerInput {
            jump_pressed: true,
            ..idle()
        };

        let mut airborne = player(300.0, 100.0);
        airborne.update(&jump, &[], &platforms, &CTX);
        assert!(!airborne.is_jumping());

        let mut grounded = player(300.0, 400.0);
        for _ in 0..100 {
            grounded.update(&idle(), &[], &platforms, &CTX);
        }
        let rest_y = grounded.aabb.center_y;
        grounded.update(&jump, &[], &platforms, &CTX);
        assert!(grounded.is_jumping());
        assert_eq!(grounded.velocity_y, JUMP_STRENGTH);

        grounded.update(&idle(), &[], &platforms, &CTX);
        assert!(grounded.aabb.center_y < rest_y);
    }

    #[test]
    fn screen_bounds_are_enforced() {
        let mut p = player(5.0, 760.0);
        p.velocity_y = 8.0;
        p.update(&idle(), &[], &[], &CTX);
        assert_eq!(p.aabb.left(), 0.0);
        assert_eq!(p.aabb.bottom(), CTX.screen_height);
        assert_eq!(p.velocity_y, 0.0);

        let mut right = player(1020.0, 100.0);
        right.update(
            &PlayerInput {
                right: true,
                ..idle()
            },
            &[],
            &[],
            &CTX,
        );
        assert_eq!(right.aabb.right(), CTX.screen_width);
    }

    #[test]
    fn climbing_up_suspends_gravity() {
        let ladders = [Ladder::new(300.0, 430.0, SpriteSize::new(40.0, 96.0))];
        let mut p = player(300.0, 440.0);
        p.velocity_y = 3.0;
        p.update(
            &PlayerInput {
                up: true,
                ..idle()
            },
            &ladders,
            &[],
            &CTX,
        );
        assert!(p.is_on_ladder());
        assert_eq!(p.aabb.center_y, 440.0 - CLIMB_SPEED);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn idle_on_ladder_holds_position() {
        let ladders = [Ladder::new(300.0, 430.0, SpriteSize::new(40.0, 96.0))];
        let mut p = player(300.0, 440.0);
        p.velocity_y = 3.0;
        p.update(&idle(), &ladders, &[], &CTX);
        assert_eq!(p.aabb.center_y, 440.0);
        assert_eq!(p.velocity_y, 0.0);
    }

    #[test]
    fn off_center_contact_does_not_grab_ladder() {
        let ladders = [Ladder::new(300.0, 430.0, SpriteSize::new(40.0, 96.0))];
        let mut p = player(325.0, 440.0);
        p.update(&idle(), &ladders, &[], &CTX);
        assert!(!p.is_on_ladder());
        assert!(p.aabb.center_y > 440.0);
    }

    #[test]
    fn down_from_ladder_top_steps_onto_rungs() {
        let platforms = [floor()];
        // Ladder hangs below the platform with its top flush with the floor.
        let ladders = [Ladder::new(300.0, 538.0, SpriteSize::new(40.0, 96.0))];
        let mut p = player(300.0, 0.0);
        p.aabb.set_bottom(490.0);

        p.update(
            &PlayerInput {
                down: true,
                ..idle()
            },
            &ladders,
            &platforms,
            &CTX,
        );
        assert!(!p.is_on_platform());
        assert!(p.aabb.bottom() > 490.0 + CLIMB_SPEED - EDGE_EPSILON);
    }

    #[test]
    fn blaster_replaces_hammer_and_keeps_feet_planted() {
        let mut p = player(300.0, 400.0);
        let bottom = p.aabb.bottom();

        p.apply(Transition::Equip(Equipment::Hammer));
        assert!(p.has_hammer());
        assert_eq!(p.aabb.height(), SpriteSizes::default().mario_hammer.height);
        assert_eq!(p.aabb.bottom(), bottom);

        p.apply(Transition::Equip(Equipment::Blaster));
        assert_eq!(p.equipment(), Equipment::Blaster);
        assert!(!p.has_hammer());
        assert_eq!(p.ammo(), BLASTER_BATCH);
        assert_eq!(p.aabb.bottom(), bottom);
    }

    #[test]
    fn hammer_clears_blaster_ammo() {
        let mut p = player(300.0, 400.0);
        p.apply(Transition::Equip(Equipment::Blaster));
        p.apply(Transition::Equip(Equipment::Hammer));
        assert_eq!(p.equipment(), Equipment::Hammer);
        assert_eq!(p.ammo(), 0);
    }

    #[test]
    fn firing_spends_ammo_then_drops_blaster() {
        let fire = PlayerInput {
            fire_pressed: true,
            ..idle()
        };
        let mut p = player(300.0, 400.0);
        p.apply(Transition::Equip(Equipment::Blaster));

        let mut shots = 0;
        for _ in 0..BLASTER_BATCH {
            if let Some(bullet) = p.update(&fire, &[], &[], &CTX) {
                assert_eq!(bullet.heading, p.facing);
                shots += 1;
            }
        }
        assert_eq!(shots, BLASTER_BATCH);
        assert_eq!(p.ammo(), 0);
        assert_eq!(p.equipment(), Equipment::None);
        assert!(p.update(&fire, &[], &[], &CTX).is_none());
    }

    #[test]
    fn fire_without_blaster_is_ignored() {
        let fire = PlayerInput {
            fire_pressed: true,
            ..idle()
        };
        let mut p = player(300.0, 400.0);
        assert!(p.update(&fire, &[], &[], &CTX).is_none());
        p.apply(Transition::Equip(Equipment::Hammer));
        assert!(p.update(&fire, &[], &[], &CTX).is_none());
    }

    #[test]
    fn jump_over_barrel_is_scored_once_per_jump() {
        let barrel = Barrel::new(300.5, 470.0, SpriteSize::new(30.0, 30.0));
        let mut p = player(300.0, 400.0);
        assert!(!p.jump_over(&barrel));

        p.jumping = true;
        assert!(p.jump_over(&barrel));
        assert!(p.claim_jump_bonus());
        assert!(!p.claim_jump_bonus());

        p.aabb.center_x = 310.0;
        assert!(!p.jump_over(&barrel));
    }

    #[test]
    fn kill_marks_player_defeated() {
        let mut p = player(300.0, 400.0);
        p.apply(Transition::Kill);
        assert!(p.is_defeated());
    }

    #[test]
    fn input_snapshot_reads_held_and_pressed_keys() {
        let mut state = InputState::new();
        state.key_down(Key::Right);
        state.key_down(Key::Jump);
        let input = PlayerInput::from_state(&state);
        assert!(input.right);
        assert!(input.jump_pressed);
        assert!(!input.fire_pressed);

        state.end_frame();
        let input = PlayerInput::from_state(&state);
        assert!(input.right);
        assert!(!input.jump_pressed);
    }
}
