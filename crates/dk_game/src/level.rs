//! The per-level simulation loop.
//!
//! A [`Level`] owns every entity in play and advances them in a fixed order
//! once per frame. It starts `Running` and ends in `Won` or `Lost`; both
//! are terminal and further calls to [`Level::step`] do nothing.
//!
//! Frame order: timer, ladders, barrels, bullets, monkeys, bananas, pickups,
//! player, boss, then win/lose evaluation. A win found in the same frame as a
//! loss takes precedence.

use dk_core::time::FrameTimer;

use crate::collision::{resolve, Transition};
use crate::config::{GameConfig, SpriteSizes};
use crate::entity::{Entity, EntityKind, SimContext};
use crate::level_data::{LevelFile, LevelRules};
use crate::patrol::{Monkey, PatrolBehavior};
use crate::player::{Player, PlayerInput, PlayerSprites};
use crate::projectile::Projectile;
use crate::props::{Barrel, Donkey, Ladder, Pickup, PickupKind, Platform};
use crate::render::{RenderSink, SpriteId, SpriteQuad};

pub const BARREL_JUMP_SCORE: u32 = 30;
pub const BARREL_SMASH_SCORE: u32 = 100;
pub const ENEMY_DEFEAT_SCORE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Running,
    Won,
    Lost,
}

/// Things that happened during a frame, for the layer above to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelEvent {
    BarrelJumped,
    BarrelSmashed,
    EnemyDefeated,
    BossHit { health_left: u32 },
    ItemCollected(PickupKind),
    PlayerKilled { by: EntityKind },
    BulletFired,
    BananaThrown,
    TimeUp,
}

pub struct Level {
    id: String,
    rules: LevelRules,
    ctx: SimContext,
    sprites: SpriteSizes,
    timer: FrameTimer,
    platforms: Vec<Platform>,
    ladders: Vec<Ladder>,
    barrels: Vec<Barrel>,
    monkeys: Vec<Monkey>,
    pickups: Vec<Pickup>,
    bullets: Vec<Projectile>,
    bananas: Vec<Projectile>,
    player: Player,
    donkey: Donkey,
    score: u32,
    reached_boss: bool,
    status: LevelStatus,
    events: Vec<LevelEvent>,
}

impl Level {
    pub fn from_data(data: &LevelFile, config: &GameConfig) -> Self {
        let sprites = config.sprites;

        let mut pickups: Vec<Pickup> = data
            .hammer
            .iter()
            .map(|p| Pickup::new(PickupKind::Hammer, p.x, p.y, sprites.hammer))
            .collect();
        pickups.extend(
            data.blasters
                .iter()
                .map(|p| Pickup::new(PickupKind::Blaster, p.x, p.y, sprites.blaster)),
        );

        let normal = data
            .normal_monkeys
            .iter()
            .map(|m| (m, PatrolBehavior::Normal));
        let intelligent = data
            .intelligent_monkeys
            .iter()
            .map(|m| (m, PatrolBehavior::intelligent()));
        let monkeys = normal
            .chain(intelligent)
            .map(|(m, behavior)| {
                Monkey::new(m.x, m.y, m.direction, m.route.clone(), behavior, sprites.monkey)
            })
            .collect();

        log::info!(
            "Level '{}' loaded: {} platforms, {} ladders, {} barrels, {} monkeys, {} pickups",
            data.level_id,
            data.platforms.len(),
            data.ladders.len(),
            data.barrels.len(),
            data.normal_monkeys.len() + data.intelligent_monkeys.len(),
            pickups.len()
        );

        Self {
            id: data.level_id.clone(),
            rules: data.rules,
            ctx: config.sim_context(),
            sprites,
            timer: FrameTimer::new(config.max_frames),
            platforms: data
                .platforms
                .iter()
                .map(|p| Platform::new(p.x, p.y, sprites.platform))
                .collect(),
            ladders: data
                .ladders
                .iter()
                .map(|p| Ladder::new(p.x, p.y, sprites.ladder))
                .collect(),
            barrels: data
                .barrels
                .iter()
                .map(|p| Barrel::new(p.x, p.y, sprites.barrel))
                .collect(),
            monkeys,
            pickups,
            bullets: Vec::new(),
            bananas: Vec::new(),
            player: Player::new(data.mario.x, data.mario.y, PlayerSprites::from(&sprites)),
            donkey: Donkey::new(data.donkey.x, data.donkey.y, sprites.donkey),
            score: 0,
            reached_boss: false,
            status: LevelStatus::Running,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds_left(&self) -> u64 {
        self.timer.seconds_left()
    }

    pub fn frame(&self) -> u64 {
        self.timer.frame()
    }

    pub fn boss_health(&self) -> u32 {
        self.donkey.health()
    }

    pub fn ammo(&self) -> u32 {
        self.player.ammo()
    }

    #[allow(dead_code)]
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Events produced by the most recent call to [`Level::step`].
    pub fn events(&self) -> &[LevelEvent] {
        &self.events
    }

    /// True once the frame counter has reached the configured limit.
    pub fn is_time_up(&self) -> bool {
        self.timer.is_expired()
    }

    pub fn win_condition_met(&self) -> bool {
        match self.rules {
            LevelRules::ReachBoss => self.reached_boss,
            LevelRules::ReachOrDefeatBoss => self.reached_boss || self.donkey.is_defeated(),
        }
    }

    /// Advance one frame and return the resulting status.
    pub fn step(&mut self, input: &PlayerInput) -> LevelStatus {
        self.events.clear();
        if self.status != LevelStatus::Running {
            return self.status;
        }

        self.timer.advance();

        for ladder in &mut self.ladders {
            ladder.update(&self.platforms);
        }

        self.update_barrels();
        self.update_bullets();
        self.update_monkeys();
        self.update_bananas();
        self.update_pickups();

        if let Some(bullet) = self
            .player
            .update(input, &self.ladders, &self.platforms, &self.ctx)
        {
            self.bullets.push(bullet);
            self.events.push(LevelEvent::BulletFired);
        }

        self.donkey.update(&self.platforms);
        self.check_boss_contact();
        self.evaluate();
        self.status
    }

    fn update_barrels(&mut self) {
        let player = &mut self.player;
        for barrel in &mut self.barrels {
            barrel.update(&self.platforms);

            let equipment = player.equipment();
            if let Some(reaction) = resolve(barrel, player, equipment) {
                if reaction.first == Transition::Deactivate {
                    self.score += BARREL_SMASH_SCORE;
                    self.events.push(LevelEvent::BarrelSmashed);
                }
                if reaction.kills_player() {
                    self.events
                        .push(LevelEvent::PlayerKilled { by: EntityKind::Barrel });
                }
            }

            if barrel.is_active() && player.jump_over(barrel) && player.claim_jump_bonus() {
                log::debug!("Jumped over a barrel");
                self.score += BARREL_JUMP_SCORE;
                self.events.push(LevelEvent::BarrelJumped);
            }
        }
    }

    /// Bullets test for hits where they are, then move.
    fn update_bullets(&mut self) {
        let equipment = self.player.equipment();
        for bullet in &mut self.bullets {
            if let Some(reaction) = resolve(bullet, &mut self.donkey, equipment) {
                if let Transition::Damage(_) = reaction.second {
                    self.events.push(LevelEvent::BossHit {
                        health_left: self.donkey.health(),
                    });
                }
            }
            for monkey in &mut self.monkeys {
                if let Some(reaction) = resolve(bullet, monkey, equipment) {
                    if reaction.second == Transition::Deactivate {
                        self.score += ENEMY_DEFEAT_SCORE;
                        self.events.push(LevelEvent::EnemyDefeated);
                    }
                }
            }
            for platform in &mut self.platforms {
                resolve(bullet, platform, equipment);
            }
            bullet.update();
        }
        self.bullets.retain(|bullet| bullet.is_active());
    }

    fn update_monkeys(&mut self) {
        let player = &mut self.player;
        for monkey in &mut self.monkeys {
            if monkey.update(&self.ctx, &self.platforms) {
                self.bananas.push(monkey.throw_banana(self.sprites.banana));
                self.events.push(LevelEvent::BananaThrown);
            }

            let equipment = player.equipment();
            if let Some(reaction) = resolve(monkey, player, equipment) {
                if reaction.first == Transition::Deactivate {
                    self.score += ENEMY_DEFEAT_SCORE;
                    self.events.push(LevelEvent::EnemyDefeated);
                }
                if reaction.kills_player() {
                    self.events
                        .push(LevelEvent::PlayerKilled { by: EntityKind::Monkey });
                }
            }
        }
    }

    fn update_bananas(&mut self) {
        let player = &mut self.player;
        for banana in &mut self.bananas {
            banana.update();
            let equipment = player.equipment();
            if let Some(reaction) = resolve(banana, player, equipment) {
                if reaction.kills_player() {
                    self.events
                        .push(LevelEvent::PlayerKilled { by: EntityKind::Banana });
                }
            }
        }
        self.bananas.retain(|banana| banana.is_active());
    }

    fn update_pickups(&mut self) {
        let player = &mut self.player;
        for pickup in &mut self.pickups {
            let equipment = player.equipment();
            if let Some(reaction) = resolve(pickup, player, equipment) {
                if reaction.first == Transition::Collect {
                    self.events.push(LevelEvent::ItemCollected(pickup.kind));
                }
            }
        }
    }

    /// Touching the boss wins with the hammer and is fatal without it.
    fn check_boss_contact(&mut self) {
        if !self.player.collides_with(&self.donkey) {
            return;
        }
        if self.player.has_hammer() {
            self.reached_boss = true;
            log::debug!("Reached the boss with the hammer");
            return;
        }
        let equipment = self.player.equipment();
        if let Some(reaction) = resolve(&mut self.donkey, &mut self.player, equipment) {
            if reaction.kills_player() {
                self.events
                    .push(LevelEvent::PlayerKilled { by: EntityKind::Donkey });
            }
        }
    }

    fn evaluate(&mut self) {
        if self.win_condition_met() {
            self.status = LevelStatus::Won;
        } else if self.player.is_defeated() {
            self.status = LevelStatus::Lost;
        } else if self.is_time_up() {
            self.events.push(LevelEvent::TimeUp);
            self.status = LevelStatus::Lost;
        }

        match self.status {
            LevelStatus::Running => {}
            LevelStatus::Won => log::info!(
                "Level '{}' won at frame {} with score {}",
                self.id,
                self.timer.frame(),
                self.score
            ),
            LevelStatus::Lost => log::info!(
                "Level '{}' lost at frame {} with score {}",
                self.id,
                self.timer.frame(),
                self.score
            ),
        }
    }

    /// Submit one quad per visible entity.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.begin_frame();

        for platform in &self.platforms {
            sink.draw(&SpriteQuad::from_bounds(SpriteId::Platform, platform.bounds()));
        }
        for ladder in &self.ladders {
            sink.draw(&SpriteQuad::from_bounds(SpriteId::Ladder, ladder.bounds()));
        }
        for barrel in self.barrels.iter().filter(|b| b.is_active()) {
            sink.draw(&SpriteQuad::from_bounds(SpriteId::Barrel, barrel.bounds()));
        }
        for pickup in self.pickups.iter().filter(|p| p.is_active()) {
            let sprite = match pickup.kind {
                PickupKind::Hammer => SpriteId::Hammer,
                PickupKind::Blaster => SpriteId::Blaster,
            };
            sink.draw(&SpriteQuad::from_bounds(sprite, pickup.bounds()));
        }
        for monkey in self.monkeys.iter().filter(|m| m.is_alive()) {
            sink.draw(&SpriteQuad::from_bounds(
                SpriteId::Monkey(monkey.facing),
                monkey.bounds(),
            ));
        }
        for banana in &self.bananas {
            sink.draw(&SpriteQuad::from_bounds(
                SpriteId::Banana(banana.heading),
                banana.bounds(),
            ));
        }
        for bullet in &self.bullets {
            sink.draw(&SpriteQuad::from_bounds(
                SpriteId::Bullet(bullet.heading),
                bullet.bounds(),
            ));
        }
        sink.draw(&SpriteQuad::from_bounds(SpriteId::Donkey, self.donkey.bounds()));
        sink.draw(&SpriteQuad::from_bounds(
            SpriteId::Mario {
                equipment: self.player.equipment(),
                facing: self.player.facing,
            },
            self.player.bounds(),
        ));

        sink.end_frame();
    }
}
