use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use game_core::{Item, ItemCollected, Obstacle, ObstacleHit, Player, Playfield};

use crate::PhysicsConfig;

/// Static floor the player rests on. Spawned empty; the collider is attached here.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GroundBody;

/// Whether Rapier currently reports the player touching the ground body.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroundContact(pub bool);

/// Keep Rapier gravity in sync with the configured value.
pub fn apply_config_gravity(
    mut rapier_config: Query<&mut RapierConfiguration>,
    config: Res<PhysicsConfig>,
) {
    let wanted = Vect::new(0.0, -config.gravity);
    for mut rc in &mut rapier_config {
        if rc.gravity != wanted {
            rc.gravity = wanted;
            debug!(target: "physics", "gravity set to {:?}", wanted);
        }
    }
}

pub fn attach_ground_body(
    mut commands: Commands,
    q: Query<Entity, Added<GroundBody>>,
    config: Res<PhysicsConfig>,
    playfield: Res<Playfield>,
) {
    for e in &q {
        let half = config.ground_thickness * 0.5;
        commands.entity(e).insert((
            RigidBody::Fixed,
            Collider::cuboid(playfield.width, half),
            Friction::coefficient(0.0),
            Transform::from_xyz(0.0, playfield.ground_world_y() - half, 0.0),
        ));
    }
}

/// Player: dynamic body, horizontal position pinned, feet at the transform origin.
pub fn attach_player_body(
    mut commands: Commands,
    q: Query<Entity, Added<Player>>,
    config: Res<PhysicsConfig>,
) {
    for e in &q {
        let he = config.player_half_extents;
        commands.entity(e).insert((
            RigidBody::Dynamic,
            Collider::compound(vec![(Vec2::new(0.0, he.y), 0.0, Collider::cuboid(he.x, he.y))]),
            Velocity::zero(),
            GravityScale(1.0),
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_X,
            Friction::coefficient(0.0),
            ActiveEvents::COLLISION_EVENTS,
            GroundContact::default(),
        ));
    }
}

pub fn attach_obstacle_sensor(
    mut commands: Commands,
    q: Query<Entity, Added<Obstacle>>,
    config: Res<PhysicsConfig>,
) {
    for e in &q {
        let he = config.obstacle_half_extents;
        commands.entity(e).insert((
            RigidBody::KinematicPositionBased,
            Collider::compound(vec![(config.obstacle_offset, 0.0, Collider::cuboid(he.x, he.y))]),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

pub fn attach_item_sensor(
    mut commands: Commands,
    q: Query<Entity, Added<Item>>,
    config: Res<PhysicsConfig>,
) {
    for e in &q {
        commands.entity(e).insert((
            RigidBody::KinematicPositionBased,
            Collider::ball(config.item_radius),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Translates Rapier contact/overlap events into gameplay events. Only pairs
/// involving the player matter; everything else is ignored.
pub fn bridge_collision_events(
    mut collisions: EventReader<CollisionEvent>,
    mut players: Query<&mut GroundContact, With<Player>>,
    items: Query<(), With<Item>>,
    obstacles: Query<(), With<Obstacle>>,
    ground: Query<(), With<GroundBody>>,
    mut collected: EventWriter<ItemCollected>,
    mut hits: EventWriter<ObstacleHit>,
) {
    for ev in collisions.read() {
        let (a, b, started) = match ev {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };
        let (player, other) = if players.contains(a) {
            (a, b)
        } else if players.contains(b) {
            (b, a)
        } else {
            continue;
        };

        if ground.contains(other) {
            if let Ok(mut contact) = players.get_mut(player) {
                contact.0 = started;
            }
            continue;
        }
        if !started {
            continue;
        }
        if items.contains(other) {
            collected.write(ItemCollected { item: other });
        } else if obstacles.contains(other) {
            debug!(target: "physics", "player {:?} hit obstacle {:?}", player, other);
            hits.write(ObstacleHit { obstacle: other });
        }
    }
}
