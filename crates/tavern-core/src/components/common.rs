//! Common components used across multiple entity types.

use serde::{Deserialize, Serialize};

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Movement collaborator component.
///
/// The state machines never compute positions or paths; they only issue
/// destinations and poll [`Mover::has_reached`]. Movement is treated as
/// infallible and eventually-completing - the movement system walks the
/// agent in a straight line across the open floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mover {
    /// Current position on the floor.
    pub position: Vec3,
    /// Where the agent is headed.
    pub destination: Vec3,
    /// Walking speed in units per second.
    pub speed: f32,
    /// Seated agents do not walk until they stand up.
    pub seated: bool,
    /// Set when a new destination is issued; cleared once the movement
    /// system has picked the path up. While pending, `has_reached` is false.
    pub path_pending: bool,
}

impl Mover {
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            destination: position,
            speed,
            seated: false,
            path_pending: false,
        }
    }

    /// Issue a new destination. The agent starts walking next step.
    pub fn set_destination(&mut self, point: Vec3) {
        self.destination = point;
        self.path_pending = true;
    }

    /// False while a path is pending or while the remaining distance
    /// exceeds the threshold.
    pub fn has_reached(&self, threshold: f32) -> bool {
        !self.path_pending && self.position.distance(&self.destination) <= threshold
    }

    /// Snap onto a seat anchor and stop walking.
    pub fn sit_at(&mut self, anchor: Vec3) {
        self.position = anchor;
        self.destination = anchor;
        self.path_pending = false;
        self.seated = true;
    }

    /// Leave the seat; the agent can walk again.
    pub fn stand_up(&mut self) {
        self.seated = false;
    }
}

/// Name component for entities that have names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
