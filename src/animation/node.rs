use glam::{DAffine3, DVec3, Quat, Vec3};

use crate::animation::tracks::{KeyframeCursor, KeyframeTrack};

/// The three independently keyed channels of an [`AnimationNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Position,
    Rotation,
    Scale,
}

/// One animated joint.
///
/// Channels are sampled independently, so position, rotation and scale may
/// have different key counts and key times. [`update`](Self::update) bakes
/// them into [`transform`](Self::transform), which node trees read when
/// composing world transforms.
#[derive(Debug, Clone, Default)]
pub struct AnimationNode {
    pub position: KeyframeTrack<DVec3>,
    pub rotation: KeyframeTrack<Quat>,
    pub scale: KeyframeTrack<Vec3>,

    /// Local transform (translation × rotation × scale) at the last update.
    transform: DAffine3,

    cursors: [KeyframeCursor; 3],
}

impl AnimationNode {
    #[must_use]
    pub fn new(
        position: KeyframeTrack<DVec3>,
        rotation: KeyframeTrack<Quat>,
        scale: KeyframeTrack<Vec3>,
    ) -> Self {
        Self {
            position,
            rotation,
            scale,
            transform: DAffine3::IDENTITY,
            cursors: [KeyframeCursor::default(); 3],
        }
    }

    /// Samples every channel at `time_ms` and caches the composed local
    /// transform. A channel without keys contributes identity.
    pub fn update(&mut self, time_ms: f32) {
        let [position_cursor, rotation_cursor, scale_cursor] = &mut self.cursors;

        let position = self
            .position
            .sample_with_cursor(time_ms, position_cursor)
            .unwrap_or(DVec3::ZERO);
        let rotation = self
            .rotation
            .sample_with_cursor(time_ms, rotation_cursor)
            .unwrap_or(Quat::IDENTITY);
        let scale = self
            .scale
            .sample_with_cursor(time_ms, scale_cursor)
            .unwrap_or(Vec3::ONE);

        self.transform = DAffine3::from_scale_rotation_translation(
            scale.as_dvec3(),
            rotation.as_dquat(),
            position,
        );
    }

    #[inline]
    #[must_use]
    pub fn transform(&self) -> &DAffine3 {
        &self.transform
    }

    /// Latest key time over all channels.
    #[must_use]
    pub fn end_time(&self) -> Option<f32> {
        [
            self.position.end_time(),
            self.rotation.end_time(),
            self.scale.end_time(),
        ]
        .into_iter()
        .flatten()
        .reduce(f32::max)
    }

    /// `(channel, time count, value count, first unordered key)` per channel.
    pub(crate) fn channel_layout(&self) -> [(Channel, usize, usize, Option<usize>); 3] {
        [
            (
                Channel::Position,
                self.position.times.len(),
                self.position.values.len(),
                self.position.first_unordered_key(),
            ),
            (
                Channel::Rotation,
                self.rotation.times.len(),
                self.rotation.values.len(),
                self.rotation.first_unordered_key(),
            ),
            (
                Channel::Scale,
                self.scale.times.len(),
                self.scale.values.len(),
                self.scale.first_unordered_key(),
            ),
        ]
    }
}
