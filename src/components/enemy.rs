use bevy_ecs::prelude::Component;

/// Marker for hostile entities. Enemies retarget whoever hits them.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Enemy;
