use crate::animation::LoopMode;

/// Post-load configuration applied by [`Scene::prepare`](crate::Scene::prepare).
///
/// # Example
///
/// ```rust,ignore
/// use rtscene::{LoopMode, Scene, SceneSettings};
///
/// let settings = SceneSettings {
///     allow_update: true,
///     loop_mode: Some(LoopMode::Loop),
///     ..Default::default()
/// };
/// scene.prepare(&settings)?;
/// ```
#[derive(Debug, Clone)]
pub struct SceneSettings {
    /// Treat animated geometry as dynamic.
    ///
    /// When `true`, instances under animated nodes get `allow_update` and are
    /// kept out of the merged static acceleration structure. When `false`,
    /// every instance is static and animation only moves the camera.
    pub allow_update: bool,

    /// Run [`Scene::validate`](crate::Scene::validate) and fail on the first
    /// error. When `false`, problems are logged as warnings and playback
    /// relies on clamped sampling and index skipping.
    pub strict_validation: bool,

    /// Loop mode forced onto every animation. `None` keeps what the loader
    /// set.
    pub loop_mode: Option<LoopMode>,

    /// Recompute the scene bounds from the instances.
    pub update_bounds: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            allow_update: true,
            strict_validation: true,
            loop_mode: None,
            update_bounds: true,
        }
    }
}
