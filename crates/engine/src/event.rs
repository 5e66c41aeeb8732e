use tui_tiles_core::OccupancySnapshot;

/// Output of the engine, drained by the host with `take_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Something visible changed since the last frame.
    RedrawNeeded,
    /// Occupancy after a release (diagnostic).
    Occupancy(OccupancySnapshot),
    /// The grid became full for the first time this session, at the release point.
    LevelComplete { x: f32, y: f32 },
}

impl EngineEvent {
    pub fn is_level_complete(&self) -> bool {
        matches!(self, EngineEvent::LevelComplete { .. })
    }
}
