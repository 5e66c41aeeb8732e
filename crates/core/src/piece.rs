//! Piece module - one placeable polyomino instance
//!
//! A piece owns its pixel transform, its grid binding and its animation channels.
//! It knows nothing about the grid: every coordinate here is canvas pixels.
//!
//! The transform invariant is that `(w, h)` equals the natural size at even
//! rotations and the swapped size at odd ones.

use crate::animation::{ease, progress, Motion, Spin, Timing};
use crate::shapes::Shape;
use crate::types::{PieceId, RotateDirection, Rotation, MAX_QUEUED_ROTATIONS};

/// Opaque artwork reference supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArtworkHandle(pub u32);

/// Grid binding of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Not associated with any grid cell.
    #[default]
    Unbound,
    /// Canonically aligned with a cell but not written into occupancy.
    Candidate(usize),
    /// Footprint written into occupancy at `cell` with `rotation`.
    Committed { cell: usize, rotation: Rotation },
}

impl Placement {
    /// Linear cell index of the rotation-0 anchor, if any.
    pub fn cell(&self) -> Option<usize> {
        match *self {
            Placement::Unbound => None,
            Placement::Candidate(cell) | Placement::Committed { cell, .. } => Some(cell),
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Placement::Committed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    id: PieceId,
    shape: &'static Shape,
    artwork: ArtworkHandle,
    original_w: f32,
    original_h: f32,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    rotation: Rotation,
    grid_rotation: Rotation,
    placement: Placement,
    angle: f32,
    spin: Spin,
    queued_turns: u8,
    motion: Motion,
    grab_offset: (f32, f32),
    grab_origin: (f32, f32),
}

impl Piece {
    pub fn new(id: PieceId, shape: &'static Shape, artwork: ArtworkHandle) -> Self {
        let (w, h) = shape.pixel_size();
        Self {
            id,
            shape,
            artwork,
            original_w: w,
            original_h: h,
            x: 0.0,
            y: 0.0,
            w,
            h,
            rotation: Rotation::Deg0,
            grid_rotation: Rotation::Deg0,
            placement: Placement::Unbound,
            angle: 0.0,
            spin: Spin::default(),
            queued_turns: 0,
            motion: Motion::Rest,
            grab_offset: (0.0, 0.0),
            grab_origin: (0.0, 0.0),
        }
    }

    /// Restore every placement and animation field to its pristine value.
    pub fn reset(&mut self) {
        *self = Self::new(self.id, self.shape, self.artwork);
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn artwork(&self) -> ArtworkHandle {
        self.artwork
    }

    pub fn cell_count(&self) -> u32 {
        self.shape.cell_count() as u32
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.w, self.h)
    }

    pub fn original_size(&self) -> (f32, f32) {
        (self.original_w, self.original_h)
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Rotation last written to the grid.
    pub fn grid_rotation(&self) -> Rotation {
        self.grid_rotation
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_committed(&self) -> bool {
        self.placement.is_committed()
    }

    /// Displayed angle in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn queued_turns(&self) -> u8 {
        self.queued_turns
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Pointer-to-origin offset recorded at grab time.
    pub fn grab_offset(&self) -> (f32, f32) {
        self.grab_offset
    }

    /// Position at the last primary grab; rollback target.
    pub fn grab_origin(&self) -> (f32, f32) {
        self.grab_origin
    }

    pub fn is_animating(&self) -> bool {
        self.queued_turns > 0 || !self.motion.is_rest()
    }

    /// Strict bounds test: edges do not hit.
    pub fn hit(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.w && py > self.y && py < self.y + self.h
    }

    /// Direct assignment, no tween.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Bind to `cell` at the live rotation and remember that rotation.
    pub fn commit_at(&mut self, cell: usize) {
        self.placement = Placement::Committed {
            cell,
            rotation: self.rotation,
        };
        self.grid_rotation = self.rotation;
    }

    /// Attach to the pointer at `(px, py)`.
    ///
    /// Any in-flight tween is settled at its target first. Only a primary grab
    /// records the rollback position.
    pub fn begin_grab(&mut self, px: f32, py: f32, primary: bool) {
        self.settle_motion();
        self.grab_offset = (px - self.x, py - self.y);
        if primary {
            self.grab_origin = (self.x, self.y);
        }
    }

    /// Where this piece ends up once its position channel finishes.
    ///
    /// `pointer` is the last held pointer position, used while detaching.
    pub fn resting_position(&self, pointer: (f32, f32)) -> (f32, f32) {
        match self.motion {
            Motion::Detach { .. } => (
                pointer.0 - self.grab_offset.0,
                pointer.1 - self.grab_offset.1,
            ),
            Motion::Tween { .. } => self.motion.tween_target().unwrap_or((self.x, self.y)),
            Motion::Rest => (self.x, self.y),
        }
    }

    /// Rotate by one step in `direction`, or to the absolute `target`.
    ///
    /// The box pivots on its center. When `attached`, the grab offset shifts by
    /// the same amount so the pointer stays on the same visual point.
    pub fn rotate(
        &mut self,
        target: Option<Rotation>,
        direction: RotateDirection,
        now_ms: u64,
        attached: bool,
    ) {
        let step = match target {
            Some(t) => self.rotation.turns_to(t),
            None => direction.step(),
        };

        let from_deg = self.rotation.degrees();
        self.rotation = target.unwrap_or_else(|| self.rotation.step(direction));

        let (old_w, old_h) = (self.w, self.h);
        if step.rem_euclid(2) == 1 {
            std::mem::swap(&mut self.w, &mut self.h);
        }

        self.spin = Spin {
            start_ms: now_ms,
            from_deg,
            delta_deg: step as f32 * 90.0,
        };

        let dx = (old_w - self.w) * 0.5;
        let dy = (old_h - self.h) * 0.5;
        self.x += dx;
        self.y += dy;
        if attached {
            self.grab_offset.0 -= dx;
            self.grab_offset.1 -= dy;
        }
    }

    /// Queue one quarter turn. Starts animating immediately when nothing was queued.
    ///
    /// Returns `false` when the queue is full.
    pub fn queue_turn(&mut self, timing: &Timing, now_ms: u64, attached: bool) -> bool {
        if self.queued_turns >= MAX_QUEUED_ROTATIONS {
            return false;
        }
        self.queued_turns += 1;
        if self.queued_turns == 1 {
            self.rotate(None, timing.direction, now_ms, attached);
        }
        true
    }

    /// Replace any queued turns with a single rotation back to `target`.
    pub fn rotate_back(&mut self, target: Rotation, now_ms: u64) {
        self.queued_turns = 1;
        self.rotate(Some(target), RotateDirection::Clockwise, now_ms, false);
    }

    /// Forget queued turns beyond the one currently animating.
    ///
    /// The in-flight turn is already reflected in `rotation`, so after this the
    /// orientation no longer changes once the spin settles.
    pub fn drop_pending_turns(&mut self) {
        self.queued_turns = self.queued_turns.min(1);
    }

    /// Start a tween from the current position to `target`.
    ///
    /// No tween starts when the piece already sits there or is already headed
    /// there; returns whether a new tween started. A new target supersedes the old.
    pub fn snap_to(&mut self, target: (f32, f32), now_ms: u64) -> bool {
        if self.motion.tween_target() == Some(target) {
            return false;
        }
        if target == (self.x, self.y) {
            // Already there: whatever was in flight is superseded.
            self.motion = Motion::Rest;
            return false;
        }
        self.motion = Motion::Tween {
            from: (self.x, self.y),
            delta: (target.0 - self.x, target.1 - self.y),
            start_ms: now_ms,
        };
        true
    }

    /// Start easing from the current position back toward the pointer.
    pub fn start_detach(&mut self, now_ms: u64) {
        self.motion = Motion::Detach {
            from: (self.x, self.y),
            start_ms: now_ms,
        };
    }

    /// Finish the position channel immediately.
    pub fn settle_motion(&mut self) {
        if let Some((x, y)) = self.motion.tween_target() {
            self.x = x;
            self.y = y;
        }
        self.motion = Motion::Rest;
    }

    /// Advance both channels to `now_ms`. Returns whether anything changed.
    ///
    /// `pointer` is the last held pointer position while this piece is attached.
    pub fn advance(&mut self, now_ms: u64, timing: &Timing, pointer: Option<(f32, f32)>) -> bool {
        let mut dirty = false;

        if self.queued_turns > 0 {
            let t = progress(now_ms, self.spin.start_ms, timing.rotate_ms);
            if t >= 1.0 {
                self.angle = self.spin.end_deg().rem_euclid(360.0);
                self.queued_turns -= 1;
                if self.queued_turns > 0 {
                    self.rotate(None, timing.direction, now_ms, pointer.is_some());
                }
            } else {
                self.angle = self.spin.from_deg + self.spin.delta_deg * ease(t);
            }
            dirty = true;
        }

        match self.motion {
            Motion::Rest => {}
            Motion::Tween {
                from,
                delta,
                start_ms,
            } => {
                let t = progress(now_ms, start_ms, timing.move_ms);
                if t >= 1.0 {
                    self.x = from.0 + delta.0;
                    self.y = from.1 + delta.1;
                    self.motion = Motion::Rest;
                } else {
                    let e = ease(t);
                    self.x = from.0 + delta.0 * e;
                    self.y = from.1 + delta.1 * e;
                }
                dirty = true;
            }
            Motion::Detach { from, start_ms } => {
                let Some((px, py)) = pointer else {
                    self.motion = Motion::Rest;
                    return true;
                };
                let goal = (px - self.grab_offset.0, py - self.grab_offset.1);
                let t = progress(now_ms, start_ms, timing.move_ms);
                if t >= 1.0 {
                    self.x = goal.0;
                    self.y = goal.1;
                    self.motion = Motion::Rest;
                } else {
                    let e = ease(t);
                    self.x = from.0 * (1.0 - e) + goal.0 * e;
                    self.y = from.1 * (1.0 - e) + goal.1 * e;
                }
                dirty = true;
            }
        }

        dirty
    }
}
