//! Puzzle engine - level session, drag/release state machine and animation pass
//!
//! The engine is an explicit context object: it owns the piece catalog, the
//! active level session (grid + roster) and the single selection. Hosts feed it
//! [`InputCommand`]s and `tick(now_ms)` calls, and drain [`EngineEvent`]s.
//!
//! # Drag phases
//!
//! ```text
//! Grabbed --move, no anchor--> FreeDrag --move, anchor--> SnappedPreview
//!    |                            ^                          |
//!    +--------move, anchor--------|--------------------------+
//!                                 |                          | moved past unstick,
//!                       detach done                          | no anchor
//!                                 +------- Detaching <-------+
//! ```
//!
//! Releasing from any phase runs the commit/rollback protocol.

use image::RgbaImage;
use tui_tiles_core::grid::backdrop_size;
use tui_tiles_core::{
    find_anchor, ArtworkError, ArtworkHandle, Celebration, EngineSnapshot, Grid, GridSnapshot,
    OccupancySnapshot, ParticleSnapshot, Piece, PieceSnapshot, Placement, Timing, SHAPES,
};
use tui_tiles_types::{InputCommand, PieceId, PointerButton, Viewport};

use crate::config::EngineConfig;
use crate::event::EngineEvent;
use crate::layout::stage_positions;
use crate::level::{validate_level, LevelDescriptor, LevelError};

/// Interaction phase of the selected piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragPhase {
    /// Pointer down inside the piece, not moved yet.
    Grabbed,
    /// Tracking the pointer 1:1.
    FreeDrag,
    /// Held on (or tweening to) a snap target.
    SnappedPreview { target: (f32, f32) },
    /// Easing from a snap target back to the pointer.
    Detaching,
}

/// Interaction state of any piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    Idle,
    /// Selected with the secondary button, not dragging.
    Selected,
    Dragging(DragPhase),
}

#[derive(Debug, Clone, Copy)]
struct Selection {
    piece: PieceId,
    dragging: bool,
    phase: DragPhase,
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    pos: (f32, f32),
    /// Last position while the primary button was down.
    held: (f32, f32),
    primary_down: bool,
}

#[derive(Debug, Clone)]
struct LevelSession {
    name: String,
    grid: Grid,
    /// Z-order, front first.
    roster: Vec<PieceId>,
    /// Descriptor order, used for staging.
    order: Vec<PieceId>,
    completed: bool,
}

pub struct PuzzleEngine {
    config: EngineConfig,
    timing: Timing,
    pieces: Vec<Piece>,
    session: Option<LevelSession>,
    viewport: Viewport,
    pointer: PointerState,
    selection: Option<Selection>,
    backdrop: Option<RgbaImage>,
    celebration: Celebration,
    in_game: bool,
    dirty: bool,
    events: Vec<EngineEvent>,
}

impl PuzzleEngine {
    pub fn new(config: EngineConfig, viewport: Viewport) -> Self {
        let config = config.normalized();
        Self {
            timing: config.timing(),
            celebration: Celebration::new(config.seed),
            config,
            pieces: Vec::new(),
            session: None,
            viewport,
            pointer: PointerState::default(),
            selection: None,
            backdrop: None,
            in_game: false,
            dirty: false,
            events: Vec::new(),
        }
    }

    /// Build one piece per artwork handle, in shape-table order.
    ///
    /// Any active level is dropped since its pieces are replaced.
    pub fn init_resources(&mut self, artwork: &[ArtworkHandle]) {
        if artwork.len() > SHAPES.len() {
            tracing::warn!(
                supplied = artwork.len(),
                shapes = SHAPES.len(),
                "more piece artwork than shapes, extra handles ignored"
            );
        }
        self.pieces = SHAPES
            .iter()
            .zip(artwork)
            .enumerate()
            .map(|(i, (shape, &art))| Piece::new(PieceId(i), shape, art))
            .collect();
        self.session = None;
        self.selection = None;
        self.dirty = true;
        tracing::debug!(pieces = self.pieces.len(), "piece resources initialized");
    }

    /// Store the processed backdrop, or log why it is missing and run without it.
    pub fn set_backdrop(&mut self, artwork: Result<RgbaImage, ArtworkError>) {
        match artwork {
            Ok(image) => {
                tracing::debug!(width = image.width(), height = image.height(), "backdrop set");
                self.backdrop = Some(image);
            }
            Err(err) => {
                tracing::error!(error = %err, "backdrop artwork unavailable, continuing without it");
                self.backdrop = None;
            }
        }
        self.dirty = true;
    }

    /// Start a level session. On error nothing changes.
    pub fn init_level(&mut self, tiles_x: u16, tiles_y: u16, piece_ids: &[usize]) -> Result<(), LevelError> {
        validate_level(tiles_x, tiles_y, piece_ids, self.pieces.len())?;

        for &id in piece_ids {
            self.pieces[id].reset();
        }

        let ids: Vec<PieceId> = piece_ids.iter().copied().map(PieceId).collect();
        self.session = Some(LevelSession {
            name: String::new(),
            grid: Grid::new(tiles_x, tiles_y, self.viewport),
            roster: ids.clone(),
            order: ids,
            completed: false,
        });
        self.selection = None;
        self.pointer.primary_down = false;
        self.celebration.clear();
        self.stage_unbound();
        self.dirty = true;

        tracing::info!(tiles_x, tiles_y, pieces = piece_ids.len(), "level initialized");
        Ok(())
    }

    pub fn start_level(&mut self, level: &LevelDescriptor) -> Result<(), LevelError> {
        self.init_level(level.tiles_x, level.tiles_y, &level.pieces)?;
        if let Some(session) = self.session.as_mut() {
            session.name = level.name.clone();
        }
        Ok(())
    }

    /// Gate input, ticks and resizes. Entering the game re-applies the layout.
    pub fn set_in_game(&mut self, in_game: bool) {
        if self.in_game == in_game {
            return;
        }
        self.in_game = in_game;
        self.selection = None;
        self.pointer.primary_down = false;
        if in_game {
            self.relayout();
        }
        self.dirty = true;
    }

    pub fn handle(&mut self, command: InputCommand, now_ms: u64) {
        match command {
            InputCommand::PointerDown { x, y, button } => self.handle_pointer_down(x, y, button),
            InputCommand::PointerMove { x, y } => self.handle_pointer_move(x, y, now_ms),
            InputCommand::PointerUp { button } => self.handle_pointer_up(button, now_ms),
            InputCommand::PointerCancel => self.handle_pointer_cancel(now_ms),
            InputCommand::SecondaryAction => self.handle_secondary_action(now_ms),
            InputCommand::Resize(viewport) => self.resize(viewport),
        }
    }

    /// Select the front-most piece under the pointer and promote it to the front.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32, button: PointerButton) {
        if !self.in_game {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        self.pointer.pos = (x, y);
        if button == PointerButton::Primary {
            self.pointer.primary_down = true;
            self.pointer.held = (x, y);
        }

        // A second button while dragging must not reset the rollback position.
        if self.selection.is_some_and(|s| s.dragging) {
            return;
        }

        let pieces = &self.pieces;
        let hit = session
            .roster
            .iter()
            .position(|id| pieces[id.0].hit(x, y));

        let Some(index) = hit else {
            self.selection = None;
            return;
        };

        let id = session.roster.remove(index);
        session.roster.insert(0, id);

        let primary = button == PointerButton::Primary;
        self.pieces[id.0].begin_grab(x, y, primary);
        self.selection = Some(Selection {
            piece: id,
            dragging: primary,
            phase: DragPhase::Grabbed,
        });
        self.dirty = true;
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32, now_ms: u64) {
        if !self.in_game {
            return;
        }
        self.pointer.pos = (x, y);
        if self.pointer.primary_down {
            self.pointer.held = (x, y);
        }

        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(sel) = self.selection.as_mut().filter(|s| s.dragging) else {
            return;
        };

        let piece = &mut self.pieces[sel.piece.0];
        let (ox, oy) = piece.grab_offset();
        let to = (x - ox, y - oy);
        let stick = self.config.stick_threshold;
        let anchors = session.grid.anchors();

        sel.phase = match sel.phase {
            DragPhase::SnappedPreview { target } => {
                let unstick = self.config.unstick_threshold;
                if (to.0 - target.0).abs() > unstick || (to.1 - target.1).abs() > unstick {
                    match find_anchor(anchors, to, piece.size(), stick) {
                        Some(m) => {
                            piece.snap_to(m.target, now_ms);
                            DragPhase::SnappedPreview { target: m.target }
                        }
                        None => {
                            piece.start_detach(now_ms);
                            DragPhase::Detaching
                        }
                    }
                } else {
                    sel.phase
                }
            }
            phase => match find_anchor(anchors, to, piece.size(), stick) {
                Some(m) => {
                    piece.snap_to(m.target, now_ms);
                    DragPhase::SnappedPreview { target: m.target }
                }
                // The detach tween keeps easing toward the pointer.
                None if phase == DragPhase::Detaching => DragPhase::Detaching,
                None => {
                    piece.set_position(to.0, to.1);
                    DragPhase::FreeDrag
                }
            },
        };
        self.dirty = true;
    }

    /// Only a dragging selection is released, and only by the primary button.
    pub fn handle_pointer_up(&mut self, button: PointerButton, now_ms: u64) {
        if !self.in_game {
            return;
        }
        if button == PointerButton::Primary {
            self.pointer.primary_down = false;
            if self.selection.is_some_and(|s| s.dragging) {
                self.release(now_ms);
            }
        }
    }

    pub fn handle_pointer_cancel(&mut self, now_ms: u64) {
        self.handle_pointer_up(PointerButton::Primary, now_ms);
    }

    /// Queue one quarter turn on the selection if it is free or being dragged.
    pub fn handle_secondary_action(&mut self, now_ms: u64) {
        if !self.in_game {
            return;
        }
        let Some(sel) = self.selection else {
            return;
        };
        let piece = &mut self.pieces[sel.piece.0];
        if (!piece.is_committed() || sel.dragging) && piece.queue_turn(&self.timing, now_ms, sel.dragging) {
            self.dirty = true;
        }
    }

    /// New canvas size: recompute anchors, re-snap committed pieces, restage the rest.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.in_game {
            self.relayout();
            self.dirty = true;
        }
    }

    /// Advance every animation channel. Returns whether a redraw is needed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.in_game {
            return false;
        }

        if let Some(session) = self.session.as_ref() {
            let held = self.pointer.held;
            for id in &session.roster {
                let attached = self
                    .selection
                    .is_some_and(|s| s.dragging && s.piece == *id);
                let pointer = attached.then_some(held);
                if self.pieces[id.0].advance(now_ms, &self.timing, pointer) {
                    self.dirty = true;
                }
            }
        }

        if let Some(sel) = self.selection.as_mut() {
            if sel.phase == DragPhase::Detaching && self.pieces[sel.piece.0].motion().is_rest() {
                sel.phase = DragPhase::FreeDrag;
            }
        }

        if self.celebration.advance(now_ms) {
            self.dirty = true;
        }

        let dirty = std::mem::replace(&mut self.dirty, false);
        if dirty && self.events.last() != Some(&EngineEvent::RedrawNeeded) {
            self.events.push(EngineEvent::RedrawNeeded);
        }
        dirty
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut out = EngineSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }

    /// Fill `out` reusing its allocations.
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.clear();
        out.in_game = self.in_game;
        out.has_backdrop = self.backdrop.is_some();

        if let Some(session) = self.session.as_ref() {
            out.level_name = Some(session.name.clone());
            out.grid = Some(GridSnapshot::from_grid(&session.grid));
            out.occupancy.extend_from_slice(session.grid.occupancy());
            out.tiles_remaining = session.grid.tiles_remaining();
            out.completed = session.completed;

            let selected = self.selection.map(|s| s.piece);
            for id in session.roster.iter().rev() {
                out.pieces
                    .push(PieceSnapshot::from_piece(&self.pieces[id.0], selected == Some(*id)));
            }
        }

        out.particles.extend(self.celebration.particles().iter().map(|p| ParticleSnapshot {
            x: p.pos.0,
            y: p.pos.1,
            color: p.color,
            fade: p.fade,
        }));
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn in_game(&self) -> bool {
        self.in_game
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.session.as_ref().map(|s| &s.grid)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn catalog_len(&self) -> usize {
        self.pieces.len()
    }

    /// Level pieces in z-order, front first.
    pub fn roster(&self) -> &[PieceId] {
        self.session.as_ref().map_or(&[][..], |s| s.roster.as_slice())
    }

    pub fn level_name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.name.as_str())
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selection.map(|s| s.piece)
    }

    pub fn drag_phase(&self) -> Option<DragPhase> {
        self.selection.filter(|s| s.dragging).map(|s| s.phase)
    }

    pub fn interaction(&self, id: PieceId) -> Interaction {
        match self.selection {
            Some(s) if s.piece == id && s.dragging => Interaction::Dragging(s.phase),
            Some(s) if s.piece == id => Interaction::Selected,
            _ => Interaction::Idle,
        }
    }

    pub fn tiles_remaining(&self) -> Option<u32> {
        self.grid().map(Grid::tiles_remaining)
    }

    /// Whether the level-complete signal fired this session.
    pub fn level_completed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.completed)
    }

    pub fn backdrop(&self) -> Option<&RgbaImage> {
        self.backdrop.as_ref()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    /// Commit/rollback protocol for the dragged piece.
    fn release(&mut self, now_ms: u64) {
        let Some(sel) = self.selection.take() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let grid = &mut session.grid;
        let piece = &mut self.pieces[sel.piece.0];
        let shape = piece.shape();
        let prior = piece.placement();

        // Clear the old footprint so it cannot block its own re-placement.
        if let Placement::Committed { cell, rotation } = prior {
            grid.release(shape, cell, rotation);
        }

        // A turn still waiting in the queue would fire after the commit below.
        piece.drop_pending_turns();
        let drop = piece.resting_position(self.pointer.held);

        match find_anchor(grid.anchors(), drop, piece.size(), self.config.stick_threshold) {
            None => {
                piece.set_placement(Placement::Unbound);
                if piece.motion().is_detach() {
                    piece.snap_to(drop, now_ms);
                }
            }
            Some(m) => {
                piece.snap_to(m.target, now_ms);

                let accepted = m.canonical_cell().and_then(|cell| {
                    piece.set_placement(Placement::Candidate(cell));
                    match grid.validate_placement(shape, cell, piece.rotation()) {
                        Ok(()) => Some(cell),
                        Err(err) => {
                            tracing::debug!(cell, code = err.code(), reason = err.message(), "placement rejected");
                            None
                        }
                    }
                });

                match accepted {
                    Some(cell) => {
                        grid.commit(shape, cell, piece.rotation());
                        piece.commit_at(cell);
                    }
                    None => {
                        piece.set_placement(prior);
                        if piece.grid_rotation() != piece.rotation() {
                            piece.rotate_back(piece.grid_rotation(), now_ms);
                        }
                        let (gx, gy) = piece.grab_origin();
                        piece.snap_to((gx, gy), now_ms);
                        if let Placement::Committed { cell, rotation } = prior {
                            grid.commit(shape, cell, rotation);
                        }
                    }
                }
            }
        }

        let occupancy = OccupancySnapshot::from_grid(grid);
        tracing::debug!(
            piece = sel.piece.0,
            tiles_remaining = occupancy.tiles_remaining,
            "occupancy after release\n{}",
            occupancy.to_text()
        );
        self.events.push(EngineEvent::Occupancy(occupancy));

        if grid.is_complete() && !session.completed {
            session.completed = true;
            let (x, y) = self.pointer.pos;
            tracing::info!(level = %session.name, "level complete");
            self.events.push(EngineEvent::LevelComplete { x, y });
            if self.config.celebrate {
                self.celebration.burst(x, y, now_ms);
            }
        }

        self.dirty = true;
    }

    fn relayout(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.grid.recompute_anchors(self.viewport);

        for id in &session.roster {
            let piece = &mut self.pieces[id.0];
            if let Placement::Committed { cell, .. } = piece.placement() {
                if let Some((ax, ay)) = session.grid.anchor(cell) {
                    piece.settle_motion();
                    piece.set_position(ax, ay);
                }
            }
        }

        self.stage_unbound();
    }

    /// Lay out every unbound, unselected level piece in descriptor order.
    fn stage_unbound(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let grabbed = self.selection.filter(|s| s.dragging).map(|s| s.piece);

        let staged: Vec<PieceId> = session
            .order
            .iter()
            .copied()
            .filter(|id| Some(*id) != grabbed && !self.pieces[id.0].is_committed())
            .collect();
        let sizes: Vec<(f32, f32)> = staged.iter().map(|id| self.pieces[id.0].size()).collect();
        let grid = &session.grid;
        let positions = stage_positions(&sizes, self.viewport, backdrop_size(grid.tiles_x(), grid.tiles_y()));

        for (id, (x, y)) in staged.into_iter().zip(positions) {
            let piece = &mut self.pieces[id.0];
            piece.settle_motion();
            piece.set_position(x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_tiles_core::Motion;
    use tui_tiles_types::Rotation;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 768.0,
    };

    fn engine() -> PuzzleEngine {
        let mut e = PuzzleEngine::new(EngineConfig::default(), VIEW);
        let art: Vec<ArtworkHandle> = (0..9).map(ArtworkHandle).collect();
        e.init_resources(&art);
        e.set_in_game(true);
        e
    }

    /// Press inside piece `id`, drag it so its top-left lands at `to`, release.
    fn drop_piece(e: &mut PuzzleEngine, id: usize, to: (f32, f32), now: u64) {
        let (x, y) = e.piece(PieceId(id)).unwrap().position();
        e.handle_pointer_down(x + 5.0, y + 5.0, PointerButton::Primary);
        e.handle_pointer_move(to.0 + 5.0, to.1 + 5.0, now);
        e.handle_pointer_up(PointerButton::Primary, now);
    }

    #[test]
    fn init_level_rejects_bad_descriptors_without_side_effects() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        assert_eq!(e.init_level(0, 2, &[0]), Err(LevelError::EmptyGrid { tiles_x: 0, tiles_y: 2 }));
        assert!(matches!(e.init_level(2, 2, &[12]), Err(LevelError::UnknownPiece { .. })));
        assert_eq!(e.grid().unwrap().tiles_x(), 3);
        assert_eq!(e.roster(), &[PieceId(0)]);
    }

    #[test]
    fn init_level_without_resources_fails() {
        let mut e = PuzzleEngine::new(EngineConfig::default(), VIEW);
        assert_eq!(e.init_level(1, 1, &[0]), Err(LevelError::ResourcesNotLoaded));
    }

    #[test]
    fn staged_pieces_do_not_overlap_the_grid_backdrop() {
        let mut e = engine();
        e.init_level(5, 5, &[5, 6, 7, 8]).unwrap();
        let bx0 = (VIEW.width - 512.0) * 0.5;
        let bx1 = bx0 + 512.0;
        for id in e.roster() {
            let p = e.piece(*id).unwrap();
            let (x, _) = p.position();
            let (w, _) = p.size();
            assert!(x + w <= bx0 || x >= bx1, "piece {:?} at x={x}", id);
        }
    }

    #[test]
    fn pointer_down_promotes_to_front() {
        let mut e = engine();
        e.init_level(5, 5, &[5, 6, 7, 8]).unwrap();
        let (x, y) = e.piece(PieceId(8)).unwrap().position();
        e.handle_pointer_down(x + 1.0, y + 1.0, PointerButton::Primary);
        assert_eq!(e.roster()[0], PieceId(8));
        assert_eq!(e.drag_phase(), Some(DragPhase::Grabbed));
    }

    #[test]
    fn edge_of_piece_does_not_hit() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        let (x, y) = e.piece(PieceId(0)).unwrap().position();
        e.handle_pointer_down(x, y + 10.0, PointerButton::Primary);
        assert_eq!(e.selected(), None);
    }

    #[test]
    fn drag_snaps_then_detaches() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        let anchor = e.grid().unwrap().anchor(4).unwrap();
        let (x, y) = e.piece(PieceId(0)).unwrap().position();

        e.handle_pointer_down(x + 10.0, y + 10.0, PointerButton::Primary);
        e.handle_pointer_move(anchor.0 + 20.0, anchor.1 + 20.0, 0);
        assert_eq!(e.drag_phase(), Some(DragPhase::SnappedPreview { target: anchor }));

        // Small moves stay snapped.
        e.handle_pointer_move(anchor.0 + 30.0, anchor.1 + 20.0, 10);
        assert_eq!(e.drag_phase(), Some(DragPhase::SnappedPreview { target: anchor }));

        // Far away from any anchor: detach.
        e.handle_pointer_move(20.0, 20.0, 20);
        assert_eq!(e.drag_phase(), Some(DragPhase::Detaching));
        assert!(e.piece(PieceId(0)).unwrap().motion().is_detach());

        e.tick(20 + 200);
        assert_eq!(e.drag_phase(), Some(DragPhase::FreeDrag));
        assert_eq!(e.piece(PieceId(0)).unwrap().position(), (10.0, 10.0));
    }

    #[test]
    fn release_on_anchor_commits() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        let anchor = e.grid().unwrap().anchor(0).unwrap();
        drop_piece(&mut e, 0, anchor, 0);

        let p = e.piece(PieceId(0)).unwrap();
        assert_eq!(p.placement(), Placement::Committed { cell: 0, rotation: Rotation::Deg0 });
        assert_eq!(e.tiles_remaining(), Some(8));
        assert_eq!(e.selected(), None);
        assert!(e.take_events().iter().any(|ev| matches!(ev, EngineEvent::Occupancy(_))));
    }

    #[test]
    fn secondary_selection_rotates_free_piece_only() {
        let mut e = engine();
        e.init_level(3, 3, &[4]).unwrap();
        let (x, y) = e.piece(PieceId(4)).unwrap().position();

        e.handle_pointer_down(x + 5.0, y + 5.0, PointerButton::Secondary);
        assert_eq!(e.interaction(PieceId(4)), Interaction::Selected);
        e.handle_secondary_action(0);
        assert_eq!(e.piece(PieceId(4)).unwrap().rotation(), Rotation::Deg90);

        // Secondary up keeps the selection.
        e.handle_pointer_up(PointerButton::Secondary, 0);
        assert_eq!(e.selected(), Some(PieceId(4)));

        // A committed piece selected without dragging does not rotate.
        e.tick(500);
        let anchor = e.grid().unwrap().anchor(0).unwrap();
        drop_piece(&mut e, 4, anchor, 600);
        e.tick(1000);
        assert!(e.piece(PieceId(4)).unwrap().is_committed());
        let (x, y) = e.piece(PieceId(4)).unwrap().position();
        e.handle_pointer_down(x + 5.0, y + 5.0, PointerButton::Secondary);
        e.handle_secondary_action(1000);
        assert_eq!(e.piece(PieceId(4)).unwrap().queued_turns(), 0);
    }

    #[test]
    fn out_of_game_input_is_ignored() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        e.set_in_game(false);
        let (x, y) = e.piece(PieceId(0)).unwrap().position();
        e.handle_pointer_down(x + 5.0, y + 5.0, PointerButton::Primary);
        assert_eq!(e.selected(), None);
        assert!(!e.tick(100));
    }

    #[test]
    fn resize_resnaps_committed_pieces() {
        let mut e = engine();
        e.init_level(3, 3, &[0, 1]).unwrap();
        let anchor = e.grid().unwrap().anchor(4).unwrap();
        drop_piece(&mut e, 0, anchor, 0);
        e.tick(1000);

        e.handle(InputCommand::Resize(Viewport::new(1000.0, 600.0)), 1000);
        let new_anchor = e.grid().unwrap().anchor(4).unwrap();
        assert_ne!(new_anchor, anchor);
        let p = e.piece(PieceId(0)).unwrap();
        assert_eq!(p.position(), new_anchor);
        assert_eq!(p.motion(), Motion::Rest);
        assert_eq!(e.tiles_remaining(), Some(8));
    }

    #[test]
    fn redraw_event_is_not_duplicated() {
        let mut e = engine();
        e.init_level(3, 3, &[0]).unwrap();
        assert!(e.tick(0));
        e.handle_pointer_move(1.0, 1.0, 1);
        // Nothing grabbed: the move alone does not dirty the frame.
        assert!(!e.tick(2));
        let redraws = e
            .take_events()
            .into_iter()
            .filter(|ev| *ev == EngineEvent::RedrawNeeded)
            .count();
        assert_eq!(redraws, 1);
    }
}
