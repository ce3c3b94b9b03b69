//! Lineup assignment engine: a fixed-size slot board plus bench, edited
//! through a select-then-swap interaction.
//!
//! The board is rebuilt from server registrations on screen entry, mutated
//! locally, and serialized back into a bulk import payload on save. Server
//! data may be inconsistent (more starters than slots, missing indices); the
//! builder reconciles instead of failing.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::api_client::{ImportPlayer, Registration};
use crate::formations::position_category;

const DEFAULT_POSITION: &str = "MF";
const DEFAULT_IMPORT_RATING: u32 = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct LineupPlayer {
    pub id: i64,
    pub name: String,
    pub position: String,
    /// Sprite key like `MF03`, assigned per position category in arrival
    /// order.
    pub avatar_key: String,
    /// Display-scale rating (62..100 band).
    pub rating: u32,
    pub jersey_number: usize,
}

/// Pending tap selection. A lineup selection always refers to an occupied
/// slot; empty slots can only be swap targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Lineup(usize),
    Bench(usize),
}

/// What a tap did, so the UI can log/toast accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Ignored,
    Selected,
    Cleared,
    Swapped,
    Flipped,
}

#[derive(Debug, Clone)]
pub struct LineupBoard {
    slots: Vec<Option<LineupPlayer>>,
    bench: Vec<LineupPlayer>,
    selection: Selection,
    editable: bool,
    flipped: HashSet<usize>,
    dirty: bool,
}

impl LineupBoard {
    pub fn new(squad_size: usize, editable: bool) -> Self {
        LineupBoard {
            slots: vec![None; squad_size],
            bench: Vec::new(),
            selection: Selection::Idle,
            editable,
            flipped: HashSet::new(),
            dirty: false,
        }
    }

    /// Builds the board from persisted registrations: starters first, then by
    /// ascending slot index with missing indices last. A starter with a valid
    /// in-range index lands on that slot, a starter without one takes the
    /// first open slot, and everyone left over goes to the bench.
    pub fn from_registrations(
        registrations: &[Registration],
        squad_size: usize,
        editable: bool,
    ) -> Self {
        let mut board = LineupBoard::new(squad_size, editable);

        let mut sorted: Vec<&Registration> = registrations.iter().collect();
        sorted.sort_by_key(|reg| {
            (
                !reg.is_starter,
                reg.position_index.is_none(),
                reg.position_index.unwrap_or(0),
            )
        });

        let mut avatar_seq: HashMap<&'static str, usize> = HashMap::new();
        for (order, reg) in sorted.iter().enumerate() {
            let position = reg
                .preferred_position
                .clone()
                .unwrap_or_else(|| DEFAULT_POSITION.to_string());
            let category = position_category(&position);
            let seq = avatar_seq.entry(category.code()).or_insert(0);
            let avatar_key = format!("{}{:02}", category.code(), *seq % category.avatar_count() + 1);
            *seq += 1;

            let player = LineupPlayer {
                id: reg.player_id,
                name: reg.display_name().to_string(),
                position,
                avatar_key,
                rating: reg.rating.unwrap_or(DEFAULT_IMPORT_RATING),
                jersey_number: reg.position_index.map(|i| i + 1).unwrap_or(order + 1),
            };

            match reg.position_index {
                Some(index) if reg.is_starter && index < squad_size => {
                    board.slots[index] = Some(player);
                }
                _ if reg.is_starter => match board.slots.iter_mut().find(|s| s.is_none()) {
                    Some(open) => *open = Some(player),
                    None => board.bench.push(player),
                },
                _ => board.bench.push(player),
            }
        }
        board
    }

    pub fn squad_size(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&LineupPlayer> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn bench(&self) -> &[LineupPlayer] {
        &self.bench
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn is_flipped(&self, index: usize) -> bool {
        self.flipped.contains(&index)
    }

    pub fn toggle_flip(&mut self, index: usize) {
        if index >= self.slots.len() {
            return;
        }
        if !self.flipped.insert(index) {
            self.flipped.remove(&index);
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        match self.selection {
            Selection::Idle => None,
            Selection::Lineup(i) => self.slot(i).map(|p| p.name.as_str()),
            Selection::Bench(i) => self.bench.get(i).map(|p| p.name.as_str()),
        }
    }

    pub fn cancel_selection(&mut self) {
        self.selection = Selection::Idle;
    }

    /// Tap on a lineup slot. Read-only boards just flip the card; editable
    /// boards select or swap per the pending selection.
    pub fn tap_lineup(&mut self, index: usize) -> TapOutcome {
        if index >= self.slots.len() {
            return TapOutcome::Ignored;
        }
        if !self.editable {
            self.toggle_flip(index);
            return TapOutcome::Flipped;
        }
        match self.selection {
            Selection::Idle => {
                if self.slots[index].is_some() {
                    self.selection = Selection::Lineup(index);
                    TapOutcome::Selected
                } else {
                    TapOutcome::Ignored
                }
            }
            Selection::Lineup(origin) => {
                self.slots.swap(origin, index);
                self.finish_swap()
            }
            Selection::Bench(origin) => {
                if origin >= self.bench.len() {
                    self.selection = Selection::Idle;
                    return TapOutcome::Cleared;
                }
                match self.slots[index].take() {
                    Some(occupant) => {
                        let incoming = std::mem::replace(&mut self.bench[origin], occupant);
                        self.slots[index] = Some(incoming);
                    }
                    None => {
                        let incoming = self.bench.remove(origin);
                        self.slots[index] = Some(incoming);
                    }
                }
                self.finish_swap()
            }
        }
    }

    /// Tap on a bench entry. Tapping the already-selected entry clears the
    /// selection instead of swapping.
    pub fn tap_bench(&mut self, index: usize) -> TapOutcome {
        if !self.editable || index >= self.bench.len() {
            return TapOutcome::Ignored;
        }
        match self.selection {
            Selection::Idle => {
                self.selection = Selection::Bench(index);
                TapOutcome::Selected
            }
            Selection::Bench(origin) if origin == index => {
                self.selection = Selection::Idle;
                TapOutcome::Cleared
            }
            Selection::Bench(origin) => {
                self.bench.swap(origin, index);
                self.finish_swap()
            }
            Selection::Lineup(origin) => {
                let Some(outgoing) = self.slots[origin].take() else {
                    self.selection = Selection::Idle;
                    return TapOutcome::Cleared;
                };
                let incoming = std::mem::replace(&mut self.bench[index], outgoing);
                self.slots[origin] = Some(incoming);
                self.finish_swap()
            }
        }
    }

    fn finish_swap(&mut self) -> TapOutcome {
        self.selection = Selection::Idle;
        self.dirty = true;
        TapOutcome::Swapped
    }

    /// Sorted multiset of player ids across slots and bench; invariant under
    /// every tap sequence.
    pub fn player_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .slots
            .iter()
            .filter_map(|s| s.as_ref().map(|p| p.id))
            .chain(self.bench.iter().map(|p| p.id))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Flat bulk-import payload: occupied slots as indexed starters, bench
    /// entries unindexed.
    pub fn import_payload(&self) -> Vec<ImportPlayer> {
        let starters = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref().map(|player| ImportPlayer {
                    name: player.name.clone(),
                    preferred_position: player.position.clone(),
                    rating: player.rating,
                    position_index: Some(index),
                    is_starter: true,
                })
            });
        let bench = self.bench.iter().map(|player| ImportPlayer {
            name: player.name.clone(),
            preferred_position: player.position.clone(),
            rating: player.rating,
            position_index: None,
            is_starter: false,
        });
        starters.chain(bench).collect()
    }
}
