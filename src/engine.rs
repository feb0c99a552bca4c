//! Link mutation and component labelling.
//!
//! No cell ever holds more than two links, so every component is a simple chain and relabelling one is a walk along it.
//! Identifiers are therefore maintained eagerly on every edit instead of through a disjoint-set structure:
//! a component's label is always the index of one of its own cells, which keeps labels of distinct components distinct.

use std::collections::HashSet;

use log::trace;
use strum::IntoStaticStr;

use crate::board::Board;
use crate::cell::Hue;
use crate::error::EngineError;
use crate::location::Location;

/// What a validated [`Board::connect`] call did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConnectOutcome {
    /// A new link was made, possibly evicting older links of either cell.
    Connected,
    /// The cells were directly linked, so the call removed that link instead.
    Disconnected,
    /// The cells already share a chain without being linked to each other; nothing changed.
    Unchanged,
    /// Both cells carry different hues; two coloured paths never merge.
    Rejected,
}

impl Board {
    /// Link two adjacent cells.
    ///
    /// If the cells already share a component this toggles: the link between them is removed if there is one,
    /// and otherwise the call is [`ConnectOutcome::Unchanged`].
    /// A cell pushed over capacity drops its oldest link.
    /// Afterwards the merged component carries one identifier, and uncoloured cells take the hue of the coloured side.
    pub fn connect(&mut self, a: Location, b: Location) -> Result<ConnectOutcome, EngineError> {
        self.checked(a)?;
        self.checked(b)?;
        if !a.is_adjacent(b) {
            return Err(EngineError::NotAdjacent(a, b));
        }

        Ok(self.link(a, b))
    }

    pub(crate) fn link(&mut self, a: Location, b: Location) -> ConnectOutcome {
        if self[a].identifier == self[b].identifier {
            return match self.unlink(a, b) {
                true => ConnectOutcome::Disconnected,
                false => ConnectOutcome::Unchanged,
            };
        }

        let hue = match (self[a].hue, self[b].hue) {
            (Some(hue_a), Some(hue_b)) if hue_a != hue_b => return ConnectOutcome::Rejected,
            (hue_a, hue_b) => hue_a.or(hue_b),
        };

        self[a].connections.push(b);
        self[b].connections.push(a);

        for side in [a, b] {
            if self[side].degree() > self[side].max_connections() {
                let oldest = self[side].connections[0];
                trace!("{side:?} over capacity, evicting {oldest:?}");
                self.unlink(side, oldest);
            }
        }

        let identifier = self[b].identifier;
        self.relabel(a, identifier, hue);

        debug_assert!(self[a].degree() <= self[a].max_connections());
        debug_assert!(self[b].degree() <= self[b].max_connections());

        ConnectOutcome::Connected
    }

    /// Remove the link between `a` and `b`, returning whether there was one.
    ///
    /// Adjacency is not required. Each side is relabelled with its own index,
    /// and a side left unlinked loses its hue unless it is numbered.
    pub fn disconnect(&mut self, a: Location, b: Location) -> Result<bool, EngineError> {
        self.checked(a)?;
        self.checked(b)?;

        Ok(self.unlink(a, b))
    }

    /// Clear the whole chain containing `at`, returning the number of links removed.
    ///
    /// Numbers, pairs, and the hues of numbered cells are left alone.
    pub fn delete_path(&mut self, at: Location) -> Result<usize, EngineError> {
        self.checked(at)?;

        let mut removed = 0;
        let mut visited = HashSet::new();
        let mut stack = vec![at];

        while let Some(location) = stack.pop() {
            if !visited.insert(location) {
                continue;
            }

            while let Some(&neighbour) = self[location].connections.first() {
                self.unlink(neighbour, location);
                removed += 1;
                stack.push(neighbour);
            }
        }

        Ok(removed)
    }

    /// One step of a player drawing from `from` into `to`.
    ///
    /// Drawing only continues from a coloured cell, so an uncoloured `from` yields `Ok(None)` and leaves the board alone.
    pub fn stroke(&mut self, from: Location, to: Location) -> Result<Option<ConnectOutcome>, EngineError> {
        self.checked(from)?;
        if self[from].hue.is_none() {
            return Ok(None);
        }

        self.connect(to, from).map(Some)
    }

    pub(crate) fn unlink(&mut self, a: Location, b: Location) -> bool {
        let removed = self[a].remove_connection(b) | self[b].remove_connection(a);
        if removed {
            let (identifier, hue) = (self[a].idx, self[a].hue);
            self.relabel(a, identifier, hue);
            let (identifier, hue) = (self[b].idx, self[b].hue);
            self.relabel(b, identifier, hue);
        }

        removed
    }

    /// Every location reachable from `start`, `start` first.
    pub(crate) fn component_of(&self, start: Location) -> Vec<Location> {
        let mut visited = HashSet::new();
        let mut component = Vec::new();
        let mut stack = vec![start];

        while let Some(location) = stack.pop() {
            if !visited.insert(location) {
                continue;
            }
            component.push(location);
            stack.extend(self[location].connections.iter().filter(|c| !visited.contains(*c)));
        }

        component
    }

    pub(crate) fn relabel(&mut self, start: Location, identifier: usize, hue: Option<Hue>) {
        for location in self.component_of(start) {
            let cell = &mut self[location];
            cell.identifier = identifier;
            if cell.hue.is_none() {
                cell.hue = hue;
            }
        }
    }

    /// Recompute identifiers and spread hues across every component from scratch.
    pub(crate) fn reidentify_all(&mut self) {
        let mut seen = HashSet::new();

        for location in self.locations() {
            if seen.contains(&location) {
                continue;
            }

            let component = self.component_of(location);
            let hue = component.iter().find_map(|member| self[*member].hue);
            let identifier = self[location].idx;
            for member in component {
                seen.insert(member);
                let cell = &mut self[member];
                cell.identifier = identifier;
                if cell.hue.is_none() {
                    cell.hue = hue;
                }
            }
        }
    }
}
