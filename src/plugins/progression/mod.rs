//! Progression store: powers the player owns and levels they have cleared.
//!
//! Lifetime is one game session. Only two operations mutate it, both idempotent:
//! [`Progression::unlock_power`] and [`Progression::complete_level`].

use bevy::prelude::*;

use crate::content::levels::LevelId;
use crate::content::powers::{PowerCatalog, PowerDefinition, PowerKind};

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Progression {
    /// Insertion order is unlock order; never empty.
    unlocked: Vec<PowerKind>,
    completed: Vec<LevelId>,
}

impl FromWorld for Progression {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<PowerCatalog>() {
            Some(catalog) => Self::new(catalog),
            None => Self::new(&PowerCatalog::default()),
        }
    }
}

impl Progression {
    /// Fresh session: the catalog's `starts_unlocked` powers, nothing completed.
    pub fn new(catalog: &PowerCatalog) -> Self {
        let mut unlocked = catalog.starting_powers();
        if unlocked.is_empty() {
            warn!("no power starts unlocked, falling back to {}", PowerKind::STARTING.id());
            unlocked.push(PowerKind::STARTING);
        }
        Self {
            unlocked,
            completed: Vec::new(),
        }
    }

    /// Returns `true` if the power was newly unlocked.
    pub fn unlock_power(&mut self, kind: PowerKind) -> bool {
        if self.unlocked.contains(&kind) {
            return false;
        }
        self.unlocked.push(kind);
        info!("power unlocked: {}", kind.id());
        true
    }

    /// Returns `true` if the level was newly completed.
    pub fn complete_level(&mut self, id: LevelId) -> bool {
        if self.completed.contains(&id) {
            return false;
        }
        self.completed.push(id);
        info!("level {id} completed");
        true
    }

    #[inline]
    pub fn is_unlocked(&self, kind: PowerKind) -> bool {
        self.unlocked.contains(&kind)
    }

    #[inline]
    pub fn has_completed(&self, id: LevelId) -> bool {
        self.completed.contains(&id)
    }

    #[inline]
    pub fn unlocked(&self) -> &[PowerKind] {
        &self.unlocked
    }

    #[inline]
    pub fn completed(&self) -> &[LevelId] {
        &self.completed
    }

    /// Unlocked powers in unlock order, resolved against the catalog.
    ///
    /// A kind with no catalog entry is skipped (and logged) rather than
    /// failing the whole list.
    pub fn available_powers<'a>(&self, catalog: &'a PowerCatalog) -> Vec<&'a PowerDefinition> {
        self.unlocked
            .iter()
            .filter_map(|kind| match catalog.get(*kind) {
                Ok(def) => Some(def),
                Err(e) => {
                    warn!("skipping unlocked power: {e}");
                    None
                }
            })
            .collect()
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Progression>();
}
