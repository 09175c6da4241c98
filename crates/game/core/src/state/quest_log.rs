//! Per-player quest progress.

use std::collections::BTreeMap;

use crate::env::{Inventory, QuestDef, QuestObjective, QuestOracle};

use super::{EnemyTypeId, QuestId};

/// Where a quest stands for one player.
///
/// `Available` is never stored: it is derived from the prerequisite whenever a
/// quest has no entry yet.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum QuestState {
    /// Objectives met, rewards waiting to be claimed.
    Complete,
    Active,
    Available,
    /// Rewards claimed.
    Done,
}

/// Stored progress of an accepted quest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestEntry {
    pub state: QuestState,
    /// One counter per objective, in definition order, capped at `required`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub progress: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestLog {
    #[cfg_attr(feature = "serde", serde(default))]
    entries: BTreeMap<QuestId, QuestEntry>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, id: &QuestId) -> Option<&QuestEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestId, &QuestEntry)> {
        self.entries.iter()
    }

    /// Stored state, or `Available` when the quest is untouched and its
    /// prerequisite is done. `None` means the quest is not offered yet.
    pub fn state(&self, def: &QuestDef) -> Option<QuestState> {
        if let Some(entry) = self.entries.get(&def.id) {
            return Some(entry.state);
        }
        let unlocked = def
            .prerequisite
            .as_ref()
            .is_none_or(|prerequisite| self.is_done(prerequisite));
        unlocked.then_some(QuestState::Available)
    }

    pub fn is_done(&self, id: &QuestId) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.state == QuestState::Done)
    }

    /// Whether any quest is waiting for its rewards to be claimed.
    pub fn has_completable(&self) -> bool {
        self.entries
            .values()
            .any(|entry| entry.state == QuestState::Complete)
    }

    /// Every offered or known quest with its state, completable first, then
    /// active, available and done.
    pub fn overview<'a>(
        &self,
        defs: impl IntoIterator<Item = &'a QuestDef>,
    ) -> Vec<(&'a QuestId, QuestState)> {
        let mut listed: Vec<_> = defs
            .into_iter()
            .filter_map(|def| self.state(def).map(|state| (&def.id, state)))
            .collect();
        listed.sort_by_key(|(_, state)| *state);
        listed
    }

    /// Starts tracking a quest with zeroed counters. Callers check availability.
    pub(crate) fn start(&mut self, def: &QuestDef) -> QuestState {
        let mut entry = QuestEntry {
            state: QuestState::Active,
            progress: vec![0; def.objectives.len()],
        };
        if objectives_met(def, &entry.progress) {
            entry.state = QuestState::Complete;
        }
        let state = entry.state;
        self.entries.insert(def.id.clone(), entry);
        state
    }

    pub(crate) fn finish(&mut self, id: &QuestId) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.state = QuestState::Done;
        }
    }

    /// Counts defeated enemies toward kill objectives. Returns the quests this
    /// completed.
    pub fn record_kills(
        &mut self,
        defeated: &[EnemyTypeId],
        quests: &dyn QuestOracle,
    ) -> Vec<QuestId> {
        self.advance(quests, |objective, current| match objective {
            QuestObjective::Kill { enemy, required } => {
                let kills = defeated.iter().filter(|id| *id == enemy).count() as u32;
                Some(current.saturating_add(kills).min(*required))
            }
            _ => None,
        })
    }

    /// Marks visit objectives for `location` as met.
    pub fn record_visit(&mut self, location: &str, quests: &dyn QuestOracle) -> Vec<QuestId> {
        self.advance(quests, |objective, _| match objective {
            QuestObjective::Visit { location: target } if target == location => Some(1),
            _ => None,
        })
    }

    /// Re-reads fetch objectives from what the inventory holds right now.
    ///
    /// Counters may go down when items are spent, but a quest that already
    /// completed stays complete.
    pub fn record_inventory(
        &mut self,
        inventory: &dyn Inventory,
        quests: &dyn QuestOracle,
    ) -> Vec<QuestId> {
        self.advance(quests, |objective, _| match objective {
            QuestObjective::Fetch { item, required } => Some(inventory.count(item).min(*required)),
            _ => None,
        })
    }

    fn advance(
        &mut self,
        quests: &dyn QuestOracle,
        update: impl Fn(&QuestObjective, u32) -> Option<u32>,
    ) -> Vec<QuestId> {
        let mut completed = Vec::new();
        for (id, entry) in &mut self.entries {
            if entry.state != QuestState::Active {
                continue;
            }
            let Some(def) = quests.quest(id) else {
                continue;
            };
            // Definitions may have gained objectives since the save was written.
            entry.progress.resize(def.objectives.len(), 0);
            for (objective, current) in def.objectives.iter().zip(entry.progress.iter_mut()) {
                if let Some(value) = update(objective, *current) {
                    *current = value;
                }
            }
            if objectives_met(def, &entry.progress) {
                entry.state = QuestState::Complete;
                completed.push(id.clone());
            }
        }
        completed
    }
}

fn objectives_met(def: &QuestDef, progress: &[u32]) -> bool {
    def.objectives
        .iter()
        .zip(progress)
        .all(|(objective, current)| *current >= objective.required())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::QuestCatalog;
    use crate::state::InventoryState;

    fn catalog() -> QuestCatalog {
        [
            QuestDef::new("pest_control", "Pest Control").with_objective(QuestObjective::Kill {
                enemy: "scrap_rat".into(),
                required: 2,
            }),
            QuestDef::new("deep_recon", "Deep Recon")
                .with_objective(QuestObjective::Visit {
                    location: "scrap_cave".into(),
                })
                .with_objective(QuestObjective::Kill {
                    enemy: "volt_wraith".into(),
                    required: 1,
                }),
            QuestDef::new("spare_parts", "Spare Parts").with_objective(QuestObjective::Fetch {
                item: "battery_cell".into(),
                required: 3,
            }),
            QuestDef::new("circuit_restore", "Circuit Restore").with_prerequisite("spare_parts"),
        ]
        .into_iter()
        .collect()
    }

    fn started(ids: &[&str]) -> (QuestCatalog, QuestLog) {
        let quests = catalog();
        let mut log = QuestLog::new();
        for id in ids {
            log.start(quests.get(&QuestId::from(*id)).unwrap());
        }
        (quests, log)
    }

    #[test]
    fn prerequisite_gates_availability() {
        let (quests, mut log) = started(&[]);
        let follow_up = quests.get(&"circuit_restore".into()).unwrap();
        assert_eq!(log.state(follow_up), None);

        log.start(quests.get(&"spare_parts".into()).unwrap());
        log.finish(&"spare_parts".into());
        assert_eq!(log.state(follow_up), Some(QuestState::Available));
    }

    #[test]
    fn kills_are_counted_per_type_and_capped() {
        let (quests, mut log) = started(&["pest_control"]);

        let completed = log.record_kills(&["slag_hound".into(), "scrap_rat".into()], &quests);
        assert!(completed.is_empty());
        assert_eq!(log.entry(&"pest_control".into()).unwrap().progress, vec![1]);

        let completed = log.record_kills(
            &["scrap_rat".into(), "scrap_rat".into(), "scrap_rat".into()],
            &quests,
        );
        assert_eq!(completed, vec![QuestId::from("pest_control")]);
        let entry = log.entry(&"pest_control".into()).unwrap();
        assert_eq!(entry.progress, vec![2]);
        assert_eq!(entry.state, QuestState::Complete);
    }

    #[test]
    fn untaken_quests_do_not_progress() {
        let (quests, mut log) = started(&[]);
        assert!(log.record_kills(&["scrap_rat".into()], &quests).is_empty());
        assert!(log.entry(&"pest_control".into()).is_none());
    }

    #[test]
    fn every_objective_must_be_met() {
        let (quests, mut log) = started(&["deep_recon"]);

        log.record_kills(&["volt_wraith".into()], &quests);
        assert_eq!(
            log.entry(&"deep_recon".into()).unwrap().state,
            QuestState::Active
        );

        assert!(log.record_visit("rust_yard", &quests).is_empty());
        assert_eq!(
            log.record_visit("scrap_cave", &quests),
            vec![QuestId::from("deep_recon")]
        );
    }

    #[test]
    fn fetch_tracks_current_inventory() {
        let (quests, mut log) = started(&["spare_parts"]);
        let mut inventory = InventoryState::new();
        let cell = crate::state::ItemId::from("battery_cell");

        inventory.add_consumable(cell.clone(), 2);
        log.record_inventory(&inventory, &quests);
        assert_eq!(log.entry(&"spare_parts".into()).unwrap().progress, vec![2]);

        inventory.take_consumable(&cell);
        log.record_inventory(&inventory, &quests);
        assert_eq!(log.entry(&"spare_parts".into()).unwrap().progress, vec![1]);

        inventory.add_consumable(cell, 5);
        assert_eq!(log.record_inventory(&inventory, &quests).len(), 1);
        assert_eq!(log.entry(&"spare_parts".into()).unwrap().progress, vec![3]);
        assert!(log.has_completable());
    }

    #[test]
    fn overview_lists_completable_quests_first() {
        let (quests, mut log) = started(&["pest_control", "spare_parts"]);
        log.record_kills(&["scrap_rat".into(), "scrap_rat".into()], &quests);

        let overview = log.overview(quests.iter());
        let states: Vec<_> = overview.iter().map(|(id, state)| (id.as_str(), *state)).collect();
        assert_eq!(
            states,
            vec![
                ("pest_control", QuestState::Complete),
                ("spare_parts", QuestState::Active),
                ("deep_recon", QuestState::Available),
            ]
        );
    }
}
