use crate::{Exercise, HistoryEntry, TrainingType};

/// Entries of one training type sharing the same sub-exercise name, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryGroup {
    pub name: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupedHistory {
    pub free_weight: Vec<HistoryGroup>,
    pub machine: Vec<HistoryGroup>,
    pub body_weight: Vec<HistoryGroup>,
}

impl GroupedHistory {
    #[must_use]
    pub fn groups(&self, training_type: TrainingType) -> &[HistoryGroup] {
        match training_type {
            TrainingType::FreeWeight => &self.free_weight,
            TrainingType::Machine => &self.machine,
            TrainingType::BodyWeight => &self.body_weight,
        }
    }
}

impl Exercise {
    #[must_use]
    pub fn grouped_history(&self) -> GroupedHistory {
        GroupedHistory {
            free_weight: group_history(self.history.entries(TrainingType::FreeWeight)),
            machine: group_history(self.history.entries(TrainingType::Machine)),
            body_weight: group_history(self.history.entries(TrainingType::BodyWeight)),
        }
    }
}

/// Groups entries by name.
///
/// The entries are sorted newest first before grouping, so the groups are ordered by their most
/// recent entry. Entries with the same date keep their relative order. The lookup of an existing
/// group is a linear scan.
#[must_use]
pub fn group_history(entries: &[HistoryEntry]) -> Vec<HistoryGroup> {
    let mut groups: Vec<HistoryGroup> = vec![];

    for entry in sorted_newest_first(entries.iter()) {
        match groups.iter_mut().find(|g| g.name == entry.group_name()) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(HistoryGroup {
                name: entry.group_name().to_string(),
                entries: vec![entry.clone()],
            }),
        }
    }

    groups
}

/// Entries of a single history group, newest first.
#[must_use]
pub fn history_of(entries: &[HistoryEntry], group_name: &str) -> Vec<HistoryEntry> {
    sorted_newest_first(entries.iter().filter(|e| e.group_name() == group_name))
        .into_iter()
        .cloned()
        .collect()
}

fn sorted_newest_first<'a>(
    entries: impl Iterator<Item = &'a HistoryEntry>,
) -> Vec<&'a HistoryEntry> {
    let mut entries = entries.collect::<Vec<_>>();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}
